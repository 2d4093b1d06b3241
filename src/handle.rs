//! A thread-safe owner of one [`SX127x`] chip.

use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::{debug, warn};

use crate::radio::prelude::{
    LoRaBandwidth, LoRaFrequency, LoRaInit, LoRaMode, LoRaPower, LoRaRadio,
    LoRaSpreadingFactor, LoRaStatus, LoRaTelemetry,
};
use crate::radio::{RadioConfig, Sx127xError, SX127x};
use crate::{LogicalMode, OperatingMode};

/// Serializes every access to one chip behind a single lock.
///
/// Each operation holds the lock for its whole duration, including the
/// polling inside [`RadioHandle::receive()`] and [`RadioHandle::transmit()`].
/// The chip is put to sleep when the handle is dropped.
///
/// ```ignore
/// let handle = RadioHandle::attach(spi, delay, &RadioConfig::default())?;
/// std::thread::scope(|s| {
///     s.spawn(|| handle.transmit(b"ping"));
///     s.spawn(|| handle.get_rssi());
/// });
/// ```
pub struct RadioHandle<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    radio: Mutex<SX127x<SPI, DELAY>>,
}

impl<SPI, DELAY> RadioHandle<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Wrap an already initialized driver.
    pub fn new(radio: SX127x<SPI, DELAY>) -> Self {
        Self {
            radio: Mutex::new(radio),
        }
    }

    /// Initialize the chip on the given `spi` bus and apply `config`.
    ///
    /// Unlike [`LoRaInit::init()`], the registers are programmed only once.
    pub fn attach(
        spi: SPI,
        delay_impl: DELAY,
        config: &RadioConfig,
    ) -> Result<Self, Sx127xError<SPI::Error>> {
        let mut radio = SX127x::new(spi, delay_impl);
        radio.enter_lora_mode()?;
        radio.with_config(config)?;
        debug!("radio attached");
        Ok(Self::new(radio))
    }

    /// Take the lock, recovering it if a previous holder panicked.
    fn lock(&self) -> MutexGuard<'_, SX127x<SPI, DELAY>> {
        self.radio.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the driver.
    ///
    /// Use this for the operations that this handle does not forward,
    /// e.g. [`LoRaCodingRate`](crate::radio::prelude::LoRaCodingRate) or
    /// [`LoRaPacket`](crate::radio::prelude::LoRaPacket).
    pub fn with_radio<R>(&self, f: impl FnOnce(&mut SX127x<SPI, DELAY>) -> R) -> R {
        f(&mut *self.lock())
    }

    /// See [`LoRaRadio::receive()`].
    pub fn receive(&self, buf: &mut [u8]) -> Result<usize, Sx127xError<SPI::Error>> {
        self.lock().receive(buf)
    }

    /// See [`LoRaRadio::transmit()`].
    pub fn transmit(&self, buf: &[u8]) -> Result<usize, Sx127xError<SPI::Error>> {
        self.lock().transmit(buf)
    }

    pub fn set_mode(&self, mode: LogicalMode) -> Result<(), Sx127xError<SPI::Error>> {
        self.lock().set_mode(mode)
    }

    pub fn get_mode(&self) -> Result<LogicalMode, Sx127xError<SPI::Error>> {
        self.lock().get_mode()
    }

    pub fn set_frequency(&self, hz: u32) -> Result<(), Sx127xError<SPI::Error>> {
        self.lock().set_frequency(hz)
    }

    pub fn get_frequency(&self) -> Result<u32, Sx127xError<SPI::Error>> {
        self.lock().get_frequency()
    }

    pub fn set_power(&self, dbm: i32) -> Result<(), Sx127xError<SPI::Error>> {
        self.lock().set_power(dbm)
    }

    pub fn get_power(&self) -> Result<i32, Sx127xError<SPI::Error>> {
        self.lock().get_power()
    }

    pub fn set_spreading_factor(&self, chips: u32) -> Result<(), Sx127xError<SPI::Error>> {
        self.lock().set_spreading_factor(chips)
    }

    pub fn get_spreading_factor(&self) -> Result<u32, Sx127xError<SPI::Error>> {
        self.lock().get_spreading_factor()
    }

    pub fn set_bandwidth(&self, hz: u32) -> Result<(), Sx127xError<SPI::Error>> {
        self.lock().set_bandwidth(hz)
    }

    pub fn get_bandwidth(&self) -> Result<u32, Sx127xError<SPI::Error>> {
        self.lock().get_bandwidth()
    }

    pub fn get_rssi(&self) -> Result<i32, Sx127xError<SPI::Error>> {
        self.lock().get_rssi()
    }

    pub fn get_snr(&self) -> Result<i32, Sx127xError<SPI::Error>> {
        self.lock().get_snr()
    }

    /// Would a [`RadioHandle::transmit()`] start right away?
    ///
    /// This is only a hint: another thread may take the lock right after this returns.
    pub fn is_write_ready(&self) -> bool {
        !matches!(self.radio.try_lock(), Err(TryLockError::WouldBlock))
    }

    /// Has a packet been received and is the chip free to hand it over?
    ///
    /// This never blocks. `false` is returned if another operation holds the lock
    /// or if the flags could not be read.
    pub fn is_read_ready(&self) -> bool {
        let mut radio = match self.radio.try_lock() {
            Ok(radio) => radio,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => return false,
        };
        radio
            .get_irq_flags()
            .map(|flags| flags.rx_done())
            .unwrap_or(false)
    }
}

impl<SPI, DELAY> Drop for RadioHandle<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    fn drop(&mut self) {
        let radio = self
            .radio
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = radio.set_operating_mode(OperatingMode::Sleep) {
            warn!("failed to put the radio to sleep: {e:?}");
        }
    }
}
