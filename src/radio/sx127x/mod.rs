use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{delay::DelayNs, spi::SpiDevice};
mod bandwidth;
pub(crate) mod bit_fields;
mod coding_rate;
mod constants;
mod frequency;
mod init;
mod mode;
mod packet;
mod power;
mod radio;
mod spreading_factor;
mod status;
mod telemetry;
use bit_fields::{ModemConfig1, ModemConfig2};
pub use constants::{commands, mnemonics, registers};

use crate::translate;

/// An collection of error types to describe hardware malfunctions
/// and failed radio operations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sx127xError<SPI> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// No packet was received within the polling window of
    /// [`LoRaRadio::receive()`](fn@crate::radio::prelude::LoRaRadio::receive).
    Timeout,
    /// A packet was received but its payload failed the CRC check.
    Crc,
    /// A requested value (spreading factor or bandwidth) is not supported by the chip.
    ///
    /// Nothing is written to the chip when this error is returned.
    InvalidParameter,
    /// Represents a corruption of binary data (as it was transferred over the SPI bus' MISO)
    BinaryCorruption,
}

impl<SPI: Debug> Display for Sx127xError<SPI> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Sx127xError::Spi(e) => write!(f, "SPI transaction failed: {e:?}"),
            Sx127xError::Timeout => write!(f, "timed out waiting for a packet"),
            Sx127xError::Crc => write!(f, "received payload failed the CRC check"),
            Sx127xError::InvalidParameter => write!(f, "unsupported parameter value"),
            Sx127xError::BinaryCorruption => write!(f, "unexpected register content"),
        }
    }
}

#[cfg(feature = "std")]
impl<SPI: Debug> std::error::Error for Sx127xError<SPI> {}

/// This struct implements the [`LoRa*` traits](mod@crate::radio::prelude)
/// for the SX1276/77/78/79 transceivers.
///
/// Additionally, there are some functions implemented that are specific to the SX127x.
pub struct SX127x<SPI, DELAY> {
    _spi: SPI,
    _delay_impl: DELAY,
    _buf: [u8; 256],
}

impl<SPI, DELAY> SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Instantiate an [`SX127x`] object for use on the specified `spi` bus.
    ///
    /// The radio's NSS pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded-hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    ///
    /// The chip is not touched until [`init()`](fn@crate::radio::prelude::LoRaInit::init)
    /// is called.
    pub fn new(spi: SPI, delay_impl: DELAY) -> SX127x<SPI, DELAY> {
        SX127x {
            _spi: spi,
            _delay_impl: delay_impl,
            _buf: [0u8; 256],
        }
    }

    fn spi_transfer(&mut self, len: usize) -> Result<(), Sx127xError<SPI::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(Sx127xError::Spi)
    }

    /// Read `len` bytes starting at register `reg`.
    ///
    /// The result is stored in `self._buf[1..=len]`:
    /// ```ignore
    /// self.spi_read(1, registers::VERSION)?;
    /// let version = self._buf[1];
    /// ```
    fn spi_read(&mut self, len: u8, reg: u8) -> Result<(), Sx127xError<SPI::Error>> {
        self._buf[0] = reg & !commands::W_REGISTER;
        let len = len as usize;
        self._buf[1..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    fn spi_write_byte(&mut self, reg: u8, byte: u8) -> Result<(), Sx127xError<SPI::Error>> {
        self._buf[0] = reg | commands::W_REGISTER;
        self._buf[1] = byte;
        self.spi_transfer(2)
    }

    /// Write `buf` starting at register `reg`. At most 255 bytes are written.
    fn spi_write_buf(&mut self, reg: u8, buf: &[u8]) -> Result<(), Sx127xError<SPI::Error>> {
        self._buf[0] = reg | commands::W_REGISTER;
        let buf_len = buf.len().min(self._buf.len() - 1);
        self._buf[1..(buf_len + 1)].copy_from_slice(&buf[..buf_len]);
        self.spi_transfer(buf_len + 1)
    }

    /// Get the chip's silicon revision (`RegVersion`).
    ///
    /// All SX1276/77/78/79 chips report `0x12`.
    pub fn get_version(&mut self) -> Result<u8, Sx127xError<SPI::Error>> {
        self.spi_read(1, registers::VERSION)?;
        Ok(self._buf[1])
    }

    /// Set or clear the `LowDataRateOptimize` bit to match the current
    /// spreading factor and bandwidth.
    fn update_low_data_rate_optimize(&mut self) -> Result<(), Sx127xError<SPI::Error>> {
        // RegModemConfig1 and RegModemConfig2 are adjacent
        self.spi_read(2, registers::MODEM_CONFIG1)?;
        let bw = ModemConfig1::from_bits(self._buf[1])
            .bandwidth()
            .ok_or(Sx127xError::BinaryCorruption)?;
        let sf = ModemConfig2::from_bits(self._buf[2])
            .spreading_factor()
            .ok_or(Sx127xError::BinaryCorruption)?;
        let enable = translate::low_data_rate_optimize(sf, bw);
        self.spi_read(1, registers::MODEM_CONFIG3)?;
        let out = self._buf[1] & !mnemonics::LOW_DATA_RATE_OPTIMIZE
            | (enable as u8 * mnemonics::LOW_DATA_RATE_OPTIMIZE);
        self.spi_write_byte(registers::MODEM_CONFIG3, out)
    }
}
