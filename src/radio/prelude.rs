//! This module defines the generic traits that may
//! need to imported to use radio implementations.
//!
//! Since rustc only compiles objects that are used,
//! it is convenient to import these traits with the `*` syntax.
//!
//! ```
//! use sx127x::radio::prelude::*;
//! ```

use crate::types::{CodingRate, IrqFlags, LogicalMode, OperatingMode};

use super::RadioConfig;

/// A trait to represent the chip's operating mode state machine.
pub trait LoRaMode {
    type ModeErrorType;

    /// Put the chip into the given hardware `mode`.
    ///
    /// This only replaces the 3 mode bits of `RegOpMode`; the other bits
    /// (LoRa modem and low frequency port selection) are preserved.
    /// The function returns as soon as the register is written. It does not wait
    /// for the mode transition to settle.
    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Self::ModeErrorType>;

    /// Get the exact hardware mode the chip is currently in.
    fn get_operating_mode(&mut self) -> Result<OperatingMode, Self::ModeErrorType>;

    /// Put the chip into the given [`LogicalMode`].
    ///
    /// [`LogicalMode::Rx`] maps to [`OperatingMode::RxContinuous`].
    fn set_mode(&mut self, mode: LogicalMode) -> Result<(), Self::ModeErrorType>;

    /// Get the chip's current mode collapsed into a [`LogicalMode`].
    fn get_mode(&mut self) -> Result<LogicalMode, Self::ModeErrorType>;
}

/// A trait to represent manipulation of the chip's sticky IRQ flags.
pub trait LoRaStatus {
    type StatusErrorType;

    /// Read the `RegIrqFlags` register. Reading does not clear any flag.
    fn get_irq_flags(&mut self) -> Result<IrqFlags, Self::StatusErrorType>;

    /// Clear the flags that are set to `true` in the given `flags`.
    ///
    /// To clear only the `tx_done` flag:
    /// ```ignore
    /// radio.clear_irq_flags(IrqFlags::new().with_tx_done(true)).unwrap();
    /// ```
    fn clear_irq_flags(&mut self, flags: IrqFlags) -> Result<(), Self::StatusErrorType>;

    /// Clear every IRQ flag.
    fn clear_all_irq_flags(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// A trait to represent the synchronous data paths of a LoRa transceiver.
pub trait LoRaRadio {
    type RadioErrorType;

    /// Block until a packet is received (or the wait times out) and copy
    /// its payload into `buf`.
    ///
    /// The chip is put into continuous RX mode if it is not already there, and
    /// it is left in continuous RX mode when this function returns.
    /// The IRQ flags are polled every 20 milliseconds, 250 times at most
    /// (about 5 seconds).
    ///
    /// Returns the number of bytes copied, which is the smaller of the received
    /// payload's length and `buf.len()`.
    ///
    /// A reception that completes with a CRC failure is reported as an error
    /// distinct from a timeout.
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::RadioErrorType>;

    /// Transmit the given `buf` and block until the chip reports the
    /// transmission complete.
    ///
    /// Returns the number of bytes sent. `0` is returned when
    /// - `buf` is empty or longer than the configured max payload length
    ///   (capped at 128 bytes). Nothing is transmitted in this case.
    /// - the transmission did not complete within
    ///   `buf.len() + preamble length + 3` polls of 20 milliseconds.
    ///
    /// Any transmission attempt leaves the chip in continuous RX mode.
    fn transmit(&mut self, buf: &[u8]) -> Result<usize, Self::RadioErrorType>;
}

/// A trait to represent manipulation of the carrier frequency.
pub trait LoRaFrequency {
    type FrequencyErrorType;

    /// Set the carrier frequency (in Hz).
    ///
    /// The value is rounded to the nearest step of about 61 Hz.
    /// The chip is briefly put to sleep while the frequency is changed,
    /// then the previous mode is restored.
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::FrequencyErrorType>;

    /// Get the carrier frequency (in Hz).
    fn get_frequency(&mut self) -> Result<u32, Self::FrequencyErrorType>;
}

/// A trait to represent manipulation of the transmit power.
pub trait LoRaPower {
    type PowerErrorType;

    /// Set the output power (in dBm).
    ///
    /// The value is clamped to the range [-2, 17],
    /// or [-2, 20] if [`LoRaPower::set_boost()`] enabled the high power setting.
    fn set_power(&mut self, dbm: i32) -> Result<(), Self::PowerErrorType>;

    /// Get the output power (in dBm).
    fn get_power(&mut self) -> Result<i32, Self::PowerErrorType>;

    /// Enable or disable the +20 dBm high power setting of the PA_BOOST pin.
    ///
    /// This does not reprogram the output power. Call [`LoRaPower::set_power()`] afterward.
    fn set_boost(&mut self, enable: bool) -> Result<(), Self::PowerErrorType>;

    /// Is the +20 dBm high power setting enabled?
    fn get_boost(&mut self) -> Result<bool, Self::PowerErrorType>;
}

/// A trait to represent manipulation of the spreading factor.
pub trait LoRaSpreadingFactor {
    type SpreadingFactorErrorType;

    /// Set the spreading factor in chips per symbol.
    ///
    /// Only powers of 2 from 64 to 4096 are supported.
    /// Any other value is rejected and nothing is written to the chip.
    fn set_spreading_factor(&mut self, chips: u32) -> Result<(), Self::SpreadingFactorErrorType>;

    /// Get the spreading factor in chips per symbol.
    fn get_spreading_factor(&mut self) -> Result<u32, Self::SpreadingFactorErrorType>;
}

/// A trait to represent manipulation of the signal bandwidth.
pub trait LoRaBandwidth {
    type BandwidthErrorType;

    /// Set the signal bandwidth (in Hz).
    ///
    /// Only the values listed by [`Bandwidth`](crate::Bandwidth) are supported.
    /// Any other value is rejected and nothing is written to the chip.
    fn set_bandwidth(&mut self, hz: u32) -> Result<(), Self::BandwidthErrorType>;

    /// Get the signal bandwidth (in Hz).
    fn get_bandwidth(&mut self) -> Result<u32, Self::BandwidthErrorType>;
}

/// A trait to represent manipulation of the forward error correction coding rate.
pub trait LoRaCodingRate {
    type CodingRateErrorType;

    fn set_coding_rate(&mut self, rate: CodingRate) -> Result<(), Self::CodingRateErrorType>;

    fn get_coding_rate(&mut self) -> Result<CodingRate, Self::CodingRateErrorType>;
}

/// A trait to represent manipulation of the packet format.
pub trait LoRaPacket {
    type PacketErrorType;

    /// Set the preamble length (in symbols).
    fn set_preamble_length(&mut self, length: u16) -> Result<(), Self::PacketErrorType>;

    /// Get the preamble length (in symbols).
    fn get_preamble_length(&mut self) -> Result<u16, Self::PacketErrorType>;

    /// Enable or disable the payload CRC.
    fn set_crc(&mut self, enable: bool) -> Result<(), Self::PacketErrorType>;

    /// Is the payload CRC enabled?
    fn get_crc(&mut self) -> Result<bool, Self::PacketErrorType>;

    /// Use the implicit header mode (`true`) or the explicit header mode (`false`).
    ///
    /// In implicit header mode, both ends must agree beforehand on the payload length,
    /// coding rate and CRC setting.
    fn set_implicit_header(&mut self, enable: bool) -> Result<(), Self::PacketErrorType>;

    fn get_implicit_header(&mut self) -> Result<bool, Self::PacketErrorType>;

    /// Set the largest payload length the chip will accept.
    ///
    /// [`LoRaRadio::transmit()`] also uses this to reject payloads.
    fn set_max_payload_length(&mut self, length: u8) -> Result<(), Self::PacketErrorType>;

    fn get_max_payload_length(&mut self) -> Result<u8, Self::PacketErrorType>;

    /// Set the RX time-out (in symbols) used in single RX mode.
    ///
    /// The value is clamped to the range [0, 1023].
    fn set_rx_timeout(&mut self, symbols: u16) -> Result<(), Self::PacketErrorType>;

    fn get_rx_timeout(&mut self) -> Result<u16, Self::PacketErrorType>;
}

/// A trait to represent the signal measurements of a LoRa transceiver.
pub trait LoRaTelemetry {
    type TelemetryErrorType;

    /// Get the current (instantaneous) RSSI (in dBm).
    fn get_rssi(&mut self) -> Result<i32, Self::TelemetryErrorType>;

    /// Get the SNR (in dB) of the last received packet.
    fn get_snr(&mut self) -> Result<i32, Self::TelemetryErrorType>;

    /// Get the RSSI (in dBm) of the last received packet.
    fn get_last_packet_rssi(&mut self) -> Result<i32, Self::TelemetryErrorType>;
}

/// A trait to represent the hardware initialization of a LoRa transceiver.
pub trait LoRaInit {
    type ConfigErrorType;

    /// Initialize the chip's hardware with the library defaults.
    ///
    /// This checks the chip's silicon revision, switches the chip to its LoRa modem,
    /// then applies [`RadioConfig::default()`].
    fn init(&mut self) -> Result<(), Self::ConfigErrorType>;

    /// Reconfigure the chip with the given `config`.
    ///
    /// The chip is left in standby mode.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;
}
