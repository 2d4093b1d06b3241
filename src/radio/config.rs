use crate::radio::sx127x::bit_fields::{ModemConfig1, ModemConfig2};
use crate::radio::sx127x::mnemonics;
use crate::translate::{self, MAX_BOOST_POWER_DBM, MIN_POWER_DBM};
use crate::{Bandwidth, CodingRate, SpreadingFactor};

/// The largest RX time-out (in symbols) that fits the 10 bit register field.
const MAX_RX_TIMEOUT: u16 = 0x3FF;

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use sx127x::{radio::RadioConfig, SpreadingFactor};
/// let mut config = RadioConfig::default();
/// config = config
///     .with_frequency(868_100_000)
///     .with_spreading_factor(SpreadingFactor::Sf7);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RadioConfig {
    frequency: u32,
    power: i32,
    boost: bool,
    spreading_factor: SpreadingFactor,
    bandwidth: Bandwidth,
    coding_rate: CodingRate,
    preamble_length: u16,
    crc: bool,
    implicit_header: bool,
    max_payload_length: u8,
    rx_timeout: u16,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::frequency()`] | `434_000_000` (434 MHz) |
    /// | [`RadioConfig::power()`] | `14` dBm |
    /// | [`RadioConfig::boost()`] | `false` |
    /// | [`RadioConfig::spreading_factor()`] | [`SpreadingFactor::Sf11`] (2048 chips/symbol) |
    /// | [`RadioConfig::bandwidth()`] | [`Bandwidth::Hz125000`] |
    /// | [`RadioConfig::coding_rate()`] | [`CodingRate::Cr4_5`] |
    /// | [`RadioConfig::preamble_length()`] | `8` symbols |
    /// | [`RadioConfig::crc()`] | `true` |
    /// | [`RadioConfig::implicit_header()`] | `false` |
    /// | [`RadioConfig::max_payload_length()`] | `128` |
    /// | [`RadioConfig::rx_timeout()`] | `100` symbols |
    fn default() -> Self {
        Self {
            frequency: 434_000_000,
            power: 14,
            boost: false,
            spreading_factor: SpreadingFactor::Sf11,
            bandwidth: Bandwidth::Hz125000,
            coding_rate: CodingRate::Cr4_5,
            preamble_length: 8,
            crc: true,
            implicit_header: false,
            max_payload_length: mnemonics::FIFO_HALF_LENGTH,
            rx_timeout: 100,
        }
    }
}

impl RadioConfig {
    /// Returns the value set by [`RadioConfig::with_frequency()`].
    pub const fn frequency(&self) -> u32 {
        self.frequency
    }

    /// The carrier frequency (in Hz).
    ///
    /// See [`LoRaFrequency::set_frequency()`](fn@crate::radio::prelude::LoRaFrequency::set_frequency).
    pub fn with_frequency(self, hz: u32) -> Self {
        Self {
            frequency: hz,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_power()`],
    /// clamped according to [`RadioConfig::boost()`].
    pub fn power(&self) -> i32 {
        translate::clamp_power(self.power, self.boost)
    }

    /// The output power (in dBm).
    ///
    /// See [`LoRaPower::set_power()`](fn@crate::radio::prelude::LoRaPower::set_power).
    pub fn with_power(self, dbm: i32) -> Self {
        Self {
            power: dbm.clamp(MIN_POWER_DBM, MAX_BOOST_POWER_DBM),
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_boost()`].
    pub const fn boost(&self) -> bool {
        self.boost
    }

    /// Enable or disable the +20 dBm high power setting.
    ///
    /// See [`LoRaPower::set_boost()`](fn@crate::radio::prelude::LoRaPower::set_boost).
    pub fn with_boost(self, enable: bool) -> Self {
        Self {
            boost: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_spreading_factor()`].
    pub const fn spreading_factor(&self) -> SpreadingFactor {
        self.spreading_factor
    }

    /// The spreading factor.
    ///
    /// See [`LoRaSpreadingFactor::set_spreading_factor()`](fn@crate::radio::prelude::LoRaSpreadingFactor::set_spreading_factor).
    pub fn with_spreading_factor(self, sf: SpreadingFactor) -> Self {
        Self {
            spreading_factor: sf,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_bandwidth()`].
    pub const fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// The signal bandwidth.
    ///
    /// See [`LoRaBandwidth::set_bandwidth()`](fn@crate::radio::prelude::LoRaBandwidth::set_bandwidth).
    pub fn with_bandwidth(self, bw: Bandwidth) -> Self {
        Self {
            bandwidth: bw,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_coding_rate()`].
    pub const fn coding_rate(&self) -> CodingRate {
        self.coding_rate
    }

    pub fn with_coding_rate(self, rate: CodingRate) -> Self {
        Self {
            coding_rate: rate,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_preamble_length()`].
    pub const fn preamble_length(&self) -> u16 {
        self.preamble_length
    }

    /// The preamble length (in symbols).
    pub fn with_preamble_length(self, length: u16) -> Self {
        Self {
            preamble_length: length,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_crc()`].
    pub const fn crc(&self) -> bool {
        self.crc
    }

    /// Enable or disable the payload CRC.
    pub fn with_crc(self, enable: bool) -> Self {
        Self { crc: enable, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_implicit_header()`].
    pub const fn implicit_header(&self) -> bool {
        self.implicit_header
    }

    /// See [`LoRaPacket::set_implicit_header()`](fn@crate::radio::prelude::LoRaPacket::set_implicit_header).
    pub fn with_implicit_header(self, enable: bool) -> Self {
        Self {
            implicit_header: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_max_payload_length()`].
    pub const fn max_payload_length(&self) -> u8 {
        self.max_payload_length
    }

    /// The largest payload length the chip will accept.
    pub fn with_max_payload_length(self, length: u8) -> Self {
        Self {
            max_payload_length: length,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_rx_timeout()`].
    pub const fn rx_timeout(&self) -> u16 {
        self.rx_timeout
    }

    /// The single RX mode time-out (in symbols).
    ///
    /// This value is clamped to range [0, 1023].
    pub fn with_rx_timeout(self, symbols: u16) -> Self {
        Self {
            rx_timeout: symbols.min(MAX_RX_TIMEOUT),
            ..self
        }
    }

    pub(crate) fn modem_config1(&self) -> ModemConfig1 {
        ModemConfig1::new()
            .with_bandwidth(self.bandwidth)
            .with_coding_rate(self.coding_rate)
            .with_implicit_header(self.implicit_header)
    }

    pub(crate) fn modem_config2(&self) -> ModemConfig2 {
        ModemConfig2::new()
            .with_spreading_factor(self.spreading_factor)
            .with_rx_payload_crc_on(self.crc)
            .with_symb_timeout_msb((self.rx_timeout >> 8) as u8)
    }

    pub(crate) fn modem_config3(&self) -> u8 {
        let ldro = translate::low_data_rate_optimize(self.spreading_factor, self.bandwidth);
        mnemonics::AGC_AUTO_ON | (ldro as u8 * mnemonics::LOW_DATA_RATE_OPTIMIZE)
    }
}
