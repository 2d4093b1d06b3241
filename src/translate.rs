//! Conversions between physical units and the SX127x register encodings.
//!
//! Everything here is pure: no function touches the bus. The driver in
//! [`crate::radio`] composes these with the register transactions.
//!
//! Continuous quantities (power) are clamped to what the chip supports,
//! while enumerated ones ([`SpreadingFactor`], [`Bandwidth`]) are looked up
//! and rejected by the caller when no exact match exists.

use crate::radio::sx127x::bit_fields::PaConfig;
use crate::{Bandwidth, SpreadingFactor};

/// The frequency of the crystal oscillator (in Hz) the chip is clocked with.
pub const F_XOSC: u32 = 32_000_000;

const FRF_SHIFT: u32 = 19;
const FRF_MAX: u32 = 0xFF_FFFF;

/// The lowest output power (in dBm) this driver will program.
pub const MIN_POWER_DBM: i32 = -2;
/// The highest output power (in dBm) without the high power PA_BOOST setting.
pub const MAX_POWER_DBM: i32 = 17;
/// The highest output power (in dBm) with the high power PA_BOOST setting.
pub const MAX_BOOST_POWER_DBM: i32 = 20;

/// The extra poll iterations granted to a transmission on top of the
/// payload length and preamble length.
pub const TX_POLL_MARGIN: u32 = 3;

/// Convert a carrier frequency (in Hz) into the 24 bit `RegFrf` value.
///
/// The result is rounded to the nearest step of `F_XOSC / 2^19` Hz
/// (about 61 Hz) and saturates at the largest 24 bit value.
pub const fn freq_to_register(hz: u32) -> u32 {
    let frf = (((hz as u64) << FRF_SHIFT) + F_XOSC as u64 / 2) / F_XOSC as u64;
    if frf > FRF_MAX as u64 {
        FRF_MAX
    } else {
        frf as u32
    }
}

/// Convert a 24 bit `RegFrf` value back into a frequency in Hz,
/// rounded to the nearest Hz.
pub const fn register_to_freq(frf: u32) -> u32 {
    let hz = ((frf & FRF_MAX) as u64 * F_XOSC as u64 + (1 << (FRF_SHIFT - 1))) >> FRF_SHIFT;
    hz as u32
}

/// Clamp an output power (in dBm) to the range the chip supports.
///
/// The range is [-2, 17], or [-2, 20] when `boost` (high power PA_BOOST) is enabled.
pub fn clamp_power(dbm: i32, boost: bool) -> i32 {
    let max = if boost {
        MAX_BOOST_POWER_DBM
    } else {
        MAX_POWER_DBM
    };
    dbm.clamp(MIN_POWER_DBM, max)
}

/// Encode an output power (in dBm) as a `RegPaConfig` value.
///
/// | power | PA output | `MaxPower` | `OutputPower` |
/// |------:|:---------:|:----------:|:--------------|
/// | > 14  | PA_BOOST  | 7 | `dbm - 2`, or `dbm - 5` with `boost` |
/// | < 0   | RFO       | 2 | `dbm + 3` |
/// | else  | RFO       | 7 | `dbm` |
pub fn encode_power(dbm: i32, boost: bool) -> u8 {
    let dbm = clamp_power(dbm, boost);
    let pa_config = if dbm > 14 {
        let offset = if boost { 5 } else { 2 };
        PaConfig::new()
            .with_pa_select(true)
            .with_max_power(7)
            .with_output_power((dbm - offset) as u8)
    } else if dbm < 0 {
        PaConfig::new()
            .with_max_power(2)
            .with_output_power((dbm + 3) as u8)
    } else {
        PaConfig::new().with_max_power(7).with_output_power(dbm as u8)
    };
    pa_config.into_bits()
}

/// Decode a `RegPaConfig` value into the output power (in dBm).
pub fn decode_power(pa_config: u8, boost: bool) -> i32 {
    let pa_config = PaConfig::from_bits(pa_config);
    let output_power = pa_config.output_power() as i32;
    if pa_config.pa_select() {
        return output_power + if boost { 5 } else { 2 };
    }
    // tenths of a dB: Pmax = 10.8 + 0.6 * MaxPower, Pout = Pmax - (15 - OutputPower)
    let p_max = 108 + 6 * pa_config.max_power() as i32;
    (p_max - (150 - output_power * 10)) / 10
}

/// Convert the raw `RegRssiValue` into dBm.
///
/// The offset depends on which RF port is in use (`low_frequency` for bands below 525 MHz).
pub const fn rssi_from_raw(raw: u8, low_frequency: bool) -> i32 {
    raw as i32 - rssi_offset(low_frequency)
}

/// Convert the raw `RegPktRssiValue` into dBm, corrected with the raw `RegPktSnrValue`.
pub const fn packet_rssi_from_raw(raw: u8, snr_raw: u8, low_frequency: bool) -> i32 {
    let snr_quarters = snr_raw as i8 as i32;
    if snr_quarters < 0 {
        raw as i32 + snr_quarters / 4 - rssi_offset(low_frequency)
    } else {
        raw as i32 * 16 / 15 - rssi_offset(low_frequency)
    }
}

const fn rssi_offset(low_frequency: bool) -> i32 {
    if low_frequency {
        164
    } else {
        157
    }
}

/// Convert the raw `RegPktSnrValue` (two's complement, in quarters of a dB) into dB.
pub const fn snr_from_raw(raw: u8) -> i32 {
    raw as i8 as i32 / 4
}

/// The number of 20 millisecond polls a transmission of `len` bytes is allowed.
pub const fn tx_poll_budget(len: usize, preamble_length: u16) -> u32 {
    len as u32 + preamble_length as u32 + TX_POLL_MARGIN
}

/// Should the `LowDataRateOptimize` bit be set?
///
/// The datasheet requires it when a symbol lasts longer than 16 milliseconds.
pub const fn low_data_rate_optimize(sf: SpreadingFactor, bw: Bandwidth) -> bool {
    sf.chips() as u64 * 1000 > 16 * bw.hz() as u64
}
