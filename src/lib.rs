#![doc = include_str!("../README.md")]
//!
//! ## Basic API
//!
//! - [`SX127x::new()`](fn@crate::radio::SX127x::new)
//! - [`SX127x::init()`](radio/struct.SX127x.html#method.init)
//! - [`SX127x::receive()`](radio/struct.SX127x.html#method.receive)
//! - [`SX127x::transmit()`](radio/struct.SX127x.html#method.transmit)
//! - [`SX127x::set_mode()`](radio/struct.SX127x.html#method.set_mode)
//! - [`SX127x::get_mode()`](radio/struct.SX127x.html#method.get_mode)
//! - [`SX127x::set_frequency()`](radio/struct.SX127x.html#method.set_frequency)
//! - [`SX127x::get_frequency()`](radio/struct.SX127x.html#method.get_frequency)
//!
//! ## Advanced API
//!
//! - [`SX127x::set_operating_mode()`](radio/struct.SX127x.html#method.set_operating_mode)
//! - [`SX127x::get_operating_mode()`](radio/struct.SX127x.html#method.get_operating_mode)
//! - [`SX127x::get_irq_flags()`](radio/struct.SX127x.html#method.get_irq_flags)
//! - [`SX127x::clear_irq_flags()`](radio/struct.SX127x.html#method.clear_irq_flags)
//! - [`SX127x::get_rssi()`](radio/struct.SX127x.html#method.get_rssi)
//! - [`SX127x::get_snr()`](radio/struct.SX127x.html#method.get_snr)
//! - [`SX127x::get_last_packet_rssi()`](radio/struct.SX127x.html#method.get_last_packet_rssi)
//! - [`SX127x::get_version()`](fn@crate::radio::SX127x::get_version)
//!
//! ## Configuration API
//!
//! - [`SX127x::with_config()`](radio/struct.SX127x.html#method.with_config)
//! - [`SX127x::set_power()`](radio/struct.SX127x.html#method.set_power)
//! - [`SX127x::get_power()`](radio/struct.SX127x.html#method.get_power)
//! - [`SX127x::set_boost()`](radio/struct.SX127x.html#method.set_boost)
//! - [`SX127x::set_spreading_factor()`](radio/struct.SX127x.html#method.set_spreading_factor)
//! - [`SX127x::get_spreading_factor()`](radio/struct.SX127x.html#method.get_spreading_factor)
//! - [`SX127x::set_bandwidth()`](radio/struct.SX127x.html#method.set_bandwidth)
//! - [`SX127x::get_bandwidth()`](radio/struct.SX127x.html#method.get_bandwidth)
//! - [`SX127x::set_coding_rate()`](radio/struct.SX127x.html#method.set_coding_rate)
//! - [`SX127x::get_coding_rate()`](radio/struct.SX127x.html#method.get_coding_rate)
//! - [`SX127x::set_preamble_length()`](radio/struct.SX127x.html#method.set_preamble_length)
//! - [`SX127x::get_preamble_length()`](radio/struct.SX127x.html#method.get_preamble_length)
//! - [`SX127x::set_crc()`](radio/struct.SX127x.html#method.set_crc)
//! - [`SX127x::set_implicit_header()`](radio/struct.SX127x.html#method.set_implicit_header)
//! - [`SX127x::set_max_payload_length()`](radio/struct.SX127x.html#method.set_max_payload_length)
//! - [`SX127x::set_rx_timeout()`](radio/struct.SX127x.html#method.set_rx_timeout)
//!
//! ## Thread-safe handle
//!
//! With the `std` feature (enabled by default), [`RadioHandle`] wraps the driver
//! behind a single lock so several threads may share one chip.
#![no_std]

#[cfg(any(test, feature = "std"))]
extern crate std;

mod types;
pub use types::{Bandwidth, CodingRate, IrqFlags, LogicalMode, OperatingMode, SpreadingFactor};
pub mod radio;
pub mod translate;

#[cfg(feature = "std")]
mod handle;
#[cfg(feature = "std")]
pub use handle::RadioHandle;
