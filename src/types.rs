//! This module defines types used by various traits.
//! These types are meant to be agnostic of the trait implementation.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// The chip's operating modes as encoded in the 3 LSBs of the `RegOpMode` register.
///
/// This is the exact hardware state. See [`LogicalMode`] for the coarser
/// categories reported to front-end code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperatingMode {
    /// Lowest power mode. The FIFO is not accessible.
    Sleep,
    /// Crystal oscillator running, everything else off.
    Standby,
    /// Frequency synthesis for transmission.
    FsTx,
    /// Transmit the FIFO content, then fall back to [`OperatingMode::Standby`].
    Tx,
    /// Frequency synthesis for reception.
    FsRx,
    /// Receive packets until told otherwise.
    RxContinuous,
    /// Receive one packet, then fall back to [`OperatingMode::Standby`].
    RxSingle,
    /// Channel Activity Detection.
    Cad,
}

impl OperatingMode {
    pub(crate) const MASK: u8 = 7;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            OperatingMode::Sleep => 0,
            OperatingMode::Standby => 1,
            OperatingMode::FsTx => 2,
            OperatingMode::Tx => 3,
            OperatingMode::FsRx => 4,
            OperatingMode::RxContinuous => 5,
            OperatingMode::RxSingle => 6,
            OperatingMode::Cad => 7,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => OperatingMode::Sleep,
            1 => OperatingMode::Standby,
            2 => OperatingMode::FsTx,
            3 => OperatingMode::Tx,
            4 => OperatingMode::FsRx,
            5 => OperatingMode::RxContinuous,
            6 => OperatingMode::RxSingle,
            _ => OperatingMode::Cad,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for OperatingMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            OperatingMode::Sleep => defmt::write!(fmt, "Sleep"),
            OperatingMode::Standby => defmt::write!(fmt, "Standby"),
            OperatingMode::FsTx => defmt::write!(fmt, "FSTX"),
            OperatingMode::Tx => defmt::write!(fmt, "TX"),
            OperatingMode::FsRx => defmt::write!(fmt, "FSRX"),
            OperatingMode::RxContinuous => defmt::write!(fmt, "RX continuous"),
            OperatingMode::RxSingle => defmt::write!(fmt, "RX single"),
            OperatingMode::Cad => defmt::write!(fmt, "CAD"),
        }
    }
}

impl Display for OperatingMode {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            OperatingMode::Sleep => write!(f, "Sleep"),
            OperatingMode::Standby => write!(f, "Standby"),
            OperatingMode::FsTx => write!(f, "FSTX"),
            OperatingMode::Tx => write!(f, "TX"),
            OperatingMode::FsRx => write!(f, "FSRX"),
            OperatingMode::RxContinuous => write!(f, "RX continuous"),
            OperatingMode::RxSingle => write!(f, "RX single"),
            OperatingMode::Cad => write!(f, "CAD"),
        }
    }
}

/// The radio's state as seen by front-end code.
///
/// Several [`OperatingMode`]s collapse into one logical state:
///
/// | [`LogicalMode`] | [`OperatingMode`] reported as it |
/// |----------------:|:---------------------------------|
/// | `Sleep`   | `Sleep` |
/// | `Standby` | `Standby` |
/// | `Tx`      | `FsTx`, `Tx` |
/// | `Rx`      | `FsRx`, `RxContinuous`, `RxSingle` |
/// | `Cad`     | `Cad` |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicalMode {
    Sleep,
    Standby,
    Tx,
    Rx,
    Cad,
}

impl From<OperatingMode> for LogicalMode {
    fn from(mode: OperatingMode) -> Self {
        match mode {
            OperatingMode::Sleep => LogicalMode::Sleep,
            OperatingMode::Standby => LogicalMode::Standby,
            OperatingMode::FsTx | OperatingMode::Tx => LogicalMode::Tx,
            OperatingMode::FsRx | OperatingMode::RxContinuous | OperatingMode::RxSingle => {
                LogicalMode::Rx
            }
            OperatingMode::Cad => LogicalMode::Cad,
        }
    }
}

impl From<LogicalMode> for OperatingMode {
    /// `Rx` is requested as [`OperatingMode::RxContinuous`].
    fn from(mode: LogicalMode) -> Self {
        match mode {
            LogicalMode::Sleep => OperatingMode::Sleep,
            LogicalMode::Standby => OperatingMode::Standby,
            LogicalMode::Tx => OperatingMode::Tx,
            LogicalMode::Rx => OperatingMode::RxContinuous,
            LogicalMode::Cad => OperatingMode::Cad,
        }
    }
}

impl Display for LogicalMode {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            LogicalMode::Sleep => write!(f, "Sleep"),
            LogicalMode::Standby => write!(f, "Standby"),
            LogicalMode::Tx => write!(f, "TX"),
            LogicalMode::Rx => write!(f, "RX"),
            LogicalMode::Cad => write!(f, "CAD"),
        }
    }
}

/// The number of chirp chips per symbol.
///
/// Higher values trade data rate for range and sensitivity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpreadingFactor {
    /// 64 chips/symbol. Only usable with an implicit header.
    Sf6,
    /// 128 chips/symbol
    Sf7,
    /// 256 chips/symbol
    Sf8,
    /// 512 chips/symbol
    Sf9,
    /// 1024 chips/symbol
    Sf10,
    /// 2048 chips/symbol
    Sf11,
    /// 4096 chips/symbol
    Sf12,
}

impl SpreadingFactor {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            SpreadingFactor::Sf6 => 6,
            SpreadingFactor::Sf7 => 7,
            SpreadingFactor::Sf8 => 8,
            SpreadingFactor::Sf9 => 9,
            SpreadingFactor::Sf10 => 10,
            SpreadingFactor::Sf11 => 11,
            SpreadingFactor::Sf12 => 12,
        }
    }

    /// Returns `None` for the reserved codes.
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value {
            6 => Some(SpreadingFactor::Sf6),
            7 => Some(SpreadingFactor::Sf7),
            8 => Some(SpreadingFactor::Sf8),
            9 => Some(SpreadingFactor::Sf9),
            10 => Some(SpreadingFactor::Sf10),
            11 => Some(SpreadingFactor::Sf11),
            12 => Some(SpreadingFactor::Sf12),
            _ => None,
        }
    }

    /// The number of chips per symbol.
    pub const fn chips(self) -> u32 {
        1 << self.into_bits()
    }

    /// Look up the spreading factor for a number of chips per symbol.
    ///
    /// Only exact powers of 2 in range [64, 4096] are supported.
    pub const fn from_chips(chips: u32) -> Option<Self> {
        if !chips.is_power_of_two() || chips > 4096 {
            return None;
        }
        Self::from_bits(chips.trailing_zeros() as u8)
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for SpreadingFactor {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "SF{=u8}", self.into_bits())
    }
}

impl Display for SpreadingFactor {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "SF{} ({} chips/symbol)", self.into_bits(), self.chips())
    }
}

/// The LoRa signal bandwidth. Units are in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bandwidth {
    /// represents 7.8 kHz
    Hz7800,
    /// represents 10.4 kHz
    Hz10400,
    /// represents 15.6 kHz
    Hz15600,
    /// represents 20.8 kHz
    Hz20800,
    /// represents 31.25 kHz
    Hz31250,
    /// represents 41.7 kHz
    Hz41700,
    /// represents 62.5 kHz
    Hz62500,
    /// represents 125 kHz
    Hz125000,
    /// represents 250 kHz
    Hz250000,
    /// represents 500 kHz
    Hz500000,
}

impl Bandwidth {
    const TABLE: [(Bandwidth, u32); 10] = [
        (Bandwidth::Hz7800, 7800),
        (Bandwidth::Hz10400, 10400),
        (Bandwidth::Hz15600, 15600),
        (Bandwidth::Hz20800, 20800),
        (Bandwidth::Hz31250, 31250),
        (Bandwidth::Hz41700, 41700),
        (Bandwidth::Hz62500, 62500),
        (Bandwidth::Hz125000, 125000),
        (Bandwidth::Hz250000, 250000),
        (Bandwidth::Hz500000, 500000),
    ];

    pub(crate) const fn into_bits(self) -> u8 {
        self as u8
    }

    /// Returns `None` for the reserved codes.
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        if value as usize >= Self::TABLE.len() {
            return None;
        }
        Some(Self::TABLE[value as usize].0)
    }

    /// The bandwidth in Hz.
    pub const fn hz(self) -> u32 {
        Self::TABLE[self as usize].1
    }

    /// Look up the bandwidth for an exact value in Hz.
    pub fn from_hz(hz: u32) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, value)| *value == hz)
            .map(|(bw, _)| *bw)
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for Bandwidth {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{=u32} Hz", self.hz())
    }
}

impl Display for Bandwidth {
    fn fmt(&self, f: &mut Formatter) -> Result {
        write!(f, "{} Hz", self.hz())
    }
}

/// The forward error correction coding rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodingRate {
    /// represents 4/5
    Cr4_5,
    /// represents 4/6
    Cr4_6,
    /// represents 4/7
    Cr4_7,
    /// represents 4/8
    Cr4_8,
}

impl CodingRate {
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CodingRate::Cr4_5 => 1,
            CodingRate::Cr4_6 => 2,
            CodingRate::Cr4_7 => 3,
            CodingRate::Cr4_8 => 4,
        }
    }

    /// Returns `None` for the reserved codes.
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value {
            1 => Some(CodingRate::Cr4_5),
            2 => Some(CodingRate::Cr4_6),
            3 => Some(CodingRate::Cr4_7),
            4 => Some(CodingRate::Cr4_8),
            _ => None,
        }
    }

    /// The denominator of the `4/x` coding rate.
    pub const fn denominator(self) -> u8 {
        self.into_bits() + 4
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for CodingRate {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "4/{=u8}", self.denominator())
    }
}

impl Display for CodingRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "4/{}", self.denominator())
    }
}

/// A struct used to describe the LoRa IRQ events in the `RegIrqFlags` register.
///
/// Each flag is sticky: once the chip raises it, it stays set until
/// cleared by writing a `1` to its position.
///
/// To instantiate an object with flags that have different values:
/// ```
/// use sx127x::IrqFlags;
/// let flags = IrqFlags::default() // all flags are false
///     .with_rx_done(true); // assert only `rx_done`
/// ```
/// Use [`IrqFlags::default`] to instantiate all flags set to false.
/// Use [`IrqFlags::all`] to instantiate all flags set to true.
#[bitfield(u8, order = Msb)]
#[derive(PartialEq, Eq)]
pub struct IrqFlags {
    /// A flag to describe if a reception timed out (RX single mode only).
    pub rx_timeout: bool,

    /// A flag to describe if a packet was received.
    pub rx_done: bool,

    /// A flag to describe if the received payload failed its CRC check.
    pub payload_crc_error: bool,

    /// A flag to describe if a valid header was received.
    pub valid_header: bool,

    /// A flag to describe if a transmission completed.
    pub tx_done: bool,

    /// A flag to describe if a CAD operation completed.
    pub cad_done: bool,

    /// A flag to describe if a frequency hopping channel change is due.
    pub fhss_change_channel: bool,

    /// A flag to describe if channel activity was detected.
    pub cad_detected: bool,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for IrqFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "IrqFlags rx_timeout: {}, rx_done: {}, crc_error: {}, tx_done: {}",
            self.rx_timeout(),
            self.rx_done(),
            self.payload_crc_error(),
            self.tx_done()
        )
    }
}

impl IrqFlags {
    /// The flags that end a reception.
    pub const RX_OUTCOME: IrqFlags = IrqFlags::new()
        .with_rx_timeout(true)
        .with_rx_done(true)
        .with_payload_crc_error(true);

    /// A convenience constructor similar to [`IrqFlags::default`] except
    /// all fields are set to `true`.
    pub const fn all() -> Self {
        Self::from_bits(0xFF)
    }

    /// Is any flag in `mask` also set in `self`?
    pub const fn intersects(self, mask: IrqFlags) -> bool {
        self.into_bits() & mask.into_bits() != 0
    }

    /// Keep only the flags set in `mask`.
    pub const fn masked(self, mask: IrqFlags) -> Self {
        Self::from_bits(self.into_bits() & mask.into_bits())
    }

    /// Are no flags set?
    pub const fn is_empty(self) -> bool {
        self.into_bits() == 0
    }
}

impl Display for IrqFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "IrqFlags rx_timeout: {}, rx_done: {}, crc_error: {}, tx_done: {}",
            self.rx_timeout(),
            self.rx_done(),
            self.payload_crc_error(),
            self.tx_done()
        )
    }
}
