use bitfield_struct::bitfield;

use crate::{Bandwidth, CodingRate, OperatingMode, SpreadingFactor};

#[bitfield(u8, order = Msb)]
pub(crate) struct OpMode {
    /// LoRa (`true`) or FSK/OOK (`false`) modem. Only writable in sleep mode.
    pub long_range_mode: bool,

    pub access_shared_reg: bool,

    #[bits(2)]
    _padding: u8,

    /// Access the low frequency (bands 2 and 3) registers.
    pub low_frequency_mode_on: bool,

    #[bits(3, access = None)]
    pub mode: u8,
}

impl OpMode {
    pub const fn mode(&self) -> OperatingMode {
        OperatingMode::from_bits(self.into_bits())
    }

    pub fn with_mode(self, mode: OperatingMode) -> Self {
        Self::from_bits(self.into_bits() & !OperatingMode::MASK | mode.into_bits())
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct ModemConfig1 {
    #[bits(4, access = None, default = 7)]
    pub bandwidth: u8,

    #[bits(3, access = None, default = 1)]
    pub coding_rate: u8,

    pub implicit_header: bool,
}

impl ModemConfig1 {
    const BW_OFFSET: u8 = 4;
    const CR_OFFSET: u8 = 1;
    const CR_MASK: u8 = 0b1110;

    pub const fn bandwidth(&self) -> Option<Bandwidth> {
        Bandwidth::from_bits(self.into_bits() >> Self::BW_OFFSET)
    }

    pub fn with_bandwidth(self, bw: Bandwidth) -> Self {
        let new_val = self.into_bits() & 0x0F;
        Self::from_bits(new_val | (bw.into_bits() << Self::BW_OFFSET))
    }

    pub const fn coding_rate(&self) -> Option<CodingRate> {
        CodingRate::from_bits((self.into_bits() & Self::CR_MASK) >> Self::CR_OFFSET)
    }

    pub fn with_coding_rate(self, cr: CodingRate) -> Self {
        let new_val = self.into_bits() & !Self::CR_MASK;
        Self::from_bits(new_val | (cr.into_bits() << Self::CR_OFFSET))
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct ModemConfig2 {
    #[bits(4, access = None, default = 7)]
    pub spreading_factor: u8,

    pub tx_continuous_mode: bool,

    pub rx_payload_crc_on: bool,

    /// The 2 MSBs of the 10 bit RX symbol timeout.
    #[bits(2)]
    pub symb_timeout_msb: u8,
}

impl ModemConfig2 {
    const SF_OFFSET: u8 = 4;

    pub const fn spreading_factor(&self) -> Option<SpreadingFactor> {
        SpreadingFactor::from_bits(self.into_bits() >> Self::SF_OFFSET)
    }

    pub fn with_spreading_factor(self, sf: SpreadingFactor) -> Self {
        let new_val = self.into_bits() & 0x0F;
        Self::from_bits(new_val | (sf.into_bits() << Self::SF_OFFSET))
    }
}

#[bitfield(u8, order = Msb)]
pub(crate) struct PaConfig {
    /// Output on PA_BOOST (`true`) or RFO (`false`).
    pub pa_select: bool,

    #[bits(3, default = 4)]
    pub max_power: u8,

    #[bits(4, default = 15)]
    pub output_power: u8,
}

// unit tests found in crate::radio::config::test
