/// A private module encapsulating register offsets for the SX127x in LoRa mode.
pub mod registers {
    pub const FIFO: u8 = 0x00;
    pub const OP_MODE: u8 = 0x01;
    pub const FRF_MSB: u8 = 0x06;
    pub const PA_CONFIG: u8 = 0x09;
    pub const FIFO_ADDR_PTR: u8 = 0x0D;
    pub const FIFO_TX_BASE_ADDR: u8 = 0x0E;
    pub const FIFO_RX_BASE_ADDR: u8 = 0x0F;
    pub const FIFO_RX_CURRENT_ADDR: u8 = 0x10;
    pub const IRQ_FLAGS: u8 = 0x12;
    pub const RX_NB_BYTES: u8 = 0x13;
    pub const PKT_SNR_VALUE: u8 = 0x19;
    pub const RSSI_VALUE: u8 = 0x1B;
    pub const MODEM_CONFIG1: u8 = 0x1D;
    pub const MODEM_CONFIG2: u8 = 0x1E;
    pub const SYMB_TIMEOUT_LSB: u8 = 0x1F;
    pub const PREAMBLE_MSB: u8 = 0x20;
    pub const PAYLOAD_LENGTH: u8 = 0x22;
    pub const MAX_PAYLOAD_LENGTH: u8 = 0x23;
    pub const MODEM_CONFIG3: u8 = 0x26;
    pub const DETECT_OPTIMIZE: u8 = 0x31;
    pub const DETECTION_THRESHOLD: u8 = 0x37;
    pub const VERSION: u8 = 0x42;
    pub const PA_DAC: u8 = 0x4D;
}

/// A private module encapsulating SPI access bits for the SX127x.
pub mod commands {
    /// Set on the address byte to write a register.
    pub const W_REGISTER: u8 = 0x80;
}

/// A private module to encapsulate bit mnemonics and magic values
pub mod mnemonics {
    /// The only silicon revision of the SX1276/77/78/79 family.
    pub const CHIP_VERSION: u8 = 0x12;

    /// The FIFO offset where received packets are stored.
    pub const FIFO_RX_BASE: u8 = 0x00;
    /// The FIFO offset where payloads are loaded for transmission.
    pub const FIFO_TX_BASE: u8 = 0x80;
    /// The number of FIFO bytes available to each direction.
    pub const FIFO_HALF_LENGTH: u8 = 0x80;

    /// `RegPaDac` value for the default PA_BOOST output.
    pub const PA_DAC_DEFAULT: u8 = 0x84;
    /// `RegPaDac` value to allow +20 dBm on PA_BOOST.
    pub const PA_DAC_BOOST: u8 = 0x87;

    /// `RegDetectOptimize` and `RegDetectionThreshold` values for SF6.
    pub const DETECT_OPTIMIZE_SF6: u8 = 0xC5;
    pub const DETECTION_THRESHOLD_SF6: u8 = 0x0C;
    /// `RegDetectOptimize` and `RegDetectionThreshold` values for SF7 to SF12.
    pub const DETECT_OPTIMIZE_SF7_12: u8 = 0xC3;
    pub const DETECTION_THRESHOLD_SF7_12: u8 = 0x0A;

    /// `RegModemConfig3` `AgcAutoOn` bit.
    pub const AGC_AUTO_ON: u8 = 1 << 2;
    /// `RegModemConfig3` `LowDataRateOptimize` bit.
    pub const LOW_DATA_RATE_OPTIMIZE: u8 = 1 << 3;

    /// Bands below this frequency (in Hz) use the low frequency RF port.
    pub const LOW_FREQUENCY_LIMIT: u32 = 525_000_000;

    /// The delay (in milliseconds) between two polls of `RegIrqFlags`.
    pub const POLL_INTERVAL_MS: u32 = 20;
    /// The maximum number of polls when waiting for a received packet.
    pub const RX_POLL_LIMIT: u32 = 250;
}
