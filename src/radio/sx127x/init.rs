use super::{bit_fields::OpMode, mnemonics, registers, Sx127xError, SX127x};
use crate::{
    radio::{prelude::LoRaInit, RadioConfig},
    OperatingMode,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::debug;

impl<SPI, DELAY> SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Check the chip version and switch the modem to LoRa mode, leaving it asleep.
    pub(crate) fn enter_lora_mode(&mut self) -> Result<(), Sx127xError<SPI::Error>> {
        // The chip needs 10 ms after a power-on reset before it answers on SPI.
        self._delay_impl.delay_ms(10);

        let version = self.get_version()?;
        if version != mnemonics::CHIP_VERSION {
            return Err(Sx127xError::BinaryCorruption);
        }
        debug!("found SX127x silicon revision {version:#04X}");

        // LongRangeMode can only be changed in sleep mode
        let sleep = OpMode::new();
        self.spi_write_byte(registers::OP_MODE, sleep.into_bits())?;
        self.spi_write_byte(
            registers::OP_MODE,
            sleep.with_long_range_mode(true).into_bits(),
        )
    }
}

impl<SPI, DELAY> LoRaInit for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type ConfigErrorType = Sx127xError<SPI::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] given to [`SX127x::new()`].
    ///
    /// The chip is left in standby with [`RadioConfig::default()`] applied.
    fn init(&mut self) -> Result<(), Self::ConfigErrorType> {
        self.enter_lora_mode()?;
        self.with_config(&RadioConfig::default())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        debug!("applying {config:?}");
        let sleep = OpMode::new()
            .with_long_range_mode(true)
            .with_low_frequency_mode_on(config.frequency() < mnemonics::LOW_FREQUENCY_LIMIT);
        self.spi_write_byte(registers::OP_MODE, sleep.into_bits())?;
        self.write_frf(config.frequency())?;

        let pa_dac = if config.boost() {
            mnemonics::PA_DAC_BOOST
        } else {
            mnemonics::PA_DAC_DEFAULT
        };
        self.spi_write_byte(registers::PA_DAC, pa_dac)?;
        self.spi_write_byte(
            registers::PA_CONFIG,
            crate::translate::encode_power(config.power(), config.boost()),
        )?;

        self.spi_write_byte(registers::MODEM_CONFIG1, config.modem_config1().into_bits())?;
        self.spi_write_byte(registers::MODEM_CONFIG2, config.modem_config2().into_bits())?;
        self.spi_write_byte(registers::MODEM_CONFIG3, config.modem_config3())?;
        self.spi_write_byte(registers::SYMB_TIMEOUT_LSB, config.rx_timeout() as u8)?;
        self.set_detection(config.spreading_factor())?;

        self.spi_write_buf(
            registers::PREAMBLE_MSB,
            &config.preamble_length().to_be_bytes(),
        )?;
        self.spi_write_byte(registers::MAX_PAYLOAD_LENGTH, config.max_payload_length())?;

        self.spi_write_byte(registers::FIFO_RX_BASE_ADDR, mnemonics::FIFO_RX_BASE)?;
        self.spi_write_byte(registers::FIFO_TX_BASE_ADDR, mnemonics::FIFO_TX_BASE)?;
        self.spi_write_byte(registers::IRQ_FLAGS, 0xFF)?;

        self.spi_write_byte(
            registers::OP_MODE,
            sleep.with_mode(OperatingMode::Standby).into_bits(),
        )
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, LoRaInit};
    use crate::radio::{sx127x::commands, RadioConfig, Sx127xError};
    use crate::{spi_test_expects, test::mk_radio, test::with_default_config_expects};
    use crate::{Bandwidth, CodingRate, SpreadingFactor};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn init() {
        let mut spi_expectations = spi_test_expects![
            (vec![registers::VERSION, 0u8], vec![0u8, 0x12u8]),
            // sleep in FSK/OOK mode, then switch to LoRa
            (
                vec![registers::OP_MODE | commands::W_REGISTER, 0u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::OP_MODE | commands::W_REGISTER, 0x80u8],
                vec![0u8, 0u8],
            ),
        ]
        .to_vec();
        spi_expectations.extend(with_default_config_expects());
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        radio.init().unwrap();
        spi.done();
    }

    #[test]
    fn init_wrong_version() {
        let spi_expectations = spi_test_expects![
            // a disconnected MISO line reads as all 1s
            (vec![registers::VERSION, 0u8], vec![0xFFu8, 0xFFu8]),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        assert_eq!(radio.init(), Err(Sx127xError::BinaryCorruption));
        spi.done();
    }

    #[test]
    fn with_config() {
        let config = RadioConfig::default()
            .with_frequency(915_000_000)
            .with_boost(true)
            .with_power(20)
            .with_spreading_factor(SpreadingFactor::Sf6)
            .with_bandwidth(Bandwidth::Hz500000)
            .with_coding_rate(CodingRate::Cr4_6)
            .with_implicit_header(true)
            .with_crc(false)
            .with_preamble_length(12)
            .with_max_payload_length(64)
            .with_rx_timeout(0x123);
        let spi_expectations = spi_test_expects![
            // sleep, high frequency port
            (
                vec![registers::OP_MODE | commands::W_REGISTER, 0x80u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::FRF_MSB | commands::W_REGISTER, 0xE4u8, 0xC0u8, 0u8],
                vec![0u8; 4],
            ),
            (
                vec![registers::PA_DAC | commands::W_REGISTER, 0x87u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::PA_CONFIG | commands::W_REGISTER, 0xFFu8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::MODEM_CONFIG1 | commands::W_REGISTER, 0x95u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::MODEM_CONFIG2 | commands::W_REGISTER, 0x61u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::MODEM_CONFIG3 | commands::W_REGISTER, 0x04u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::SYMB_TIMEOUT_LSB | commands::W_REGISTER, 0x23u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::DETECT_OPTIMIZE | commands::W_REGISTER, 0xC5u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::DETECTION_THRESHOLD | commands::W_REGISTER, 0x0Cu8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::PREAMBLE_MSB | commands::W_REGISTER, 0u8, 12u8],
                vec![0u8; 3],
            ),
            (
                vec![registers::MAX_PAYLOAD_LENGTH | commands::W_REGISTER, 64u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::FIFO_RX_BASE_ADDR | commands::W_REGISTER, 0u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::FIFO_TX_BASE_ADDR | commands::W_REGISTER, 0x80u8],
                vec![0u8, 0u8],
            ),
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0xFFu8],
                vec![0u8, 0u8],
            ),
            // standby
            (
                vec![registers::OP_MODE | commands::W_REGISTER, 0x81u8],
                vec![0u8, 0u8],
            ),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        radio.with_config(&config).unwrap();
        spi.done();
    }
}
