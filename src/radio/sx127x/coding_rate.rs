use super::{bit_fields::ModemConfig1, registers};
use crate::{
    radio::{prelude::LoRaCodingRate, Sx127xError, SX127x},
    CodingRate,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaCodingRate for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type CodingRateErrorType = Sx127xError<SPI::Error>;

    fn set_coding_rate(&mut self, rate: CodingRate) -> Result<(), Self::CodingRateErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        let modem_config = ModemConfig1::from_bits(self._buf[1]).with_coding_rate(rate);
        self.spi_write_byte(registers::MODEM_CONFIG1, modem_config.into_bits())
    }

    fn get_coding_rate(&mut self) -> Result<CodingRate, Self::CodingRateErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        ModemConfig1::from_bits(self._buf[1])
            .coding_rate()
            .ok_or(Sx127xError::BinaryCorruption)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, LoRaCodingRate};
    use crate::radio::{sx127x::commands, Sx127xError};
    use crate::{spi_test_expects, test::mk_radio, CodingRate};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn set_coding_rate() {
        let spi_expectations = spi_test_expects![
            (vec![registers::MODEM_CONFIG1, 0u8], vec![0u8, 0x73u8]),
            (
                vec![registers::MODEM_CONFIG1 | commands::W_REGISTER, 0x79u8],
                vec![0u8, 0u8],
            ),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        radio.set_coding_rate(CodingRate::Cr4_8).unwrap();
        spi.done();
    }

    #[test]
    fn get_coding_rate() {
        let spi_expectations = spi_test_expects![
            (vec![registers::MODEM_CONFIG1, 0u8], vec![0u8, 0x74u8]),
            // reserved code
            (vec![registers::MODEM_CONFIG1, 0u8], vec![0u8, 0x70u8]),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        assert_eq!(radio.get_coding_rate().unwrap(), CodingRate::Cr4_6);
        assert_eq!(radio.get_coding_rate(), Err(Sx127xError::BinaryCorruption));
        spi.done();
    }
}
