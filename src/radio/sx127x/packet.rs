use super::{
    bit_fields::{ModemConfig1, ModemConfig2},
    registers,
};
use crate::radio::{prelude::LoRaPacket, Sx127xError, SX127x};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaPacket for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type PacketErrorType = Sx127xError<SPI::Error>;

    fn set_preamble_length(&mut self, length: u16) -> Result<(), Self::PacketErrorType> {
        self.spi_write_buf(registers::PREAMBLE_MSB, &length.to_be_bytes())
    }

    fn get_preamble_length(&mut self) -> Result<u16, Self::PacketErrorType> {
        self.spi_read(2, registers::PREAMBLE_MSB)?;
        Ok(u16::from_be_bytes([self._buf[1], self._buf[2]]))
    }

    fn set_crc(&mut self, enable: bool) -> Result<(), Self::PacketErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG2)?;
        let modem_config = ModemConfig2::from_bits(self._buf[1]).with_rx_payload_crc_on(enable);
        self.spi_write_byte(registers::MODEM_CONFIG2, modem_config.into_bits())
    }

    fn get_crc(&mut self) -> Result<bool, Self::PacketErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG2)?;
        Ok(ModemConfig2::from_bits(self._buf[1]).rx_payload_crc_on())
    }

    fn set_implicit_header(&mut self, enable: bool) -> Result<(), Self::PacketErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        let modem_config = ModemConfig1::from_bits(self._buf[1]).with_implicit_header(enable);
        self.spi_write_byte(registers::MODEM_CONFIG1, modem_config.into_bits())
    }

    fn get_implicit_header(&mut self) -> Result<bool, Self::PacketErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        Ok(ModemConfig1::from_bits(self._buf[1]).implicit_header())
    }

    fn set_max_payload_length(&mut self, length: u8) -> Result<(), Self::PacketErrorType> {
        self.spi_write_byte(registers::MAX_PAYLOAD_LENGTH, length)
    }

    fn get_max_payload_length(&mut self) -> Result<u8, Self::PacketErrorType> {
        self.spi_read(1, registers::MAX_PAYLOAD_LENGTH)?;
        Ok(self._buf[1])
    }

    fn set_rx_timeout(&mut self, symbols: u16) -> Result<(), Self::PacketErrorType> {
        let symbols = symbols.min(0x3FF);
        // the 2 MSBs share RegModemConfig2, which precedes RegSymbTimeoutLsb
        self.spi_read(1, registers::MODEM_CONFIG2)?;
        let modem_config =
            ModemConfig2::from_bits(self._buf[1]).with_symb_timeout_msb((symbols >> 8) as u8);
        self.spi_write_buf(
            registers::MODEM_CONFIG2,
            &[modem_config.into_bits(), symbols as u8],
        )
    }

    fn get_rx_timeout(&mut self) -> Result<u16, Self::PacketErrorType> {
        self.spi_read(2, registers::MODEM_CONFIG2)?;
        let msb = ModemConfig2::from_bits(self._buf[1]).symb_timeout_msb() as u16;
        Ok(msb << 8 | self._buf[2] as u16)
    }
}
