use super::{mnemonics, registers};
use crate::{
    radio::{prelude::LoRaPower, Sx127xError, SX127x},
    translate,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaPower for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type PowerErrorType = Sx127xError<SPI::Error>;

    /// The SX127x can output from -2 dBm up to 17 dBm (20 dBm with
    /// [`LoRaPower::set_boost()`]). Values outside that range are clamped.
    fn set_power(&mut self, dbm: i32) -> Result<(), Self::PowerErrorType> {
        let boost = self.get_boost()?;
        self.spi_write_byte(registers::PA_CONFIG, translate::encode_power(dbm, boost))
    }

    fn get_power(&mut self) -> Result<i32, Self::PowerErrorType> {
        let boost = self.get_boost()?;
        self.spi_read(1, registers::PA_CONFIG)?;
        Ok(translate::decode_power(self._buf[1], boost))
    }

    fn set_boost(&mut self, enable: bool) -> Result<(), Self::PowerErrorType> {
        let pa_dac = if enable {
            mnemonics::PA_DAC_BOOST
        } else {
            mnemonics::PA_DAC_DEFAULT
        };
        self.spi_write_byte(registers::PA_DAC, pa_dac)
    }

    fn get_boost(&mut self) -> Result<bool, Self::PowerErrorType> {
        self.spi_read(1, registers::PA_DAC)?;
        Ok(self._buf[1] & 7 == mnemonics::PA_DAC_BOOST & 7)
    }
}
