use super::{bit_fields::OpMode, mnemonics, registers};
use crate::{
    radio::{prelude::LoRaFrequency, Sx127xError, SX127x},
    translate, OperatingMode,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::debug;

impl<SPI, DELAY> SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    pub(super) fn write_frf(&mut self, hz: u32) -> Result<(), Sx127xError<SPI::Error>> {
        let frf = translate::freq_to_register(hz);
        let buf = [(frf >> 16) as u8, (frf >> 8) as u8, frf as u8];
        self.spi_write_buf(registers::FRF_MSB, &buf)
    }

    /// Is the chip configured for the low frequency RF port (bands below 525 MHz)?
    pub(super) fn is_low_frequency(&mut self) -> Result<bool, Sx127xError<SPI::Error>> {
        self.spi_read(1, registers::OP_MODE)?;
        Ok(OpMode::from_bits(self._buf[1]).low_frequency_mode_on())
    }
}

impl<SPI, DELAY> LoRaFrequency for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type FrequencyErrorType = Sx127xError<SPI::Error>;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::FrequencyErrorType> {
        self.spi_read(1, registers::OP_MODE)?;
        let low_frequency = hz < mnemonics::LOW_FREQUENCY_LIMIT;
        let op_mode = OpMode::from_bits(self._buf[1]).with_low_frequency_mode_on(low_frequency);
        debug!("setting frequency to {hz} Hz in sleep mode");
        // FRF can only be changed in sleep or standby mode
        self.spi_write_byte(
            registers::OP_MODE,
            op_mode.with_mode(OperatingMode::Sleep).into_bits(),
        )?;
        self.write_frf(hz)?;
        if !matches!(
            op_mode.mode(),
            OperatingMode::Sleep | OperatingMode::Standby
        ) {
            // active modes are only entered from standby
            self.spi_write_byte(
                registers::OP_MODE,
                op_mode.with_mode(OperatingMode::Standby).into_bits(),
            )?;
        }
        self.spi_write_byte(registers::OP_MODE, op_mode.into_bits())
    }

    fn get_frequency(&mut self) -> Result<u32, Self::FrequencyErrorType> {
        self.spi_read(3, registers::FRF_MSB)?;
        let frf =
            (self._buf[1] as u32) << 16 | (self._buf[2] as u32) << 8 | self._buf[3] as u32;
        Ok(translate::register_to_freq(frf))
    }
}
