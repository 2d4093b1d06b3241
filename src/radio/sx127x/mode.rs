use super::{bit_fields::OpMode, registers};
use crate::{
    radio::{prelude::LoRaMode, Sx127xError, SX127x},
    LogicalMode, OperatingMode,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaMode for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type ModeErrorType = Sx127xError<SPI::Error>;

    fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<(), Self::ModeErrorType> {
        self.spi_read(1, registers::OP_MODE)?;
        let op_mode = OpMode::from_bits(self._buf[1]).with_mode(mode);
        self.spi_write_byte(registers::OP_MODE, op_mode.into_bits())
    }

    fn get_operating_mode(&mut self) -> Result<OperatingMode, Self::ModeErrorType> {
        self.spi_read(1, registers::OP_MODE)?;
        Ok(OpMode::from_bits(self._buf[1]).mode())
    }

    fn set_mode(&mut self, mode: LogicalMode) -> Result<(), Self::ModeErrorType> {
        self.set_operating_mode(mode.into())
    }

    fn get_mode(&mut self) -> Result<LogicalMode, Self::ModeErrorType> {
        self.get_operating_mode().map(LogicalMode::from)
    }
}
