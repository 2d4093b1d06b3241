use super::{bit_fields::ModemConfig2, mnemonics, registers};
use crate::{
    radio::{prelude::LoRaSpreadingFactor, Sx127xError, SX127x},
    SpreadingFactor,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::debug;

impl<SPI, DELAY> SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Program the detection registers that must follow the spreading factor.
    pub(super) fn set_detection(
        &mut self,
        sf: SpreadingFactor,
    ) -> Result<(), Sx127xError<SPI::Error>> {
        let (optimize, threshold) = match sf {
            SpreadingFactor::Sf6 => (
                mnemonics::DETECT_OPTIMIZE_SF6,
                mnemonics::DETECTION_THRESHOLD_SF6,
            ),
            _ => (
                mnemonics::DETECT_OPTIMIZE_SF7_12,
                mnemonics::DETECTION_THRESHOLD_SF7_12,
            ),
        };
        self.spi_write_byte(registers::DETECT_OPTIMIZE, optimize)?;
        self.spi_write_byte(registers::DETECTION_THRESHOLD, threshold)
    }
}

impl<SPI, DELAY> LoRaSpreadingFactor for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type SpreadingFactorErrorType = Sx127xError<SPI::Error>;

    fn set_spreading_factor(&mut self, chips: u32) -> Result<(), Self::SpreadingFactorErrorType> {
        let sf = SpreadingFactor::from_chips(chips).ok_or(Sx127xError::InvalidParameter)?;
        debug!("setting spreading factor to {sf}");
        self.spi_read(1, registers::MODEM_CONFIG2)?;
        let modem_config = ModemConfig2::from_bits(self._buf[1]).with_spreading_factor(sf);
        self.spi_write_byte(registers::MODEM_CONFIG2, modem_config.into_bits())?;
        self.set_detection(sf)?;
        self.update_low_data_rate_optimize()
    }

    fn get_spreading_factor(&mut self) -> Result<u32, Self::SpreadingFactorErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG2)?;
        ModemConfig2::from_bits(self._buf[1])
            .spreading_factor()
            .map(SpreadingFactor::chips)
            .ok_or(Sx127xError::BinaryCorruption)
    }
}
