use super::{bit_fields::ModemConfig1, registers};
use crate::{
    radio::{prelude::LoRaBandwidth, Sx127xError, SX127x},
    Bandwidth,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::debug;

impl<SPI, DELAY> LoRaBandwidth for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type BandwidthErrorType = Sx127xError<SPI::Error>;

    fn set_bandwidth(&mut self, hz: u32) -> Result<(), Self::BandwidthErrorType> {
        let bw = Bandwidth::from_hz(hz).ok_or(Sx127xError::InvalidParameter)?;
        debug!("setting bandwidth to {bw}");
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        let modem_config = ModemConfig1::from_bits(self._buf[1]).with_bandwidth(bw);
        self.spi_write_byte(registers::MODEM_CONFIG1, modem_config.into_bits())?;
        self.update_low_data_rate_optimize()
    }

    fn get_bandwidth(&mut self) -> Result<u32, Self::BandwidthErrorType> {
        self.spi_read(1, registers::MODEM_CONFIG1)?;
        ModemConfig1::from_bits(self._buf[1])
            .bandwidth()
            .map(Bandwidth::hz)
            .ok_or(Sx127xError::BinaryCorruption)
    }
}
