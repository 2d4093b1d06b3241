use super::registers;
use crate::{
    radio::{prelude::LoRaTelemetry, Sx127xError, SX127x},
    translate,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaTelemetry for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type TelemetryErrorType = Sx127xError<SPI::Error>;

    fn get_rssi(&mut self) -> Result<i32, Self::TelemetryErrorType> {
        let low_frequency = self.is_low_frequency()?;
        self.spi_read(1, registers::RSSI_VALUE)?;
        Ok(translate::rssi_from_raw(self._buf[1], low_frequency))
    }

    fn get_snr(&mut self) -> Result<i32, Self::TelemetryErrorType> {
        self.spi_read(1, registers::PKT_SNR_VALUE)?;
        Ok(translate::snr_from_raw(self._buf[1]))
    }

    fn get_last_packet_rssi(&mut self) -> Result<i32, Self::TelemetryErrorType> {
        let low_frequency = self.is_low_frequency()?;
        // RegPktSnrValue is followed by RegPktRssiValue
        self.spi_read(2, registers::PKT_SNR_VALUE)?;
        Ok(translate::packet_rssi_from_raw(
            self._buf[2],
            self._buf[1],
            low_frequency,
        ))
    }
}
