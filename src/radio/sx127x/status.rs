use super::registers;
use crate::{
    radio::{prelude::LoRaStatus, Sx127xError, SX127x},
    IrqFlags,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};

impl<SPI, DELAY> LoRaStatus for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type StatusErrorType = Sx127xError<SPI::Error>;

    fn get_irq_flags(&mut self) -> Result<IrqFlags, Self::StatusErrorType> {
        self.spi_read(1, registers::IRQ_FLAGS)?;
        Ok(IrqFlags::from_bits(self._buf[1]))
    }

    fn clear_irq_flags(&mut self, flags: IrqFlags) -> Result<(), Self::StatusErrorType> {
        self.spi_write_byte(registers::IRQ_FLAGS, flags.into_bits())
    }

    fn clear_all_irq_flags(&mut self) -> Result<(), Self::StatusErrorType> {
        self.clear_irq_flags(IrqFlags::all())
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, LoRaStatus};
    use crate::radio::sx127x::commands;
    use crate::{spi_test_expects, test::mk_radio, IrqFlags};
    use embedded_hal_mock::eh1::spi::Transaction as SpiTransaction;
    use std::vec;

    #[test]
    fn get_irq_flags() {
        let spi_expectations = spi_test_expects![
            // read RegIrqFlags
            (vec![registers::IRQ_FLAGS, 0u8], vec![0u8, 0x58u8]),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let flags = radio.get_irq_flags().unwrap();
        assert!(flags.rx_done());
        assert!(flags.valid_header());
        assert!(flags.tx_done());
        assert!(!flags.payload_crc_error());
        assert!(!flags.rx_timeout());
        spi.done();
    }

    #[test]
    fn clear_irq_flags() {
        let spi_expectations = spi_test_expects![
            // clear only TxDone
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0x08u8],
                vec![0u8, 0u8],
            ),
            // clear everything
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0xFFu8],
                vec![0u8, 0u8],
            ),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        radio
            .clear_irq_flags(IrqFlags::new().with_tx_done(true))
            .unwrap();
        radio.clear_all_irq_flags().unwrap();
        spi.done();
    }
}
