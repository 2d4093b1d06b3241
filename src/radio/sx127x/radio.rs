use super::{mnemonics, registers};
use crate::{
    radio::{
        prelude::{LoRaMode, LoRaPacket, LoRaRadio, LoRaStatus},
        Sx127xError, SX127x,
    },
    translate, IrqFlags, OperatingMode,
};
use embedded_hal::{delay::DelayNs, spi::SpiDevice};
use log::{debug, warn};

impl<SPI, DELAY> SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    /// Put the chip into continuous RX mode with a fresh FIFO pointer and no pending flags.
    fn arm_rx(&mut self) -> Result<(), Sx127xError<SPI::Error>> {
        debug!("arming continuous RX");
        self.set_operating_mode(OperatingMode::Standby)?;
        self.spi_write_byte(registers::FIFO_RX_BASE_ADDR, mnemonics::FIFO_RX_BASE)?;
        self.clear_all_irq_flags()?;
        self.set_operating_mode(OperatingMode::RxContinuous)
    }

    /// Poll the RX outcome flags until one is set or the poll limit is reached.
    fn wait_for_rx(&mut self) -> Result<IrqFlags, Sx127xError<SPI::Error>> {
        for _ in 0..mnemonics::RX_POLL_LIMIT {
            let flags = self.get_irq_flags()?;
            if flags.intersects(IrqFlags::RX_OUTCOME) {
                return Ok(flags.masked(IrqFlags::RX_OUTCOME));
            }
            self._delay_impl.delay_ms(mnemonics::POLL_INTERVAL_MS);
        }
        Ok(IrqFlags::new())
    }

    /// Arm RX if needed, wait for a packet and copy it into `buf`.
    fn try_receive(&mut self, buf: &mut [u8]) -> Result<usize, Sx127xError<SPI::Error>> {
        if self.get_operating_mode()? != OperatingMode::RxContinuous {
            self.arm_rx()?;
        }
        let flags = self.wait_for_rx()?;
        if flags.payload_crc_error() {
            warn!("received payload failed the CRC check");
            return Err(Sx127xError::Crc);
        }
        if flags.is_empty() || flags.rx_timeout() {
            warn!("no packet received");
            return Err(Sx127xError::Timeout);
        }

        self.spi_read(1, registers::FIFO_RX_CURRENT_ADDR)?;
        let addr = self._buf[1];
        self.spi_write_byte(registers::FIFO_ADDR_PTR, addr)?;
        self.spi_read(1, registers::RX_NB_BYTES)?;
        let len = (self._buf[1] as usize).min(buf.len());
        debug!("received {} bytes at FIFO offset {addr:#04X}", self._buf[1]);
        if len > 0 {
            self.spi_read(len as u8, registers::FIFO)?;
            buf[..len].copy_from_slice(&self._buf[1..(len + 1)]);
        }
        Ok(len)
    }

    /// Poll the `tx_done` flag at most `budget` times.
    fn wait_for_tx(&mut self, budget: u32) -> Result<bool, Sx127xError<SPI::Error>> {
        for poll in 0..budget {
            if self.get_irq_flags()?.tx_done() {
                return Ok(true);
            }
            if poll + 1 < budget {
                self._delay_impl.delay_ms(mnemonics::POLL_INTERVAL_MS);
            }
        }
        Ok(false)
    }

    /// Load `buf` into the TX half of the FIFO, start TX and wait for `tx_done`.
    fn try_transmit(&mut self, buf: &[u8]) -> Result<bool, Sx127xError<SPI::Error>> {
        self.set_operating_mode(OperatingMode::Standby)?;
        self.spi_write_byte(registers::FIFO_TX_BASE_ADDR, mnemonics::FIFO_TX_BASE)?;
        self.spi_write_byte(registers::FIFO_ADDR_PTR, mnemonics::FIFO_TX_BASE)?;
        self.spi_write_buf(registers::FIFO, buf)?;
        self.spi_write_byte(registers::PAYLOAD_LENGTH, buf.len() as u8)?;
        self.clear_irq_flags(IrqFlags::new().with_tx_done(true))?;

        self.set_operating_mode(OperatingMode::Tx)?;
        let budget = translate::tx_poll_budget(buf.len(), self.get_preamble_length()?);
        debug!("transmitting {} bytes, polling at most {budget} times", buf.len());
        self.wait_for_tx(budget)
    }

    /// Clear all flags and go back to listening.
    fn finish_tx(&mut self) -> Result<(), Sx127xError<SPI::Error>> {
        self.clear_all_irq_flags()?;
        self.set_operating_mode(OperatingMode::Standby)?;
        self.set_operating_mode(OperatingMode::RxContinuous)
    }
}

impl<SPI, DELAY> LoRaRadio for SX127x<SPI, DELAY>
where
    SPI: SpiDevice,
    DELAY: DelayNs,
{
    type RadioErrorType = Sx127xError<SPI::Error>;

    fn receive(&mut self, buf: &mut [u8]) -> Result<usize, Self::RadioErrorType> {
        let result = self.try_receive(buf);
        let cleared = self.clear_all_irq_flags();
        let len = result?;
        cleared?;
        Ok(len)
    }

    fn transmit(&mut self, buf: &[u8]) -> Result<usize, Self::RadioErrorType> {
        let max_len = self.get_max_payload_length()?.min(mnemonics::FIFO_HALF_LENGTH) as usize;
        if buf.is_empty() || buf.len() > max_len {
            warn!("refusing to transmit {} bytes (max {max_len})", buf.len());
            self.clear_irq_flags(IrqFlags::new().with_tx_done(true))?;
            return Ok(0);
        }

        let sent = self.try_transmit(buf);
        let finished = self.finish_tx();
        let sent = sent?;
        finished?;
        if sent {
            Ok(buf.len())
        } else {
            warn!("transmission did not complete in time");
            Ok(0)
        }
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{mnemonics, registers, LoRaRadio};
    use crate::radio::{sx127x::commands, Sx127xError, SX127x};
    use crate::{
        spi_test_expects,
        test::{mk_radio, RegisterFile},
    };
    use embedded_hal::spi::ErrorKind;
    use embedded_hal_mock::eh1::{delay::NoopDelay, spi::Transaction as SpiTransaction};
    use std::{vec, vec::Vec};

    fn set_mode_expects(current: u8, new: u8) -> [SpiTransaction<u8>; 6] {
        spi_test_expects![
            (vec![registers::OP_MODE, 0u8], vec![0u8, current]),
            (
                vec![registers::OP_MODE | commands::W_REGISTER, new],
                vec![0u8, 0u8],
            ),
        ]
    }

    fn irq_flags_expects(flags: u8) -> [SpiTransaction<u8>; 3] {
        spi_test_expects![(vec![registers::IRQ_FLAGS, 0u8], vec![0u8, flags]),]
    }

    fn clear_flags_expects(flags: u8) -> [SpiTransaction<u8>; 3] {
        spi_test_expects![(
            vec![registers::IRQ_FLAGS | commands::W_REGISTER, flags],
            vec![0u8, 0u8],
        ),]
    }

    fn arm_rx_expects() -> Vec<SpiTransaction<u8>> {
        let mut expectations = Vec::new();
        // LoRa, standby
        expectations.extend(spi_test_expects![(
            vec![registers::OP_MODE, 0u8],
            vec![0u8, 0x81u8]
        ),]);
        expectations.extend(set_mode_expects(0x81, 0x81));
        expectations.extend(spi_test_expects![(
            vec![
                registers::FIFO_RX_BASE_ADDR | commands::W_REGISTER,
                mnemonics::FIFO_RX_BASE
            ],
            vec![0u8, 0u8],
        ),]);
        expectations.extend(clear_flags_expects(0xFF));
        expectations.extend(set_mode_expects(0x81, 0x85));
        expectations
    }

    fn rx_payload_expects(nb_bytes: u8, len: usize) -> Vec<SpiTransaction<u8>> {
        let mut expectations = spi_test_expects![
            (
                vec![registers::FIFO_RX_CURRENT_ADDR, 0u8],
                vec![0u8, 0x20u8],
            ),
            (
                vec![registers::FIFO_ADDR_PTR | commands::W_REGISTER, 0x20u8],
                vec![0u8, 0u8],
            ),
            (vec![registers::RX_NB_BYTES, 0u8], vec![0u8, nb_bytes]),
        ]
        .to_vec();
        let mut expected = vec![0u8; len + 1];
        expected[0] = registers::FIFO;
        let mut response: Vec<u8> = (0..=len as u8).collect();
        response[0] = 0;
        expectations.extend(spi_test_expects![(expected, response),]);
        expectations
    }

    #[test]
    fn receive() {
        let mut spi_expectations = arm_rx_expects();
        // nothing yet, then RxDone with ValidHeader
        spi_expectations.extend(irq_flags_expects(0));
        spi_expectations.extend(irq_flags_expects(0x50));
        spi_expectations.extend(rx_payload_expects(5, 5));
        spi_expectations.extend(clear_flags_expects(0xFF));

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let mut buf = [0u8; 32];
        assert_eq!(radio.receive(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..6], &[1, 2, 3, 4, 5, 0]);
        spi.done();
    }

    #[test]
    fn receive_truncated() {
        // already in RX continuous mode
        let mut spi_expectations = spi_test_expects![(
            vec![registers::OP_MODE, 0u8],
            vec![0u8, 0x85u8]
        ),]
        .to_vec();
        spi_expectations.extend(irq_flags_expects(0x40));
        spi_expectations.extend(rx_payload_expects(20, 4));
        spi_expectations.extend(clear_flags_expects(0xFF));

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let mut buf = [0u8; 4];
        assert_eq!(radio.receive(&mut buf).unwrap(), 4);
        assert_eq!(buf, [1, 2, 3, 4]);
        spi.done();
    }

    #[test]
    fn receive_crc_error() {
        let mut spi_expectations = spi_test_expects![(
            vec![registers::OP_MODE, 0u8],
            vec![0u8, 0x85u8]
        ),]
        .to_vec();
        spi_expectations.extend(irq_flags_expects(0x70));
        spi_expectations.extend(clear_flags_expects(0xFF));

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let mut buf = [0u8; 4];
        assert_eq!(radio.receive(&mut buf), Err(Sx127xError::Crc));
        spi.done();
    }

    #[test]
    fn receive_rx_timeout_flag() {
        let mut spi_expectations = spi_test_expects![(
            vec![registers::OP_MODE, 0u8],
            vec![0u8, 0x85u8]
        ),]
        .to_vec();
        // unrelated flags are ignored
        spi_expectations.extend(irq_flags_expects(0x08));
        spi_expectations.extend(irq_flags_expects(0x80));
        spi_expectations.extend(clear_flags_expects(0xFF));

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let mut buf = [0u8; 4];
        assert_eq!(radio.receive(&mut buf), Err(Sx127xError::Timeout));
        spi.done();
    }

    #[test]
    fn receive_timeout_arms_once() {
        let mut spi_expectations = arm_rx_expects();
        for _ in 0..mnemonics::RX_POLL_LIMIT {
            spi_expectations.extend(irq_flags_expects(0));
        }
        spi_expectations.extend(clear_flags_expects(0xFF));
        // still in RX continuous mode
        spi_expectations.extend(spi_test_expects![(
            vec![registers::OP_MODE, 0u8],
            vec![0u8, 0x85u8]
        ),]);
        for _ in 0..mnemonics::RX_POLL_LIMIT {
            spi_expectations.extend(irq_flags_expects(0));
        }
        spi_expectations.extend(clear_flags_expects(0xFF));

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        let mut buf = [0u8; 4];
        assert_eq!(radio.receive(&mut buf), Err(Sx127xError::Timeout));
        assert_eq!(radio.receive(&mut buf), Err(Sx127xError::Timeout));
        spi.done();
    }

    fn tx_load_expects(payload: &[u8]) -> Vec<SpiTransaction<u8>> {
        let mut expectations = spi_test_expects![(
            vec![registers::MAX_PAYLOAD_LENGTH, 0u8],
            vec![0u8, 0x80u8]
        ),]
        .to_vec();
        // RX continuous -> standby
        expectations.extend(set_mode_expects(0x85, 0x81));
        let mut fifo = vec![registers::FIFO | commands::W_REGISTER];
        fifo.extend_from_slice(payload);
        let fifo_len = fifo.len();
        expectations.extend(spi_test_expects![
            (
                vec![
                    registers::FIFO_TX_BASE_ADDR | commands::W_REGISTER,
                    mnemonics::FIFO_TX_BASE
                ],
                vec![0u8, 0u8],
            ),
            (
                vec![
                    registers::FIFO_ADDR_PTR | commands::W_REGISTER,
                    mnemonics::FIFO_TX_BASE
                ],
                vec![0u8, 0u8],
            ),
            (fifo, vec![0u8; fifo_len]),
            (
                vec![
                    registers::PAYLOAD_LENGTH | commands::W_REGISTER,
                    payload.len() as u8
                ],
                vec![0u8, 0u8],
            ),
        ]);
        expectations.extend(clear_flags_expects(0x08));
        expectations.extend(set_mode_expects(0x81, 0x83));
        expectations.extend(spi_test_expects![(
            vec![registers::PREAMBLE_MSB, 0u8, 0u8],
            vec![0u8, 0u8, 8u8]
        ),]);
        expectations
    }

    fn tx_finish_expects() -> Vec<SpiTransaction<u8>> {
        let mut expectations = clear_flags_expects(0xFF).to_vec();
        // the chip falls back to standby after TX
        expectations.extend(set_mode_expects(0x81, 0x81));
        expectations.extend(set_mode_expects(0x81, 0x85));
        expectations
    }

    #[test]
    fn transmit() {
        let payload = [0xAAu8, 0xBB, 0xCC];
        let mut spi_expectations = tx_load_expects(&payload);
        spi_expectations.extend(irq_flags_expects(0));
        spi_expectations.extend(irq_flags_expects(0x08));
        spi_expectations.extend(tx_finish_expects());

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        assert_eq!(radio.transmit(&payload).unwrap(), 3);
        spi.done();
    }

    #[test]
    fn transmit_timeout() {
        let payload = [0x55u8; 10];
        let mut spi_expectations = tx_load_expects(&payload);
        // 10 bytes + 8 symbols of preamble + 3
        for _ in 0..21 {
            spi_expectations.extend(irq_flags_expects(0));
        }
        spi_expectations.extend(tx_finish_expects());

        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        assert_eq!(radio.transmit(&payload).unwrap(), 0);
        spi.done();
    }

    #[test]
    fn transmit_rejected() {
        let spi_expectations = spi_test_expects![
            // too long for the configured max payload length
            (vec![registers::MAX_PAYLOAD_LENGTH, 0u8], vec![0u8, 16u8]),
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0x08u8],
                vec![0u8, 0u8],
            ),
            // too long for half of the FIFO
            (vec![registers::MAX_PAYLOAD_LENGTH, 0u8], vec![0u8, 0xFFu8]),
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0x08u8],
                vec![0u8, 0u8],
            ),
            // empty
            (vec![registers::MAX_PAYLOAD_LENGTH, 0u8], vec![0u8, 0x80u8]),
            (
                vec![registers::IRQ_FLAGS | commands::W_REGISTER, 0x08u8],
                vec![0u8, 0u8],
            ),
        ];
        let mocks = mk_radio(&spi_expectations);
        let (mut radio, mut spi) = (mocks.0, mocks.1);
        assert_eq!(radio.transmit(&[0u8; 17]).unwrap(), 0);
        assert_eq!(radio.transmit(&[0u8; 129]).unwrap(), 0);
        assert_eq!(radio.transmit(&[]).unwrap(), 0);
        spi.done();
    }

    #[test]
    fn receive_bus_error_while_arming() {
        // standby with stale TxDone and CadDone flags
        let mut chip = RegisterFile::new(0x81, 0x48);
        chip.fail_on_write = Some(registers::FIFO_RX_BASE_ADDR);
        let mut radio = SX127x::new(chip, NoopDelay);
        let mut buf = [0u8; 4];
        assert_eq!(
            radio.receive(&mut buf),
            Err(Sx127xError::Spi(ErrorKind::Other))
        );
        assert_eq!(radio._spi.regs[registers::IRQ_FLAGS as usize], 0);
    }

    #[test]
    fn transmit_bus_error_while_loading() {
        let mut chip = RegisterFile::new(0x85, 0x48);
        chip.fail_on_write = Some(registers::FIFO);
        let mut radio = SX127x::new(chip, NoopDelay);
        assert_eq!(
            radio.transmit(&[1, 2, 3]),
            Err(Sx127xError::Spi(ErrorKind::Other))
        );
        // flags cleared and back to RX continuous
        assert_eq!(radio._spi.regs[registers::IRQ_FLAGS as usize], 0);
        assert_eq!(radio._spi.regs[registers::OP_MODE as usize], 0x85);
    }
}
