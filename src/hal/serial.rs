//! USART0 transmitter for the log drain.

use core::convert::Infallible;

use avr_device::atmega328p::USART0;

/// UCSR0A: data register empty.
const UDRE0: u8 = 1 << 5;
/// UCSR0B: transmitter enable.
const TXEN0: u8 = 1 << 3;
/// UCSR0C: 8 data bits, no parity, 1 stop bit.
const FRAME_8N1: u8 = 0b0000_0110;

/// Blocking TX-only UART.
pub struct LogUart(USART0);

impl LogUart {
    pub fn new(usart: USART0, ubrr: u16) -> Self {
        usart.ubrr0.write(|w| unsafe { w.bits(ubrr) });
        usart.ucsr0c.write(|w| unsafe { w.bits(FRAME_8N1) });
        usart.ucsr0b.write(|w| unsafe { w.bits(TXEN0) });
        Self(usart)
    }

    fn write_byte(&mut self, byte: u8) {
        while self.0.ucsr0a.read().bits() & UDRE0 == 0 {}
        self.0.udr0.write(|w| unsafe { w.bits(byte) });
    }
}

impl ufmt::uWrite for LogUart {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        for &byte in s.as_bytes() {
            self.write_byte(byte);
        }
        Ok(())
    }
}
