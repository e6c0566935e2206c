//! Timer/Counter1 register access.
//!
//! OC1A (PB1) and OC1B (PB2) are the two signal outputs.

use avr_device::atmega328p::{PORTB, TC1};

use crate::programmer::{regs, TimerBus};

/// Access to the 16-bit Timer/Counter1 peripheral.
pub struct Timer1(TC1);

impl Timer1 {
    /// Take the timer and make its compare output pins outputs.
    ///
    /// The timer stays stopped until the first `OutputProgrammer::program`.
    pub fn new(registers: TC1, portb: &PORTB, output_mask: u8) -> Self {
        portb
            .ddrb
            .modify(|r, w| unsafe { w.bits(r.bits() | output_mask) });
        registers.tccr1b.write(|w| unsafe { w.bits(0) });
        Self(registers)
    }
}

impl TimerBus for Timer1 {
    fn write(&mut self, reg: u8, value: u16) {
        let tc = &self.0;
        // SAFETY: every Timer1 bit pattern is a valid register value; the
        // programmer owns the write order.
        unsafe {
            match reg {
                regs::TCCR1A => tc.tccr1a.write(|w| w.bits(value as u8)),
                regs::TCCR1B => tc.tccr1b.write(|w| w.bits(value as u8)),
                regs::TCCR1C => tc.tccr1c.write(|w| w.bits(value as u8)),
                regs::TCNT1 => tc.tcnt1.write(|w| w.bits(value)),
                regs::ICR1 => tc.icr1.write(|w| w.bits(value)),
                regs::OCR1A => tc.ocr1a.write(|w| w.bits(value)),
                regs::OCR1B => tc.ocr1b.write(|w| w.bits(value)),
                _ => {}
            }
        }
    }
}
