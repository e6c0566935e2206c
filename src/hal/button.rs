//! Select button on PC5 (PCINT13).
//!
//! Any level change raises PCINT1; the handler forwards it as an
//! `EdgeEvent` and the debouncer does the rest.

use avr_device::atmega328p::{EXINT, PORTC};

/// PCICR bit enabling pin change group 1 (PCINT8..14).
const PCIE1: u8 = 1 << 1;

/// Configure `bit` of PORTC as a pulled-up input and unmask its pin change
/// interrupt. Global interrupts stay as they are.
pub fn init(portc: &PORTC, exint: &EXINT, bit: u8) {
    let pin = 1 << bit;
    portc.ddrc.modify(|r, w| unsafe { w.bits(r.bits() & !pin) });
    portc.portc.modify(|r, w| unsafe { w.bits(r.bits() | pin) });
    exint.pcmsk1.write(|w| unsafe { w.bits(pin) });
    exint.pcicr.modify(|r, w| unsafe { w.bits(r.bits() | PCIE1) });
}
