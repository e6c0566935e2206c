//! PORTD status mirror.

use avr_device::atmega328p::PORTD;

use crate::controller::StatusPort;

/// Status lines on PORTD, restricted to `mask`.
pub struct PortdStatus {
    port: PORTD,
    mask: u8,
}

impl PortdStatus {
    /// Make the masked PORTD lines outputs.
    pub fn new(port: PORTD, mask: u8) -> Self {
        port.ddrd.modify(|r, w| unsafe { w.bits(r.bits() | mask) });
        Self { port, mask }
    }
}

impl StatusPort for PortdStatus {
    #[inline]
    fn write(&mut self, bits: u8) {
        let mask = self.mask;
        self.port
            .portd
            .modify(|r, w| unsafe { w.bits((r.bits() & !mask) | (bits & mask)) });
    }
}
