//! Module: config
//!
//! Purpose: Compile-time board configuration for the phase shifter.
//!
//! Architecture:
//! - Single source of truth: `CONFIG`, one `BoardConfig` const
//! - No runtime configuration, no persistence: every value is baked in
//! - Pin masks refer to ATmega328P port bits
//!
//! Safety: Safe. Constants only.

/// Board configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// CPU (and Timer1 input) clock in Hz.
    pub cpu_hz: u32,

    /// First compare output offset, percent of the period (OCR1A).
    pub compare_a_percent: u32,

    /// Second compare output offset, percent of the period (OCR1B).
    pub compare_b_percent: u32,

    /// Button pin on PORTC (PC5 / PCINT13).
    pub button_bit: u8,

    /// Timer1 compare output pins on PORTB (PB1 = OC1A, PB2 = OC1B).
    pub output_mask: u8,

    /// PORTD lines that mirror the composite state.
    pub status_mask: u8,

    /// USART0 baud rate for the optional log drain.
    pub log_baud: u32,
}

impl BoardConfig {
    /// UBRR0 value for `log_baud` in normal (16x) mode.
    pub const fn ubrr(&self) -> u16 {
        (self.cpu_hz / (16 * self.log_baud) - 1) as u16
    }
}

/// USART0 TX shares PD1 with status line 1.
pub const UART_TX_BIT: u8 = 1;

/// Active board configuration.
pub const CONFIG: BoardConfig = BoardConfig {
    cpu_hz: 11_059_200,
    compare_a_percent: 2,
    compare_b_percent: 51,
    button_bit: 5,
    output_mask: (1 << 1) | (1 << 2),
    status_mask: if cfg!(feature = "uart-log") {
        !(1 << UART_TX_BIT)
    } else {
        0xFF
    },
    log_baud: 57_600,
};
