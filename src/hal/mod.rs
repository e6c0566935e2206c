//! Hardware Abstraction Layer for the phase shifter.
//!
//! Thin wrappers around ATmega328P peripherals.
//! Business logic stays in core modules, HAL is just I/O.
//! Compiled only for `target_arch = "avr"`.

#[cfg(target_arch = "avr")]
pub mod button;
#[cfg(target_arch = "avr")]
pub mod status;
#[cfg(target_arch = "avr")]
pub mod timer1;
#[cfg(all(target_arch = "avr", feature = "uart-log"))]
pub mod serial;

#[cfg(target_arch = "avr")]
pub use status::PortdStatus;
#[cfg(target_arch = "avr")]
pub use timer1::Timer1;
#[cfg(all(target_arch = "avr", feature = "uart-log"))]
pub use serial::LogUart;
