//! # PhaseShifter
//!
//! Push-button stepped signal generator: 20 preset frequencies, two
//! phase-shifted outputs from one 16-bit timer.
//!
//! ## Architecture
//!
//! ```text
//! PCINT1 ─▶ SelectorState ─▶ Controller::poll ─▶ FrequencyTable ─▶ OutputProgrammer
//!           (debounce +       (change detect,      (linear scan)     (ordered Timer1
//!            advance)          status mirror)                         register writes)
//! ```
//!
//! - `CompositeState::from_step` is the one enumeration of selectable states;
//!   the table and the runtime advancer both derive from it
//! - Interrupt and main loop share state only through critical sections
//! - Everything above `hal` is hardware-free and tested on the host

#![cfg_attr(not(test), no_std)]

pub mod state;
pub mod sequencer;
pub mod frequency;
pub mod advancer;
pub mod debounce;
pub mod selector;
pub mod programmer;
pub mod controller;
pub mod config;
pub mod fault;
pub mod logging;
pub mod log_globals;
pub mod uart_logger;
pub mod hal;

pub use config::CONFIG;
pub use state::{BaseField, CompositeState, MultiplierField};
pub use sequencer::StateSequencer;
pub use frequency::{ClockSelect, FrequencyEntry, FrequencyTable};
pub use advancer::StateAdvancer;
pub use debounce::{EdgeDebouncer, EdgeEvent};
pub use selector::{SelectionSource, SelectorState};
pub use programmer::{OutputProgrammer, ProgramError, TimerBus};
pub use controller::{Controller, PollOutcome, Shared, StatusPort};
pub use fault::{FaultCode, FaultState};
pub use log_globals::LOG_STREAM;
