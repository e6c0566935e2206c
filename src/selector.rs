//! Shared selection state.
//!
//! # Architecture
//!
//! ```text
//! PCINT1 ISR               SelectorState              Main loop
//! ──────────               ─────────────              ─────────
//!
//! on_edge() ────────▶ [debouncer][advancer] ──────▶ composite()
//! writer only           critical section            reader only
//! ```
//!
//! Both halves of the composite are read inside one critical section, so
//! the main loop never observes a state the advancer did not produce.

use core::cell::Cell;

use critical_section::Mutex;

use crate::advancer::StateAdvancer;
use crate::debounce::{EdgeDebouncer, EdgeEvent};
use crate::state::CompositeState;

/// Anything the main loop can read a composite selection from.
pub trait SelectionSource {
    fn composite(&self) -> CompositeState;
}

#[derive(Clone, Copy)]
struct Selector {
    advancer: StateAdvancer,
    debouncer: EdgeDebouncer,
    steps: u16,
}

/// Snapshot of the selection state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectorSnapshot {
    pub composite: CompositeState,
    /// Waiting for the second edge of a pair.
    pub armed: bool,
    /// Steps taken since boot (wraps).
    pub steps: u16,
}

/// Selection state shared between the edge interrupt and the main loop.
///
/// # Usage
///
/// ```ignore
/// static SELECTOR: SelectorState = SelectorState::new();
///
/// // In the pin change ISR:
/// SELECTOR.on_edge(EdgeEvent);
///
/// // In the main loop:
/// let current = SELECTOR.composite();
/// ```
pub struct SelectorState {
    inner: Mutex<Cell<Selector>>,
}

impl SelectorState {
    /// Power-on state: B0, M0, debouncer disarmed.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Selector {
                advancer: StateAdvancer::new(),
                debouncer: EdgeDebouncer::new(),
                steps: 0,
            })),
        }
    }

    /// Deliver one raw button edge (interrupt context).
    ///
    /// Returns `true` if the edge stepped the selection.
    pub fn on_edge(&self, edge: EdgeEvent) -> bool {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut selector = cell.get();
            let stepped = selector.debouncer.on_edge(edge);
            if stepped {
                selector.advancer.advance_base();
                selector.steps = selector.steps.wrapping_add(1);
            }
            cell.set(selector);
            stepped
        })
    }

    /// Current composite state, read atomically.
    #[inline]
    pub fn composite(&self) -> CompositeState {
        critical_section::with(|cs| self.inner.borrow(cs).get().advancer.composite())
    }

    /// Snapshot of all fields.
    pub fn snapshot(&self) -> SelectorSnapshot {
        critical_section::with(|cs| {
            let selector = self.inner.borrow(cs).get();
            SelectorSnapshot {
                composite: selector.advancer.composite(),
                armed: selector.debouncer.is_armed(),
                steps: selector.steps,
            }
        })
    }
}

impl SelectionSource for SelectorState {
    #[inline]
    fn composite(&self) -> CompositeState {
        SelectorState::composite(self)
    }
}

impl Default for SelectorState {
    fn default() -> Self {
        Self::new()
    }
}
