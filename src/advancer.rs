//! Runtime selection state machine.
//!
//! Pure logic, no hardware dependencies. Two rotation counters: the base
//! digit cycles fastest and carries into the multiplier on wraparound, which
//! walks the same order as `StateSequencer`.

use crate::state::{BaseField, CompositeState, MultiplierField};

/// Runtime selection state.
///
/// # Example
///
/// ```
/// use phase_shifter::advancer::StateAdvancer;
/// use phase_shifter::state::CompositeState;
///
/// let mut state = StateAdvancer::new();
/// for _ in 0..5 {
///     state.advance_base();
/// }
/// // Base wrapped to B0 and carried into M1
/// assert_eq!(state.composite(), CompositeState::from_step(5));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateAdvancer {
    base: BaseField,
    multiplier: MultiplierField,
}

impl StateAdvancer {
    /// Power-on state: B0, M0.
    pub const fn new() -> Self {
        Self {
            base: BaseField::FIRST,
            multiplier: MultiplierField::ZERO,
        }
    }

    /// Step to the next selection.
    ///
    /// At B4 the base resets to B0 and the multiplier advances; otherwise
    /// the base shifts one position.
    pub fn advance_base(&mut self) {
        if self.base.is_last() {
            self.base = BaseField::FIRST;
            self.advance_multiplier();
        } else {
            self.base = self.base.shifted();
        }
    }

    /// Step the multiplier: M3 → M0, M0 → M1, otherwise shift.
    ///
    /// Only reached through base wraparound.
    fn advance_multiplier(&mut self) {
        self.multiplier = if self.multiplier.is_last() {
            MultiplierField::ZERO
        } else if self.multiplier.is_zero() {
            MultiplierField::FIRST
        } else {
            self.multiplier.shifted()
        };
    }

    #[inline]
    pub fn base(&self) -> BaseField {
        self.base
    }

    #[inline]
    pub fn multiplier(&self) -> MultiplierField {
        self.multiplier
    }

    /// Union of both fields.
    #[inline]
    pub fn composite(&self) -> CompositeState {
        CompositeState::union(self.base, self.multiplier)
    }
}

impl Default for StateAdvancer {
    fn default() -> Self {
        Self::new()
    }
}
