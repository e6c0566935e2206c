//! Canonical enumeration of the selectable states.
//!
//! Yields `STATE_COUNT` composite states in selection order: for each
//! multiplier M0..M3, every base digit B0..B4. This order is the reference
//! the frequency table is built from and the order the push-button walks.

use crate::state::{CompositeState, STATE_COUNT};

/// Iterator over the 20 composite states in selection order.
///
/// # Example
///
/// ```
/// use phase_shifter::sequencer::StateSequencer;
///
/// let keys: Vec<u8> = StateSequencer::new().map(|s| s.bits()).take(6).collect();
/// assert_eq!(keys, [0x08, 0x10, 0x20, 0x40, 0x80, 0x09]);
/// ```
#[derive(Clone, Debug)]
pub struct StateSequencer {
    step: u8,
}

impl StateSequencer {
    /// Start a fresh enumeration at step 0.
    pub const fn new() -> Self {
        Self { step: 0 }
    }
}

impl Default for StateSequencer {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for StateSequencer {
    type Item = CompositeState;

    fn next(&mut self) -> Option<CompositeState> {
        if self.step >= STATE_COUNT {
            return None;
        }
        let state = CompositeState::from_step(self.step);
        self.step += 1;
        Some(state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = STATE_COUNT.saturating_sub(self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for StateSequencer {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emits_exactly_twenty() {
        assert_eq!(StateSequencer::new().count(), 20);
        assert_eq!(StateSequencer::new().len(), 20);
    }

    #[test]
    fn test_multiplier_is_outer_loop() {
        let keys: Vec<u8> = StateSequencer::new().map(|s| s.bits()).collect();
        assert_eq!(
            keys,
            [
                0x08, 0x10, 0x20, 0x40, 0x80, // M0
                0x09, 0x11, 0x21, 0x41, 0x81, // M1
                0x0A, 0x12, 0x22, 0x42, 0x82, // M2
                0x0C, 0x14, 0x24, 0x44, 0x84, // M3
            ]
        );
    }

    #[test]
    fn test_no_duplicates() {
        let keys: Vec<u8> = StateSequencer::new().map(|s| s.bits()).collect();
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_exhausted_stays_empty() {
        let mut seq = StateSequencer::new();
        for _ in 0..20 {
            assert!(seq.next().is_some());
        }
        assert_eq!(seq.next(), None);
        assert_eq!(seq.len(), 0);
    }
}
