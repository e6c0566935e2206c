//! Edge-pair debouncer for the select button.
//!
//! The pin change interrupt fires on both press and release. One toggle
//! turns every pair of raw edges into a single step request: the first edge
//! of a pair steps, the second is swallowed. Bounce beyond that parity is not
//! filtered.

/// Raw edge notification from the button pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeEvent;

/// Parity debouncer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeDebouncer {
    armed: bool,
}

impl EdgeDebouncer {
    pub const fn new() -> Self {
        Self { armed: false }
    }

    /// Feed one raw edge. Returns `true` when the selection should step.
    #[inline]
    pub fn on_edge(&mut self, _edge: EdgeEvent) -> bool {
        self.armed = !self.armed;
        self.armed
    }

    /// True between the two edges of a pair.
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_edge_steps() {
        let mut debouncer = EdgeDebouncer::new();
        assert!(debouncer.on_edge(EdgeEvent));
        assert!(debouncer.is_armed());
    }

    #[test]
    fn test_second_edge_swallowed() {
        let mut debouncer = EdgeDebouncer::new();
        debouncer.on_edge(EdgeEvent);
        assert!(!debouncer.on_edge(EdgeEvent));
        assert!(!debouncer.is_armed());
    }

    #[test]
    fn test_steps_are_half_the_edges() {
        for edges in 0..41usize {
            let mut debouncer = EdgeDebouncer::new();
            let steps = (0..edges).filter(|_| debouncer.on_edge(EdgeEvent)).count();
            // The first edge of a pair steps, so an unfinished pair counts
            assert_eq!(steps, (edges + 1) / 2);
            if edges % 2 == 0 {
                assert_eq!(steps, edges / 2);
            }
        }
    }
}
