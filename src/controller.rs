//! Main loop controller.
//!
//! Polls the shared selection, mirrors it onto the status port, and retunes
//! the timer when it changes.
//!
//! # Contract
//!
//! - Status port is written on every pass
//! - The timer is touched only when the composite differs from the last pass
//! - A composite with no table entry is skipped: fault recorded, warning
//!   logged, the running output stays as it was
//! - Never blocks; a pass is O(1) unless the selection changed

use crate::fault::{FaultCode, FaultState};
use crate::frequency::FrequencyTable;
use crate::logging::LogStream;
use crate::programmer::{OutputProgrammer, ProgramError, TimerBus, TimerSettings};
use crate::selector::SelectionSource;
use crate::state::CompositeState;

/// Byte-wide status output, one line per composite bit.
pub trait StatusPort {
    fn write(&mut self, bits: u8);
}

impl<S: StatusPort + ?Sized> StatusPort for &mut S {
    #[inline]
    fn write(&mut self, bits: u8) {
        (**self).write(bits)
    }
}

/// Result of one main loop pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// Selection unchanged since the last pass.
    Unchanged,
    /// Timer retuned to the new selection.
    Retuned(TimerSettings),
    /// No table entry for this composite; output left running.
    Missed(CompositeState),
    /// Entry found but the timer rejected it; output left running.
    Rejected(ProgramError),
}

/// Shared statics the controller reads and reports into.
#[derive(Clone, Copy)]
pub struct Shared<'a> {
    pub table: &'a FrequencyTable,
    pub selector: &'a dyn SelectionSource,
    pub fault: &'a FaultState,
    pub log: &'a LogStream,
}

/// Main loop state.
///
/// # Example
///
/// ```ignore
/// let mut controller = Controller::new(shared, timer1, portd);
/// controller.start()?;
/// controller.run(|_| {});
/// ```
pub struct Controller<'a, T: TimerBus, S: StatusPort> {
    shared: Shared<'a>,
    programmer: OutputProgrammer<T>,
    status: S,
    previous: CompositeState,
    tick: u32,
}

impl<'a, T: TimerBus, S: StatusPort> Controller<'a, T, S> {
    pub fn new(shared: Shared<'a>, timer: T, status: S) -> Self {
        Self {
            shared,
            programmer: OutputProgrammer::new(timer),
            status,
            previous: CompositeState::INITIAL,
            tick: 0,
        }
    }

    /// Program the power-on entry (step 0, 1 Hz).
    pub fn start(&mut self) -> Result<TimerSettings, ProgramError> {
        let first = self.shared.table.first();
        self.previous = first.key;
        let settings = self.programmer.program(first)?;
        crate::rt_info!(
            self.shared.log,
            self.tick,
            "start key {} top {}",
            first.key.bits(),
            settings.top
        );
        Ok(settings)
    }

    /// One main loop pass.
    pub fn poll(&mut self) -> PollOutcome {
        self.tick = self.tick.wrapping_add(1);

        let current = self.shared.selector.composite();
        self.status.write(current.bits());

        if current == self.previous {
            return PollOutcome::Unchanged;
        }
        self.previous = current;

        let Some(entry) = self.shared.table.lookup(current) else {
            self.shared
                .fault
                .set(FaultCode::UnknownKey, current.bits() as u32);
            crate::rt_warn!(self.shared.log, self.tick, "no entry for key {}", current.bits());
            return PollOutcome::Missed(current);
        };

        match self.programmer.program(entry) {
            Ok(settings) => {
                self.shared.fault.clear();
                crate::rt_info!(
                    self.shared.log,
                    self.tick,
                    "key {} top {} cs {}",
                    current.bits(),
                    settings.top,
                    settings.clock_select
                );
                PollOutcome::Retuned(settings)
            }
            Err(err) => {
                self.shared
                    .fault
                    .set(FaultCode::DivisorOutOfRange, entry.divisor);
                crate::rt_error!(
                    self.shared.log,
                    self.tick,
                    "divisor {} rejected",
                    entry.divisor
                );
                PollOutcome::Rejected(err)
            }
        }
    }

    /// Loop forever, handing each pass outcome to `after_pass`.
    pub fn run<F: FnMut(PollOutcome)>(&mut self, mut after_pass: F) -> ! {
        loop {
            let outcome = self.poll();
            after_pass(outcome);
        }
    }

    /// Composite seen on the last pass.
    #[inline]
    pub fn previous(&self) -> CompositeState {
        self.previous
    }

    /// Passes since boot (wraps).
    #[inline]
    pub fn tick(&self) -> u32 {
        self.tick
    }

    /// Settings currently driving the outputs.
    #[inline]
    pub fn active(&self) -> Option<TimerSettings> {
        self.programmer.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debounce::EdgeEvent;
    use crate::selector::SelectorState;

    #[derive(Default)]
    struct Recorder(Vec<(u8, u16)>);

    impl TimerBus for Recorder {
        fn write(&mut self, reg: u8, value: u16) {
            self.0.push((reg, value));
        }
    }

    #[derive(Default)]
    struct Port(Vec<u8>);

    impl StatusPort for Port {
        fn write(&mut self, bits: u8) {
            self.0.push(bits);
        }
    }

    #[test]
    fn test_unchanged_does_not_touch_timer() {
        let table = FrequencyTable::build();
        let selector = SelectorState::new();
        let fault = FaultState::new();
        let log = LogStream::new();
        let shared = Shared { table: &table, selector: &selector, fault: &fault, log: &log };

        let mut timer = Recorder::default();
        let mut port = Port::default();
        let mut controller = Controller::new(shared, &mut timer, &mut port);
        controller.start().unwrap();

        for _ in 0..3 {
            assert_eq!(controller.poll(), PollOutcome::Unchanged);
        }
        drop(controller);

        // Only the start sequence was written
        assert_eq!(timer.0.len(), 10);
        assert_eq!(port.0, [0x08, 0x08, 0x08]);
    }

    #[test]
    fn test_edge_pair_retunes_once() {
        let table = FrequencyTable::build();
        let selector = SelectorState::new();
        let fault = FaultState::new();
        let log = LogStream::new();
        let shared = Shared { table: &table, selector: &selector, fault: &fault, log: &log };

        let mut controller = Controller::new(shared, Recorder::default(), Port::default());
        controller.start().unwrap();

        selector.on_edge(EdgeEvent);
        selector.on_edge(EdgeEvent);

        match controller.poll() {
            PollOutcome::Retuned(settings) => {
                assert_eq!(settings.top, 43199);
                assert_eq!(settings.clock_select, 3);
            }
            other => panic!("expected retune, got {:?}", other),
        }
        assert_eq!(controller.poll(), PollOutcome::Unchanged);
        assert_eq!(controller.previous(), CompositeState::from_step(1));
    }
}
