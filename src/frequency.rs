//! Frequency table.
//!
//! Pairs each composite state, in selection order, with a hand-tuned Timer1
//! configuration. Timer1 runs in CTC mode with ICR1 as TOP and both compare
//! outputs toggling, so one output period spans two timer periods:
//!
//! ```text
//! f_out = F_CPU / (2 × N × (ICR1 + 1))
//! ```
//!
//! The tuning values assume an 11.0592 MHz clock and must stay verbatim.

use crate::config::CONFIG;
use crate::sequencer::StateSequencer;
use crate::state::{CompositeState, STATE_COUNT};

/// Number of table entries.
pub const TABLE_SIZE: usize = STATE_COUNT as usize;

/// Timer1 clock select (CS12:CS10).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ClockSelect {
    /// No clock: counter stopped.
    Stopped = 0,
    /// clk/1
    Direct = 1,
    /// clk/8
    Div8 = 2,
    /// clk/64
    Div64 = 3,
    /// clk/256
    Div256 = 4,
    /// clk/1024
    Div1024 = 5,
}

impl ClockSelect {
    /// Convert from the raw 3-bit code. External clock codes (6, 7) are rejected.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ClockSelect::Stopped),
            1 => Some(ClockSelect::Direct),
            2 => Some(ClockSelect::Div8),
            3 => Some(ClockSelect::Div64),
            4 => Some(ClockSelect::Div256),
            5 => Some(ClockSelect::Div1024),
            _ => None,
        }
    }

    /// Raw 3-bit code as written to TCCR1B.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Clock divider N. Zero when stopped.
    pub const fn divider(self) -> u32 {
        match self {
            ClockSelect::Stopped => 0,
            ClockSelect::Direct => 1,
            ClockSelect::Div8 => 8,
            ClockSelect::Div64 => 64,
            ClockSelect::Div256 => 256,
            ClockSelect::Div1024 => 1024,
        }
    }
}

/// One literal tuning pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    /// Period reload value (ICR1).
    pub divisor: u32,
    /// Clock divider selection.
    pub prescaler: ClockSelect,
}

const fn tuning(divisor: u32, prescaler: ClockSelect) -> Tuning {
    Tuning { divisor, prescaler }
}

/// Tuning pairs in selection order.
///
/// Base digit {1, 2, 4, 6, 8} times decade {1, 10, 100, 1000} Hz.
pub const TUNING: [Tuning; TABLE_SIZE] = [
    tuning(21599, ClockSelect::Div256), // 1 Hz
    tuning(43199, ClockSelect::Div64),  // 2 Hz
    tuning(21599, ClockSelect::Div64),  // 4 Hz
    tuning(14399, ClockSelect::Div64),  // 6 Hz
    tuning(10799, ClockSelect::Div64),  // 8 Hz
    tuning(8639, ClockSelect::Div64),   // 10 Hz
    tuning(34559, ClockSelect::Div8),   // 20 Hz
    tuning(17279, ClockSelect::Div8),   // 40 Hz
    tuning(11519, ClockSelect::Div8),   // 60 Hz
    tuning(8639, ClockSelect::Div8),    // 80 Hz
    tuning(55295, ClockSelect::Direct), // 100 Hz
    tuning(27647, ClockSelect::Direct), // 200 Hz
    tuning(13823, ClockSelect::Direct), // 400 Hz
    tuning(9215, ClockSelect::Direct),  // 600 Hz
    tuning(6911, ClockSelect::Direct),  // 800 Hz
    tuning(5529, ClockSelect::Direct),  // 1 kHz
    tuning(2764, ClockSelect::Direct),  // 2 kHz (1999.9 Hz)
    tuning(1381, ClockSelect::Direct),  // 4 kHz (4001.2 Hz)
    tuning(921, ClockSelect::Direct),   // 6 kHz (5997.4 Hz)
    tuning(690, ClockSelect::Direct),   // 8 kHz (8002.3 Hz)
];

/// Compare value at `percent` of `divisor`, rounded half up.
#[inline]
pub const fn compare_value(divisor: u32, percent: u32) -> u32 {
    ((divisor as u64 * percent as u64 + 50) / 100) as u32
}

/// A selectable frequency.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrequencyEntry {
    /// Composite state that selects this entry.
    pub key: CompositeState,
    /// Period reload value (ICR1).
    pub divisor: u32,
    /// Clock divider selection.
    pub prescaler: ClockSelect,
}

impl FrequencyEntry {
    /// Raw 3-bit prescaler selector code.
    #[inline]
    pub const fn prescaler_selector(&self) -> u8 {
        self.prescaler.code()
    }

    /// OCR1A value: `round(divisor × 0.02)`.
    #[inline]
    pub const fn compare_a(&self) -> u32 {
        compare_value(self.divisor, CONFIG.compare_a_percent)
    }

    /// OCR1B value: `round(divisor × 0.51)`.
    #[inline]
    pub const fn compare_b(&self) -> u32 {
        compare_value(self.divisor, CONFIG.compare_b_percent)
    }

    /// Output frequency in mHz for a timer clocked at `cpu_hz`.
    ///
    /// Returns 0 when the prescaler is `Stopped`.
    pub const fn frequency_millihertz(&self, cpu_hz: u32) -> u32 {
        let n = self.prescaler.divider() as u64;
        if n == 0 {
            return 0;
        }
        let ticks = 2 * n * (self.divisor as u64 + 1);
        ((cpu_hz as u64 * 1000 + ticks / 2) / ticks) as u32
    }
}

/// Lookup table from composite state to timer configuration.
///
/// Built once at startup, immutable afterwards. Lookup is a linear scan.
#[derive(Clone, Debug)]
pub struct FrequencyTable {
    entries: [FrequencyEntry; TABLE_SIZE],
}

impl FrequencyTable {
    /// Build the table by walking `StateSequencer` and consuming `TUNING`
    /// in order.
    pub fn build() -> Self {
        let mut entries = [FrequencyEntry {
            key: CompositeState::INITIAL,
            divisor: 0,
            prescaler: ClockSelect::Stopped,
        }; TABLE_SIZE];

        for ((slot, key), tuning) in entries
            .iter_mut()
            .zip(StateSequencer::new())
            .zip(TUNING.iter())
        {
            *slot = FrequencyEntry {
                key,
                divisor: tuning.divisor,
                prescaler: tuning.prescaler,
            };
        }

        Self { entries }
    }

    /// Find the entry for `key`.
    pub fn lookup(&self, key: CompositeState) -> Option<&FrequencyEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Index of the entry for `key`.
    pub fn position(&self, key: CompositeState) -> Option<usize> {
        self.entries.iter().position(|entry| entry.key == key)
    }

    /// Power-on entry (step 0).
    #[inline]
    pub fn first(&self) -> &FrequencyEntry {
        &self.entries[0]
    }

    /// All entries in selection order.
    #[inline]
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::build()
    }
}
