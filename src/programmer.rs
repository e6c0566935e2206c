//! Timer1 output programmer.
//!
//! Retunes the two compare outputs to a frequency table entry without
//! letting the counter run on a half-written configuration.
//!
//! Write order:
//! ```text
//! 1. TCCR1B = CTC(ICR1), no clock      TCCR1A = toggle A/B
//! 2. ICR1 = divisor   OCR1A = 2 %      OCR1B = 51 %
//! 3. TCNT1 = 0
//! 4. TCCR1A = clear A/B   TCCR1C = force A/B   TCCR1A = toggle A/B
//! 5. TCCR1B = CTC(ICR1) | prescaler    (counter starts)
//! ```
//! Step 4 drives both outputs low before toggling resumes, so the compare
//! offset alone fixes the phase between OC1A and OC1B.

use crate::frequency::FrequencyEntry;

/// Timer1 register addresses (ATmega328P data space).
pub mod regs {
    pub const TCCR1A: u8 = 0x80;
    pub const TCCR1B: u8 = 0x81;
    pub const TCCR1C: u8 = 0x82;
    pub const TCNT1: u8 = 0x84;
    pub const ICR1: u8 = 0x86;
    pub const OCR1A: u8 = 0x88;
    pub const OCR1B: u8 = 0x8A;
}

/// Timer1 control bits.
pub mod bits {
    // TCCR1A
    pub const COM1A1: u8 = 1 << 7;
    pub const COM1A0: u8 = 1 << 6;
    pub const COM1B1: u8 = 1 << 5;
    pub const COM1B0: u8 = 1 << 4;
    // TCCR1B
    pub const WGM13: u8 = 1 << 4;
    pub const WGM12: u8 = 1 << 3;
    // TCCR1C
    pub const FOC1A: u8 = 1 << 7;
    pub const FOC1B: u8 = 1 << 6;

    /// Both outputs toggle on compare match.
    pub const TOGGLE_AB: u8 = COM1A0 | COM1B0;
    /// Both outputs clear on compare match (and on force).
    pub const CLEAR_AB: u8 = COM1A1 | COM1B1;
    /// CTC mode with ICR1 as TOP (mode 12).
    pub const CTC_ICR: u8 = WGM13 | WGM12;
    /// Force compare on both channels.
    pub const FORCE_AB: u8 = FOC1A | FOC1B;
}

/// Register-level access to a 16-bit timer.
///
/// 8-bit control registers take the low byte of `value`; 16-bit registers
/// (TCNT1, ICR1, OCR1A, OCR1B) take all of it.
pub trait TimerBus {
    fn write(&mut self, reg: u8, value: u16);
}

impl<T: TimerBus + ?Sized> TimerBus for &mut T {
    #[inline]
    fn write(&mut self, reg: u8, value: u16) {
        (**self).write(reg, value)
    }
}

/// Programming error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramError {
    /// Divisor does not fit the 16-bit period register.
    DivisorOutOfRange,
}

/// Timer values derived from a table entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerSettings {
    pub top: u16,
    pub compare_a: u16,
    pub compare_b: u16,
    pub clock_select: u8,
}

impl TimerSettings {
    /// Derive register values. Fails if the divisor exceeds 16 bits.
    pub fn from_entry(entry: &FrequencyEntry) -> Result<Self, ProgramError> {
        let top = u16::try_from(entry.divisor).map_err(|_| ProgramError::DivisorOutOfRange)?;
        // Both compare values are below the divisor, so they fit too
        Ok(Self {
            top,
            compare_a: entry.compare_a() as u16,
            compare_b: entry.compare_b() as u16,
            clock_select: entry.prescaler_selector(),
        })
    }
}

/// Output programmer bound to one timer.
pub struct OutputProgrammer<T: TimerBus> {
    timer: T,
    active: Option<TimerSettings>,
}

impl<T: TimerBus> OutputProgrammer<T> {
    pub fn new(timer: T) -> Self {
        Self { timer, active: None }
    }

    /// Retune to `entry`.
    ///
    /// On error no register is touched and the running output is unchanged.
    pub fn program(&mut self, entry: &FrequencyEntry) -> Result<TimerSettings, ProgramError> {
        use bits::*;
        use regs::*;

        let settings = TimerSettings::from_entry(entry)?;

        // 1. Stop: CTC mode, no clock source
        self.timer.write(TCCR1B, CTC_ICR as u16);
        self.timer.write(TCCR1A, TOGGLE_AB as u16);

        // 2. Period and compare points
        self.timer.write(ICR1, settings.top);
        self.timer.write(OCR1A, settings.compare_a);
        self.timer.write(OCR1B, settings.compare_b);

        // 3. Restart count
        self.timer.write(TCNT1, 0);

        // 4. Force both outputs low, then resume toggling
        self.timer.write(TCCR1A, CLEAR_AB as u16);
        self.timer.write(TCCR1C, FORCE_AB as u16);
        self.timer.write(TCCR1A, TOGGLE_AB as u16);

        // 5. Clock source last: counter starts here
        self.timer
            .write(TCCR1B, (CTC_ICR | settings.clock_select) as u16);

        self.active = Some(settings);
        Ok(settings)
    }

    /// Settings of the last successful `program`.
    #[inline]
    pub fn active(&self) -> Option<TimerSettings> {
        self.active
    }

    /// Borrow the underlying timer.
    #[inline]
    pub fn timer(&self) -> &T {
        &self.timer
    }
}
