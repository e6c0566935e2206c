//! Fault state management for the phase shifter.
//!
//! # Philosophy
//!
//! > A running signal at the old frequency is better than a corrupted one.
//!
//! Nothing here stops the output. A fault records why the main loop declined
//! to retune; the previous timer configuration keeps running.

use core::cell::Cell;

use critical_section::Mutex;

/// Fault codes indicating why a retune was skipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault (normal operation).
    None = 0,

    /// Composite state has no frequency table entry.
    /// Data holds the raw composite byte.
    UnknownKey = 1,

    /// Table divisor does not fit the 16-bit timer.
    /// Data holds the divisor.
    DivisorOutOfRange = 2,
}

impl FaultCode {
    /// Short name for log output.
    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::UnknownKey => "unknown key",
            FaultCode::DivisorOutOfRange => "divisor out of range",
        }
    }
}

/// Snapshot of fault state at a point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}

impl FaultSnapshot {
    const CLEAR: Self = Self {
        active: false,
        code: FaultCode::None,
        data: 0,
        count: 0,
    };
}

/// Interrupt-safe fault state.
///
/// Set by the main loop when a retune is skipped, readable from any context.
///
/// # Usage
///
/// ```ignore
/// static FAULT: FaultState = FaultState::new();
///
/// // In main loop:
/// if table.lookup(current).is_none() {
///     FAULT.set(FaultCode::UnknownKey, current.bits() as u32);
/// }
/// ```
pub struct FaultState {
    inner: Mutex<Cell<FaultSnapshot>>,
}

impl FaultState {
    /// Create new fault state (no fault).
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(FaultSnapshot::CLEAR)),
        }
    }

    /// Set fault state.
    ///
    /// Marks the fault active with the given code and data and increments
    /// the fault counter.
    pub fn set(&self, code: FaultCode, data: u32) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let prev = cell.get();
            cell.set(FaultSnapshot {
                active: true,
                code,
                data,
                count: prev.count.wrapping_add(1),
            });
        });
    }

    /// Check if fault is currently active.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.snapshot().active
    }

    /// Get fault code (only meaningful if `is_active()` is true).
    #[inline]
    pub fn code(&self) -> FaultCode {
        self.snapshot().code
    }

    /// Get fault data (meaning depends on fault code).
    #[inline]
    pub fn data(&self) -> u32 {
        self.snapshot().data
    }

    /// Get total fault count since boot.
    #[inline]
    pub fn count(&self) -> u32 {
        self.snapshot().count
    }

    /// Clear fault state (after a successful retune).
    ///
    /// Note: This clears the active flag but does NOT reset the counter.
    pub fn clear(&self) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut snap = cell.get();
            snap.active = false;
            cell.set(snap);
        });
    }

    /// Get a snapshot of the current fault state.
    #[inline]
    pub fn snapshot(&self) -> FaultSnapshot {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_state_basic() {
        let fault = FaultState::new();

        assert!(!fault.is_active());
        assert_eq!(fault.code(), FaultCode::None);
        assert_eq!(fault.count(), 0);

        fault.set(FaultCode::UnknownKey, 0x18);

        assert!(fault.is_active());
        assert_eq!(fault.code(), FaultCode::UnknownKey);
        assert_eq!(fault.data(), 0x18);
        assert_eq!(fault.count(), 1);

        fault.clear();

        assert!(!fault.is_active());
        assert_eq!(fault.count(), 1); // Count preserved
    }

    #[test]
    fn test_fault_count_accumulates() {
        let fault = FaultState::new();

        fault.set(FaultCode::UnknownKey, 1);
        fault.clear();
        fault.set(FaultCode::DivisorOutOfRange, 70_000);
        fault.clear();
        fault.set(FaultCode::UnknownKey, 3);

        assert_eq!(fault.count(), 3);
        assert_eq!(fault.code(), FaultCode::UnknownKey);
    }

    #[test]
    fn test_code_names() {
        assert_eq!(FaultCode::UnknownKey.as_str(), "unknown key");
        assert_eq!(FaultCode::DivisorOutOfRange.as_str(), "divisor out of range");
    }
}
