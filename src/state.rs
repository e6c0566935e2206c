//! Module: state
//!
//! Purpose: Composite selection state shown on the status port. One byte,
//! formed by the union of a one-hot base digit (bits 3-7) and a decade
//! multiplier (bits 0-2).
//!
//! Architecture:
//! - `BaseField` and `MultiplierField` never share a bit, so the union is
//!   lossless and `CompositeState::split` recovers both halves
//! - `CompositeState::from_step` is the single authoritative enumeration of
//!   the 20 selectable states; the table builder and the runtime advancer
//!   both derive their positions from `BaseField::at` / `MultiplierField::at`
//!
//! Safety: Safe. No unsafe blocks. Copy types only.

/// Number of base digit positions (B0..B4).
pub const BASE_COUNT: u8 = 5;

/// Number of multiplier values (M0..M3).
pub const MULTIPLIER_COUNT: u8 = 4;

/// Number of selectable states (`BASE_COUNT × MULTIPLIER_COUNT`).
pub const STATE_COUNT: u8 = BASE_COUNT * MULTIPLIER_COUNT;

/// One-hot base digit.
///
/// Bit layout (status port lines 3-7):
/// ```text
/// B0 = 0x08  digit 1
/// B1 = 0x10  digit 2
/// B2 = 0x20  digit 4
/// B3 = 0x40  digit 6
/// B4 = 0x80  digit 8
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseField(u8);

impl BaseField {
    /// Bits owned by the base field.
    pub const MASK: u8 = 0xF8;

    /// First position (B0).
    pub const FIRST: Self = Self(0x08);

    /// Last position (B4).
    pub const LAST: Self = Self(0x80);

    /// Base value at `position` (wraps modulo `BASE_COUNT`).
    pub const fn at(position: u8) -> Self {
        Self(Self::FIRST.0 << (position % BASE_COUNT))
    }

    /// Ordinal position 0..5.
    pub const fn position(&self) -> u8 {
        (self.0 >> 3).trailing_zeros() as u8
    }

    /// Raw bits.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// True at B4, the position that wraps and carries into the multiplier.
    pub const fn is_last(&self) -> bool {
        self.0 >= Self::LAST.0
    }

    /// Next one-hot position. Does not wrap; callers check `is_last` first.
    pub const fn shifted(&self) -> Self {
        Self(self.0 << 1)
    }

    /// Decode raw bits. Exactly one bit of `MASK` must be set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK == 0 && bits.count_ones() == 1 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Leading digit this position selects (1, 2, 4, 6, 8).
    pub const fn digit(&self) -> u8 {
        match self.position() {
            0 => 1,
            1 => 2,
            2 => 4,
            3 => 6,
            _ => 8,
        }
    }
}

/// Decade multiplier.
///
/// M0 is zero; M1..M3 are one-hot on status port lines 0-2:
/// ```text
/// M0 = 0x00  x1
/// M1 = 0x01  x10
/// M2 = 0x02  x100
/// M3 = 0x04  x1000
/// ```
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MultiplierField(u8);

impl MultiplierField {
    /// Bits owned by the multiplier field.
    pub const MASK: u8 = 0x07;

    /// Zero multiplier (M0).
    pub const ZERO: Self = Self(0x00);

    /// First non-zero multiplier (M1).
    pub const FIRST: Self = Self(0x01);

    /// Last multiplier (M3).
    pub const LAST: Self = Self(0x04);

    /// Multiplier value at `position` (wraps modulo `MULTIPLIER_COUNT`).
    pub const fn at(position: u8) -> Self {
        match position % MULTIPLIER_COUNT {
            0 => Self::ZERO,
            p => Self(Self::FIRST.0 << (p - 1)),
        }
    }

    /// Ordinal position 0..4.
    pub const fn position(&self) -> u8 {
        if self.0 == 0 {
            0
        } else {
            self.0.trailing_zeros() as u8 + 1
        }
    }

    /// Raw bits.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// True at M3 or anything above it.
    pub const fn is_last(&self) -> bool {
        self.0 >= Self::LAST.0
    }

    /// True at M0.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Next one-hot position. M0 is handled by the caller.
    pub const fn shifted(&self) -> Self {
        Self(self.0 << 1)
    }

    /// Decode raw bits. Zero or exactly one bit of `MASK`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::MASK == 0 && bits.count_ones() <= 1 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Decade factor (1, 10, 100, 1000).
    pub const fn decade(&self) -> u16 {
        match self.position() {
            0 => 1,
            1 => 10,
            2 => 100,
            _ => 1000,
        }
    }
}

/// Composite selection state: `BaseField | MultiplierField`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompositeState(u8);

impl CompositeState {
    /// Power-on state: B0 with M0 (the 1 Hz entry).
    pub const INITIAL: Self = Self::union(BaseField::FIRST, MultiplierField::ZERO);

    /// Union of the two fields.
    pub const fn union(base: BaseField, multiplier: MultiplierField) -> Self {
        Self(base.bits() | multiplier.bits())
    }

    /// State at enumeration `step`.
    ///
    /// Multiplier is the outer loop, base the inner loop:
    /// steps 0-4 are B0..B4 with M0, steps 5-9 are B0..B4 with M1, and so on.
    /// Wraps modulo `STATE_COUNT`.
    pub const fn from_step(step: u8) -> Self {
        let step = step % STATE_COUNT;
        Self::union(
            BaseField::at(step % BASE_COUNT),
            MultiplierField::at(step / BASE_COUNT),
        )
    }

    /// Inverse of `from_step`. `None` for bytes that are not a valid union.
    pub const fn step(&self) -> Option<u8> {
        match self.split() {
            Some((base, multiplier)) => {
                Some(multiplier.position() * BASE_COUNT + base.position())
            }
            None => None,
        }
    }

    /// Recover both fields. `None` for bytes that are not a valid union.
    pub const fn split(&self) -> Option<(BaseField, MultiplierField)> {
        match (
            BaseField::from_bits(self.0 & BaseField::MASK),
            MultiplierField::from_bits(self.0 & MultiplierField::MASK),
        ) {
            (Some(base), Some(multiplier)) => Some((base, multiplier)),
            _ => None,
        }
    }

    /// Wrap a raw byte without validation (status port readback, tests).
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// Raw byte, one bit per status line.
    pub const fn bits(&self) -> u8 {
        self.0
    }
}

impl Default for CompositeState {
    fn default() -> Self {
        Self::INITIAL
    }
}

// ============================================================================
// Tests
// ============================================================================
