//! Frequency table tests

use phase_shifter::config::CONFIG;
use phase_shifter::frequency::{ClockSelect, FrequencyTable, TABLE_SIZE, TUNING};
use phase_shifter::sequencer::StateSequencer;
use phase_shifter::state::CompositeState;

const EXPECTED: [(u32, u8); 20] = [
    (21599, 4),
    (43199, 3),
    (21599, 3),
    (14399, 3),
    (10799, 3),
    (8639, 3),
    (34559, 2),
    (17279, 2),
    (11519, 2),
    (8639, 2),
    (55295, 1),
    (27647, 1),
    (13823, 1),
    (9215, 1),
    (6911, 1),
    (5529, 1),
    (2764, 1),
    (1381, 1),
    (921, 1),
    (690, 1),
];

#[test]
fn test_table_size() {
    let table = FrequencyTable::build();
    assert_eq!(table.len(), 20);
    assert_eq!(TABLE_SIZE, 20);
    assert!(!table.is_empty());
}

#[test]
fn test_tuning_verbatim() {
    for (tuning, &(divisor, code)) in TUNING.iter().zip(EXPECTED.iter()) {
        assert_eq!(tuning.divisor, divisor);
        assert_eq!(tuning.prescaler.code(), code);
    }
}

#[test]
fn test_one_entry_per_sequencer_key() {
    let table = FrequencyTable::build();

    for (step, key) in StateSequencer::new().enumerate() {
        let entry = table.lookup(key).expect("every sequenced key has an entry");
        assert_eq!(entry.key, key);
        assert_eq!((entry.divisor, entry.prescaler_selector()), EXPECTED[step]);
        assert_eq!(table.position(key), Some(step));
    }
}

#[test]
fn test_compare_values() {
    let table = FrequencyTable::build();

    for entry in table.entries() {
        let a = (entry.divisor * 2) as f64 / 100.0;
        let b = (entry.divisor * 51) as f64 / 100.0;
        assert_eq!(entry.compare_a(), a.round() as u32, "divisor {}", entry.divisor);
        assert_eq!(entry.compare_b(), b.round() as u32, "divisor {}", entry.divisor);
        assert!(entry.compare_a() < entry.divisor);
        assert!(entry.compare_b() < entry.divisor);
        assert!(entry.compare_a() < entry.compare_b());
    }
}

#[test]
fn test_frequencies_follow_digit_and_decade() {
    let table = FrequencyTable::build();

    for entry in table.entries() {
        let (base, multiplier) = entry.key.split().unwrap();
        let target_mhz = base.digit() as u32 * multiplier.decade() as u32 * 1000;
        let actual_mhz = entry.frequency_millihertz(CONFIG.cpu_hz);

        // Within 0.1 % of the nominal frequency
        let error = actual_mhz.abs_diff(target_mhz);
        assert!(
            error * 1000 <= target_mhz,
            "key {:#04x}: {} mHz vs {} mHz",
            entry.key.bits(),
            actual_mhz,
            target_mhz
        );
    }
}

#[test]
fn test_low_decades_are_exact() {
    // Up to 800 Hz the divisors land exactly; from 1 kHz on they round
    let table = FrequencyTable::build();
    let exact: Vec<u32> = table.entries()[..15]
        .iter()
        .map(|e| e.frequency_millihertz(CONFIG.cpu_hz))
        .collect();
    assert_eq!(
        exact,
        [
            1_000, 2_000, 4_000, 6_000, 8_000, 10_000, 20_000, 40_000, 60_000, 80_000, 100_000,
            200_000, 400_000, 600_000, 800_000,
        ]
    );
}

#[test]
fn test_unknown_keys_miss() {
    let table = FrequencyTable::build();
    for bits in [0x00u8, 0x01, 0x07, 0x18, 0x0B, 0xFF] {
        assert!(table.lookup(CompositeState::from_bits(bits)).is_none(), "{:#04x}", bits);
    }
}

#[test]
fn test_first_entry_is_power_on_state() {
    let table = FrequencyTable::build();
    assert_eq!(table.first().key, CompositeState::INITIAL);
    assert_eq!(table.first().prescaler, ClockSelect::Div256);
}
