//! PhaseShifter - Main entry point
//!
//! On the ATmega328P:
//! 1. Configure status port, select button and Timer1 outputs
//! 2. Build the frequency table and start at 1 Hz
//! 3. Enable interrupts; PCINT1 steps the selection
//! 4. Poll forever, retuning on change
//!
//! On a host build this prints the frequency table instead.

#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use phase_shifter::{
    hal::{button, PortdStatus, Timer1},
    Controller, EdgeEvent, FaultState, FrequencyTable, SelectorState, Shared, CONFIG, LOG_STREAM,
};

#[cfg(target_arch = "avr")]
static SELECTOR: SelectorState = SelectorState::new();

#[cfg(target_arch = "avr")]
static FAULT: FaultState = FaultState::new();

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let Some(dp) = avr_device::atmega328p::Peripherals::take() else {
        loop {}
    };

    let status = PortdStatus::new(dp.PORTD, CONFIG.status_mask);
    button::init(&dp.PORTC, &dp.EXINT, CONFIG.button_bit);
    let timer = Timer1::new(dp.TC1, &dp.PORTB, CONFIG.output_mask);

    let table = FrequencyTable::build();
    let shared = Shared {
        table: &table,
        selector: &SELECTOR,
        fault: &FAULT,
        log: &LOG_STREAM,
    };

    let mut controller = Controller::new(shared, timer, status);
    // Every table divisor fits 16 bits; a failure is already logged
    let _ = controller.start();

    // SAFETY: shared state is fully initialized and only reached through
    // critical sections from here on.
    unsafe { avr_device::interrupt::enable() };

    #[cfg(feature = "uart-log")]
    let mut uart = {
        let mut uart = phase_shifter::hal::LogUart::new(dp.USART0, CONFIG.ubrr());
        let _ = ufmt::uwrite!(&mut uart, "{}\r\n", env!("VERSION_STRING"));
        uart
    };

    controller.run(move |_| {
        #[cfg(feature = "uart-log")]
        let _ = phase_shifter::uart_logger::drain_to(&LOG_STREAM, &mut uart);
    })
}

/// Select button: any level change on PC5.
#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega328p)]
fn PCINT1() {
    SELECTOR.on_edge(EdgeEvent);
}

#[cfg(not(target_arch = "avr"))]
fn main() {
    use phase_shifter::{FrequencyTable, CONFIG};

    println!("{}", env!("VERSION_STRING"));
    println!("clock {} Hz", CONFIG.cpu_hz);
    println!("step  key   ICR1   CS  OCR1A  OCR1B  frequency");

    let table = FrequencyTable::build();
    for (step, entry) in table.entries().iter().enumerate() {
        let mhz = entry.frequency_millihertz(CONFIG.cpu_hz);
        println!(
            "{:>4}  0x{:02X}  {:>5}  {:>2}  {:>5}  {:>5}  {:>5}.{:03} Hz",
            step,
            entry.key.bits(),
            entry.divisor,
            entry.prescaler_selector(),
            entry.compare_a(),
            entry.compare_b(),
            mhz / 1000,
            mhz % 1000,
        );
    }
}
