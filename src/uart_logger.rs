//! Log drain.
//!
//! Formats queued log entries onto any `ufmt::uWrite` sink. On target the
//! sink is USART0 TX on PD1 (feature `uart-log`); on host, stdout.
//!
//! # Hardware Setup
//!
//! ```text
//! ATmega328P PD1 (TXD) ──────▶ USB-UART RX
//!                              └─▶ PC Serial Monitor, 57600 8N1
//! ```
//!
//! **WARNING**: PD1 is also status line 1 (multiplier x100). With
//! `uart-log` enabled that line stops mirroring the selection.

use ufmt::{uWrite, uwrite};

use crate::logging::{LogEntry, LogStream};

/// Write one entry.
///
/// Format: `[tick] LEVEL: message\r\n`
pub fn write_log_entry<W: uWrite + ?Sized>(w: &mut W, entry: &LogEntry) -> Result<(), W::Error> {
    uwrite!(
        &mut *w,
        "[{}] {}: {}\r\n",
        entry.tick,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain every pending entry into `w`, then report and reset the drop
/// counter if anything was lost.
///
/// Returns the number of entries written.
pub fn drain_to<W: uWrite + ?Sized, const N: usize>(
    stream: &LogStream<N>,
    w: &mut W,
) -> Result<usize, W::Error> {
    let mut written = 0;
    while let Some(entry) = stream.drain() {
        write_log_entry(w, &entry)?;
        written += 1;
    }

    let dropped = stream.dropped();
    if dropped > 0 {
        uwrite!(&mut *w, "[WARN] Dropped: {}\r\n", dropped)?;
        stream.reset_dropped();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::{LogLevel, MAX_MSG_LEN};
    use core::convert::Infallible;

    struct Sink(Vec<u8>);

    impl uWrite for Sink {
        type Error = Infallible;

        fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
            self.0.extend_from_slice(s.as_bytes());
            Ok(())
        }
    }

    impl Sink {
        fn text(&self) -> &str {
            core::str::from_utf8(&self.0).unwrap()
        }
    }

    #[test]
    fn test_format_log_entry() {
        let entry = LogEntry {
            tick: 1234567,
            level: LogLevel::Info,
            len: 11,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..11].copy_from_slice(b"Hello world");
                msg
            },
        };

        let mut sink = Sink(Vec::new());
        write_log_entry(&mut sink, &entry).unwrap();
        assert_eq!(sink.text(), "[1234567] INFO: Hello world\r\n");
    }

    #[test]
    fn test_format_truncated_message() {
        let entry = LogEntry {
            tick: 999,
            level: LogLevel::Error,
            len: 5,
            msg: {
                let mut msg = [0u8; MAX_MSG_LEN];
                msg[..10].copy_from_slice(b"TEST12345X"); // Only first 5 used
                msg
            },
        };

        let mut sink = Sink(Vec::new());
        write_log_entry(&mut sink, &entry).unwrap();
        assert!(sink.text().contains("ERROR"));
        assert!(sink.text().contains("TEST1"));
        assert!(!sink.text().contains("X"));
    }

    #[test]
    fn test_drain_reports_drops() {
        let stream = LogStream::<2>::new();
        stream.push(1, LogLevel::Info, b"a");
        stream.push(2, LogLevel::Warn, b"b");
        stream.push(3, LogLevel::Warn, b"c"); // dropped

        let mut sink = Sink(Vec::new());
        assert_eq!(drain_to(&stream, &mut sink).unwrap(), 2);
        assert_eq!(
            sink.text(),
            "[1] INFO: a\r\n[2] WARN: b\r\n[WARN] Dropped: 1\r\n"
        );
        assert_eq!(stream.dropped(), 0);
        assert!(!stream.has_entries());
    }
}
