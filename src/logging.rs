//! Interrupt-safe logging for the phase shifter.
//!
//! # Architecture
//!
//! ```text
//! Main loop / ISR         LogStream            Log drain
//! ───────────────         ─────────            ─────────
//!
//! rt_log!() ──────────▶ [L0][L1][L2] ──────▶ uWrite sink
//! short critical         bounded ring         USART0 (uart-log)
//! section, no block      drops when full      or host stdout
//! ```
//!
//! # Rules
//!
//! - Producers never block; a full ring drops the message and counts it
//! - Formatting uses `ufmt`, never `core::fmt` (code size on AVR)
//! - Timestamps are main loop ticks, not wall time

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use heapless::Deque;

/// Maximum message length.
pub const MAX_MSG_LEN: usize = 40;

/// Log buffer size (number of entries). Sized for 2 KiB of SRAM.
pub const LOG_BUFFER_SIZE: usize = 8;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// Convert to string for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Main loop tick at push time.
    pub tick: u32,
    /// Log level.
    pub level: LogLevel,
    /// Message length.
    pub len: u8,
    /// Message bytes (not null-terminated).
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    /// Message text.
    pub fn message(&self) -> &str {
        core::str::from_utf8(&self.msg[..self.len as usize]).unwrap_or("<invalid utf8>")
    }
}

struct Ring<const N: usize> {
    entries: Deque<LogEntry, N>,
    dropped: u32,
}

/// Bounded log stream (multiple producers, single consumer).
///
/// - Push from main loop or ISR, never blocks
/// - Drops message if full
/// - Drain runs from the main loop at leisure
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    inner: Mutex<RefCell<Ring<N>>>,
}

impl<const N: usize> LogStream<N> {
    /// Create a new empty log stream.
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Ring {
                entries: Deque::new(),
                dropped: 0,
            })),
        }
    }

    /// Push a log entry.
    ///
    /// Returns `true` if message was queued, `false` if dropped (ring full).
    /// Messages longer than `MAX_MSG_LEN` are truncated.
    pub fn push(&self, tick: u32, level: LogLevel, msg: &[u8]) -> bool {
        let len = msg.len().min(MAX_MSG_LEN);
        let mut entry = LogEntry {
            tick,
            level,
            len: len as u8,
            msg: [0; MAX_MSG_LEN],
        };
        entry.msg[..len].copy_from_slice(&msg[..len]);

        critical_section::with(|cs| {
            let mut ring = self.inner.borrow_ref_mut(cs);
            if ring.entries.push_back(entry).is_err() {
                ring.dropped = ring.dropped.wrapping_add(1);
                return false;
            }
            true
        })
    }

    /// Drain next log entry.
    ///
    /// Returns `None` if no entries available.
    pub fn drain(&self) -> Option<LogEntry> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).entries.pop_front())
    }

    /// Get count of dropped messages.
    pub fn dropped(&self) -> u32 {
        critical_section::with(|cs| self.inner.borrow_ref(cs).dropped)
    }

    /// Reset dropped counter (e.g., after reporting).
    pub fn reset_dropped(&self) {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).dropped = 0);
    }

    /// Check if there are entries to drain.
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Get number of entries waiting to be drained.
    pub fn pending(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).entries.len())
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-size `uWrite` target for formatting one message.
///
/// Output beyond `MAX_MSG_LEN` is silently truncated.
pub struct MsgBuf {
    buf: [u8; MAX_MSG_LEN],
    pos: usize,
}

impl MsgBuf {
    pub const fn new() -> Self {
        Self {
            buf: [0; MAX_MSG_LEN],
            pos: 0,
        }
    }

    /// Formatted bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

impl Default for MsgBuf {
    fn default() -> Self {
        Self::new()
    }
}

impl ufmt::uWrite for MsgBuf {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Infallible> {
        let bytes = s.as_bytes();
        let to_write = bytes.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + to_write].copy_from_slice(&bytes[..to_write]);
        self.pos += to_write;
        Ok(())
    }
}

/// Interrupt-safe log macro.
///
/// # Example
///
/// ```ignore
/// rt_log!(LogLevel::Info, LOG_STREAM, tick, "step {} key {}", step, key);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $tick:expr, $($arg:tt)*) => {{
        let mut buf = $crate::logging::MsgBuf::new();
        let _ = ufmt::uwrite!(&mut buf, $($arg)*);
        $stream.push($tick, $level, buf.as_bytes())
    }};
}

/// Info log.
#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $tick:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $tick, $($arg)*)
    };
}

/// Warning log.
#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $tick:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $tick, $($arg)*)
    };
}

/// Error log.
#[macro_export]
macro_rules! rt_error {
    ($stream:expr, $tick:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $stream, $tick, $($arg)*)
    };
}

/// Debug log.
#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $tick:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $tick, $($arg)*)
    };
}

/// Trace log.
#[macro_export]
macro_rules! rt_trace {
    ($stream:expr, $tick:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Trace, $stream, $tick, $($arg)*)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_stream_basic() {
        let stream = LogStream::<4>::new();

        assert!(stream.push(1000, LogLevel::Info, b"test message"));
        assert!(stream.has_entries());
        assert_eq!(stream.pending(), 1);

        let entry = stream.drain().unwrap();
        assert_eq!(entry.tick, 1000);
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message(), "test message");

        assert!(!stream.has_entries());
    }

    #[test]
    fn test_log_stream_full() {
        let stream = LogStream::<4>::new();

        assert!(stream.push(1, LogLevel::Info, b"1"));
        assert!(stream.push(2, LogLevel::Info, b"2"));
        assert!(stream.push(3, LogLevel::Info, b"3"));
        assert!(stream.push(4, LogLevel::Info, b"4"));

        // Should drop
        assert!(!stream.push(5, LogLevel::Info, b"5"));
        assert_eq!(stream.dropped(), 1);

        // Drain one, should be able to push again
        assert_eq!(stream.drain().map(|e| e.tick), Some(1));
        assert!(stream.push(6, LogLevel::Info, b"6"));

        stream.reset_dropped();
        assert_eq!(stream.dropped(), 0);
    }

    #[test]
    fn test_long_message_truncated() {
        let stream = LogStream::<2>::new();
        let long = [b'x'; MAX_MSG_LEN + 10];
        stream.push(0, LogLevel::Debug, &long);
        assert_eq!(stream.drain().unwrap().len as usize, MAX_MSG_LEN);
    }

    #[test]
    fn test_macro_formats() {
        let stream = LogStream::<2>::new();
        assert!(rt_info!(stream, 7, "step {} key {}", 5u8, 0x09u8));
        let entry = stream.drain().unwrap();
        assert_eq!(entry.message(), "step 5 key 9");
        assert_eq!(entry.level, LogLevel::Info);
    }

    #[test]
    fn test_level_macros() {
        let stream = LogStream::<4>::new();
        rt_debug!(stream, 1, "d");
        rt_trace!(stream, 2, "t");
        rt_error!(stream, 3, "e");
        let levels: Vec<LogLevel> = core::iter::from_fn(|| stream.drain())
            .map(|e| e.level)
            .collect();
        assert_eq!(levels, [LogLevel::Debug, LogLevel::Trace, LogLevel::Error]);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert!(LogLevel::Debug < LogLevel::Trace);
    }
}
