//! Global log stream instance.
//!
//! Single core, single stream: the main loop and the edge interrupt both
//! push here, the main loop drains.

use crate::logging::LogStream;

/// System log stream.
pub static LOG_STREAM: LogStream = LogStream::new();
