//! Structured logging setup and NDJSON report lines.

mod format;

pub use format::StructuredLogger;
