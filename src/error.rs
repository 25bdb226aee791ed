//! Errors raised by the engine itself.
//!
//! Streams carry their own error type. Operators that need to synthesise an
//! error (`range`, `skip`) only require `Err: From<RxError>`, so applications
//! can fold these variants into their own error enums.

/// Failures produced by creation functions and operators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RxError {
  /// `range(start, end)` was asked for an end below its start.
  #[error("range end {end} is below its start {start}")]
  OutOfRange { start: i64, end: i64 },

  /// `skip(count)` saw its source complete without forwarding anything.
  #[error("source completed before emitting past the first {count} value(s)")]
  NothingAfterSkip { count: usize },

  /// Free-form failure for application producers.
  #[error("{0}")]
  Failed(String),
}

impl RxError {
  pub fn failed(msg: impl Into<String>) -> Self { RxError::Failed(msg.into()) }
}
