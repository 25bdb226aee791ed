//! Time sources consumed by `timer`, `interval` and `delay`.
//!
//! The engine never sleeps itself. It asks a [`TimeSource`] to run a callback
//! later and keeps the returned [`TaskHandle`] so the callback can be
//! cancelled when the owning subscription is torn down.

pub use std::time::Duration;

#[cfg(feature = "futures-scheduler")]
mod local_pool;
pub mod test_scheduler;
#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;

#[cfg(feature = "futures-scheduler")]
pub use local_pool::LocalPoolScheduler;
pub use test_scheduler::TestScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioScheduler;

/// Identifies one scheduled callback of a [`TimeSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(pub(crate) u64);

/// A clock plus a way to run callbacks after a delay.
///
/// Implementations run callbacks on the same logical thread that scheduled
/// them. Callbacks with equal deadlines run in scheduling order.
pub trait TimeSource {
  /// Time elapsed since this source's epoch.
  fn now(&self) -> Duration;

  /// Run `task` once, `delay` from now.
  fn schedule_after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle;

  /// Drop a pending task. Cancelling a finished or unknown task is a no-op.
  fn cancel(&self, handle: TaskHandle);
}

/// When a delayed value should be re-emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Due {
  /// A relative delay from the moment the value arrives.
  After(Duration),
  /// An absolute point on the time source's clock. Points already in the
  /// past re-emit on the next scheduler turn.
  At(Duration),
}

impl Due {
  /// How long to wait, measured from `now`.
  pub fn wait_from(self, now: Duration) -> Duration {
    match self {
      Due::After(delay) => delay,
      Due::At(point) => point.saturating_sub(now),
    }
  }
}

impl From<Duration> for Due {
  fn from(delay: Duration) -> Self { Due::After(delay) }
}
