//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types, traits and functions.

// Core types
pub use crate::error::RxError;
// Events
pub use crate::event::{EventHandler, EventHub, EventSource, HandlerId, ListenerOptions};
// Creation functions
pub use crate::observable::{
  defer, empty, from_event, from_iter, interval, never, of, range, throw_error, timer, Observable,
};
pub use crate::observer::{BoxedObserver, Observer, ObserverFns};
// Operators
pub use crate::ops::{
  catch_error, concat, concat_all, delay, end_with, filter, filter_indexed, finalize, map,
  map_indexed, merge, merge_all, merge_map, merge_with_limit, retry, skip, start_with, take,
  take_until, take_while, tap, tap_all,
};
// Schedulers
#[cfg(feature = "futures-scheduler")]
pub use crate::scheduler::LocalPoolScheduler;
#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioScheduler;
pub use crate::scheduler::{Due, Duration, TaskHandle, TestScheduler, TimeSource};
pub use crate::subject::Subject;
pub use crate::subscriber::Subscriber;
// Subscription
pub use crate::subscription::{
  ChildId, DynamicSubscriptions, Subscription, SubscriptionGuard, Teardown,
};
