//! # wheelrx: single-threaded Reactive Extensions for Rust
//!
//! A small, dependency-light implementation of the
//! [Reactive Extensions](http://reactivex.io/) contract for one thread.
//!
//! ## Quick Start
//!
//! ```rust
//! use wheelrx::prelude::*;
//!
//! from_iter::<_, RxError>(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe_next(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Cold, lazily executed producer of values |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscriber`] | The closable observer handed to a producer |
//! | [`Subscription`] | Composite handle that cancels an active subscription |
//! | [`Subject`] | Hot multicast source that is both observer and observable |
//! | [`TimeSource`] | Clock used by `timer`, `interval` and `delay` |
//!
//! Everything is `Rc` based; observables, subscriptions and subjects are not
//! `Send`.
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `LocalPoolScheduler`, a time source
//!   driven by a `futures` local executor
//! - **`tokio-scheduler`**: `TokioScheduler`, a time source for a tokio
//!   current-thread runtime inside a `LocalSet`
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`Subscriber`]: subscriber::Subscriber
//! [`Subscription`]: subscription::Subscription
//! [`Subject`]: subject::Subject
//! [`TimeSource`]: scheduler::TimeSource

pub mod error;
pub mod event;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod scheduler;
pub mod subject;
pub mod subscriber;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;

#[cfg(doctest)]
mod __markdown_doctests {
  mod readme {
    #![doc = include_str!("../README.md")]
  }
}
