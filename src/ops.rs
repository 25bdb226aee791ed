//! Operators: functions from one [`Observable`] to another.
//!
//! Every operator is available two ways. The free functions return an
//! operator closure for [`Observable::pipe`] or the [`pipe!`](crate::pipe)
//! macro, and the methods on [`Observable`] chain directly:
//!
//! ```rust
//! use wheelrx::{pipe, prelude::*};
//!
//! let piped = pipe!(
//!   from_iter::<_, RxError>(1..=10),
//!   filter(|v: &i32| v % 2 == 0),
//!   map(|v: i32| v * 10),
//!   take(3)
//! );
//! let chained = from_iter::<_, RxError>(1..=10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 10)
//!   .take(3);
//! # let _ = (piped, chained);
//! ```

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  scheduler::{Due, TimeSource},
  subscriber::Subscriber,
  subscription::Teardown,
};

pub mod catch_error;
pub mod concat;
pub mod delay;
pub mod end_with;
pub mod filter;
pub mod finalize;
pub mod map;
pub mod merge;
pub mod retry;
pub mod skip;
pub mod start_with;
pub mod take;
pub mod take_until;
pub mod take_while;
pub mod tap;

pub use catch_error::catch_error;
pub use concat::{concat, concat_all};
pub use delay::delay;
pub use end_with::end_with;
pub use filter::{filter, filter_indexed};
pub use finalize::finalize;
pub use map::{map, map_indexed};
pub use merge::{merge, merge_all, merge_map, merge_with_limit};
pub use retry::retry;
pub use skip::skip;
pub use start_with::start_with;
pub use take::take;
pub use take_until::take_until;
pub use take_while::take_while;
pub use tap::{tap, tap_all};

/// Apply operators left to right: `pipe!(source, a, b)` is
/// `source.pipe(a).pipe(b)`. Nothing is subscribed.
#[macro_export]
macro_rules! pipe {
  ($source:expr $(, $op:expr)* $(,)?) => {
    $source $(.pipe($op))*
  };
}

/// Build an operator whose per-subscription state lives in one observer
/// placed between `source` and the downstream subscriber.
///
/// The source is subscribed inside the downstream subscription, so tearing
/// down (or completing) downstream cancels the source.
pub(crate) fn lift<In, ErrIn, Out, ErrOut, O>(
  source: Observable<In, ErrIn>, observer_for: impl Fn(Subscriber<Out, ErrOut>) -> O + 'static,
) -> Observable<Out, ErrOut>
where
  In: 'static,
  ErrIn: 'static,
  Out: 'static,
  ErrOut: 'static,
  O: Observer<In, ErrIn> + 'static,
{
  Observable::new(move |downstream: Subscriber<Out, ErrOut>| {
    source.subscribe_in(downstream.subscription(), observer_for(downstream.clone()));
    Ok(Teardown::empty())
  })
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// See [`map()`].
  pub fn map<Out: 'static>(self, project: impl Fn(Item) -> Out + 'static) -> Observable<Out, Err> {
    self.pipe(map(project))
  }

  /// See [`map_indexed()`].
  pub fn map_indexed<Out: 'static>(
    self, project: impl Fn(Item, usize) -> Out + 'static,
  ) -> Observable<Out, Err> {
    self.pipe(map_indexed(project))
  }

  /// See [`filter()`].
  pub fn filter(self, predicate: impl Fn(&Item) -> bool + 'static) -> Self {
    self.pipe(filter(predicate))
  }

  /// See [`filter_indexed()`].
  pub fn filter_indexed(self, predicate: impl Fn(&Item, usize) -> bool + 'static) -> Self {
    self.pipe(filter_indexed(predicate))
  }

  /// See [`tap()`].
  pub fn tap(self, effect: impl Fn(&Item) + 'static) -> Self { self.pipe(tap(effect)) }

  /// See [`tap_all()`].
  pub fn tap_all(
    self, next: impl Fn(&Item) + 'static, error: impl Fn(&Err) + 'static,
    complete: impl Fn() + 'static,
  ) -> Self {
    self.pipe(tap_all(next, error, complete))
  }

  /// See [`take()`].
  pub fn take(self, count: usize) -> Self { self.pipe(take(count)) }

  /// See [`take_while()`].
  pub fn take_while(self, predicate: impl Fn(&Item) -> bool + 'static) -> Self {
    self.pipe(take_while(predicate))
  }

  /// See [`take_until()`].
  pub fn take_until<N: 'static>(self, notifier: Observable<N, Err>) -> Self {
    self.pipe(take_until(notifier))
  }

  /// See [`skip()`].
  pub fn skip(self, count: usize) -> Self
  where
    Err: From<RxError>,
  {
    self.pipe(skip(count))
  }

  /// See [`delay()`].
  pub fn delay<S>(self, due: impl Into<Due>, scheduler: S) -> Self
  where
    S: TimeSource + Clone + 'static,
  {
    self.pipe(delay(due, scheduler))
  }

  /// See [`catch_error()`].
  pub fn catch_error<Err2: 'static>(
    self, selector: impl Fn(Err, Observable<Item, Err>) -> Observable<Item, Err2> + 'static,
  ) -> Observable<Item, Err2> {
    self.pipe(catch_error(selector))
  }

  /// See [`retry()`].
  pub fn retry(self, count: usize) -> Self { self.pipe(retry(count)) }

  /// See [`finalize()`].
  pub fn finalize(self, action: impl Fn() + 'static) -> Self { self.pipe(finalize(action)) }

  /// See [`merge_map()`].
  pub fn merge_map<Out: 'static>(
    self, project: impl Fn(Item) -> Observable<Out, Err> + 'static, limit: Option<usize>,
  ) -> Observable<Out, Err> {
    self.pipe(merge_map(project, limit))
  }
}

impl<Item: Clone + 'static, Err: 'static> Observable<Item, Err> {
  /// See [`start_with()`].
  pub fn start_with(self, values: Vec<Item>) -> Self { self.pipe(start_with(values)) }

  /// See [`end_with()`].
  pub fn end_with(self, values: Vec<Item>) -> Self { self.pipe(end_with(values)) }
}

impl<Item: 'static, Err: 'static> Observable<Observable<Item, Err>, Err> {
  /// See [`merge_all()`].
  pub fn merge_all(self, limit: Option<usize>) -> Observable<Item, Err> {
    self.pipe(merge_all(limit))
  }

  /// See [`concat_all()`].
  pub fn concat_all(self) -> Observable<Item, Err> { self.pipe(concat_all()) }
}
