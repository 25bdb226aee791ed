//! The cold [`Observable`] and its creation functions.

use std::rc::Rc;

use crate::{
  error::RxError,
  observer::{Observer, ObserverFns},
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

mod defer;
mod from_event;
mod from_iter;
mod range;
mod timer;
mod trivial;
pub use defer::defer;
pub use from_event::from_event;
pub use from_iter::{from_iter, of};
pub use range::range;
pub use timer::{interval, timer};
pub use trivial::{empty, never, throw_error};

type Producer<Item, Err> = dyn Fn(Subscriber<Item, Err>) -> Result<Teardown, Err>;

/// A lazily executed producer of values.
///
/// Nothing runs until [`subscribe`](Observable::subscribe) is called, and each
/// call runs the producer again, independently. Cloning shares the producer.
///
/// ```rust
/// use wheelrx::prelude::*;
///
/// let numbers = Observable::<i32>::new(|subscriber| {
///   subscriber.next(1);
///   subscriber.next(2);
///   subscriber.complete();
///   Ok(Teardown::empty())
/// });
///
/// numbers
///   .map(|v| v * 10)
///   .subscribe_next(|v| println!("{v}"));
/// ```
pub struct Observable<Item, Err = RxError> {
  producer: Rc<Producer<Item, Err>>,
}

impl<Item, Err> Clone for Observable<Item, Err> {
  fn clone(&self) -> Self { Observable { producer: self.producer.clone() } }
}

impl<Item: 'static, Err: 'static> Observable<Item, Err> {
  /// `producer` runs once per subscription. It pushes into the given
  /// [`Subscriber`] and returns the teardown that releases whatever it set
  /// up. Returning `Err` routes the error to the observer instead.
  pub fn new(producer: impl Fn(Subscriber<Item, Err>) -> Result<Teardown, Err> + 'static) -> Self {
    Observable { producer: Rc::new(producer) }
  }

  /// Run the producer for `observer` and return the root subscription.
  pub fn subscribe(&self, observer: impl Observer<Item, Err> + 'static) -> Subscription {
    self.execute(observer, None)
  }

  /// Like [`subscribe`](Self::subscribe), but the new subscription is
  /// registered as a child of `parent` before the producer runs, so a
  /// synchronous cancellation of `parent` reaches it immediately.
  ///
  /// Operators subscribe to their sources this way.
  pub fn subscribe_in(
    &self, parent: &Subscription, observer: impl Observer<Item, Err> + 'static,
  ) -> Subscription {
    self.execute(observer, Some(parent))
  }

  /// Subscribe with a value handler only.
  pub fn subscribe_next(&self, next: impl FnMut(Item) + 'static) -> Subscription {
    self.subscribe(ObserverFns::new().on_next(next))
  }

  /// Subscribe with all three handlers.
  pub fn subscribe_all(
    &self, next: impl FnMut(Item) + 'static, error: impl FnMut(Err) + 'static,
    complete: impl FnMut() + 'static,
  ) -> Subscription {
    self.subscribe(
      ObserverFns::new()
        .on_next(next)
        .on_error(error)
        .on_complete(complete),
    )
  }

  /// Apply an operator. Chain calls, or use [`pipe!`](crate::pipe) for a
  /// left-to-right list. No subscription happens here.
  #[inline]
  pub fn pipe<R>(self, operator: impl FnOnce(Self) -> R) -> R { operator(self) }

  fn execute(
    &self, observer: impl Observer<Item, Err> + 'static, parent: Option<&Subscription>,
  ) -> Subscription {
    let subscriber = Subscriber::new(observer);
    let subscription = subscriber.subscription().clone();
    if let Some(parent) = parent {
      parent.add(&subscription);
      if subscription.is_closed() {
        return subscription;
      }
    }

    match (self.producer)(subscriber.clone()) {
      Ok(teardown) => {
        subscription.add(teardown);
      }
      Err(err) => {
        tracing::debug!("producer failed during subscribe; routing error to observer");
        subscriber.error(err);
      }
    }
    subscription
  }
}
