//! TakeUntil operator implementation
//!
//! Emits values from the source until a second observable, the notifier,
//! emits a value.

use crate::{
  observable::Observable,
  observer::ObserverFns,
  subscriber::Subscriber,
  subscription::Teardown,
};

/// Forwards source values until `notifier` emits its first value, then
/// completes and cancels both subscriptions.
///
/// The notifier is subscribed first. A notifier error is forwarded; a
/// notifier that completes without emitting has no effect.
///
/// ```
/// use wheelrx::prelude::*;
///
/// let scheduler = TestScheduler::new();
/// let ticks = interval::<_, RxError>(Duration::from_millis(10), scheduler.clone());
/// let deadline = timer(Duration::from_millis(35), false, scheduler.clone());
/// ticks.take_until(deadline).subscribe_next(|v| println!("{v}"));
/// scheduler.flush();
/// // 0 1 2
/// ```
pub fn take_until<Item, N, Err>(
  notifier: Observable<N, Err>,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  N: 'static,
  Err: 'static,
{
  move |source| {
    Observable::new(move |downstream: Subscriber<Item, Err>| {
      let parent = downstream.subscription().clone();
      let (on_next, on_error) = (downstream.clone(), downstream.clone());
      notifier.subscribe_in(
        &parent,
        ObserverFns::new()
          .on_next(move |_: N| on_next.complete())
          .on_error(move |err| on_error.error(err)),
      );
      if !downstream.is_closed() {
        source.subscribe_in(&parent, downstream);
      }
      Ok(Teardown::empty())
    })
  }
}
