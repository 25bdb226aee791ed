use std::{cell::Cell, rc::Rc};

use super::Observable;
use crate::{
  scheduler::{Duration, TaskHandle, TimeSource},
  subscriber::Subscriber,
  subscription::Teardown,
};

type PendingTask = Rc<Cell<Option<TaskHandle>>>;

/// Emits `0` after `delay` on `scheduler`, then completes.
///
/// With `repeat` set it keeps emitting `1`, `2`, ... every `delay` and never
/// completes on its own. Unsubscribing cancels the pending callback.
///
/// ```
/// use wheelrx::prelude::*;
///
/// let scheduler = TestScheduler::new();
/// timer::<_, RxError>(Duration::from_millis(100), false, scheduler.clone())
///   .subscribe_next(|v| assert_eq!(v, 0));
/// scheduler.advance_by(Duration::from_millis(100));
/// ```
pub fn timer<S, Err>(delay: Duration, repeat: bool, scheduler: S) -> Observable<usize, Err>
where
  S: TimeSource + Clone + 'static,
  Err: 'static,
{
  Observable::new(move |subscriber| {
    let pending = PendingTask::default();
    schedule_tick(scheduler.clone(), delay, repeat, 0, subscriber, pending.clone());
    let scheduler = scheduler.clone();
    Ok(Teardown::new(move || {
      if let Some(handle) = pending.take() {
        tracing::trace!(?handle, "timer cancelled");
        scheduler.cancel(handle);
      }
    }))
  })
}

/// Emits `0, 1, 2, ...` every `period`. Same as `timer(period, true, scheduler)`.
pub fn interval<S, Err>(period: Duration, scheduler: S) -> Observable<usize, Err>
where
  S: TimeSource + Clone + 'static,
  Err: 'static,
{
  timer(period, true, scheduler)
}

fn schedule_tick<S, Err>(
  scheduler: S, delay: Duration, repeat: bool, tick: usize, subscriber: Subscriber<usize, Err>,
  pending: PendingTask,
) where
  S: TimeSource + Clone + 'static,
  Err: 'static,
{
  let (again, slot) = (scheduler.clone(), pending.clone());
  let handle = scheduler.schedule_after(
    delay,
    Box::new(move || {
      slot.set(None);
      if subscriber.is_closed() {
        return;
      }
      subscriber.next(tick);
      if !repeat {
        subscriber.complete();
      } else if !subscriber.is_closed() {
        schedule_tick(again, delay, repeat, tick + 1, subscriber, slot);
      }
    }),
  );
  pending.set(Some(handle));
}
