use std::{cell::Cell, rc::Rc};

use super::lift;
use crate::{
  observable::Observable,
  observer::Observer,
  scheduler::{Due, TimeSource},
  subscriber::Subscriber,
  subscription::{ChildId, Teardown},
};

#[derive(Default)]
struct Pending {
  in_flight: Cell<usize>,
  source_done: Cell<bool>,
}

pub struct DelayObserver<Item, Err, S> {
  downstream: Subscriber<Item, Err>,
  due: Due,
  scheduler: S,
  pending: Rc<Pending>,
}

impl<Item, Err, S> Observer<Item, Err> for DelayObserver<Item, Err, S>
where
  Item: 'static,
  Err: 'static,
  S: TimeSource + Clone + 'static,
{
  fn next(&mut self, value: Item) {
    let wait = self.due.wait_from(self.scheduler.now());
    let pending = self.pending.clone();
    pending.in_flight.set(pending.in_flight.get() + 1);

    let child: Rc<Cell<Option<ChildId>>> = Rc::default();
    let (downstream, slot) = (self.downstream.clone(), child.clone());
    let handle = self.scheduler.schedule_after(
      wait,
      Box::new(move || {
        if let Some(id) = slot.take() {
          downstream.subscription().remove(id);
        }
        pending.in_flight.set(pending.in_flight.get() - 1);
        downstream.next(value);
        if pending.source_done.get() && pending.in_flight.get() == 0 {
          downstream.complete();
        }
      }),
    );

    let scheduler = self.scheduler.clone();
    let id = self
      .downstream
      .subscription()
      .add(Teardown::new(move || scheduler.cancel(handle)));
    child.set(Some(id));
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    self.pending.source_done.set(true);
    if self.pending.in_flight.get() == 0 {
      self.downstream.complete();
    }
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Re-emits each value after `due`, scheduled independently per value on
/// `scheduler`.
///
/// `due` is either a relative [`Duration`](crate::scheduler::Duration) or an
/// absolute [`Due::At`] point on the scheduler's clock. Completion waits for
/// every delayed value; errors are forwarded at once and drop whatever is
/// still pending.
///
/// ```
/// use wheelrx::prelude::*;
///
/// let scheduler = TestScheduler::new();
/// from_iter::<_, RxError>(vec![1, 2])
///   .delay(Duration::from_millis(50), scheduler.clone())
///   .subscribe_next(|v| println!("{v}"));
/// scheduler.advance_by(Duration::from_millis(50));
/// ```
pub fn delay<Item, Err, S>(
  due: impl Into<Due>, scheduler: S,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
  S: TimeSource + Clone + 'static,
{
  let due = due.into();
  move |source| {
    lift(source, move |downstream| DelayObserver {
      downstream,
      due,
      scheduler: scheduler.clone(),
      pending: Rc::default(),
    })
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  fn ms(v: u64) -> Duration { Duration::from_millis(v) }

  type Log = Rc<RefCell<Vec<String>>>;

  fn logging(log: &Log, scheduler: &TestScheduler) -> ObserverFns<i32, RxError> {
    let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
    let (s1, s2) = (scheduler.clone(), scheduler.clone());
    ObserverFns::new()
      .on_next(move |v| l1.borrow_mut().push(format!("{v}@{}", s1.now().as_millis())))
      .on_error(move |e| l2.borrow_mut().push(format!("error {e}")))
      .on_complete(move || l3.borrow_mut().push(format!("complete@{}", s2.now().as_millis())))
  }

  #[test]
  fn completion_waits_for_delayed_values() {
    let scheduler = TestScheduler::new();
    let log = Log::default();
    from_iter::<_, RxError>(vec![1, 2, 3])
      .delay(ms(100), scheduler.clone())
      .subscribe(logging(&log, &scheduler));
    assert!(log.borrow().is_empty());
    assert_eq!(scheduler.pending_count(), 3);

    scheduler.advance_by(ms(100));
    assert_eq!(*log.borrow(), vec!["1@100", "2@100", "3@100", "complete@100"]);
  }

  #[test]
  fn each_value_delayed_independently() {
    let scheduler = TestScheduler::new();
    let subject = Subject::<i32, RxError>::new();
    let log = Log::default();
    subject
      .as_observable()
      .delay(ms(30), scheduler.clone())
      .subscribe(logging(&log, &scheduler));

    subject.next(1);
    scheduler.advance_by(ms(10));
    subject.next(2);
    subject.complete();
    scheduler.flush();
    assert_eq!(*log.borrow(), vec!["1@30", "2@40", "complete@40"]);
  }

  #[test]
  fn absolute_due() {
    let scheduler = TestScheduler::new();
    let subject = Subject::<i32, RxError>::new();
    let log = Log::default();
    subject
      .as_observable()
      .delay(Due::At(ms(50)), scheduler.clone())
      .subscribe(logging(&log, &scheduler));
    subject.next(1);
    scheduler.advance_by(ms(60));
    subject.next(2);
    scheduler.advance_by(Duration::ZERO);
    assert_eq!(*log.borrow(), vec!["1@50", "2@60"]);
  }

  #[test]
  fn error_drops_pending_values() {
    let scheduler = TestScheduler::new();
    let subject = Subject::<i32, RxError>::new();
    let log = Log::default();
    subject
      .as_observable()
      .delay(ms(30), scheduler.clone())
      .subscribe(logging(&log, &scheduler));
    subject.next(1);
    subject.error(RxError::failed("lost"));
    assert!(scheduler.is_empty());
    scheduler.flush();
    assert_eq!(*log.borrow(), vec!["error lost"]);
  }

  #[test]
  fn unsubscribe_cancels_pending() {
    let scheduler = TestScheduler::new();
    let log = Log::default();
    let sub = from_iter::<_, RxError>(vec![1, 2])
      .delay(ms(30), scheduler.clone())
      .subscribe(logging(&log, &scheduler));
    sub.unsubscribe();
    assert!(scheduler.is_empty());
    assert!(log.borrow().is_empty());
  }

  #[test]
  fn fired_values_release_their_cancel_handles() {
    let scheduler = TestScheduler::new();
    let subject = Subject::<i32, RxError>::new();
    let sub = subject
      .as_observable()
      .delay(ms(5), scheduler.clone())
      .subscribe_next(|_| {});
    let baseline = sub.child_count();
    for v in 0..10 {
      subject.next(v);
      scheduler.advance_by(ms(5));
    }
    assert_eq!(sub.child_count(), baseline);
  }
}
