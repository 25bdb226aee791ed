//! Integration tests for wheelrx
//!
//! End-to-end pipelines across creation functions, operators, subjects and
//! the virtual time source.

use std::{
  cell::{Cell, RefCell},
  rc::Rc,
};

use proptest::prelude::*;
use wheelrx::{pipe, prelude::*};
use Event::{Complete, Next};

#[derive(Debug, Clone, PartialEq)]
enum Event<T> {
  Next(T),
  Error(RxError),
  Complete,
}

type Log<T> = Rc<RefCell<Vec<Event<T>>>>;

fn recorder<T: 'static>(log: &Log<T>) -> ObserverFns<T, RxError> {
  let (l1, l2, l3) = (log.clone(), log.clone(), log.clone());
  ObserverFns::new()
    .on_next(move |v| l1.borrow_mut().push(Event::Next(v)))
    .on_error(move |e| l2.borrow_mut().push(Event::Error(e)))
    .on_complete(move || l3.borrow_mut().push(Event::Complete))
}

fn record<T: 'static>(source: &Observable<T>) -> (Log<T>, Subscription) {
  let log = Log::default();
  let subscription = source.subscribe(recorder(&log));
  (log, subscription)
}

#[test]
fn finite_source_emits_in_order_then_completes() {
  let (log, _) = record(&from_iter(vec![1, 2, 3]));
  assert_eq!(*log.borrow(), vec![Next(1), Next(2), Next(3), Complete]);
}

#[test]
fn take_scenarios() {
  let (log, _) = record(&pipe!(from_iter(vec![1, 2, 3]), take(2)));
  assert_eq!(*log.borrow(), vec![Next(1), Next(2), Complete]);

  let (log, _) = record(&pipe!(from_iter(vec![1]), take(5)));
  assert_eq!(*log.borrow(), vec![Next(1), Complete]);

  let (log, _) = record(&pipe!(from_iter(vec![1, 2, 3]), take(0)));
  assert!(!log.borrow().iter().any(|e| matches!(e, Next(_))));
}

#[test]
fn unsubscribe_runs_every_teardown_once() {
  let released = Rc::new(Cell::new(0));
  let (r1, r2) = (released.clone(), released.clone());
  let source = Observable::<i32>::new(move |subscriber| {
    subscriber.next(1);
    let r = r1.clone();
    subscriber.subscription().add(Teardown::new(move || r.set(r.get() + 1)));
    let r = r2.clone();
    Ok(Teardown::new(move || r.set(r.get() + 1)))
  });
  let (log, subscription) = record(&source.map(|v| v * 2));
  subscription.unsubscribe();
  subscription.unsubscribe();
  assert_eq!(released.get(), 2);
  assert!(subscription.is_closed());
  assert_eq!(*log.borrow(), vec![Next(2)]);
}

#[test]
fn unsubscribe_stops_subject_values() {
  let subject = Subject::<i32>::new();
  let (log, subscription) = record(&subject.as_observable());
  subject.next(1);
  subscription.unsubscribe();
  subject.next(2);
  assert_eq!(*log.borrow(), vec![Next(1)]);
  assert_eq!(subject.observer_count(), 0);
}

#[test]
fn concat_of_ranges() {
  let (log, _) = record(&concat(vec![range(1, 2), range(10, 11)]));
  assert_eq!(*log.borrow(), vec![Next(1), Next(2), Next(10), Next(11), Complete]);
}

#[test]
fn merge_completes_after_all_sources() {
  let (a, b) = (Subject::<i32>::new(), Subject::<i32>::new());
  let (log, _) = record(&merge(vec![a.as_observable(), b.as_observable()]));
  a.next(1);
  a.complete();
  b.next(2);
  assert_eq!(*log.borrow(), vec![Next(1), Next(2)]);
  b.complete();
  assert_eq!(*log.borrow(), vec![Next(1), Next(2), Complete]);

  let (log, _) = record(&merge::<i32, RxError>(vec![]));
  assert_eq!(*log.borrow(), vec![Complete]);
}

#[test]
fn skip_past_the_end_is_an_error() {
  let (log, _) = record(&pipe!(from_iter(vec![1, 2, 3]), skip(3)));
  assert_eq!(*log.borrow(), vec![Event::Error(RxError::NothingAfterSkip { count: 3 })]);
}

#[test]
fn one_shot_timer() {
  let scheduler = TestScheduler::new();
  let (log, _) = record(&timer(Duration::from_millis(100), false, scheduler.clone()));
  scheduler.advance_by(Duration::from_millis(99));
  assert!(log.borrow().is_empty());
  scheduler.advance_by(Duration::from_millis(1));
  assert_eq!(*log.borrow(), vec![Next(0), Complete]);
  assert!(scheduler.is_empty());
}

#[test]
fn repeating_timer_matches_interval() {
  let scheduler = TestScheduler::new();
  let (repeating, sub_a) = record(&timer(Duration::from_millis(100), true, scheduler.clone()));
  let (periodic, sub_b) = record(&interval(Duration::from_millis(100), scheduler.clone()));
  scheduler.advance_by(Duration::from_millis(350));
  assert_eq!(*repeating.borrow(), vec![Next(0), Next(1), Next(2)]);
  assert_eq!(*repeating.borrow(), *periodic.borrow());

  sub_a.unsubscribe();
  sub_b.unsubscribe();
  assert!(scheduler.is_empty());
}

#[test]
fn timeout_by_take_until_timer() {
  let scheduler = TestScheduler::new();
  let requests = Subject::<&'static str>::new();
  let (log, _) = record(
    &requests
      .as_observable()
      .take_until(timer(Duration::from_millis(50), false, scheduler.clone())),
  );
  requests.next("early");
  scheduler.advance_by(Duration::from_millis(50));
  requests.next("late");
  assert_eq!(*log.borrow(), vec![Next("early"), Complete]);
  assert_eq!(requests.observer_count(), 0);
}

#[test]
fn clicks_debounced_through_event_hub() {
  let scheduler = TestScheduler::new();
  let hub = EventHub::<u32>::new();
  let (log, subscription) = record(
    &from_event(hub.clone(), "click", ListenerOptions::default())
      .filter(|x| *x > 0)
      .delay(Duration::from_millis(10), scheduler.clone())
      .take(2),
  );
  hub.emit("click", 0);
  hub.emit("click", 5);
  hub.emit("click", 7);
  assert!(log.borrow().is_empty());
  scheduler.advance_by(Duration::from_millis(10));
  assert_eq!(*log.borrow(), vec![Next(5), Next(7), Complete]);
  assert_eq!(hub.listener_count("click"), 0);
  assert!(subscription.is_closed());
}

#[test]
fn retry_then_recover() {
  let attempts = Rc::new(Cell::new(0));
  let a = attempts.clone();
  let flaky = Observable::<i32>::new(move |_| {
    a.set(a.get() + 1);
    Err(RxError::failed("timeout"))
  });
  let (log, _) = record(&flaky.retry(2).catch_error(|_, _| of(-1)));
  assert_eq!(attempts.get(), 3);
  assert_eq!(*log.borrow(), vec![Next(-1), Complete]);
}

#[test]
fn finalize_runs_once_on_any_termination() {
  let runs = Rc::new(Cell::new(0));
  let r = runs.clone();
  let (_, subscription) = record(&range(1, 3).finalize(move || r.set(r.get() + 1)));
  subscription.unsubscribe();
  assert_eq!(runs.get(), 1);
}

#[test]
fn dropping_guard_cancels() {
  let scheduler = TestScheduler::new();
  let log = Log::default();
  {
    let _guard = interval(Duration::from_millis(10), scheduler.clone())
      .subscribe(recorder(&log))
      .unsubscribe_when_dropped();
    scheduler.advance_by(Duration::from_millis(10));
  }
  scheduler.advance_by(Duration::from_millis(100));
  assert_eq!(*log.borrow(), vec![Next(0)]);
}

proptest! {
  #[test]
  fn synchronous_sources_keep_order(values in proptest::collection::vec(any::<i32>(), 0..64)) {
    let (log, subscription) = record(&from_iter(values.clone()));
    let mut expected: Vec<_> = values.into_iter().map(Next).collect();
    expected.push(Complete);
    prop_assert_eq!(&*log.borrow(), &expected);
    prop_assert!(subscription.is_closed());
  }

  #[test]
  fn take_forwards_a_prefix(values in proptest::collection::vec(any::<i32>(), 0..32), count in 0usize..40) {
    let (log, _) = record(&from_iter(values.clone()).take(count));
    let nexts: Vec<_> = log
      .borrow()
      .iter()
      .filter_map(|e| match e { Next(v) => Some(*v), _ => None })
      .collect();
    prop_assert_eq!(&nexts[..], &values[..count.min(values.len())]);
    let completes = log.borrow().iter().filter(|e| **e == Complete).count();
    prop_assert_eq!(completes, 1);
  }
}
