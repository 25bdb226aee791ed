use super::lift;
use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Forwards the first `count` values, then completes.
pub struct TakeObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  count: usize,
  taken: usize,
}

impl<Item, Err> Observer<Item, Err> for TakeObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if self.taken < self.count {
      self.taken += 1;
      self.downstream.next(value);
    }
    if self.taken >= self.count {
      self.downstream.complete();
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) { self.downstream.complete() }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Emits only the first `count` values emitted by the source, then completes
/// and cancels the source.
///
/// If the source emits fewer than `count` values all of them are forwarded
/// and its completion passes through. `take(0)` forwards nothing and
/// completes on the source's first value.
///
/// ```
/// use wheelrx::prelude::*;
///
/// from_iter::<_, RxError>(0..10).take(5).subscribe_next(|v| println!("{v}"));
///
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
pub fn take<Item, Err>(count: usize) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| lift(source, move |downstream| TakeObserver { downstream, count, taken: 0 })
}

#[cfg(test)]
mod test {
  use std::{
    cell::{Cell, RefCell},
    rc::Rc,
  };

  use crate::prelude::*;

  #[test]
  fn base_function() {
    let completed = Rc::new(Cell::new(false));
    let next_count = Rc::new(Cell::new(0));
    let (c, n) = (completed.clone(), next_count.clone());
    from_iter::<_, RxError>(0..100).take(5).subscribe_all(
      move |_| n.set(n.get() + 1),
      |_| {},
      move || c.set(true),
    );
    assert_eq!(next_count.get(), 5);
    assert!(completed.get());
  }

  #[test]
  fn shorter_source_still_completes() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    from_iter::<_, RxError>(vec![1]).take(5).subscribe_all(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      |_| {},
      move || l2.borrow_mut().push("complete".into()),
    );
    assert_eq!(*log.borrow(), vec!["next 1", "complete"]);
  }

  #[test]
  fn take_zero_never_forwards() {
    let completed = Rc::new(Cell::new(0));
    let c = completed.clone();
    from_iter::<_, RxError>(1..4).take(0).subscribe_all(
      |_| panic!("take(0) forwards nothing"),
      |_| {},
      move || c.set(c.get() + 1),
    );
    assert_eq!(completed.get(), 1);
  }

  #[test]
  fn stops_an_unbounded_source() {
    let pulled = Rc::new(Cell::new(0));
    let p = pulled.clone();
    from_iter::<_, RxError>(0..)
      .tap(move |_| p.set(p.get() + 1))
      .take(3)
      .subscribe_next(|_| {});
    assert_eq!(pulled.get(), 3);
  }

  #[test]
  fn cancels_timed_source() {
    let scheduler = TestScheduler::new();
    let ticks = Rc::new(RefCell::new(vec![]));
    let t = ticks.clone();
    let sub = interval::<_, RxError>(Duration::from_millis(10), scheduler.clone())
      .take(2)
      .subscribe_next(move |v| t.borrow_mut().push(v));
    scheduler.advance_by(Duration::from_millis(100));
    assert_eq!(*ticks.borrow(), vec![0, 1]);
    assert!(scheduler.is_empty());
    assert!(sub.is_closed());
  }
}
