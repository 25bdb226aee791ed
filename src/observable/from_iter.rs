use super::Observable;
use crate::subscription::Teardown;

/// Creates an observable that produces values from an iterator.
///
/// Every element is emitted synchronously inside `subscribe`, in iteration
/// order, then the observable completes. Never emits an error. Emission stops
/// early once the subscriber closes, e.g. under `take`.
///
/// ```
/// use wheelrx::prelude::*;
///
/// from_iter::<_, RxError>(vec![0, 1, 2, 3]).subscribe_next(|v| println!("{v},"));
/// ```
pub fn from_iter<Iter, Err>(iter: Iter) -> Observable<Iter::Item, Err>
where
  Iter: IntoIterator + Clone + 'static,
  Iter::Item: 'static,
  Err: 'static,
{
  Observable::new(move |subscriber| {
    for v in iter.clone() {
      if subscriber.is_closed() {
        return Ok(Teardown::empty());
      }
      subscriber.next(v);
    }
    subscriber.complete();
    Ok(Teardown::empty())
  })
}

/// Creates an observable producing a single value, then completing.
///
/// ```
/// use wheelrx::prelude::*;
///
/// of::<_, RxError>(123).subscribe_next(|v| println!("{v}"));
/// ```
pub fn of<Item, Err>(value: Item) -> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: 'static,
{
  Observable::new(move |subscriber| {
    subscriber.next(value.clone());
    subscriber.complete();
    Ok(Teardown::empty())
  })
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn from_range() {
    let hit = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let (h, c) = (hit.clone(), completed.clone());
    from_iter::<_, RxError>(0..100).subscribe_all(
      move |v| h.borrow_mut().push(v),
      |_| {},
      move || *c.borrow_mut() = true,
    );
    assert_eq!(*hit.borrow(), (0..100).collect::<Vec<_>>());
    assert!(*completed.borrow());
  }

  #[test]
  fn from_vec_replays_per_subscription() {
    let o = from_iter::<_, RxError>(vec![1, 2, 3]);
    let sum = Rc::new(RefCell::new(0));
    for _ in 0..2 {
      let s = sum.clone();
      o.subscribe_next(move |v| *s.borrow_mut() += v);
    }
    assert_eq!(*sum.borrow(), 12);
  }

  #[test]
  fn empty_iter_just_completes() {
    let completed = Rc::new(RefCell::new(0));
    let c = completed.clone();
    from_iter::<Vec<i32>, RxError>(vec![]).subscribe_all(
      |_| panic!("no values"),
      |_| {},
      move || *c.borrow_mut() += 1,
    );
    assert_eq!(*completed.borrow(), 1);
  }

  #[test]
  fn of_emits_once() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    of::<_, RxError>("only").subscribe_all(
      move |v| l1.borrow_mut().push(v.to_string()),
      |_| {},
      move || l2.borrow_mut().push("complete".to_string()),
    );
    assert_eq!(*log.borrow(), vec!["only", "complete"]);
  }
}
