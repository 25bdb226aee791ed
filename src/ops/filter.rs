use std::rc::Rc;

use super::lift;
use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Filter observer that forwards only values satisfying the predicate.
pub struct FilterObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  predicate: Rc<dyn Fn(&Item, usize) -> bool>,
  index: usize,
}

impl<Item, Err> Observer<Item, Err> for FilterObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    let keep = (self.predicate)(&value, self.index);
    self.index += 1;
    if keep {
      self.downstream.next(value);
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) { self.downstream.complete() }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Forwards a value only if `predicate(&value)` holds.
pub fn filter<Item, Err>(
  predicate: impl Fn(&Item) -> bool + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  filter_indexed(move |value, _| predicate(value))
}

/// Forwards a value only if `predicate(&value, index)` holds. The index counts
/// every value the source emitted, including rejected ones.
pub fn filter_indexed<Item, Err>(
  predicate: impl Fn(&Item, usize) -> bool + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| {
    let predicate: Rc<dyn Fn(&Item, usize) -> bool> = Rc::new(predicate);
    lift(source, move |downstream| FilterObserver {
      downstream,
      predicate: predicate.clone(),
      index: 0,
    })
  }
}
