use std::rc::Rc;

use super::lift;
use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

pub struct TakeWhileObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  predicate: Rc<dyn Fn(&Item) -> bool>,
}

impl<Item, Err> Observer<Item, Err> for TakeWhileObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    if (self.predicate)(&value) {
      self.downstream.next(value);
    } else {
      self.downstream.complete();
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) { self.downstream.complete() }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Forwards values while `predicate` holds. The first value failing it is
/// dropped, and the stream completes and cancels the source.
pub fn take_while<Item, Err>(
  predicate: impl Fn(&Item) -> bool + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| {
    let predicate: Rc<dyn Fn(&Item) -> bool> = Rc::new(predicate);
    lift(source, move |downstream| TakeWhileObserver { downstream, predicate: predicate.clone() })
  }
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn failing_value_is_not_forwarded() {
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    from_iter::<_, RxError>(vec![1, 2, 5, 3]).take_while(|v| *v < 4).subscribe_all(
      move |v| l1.borrow_mut().push(format!("next {v}")),
      |_| {},
      move || l2.borrow_mut().push("complete".into()),
    );
    assert_eq!(*log.borrow(), vec!["next 1", "next 2", "complete"]);
  }

  #[test]
  fn cancels_source_on_first_failure() {
    let subject = Subject::<i32, RxError>::new();
    subject
      .as_observable()
      .take_while(|v| *v != 0)
      .subscribe_next(|_| {});
    subject.next(1);
    assert_eq!(subject.observer_count(), 1);
    subject.next(0);
    assert_eq!(subject.observer_count(), 0);
  }
}
