use smallvec::SmallVec;

use crate::{
  subscriber::Subscriber,
  subscription::{ChildId, DynamicSubscriptions},
};

/// Observers snapshotted for one broadcast.
pub(super) type Snapshot<Item, Err> = SmallVec<[Subscriber<Item, Err>; 2]>;

/// The observers attached to a Subject, keyed by the id their detach
/// teardown refers to.
pub(super) struct Subscribers<Item, Err> {
  inner: DynamicSubscriptions<Subscriber<Item, Err>>,
}

impl<Item, Err> Default for Subscribers<Item, Err> {
  fn default() -> Self { Self { inner: DynamicSubscriptions::default() } }
}

impl<Item, Err> Subscribers<Item, Err> {
  #[inline]
  pub(super) fn add(&mut self, observer: Subscriber<Item, Err>) -> ChildId { self.inner.add(observer) }

  #[inline]
  pub(super) fn remove(&mut self, id: ChildId) -> Option<Subscriber<Item, Err>> {
    self.inner.remove(id)
  }

  #[inline]
  pub(super) fn len(&self) -> usize { self.inner.len() }

  /// The observers attached right now. Observers attached or detached while
  /// the snapshot is being delivered do not affect it.
  pub(super) fn snapshot(&self) -> Snapshot<Item, Err> { self.inner.iter().cloned().collect() }

  /// Detach every observer, handing them to the caller for a terminal
  /// broadcast.
  pub(super) fn drain(&mut self) -> Snapshot<Item, Err> { self.inner.drain().collect() }
}

/// Push `value` to every observer of `snapshot`. The last observer receives
/// the moved value, the others a clone.
pub(super) fn broadcast_value<Item: Clone, Err>(snapshot: &Snapshot<Item, Err>, value: Item) {
  let mut iter = snapshot.iter().peekable();
  while let Some(observer) = iter.next() {
    if iter.peek().is_some() {
      observer.next(value.clone());
    } else {
      observer.next(value);
      break;
    }
  }
}

pub(super) fn broadcast_error<Item, Err: Clone>(snapshot: Snapshot<Item, Err>, err: Err) {
  let mut iter = snapshot.into_iter().peekable();
  while let Some(observer) = iter.next() {
    if iter.peek().is_some() {
      observer.error(err.clone());
    } else {
      observer.error(err);
      break;
    }
  }
}

#[cfg(test)]
mod tests {
  use std::{cell::RefCell, rc::Rc};

  use super::*;
  use crate::observer::ObserverFns;

  #[test]
  fn broadcast_reaches_everyone_in_order() {
    let log = Rc::new(RefCell::new(vec![]));
    let mut subscribers = Subscribers::<i32, ()>::default();
    for tag in ["a", "b", "c"] {
      let log = log.clone();
      subscribers.add(Subscriber::new(
        ObserverFns::new().on_next(move |v| log.borrow_mut().push(format!("{tag}{v}"))),
      ));
    }
    broadcast_value(&subscribers.snapshot(), 1);
    assert_eq!(*log.borrow(), vec!["a1", "b1", "c1"]);
  }

  #[test]
  fn drain_empties() {
    let mut subscribers = Subscribers::<i32, ()>::default();
    let id = subscribers.add(Subscriber::new(ObserverFns::new()));
    subscribers.add(Subscriber::new(ObserverFns::new()));
    assert!(subscribers.remove(id).is_some());
    assert_eq!(subscribers.drain().len(), 1);
    assert_eq!(subscribers.len(), 0);
  }
}
