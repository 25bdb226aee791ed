//! Hot, multicast [`Subject`].
//!
//! A Subject is pushed into directly and fans every notification out to the
//! observers attached at that moment. Observers may subscribe or unsubscribe
//! from inside a broadcast; the broadcast in progress is unaffected.
//!
//! ```rust
//! use wheelrx::prelude::*;
//!
//! let spins = Subject::<u32>::new();
//! spins
//!   .as_observable()
//!   .filter(|sector| *sector > 3)
//!   .subscribe_next(|sector| println!("big win on {sector}"));
//!
//! spins.next(2);
//! spins.next(7);
//! spins.complete();
//! ```

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::{
  error::RxError,
  observable::Observable,
  observer::Observer,
  subscription::{Subscription, Teardown},
};

mod subscribers;
use subscribers::{broadcast_error, broadcast_value, Subscribers};

enum Status<Err> {
  Active,
  Completed,
  Errored(Err),
}

struct State<Item, Err> {
  status: Status<Err>,
  subscribers: Subscribers<Item, Err>,
}

/// Multicast hub that is both pushable and subscribable.
///
/// Clones are handles to the same hub. `complete` and `error` close it for
/// good; later pushes are ignored and later subscribers receive the same
/// terminal notification straight away.
pub struct Subject<Item, Err = RxError>(Rc<RefCell<State<Item, Err>>>);

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Subject(self.0.clone()) }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self {
    Subject(Rc::new(RefCell::new(State {
      status: Status::Active,
      subscribers: Subscribers::default(),
    })))
  }
}

impl<Item: Clone + 'static, Err: Clone + 'static> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Push `value` to every attached observer.
  pub fn next(&self, value: Item) {
    let snapshot = {
      let state = self.0.borrow();
      if !matches!(state.status, Status::Active) {
        return;
      }
      state.subscribers.snapshot()
    };
    broadcast_value(&snapshot, value);
  }

  /// Close the subject and push `err` to every attached observer.
  pub fn error(&self, err: Err) {
    let snapshot = {
      let mut state = self.0.borrow_mut();
      if !matches!(state.status, Status::Active) {
        return;
      }
      state.status = Status::Errored(err.clone());
      state.subscribers.drain()
    };
    broadcast_error(snapshot, err);
  }

  /// Close the subject and complete every attached observer.
  pub fn complete(&self) {
    let snapshot = {
      let mut state = self.0.borrow_mut();
      if !matches!(state.status, Status::Active) {
        return;
      }
      state.status = Status::Completed;
      state.subscribers.drain()
    };
    for observer in snapshot {
      observer.complete();
    }
  }

  /// Attach `observer`. Unsubscribing only detaches it; the subject itself
  /// keeps running.
  pub fn subscribe(&self, observer: impl Observer<Item, Err> + 'static) -> Subscription {
    self.as_observable().subscribe(observer)
  }

  /// A read-only view that forwards exactly what this subject pushes.
  pub fn as_observable(&self) -> Observable<Item, Err> {
    let state = self.0.clone();
    Observable::new(move |subscriber| {
      let mut inner = state.borrow_mut();
      let terminal = match &inner.status {
        Status::Active => None,
        Status::Completed => Some(None),
        Status::Errored(err) => Some(Some(err.clone())),
      };
      let id = match terminal {
        None => inner.subscribers.add(subscriber),
        Some(terminal) => {
          drop(inner);
          match terminal {
            Some(err) => subscriber.error(err),
            None => subscriber.complete(),
          }
          return Ok(Teardown::empty());
        }
      };
      drop(inner);
      let weak = Rc::downgrade(&state);
      Ok(Teardown::new(move || {
        if let Some(state) = weak.upgrade() {
          state.borrow_mut().subscribers.remove(id);
        }
      }))
    })
  }
}

impl<Item, Err> Subject<Item, Err> {
  /// Whether `complete` or `error` has been called.
  pub fn is_closed(&self) -> bool { !matches!(self.0.borrow().status, Status::Active) }

  /// Number of attached observers.
  pub fn observer_count(&self) -> usize { self.0.borrow().subscribers.len() }
}

impl<Item: Clone + 'static, Err: Clone + 'static> Observer<Item, Err> for Subject<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subject::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subject::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subject::complete(self) }

  #[inline]
  fn is_closed(&self) -> bool { Subject::is_closed(self) }
}

impl<Item, Err> Debug for Subject<Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subject")
      .field("closed", &self.is_closed())
      .field("observers", &self.observer_count())
      .finish()
  }
}
