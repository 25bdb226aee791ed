//! The observer handed to producer functions.
//!
//! A [`Subscriber`] wraps the downstream observer with a monotonic `closed`
//! flag and owns the [`Subscription`] of one `subscribe` call. It is a cheap
//! cloneable handle, so producers can move it into timer or event callbacks.

use std::{
  cell::{Cell, RefCell},
  rc::{Rc, Weak},
};

use crate::{
  observer::{BoxedObserver, Observer},
  subscription::Subscription,
};

enum Terminal<Err> {
  Error(Err),
  Complete,
}

struct Core<Item, Err> {
  closed: Cell<bool>,
  sink: RefCell<Option<BoxedObserver<Item, Err>>>,
  /// A terminal notification that arrived while `sink` was busy delivering a
  /// value; it is delivered as soon as that delivery returns.
  deferred: RefCell<Option<Terminal<Err>>>,
  subscription: Subscription,
}

impl<Item, Err> Core<Item, Err> {
  /// Close without notifying. The observer is dropped now, or right after the
  /// value it is currently handling.
  fn shut(&self) {
    self.closed.set(true);
    if let Ok(mut sink) = self.sink.try_borrow_mut() {
      sink.take();
    }
  }

  fn finish(&self, terminal: Terminal<Err>) {
    let observer = match self.sink.try_borrow_mut() {
      Ok(mut sink) => sink.take(),
      Err(_) => {
        *self.deferred.borrow_mut() = Some(terminal);
        return;
      }
    };
    if let Some(mut observer) = observer {
      match terminal {
        Terminal::Error(err) => observer.error(err),
        Terminal::Complete => observer.complete(),
      }
    }
    self.subscription.unsubscribe();
  }
}

/// Shared handle to a subscribed observer.
///
/// # Re-entrancy
///
/// A terminal notification sent from inside the observer's own `next` is
/// held back until that `next` returns. Sending another *value* from inside
/// `next` (a synchronous feedback loop) panics.
pub struct Subscriber<Item, Err>(Rc<Core<Item, Err>>);

impl<Item, Err> Clone for Subscriber<Item, Err> {
  fn clone(&self) -> Self { Subscriber(self.0.clone()) }
}

impl<Item: 'static, Err: 'static> Subscriber<Item, Err> {
  /// Wrap `observer`. The new subscriber's subscription force-closes it as
  /// its initial teardown.
  pub fn new(observer: impl Observer<Item, Err> + 'static) -> Self {
    let core = Rc::new_cyclic(|weak: &Weak<Core<Item, Err>>| {
      let weak = weak.clone();
      Core {
        closed: Cell::new(false),
        sink: RefCell::new(Some(Box::new(observer))),
        deferred: RefCell::new(None),
        subscription: Subscription::with_teardown(move || {
          if let Some(core) = weak.upgrade() {
            core.shut();
          }
        }),
      }
    });
    Subscriber(core)
  }
}

impl<Item, Err> Subscriber<Item, Err> {
  /// Deliver a value unless closed.
  pub fn next(&self, value: Item) {
    if self.is_closed() {
      return;
    }
    {
      let Ok(mut sink) = self.0.sink.try_borrow_mut() else {
        panic!(
          "re-entrant emission into a subscriber that is still delivering a value. Use an \
           explicit async boundary (e.g. delay) if you need feedback loops."
        );
      };
      if let Some(observer) = sink.as_mut() {
        observer.next(value);
      }
    }
    let deferred = self.0.deferred.borrow_mut().take();
    if let Some(terminal) = deferred {
      self.0.finish(terminal);
    } else if self.0.closed.get() {
      self.0.shut();
    }
  }

  /// Deliver an error, close, and release this subscription's resources.
  pub fn error(&self, err: Err) {
    if self.0.closed.replace(true) {
      return;
    }
    self.0.finish(Terminal::Error(err));
  }

  /// Deliver completion, close, and release this subscription's resources.
  /// Idempotent.
  pub fn complete(&self) {
    if self.0.closed.replace(true) {
      return;
    }
    self.0.finish(Terminal::Complete);
  }

  /// Closed by a terminal notification, by cancellation, or because the
  /// wrapped observer reports itself closed.
  pub fn is_closed(&self) -> bool {
    self.0.closed.get()
      || self
        .0
        .sink
        .try_borrow()
        .is_ok_and(|sink| sink.as_ref().is_none_or(|o| o.is_closed()))
  }

  /// The subscription this subscriber belongs to. Producers register
  /// per-subscription resources here.
  #[inline]
  pub fn subscription(&self) -> &Subscription { &self.0.subscription }
}

impl<Item, Err> Observer<Item, Err> for Subscriber<Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) { Subscriber::next(self, value) }

  #[inline]
  fn error(&mut self, err: Err) { Subscriber::error(self, err) }

  #[inline]
  fn complete(&mut self) { Subscriber::complete(self) }

  #[inline]
  fn is_closed(&self) -> bool { Subscriber::is_closed(self) }
}
