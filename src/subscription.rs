//! Composite cancellation tokens.
//!
//! A [`Subscription`] owns an optional initial teardown plus a list of child
//! disposables. Unsubscribing runs the initial teardown, then disposes every
//! child depth-first in registration order, exactly once.

use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

mod dynamic;
pub use dynamic::{ChildId, DynamicSubscriptions};

// ============================================================================
// Teardown
// ============================================================================

/// Cleanup registered with a [`Subscription`].
#[derive(Default)]
pub enum Teardown {
  /// Nothing to release.
  #[default]
  Empty,
  /// A bare action, invoked once.
  Action(Box<dyn FnOnce()>),
  /// A nested subscription; disposing it cascades.
  Subscription(Subscription),
}

impl Teardown {
  /// Wrap a cleanup closure.
  pub fn new(action: impl FnOnce() + 'static) -> Self { Teardown::Action(Box::new(action)) }

  #[inline]
  pub fn empty() -> Self { Teardown::Empty }

  /// Run the cleanup.
  pub fn dispose(self) {
    match self {
      Teardown::Empty => {}
      Teardown::Action(action) => action(),
      Teardown::Subscription(subscription) => subscription.unsubscribe(),
    }
  }

  fn is_closed(&self) -> bool {
    match self {
      Teardown::Empty => true,
      Teardown::Action(_) => false,
      Teardown::Subscription(subscription) => subscription.is_closed(),
    }
  }
}

impl From<Subscription> for Teardown {
  fn from(subscription: Subscription) -> Self { Teardown::Subscription(subscription) }
}

impl From<&Subscription> for Teardown {
  fn from(subscription: &Subscription) -> Self { Teardown::Subscription(subscription.clone()) }
}

impl Debug for Teardown {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    match self {
      Teardown::Empty => f.write_str("Teardown::Empty"),
      Teardown::Action(_) => f.write_str("Teardown::Action"),
      Teardown::Subscription(s) => f.debug_tuple("Teardown::Subscription").field(s).finish(),
    }
  }
}

// ============================================================================
// Subscription
// ============================================================================

#[derive(Default)]
struct Inner {
  closed: bool,
  initial: Option<Box<dyn FnOnce()>>,
  children: DynamicSubscriptions<Teardown>,
}

/// Cancellation handle returned by `subscribe`.
///
/// Cloning yields another handle to the same token.
#[derive(Clone, Default)]
pub struct Subscription(Rc<RefCell<Inner>>);

impl Subscription {
  /// An open subscription with no teardown yet.
  pub fn new() -> Self { Self::default() }

  /// An open subscription whose initial teardown is `action`.
  pub fn with_teardown(action: impl FnOnce() + 'static) -> Self {
    let inner = Inner { initial: Some(Box::new(action)), ..Inner::default() };
    Subscription(Rc::new(RefCell::new(inner)))
  }

  /// A subscription that is already closed.
  pub fn closed() -> Self {
    let inner = Inner { closed: true, ..Inner::default() };
    Subscription(Rc::new(RefCell::new(inner)))
  }

  /// Register cleanup to run when this subscription is cancelled.
  ///
  /// If this subscription is already closed the child is disposed right away
  /// and the returned id refers to nothing.
  pub fn add(&self, teardown: impl Into<Teardown>) -> ChildId {
    let teardown = teardown.into();
    if let Teardown::Subscription(other) = &teardown {
      if Rc::ptr_eq(&self.0, &other.0) {
        return self.0.borrow_mut().children.reserve_id();
      }
    }

    let mut inner = self.0.borrow_mut();
    if inner.closed {
      let id = inner.children.reserve_id();
      drop(inner);
      teardown.dispose();
      return id;
    }
    inner.children.retain(|child| !child.is_closed());
    inner.children.add(teardown)
  }

  /// Detach a child without running it.
  pub fn remove(&self, id: ChildId) -> Option<Teardown> { self.0.borrow_mut().children.remove(id) }

  /// Cancel: initial teardown, then every child in registration order.
  ///
  /// Later calls are no-ops.
  pub fn unsubscribe(&self) {
    let (initial, mut children) = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      (inner.initial.take(), std::mem::take(&mut inner.children))
    };
    tracing::trace!(children = children.len(), "subscription closed");
    if let Some(initial) = initial {
      initial();
    }
    for child in children.drain() {
      child.dispose();
    }
  }

  #[inline]
  pub fn is_closed(&self) -> bool { self.0.borrow().closed }

  /// Number of registered children that are still live.
  pub fn child_count(&self) -> usize {
    self
      .0
      .borrow()
      .children
      .iter()
      .filter(|child| !child.is_closed())
      .count()
  }

  /// Unsubscribe automatically once the returned guard goes out of scope.
  ///
  /// **Attention:** if the guard is not bound to a variable it is dropped,
  /// and the subscription cancelled, immediately.
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard { SubscriptionGuard::new(self) }
}

impl Debug for Subscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let inner = self.0.borrow();
    f.debug_struct("Subscription")
      .field("closed", &inner.closed)
      .field("children", &inner.children.len())
      .finish()
  }
}

/// RAII wrapper that unsubscribes on drop.
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard(Option<Subscription>);

impl SubscriptionGuard {
  pub fn new(subscription: Subscription) -> Self { SubscriptionGuard(Some(subscription)) }

  /// Release the subscription without cancelling it.
  pub fn into_inner(mut self) -> Subscription { self.0.take().unwrap_or_default() }
}

impl Drop for SubscriptionGuard {
  #[inline]
  fn drop(&mut self) {
    if let Some(subscription) = self.0.take() {
      subscription.unsubscribe();
    }
  }
}
