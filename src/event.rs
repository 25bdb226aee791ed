//! Named event sources consumed by [`from_event`](crate::observable::from_event).
//!
//! [`EventSource`] is the boundary trait: anything that can register and
//! deregister a handler under an event name. [`EventHub`] is the in-process
//! implementation, constructed explicitly and passed around by handle, e.g.
//! owned by the application object that signals "preload finished".

use std::{
  cell::RefCell,
  collections::HashMap,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use crate::subscription::{ChildId, DynamicSubscriptions};

/// Callback registered with an [`EventSource`].
pub type EventHandler<Ev> = Rc<dyn Fn(Ev)>;

/// Identifies a registered handler within one event name.
pub type HandlerId = ChildId;

/// Registration flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
  /// Deliver at most one event, then drop the handler.
  pub once: bool,
}

impl ListenerOptions {
  /// Options for a single-delivery handler.
  pub fn once() -> Self { ListenerOptions { once: true } }
}

/// Something handlers can be attached to by event name.
pub trait EventSource<Ev> {
  fn add_handler(&self, name: &str, handler: EventHandler<Ev>, options: ListenerOptions)
  -> HandlerId;

  fn remove_handler(&self, name: &str, id: HandlerId);
}

struct Listener<Ev> {
  handler: EventHandler<Ev>,
  once: bool,
}

/// In-process event emitter keyed by event name.
///
/// Clones are handles to the same registry.
///
/// ```rust
/// use wheelrx::prelude::*;
///
/// let hub = EventHub::<u32>::new();
/// from_event::<_, _, RxError>(hub.clone(), "spin", ListenerOptions::default())
///   .subscribe_next(|sector| println!("landed on {sector}"));
/// hub.emit("spin", 7);
/// ```
pub struct EventHub<Ev> {
  listeners: Rc<RefCell<HashMap<String, DynamicSubscriptions<Listener<Ev>>>>>,
}

impl<Ev> Clone for EventHub<Ev> {
  fn clone(&self) -> Self { EventHub { listeners: self.listeners.clone() } }
}

impl<Ev> Default for EventHub<Ev> {
  fn default() -> Self { EventHub { listeners: Rc::default() } }
}

impl<Ev: Clone> EventHub<Ev> {
  pub fn new() -> Self { Self::default() }

  /// Deliver `event` to every handler registered under `name` at the moment
  /// of the call. Returns how many handlers were invoked.
  pub fn emit(&self, name: &str, event: Ev) -> usize {
    let handlers: Vec<EventHandler<Ev>> = {
      let mut listeners = self.listeners.borrow_mut();
      let Some(registered) = listeners.get_mut(name) else {
        return 0;
      };
      let handlers = registered.iter().map(|l| l.handler.clone()).collect();
      registered.retain(|l| !l.once);
      handlers
    };
    tracing::trace!(name, handlers = handlers.len(), "event emitted");
    for handler in &handlers {
      handler(event.clone());
    }
    handlers.len()
  }

  /// Number of handlers currently registered under `name`.
  pub fn listener_count(&self, name: &str) -> usize {
    self
      .listeners
      .borrow()
      .get(name)
      .map_or(0, DynamicSubscriptions::len)
  }
}

impl<Ev> EventSource<Ev> for EventHub<Ev> {
  fn add_handler(
    &self, name: &str, handler: EventHandler<Ev>, options: ListenerOptions,
  ) -> HandlerId {
    self
      .listeners
      .borrow_mut()
      .entry(name.to_owned())
      .or_default()
      .add(Listener { handler, once: options.once })
  }

  fn remove_handler(&self, name: &str, id: HandlerId) {
    // The per-name registry is kept even when empty so handler ids are never
    // handed out twice.
    if let Some(registered) = self.listeners.borrow_mut().get_mut(name) {
      registered.remove(id);
    }
  }
}

impl<Ev> Debug for EventHub<Ev> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let listeners = self.listeners.borrow();
    f.debug_map()
      .entries(listeners.iter().map(|(name, l)| (name, l.len())))
      .finish()
  }
}
