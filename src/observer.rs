//! Observer trait and the partial-observer adapter.
//!
//! An observer consumes up to three kinds of notification: values, an error,
//! and completion. Once an error or completion has been delivered the
//! observer is closed and stays closed.

// ============================================================================
// Observer Trait
// ============================================================================

/// The consumer side of a stream.
///
/// Methods take `&mut self` so that producers can hold an observer behind a
/// shared handle and still deliver terminal notifications from a callback.
pub trait Observer<Item, Err> {
  /// Receive the next value.
  fn next(&mut self, value: Item);

  /// Receive an error. No further notifications follow.
  fn error(&mut self, err: Err);

  /// Receive completion. No further notifications follow.
  fn complete(&mut self);

  /// Whether this observer has stopped accepting notifications.
  ///
  /// Synchronous sources poll this between values so that downstream
  /// operators like `take` can stop an unbounded loop early.
  fn is_closed(&self) -> bool { false }
}

impl<Item, Err, O> Observer<Item, Err> for Box<O>
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }

  #[inline]
  fn is_closed(&self) -> bool { (**self).is_closed() }
}

/// Boxed observer, as stored inside a [`Subscriber`](crate::subscriber::Subscriber).
pub type BoxedObserver<Item, Err> = Box<dyn Observer<Item, Err>>;

// ============================================================================
// ObserverFns - partial observer built from closures
// ============================================================================

/// An observer assembled from optional callbacks.
///
/// Missing callbacks default to no-ops, except that an error arriving with no
/// error callback installed is reported through `tracing`.
///
/// ```rust
/// use wheelrx::prelude::*;
///
/// let observer = ObserverFns::<i32, RxError>::new()
///   .on_next(|v| println!("value {v}"))
///   .on_complete(|| println!("done"));
/// of(1).subscribe(observer);
/// ```
pub struct ObserverFns<Item, Err> {
  next: Option<Box<dyn FnMut(Item)>>,
  error: Option<Box<dyn FnMut(Err)>>,
  complete: Option<Box<dyn FnMut()>>,
}

impl<Item, Err> Default for ObserverFns<Item, Err> {
  fn default() -> Self { Self { next: None, error: None, complete: None } }
}

impl<Item, Err> ObserverFns<Item, Err> {
  pub fn new() -> Self { Self::default() }

  pub fn on_next(mut self, next: impl FnMut(Item) + 'static) -> Self {
    self.next = Some(Box::new(next));
    self
  }

  pub fn on_error(mut self, error: impl FnMut(Err) + 'static) -> Self {
    self.error = Some(Box::new(error));
    self
  }

  pub fn on_complete(mut self, complete: impl FnMut() + 'static) -> Self {
    self.complete = Some(Box::new(complete));
    self
  }
}

impl<Item, Err> Observer<Item, Err> for ObserverFns<Item, Err> {
  fn next(&mut self, value: Item) {
    if let Some(next) = self.next.as_mut() {
      next(value);
    }
  }

  fn error(&mut self, err: Err) {
    match self.error.as_mut() {
      Some(error) => error(err),
      None => tracing::warn!("error notification dropped: observer has no error handler"),
    }
  }

  fn complete(&mut self) {
    if let Some(complete) = self.complete.as_mut() {
      complete();
    }
  }
}
