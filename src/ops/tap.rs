use std::rc::Rc;

use super::lift;
use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

struct TapFns<Item, Err> {
  next: Box<dyn Fn(&Item)>,
  error: Box<dyn Fn(&Err)>,
  complete: Box<dyn Fn()>,
}

/// Runs side effects, then forwards every notification unchanged.
pub struct TapObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  fns: Rc<TapFns<Item, Err>>,
}

impl<Item, Err> Observer<Item, Err> for TapObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    (self.fns.next)(&value);
    self.downstream.next(value);
  }

  fn error(&mut self, err: Err) {
    (self.fns.error)(&err);
    self.downstream.error(err);
  }

  fn complete(&mut self) {
    (self.fns.complete)();
    self.downstream.complete();
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Calls `effect` with each value before forwarding it.
pub fn tap<Item, Err>(
  effect: impl Fn(&Item) + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  tap_all(effect, |_| {}, || {})
}

/// Calls the matching side effect for every notification before forwarding
/// it.
pub fn tap_all<Item, Err>(
  next: impl Fn(&Item) + 'static, error: impl Fn(&Err) + 'static, complete: impl Fn() + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| {
    let fns = Rc::new(TapFns {
      next: Box::new(next),
      error: Box::new(error),
      complete: Box::new(complete),
    });
    lift(source, move |downstream| TapObserver { downstream, fns: fns.clone() })
  }
}
