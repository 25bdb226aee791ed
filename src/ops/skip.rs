use super::lift;
use crate::{error::RxError, observable::Observable, observer::Observer, subscriber::Subscriber};

pub struct SkipObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  count: usize,
  seen: usize,
}

impl<Item, Err: From<RxError>> Observer<Item, Err> for SkipObserver<Item, Err> {
  fn next(&mut self, value: Item) {
    self.seen += 1;
    if self.seen > self.count {
      self.downstream.next(value);
    }
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    if self.seen > self.count {
      self.downstream.complete();
    } else {
      self
        .downstream
        .error(RxError::NothingAfterSkip { count: self.count }.into());
    }
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Suppresses the first `count` values and forwards the rest.
///
/// A source that completes before anything was forwarded fails with
/// [`RxError::NothingAfterSkip`] instead of completing empty.
pub fn skip<Item, Err>(count: usize) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: From<RxError> + 'static,
{
  move |source| lift(source, move |downstream| SkipObserver { downstream, count, seen: 0 })
}
