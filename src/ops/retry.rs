use super::catch_error;
use crate::observable::Observable;

/// Resubscribes to the source after an error, at most `count` times. The
/// error that exhausts the budget is forwarded.
///
/// ```
/// use std::{cell::Cell, rc::Rc};
///
/// use wheelrx::prelude::*;
///
/// let attempts = Rc::new(Cell::new(0));
/// let a = attempts.clone();
/// Observable::<i32>::new(move |_| {
///   a.set(a.get() + 1);
///   Err(RxError::failed("unreachable host"))
/// })
/// .retry(2)
/// .subscribe_all(|_| {}, |e| println!("gave up: {e}"), || {});
/// assert_eq!(attempts.get(), 3);
/// ```
pub fn retry<Item, Err>(count: usize) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| retry_source(source, count)
}

fn retry_source<Item: 'static, Err: 'static>(
  source: Observable<Item, Err>, remaining: usize,
) -> Observable<Item, Err> {
  if remaining == 0 {
    return source;
  }
  source.pipe(catch_error(move |_, again| {
    tracing::debug!(remaining, "resubscribing after error");
    retry_source(again, remaining - 1)
  }))
}
