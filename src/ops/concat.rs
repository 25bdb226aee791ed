use super::merge_all;
use crate::observable::{from_iter, Observable};

/// Subscribes to `sources` one at a time, in order. A source is subscribed
/// only after the previous one completed; an empty list completes at once.
///
/// Sources that complete synchronously are started one after another in a
/// loop, so long lists do not grow the stack. Feeding a value back into a
/// source from a downstream handler panics; see
/// [`merge_all`](super::merge_all()#re-entrancy).
///
/// ```
/// use wheelrx::prelude::*;
///
/// concat(vec![range::<RxError>(1, 2), range(10, 11)]).subscribe_next(|v| print!("{v} "));
/// // 1 2 10 11
/// ```
pub fn concat<Item, Err>(sources: Vec<Observable<Item, Err>>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  from_iter(sources).pipe(concat_all())
}

/// Flattens an observable of observables strictly in order, one inner source
/// at a time.
pub fn concat_all<Item, Err>() -> impl FnOnce(Observable<Observable<Item, Err>, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  merge_all(Some(1))
}
