use super::concat;
use crate::observable::{from_iter, Observable};

/// Forwards the source, then emits `values` when (and only when) the source
/// completes normally.
pub fn end_with<Item, Err>(
  values: Vec<Item>,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: 'static,
{
  move |source| concat(vec![source, from_iter(values)])
}
