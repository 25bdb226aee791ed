use super::concat;
use crate::observable::{from_iter, Observable};

/// Emits `values` synchronously, then subscribes to the source.
pub fn start_with<Item, Err>(
  values: Vec<Item>,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: Clone + 'static,
  Err: 'static,
{
  move |source| concat(vec![from_iter(values), source])
}
