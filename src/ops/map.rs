use std::rc::Rc;

use super::lift;
use crate::{observable::Observable, observer::Observer, subscriber::Subscriber};

/// Map operator observer
///
/// Applies the projection with a running index and forwards the result.
pub struct MapObserver<Item, Out, Err> {
  downstream: Subscriber<Out, Err>,
  project: Rc<dyn Fn(Item, usize) -> Out>,
  index: usize,
}

impl<Item, Out, Err> Observer<Item, Err> for MapObserver<Item, Out, Err> {
  fn next(&mut self, value: Item) {
    let mapped = (self.project)(value, self.index);
    self.index += 1;
    self.downstream.next(mapped);
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) { self.downstream.complete() }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Replaces each value with `project(value)`.
pub fn map<Item, Out, Err>(
  project: impl Fn(Item) -> Out + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Out, Err>
where
  Item: 'static,
  Out: 'static,
  Err: 'static,
{
  map_indexed(move |value, _| project(value))
}

/// Replaces each value with `project(value, index)`, where `index` counts the
/// values seen by this subscription, starting at zero.
pub fn map_indexed<Item, Out, Err>(
  project: impl Fn(Item, usize) -> Out + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Out, Err>
where
  Item: 'static,
  Out: 'static,
  Err: 'static,
{
  move |source| {
    let project: Rc<dyn Fn(Item, usize) -> Out> = Rc::new(project);
    lift(source, move |downstream| MapObserver { downstream, project: project.clone(), index: 0 })
  }
}
