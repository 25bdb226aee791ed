use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use super::map;
use crate::{
  observable::{from_iter, Observable},
  observer::Observer,
  subscriber::Subscriber,
  subscription::Teardown,
};

struct MergeState<Item, Err> {
  /// Sources waiting for a free concurrency slot, in arrival order.
  waiting: VecDeque<Observable<Item, Err>>,
  outside_completed: bool,
  subscribed: usize,
  concurrent: Option<usize>,
  /// Set while a [`drain`] loop runs further up the stack.
  draining: bool,
}

type SharedState<Item, Err> = Rc<RefCell<MergeState<Item, Err>>>;

/// Observer of the higher-order source.
pub struct OutsideObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  state: SharedState<Item, Err>,
}

/// Observer of one inner source.
pub struct InnerObserver<Item, Err> {
  downstream: Subscriber<Item, Err>,
  state: SharedState<Item, Err>,
}

/// Start queued sources while slots are free, then complete downstream if
/// everything is done.
///
/// Inner sources that complete synchronously re-enter through
/// [`InnerObserver::complete`]; a nested call only frees its slot and leaves
/// the work to the loop already running, so stack depth stays constant no
/// matter how many sources are queued.
fn drain<Item: 'static, Err: 'static>(
  downstream: &Subscriber<Item, Err>, state: &SharedState<Item, Err>,
) {
  {
    let mut state = state.borrow_mut();
    if state.draining {
      return;
    }
    state.draining = true;
  }
  loop {
    let next = {
      let mut state = state.borrow_mut();
      let full = state.concurrent.is_some_and(|limit| state.subscribed >= limit);
      if full || downstream.is_closed() {
        None
      } else {
        let source = state.waiting.pop_front();
        if source.is_some() {
          state.subscribed += 1;
        }
        source
      }
    };
    let Some(source) = next else {
      break;
    };
    source.subscribe_in(
      downstream.subscription(),
      InnerObserver { downstream: downstream.clone(), state: state.clone() },
    );
  }
  let done = {
    let mut state = state.borrow_mut();
    state.draining = false;
    state.outside_completed && state.subscribed == 0 && state.waiting.is_empty()
  };
  if done {
    downstream.complete();
  }
}

impl<Item: 'static, Err: 'static> Observer<Observable<Item, Err>, Err>
  for OutsideObserver<Item, Err>
{
  fn next(&mut self, source: Observable<Item, Err>) {
    {
      let mut state = self.state.borrow_mut();
      state.waiting.push_back(source);
      if state.concurrent.is_some_and(|limit| state.subscribed >= limit) {
        tracing::trace!(waiting = state.waiting.len(), "merge source queued");
      }
    }
    drain(&self.downstream, &self.state);
  }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    self.state.borrow_mut().outside_completed = true;
    drain(&self.downstream, &self.state);
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

impl<Item: 'static, Err: 'static> Observer<Item, Err> for InnerObserver<Item, Err> {
  fn next(&mut self, value: Item) { self.downstream.next(value) }

  fn error(&mut self, err: Err) { self.downstream.error(err) }

  fn complete(&mut self) {
    self.state.borrow_mut().subscribed -= 1;
    drain(&self.downstream, &self.state);
  }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// Flattens an observable of observables, keeping at most `limit` inner
/// sources subscribed at once.
///
/// Values are forwarded as they arrive from any active source. When an active
/// source completes the oldest queued one starts. The result completes once
/// the outer source and every inner source have completed; any error ends it.
/// `None` means unbounded; `Some(0)` behaves like `Some(1)`.
///
/// # Re-entrancy
///
/// All sources feed one downstream subscriber. Pushing a value into any merged
/// source from inside the handler of another merged value is a re-entrant
/// emission and panics. Put an async boundary such as
/// [`delay`](crate::ops::delay()) on the source that is fed back.
pub fn merge_all<Item, Err>(
  limit: Option<usize>,
) -> impl FnOnce(Observable<Observable<Item, Err>, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  let concurrent = limit.map(|limit| limit.max(1));
  move |outside| {
    Observable::new(move |downstream: Subscriber<Item, Err>| {
      let state = Rc::new(RefCell::new(MergeState {
        waiting: VecDeque::new(),
        outside_completed: false,
        subscribed: 0,
        concurrent,
        draining: false,
      }));
      let parent = downstream.subscription().clone();
      outside.subscribe_in(&parent, OutsideObserver { downstream, state });
      Ok(Teardown::empty())
    })
  }
}

/// Subscribes to every source at once and interleaves their values.
/// Completes when all of them have completed, immediately for an empty list.
///
/// Feeding a value back into one of the sources from a downstream handler
/// panics; see [`merge_all`](merge_all()#re-entrancy).
///
/// ```
/// use wheelrx::prelude::*;
///
/// merge(vec![of::<_, RxError>(1), of(2)]).subscribe_next(|v| println!("{v}"));
/// ```
pub fn merge<Item, Err>(sources: Vec<Observable<Item, Err>>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  from_iter(sources).pipe(merge_all(None))
}

/// [`merge`] with at most `limit` sources subscribed at the same time.
pub fn merge_with_limit<Item, Err>(
  sources: Vec<Observable<Item, Err>>, limit: usize,
) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  from_iter(sources).pipe(merge_all(Some(limit)))
}

/// Maps every value to an observable and merges the results, keeping at most
/// `limit` of them subscribed at once.
pub fn merge_map<Item, Out, Err>(
  project: impl Fn(Item) -> Observable<Out, Err> + 'static, limit: Option<usize>,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Out, Err>
where
  Item: 'static,
  Out: 'static,
  Err: 'static,
{
  move |source| source.pipe(map(project)).pipe(merge_all(limit))
}
