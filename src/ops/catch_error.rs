use std::{cell::RefCell, rc::Rc};

use crate::{
  observable::Observable,
  observer::Observer,
  subscriber::Subscriber,
  subscription::{Subscription, Teardown},
};

type Selector<Item, Err, Err2> = dyn Fn(Err, Observable<Item, Err>) -> Observable<Item, Err2>;

/// Hand-off between the recovering observer and the subscribe call.
///
/// An error can arrive before `subscribe_in` has returned the failed source's
/// subscription. The recovery is then parked in `pending` and started by the
/// subscribe call once the failed source is fully torn down.
struct Recovery<Item, Err2> {
  upstream: Option<Subscription>,
  pending: Option<Observable<Item, Err2>>,
}

pub struct CatchErrorObserver<Item, Err, Err2> {
  downstream: Subscriber<Item, Err2>,
  source: Observable<Item, Err>,
  selector: Rc<Selector<Item, Err, Err2>>,
  recovery: Rc<RefCell<Recovery<Item, Err2>>>,
}

impl<Item: 'static, Err: 'static, Err2: 'static> Observer<Item, Err>
  for CatchErrorObserver<Item, Err, Err2>
{
  fn next(&mut self, value: Item) { self.downstream.next(value) }

  fn error(&mut self, err: Err) {
    let recovery = (self.selector)(err, self.source.clone());
    let upstream = self.recovery.borrow_mut().upstream.take();
    match upstream {
      Some(upstream) => {
        tracing::trace!("upstream failed; switching to recovery source");
        upstream.unsubscribe();
        recovery.subscribe_in(self.downstream.subscription(), self.downstream.clone());
      }
      None => self.recovery.borrow_mut().pending = Some(recovery),
    }
  }

  fn complete(&mut self) { self.downstream.complete() }

  fn is_closed(&self) -> bool { self.downstream.is_closed() }
}

/// On upstream error, drops the failed source and continues with the
/// observable returned by `selector(error, source)`.
///
/// Passing the second argument back resubscribes to the same source, which is
/// how [`retry`](super::retry()) is built.
///
/// ```
/// use wheelrx::prelude::*;
///
/// throw_error::<i32, _>(|| RxError::failed("offline"))
///   .catch_error(|_, _| of::<_, RxError>(0))
///   .subscribe_next(|v| assert_eq!(v, 0));
/// ```
pub fn catch_error<Item, Err, Err2>(
  selector: impl Fn(Err, Observable<Item, Err>) -> Observable<Item, Err2> + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err2>
where
  Item: 'static,
  Err: 'static,
  Err2: 'static,
{
  move |source| {
    let selector: Rc<Selector<Item, Err, Err2>> = Rc::new(selector);
    Observable::new(move |downstream: Subscriber<Item, Err2>| {
      let recovery = Rc::new(RefCell::new(Recovery { upstream: None, pending: None }));
      let upstream = source.subscribe_in(
        downstream.subscription(),
        CatchErrorObserver {
          downstream: downstream.clone(),
          source: source.clone(),
          selector: selector.clone(),
          recovery: recovery.clone(),
        },
      );
      let pending = {
        let mut recovery = recovery.borrow_mut();
        recovery.upstream = Some(upstream);
        recovery.pending.take()
      };
      if let Some(pending) = pending {
        tracing::trace!("source failed during subscribe; switching to recovery source");
        pending.subscribe_in(downstream.subscription(), downstream.clone());
      }
      Ok(Teardown::empty())
    })
  }
}
