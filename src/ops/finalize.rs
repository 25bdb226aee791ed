use std::rc::Rc;

use crate::{observable::Observable, subscriber::Subscriber, subscription::Teardown};

/// Calls `action` once the subscription ends, whether by completion, by
/// error or by unsubscribing. Terminal notifications reach the observer
/// before `action` runs.
pub fn finalize<Item, Err>(
  action: impl Fn() + 'static,
) -> impl FnOnce(Observable<Item, Err>) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  move |source| {
    let action: Rc<dyn Fn()> = Rc::new(action);
    Observable::new(move |downstream: Subscriber<Item, Err>| {
      source.subscribe_in(downstream.subscription(), downstream.clone());
      let action = action.clone();
      Ok(Teardown::new(move || action()))
    })
  }
}
