use super::Observable;
use crate::subscription::Teardown;

/// Creates an observable that emits no items, just terminates with the error
/// built by `factory`. The factory runs once per subscription.
pub fn throw_error<Item, Err>(factory: impl Fn() -> Err + 'static) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  Observable::new(move |subscriber| {
    subscriber.error(factory());
    Ok(Teardown::empty())
  })
}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// ```
/// use wheelrx::prelude::*;
///
/// empty::<i32, RxError>().subscribe_next(|v| println!("{v},"));
/// // Result: nothing printed
/// ```
pub fn empty<Item: 'static, Err: 'static>() -> Observable<Item, Err> {
  Observable::new(|subscriber| {
    subscriber.complete();
    Ok(Teardown::empty())
  })
}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error.
pub fn never<Item: 'static, Err: 'static>() -> Observable<Item, Err> {
  Observable::new(|_| Ok(Teardown::empty()))
}
