use super::Observable;
use crate::subscription::Teardown;

/// Creates an observable that, on each subscription, asks `factory` for the
/// observable to actually subscribe to.
///
/// ```rust
/// use wheelrx::prelude::*;
///
/// defer(|| {
///   println!("Hi!");
///   of::<_, RxError>("Hello!")
/// })
/// .subscribe_next(|v| println!("{v}"));
/// // Prints: Hi!\nHello!\n
/// ```
pub fn defer<Item, Err>(
  factory: impl Fn() -> Observable<Item, Err> + 'static,
) -> Observable<Item, Err>
where
  Item: 'static,
  Err: 'static,
{
  Observable::new(move |subscriber| {
    let parent = subscriber.subscription().clone();
    factory().subscribe_in(&parent, subscriber);
    Ok(Teardown::empty())
  })
}
