use std::rc::Rc;

use super::Observable;
use crate::{
  event::{EventHandler, EventSource, ListenerOptions},
  subscription::Teardown,
};

/// Emits every event `source` raises under `name`.
///
/// The handler is registered when subscribed and removed when the
/// subscription is torn down. With [`ListenerOptions::once`] the observable
/// completes right after the first event. Never errors.
pub fn from_event<Src, Ev, Err>(
  source: Src, name: &str, options: ListenerOptions,
) -> Observable<Ev, Err>
where
  Src: EventSource<Ev> + Clone + 'static,
  Ev: 'static,
  Err: 'static,
{
  let name = name.to_owned();
  Observable::new(move |subscriber| {
    let s = subscriber.clone();
    let once = options.once;
    let handler: EventHandler<Ev> = Rc::new(move |event| {
      s.next(event);
      if once {
        s.complete();
      }
    });
    let id = source.add_handler(&name, handler, options);
    let (source, name) = (source.clone(), name.clone());
    Ok(Teardown::new(move || source.remove_handler(&name, id)))
  })
}
