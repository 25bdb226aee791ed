use std::{
  cell::RefCell,
  collections::HashMap,
  rc::Rc,
  time::Instant,
};

use futures::{
  executor::LocalSpawner,
  future::{AbortHandle, Abortable},
  task::LocalSpawnExt,
};

use super::{Duration, TaskHandle, TimeSource};

#[derive(Default)]
struct Timers {
  next_id: u64,
  running: HashMap<u64, AbortHandle>,
}

/// Wall-clock time source driven by a `futures` [`LocalPool`].
///
/// Each scheduled callback becomes a spawned task that sleeps, then runs the
/// callback on the pool's thread. Nothing fires unless the pool is run.
///
/// ```rust,no_run
/// use futures::executor::LocalPool;
/// use wheelrx::prelude::*;
///
/// let mut pool = LocalPool::new();
/// let scheduler = LocalPoolScheduler::new(pool.spawner());
/// interval::<_, RxError>(Duration::from_millis(10), scheduler)
///   .take(3)
///   .subscribe_next(|tick| println!("tick {tick}"));
/// pool.run();
/// ```
///
/// [`LocalPool`]: futures::executor::LocalPool
#[derive(Clone)]
pub struct LocalPoolScheduler {
  spawner: LocalSpawner,
  epoch: Instant,
  timers: Rc<RefCell<Timers>>,
}

impl LocalPoolScheduler {
  pub fn new(spawner: LocalSpawner) -> Self {
    LocalPoolScheduler { spawner, epoch: Instant::now(), timers: Rc::default() }
  }
}

impl TimeSource for LocalPoolScheduler {
  fn now(&self) -> Duration { self.epoch.elapsed() }

  fn schedule_after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
    let (abort, registration) = AbortHandle::new_pair();
    let id = {
      let mut timers = self.timers.borrow_mut();
      let id = timers.next_id;
      timers.next_id += 1;
      timers.running.insert(id, abort);
      id
    };

    let timers = self.timers.clone();
    let sleeper = Abortable::new(
      async move {
        futures_time::task::sleep(delay.into()).await;
        timers.borrow_mut().running.remove(&id);
        task();
      },
      registration,
    );
    if let Err(err) = self.spawner.spawn_local(async move {
      let _ = sleeper.await;
    }) {
      tracing::warn!(%err, "local pool refused a timer task");
      self.timers.borrow_mut().running.remove(&id);
    }
    TaskHandle(id)
  }

  fn cancel(&self, handle: TaskHandle) {
    let abort = self.timers.borrow_mut().running.remove(&handle.0);
    if let Some(abort) = abort {
      tracing::trace!(task_id = handle.0, "timer task aborted");
      abort.abort();
    }
  }
}
