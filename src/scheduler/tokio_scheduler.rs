use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tokio::{task::AbortHandle, time::Instant};

use super::{Duration, TaskHandle, TimeSource};

#[derive(Default)]
struct Timers {
  next_id: u64,
  running: HashMap<u64, AbortHandle>,
}

/// Wall-clock time source backed by tokio's timer wheel.
///
/// Callbacks are spawned with `tokio::task::spawn_local`, so scheduling must
/// happen inside a `tokio::task::LocalSet`.
#[derive(Clone)]
pub struct TokioScheduler {
  epoch: Instant,
  timers: Rc<RefCell<Timers>>,
}

impl Default for TokioScheduler {
  fn default() -> Self { TokioScheduler { epoch: Instant::now(), timers: Rc::default() } }
}

impl TokioScheduler {
  pub fn new() -> Self { Self::default() }
}

impl TimeSource for TokioScheduler {
  fn now(&self) -> Duration { self.epoch.elapsed() }

  fn schedule_after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
    let id = {
      let mut timers = self.timers.borrow_mut();
      let id = timers.next_id;
      timers.next_id += 1;
      id
    };
    let timers = self.timers.clone();
    let join = tokio::task::spawn_local(async move {
      tokio::time::sleep(delay).await;
      timers.borrow_mut().running.remove(&id);
      task();
    });
    if !join.is_finished() {
      self
        .timers
        .borrow_mut()
        .running
        .insert(id, join.abort_handle());
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
