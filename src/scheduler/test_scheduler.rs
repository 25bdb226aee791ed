//! Virtual-time scheduler for deterministic tests of timed pipelines.
//!
//! Time only moves when told to via [`TestScheduler::advance_by`],
//! [`TestScheduler::advance_to`] or [`TestScheduler::flush`]. Due tasks run
//! synchronously inside those calls, earliest deadline first and FIFO among
//! equal deadlines.
//!
//! ```rust
//! use std::{cell::RefCell, rc::Rc};
//!
//! use wheelrx::prelude::*;
//!
//! let scheduler = TestScheduler::new();
//! let fired = Rc::new(RefCell::new(vec![]));
//! let f = fired.clone();
//! timer::<_, RxError>(Duration::from_millis(100), false, scheduler.clone())
//!   .subscribe_next(move |v| f.borrow_mut().push(v));
//!
//! scheduler.advance_by(Duration::from_millis(99));
//! assert!(fired.borrow().is_empty());
//! scheduler.advance_by(Duration::from_millis(1));
//! assert_eq!(*fired.borrow(), vec![0]);
//! ```

use std::{
  cell::RefCell,
  cmp::Ordering,
  collections::BinaryHeap,
  fmt::{Debug, Formatter},
  rc::Rc,
};

use super::{Duration, TaskHandle, TimeSource};

// ==================== Internal State ====================

#[derive(Default)]
struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: u64,
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: u64,
  task: Box<dyn FnOnce()>,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

// ==================== TestScheduler ====================

/// A virtual clock and task queue.
///
/// Clones share the same clock and queue.
#[derive(Clone, Default)]
pub struct TestScheduler(Rc<RefCell<TestSchedulerState>>);

impl TestScheduler {
  /// A scheduler at virtual time zero with an empty queue.
  pub fn new() -> Self { Self::default() }

  /// Number of tasks waiting to run.
  pub fn pending_count(&self) -> usize { self.0.borrow().task_queue.len() }

  pub fn is_empty(&self) -> bool { self.0.borrow().task_queue.is_empty() }

  /// Move time forward by `duration`, running every task due on the way.
  pub fn advance_by(&self, duration: Duration) {
    let target = self.0.borrow().virtual_time + duration;
    self.advance_to(target);
  }

  /// Move time forward to `target`, running every task due on the way.
  /// Targets in the past leave the clock where it is.
  pub fn advance_to(&self, target: Duration) {
    self.execute_tasks_until(Some(target));
    let mut state = self.0.borrow_mut();
    if state.virtual_time < target {
      state.virtual_time = target;
    }
  }

  /// Run tasks until the queue is empty, jumping the clock to each deadline.
  ///
  /// Never returns while a repeating timer is still subscribed.
  pub fn flush(&self) { self.execute_tasks_until(None); }

  fn execute_tasks_until(&self, target_time: Option<Duration>) {
    loop {
      let task = {
        let mut state = self.0.borrow_mut();
        let should_stop = state
          .task_queue
          .peek()
          .is_none_or(|peek| target_time.is_some_and(|limit| peek.scheduled_time > limit));
        if should_stop {
          None
        } else {
          let scheduled = state.task_queue.pop();
          if let Some(due) = &scheduled {
            state.virtual_time = state.virtual_time.max(due.scheduled_time);
          }
          scheduled
        }
      };

      let Some(scheduled) = task else {
        break;
      };
      tracing::trace!(task_id = scheduled.task_id, at = ?scheduled.scheduled_time, "virtual task due");
      (scheduled.task)();
    }
  }
}

impl TimeSource for TestScheduler {
  fn now(&self) -> Duration { self.0.borrow().virtual_time }

  fn schedule_after(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskHandle {
    let mut state = self.0.borrow_mut();
    let task_id = state.next_task_id;
    state.next_task_id += 1;
    let scheduled_time = state.virtual_time + delay;
    state.task_queue.push(ScheduledTask { scheduled_time, task_id, task });
    TaskHandle(task_id)
  }

  fn cancel(&self, handle: TaskHandle) {
    self
      .0
      .borrow_mut()
      .task_queue
      .retain(|task| task.task_id != handle.0);
  }
}

impl Debug for TestScheduler {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let state = self.0.borrow();
    f.debug_struct("TestScheduler")
      .field("virtual_time", &state.virtual_time)
      .field("pending", &state.task_queue.len())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;

  fn ms(v: u64) -> Duration { Duration::from_millis(v) }

  #[test]
  fn advance_by_cumulative() {
    let scheduler = TestScheduler::new();
    scheduler.advance_by(ms(100));
    assert_eq!(scheduler.now(), ms(100));
    scheduler.advance_by(ms(50));
    assert_eq!(scheduler.now(), ms(150));
  }

  #[test]
  fn flush_empty_queue() {
    let scheduler = TestScheduler::new();
    scheduler.flush();
    assert_eq!(scheduler.now(), Duration::ZERO);
  }

  #[test]
  fn immediate_and_delayed() {
    let scheduler = TestScheduler::new();
    let results = Rc::new(RefCell::new(Vec::new()));

    let r = results.clone();
    scheduler.schedule_after(Duration::ZERO, Box::new(move || r.borrow_mut().push("immediate")));
    let r = results.clone();
    scheduler.schedule_after(ms(100), Box::new(move || r.borrow_mut().push("delayed")));
    assert_eq!(scheduler.pending_count(), 2);

    scheduler.advance_by(Duration::ZERO);
    assert_eq!(*results.borrow(), vec!["immediate"]);

    scheduler.advance_by(ms(100));
    assert_eq!(*results.borrow(), vec!["immediate", "delayed"]);
  }

  #[test]
  fn cancellation() {
    let scheduler = TestScheduler::new();
    let executed = Rc::new(Cell::new(false));
    let e = executed.clone();
    let handle = scheduler.schedule_after(ms(100), Box::new(move || e.set(true)));
    scheduler.cancel(handle);
    scheduler.cancel(handle);
    assert!(scheduler.is_empty());
    scheduler.advance_by(ms(150));
    assert!(!executed.get());
  }

  #[test]
  fn fifo_ordering_same_time() {
    let scheduler = TestScheduler::new();
    let order = Rc::new(RefCell::new(Vec::new()));
    for i in 0..5 {
      let o = order.clone();
      scheduler.schedule_after(ms(100), Box::new(move || o.borrow_mut().push(i)));
    }
    scheduler.advance_by(ms(100));
    assert_eq!(*order.borrow(), vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn tasks_scheduled_by_tasks_run_when_due() {
    let scheduler = TestScheduler::new();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let (s, sc) = (seen.clone(), scheduler.clone());
    scheduler.schedule_after(
      ms(50),
      Box::new(move || {
        s.borrow_mut().push(sc.now());
        let s = s.clone();
        let inner = sc.clone();
        sc.schedule_after(ms(50), Box::new(move || s.borrow_mut().push(inner.now())));
      }),
    );
    scheduler.advance_by(ms(100));
    assert_eq!(*seen.borrow(), vec![ms(50), ms(100)]);
  }

  #[test]
  fn tasks_beyond_target_time_stay_queued() {
    let scheduler = TestScheduler::new();
    let executed = Rc::new(RefCell::new(Vec::new()));
    for at in [50, 150] {
      let e = executed.clone();
      scheduler.schedule_after(ms(at), Box::new(move || e.borrow_mut().push(at)));
    }
    scheduler.advance_by(ms(100));
    assert_eq!(*executed.borrow(), vec![50]);
    assert_eq!(scheduler.pending_count(), 1);

    scheduler.advance_by(ms(50));
    assert_eq!(*executed.borrow(), vec![50, 150]);
    assert!(scheduler.is_empty());
  }

  #[test]
  fn flush_jumps_clock() {
    let scheduler = TestScheduler::new();
    scheduler.schedule_after(ms(300), Box::new(|| {}));
    scheduler.flush();
    assert_eq!(scheduler.now(), ms(300));
  }
}
