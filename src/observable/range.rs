use super::Observable;
use crate::{error::RxError, subscription::Teardown};

/// Emits the integers `start..=end` synchronously, then completes.
///
/// Both bounds are inclusive. When `end < start` nothing is emitted and the
/// subscriber receives [`RxError::OutOfRange`] instead.
///
/// ```
/// use wheelrx::prelude::*;
///
/// range::<RxError>(1, 3).subscribe_next(|v| print!("{v} "));
/// // 1 2 3
/// ```
pub fn range<Err>(start: i64, end: i64) -> Observable<i64, Err>
where
  Err: From<RxError> + 'static,
{
  Observable::new(move |subscriber| {
    if end < start {
      return Err(RxError::OutOfRange { start, end }.into());
    }
    for v in start..=end {
      if subscriber.is_closed() {
        break;
      }
      subscriber.next(v);
    }
    subscriber.complete();
    Ok(Teardown::empty())
  })
}

#[cfg(test)]
mod test {
  use std::{cell::RefCell, rc::Rc};

  use crate::prelude::*;

  #[test]
  fn inclusive_bounds() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    range::<RxError>(1, 4).subscribe_next(move |v| s.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![1, 2, 3, 4]);
  }

  #[test]
  fn single_value() {
    let seen = Rc::new(RefCell::new(vec![]));
    let s = seen.clone();
    range::<RxError>(-2, -2).subscribe_next(move |v| s.borrow_mut().push(v));
    assert_eq!(*seen.borrow(), vec![-2]);
  }

  #[test]
  fn reversed_bounds_error() {
    let errors = Rc::new(RefCell::new(vec![]));
    let e = errors.clone();
    range::<RxError>(5, 1).subscribe_all(
      |_| panic!("nothing should be emitted"),
      move |err| e.borrow_mut().push(err),
      || panic!("must not complete"),
    );
    assert_eq!(*errors.borrow(), vec![RxError::OutOfRange { start: 5, end: 1 }]);
  }
}
