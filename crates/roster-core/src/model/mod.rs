pub mod employee;
pub mod review;

pub use employee::Employee;
pub use review::Review;

use std::cell::RefCell;
use std::rc::Rc;

/// Shared handle to the single live instance of a persisted row
///
/// Identity maps hand out clones of the same `Rc`, so two handles refer to
/// the same row exactly when `Rc::ptr_eq` holds.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wrap a value in a new shared handle
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Format an optional id the way the Display impls print it
pub(crate) fn display_id(id: Option<i64>) -> String {
    id.map_or_else(|| "None".to_string(), |id| id.to_string())
}
