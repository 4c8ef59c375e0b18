//! Latest-callback slot shared between a hook and its timer or listener.

use std::cell::RefCell;
use std::rc::Rc;

/// Holds the most recently supplied callback.
///
/// The timer or DOM listener keeps a clone and goes through `call`, so
/// replacing the callback never requires re-binding.
pub struct Latest<A> {
    slot: Rc<RefCell<Box<dyn FnMut(A)>>>,
}

impl<A> Clone for Latest<A> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<A: 'static> Latest<A> {
    pub fn new(callback: impl FnMut(A) + 'static) -> Self {
        Self { slot: Rc::new(RefCell::new(Box::new(callback))) }
    }

    /// Swap in a new callback; the next invocation uses it.
    pub fn replace(&self, callback: impl FnMut(A) + 'static) {
        match self.slot.try_borrow_mut() {
            Ok(mut slot) => *slot = Box::new(callback),
            Err(_) => tracing::warn!("callback replaced while running, keeping the previous one"),
        }
    }

    /// Invoke the current callback. Re-entrant calls are dropped.
    pub fn call(&self, arg: A) {
        if let Ok(mut callback) = self.slot.try_borrow_mut() {
            callback(arg);
        }
    }
}
