//! Minimal single-threaded listener list.
//!
//! Controllers use it to tell the view layer that their state changed and
//! to emit domain events (upload completed, refresh token bumped).

use std::cell::RefCell;
use std::rc::Rc;

/// Callbacks invoked synchronously, in subscription order.
pub struct Listeners<E> {
    callbacks: RefCell<Vec<Rc<dyn Fn(&E)>>>,
}

impl<E> Listeners<E> {
    pub fn new() -> Self {
        Self {
            callbacks: RefCell::new(Vec::new()),
        }
    }

    pub fn subscribe(&self, callback: impl Fn(&E) + 'static) {
        self.callbacks.borrow_mut().push(Rc::new(callback));
    }

    /// Invoke every callback with `event`.
    ///
    /// The list is snapshotted first, so a callback may subscribe further
    /// listeners without a re-entrant borrow.
    pub fn emit(&self, event: &E) {
        let callbacks: Vec<_> = self.callbacks.borrow().iter().cloned().collect();
        for callback in callbacks {
            callback(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<E> Default for Listeners<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_emit_reaches_every_listener() {
        let listeners = Listeners::<u32>::new();
        let total = Rc::new(Cell::new(0));

        for _ in 0..3 {
            let total = total.clone();
            listeners.subscribe(move |n| total.set(total.get() + n));
        }
        listeners.emit(&5);

        assert_eq!(total.get(), 15);
        assert_eq!(listeners.len(), 3);
    }

    #[test]
    fn test_subscribe_during_emit() {
        let listeners = Rc::new(Listeners::<()>::new());
        let inner = listeners.clone();
        listeners.subscribe(move |_| inner.subscribe(|_| {}));

        listeners.emit(&());
        assert_eq!(listeners.len(), 2);
    }
}
