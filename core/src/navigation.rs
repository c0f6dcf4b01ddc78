//! Two-view navigation: the batch list, or one batch's files.

use std::cell::RefCell;

use crate::events::Listeners;
use crate::models::BatchId;

/// Which view is on screen. Exactly one at a time; no deeper drill-down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Navigation {
    #[default]
    ListView,
    DetailView(BatchId),
}

impl Navigation {
    pub fn selected(&self) -> Option<&BatchId> {
        match self {
            Navigation::ListView => None,
            Navigation::DetailView(id) => Some(id),
        }
    }
}

/// Holder of the current [`Navigation`], notifying on every change.
#[derive(Default)]
pub struct Navigator {
    current: RefCell<Navigation>,
    changed: Listeners<Navigation>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Navigation {
        self.current.borrow().clone()
    }

    pub fn subscribe(&self, callback: impl Fn(&Navigation) + 'static) {
        self.changed.subscribe(callback);
    }

    pub(crate) fn open(&self, batch_id: BatchId) {
        self.set(Navigation::DetailView(batch_id));
    }

    pub(crate) fn close(&self) {
        self.set(Navigation::ListView);
    }

    fn set(&self, next: Navigation) {
        if *self.current.borrow() == next {
            return;
        }
        self.current.replace(next.clone());
        self.changed.emit(&next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_open_and_close() {
        let navigator = Navigator::new();
        assert_eq!(navigator.current(), Navigation::ListView);

        navigator.open("b1".into());
        assert_eq!(navigator.current().selected(), Some(&BatchId::from("b1")));

        navigator.close();
        assert_eq!(navigator.current().selected(), None);
    }

    #[test]
    fn test_unchanged_navigation_is_silent() {
        let navigator = Navigator::new();
        let changes = Rc::new(Cell::new(0));
        let sink = changes.clone();
        navigator.subscribe(move |_| sink.set(sink.get() + 1));

        navigator.open("b1".into());
        navigator.open("b1".into());
        navigator.open("b2".into());
        navigator.close();
        navigator.close();

        assert_eq!(changes.get(), 3);
    }
}
