//! Debounced task scheduling.
//!
//! [`Timer`] abstracts the platform clock: the browser build uses
//! `gloo-timers`, tests use [`ManualTimer`]. [`DebouncedScheduler`] keeps at
//! most one delayed effect pending; scheduling again replaces it, so a burst
//! of requests collapses into one effect after the last of them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// A one-shot timer source.
pub trait Timer {
    /// Cancels the task when dropped before it fires.
    type Handle;

    fn start(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Self::Handle;
}

// =============================================================================
// Debounced Scheduler
// =============================================================================

/// Runs effects now or after a delay, with at most one delayed effect pending.
pub struct DebouncedScheduler<T: Timer> {
    timer: T,
    pending: RefCell<Option<T::Handle>>,
    armed: RefCell<Rc<Cell<bool>>>,
}

impl<T: Timer> DebouncedScheduler<T> {
    pub fn new(timer: T) -> Self {
        Self {
            timer,
            pending: RefCell::new(None),
            armed: RefCell::new(Rc::new(Cell::new(false))),
        }
    }

    /// Run `effect` after `delay`, replacing any effect still pending.
    pub fn schedule_after(&self, delay: Duration, effect: impl FnOnce() + 'static) {
        // One flag per schedule, so a replaced task cannot clear its successor's.
        let armed = Rc::new(Cell::new(true));
        let flag = armed.clone();
        let handle = self.timer.start(
            delay,
            Box::new(move || {
                flag.set(false);
                effect();
            }),
        );

        let replaced = self.pending.replace(Some(handle));
        drop(replaced);
        *self.armed.borrow_mut() = armed;
    }

    /// Run `effect` immediately. A pending delayed effect is left in place.
    pub fn run_now(&self, effect: impl FnOnce()) {
        effect();
    }

    /// Whether a delayed effect is waiting to fire.
    pub fn is_pending(&self) -> bool {
        self.armed.borrow().get()
    }

    /// Drop the pending delayed effect, if any.
    pub fn cancel(&self) {
        let cancelled = self.pending.replace(None);
        drop(cancelled);
        self.armed.borrow().set(false);
    }
}

// =============================================================================
// Manual Timer
// =============================================================================

/// Virtual clock for deterministic timing; tasks fire only in [`advance`].
///
/// Clones share the same clock.
///
/// [`advance`]: ManualTimer::advance
#[derive(Clone, Default)]
pub struct ManualTimer {
    clock: Rc<RefCell<ManualClock>>,
}

#[derive(Default)]
struct ManualClock {
    now: Duration,
    tasks: Vec<ManualTask>,
}

struct ManualTask {
    due: Duration,
    cancelled: Rc<Cell<bool>>,
    run: Box<dyn FnOnce()>,
}

/// Handle returned by [`ManualTimer`]; dropping it cancels the task.
pub struct ManualHandle {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for ManualHandle {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Tasks still waiting to fire.
    pub fn pending(&self) -> usize {
        self.clock
            .borrow()
            .tasks
            .iter()
            .filter(|t| !t.cancelled.get())
            .count()
    }

    /// Move the clock forward, firing due tasks in deadline order.
    ///
    /// Tasks scheduled by a firing task run too if they fall within the window.
    pub fn advance(&self, by: Duration) {
        let target = self.clock.borrow().now + by;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                clock.tasks.retain(|t| !t.cancelled.get());
                let earliest = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| t.due)
                    .map(|(idx, _)| idx);
                earliest.map(|idx| {
                    let task = clock.tasks.remove(idx);
                    clock.now = task.due;
                    task
                })
            };
            match next {
                // Runs outside the borrow so the task may schedule again.
                Some(task) => (task.run)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

impl Timer for ManualTimer {
    type Handle = ManualHandle;

    fn start(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ManualHandle {
        let cancelled = Rc::new(Cell::new(false));
        let mut clock = self.clock.borrow_mut();
        let due = clock.now + delay;
        clock.tasks.push(ManualTask {
            due,
            cancelled: cancelled.clone(),
            run: task,
        });
        ManualHandle { cancelled }
    }
}
