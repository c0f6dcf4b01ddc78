//! Refresh coordination.
//!
//! Turns "the batch list may be stale" events into [`RefreshToken`] bumps.
//! A manual request bumps at once; a successful upload bumps once after the
//! configured delay, giving the service time to pick up the new file. Uploads
//! landing inside the same window collapse into one bump after the last one.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::events::Listeners;
use crate::models::RefreshToken;
use crate::scheduler::{DebouncedScheduler, Timer};

/// Sole writer of the [`RefreshToken`].
pub struct RefreshCoordinator<T: Timer> {
    token: Cell<RefreshToken>,
    delay: Duration,
    scheduler: DebouncedScheduler<T>,
    bumped: Listeners<RefreshToken>,
}

impl<T: Timer + 'static> RefreshCoordinator<T> {
    pub fn new(timer: T, delay: Duration) -> Rc<Self> {
        Rc::new(Self {
            token: Cell::new(RefreshToken::default()),
            delay,
            scheduler: DebouncedScheduler::new(timer),
            bumped: Listeners::new(),
        })
    }

    pub fn token(&self) -> RefreshToken {
        self.token.get()
    }

    /// Whether a post-upload refresh is still waiting.
    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Called with every new token value.
    pub fn subscribe(&self, callback: impl Fn(&RefreshToken) + 'static) {
        self.bumped.subscribe(callback);
    }

    /// Schedule one refresh after the post-upload delay.
    ///
    /// Dropping the coordinator first cancels it.
    pub fn notify_upload_succeeded(self: &Rc<Self>) {
        let coordinator = Rc::downgrade(self);
        self.scheduler.schedule_after(self.delay, move || {
            if let Some(coordinator) = coordinator.upgrade() {
                coordinator.bump("upload");
            }
        });
        log::debug!("🕑 Refresh scheduled in {:?}", self.delay);
    }

    /// Refresh immediately.
    pub fn request_manual_refresh(&self) {
        self.scheduler.run_now(|| self.bump("manual"));
    }

    fn bump(&self, cause: &str) {
        let token = self.token.get().next();
        self.token.set(token);
        log::info!("🔄 Refresh {} ({})", token, cause);
        self.bumped.emit(&token);
    }
}
