//! Browser clock for the refresh scheduler.

use gloo_timers::callback::Timeout;
use std::time::Duration;
use vaultage::Timer;

/// `setTimeout`-backed [`Timer`]; dropping the [`Timeout`] clears it.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTimer;

impl Timer for BrowserTimer {
    type Handle = Timeout;

    fn start(&self, delay: Duration, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(timeout_millis(delay), task)
    }
}

fn timeout_millis(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}
