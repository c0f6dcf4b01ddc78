//! Batch list: fetching, refresh handling and selection.
//!
//! At most one list request is in flight. A `load` arriving meanwhile only
//! marks the list dirty; when the request settles, one more fetch runs. Any
//! number of refresh requests during a fetch therefore yields exactly one
//! follow-up fetch, issued after the last of them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::events::Listeners;
use crate::gateway::Gateway;
use crate::generation::Generations;
use crate::models::{Batch, BatchId, RefreshToken};
use crate::navigation::{Navigation, Navigator};

/// What the batch list view renders.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchListView {
    /// In server order.
    pub batches: Vec<Batch>,
    pub loading: bool,
    pub navigation: Navigation,
}

impl BatchListView {
    pub fn shows_empty_state(&self) -> bool {
        self.batches.is_empty() && !self.loading
    }
}

/// Owner of the batch set and of the [`Navigator`].
pub struct BatchListController<G: Gateway> {
    gateway: Rc<G>,
    navigator: Rc<Navigator>,
    batches: RefCell<Vec<Batch>>,
    loading: Cell<bool>,
    dirty: Cell<bool>,
    generations: Generations,
    last_token: Cell<Option<RefreshToken>>,
    changed: Listeners<()>,
}

impl<G: Gateway> BatchListController<G> {
    pub fn new(gateway: Rc<G>) -> Self {
        Self {
            gateway,
            navigator: Rc::new(Navigator::new()),
            batches: RefCell::new(Vec::new()),
            loading: Cell::new(false),
            dirty: Cell::new(false),
            generations: Generations::new(),
            last_token: Cell::new(None),
            changed: Listeners::new(),
        }
    }

    /// Shared with the file list, which reacts to selections.
    pub fn navigator(&self) -> Rc<Navigator> {
        self.navigator.clone()
    }

    pub fn snapshot(&self) -> BatchListView {
        BatchListView {
            batches: self.batches.borrow().clone(),
            loading: self.loading.get(),
            navigation: self.navigator.current(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    /// Called after every change to the set, the loading flag or navigation.
    pub fn on_change(&self, callback: impl Fn() + 'static) {
        let callback = Rc::new(callback);
        let on_navigation = callback.clone();
        self.changed.subscribe(move |_| callback());
        self.navigator.subscribe(move |_| on_navigation());
    }

    /// React to a refresh token; only newer tokens trigger a fetch.
    ///
    /// The first token observed counts as the mount-time load.
    pub async fn observe(&self, token: RefreshToken) {
        if self.last_token.get().is_some_and(|seen| token <= seen) {
            return;
        }
        self.last_token.set(Some(token));
        self.load().await;
    }

    /// Fetch the batch set and replace the current one.
    ///
    /// Failures are logged and leave the previous set on screen.
    pub async fn load(&self) {
        if self.loading.get() {
            log::debug!("Batch list fetch in flight, queueing one more");
            self.dirty.set(true);
            return;
        }

        self.set_loading(true);
        loop {
            self.dirty.set(false);
            self.fetch_once().await;
            if !self.dirty.get() {
                break;
            }
        }
        self.set_loading(false);
    }

    /// Drill into a batch. No network effect by itself.
    pub fn select(&self, batch_id: BatchId) {
        log::info!("📂 Opening batch {}", batch_id);
        self.navigator.open(batch_id);
    }

    /// Return to the list. The cached set stays; nothing is re-fetched.
    pub fn back_to_list(&self) {
        self.navigator.close();
    }

    async fn fetch_once(&self) {
        let ticket = self.generations.issue();
        let result = self.gateway.list_batches().await;
        if !self.generations.is_current(ticket) {
            log::debug!("Discarding superseded batch list response");
            return;
        }

        match result {
            Ok(batches) => {
                log::info!("📦 {} processed batches", batches.len());
                self.batches.replace(batches);
                self.changed.emit(&());
            }
            Err(e) => log::warn!("Failed to fetch processed batches: {}", e),
        }
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.changed.emit(&());
    }
}
