//! File list of the selected batch, and downloads.
//!
//! The set lives only as long as the detail view does. Fetches are tagged
//! with a [`Generations`] ticket: leaving the view or opening another batch
//! stales every outstanding request, so a late answer can never be drawn
//! over the wrong view.

use std::cell::RefCell;
use std::rc::Rc;

use crate::events::Listeners;
use crate::gateway::Gateway;
use crate::generation::Generations;
use crate::models::{BatchId, FileEntry};
use crate::navigation::{Navigation, Navigator};

/// What the file viewer renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileListView {
    pub batch_id: Option<BatchId>,
    pub files: Vec<FileEntry>,
    pub loading: bool,
    /// At least one fetch for `batch_id` has settled.
    pub loaded: bool,
}

impl FileListView {
    pub fn shows_empty_state(&self) -> bool {
        self.loaded && !self.loading && self.files.is_empty()
    }
}

/// Owner of the file set of the batch being viewed.
pub struct FileListController<G: Gateway> {
    gateway: Rc<G>,
    navigator: Rc<Navigator>,
    state: RefCell<FileListView>,
    generations: Generations,
    changed: Listeners<()>,
}

impl<G: Gateway> FileListController<G> {
    pub fn new(gateway: Rc<G>, navigator: Rc<Navigator>) -> Self {
        Self {
            gateway,
            navigator,
            state: RefCell::new(FileListView::default()),
            generations: Generations::new(),
            changed: Listeners::new(),
        }
    }

    pub fn snapshot(&self) -> FileListView {
        self.state.borrow().clone()
    }

    pub fn on_change(&self, callback: impl Fn() + 'static) {
        self.changed.subscribe(move |_| callback());
    }

    /// Bring the file set in line with the current navigation.
    ///
    /// Loads when a different batch is selected, clears on the list view.
    pub async fn sync(&self) {
        match self.navigator.current() {
            Navigation::ListView => {
                if self.state.borrow().batch_id.is_some() {
                    self.reset();
                }
            }
            Navigation::DetailView(batch_id) => {
                let settled_or_fetching = {
                    let state = self.state.borrow();
                    state.batch_id.as_ref() == Some(&batch_id) && (state.loaded || state.loading)
                };
                if !settled_or_fetching {
                    self.load(batch_id).await;
                }
            }
        }
    }

    /// Fetch the files of one batch.
    ///
    /// The answer is applied only if no newer request was issued and the
    /// batch is still the one on screen. Failures are logged and keep
    /// whatever was shown.
    pub async fn load(&self, batch_id: BatchId) {
        let ticket = self.generations.issue();
        self.update(|state| {
            if state.batch_id.as_ref() != Some(&batch_id) {
                *state = FileListView {
                    batch_id: Some(batch_id.clone()),
                    ..FileListView::default()
                };
            }
            state.loading = true;
        });

        let result = self.gateway.list_files(&batch_id).await;

        if !self.generations.is_current(ticket) {
            log::debug!("Discarding superseded file list for {}", batch_id);
            return;
        }
        if self.navigator.current().selected() != Some(&batch_id) {
            // Left the batch without `back()`; forget it so a reselect fetches again.
            log::debug!("Discarding file list for {}, no longer selected", batch_id);
            self.reset();
            return;
        }

        match result {
            Ok(files) => {
                log::info!("🗂️ {} files in {}", files.len(), batch_id);
                self.update(|state| {
                    state.files = files;
                    state.loading = false;
                    state.loaded = true;
                });
            }
            Err(e) => {
                log::warn!("Failed to fetch files of {}: {}", batch_id, e);
                self.update(|state| {
                    state.loading = false;
                    state.loaded = true;
                });
            }
        }
    }

    /// Leave the detail view. The batch list keeps its cached set.
    pub fn back(&self) {
        self.reset();
        self.navigator.close();
    }

    /// Hand a file to the gateway for retrieval; completion is not tracked.
    pub fn download(&self, entry: &FileEntry) {
        log::info!("⬇️ Downloading {}", entry.name);
        self.gateway.download(&entry.download_request());
    }

    fn reset(&self) {
        self.generations.invalidate();
        self.update(|state| *state = FileListView::default());
    }

    fn update(&self, apply: impl FnOnce(&mut FileListView)) {
        apply(&mut self.state.borrow_mut());
        self.changed.emit(&());
    }
}
