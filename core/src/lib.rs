//! # Vaultage - client orchestration
//!
//! Drives the Vaultage browser client: upload one spreadsheet, wait for the
//! processing service to produce a batch of output files, browse batches and
//! download their files.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐ UploadCompleted ┌────────────────────┐  RefreshToken  ┌──────────────┐
//! │    Upload    │────────────────▶│ RefreshCoordinator │───────────────▶│  BatchList   │
//! │  Controller  │                 │ (debounced, 1 s)   │                │  Controller  │
//! └──────┬───────┘                 └────────────────────┘                └──────┬───────┘
//!        │                                                          select/back │ Navigator
//!        ▼                                                                      ▼
//! ┌──────────────┐◀──────────────────────────────────────────────────────┌──────────────┐
//! │   Gateway    │                                                       │   FileList   │
//! │ (HTTP, 4 ops)│◀──────────────────────────────────────────────────────│  Controller  │
//! └──────────────┘                                                       └──────────────┘
//! ```
//!
//! Everything runs on one cooperative event loop: controllers keep their
//! state in `Cell`/`RefCell` behind `Rc` and never hold a borrow across an
//! `.await`.
//!
//! ## Modules
//!
//! - [`error`] - Gateway and configuration errors
//! - [`config`] - Service origin and refresh delay
//! - [`models`] - Batches, files, refresh tokens
//! - [`gateway`] - HTTP contract and the [`Gateway`] trait
//! - [`upload`] - Upload lifecycle state machine
//! - [`scheduler`] - Debounced scheduling over a pluggable [`Timer`]
//! - [`refresh`] - Refresh token coordination
//! - [`batches`] - Batch list and selection
//! - [`files`] - File list and downloads
//! - [`navigation`] - List / detail view state
//! - `http` - Native `reqwest` gateway (not on wasm32)

// Core modules
pub mod error;
pub mod config;
pub mod models;

// Plumbing
pub mod events;
pub mod generation;
pub mod scheduler;

// Service access
pub mod gateway;
#[cfg(not(target_arch = "wasm32"))]
pub mod http;

// Controllers
pub mod upload;
pub mod refresh;
pub mod navigation;
pub mod batches;
pub mod files;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, ConfigResult, GatewayError, GatewayResult};
pub use config::{ClientConfig, DEFAULT_BACKEND_URL, POST_UPLOAD_REFRESH_DELAY};
pub use models::{Batch, BatchId, DownloadRequest, FileEntry, RefreshToken};
pub use gateway::{Gateway, UploadFile, SPREADSHEET_MEDIA_TYPES};
pub use scheduler::{DebouncedScheduler, ManualTimer, Timer};
pub use upload::{
    Rejection, Submission, UploadAttempt, UploadCompleted, UploadController, UploadStatus,
};
pub use refresh::RefreshCoordinator;
pub use navigation::{Navigation, Navigator};
pub use batches::{BatchListController, BatchListView};
pub use files::{FileListController, FileListView};

#[cfg(not(target_arch = "wasm32"))]
pub use http::{HttpGateway, LocalFile};
