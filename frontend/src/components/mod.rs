//! UI Components for the Vaultage client.
//!
//! # Layout Components
//! - [`Header`] - Application name and service origin
//! - [`Hero`] - Main title and description
//! - [`Footer`] - Page footer
//!
//! # Feature Components
//! - [`DropZone`] - Spreadsheet upload with drag & drop
//! - [`BatchList`] - Processed batches, refresh button
//! - [`FileViewer`] - Files of the selected batch, downloads

mod header;
mod hero;
mod upload;
mod batches;
mod files;
mod footer;

pub use header::*;
pub use hero::*;
pub use upload::*;
pub use batches::*;
pub use files::*;
pub use footer::*;
