//! Domain models exchanged with the processing service.
//!
//! # Categories
//!
//! - **Batches** - [`Batch`], [`BatchId`]
//! - **Files** - [`FileEntry`], [`DownloadRequest`]
//! - **Refresh** - [`RefreshToken`]

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::ClientConfig;

// =============================================================================
// Batches
// =============================================================================

/// Identifier of a processing batch, as assigned by the service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BatchId(String);

impl BatchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BatchId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One server-side processing run and its output folder.
///
/// Read-only on the client: the whole set is re-fetched, never patched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
    /// Unix seconds. The service reports folder mtimes, which are fractional.
    pub created: f64,
    pub file_count: u64,
}

impl Batch {
    /// Creation time, if the timestamp is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        if !self.created.is_finite() {
            return None;
        }
        let secs = self.created.floor();
        let nanos = ((self.created - secs) * 1e9) as u32;
        DateTime::from_timestamp(secs as i64, nanos.min(999_999_999))
    }

    /// Creation time rendered in `tz`, or `"—"` when unknown.
    pub fn created_label<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.created_at()
            .map(|at| at.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "—".to_string())
    }

    pub fn file_count_label(&self) -> String {
        match self.file_count {
            1 => "1 file".to_string(),
            n => format!("{} files", n),
        }
    }
}

// =============================================================================
// Files
// =============================================================================

/// A downloadable artifact inside one batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    /// Server-relative path, e.g. `download/Upload-1/report.csv`.
    pub path: String,
    #[serde(rename = "size")]
    pub size_bytes: u64,
}

impl FileEntry {
    /// Size in kibibytes with one decimal, e.g. `"2.0 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.1} KB", self.size_bytes as f64 / 1024.0)
    }

    pub fn download_request(&self) -> DownloadRequest {
        DownloadRequest {
            path: self.path.clone(),
            suggested_name: self.name.clone(),
        }
    }
}

/// A fire-and-forget retrieval: fetch `path` from the service origin and
/// save it as `suggested_name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadRequest {
    pub path: String,
    pub suggested_name: String,
}

impl DownloadRequest {
    pub fn url(&self, config: &ClientConfig) -> String {
        config.endpoint(&self.path)
    }
}

// =============================================================================
// Refresh
// =============================================================================

/// Strictly increasing counter; each increment asks for a batch re-fetch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RefreshToken(u64);

impl RefreshToken {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
