//! HTTP contract with the processing service.
//!
//! | Method | Path                 | Result                         |
//! |--------|----------------------|--------------------------------|
//! | POST   | `/upload`            | multipart field `file`         |
//! | GET    | `/processed`         | `[{id, name, created, file_count}]` |
//! | GET    | `/processed/{id}`    | `[{name, path, size}]`         |
//! | GET    | `/{path}`            | raw file bytes                 |
//!
//! Implementations carry no business logic; controllers decide what to do
//! with every outcome.

use crate::error::GatewayResult;
use crate::models::{Batch, BatchId, DownloadRequest, FileEntry};

/// Multipart field carrying the spreadsheet.
pub const UPLOAD_FIELD: &str = "file";

pub const UPLOAD_PATH: &str = "upload";
pub const BATCHES_PATH: &str = "processed";

/// Legacy binary workbook (`.xls`).
pub const XLS_MEDIA_TYPE: &str = "application/vnd.ms-excel";

/// OOXML workbook (`.xlsx`).
pub const XLSX_MEDIA_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Media types the drop target accepts.
pub const SPREADSHEET_MEDIA_TYPES: [&str; 2] = [XLS_MEDIA_TYPE, XLSX_MEDIA_TYPE];

/// Spreadsheet media type implied by a file name's extension.
pub fn spreadsheet_media_type(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "xls" => Some(XLS_MEDIA_TYPE),
        "xlsx" => Some(XLSX_MEDIA_TYPE),
        _ => None,
    }
}

/// A file picked by the user, as far as the client can see it.
pub trait UploadFile {
    fn name(&self) -> String;

    /// Media type declared by the platform; may be empty.
    fn media_type(&self) -> String;
}

/// Path listing the files of one batch, with the id encoded as one segment.
pub fn batch_files_path(batch_id: &BatchId) -> String {
    format!("{}/{}", BATCHES_PATH, urlencoding::encode(batch_id.as_str()))
}

/// The four network operations the client performs.
///
/// Futures are awaited on a single-threaded loop and need not be `Send`.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    type File: UploadFile;

    async fn upload(&self, file: &Self::File) -> GatewayResult<()>;

    async fn list_batches(&self) -> GatewayResult<Vec<Batch>>;

    async fn list_files(&self, batch_id: &BatchId) -> GatewayResult<Vec<FileEntry>>;

    /// Start a retrieval and return immediately; completion is not tracked.
    fn download(&self, request: &DownloadRequest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(spreadsheet_media_type("Q3.XLSX"), Some(XLSX_MEDIA_TYPE));
        assert_eq!(spreadsheet_media_type("legacy.xls"), Some(XLS_MEDIA_TYPE));
        assert_eq!(spreadsheet_media_type("notes.csv"), None);
        assert_eq!(spreadsheet_media_type("xlsx"), None);
    }

    #[test]
    fn test_batch_files_path_encodes_segment() {
        assert_eq!(batch_files_path(&"Upload-1_ID".into()), "processed/Upload-1_ID");
        assert_eq!(
            batch_files_path(&"Q3 report/final".into()),
            "processed/Q3%20report%2Ffinal"
        );
    }
}
