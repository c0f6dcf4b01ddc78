//! Single-file upload lifecycle.
//!
//! ```text
//! Idle ──submit──▶ InProgress ──2xx──────▶ Succeeded ─┐
//!                      │                               │ next submit
//!                      └──error / non-2xx─▶ Failed ────┴──▶ InProgress
//! ```
//!
//! One network call per accepted submission, no automatic retry. A success
//! emits [`UploadCompleted`], which the root wires to the refresh
//! coordinator.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::GatewayError;
use crate::events::Listeners;
use crate::gateway::{spreadsheet_media_type, Gateway, UploadFile, SPREADSHEET_MEDIA_TYPES};

/// Message shown when the service gives no detail.
pub const GENERIC_FAILURE: &str = "Upload failed";

// =============================================================================
// State
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UploadStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

/// The most recent upload and its user-facing message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadAttempt {
    pub status: UploadStatus,
    pub message: String,
}

impl UploadAttempt {
    fn in_progress() -> Self {
        Self {
            status: UploadStatus::InProgress,
            message: String::new(),
        }
    }

    fn succeeded(file_name: &str) -> Self {
        Self {
            status: UploadStatus::Succeeded,
            message: format!("Successfully uploaded {}", file_name),
        }
    }

    fn failed(error: &GatewayError) -> Self {
        Self {
            status: UploadStatus::Failed,
            message: error.detail().unwrap_or(GENERIC_FAILURE).to_string(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.status == UploadStatus::InProgress
    }

    /// Whether the status line should be shown.
    pub fn has_outcome(&self) -> bool {
        matches!(self.status, UploadStatus::Succeeded | UploadStatus::Failed)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Why a selection was dropped before any network call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    Empty,
    TooMany(usize),
    UnsupportedType { name: String, media_type: String },
}

/// Whether the file is a legacy or OOXML workbook.
///
/// Falls back to the extension when the platform declared no media type.
pub fn is_spreadsheet(file: &impl UploadFile) -> bool {
    let media_type = file.media_type();
    let media_type = media_type.trim();
    if media_type.is_empty() {
        return spreadsheet_media_type(&file.name()).is_some();
    }
    SPREADSHEET_MEDIA_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(media_type))
}

/// Pick the one spreadsheet out of a drop or file-picker selection.
pub fn select_spreadsheet<F: UploadFile>(files: Vec<F>) -> Result<F, Rejection> {
    let count = files.len();
    let mut files = files.into_iter();
    let file = match (files.next(), count) {
        (None, _) => return Err(Rejection::Empty),
        (Some(file), 1) => file,
        (Some(_), n) => return Err(Rejection::TooMany(n)),
    };

    if is_spreadsheet(&file) {
        Ok(file)
    } else {
        Err(Rejection::UnsupportedType {
            name: file.name(),
            media_type: file.media_type(),
        })
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Emitted once per successful upload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadCompleted {
    pub file_name: String,
}

/// What a call to [`UploadController::submit`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Submission {
    /// Rejected before any network call; state untouched.
    Ignored(Rejection),
    /// Another upload is in flight; state untouched.
    Busy,
    Succeeded,
    Failed,
}

/// Owner of the [`UploadAttempt`].
pub struct UploadController<G: Gateway> {
    gateway: Rc<G>,
    attempt: RefCell<UploadAttempt>,
    changed: Listeners<UploadAttempt>,
    completed: Listeners<UploadCompleted>,
}

impl<G: Gateway> UploadController<G> {
    pub fn new(gateway: Rc<G>) -> Self {
        Self {
            gateway,
            attempt: RefCell::new(UploadAttempt::default()),
            changed: Listeners::new(),
            completed: Listeners::new(),
        }
    }

    pub fn attempt(&self) -> UploadAttempt {
        self.attempt.borrow().clone()
    }

    /// The surface must refuse drops while this is true.
    pub fn is_busy(&self) -> bool {
        self.attempt.borrow().is_busy()
    }

    pub fn on_change(&self, callback: impl Fn(&UploadAttempt) + 'static) {
        self.changed.subscribe(callback);
    }

    pub fn on_completed(&self, callback: impl Fn(&UploadCompleted) + 'static) {
        self.completed.subscribe(callback);
    }

    /// Validate the selection and upload it.
    pub async fn submit(&self, files: Vec<G::File>) -> Submission {
        let file = match select_spreadsheet(files) {
            Ok(file) => file,
            Err(rejection) => {
                log::debug!("Selection ignored: {:?}", rejection);
                return Submission::Ignored(rejection);
            }
        };
        if self.is_busy() {
            log::warn!("⚠️ Upload already in progress, {} ignored", file.name());
            return Submission::Busy;
        }

        let file_name = file.name();
        self.transition(UploadAttempt::in_progress());
        log::info!("📤 Uploading {}...", file_name);

        match self.gateway.upload(&file).await {
            Ok(()) => {
                log::info!("✅ Uploaded {}", file_name);
                self.transition(UploadAttempt::succeeded(&file_name));
                self.completed.emit(&UploadCompleted { file_name });
                Submission::Succeeded
            }
            Err(e) => {
                log::error!("❌ Upload of {} failed: {}", file_name, e);
                self.transition(UploadAttempt::failed(&e));
                Submission::Failed
            }
        }
    }

    fn transition(&self, next: UploadAttempt) {
        self.attempt.replace(next.clone());
        self.changed.emit(&next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::XLS_MEDIA_TYPE;
    use crate::testing::{Call, MockGateway, TestFile};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;
    use std::cell::Cell;

    fn controller() -> (Rc<MockGateway>, Rc<UploadController<MockGateway>>) {
        let gateway = Rc::new(MockGateway::new());
        let controller = Rc::new(UploadController::new(gateway.clone()));
        (gateway, controller)
    }

    fn record_statuses(
        controller: &UploadController<MockGateway>,
    ) -> Rc<RefCell<Vec<UploadStatus>>> {
        let statuses = Rc::new(RefCell::new(Vec::new()));
        let sink = statuses.clone();
        controller.on_change(move |attempt| sink.borrow_mut().push(attempt.status));
        statuses
    }

    #[test]
    fn test_selection_rules() {
        let none: Vec<TestFile> = Vec::new();
        assert_eq!(select_spreadsheet(none), Err(Rejection::Empty));

        let two = vec![TestFile::xlsx("a.xlsx"), TestFile::xlsx("b.xlsx")];
        assert_eq!(select_spreadsheet(two), Err(Rejection::TooMany(2)));

        let csv = vec![TestFile::new("notes.csv", "text/csv")];
        assert!(matches!(
            select_spreadsheet(csv),
            Err(Rejection::UnsupportedType { .. })
        ));

        let legacy = vec![TestFile::new("legacy.xls", XLS_MEDIA_TYPE)];
        assert!(select_spreadsheet(legacy).is_ok());

        let untyped = vec![TestFile::new("Report.XLSX", "")];
        assert!(select_spreadsheet(untyped).is_ok());

        // A declared type wins over a misleading extension.
        let disguised = vec![TestFile::new("photo.xlsx", "image/png")];
        assert!(select_spreadsheet(disguised).is_err());
    }

    #[test]
    fn test_success_path() {
        let (gateway, controller) = controller();
        let statuses = record_statuses(&controller);
        let completed = Rc::new(RefCell::new(Vec::new()));
        let sink = completed.clone();
        controller.on_completed(move |event| sink.borrow_mut().push(event.file_name.clone()));

        gateway.reply_upload(Ok(()));
        let outcome = block_on(controller.submit(vec![TestFile::xlsx("q3.xlsx")]));

        assert_eq!(outcome, Submission::Succeeded);
        assert_eq!(*statuses.borrow(), vec![UploadStatus::InProgress, UploadStatus::Succeeded]);
        assert_eq!(controller.attempt().message, "Successfully uploaded q3.xlsx");
        assert_eq!(*completed.borrow(), vec!["q3.xlsx".to_string()]);
        assert_eq!(gateway.calls(), vec![Call::Upload("q3.xlsx".into())]);
    }

    #[test]
    fn test_non_spreadsheet_is_ignored() {
        let (gateway, controller) = controller();
        let statuses = record_statuses(&controller);

        for files in [
            vec![TestFile::new("notes.txt", "text/plain")],
            vec![TestFile::new("data.csv", "text/csv")],
            vec![],
        ] {
            let outcome = block_on(controller.submit(files));
            assert!(matches!(outcome, Submission::Ignored(_)));
        }

        assert!(statuses.borrow().is_empty());
        assert!(gateway.calls().is_empty());
        assert_eq!(controller.attempt(), UploadAttempt::default());
    }

    #[test]
    fn test_failure_uses_server_detail() {
        let (gateway, controller) = controller();
        let fired = Rc::new(Cell::new(0));
        let sink = fired.clone();
        controller.on_completed(move |_| sink.set(sink.get() + 1));

        gateway.reply_upload(Err(GatewayError::server(
            400,
            r#"{"detail": "Only Excel files are allowed"}"#,
        )));
        let outcome = block_on(controller.submit(vec![TestFile::xlsx("bad.xlsx")]));

        assert_eq!(outcome, Submission::Failed);
        let attempt = controller.attempt();
        assert_eq!(attempt.status, UploadStatus::Failed);
        assert_eq!(attempt.message, "Only Excel files are allowed");
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn test_failure_without_detail_uses_fallback() {
        let (gateway, controller) = controller();

        gateway.reply_upload(Err(GatewayError::Network("connection refused".into())));
        block_on(controller.submit(vec![TestFile::xlsx("a.xlsx")]));
        assert_eq!(controller.attempt().message, GENERIC_FAILURE);

        gateway.reply_upload(Err(GatewayError::server(500, "Internal Server Error")));
        block_on(controller.submit(vec![TestFile::xlsx("a.xlsx")]));
        assert_eq!(controller.attempt().message, GENERIC_FAILURE);

        // No retry happened behind the user's back.
        assert_eq!(gateway.count(|c| matches!(c, Call::Upload(_))), 2);
    }

    #[test]
    fn test_busy_while_in_progress() {
        let (gateway, controller) = controller();
        let responder = gateway.defer_upload();
        let mut pool = LocalPool::new();

        let first = controller.clone();
        pool.spawner()
            .spawn_local(async move {
                first.submit(vec![TestFile::xlsx("first.xlsx")]).await;
            })
            .unwrap();
        pool.run_until_stalled();
        assert!(controller.is_busy());
        assert_eq!(controller.attempt().message, "");

        let second = block_on(controller.submit(vec![TestFile::xlsx("second.xlsx")]));
        assert_eq!(second, Submission::Busy);

        responder.send(Ok(())).unwrap();
        pool.run_until_stalled();
        assert_eq!(controller.attempt().status, UploadStatus::Succeeded);
        assert_eq!(gateway.count(|c| matches!(c, Call::Upload(_))), 1);
    }

    #[test]
    fn test_next_attempt_goes_straight_to_in_progress() {
        let (gateway, controller) = controller();
        gateway.reply_upload(Err(GatewayError::Network("offline".into())));
        block_on(controller.submit(vec![TestFile::xlsx("a.xlsx")]));

        let statuses = record_statuses(&controller);
        gateway.reply_upload(Ok(()));
        block_on(controller.submit(vec![TestFile::xlsx("a.xlsx")]));

        assert_eq!(*statuses.borrow(), vec![UploadStatus::InProgress, UploadStatus::Succeeded]);
    }
}
