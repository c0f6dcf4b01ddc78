//! Scripted gateway for controller tests.
//!
//! Every operation pops the next scripted reply. Replies are oneshot
//! receivers, so a test can leave a request hanging and resolve it later to
//! reproduce out-of-order completions.

use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::VecDeque;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{Gateway, UploadFile, XLSX_MEDIA_TYPE};
use crate::models::{Batch, BatchId, DownloadRequest, FileEntry};

type Reply<T> = oneshot::Receiver<GatewayResult<T>>;
pub(crate) type Responder<T> = oneshot::Sender<GatewayResult<T>>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct TestFile {
    name: String,
    media_type: String,
}

impl TestFile {
    pub(crate) fn new(name: &str, media_type: &str) -> Self {
        Self {
            name: name.to_string(),
            media_type: media_type.to_string(),
        }
    }

    pub(crate) fn xlsx(name: &str) -> Self {
        Self::new(name, XLSX_MEDIA_TYPE)
    }
}

impl UploadFile for TestFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Call {
    Upload(String),
    ListBatches,
    ListFiles(BatchId),
    Download(DownloadRequest),
}

#[derive(Default)]
pub(crate) struct MockGateway {
    calls: RefCell<Vec<Call>>,
    uploads: RefCell<VecDeque<Reply<()>>>,
    batches: RefCell<VecDeque<Reply<Vec<Batch>>>>,
    files: RefCell<VecDeque<Reply<Vec<FileEntry>>>>,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub(crate) fn count(&self, wanted: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| wanted(c)).count()
    }

    pub(crate) fn reply_upload(&self, result: GatewayResult<()>) {
        self.uploads.borrow_mut().push_back(ready(result));
    }

    pub(crate) fn reply_batches(&self, result: GatewayResult<Vec<Batch>>) {
        self.batches.borrow_mut().push_back(ready(result));
    }

    pub(crate) fn reply_files(&self, result: GatewayResult<Vec<FileEntry>>) {
        self.files.borrow_mut().push_back(ready(result));
    }

    pub(crate) fn defer_upload(&self) -> Responder<()> {
        deferred(&self.uploads)
    }

    pub(crate) fn defer_batches(&self) -> Responder<Vec<Batch>> {
        deferred(&self.batches)
    }

    pub(crate) fn defer_files(&self) -> Responder<Vec<FileEntry>> {
        deferred(&self.files)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }
}

impl Gateway for MockGateway {
    type File = TestFile;

    async fn upload(&self, file: &TestFile) -> GatewayResult<()> {
        self.record(Call::Upload(file.name.clone()));
        next(&self.uploads, "upload").await
    }

    async fn list_batches(&self) -> GatewayResult<Vec<Batch>> {
        self.record(Call::ListBatches);
        next(&self.batches, "list_batches").await
    }

    async fn list_files(&self, batch_id: &BatchId) -> GatewayResult<Vec<FileEntry>> {
        self.record(Call::ListFiles(batch_id.clone()));
        next(&self.files, "list_files").await
    }

    fn download(&self, request: &DownloadRequest) {
        self.record(Call::Download(request.clone()));
    }
}

fn ready<T>(result: GatewayResult<T>) -> Reply<T> {
    let (tx, rx) = oneshot::channel();
    let _ = tx.send(result);
    rx
}

fn deferred<T>(queue: &RefCell<VecDeque<Reply<T>>>) -> Responder<T> {
    let (tx, rx) = oneshot::channel();
    queue.borrow_mut().push_back(rx);
    tx
}

async fn next<T>(queue: &RefCell<VecDeque<Reply<T>>>, operation: &str) -> GatewayResult<T> {
    let reply = queue.borrow_mut().pop_front();
    match reply {
        Some(rx) => rx
            .await
            .unwrap_or_else(|_| Err(GatewayError::Network(format!("{} reply dropped", operation)))),
        None => Err(GatewayError::Network(format!("no scripted reply for {}", operation))),
    }
}

pub(crate) fn batch(id: &str, name: &str, file_count: u64) -> Batch {
    Batch {
        id: id.into(),
        name: name.to_string(),
        created: 1_700_000_000.0,
        file_count,
    }
}

pub(crate) fn file(batch_id: &str, name: &str, size_bytes: u64) -> FileEntry {
    FileEntry {
        name: name.to_string(),
        path: format!("download/{}/{}", batch_id, name),
        size_bytes,
    }
}
