//! Native gateway over `reqwest`.
//!
//! The browser build talks to the service through `gloo-net`; this
//! implementation serves native callers and lets the HTTP contract be
//! exercised against a mock server.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{
    batch_files_path, spreadsheet_media_type, Gateway, UploadFile, BATCHES_PATH, UPLOAD_FIELD,
    UPLOAD_PATH,
};
use crate::models::{Batch, BatchId, DownloadRequest, FileEntry};

/// A spreadsheet read into memory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocalFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, deriving its media type from the extension.
    pub async fn read(path: impl AsRef<Path>) -> GatewayResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let media_type = spreadsheet_media_type(&name).unwrap_or_default();
        Ok(Self::new(name, media_type, bytes))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl UploadFile for LocalFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn media_type(&self) -> String {
        self.media_type.clone()
    }
}

/// `reqwest`-backed [`Gateway`].
#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    config: ClientConfig,
    download_dir: PathBuf,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
            download_dir: PathBuf::from("."),
        }
    }

    /// Directory where [`Gateway::download`] saves files.
    pub fn with_download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.download_dir = dir.into();
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Fetch the requested path and write it under the download directory.
    ///
    /// Only the last component of the suggested name is used.
    pub async fn save_download(&self, request: &DownloadRequest) -> GatewayResult<PathBuf> {
        let file_name = Path::new(&request.suggested_name)
            .file_name()
            .map(|n| n.to_owned())
            .ok_or_else(|| {
                GatewayError::Request(format!("Invalid file name '{}'", request.suggested_name))
            })?;

        let url = request.url(&self.config);
        let response = self.client.get(&url).send().await.map_err(network)?;
        let bytes = ensure_success(response).await?.bytes().await.map_err(network)?;

        tokio::fs::create_dir_all(&self.download_dir).await?;
        let target = self.download_dir.join(file_name);
        tokio::fs::write(&target, &bytes).await?;

        log::info!("💾 Saved {} ({} bytes)", target.display(), bytes.len());
        Ok(target)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let url = self.config.endpoint(path);
        let response = self.client.get(&url).send().await.map_err(network)?;
        let body = ensure_success(response).await?.text().await.map_err(network)?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl Gateway for HttpGateway {
    type File = LocalFile;

    async fn upload(&self, file: &LocalFile) -> GatewayResult<()> {
        let mut part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
        if !file.media_type.is_empty() {
            part = part
                .mime_str(&file.media_type)
                .map_err(|e| GatewayError::Request(e.to_string()))?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.config.endpoint(UPLOAD_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list_batches(&self) -> GatewayResult<Vec<Batch>> {
        self.get_json(BATCHES_PATH).await
    }

    async fn list_files(&self, batch_id: &BatchId) -> GatewayResult<Vec<FileEntry>> {
        self.get_json(&batch_files_path(batch_id)).await
    }

    fn download(&self, request: &DownloadRequest) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::error!("❌ No async runtime, download of {} skipped", request.path);
            return;
        };

        let gateway = self.clone();
        let request = request.clone();
        runtime.spawn(async move {
            if let Err(e) = gateway.save_download(&request).await {
                log::error!("❌ Download of {} failed: {}", request.path, e);
            }
        });
    }
}

fn network(err: reqwest::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

async fn ensure_success(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::server(status.as_u16(), &body))
}
