//! Browser gateway to the processing service over `gloo-net`.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{File, FileList, FormData, HtmlAnchorElement};

use vaultage::gateway::{batch_files_path, BATCHES_PATH, UPLOAD_FIELD, UPLOAD_PATH};
use vaultage::{
    Batch, BatchId, ClientConfig, DownloadRequest, FileEntry, Gateway, GatewayError,
    GatewayResult, UploadFile,
};

// =============================================================================
// Files
// =============================================================================

/// A file handed over by a drop or the file picker.
#[derive(Clone, Debug)]
pub struct BrowserFile(pub File);

impl BrowserFile {
    pub fn from_list(list: &FileList) -> Vec<Self> {
        (0..list.length())
            .filter_map(|i| list.get(i))
            .map(BrowserFile)
            .collect()
    }
}

impl UploadFile for BrowserFile {
    fn name(&self) -> String {
        self.0.name()
    }

    fn media_type(&self) -> String {
        self.0.type_()
    }
}

// =============================================================================
// Gateway
// =============================================================================

pub struct BrowserGateway {
    config: ClientConfig,
}

impl BrowserGateway {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> GatewayResult<T> {
        let response = Request::get(&self.config.endpoint(path))
            .send()
            .await
            .map_err(network)?;
        ensure_success(response)
            .await?
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

impl Gateway for BrowserGateway {
    type File = BrowserFile;

    async fn upload(&self, file: &BrowserFile) -> GatewayResult<()> {
        let form_data = FormData::new().map_err(js_error)?;
        form_data
            .append_with_blob_and_filename(UPLOAD_FIELD, &file.0, &file.0.name())
            .map_err(js_error)?;

        let response = Request::post(&self.config.endpoint(UPLOAD_PATH))
            .body(form_data)
            .map_err(|e| GatewayError::Request(e.to_string()))?
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
        let url = request.url(&self.config);
        if let Err(e) = click_download_link(&url, &request.suggested_name) {
            log::error!("❌ Download of {} failed: {}", request.path, js_error(e));
        }
    }
}

/// Let the browser fetch and save `url` through a transient `<a download>`.
fn click_download_link(url: &str, file_name: &str) -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("document unavailable"))?;
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")?
        .dyn_into()
        .map_err(JsValue::from)?;
    anchor.set_href(url);
    anchor.set_download(file_name);

    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Ok(())
}

fn network(err: gloo_net::Error) -> GatewayError {
    GatewayError::Network(err.to_string())
}

fn js_error(err: JsValue) -> GatewayError {
    GatewayError::Request(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

async fn ensure_success(response: Response) -> GatewayResult<Response> {
    if response.ok() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::server(response.status(), &body))
}
