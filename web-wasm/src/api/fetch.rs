//! ブラウザの fetch API によるバックエンド呼び出し

use equipment_viz_common::{
    parse_history, parse_upload_response, ClientConfig, CsvFile, HistorySnapshot, RecordId,
    Transport, TransportError, UploadResponse,
};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

pub struct FetchTransport {
    config: ClientConfig,
}

fn js_error(e: JsValue) -> TransportError {
    TransportError::Network(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// バイト列から Blob を作る
pub fn bytes_to_blob(bytes: &[u8], mime_type: &str) -> Result<Blob, JsValue> {
    let parts = Array::of1(&Uint8Array::from(bytes));
    let props = BlobPropertyBag::new();
    props.set_type(mime_type);
    Blob::new_with_u8_array_sequence_and_options(&parts, &props)
}

impl FetchTransport {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// 送信してボディを返す。非2xxはボディ付きでエラーにする
    async fn send(&self, method: &str, url: &str, body: Option<&JsValue>) -> Result<Vec<u8>, TransportError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        if let Some(body) = body {
            opts.set_body(body);
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        if let Some(authorization) = self.config.authorization() {
            request
                .headers()
                .set("Authorization", &authorization)
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| TransportError::Network("window unavailable".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let buffer = JsFuture::from(resp.array_buffer().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = Uint8Array::new(&buffer).to_vec();

        if !resp.ok() {
            return Err(TransportError::Status {
                status: resp.status(),
                body,
            });
        }
        Ok(body)
    }
}

impl Transport for FetchTransport {
    async fn fetch_history(&self) -> Result<HistorySnapshot, TransportError> {
        let body = self.send("GET", &self.config.api.history_url(), None).await?;
        parse_history(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn upload_csv(&self, file: &CsvFile) -> Result<UploadResponse, TransportError> {
        // Content-Type はブラウザが boundary 付きで設定する
        let form = FormData::new().map_err(js_error)?;
        let blob = bytes_to_blob(&file.contents, CsvFile::MIME_TYPE).map_err(js_error)?;
        form.append_with_blob_and_filename("file", &blob, &file.name)
            .map_err(js_error)?;

        let body = self
            .send("POST", &self.config.api.upload_url(), Some(&form))
            .await?;
        parse_upload_response(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn fetch_report(&self, record_id: &RecordId) -> Result<Vec<u8>, TransportError> {
        self.send("GET", &self.config.api.report_url(record_id), None).await
    }
}
