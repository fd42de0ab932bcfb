//! reqwestによるバックエンドAPI呼び出し
//!
//! タイムアウトは設定せず、reqwestの既定値に任せる

use equipment_viz_common::{
    parse_history, parse_upload_response, ClientConfig, CsvFile, HistorySnapshot, RecordId,
    Transport, TransportError, UploadResponse,
};
use reqwest::multipart::{Form, Part};
use reqwest::RequestBuilder;
use tracing::debug;

use crate::error::{EquipmentVizError, Result};

pub struct HttpTransport {
    client: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("equipment-viz/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| EquipmentVizError::Config(format!("HTTPクライアント初期化失敗: {}", e)))?;
        Ok(Self { client, config })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.config.auth.credentials() {
            Some(c) => request.basic_auth(c.username, Some(c.password)),
            None => request,
        }
    }

    /// 送信してボディを返す。非2xxはボディ付きでエラーにする
    async fn send(&self, request: RequestBuilder) -> std::result::Result<Vec<u8>, TransportError> {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: body.to_vec(),
            });
        }
        Ok(body.to_vec())
    }
}

impl Transport for HttpTransport {
    async fn fetch_history(&self) -> std::result::Result<HistorySnapshot, TransportError> {
        let url = self.config.api.history_url();
        debug!(%url, "GET history");
        let body = self.send(self.client.get(&url)).await?;
        parse_history(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn upload_csv(&self, file: &CsvFile) -> std::result::Result<UploadResponse, TransportError> {
        let url = self.config.api.upload_url();
        debug!(%url, file = %file.name, "POST upload");

        let part = Part::bytes(file.contents.clone())
            .file_name(file.name.clone())
            .mime_str(CsvFile::MIME_TYPE)
            .map_err(|e| TransportError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        let body = self.send(self.client.post(&url).multipart(form)).await?;
        parse_upload_response(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn fetch_report(&self, record_id: &RecordId) -> std::result::Result<Vec<u8>, TransportError> {
        let url = self.config.api.report_url(record_id);
        debug!(%url, "GET report");
        self.send(self.client.get(&url)).await
    }
}
