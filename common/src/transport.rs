//! ネットワークと保存処理の抽象化
//!
//! ネイティブ（reqwest）とブラウザ（fetch）でそれぞれ実装する

use crate::error::{SaveError, TransportError};
use crate::types::{CsvFile, HistorySnapshot, RecordId, UploadResponse};

/// バックエンドAPIへのリクエスト
///
/// いずれも認証付き。非2xxの応答は `TransportError::Status` にボディごと詰める
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// `GET /history/`
    async fn fetch_history(&self) -> Result<HistorySnapshot, TransportError>;

    /// `POST /upload-csv/`（multipartの `file` フィールド）
    async fn upload_csv(&self, file: &CsvFile) -> Result<UploadResponse, TransportError>;

    /// `GET /report/{record_id}/`
    async fn fetch_report(&self, record_id: &RecordId) -> Result<Vec<u8>, TransportError>;
}

/// 取得したレポートを利用者に渡す（名前を付けて保存）
pub trait ReportSaver {
    fn save_report(&self, filename: &str, bytes: &[u8]) -> Result<(), SaveError>;
}
