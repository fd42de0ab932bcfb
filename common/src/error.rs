//! エラー型定義

use thiserror::Error;

/// アップロード失敗時の汎用メッセージ
pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Check CSV and backend.";
/// レポート取得失敗時のメッセージ
pub const DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download PDF report.";
/// 履歴取得失敗時のメッセージ（画面には出さない）
pub const HISTORY_FAILED_MESSAGE: &str = "Failed to load history.";

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

/// ネットワーク呼び出し前に検出されるエラー
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a CSV file first.")]
    NoFileSelected,

    #[error("No report available. Please upload a CSV first.")]
    NoReportAvailable,
}

/// トランスポート層のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request failed with status {status}")]
    Status { status: u16, body: Vec<u8> },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// レスポンスボディの `error` フィールドを取り出す
    pub fn server_message(&self) -> Option<String> {
        match self {
            TransportError::Status { body, .. } => server_error_message(body),
            _ => None,
        }
    }
}

/// レポート保存時のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct SaveError(pub String);

/// ワークフロー操作の失敗。Display はそのままユーザー向けメッセージになる
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{message}")]
    Request {
        message: &'static str,
        cause: TransportError,
    },

    #[error("{0}")]
    ServerMessage(String),

    #[error("Failed to save PDF report: {0}")]
    Save(#[from] SaveError),
}

impl WorkflowError {
    /// アップロード失敗の変換。サーバーのメッセージがあればそちらを優先
    pub fn from_upload_failure(cause: TransportError) -> Self {
        match cause.server_message() {
            Some(message) => WorkflowError::ServerMessage(message),
            None => WorkflowError::Request {
                message: UPLOAD_FAILED_MESSAGE,
                cause,
            },
        }
    }

    /// レポート取得失敗の変換。サーバーの詳細は表示しない
    pub fn from_download_failure(cause: TransportError) -> Self {
        WorkflowError::Request {
            message: DOWNLOAD_FAILED_MESSAGE,
            cause,
        }
    }

    pub fn from_history_failure(cause: TransportError) -> Self {
        WorkflowError::Request {
            message: HISTORY_FAILED_MESSAGE,
            cause,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// `{"error": "..."}` 形式のボディからメッセージを抽出
///
/// 空文字・`false`・`0`・`null` はメッセージなしとして扱う
pub fn server_error_message(body: &[u8]) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        error: Option<serde_json::Value>,
    }

    let parsed: ErrorBody = serde_json::from_slice(body).ok()?;
    match parsed.error? {
        serde_json::Value::Null | serde_json::Value::Bool(false) => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::Number(n) if n.as_f64() == Some(0.0) => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
