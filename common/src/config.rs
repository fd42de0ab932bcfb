//! API接続設定
//!
//! 接続先と認証情報は起動時に注入する。ソースには埋め込まない

use crate::error::{Error, Result};
use crate::types::RecordId;
use base64::Engine;
use std::fmt;
use std::sync::Arc;

const API_PREFIX: &str = "/api";

/// APIのベースURL（`<origin>/api`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// オリジンまたは `/api` 付きのURLから生成
    pub fn new(origin: &str) -> Result<Self> {
        let trimmed = origin.trim().trim_end_matches('/');
        if trimmed.is_empty() && !origin.trim().starts_with('/') {
            return Err(Error::Config("base URL is empty".into()));
        }

        let base_url = if trimmed.ends_with(API_PREFIX) {
            trimmed.to_string()
        } else {
            format!("{}{}", trimmed, API_PREFIX)
        };

        Ok(Self { base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn history_url(&self) -> String {
        format!("{}/history/", self.base_url)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload-csv/", self.base_url)
    }

    pub fn report_url(&self, record_id: &RecordId) -> String {
        format!("{}/report/{}/", self.base_url, record_id)
    }
}

/// 同一オリジンの `/api`
impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: API_PREFIX.to_string(),
        }
    }
}

/// Basic認証の資格情報
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `Authorization` ヘッダー値
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD.encode(raw)
        )
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// リクエストごとに資格情報を解決する
pub trait AuthProvider {
    fn credentials(&self) -> Option<Credentials>;
}

/// 固定の資格情報
#[derive(Debug, Clone, Default)]
pub struct StaticAuth(Option<Credentials>);

impl StaticAuth {
    pub fn new(credentials: Credentials) -> Self {
        Self(Some(credentials))
    }

    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl AuthProvider for StaticAuth {
    fn credentials(&self) -> Option<Credentials> {
        self.0.clone()
    }
}

/// トランスポートに注入する設定 `{baseUrl, authProvider}`
#[derive(Clone)]
pub struct ClientConfig {
    pub api: ApiConfig,
    pub auth: Arc<dyn AuthProvider + Send + Sync>,
}

impl ClientConfig {
    pub fn new(api: ApiConfig, auth: impl AuthProvider + Send + Sync + 'static) -> Self {
        Self {
            api,
            auth: Arc::new(auth),
        }
    }

    pub fn authorization(&self) -> Option<String> {
        self.auth.credentials().map(|c| c.basic_authorization())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api", &self.api)
            .field("auth", &self.auth.credentials())
            .finish()
    }
}
