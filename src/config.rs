use crate::error::{EquipmentVizError, Result};
use equipment_viz_common::{ApiConfig, ClientConfig, Credentials, StaticAuth};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_BASE_URL: &str = "EQUIPMENT_API_BASE";
pub const ENV_USERNAME: &str = "EQUIPMENT_API_USER";
pub const ENV_PASSWORD: &str = "EQUIPMENT_API_PASSWORD";

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub username: Option<String>,
    /// 保存は非推奨。環境変数 EQUIPMENT_API_PASSWORD を優先する
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            username: None,
            password: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| EquipmentVizError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("equipment-viz").join("config.json"))
    }

    /// 環境変数で上書きした設定
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            self.base_url = base_url;
        }
        if let Some(username) = lookup(ENV_USERNAME) {
            self.username = Some(username);
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = Some(password);
        }
        self
    }

    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Ok(Credentials::new(user.clone(), pass.clone())),
            _ => Err(EquipmentVizError::MissingCredentials),
        }
    }

    /// トランスポートに渡す `{baseUrl, authProvider}`
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api = ApiConfig::new(&self.base_url)?;
        Ok(ClientConfig::new(api, StaticAuth::new(self.credentials()?)))
    }

    pub fn set_base_url(&mut self, base_url: String) -> Result<()> {
        ApiConfig::new(&base_url)?;
        self.base_url = base_url;
        self.save()
    }

    pub fn set_username(&mut self, username: String) -> Result<()> {
        self.username = Some(username);
        self.save()
    }
}
