use equipment_viz_common::WorkflowError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EquipmentVizError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("認証情報が設定されていません。`equipment-viz config --set-username NAME` と環境変数 EQUIPMENT_API_PASSWORD を設定してください")]
    MissingCredentials,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("{0}")]
    Workflow(#[from] WorkflowError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<equipment_viz_common::Error> for EquipmentVizError {
    fn from(e: equipment_viz_common::Error) -> Self {
        match e {
            equipment_viz_common::Error::Json(e) => EquipmentVizError::JsonParse(e),
            equipment_viz_common::Error::Config(msg) => EquipmentVizError::Config(msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, EquipmentVizError>;
