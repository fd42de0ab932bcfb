//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use equipment_viz::error::EquipmentVizError;
use equipment_viz::input;
use equipment_viz_common::{TransportError, ValidationError, WorkflowError};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないCSVを指定した場合
#[test]
fn test_load_nonexistent_csv() {
    let result = input::load_csv(Path::new("/nonexistent/path/12345.csv"));
    assert!(matches!(result, Err(EquipmentVizError::FileNotFound(_))));
}

/// ディレクトリを指定した場合
#[test]
fn test_load_directory_as_csv() {
    let dir = tempdir().expect("Failed to create temp dir");
    let result = input::load_csv(dir.path());
    assert!(matches!(result, Err(EquipmentVizError::FileNotFound(_))));
}

/// 内容は検証せずそのまま読み込む
#[test]
fn test_load_csv_keeps_contents() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("plant.csv");
    std::fs::write(&path, "not,really\ncsv").unwrap();

    let csv = input::load_csv(&path).expect("読み込み失敗");
    assert_eq!(csv.name, "plant.csv");
    assert_eq!(csv.contents, b"not,really\ncsv");
}

/// EquipmentVizErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        EquipmentVizError::Config("テスト設定エラー".to_string()),
        EquipmentVizError::MissingCredentials,
        EquipmentVizError::FileNotFound("plant.csv".to_string()),
        EquipmentVizError::Workflow(ValidationError::NoFileSelected.into()),
        EquipmentVizError::Workflow(WorkflowError::from_upload_failure(TransportError::Network(
            "refused".to_string(),
        ))),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 認証情報未設定のメッセージ確認
#[test]
fn test_missing_credentials_message() {
    let display = format!("{}", EquipmentVizError::MissingCredentials);
    assert!(display.contains("EQUIPMENT_API_PASSWORD"));
    assert!(display.contains("equipment-viz config"));
}

/// ワークフローのエラーはユーザー向けメッセージをそのまま表示
#[test]
fn test_workflow_error_is_transparent() {
    let err: EquipmentVizError = WorkflowError::ServerMessage("malformed row 4".to_string()).into();
    assert_eq!(format!("{}", err), "malformed row 4");

    let err: EquipmentVizError = WorkflowError::from(ValidationError::NoReportAvailable).into();
    assert_eq!(format!("{}", err), "No report available. Please upload a CSV first.");
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: EquipmentVizError = io_err.into();

    assert!(matches!(err, EquipmentVizError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換
#[test]
fn test_common_error_conversion() {
    let err: EquipmentVizError = equipment_viz_common::Error::Config("base URL is empty".to_string()).into();
    assert!(matches!(err, EquipmentVizError::Config(_)));

    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: EquipmentVizError = equipment_viz_common::Error::Json(json_err).into();
    assert!(matches!(err, EquipmentVizError::JsonParse(_)));
}
