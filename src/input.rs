use crate::error::{EquipmentVizError, Result};
use equipment_viz_common::CsvFile;
use std::path::Path;

/// CSVを読み込む（内容の検証はサーバー側）
pub fn load_csv(path: &Path) -> Result<CsvFile> {
    if !path.is_file() {
        return Err(EquipmentVizError::FileNotFound(path.display().to_string()));
    }

    let contents = std::fs::read(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "upload.csv".to_string());

    Ok(CsvFile::new(name, contents))
}
