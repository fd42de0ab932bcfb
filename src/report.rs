//! レポートPDFの保存先

use equipment_viz_common::{ReportSaver, SaveError};
use std::path::PathBuf;

/// 指定ディレクトリに書き出す
#[derive(Debug, Clone)]
pub struct FileSaver {
    output_dir: PathBuf,
}

impl FileSaver {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn path_for(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }
}

impl ReportSaver for FileSaver {
    fn save_report(&self, filename: &str, bytes: &[u8]) -> Result<(), SaveError> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| SaveError(format!("{}: {}", self.output_dir.display(), e)))?;

        let path = self.path_for(filename);
        std::fs::write(&path, bytes).map_err(|e| SaveError(format!("{}: {}", path.display(), e)))
    }
}
