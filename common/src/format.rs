//! 表示用の文字列整形
//!
//! CLIとWebで同じ表記にそろえる

use crate::types::{EquipmentSummary, HistorySnapshot, RecordId, UploadRecord};

/// 履歴が空のときの表示
pub const EMPTY_HISTORY: &str = "No uploads yet.";

/// レポートの保存ファイル名
pub fn report_filename(record_id: &RecordId) -> String {
    format!("equipment_report_{}.pdf", record_id)
}

fn average(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => "-".to_string(),
    }
}

/// 集計値の各行
pub fn summary_lines(summary: &EquipmentSummary) -> Vec<String> {
    vec![
        format!("Total equipment: {}", summary.total_count),
        format!("Average flowrate: {}", average(summary.avg_flowrate)),
        format!("Average pressure: {}", average(summary.avg_pressure)),
        format!("Average temperature: {}", average(summary.avg_temperature)),
    ]
}

pub fn history_line(record: &UploadRecord) -> String {
    format!("{} — {} items", record.filename, record.total_count)
}

pub fn history_lines(history: &HistorySnapshot) -> Vec<String> {
    if history.is_empty() {
        return vec![EMPTY_HISTORY.to_string()];
    }
    history.records().iter().map(history_line).collect()
}
