//! ターミナル表示

use equipment_viz_common::format::{history_lines, summary_lines};
use equipment_viz_common::{ChartSeries, EquipmentSummary, HistorySnapshot, UploadRecord};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_WIDTH: u64 = 40;

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn render_summary(summary: &EquipmentSummary) -> String {
    summary_lines(summary).join("\n")
}

/// 横棒グラフ
pub fn render_chart(series: &ChartSeries) -> String {
    let width = series.points().map(|(l, _)| l.chars().count()).max().unwrap_or(0);
    let max = series.max_value().max(1);

    series
        .points()
        .map(|(label, value)| {
            let len = (value * BAR_WIDTH).div_ceil(max) as usize;
            format!("{:<width$} | {} {}", label, "█".repeat(len), value, width = width)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// ISO 8601 の日時をローカル時刻で表示
pub fn format_uploaded_at(raw: &str) -> Option<String> {
    let parsed = chrono::DateTime::parse_from_rfc3339(raw).ok()?;
    Some(
        parsed
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    )
}

fn history_entry(record: &UploadRecord, line: String) -> String {
    match record.uploaded_at.as_deref().and_then(format_uploaded_at) {
        Some(at) => format!("{}  ({})", line, at),
        None => line,
    }
}

pub fn render_history(history: &HistorySnapshot) -> String {
    let lines = history_lines(history);
    if history.is_empty() {
        return lines.join("\n");
    }

    history
        .records()
        .iter()
        .zip(lines)
        .map(|(record, line)| history_entry(record, line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use equipment_viz_common::{project, TypeDistribution};

    #[test]
    fn test_render_chart() {
        let dist: TypeDistribution = vec![("Pump", 4), ("Valve", 2)].into_iter().collect();
        let summary = EquipmentSummary {
            type_distribution: Some(dist),
            ..Default::default()
        };
        let chart = render_chart(&project(Some(&summary)).unwrap());
        let lines: Vec<&str> = chart.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Pump  | "));
        assert!(lines[0].ends_with(" 4"));
        assert_eq!(lines[0].matches('█').count(), 40);
        assert_eq!(lines[1].matches('█').count(), 20);
    }

    #[test]
    fn test_format_uploaded_at() {
        assert!(format_uploaded_at("2025-01-18T10:20:30.123456Z").is_some());
        assert!(format_uploaded_at("yesterday").is_none());
    }

    #[test]
    fn test_render_history() {
        assert_eq!(render_history(&HistorySnapshot::default()), "No uploads yet.");

        let mut record = UploadRecord::new(1, "a.csv", 3);
        record.uploaded_at = Some("not a date".into());
        let history = HistorySnapshot::new(vec![record, UploadRecord::new(0, "b.csv", 1)]);
        assert_eq!(render_history(&history), "a.csv — 3 items\nb.csv — 1 items");
    }
}
