//! 集計値からグラフ用データへの変換

use crate::types::EquipmentSummary;
use serde::Serialize;

/// 系列ラベル
pub const SERIES_LABEL: &str = "Equipment Count";

/// 棒グラフ1系列分
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<u64>,
}

/// グラフライブラリにそのまま渡せる形（labels + datasets）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartSeries {
    /// ラベルと値の組
    pub fn points(&self) -> impl Iterator<Item = (&str, u64)> {
        let values = self.datasets.first().map(|d| d.data.as_slice()).unwrap_or(&[]);
        self.labels.iter().map(String::as_str).zip(values.iter().copied())
    }

    pub fn max_value(&self) -> u64 {
        self.points().map(|(_, v)| v).max().unwrap_or(0)
    }
}

/// 種別分布を1系列の棒グラフデータにする
///
/// 集計値が無い、または `type_distribution` が無い場合は `None`。
/// 並び順は元のマッピングのまま
pub fn project(summary: Option<&EquipmentSummary>) -> Option<ChartSeries> {
    let distribution = summary?.type_distribution.as_ref()?;

    let (labels, data): (Vec<String>, Vec<u64>) = distribution
        .iter()
        .map(|(label, count)| (label.to_string(), count))
        .unzip();

    Some(ChartSeries {
        labels,
        datasets: vec![Dataset {
            label: SERIES_LABEL.to_string(),
            data,
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeDistribution;

    fn summary_with(dist: Option<TypeDistribution>) -> EquipmentSummary {
        EquipmentSummary {
            type_distribution: dist,
            ..Default::default()
        }
    }

    #[test]
    fn test_project_none() {
        assert_eq!(project(None), None);
        assert_eq!(project(Some(&summary_with(None))), None);
    }

    #[test]
    fn test_project_single_type() {
        let summary: EquipmentSummary =
            serde_json::from_str(r#"{"type_distribution": {"Pump": 2}}"#).unwrap();
        let series = project(Some(&summary)).unwrap();

        assert_eq!(series.labels, vec!["Pump"]);
        assert_eq!(series.datasets.len(), 1);
        assert_eq!(series.datasets[0].label, "Equipment Count");
        assert_eq!(series.datasets[0].data, vec![2]);
    }

    #[test]
    fn test_project_keeps_order_and_is_idempotent() {
        let dist: TypeDistribution = vec![("Valve", 1), ("Pump", 5), ("Reactor", 3)]
            .into_iter()
            .collect();
        let summary = summary_with(Some(dist));

        let first = project(Some(&summary)).unwrap();
        let second = project(Some(&summary)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.labels, vec!["Valve", "Pump", "Reactor"]);
        assert_eq!(first.max_value(), 5);
    }

    #[test]
    fn test_project_empty_distribution() {
        let series = project(Some(&summary_with(Some(TypeDistribution::new())))).unwrap();
        assert!(series.labels.is_empty());
        assert_eq!(series.max_value(), 0);
    }

    #[test]
    fn test_chart_series_serialize_shape() {
        let dist: TypeDistribution = vec![("Pump", 2)].into_iter().collect();
        let series = project(Some(&summary_with(Some(dist)))).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        assert_eq!(
            json,
            r#"{"labels":["Pump"],"datasets":[{"label":"Equipment Count","data":[2]}]}"#
        );
    }
}
