//! APIペイロードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - EquipmentSummary: サーバーが計算したCSVの集計値
//! - UploadRecord: 過去のアップロード1件
//! - HistorySnapshot: 直近のアップロード一覧（新しい順）
//! - UploadResponse: アップロード成功時のレスポンス

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// サーバー側で採番されるレコードID
///
/// サーバーは整数を返すが、クライアントでは不透明な値として扱う
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i32> for RecordId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0.parse::<i64>() {
            Ok(n) => serializer.serialize_i64(n),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Uint(u64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(RecordId(n.to_string())),
            Raw::Uint(n) => Ok(RecordId(n.to_string())),
            Raw::Str(s) if s.is_empty() => Err(de::Error::custom("record id is empty")),
            Raw::Str(s) => Ok(RecordId(s)),
        }
    }
}

/// 機器種別ごとの件数
///
/// JSONオブジェクトのキー順をそのまま保持する
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TypeDistribution(Vec<(String, u64)>);

impl TypeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存キーの場合は件数を上書き
    pub fn insert(&mut self, label: impl Into<String>, count: u64) {
        let label = label.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(entry) => entry.1 = count,
            None => self.0.push((label, count)),
        }
    }

    pub fn get(&self, label: &str) -> Option<u64> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for TypeDistribution {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut dist = TypeDistribution::new();
        for (label, count) in iter {
            dist.insert(label, count);
        }
        dist
    }
}

impl Serialize for TypeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = TypeDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of equipment type to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dist = TypeDistribution::new();
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    dist.insert(label, count);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// CSV1件分の集計値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSummary {
    #[serde(default)]
    pub total_count: u64,

    #[serde(default)]
    pub avg_flowrate: Option<f64>,

    #[serde(default)]
    pub avg_pressure: Option<f64>,

    #[serde(default)]
    pub avg_temperature: Option<f64>,

    #[serde(default)]
    pub type_distribution: Option<TypeDistribution>,
}

/// 過去のアップロード
///
/// 同一性は `id` のみで判定する
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadRecord {
    pub id: RecordId,
    pub filename: String,
    #[serde(default)]
    pub total_count: u64,

    /// アップロード日時（ISO 8601）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploaded_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_flowrate: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_pressure: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_distribution: Option<TypeDistribution>,
}

impl PartialEq for UploadRecord {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl UploadRecord {
    pub fn new(id: impl Into<RecordId>, filename: impl Into<String>, total_count: u64) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            total_count,
            uploaded_at: None,
            avg_flowrate: None,
            avg_pressure: None,
            avg_temperature: None,
            type_distribution: None,
        }
    }
}

/// 直近アップロードの一覧（新しい順）
///
/// 件数の上限や並び順はサーバーに従う。取得のたびに丸ごと置き換える
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistorySnapshot(Vec<UploadRecord>);

impl HistorySnapshot {
    /// サーバー側で保持される件数
    pub const SERVER_LIMIT: usize = 5;

    pub fn new(records: Vec<UploadRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[UploadRecord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn latest(&self) -> Option<&UploadRecord> {
        self.0.first()
    }
}

impl From<Vec<UploadRecord>> for HistorySnapshot {
    fn from(records: Vec<UploadRecord>) -> Self {
        Self(records)
    }
}

/// アップロード成功時のレスポンス
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub summary: EquipmentSummary,
    pub record_id: RecordId,
}

/// アップロード対象のCSV
///
/// 内容の検証は行わない（サーバー側で解析する）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvFile {
    pub name: String,
    pub contents: Vec<u8>,
}

impl CsvFile {
    pub const MIME_TYPE: &'static str = "text/csv";

    pub fn new(name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// `/upload-csv/` のレスポンスボディをパース
pub fn parse_upload_response(body: &[u8]) -> crate::Result<UploadResponse> {
    Ok(serde_json::from_slice(body)?)
}

/// `/history/` のレスポンスボディをパース
pub fn parse_history(body: &[u8]) -> crate::Result<HistorySnapshot> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_accepts_number_and_string() {
        let numeric: RecordId = serde_json::from_str("7").unwrap();
        assert_eq!(numeric, RecordId::from(7));
        assert_eq!(numeric.to_string(), "7");

        let text: RecordId = serde_json::from_str("\"a1b2\"").unwrap();
        assert_eq!(text.as_str(), "a1b2");

        assert!(serde_json::from_str::<RecordId>("\"\"").is_err());
        assert!(serde_json::from_str::<RecordId>("1.5").is_err());
    }

    #[test]
    fn test_record_id_serializes_numeric_form() {
        assert_eq!(serde_json::to_string(&RecordId::from(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&RecordId::from("x9")).unwrap(), "\"x9\"");
    }

    #[test]
    fn test_type_distribution_keeps_source_order() {
        let dist: TypeDistribution =
            serde_json::from_str(r#"{"Valve": 1, "Pump": 2, "Compressor": 4}"#).unwrap();
        let labels: Vec<&str> = dist.iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["Valve", "Pump", "Compressor"]);
        assert_eq!(dist.get("Compressor"), Some(4));

        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(json, r#"{"Valve":1,"Pump":2,"Compressor":4}"#);
    }

    #[test]
    fn test_parse_upload_response() {
        let body = br#"{
            "summary": {
                "total_count": 3,
                "avg_flowrate": 120.5,
                "avg_pressure": null,
                "avg_temperature": 80.0,
                "type_distribution": {"Pump": 2, "Valve": 1}
            },
            "record_id": 7
        }"#;

        let response = parse_upload_response(body).unwrap();
        assert_eq!(response.record_id, RecordId::from(7));
        assert_eq!(response.summary.total_count, 3);
        assert_eq!(response.summary.avg_flowrate, Some(120.5));
        assert_eq!(response.summary.avg_pressure, None);
        let dist = response.summary.type_distribution.unwrap();
        assert_eq!(dist.get("Pump"), Some(2));
        assert_eq!(dist.get("Valve"), Some(1));
    }

    #[test]
    fn test_parse_upload_response_requires_record_id() {
        let body = br#"{"summary": {"total_count": 1}}"#;
        assert!(parse_upload_response(body).is_err());
    }

    #[test]
    fn test_parse_history_with_server_fields() {
        let body = br#"[
            {"id": 9, "filename": "plant_b.csv", "uploaded_at": "2025-01-18T10:20:30.123456Z",
             "total_count": 12, "avg_flowrate": 1.0, "avg_pressure": 2.0, "avg_temperature": 3.0,
             "type_distribution": {"Pump": 12}},
            {"id": 8, "filename": "plant_a.csv", "total_count": 4}
        ]"#;

        let history = parse_history(body).unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().filename, "plant_b.csv");
        assert_eq!(
            history.records()[0].uploaded_at.as_deref(),
            Some("2025-01-18T10:20:30.123456Z")
        );
        assert_eq!(history.records()[1].total_count, 4);
    }

    #[test]
    fn test_upload_record_identity_is_id() {
        let mut a = UploadRecord::new(3, "a.csv", 1);
        let b = UploadRecord::new(3, "renamed.csv", 10);
        assert_eq!(a, b);
        a.id = RecordId::from(4);
        assert_ne!(a, b);
    }
}
