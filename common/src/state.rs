//! ワークフローの状態
//!
//! 操作ごとに状態（Idle / Pending / Succeeded / Failed）を持ち、
//! リクエストには操作種別ごとの世代番号を振る。最新世代の応答だけを反映する。

use crate::error::{TransportError, ValidationError, WorkflowError};
use crate::types::{CsvFile, EquipmentSummary, HistorySnapshot, RecordId, UploadResponse};

/// 操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    History,
    Upload,
    Download,
}

/// 操作1種類分の状態
#[derive(Debug, Clone, PartialEq)]
pub enum OperationStatus<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(WorkflowError),
}

impl<T> Default for OperationStatus<T> {
    fn default() -> Self {
        OperationStatus::Idle
    }
}

impl<T> OperationStatus<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, OperationStatus::Pending)
    }

    pub fn error(&self) -> Option<&WorkflowError> {
        match self {
            OperationStatus::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            OperationStatus::Succeeded(v) => Some(v),
            _ => None,
        }
    }
}

/// 発行済みリクエストの識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    kind: OperationKind,
    generation: u64,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq)]
struct OperationSlot<T> {
    status: OperationStatus<T>,
    generation: u64,
}

impl<T> Default for OperationSlot<T> {
    fn default() -> Self {
        Self {
            status: OperationStatus::Idle,
            generation: 0,
        }
    }
}

impl<T> OperationSlot<T> {
    fn issue(&mut self, kind: OperationKind) -> Ticket {
        self.generation += 1;
        self.status = OperationStatus::Pending;
        Ticket {
            kind,
            generation: self.generation,
        }
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    fn settle(&mut self, ticket: Ticket, status: OperationStatus<T>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = status;
        true
    }
}

/// 直近の成功したアップロードの結果
///
/// 集計値とレコードIDは常に一緒に更新される
#[derive(Debug, Clone, Default, PartialEq)]
pub enum UploadOutcome {
    #[default]
    None,
    Ready {
        summary: EquipmentSummary,
        record_id: RecordId,
    },
}

impl UploadOutcome {
    pub fn summary(&self) -> Option<&EquipmentSummary> {
        match self {
            UploadOutcome::Ready { summary, .. } => Some(summary),
            UploadOutcome::None => None,
        }
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            UploadOutcome::Ready { record_id, .. } => Some(record_id),
            UploadOutcome::None => None,
        }
    }
}

/// エラー欄に出している内容
#[derive(Debug, Clone, PartialEq)]
enum Reported {
    Operation(OperationKind),
    /// 通信前の入力チェック。実行中のリクエストには影響しない
    Rejected(WorkflowError),
}

/// セッション全体の状態
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    selected_file: Option<CsvFile>,
    outcome: UploadOutcome,
    history: HistorySnapshot,
    upload: OperationSlot<RecordId>,
    download: OperationSlot<String>,
    history_refresh: OperationSlot<usize>,
    /// 画面のエラー欄に対応する、最後に開始・完了・拒否した操作
    reported: Option<Reported>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_file(&self) -> Option<&CsvFile> {
        self.selected_file.as_ref()
    }

    /// ファイル選択を差し替え、表示中のエラーを消す
    pub fn select_file(&mut self, file: Option<CsvFile>) {
        self.selected_file = file;
        self.reported = None;
    }

    pub fn outcome(&self) -> &UploadOutcome {
        &self.outcome
    }

    pub fn summary(&self) -> Option<&EquipmentSummary> {
        self.outcome.summary()
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        self.outcome.record_id()
    }

    pub fn history(&self) -> &HistorySnapshot {
        &self.history
    }

    pub fn upload_status(&self) -> &OperationStatus<RecordId> {
        &self.upload.status
    }

    /// 成功時は保存したファイル名
    pub fn download_status(&self) -> &OperationStatus<String> {
        &self.download.status
    }

    /// 成功時は取得した件数
    pub fn history_status(&self) -> &OperationStatus<usize> {
        &self.history_refresh.status
    }

    pub fn upload_in_flight(&self) -> bool {
        self.upload.status.is_pending()
    }

    pub fn download_in_flight(&self) -> bool {
        self.download.status.is_pending()
    }

    pub fn history_in_flight(&self) -> bool {
        self.history_refresh.status.is_pending()
    }

    /// 画面に出すエラー（アップロード・ダウンロードのみ）
    pub fn error(&self) -> Option<&WorkflowError> {
        match self.reported.as_ref()? {
            Reported::Rejected(e) => Some(e),
            Reported::Operation(OperationKind::Upload) => self.upload.status.error(),
            Reported::Operation(OperationKind::Download) => self.download.status.error(),
            Reported::Operation(OperationKind::History) => None,
        }
    }

    pub fn error_message(&self) -> Option<String> {
        self.error().map(WorkflowError::user_message)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        match ticket.kind {
            OperationKind::History => self.history_refresh.is_current(ticket),
            OperationKind::Upload => self.upload.is_current(ticket),
            OperationKind::Download => self.download.is_current(ticket),
        }
    }

    pub fn begin_history(&mut self) -> Ticket {
        self.history_refresh.issue(OperationKind::History)
    }

    /// 失敗時は既存の履歴を残し、エラー欄にも出さない
    pub fn finish_history(
        &mut self,
        ticket: Ticket,
        result: Result<HistorySnapshot, TransportError>,
    ) -> bool {
        match result {
            Ok(snapshot) => {
                let count = snapshot.len();
                let applied = self
                    .history_refresh
                    .settle(ticket, OperationStatus::Succeeded(count));
                if applied {
                    self.history = snapshot;
                }
                applied
            }
            Err(e) => self.history_refresh.settle(
                ticket,
                OperationStatus::Failed(WorkflowError::from_history_failure(e)),
            ),
        }
    }

    pub fn begin_upload(&mut self) -> Ticket {
        self.reported = Some(Reported::Operation(OperationKind::Upload));
        self.upload.issue(OperationKind::Upload)
    }

    /// エラー欄だけを更新する。実行中のアップロードはそのまま完了を待つ
    pub fn reject_upload(&mut self, error: ValidationError) {
        self.reported = Some(Reported::Rejected(error.into()));
    }

    /// 失敗時も直前の集計値とレコードIDは残す
    pub fn finish_upload(
        &mut self,
        ticket: Ticket,
        result: Result<UploadResponse, TransportError>,
    ) -> bool {
        let applied = match result {
            Ok(response) => {
                let applied = self
                    .upload
                    .settle(ticket, OperationStatus::Succeeded(response.record_id.clone()));
                if applied {
                    self.outcome = UploadOutcome::Ready {
                        summary: response.summary,
                        record_id: response.record_id,
                    };
                }
                applied
            }
            Err(e) => self.upload.settle(
                ticket,
                OperationStatus::Failed(WorkflowError::from_upload_failure(e)),
            ),
        };

        if applied {
            self.reported = Some(Reported::Operation(OperationKind::Upload));
        }
        applied
    }

    pub fn begin_download(&mut self) -> Ticket {
        self.reported = Some(Reported::Operation(OperationKind::Download));
        self.download.issue(OperationKind::Download)
    }

    pub fn reject_download(&mut self, error: ValidationError) {
        self.reported = Some(Reported::Rejected(error.into()));
    }

    pub fn finish_download(&mut self, ticket: Ticket, result: Result<String, WorkflowError>) -> bool {
        let status = match result {
            Ok(filename) => OperationStatus::Succeeded(filename),
            Err(e) => OperationStatus::Failed(e),
        };
        let applied = self.download.settle(ticket, status);
        if applied {
            self.reported = Some(Reported::Operation(OperationKind::Download));
        }
        applied
    }
}
