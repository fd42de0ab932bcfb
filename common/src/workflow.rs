//! アップロード・履歴・レポート取得の制御
//!
//! 状態は `RefCell` で保持し、await をまたいで借用しない。
//! 同じ種類の操作が重なった場合は最後に発行したリクエストの応答だけを反映する。

use crate::error::{ValidationError, WorkflowError};
use crate::format::report_filename;
use crate::state::{Ticket, WorkflowState};
use crate::transport::{ReportSaver, Transport};
use crate::types::{CsvFile, HistorySnapshot};
use std::cell::RefCell;
use tracing::{debug, info, warn};

type Observer = Box<dyn Fn(&WorkflowState)>;

pub struct Workflow<T, S> {
    transport: T,
    saver: S,
    state: RefCell<WorkflowState>,
    observer: Option<Observer>,
}

impl<T: Transport, S: ReportSaver> Workflow<T, S> {
    pub fn new(transport: T, saver: S) -> Self {
        Self {
            transport,
            saver,
            state: RefCell::new(WorkflowState::new()),
            observer: None,
        }
    }

    /// 状態が変わるたびに呼ばれるコールバックを登録
    pub fn with_observer(mut self, observer: impl Fn(&WorkflowState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn saver(&self) -> &S {
        &self.saver
    }

    /// 現在の状態のコピー
    pub fn snapshot(&self) -> WorkflowState {
        self.state.borrow().clone()
    }

    /// 状態を読む（awaitをまたいで保持しないこと）
    pub fn inspect<R>(&self, f: impl FnOnce(&WorkflowState) -> R) -> R {
        f(&self.state.borrow())
    }

    fn update<R>(&self, f: impl FnOnce(&mut WorkflowState) -> R) -> R {
        let result = f(&mut self.state.borrow_mut());
        if let Some(observer) = &self.observer {
            observer(&self.state.borrow());
        }
        result
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.state.borrow().is_current(ticket)
    }

    pub fn select_file(&self, file: Option<CsvFile>) {
        if let Some(f) = &file {
            debug!(file = %f.name, bytes = f.len(), "CSV selected");
        }
        self.update(|s| s.select_file(file));
    }

    /// 履歴を取得して丸ごと置き換える
    ///
    /// 失敗は握りつぶし、既存の履歴をそのまま返す。リトライはしない
    pub async fn refresh_history(&self) -> HistorySnapshot {
        let ticket = self.update(|s| s.begin_history());
        debug!(generation = ticket.generation(), "refreshing upload history");

        let result = self.transport.fetch_history().await;
        match &result {
            Ok(snapshot) => debug!(records = snapshot.len(), "history received"),
            Err(e) => warn!(error = %e, "history refresh failed; keeping previous history"),
        }

        if !self.update(|s| s.finish_history(ticket, result)) {
            debug!(generation = ticket.generation(), "discarding stale history response");
        }

        self.state.borrow().history().clone()
    }

    /// 選択中のファイルをアップロード
    pub async fn upload_selected(&self) {
        let file = self.state.borrow().selected_file().cloned();
        self.upload(file).await;
    }

    /// CSVをアップロードし、成功したら履歴を再取得する
    ///
    /// ファイルが無い場合は通信せずにエラーを設定する。
    /// 失敗しても直前の集計値とレコードIDは消さない
    pub async fn upload(&self, file: Option<CsvFile>) {
        let Some(file) = file else {
            warn!("upload requested without a file");
            self.update(|s| s.reject_upload(ValidationError::NoFileSelected));
            return;
        };

        let ticket = self.update(|s| s.begin_upload());
        info!(file = %file.name, bytes = file.len(), generation = ticket.generation(), "uploading CSV");

        let result = self.transport.upload_csv(&file).await;
        let succeeded = result.is_ok();
        match &result {
            Ok(response) => info!(
                record_id = %response.record_id,
                total_count = response.summary.total_count,
                "upload accepted"
            ),
            Err(e) => warn!(error = %e, "upload failed"),
        }

        if !self.update(|s| s.finish_upload(ticket, result)) {
            warn!(generation = ticket.generation(), "discarding stale upload response");
        }

        // サーバー側の履歴は変わっているので、古い応答でも再取得する
        if succeeded {
            self.refresh_history().await;
        }
    }

    /// 直近のアップロードのPDFレポートを取得して保存する
    pub async fn download_report(&self) {
        let record_id = self.state.borrow().record_id().cloned();
        let Some(record_id) = record_id else {
            warn!("report requested before any successful upload");
            self.update(|s| s.reject_download(ValidationError::NoReportAvailable));
            return;
        };

        let ticket = self.update(|s| s.begin_download());
        info!(record_id = %record_id, generation = ticket.generation(), "downloading report");

        let result = self.transport.fetch_report(&record_id).await;
        if !self.is_current(ticket) {
            debug!(generation = ticket.generation(), "discarding stale report response");
            return;
        }

        let outcome = match result {
            Ok(bytes) => {
                let filename = report_filename(&record_id);
                match self.saver.save_report(&filename, &bytes) {
                    Ok(()) => {
                        info!(file = %filename, bytes = bytes.len(), "report saved");
                        Ok(filename)
                    }
                    Err(e) => {
                        warn!(error = %e, "saving report failed");
                        Err(WorkflowError::from(e))
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "report download failed");
                Err(WorkflowError::from_download_failure(e))
            }
        };

        self.update(|s| s.finish_download(ticket, outcome));
    }
}
