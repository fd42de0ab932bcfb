//! メインアプリケーションコンポーネント

use crate::api::FetchTransport;
use crate::auth::SignalAuth;
use crate::components::{
    header::Header,
    history_list::HistoryList,
    settings_panel::SettingsPanel,
    summary_panel::SummaryPanel,
    upload_area::UploadArea,
};
use crate::download::{BlobSaver, BrowserWorkflow};
use equipment_viz_common::{ApiConfig, ClientConfig, CsvFile, WorkflowState};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

/// ビルド時に `EQUIPMENT_API_BASE` で上書きできる
const DEFAULT_API_BASE: &str = "/api";

fn api_base() -> &'static str {
    option_env!("EQUIPMENT_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

fn build_workflow(auth: SignalAuth, state: RwSignal<WorkflowState>) -> Rc<BrowserWorkflow> {
    let api = ApiConfig::new(api_base()).unwrap_or_else(|e| {
        gloo::console::warn!(format!("{}; falling back to {}", e, DEFAULT_API_BASE));
        ApiConfig::default()
    });
    let transport = FetchTransport::new(ClientConfig::new(api, auth));

    // ワークフローの状態をシグナルに写す
    let workflow = BrowserWorkflow::new(transport, BlobSaver)
        .with_observer(move |s: &WorkflowState| state.set(s.clone()));
    Rc::new(workflow)
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let auth = SignalAuth::new();
    let state = RwSignal::new(WorkflowState::new());
    let workflow = build_workflow(auth, state);

    // 起動時に履歴を取得
    {
        let workflow = workflow.clone();
        spawn_local(async move {
            let history = workflow.refresh_history().await;
            gloo::console::log!(format!("history loaded: {} uploads", history.len()));
        });
    }

    let on_file_selected = {
        let workflow = workflow.clone();
        move |file: Option<CsvFile>| workflow.select_file(file)
    };

    let on_upload = {
        let workflow = workflow.clone();
        move |_: ()| {
            let workflow = workflow.clone();
            spawn_local(async move { workflow.upload_selected().await });
        }
    };

    let on_download = {
        let workflow = workflow.clone();
        move |_: ()| {
            let workflow = workflow.clone();
            spawn_local(async move { workflow.download_report().await });
        }
    };

    let on_reload_history = {
        let workflow = workflow.clone();
        move |_: ()| {
            let workflow = workflow.clone();
            spawn_local(async move {
                workflow.refresh_history().await;
            });
        }
    };

    view! {
        <div class="container">
            <Header />

            <SettingsPanel username=auth.username password=auth.password />

            <UploadArea
                state=state
                on_file_selected=on_file_selected
                on_upload=on_upload
            />

            <SummaryPanel state=state on_download=on_download />

            <HistoryList state=state on_reload=on_reload_history />
        </div>
    }
}
