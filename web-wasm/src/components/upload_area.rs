//! アップロードエリアコンポーネント

use equipment_viz_common::{CsvFile, WorkflowState};
use js_sys::Uint8Array;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadArea<FF, FU>(
    state: RwSignal<WorkflowState>,
    on_file_selected: FF,
    on_upload: FU,
) -> impl IntoView
where
    FF: Fn(Option<CsvFile>) + 'static + Clone,
    FU: Fn(()) + 'static + Clone,
{
    let is_reading = RwSignal::new(false);
    let reads = ReadSequence::default();
    let is_uploading = move || state.with(|s| s.upload_in_flight());
    let selected_name = move || state.with(|s| s.selected_file().map(|f| f.name.clone()));
    let error_message = move || state.with(|s| s.error_message());

    let on_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let file = input.files().and_then(|files| files.get(0));
        let read_id = reads.start();
        // 読み込み完了までは前のファイルを送らない
        on_file_selected(None);
        match file {
            Some(file) => {
                is_reading.set(true);
                read_file(file, read_id, reads.clone(), is_reading, on_file_selected.clone());
            }
            None => is_reading.set(false),
        }
    };

    view! {
        <div class="upload-area">
            <input
                type="file"
                id="csv-file"
                accept=".csv"
                on:change=on_change
            />
            <p class="text-muted">
                {move || selected_name().unwrap_or_else(|| "CSVファイルを選択してください".to_string())}
            </p>
            <button
                class="btn btn-primary"
                disabled=move || is_uploading() || is_reading.get()
                on:click=move |_| on_upload(())
            >
                {move || if is_uploading() { "Uploading..." } else { "Upload & Analyze" }}
            </button>
            <Show when=move || error_message().is_some()>
                <p class="error">{move || error_message().unwrap_or_default()}</p>
            </Show>
        </div>
    }
}

/// ファイル読み込みの通し番号。最後に選んだファイルの結果だけを使う
#[derive(Clone, Default)]
struct ReadSequence(Rc<Cell<u64>>);

impl ReadSequence {
    fn start(&self) -> u64 {
        let id = self.0.get() + 1;
        self.0.set(id);
        id
    }

    fn is_latest(&self, id: u64) -> bool {
        self.0.get() == id
    }
}

/// ファイルの中身を読み込んでから選択状態にする
fn read_file<F>(
    file: File,
    read_id: u64,
    reads: ReadSequence,
    is_reading: RwSignal<bool>,
    on_file_selected: F,
) where
    F: Fn(Option<CsvFile>) + 'static,
{
    let name = file.name();
    spawn_local(async move {
        let result = JsFuture::from(file.array_buffer()).await;
        if !reads.is_latest(read_id) {
            return;
        }
        match result {
            Ok(buffer) => {
                let contents = Uint8Array::new(&buffer).to_vec();
                on_file_selected(Some(CsvFile::new(name, contents)));
            }
            Err(e) => {
                gloo::console::error!(format!("failed to read {}: {:?}", name, e));
            }
        }
        is_reading.set(false);
    });
}
