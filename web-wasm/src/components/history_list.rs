//! 直近アップロードの一覧

use equipment_viz_common::format::{history_line, EMPTY_HISTORY};
use equipment_viz_common::{HistorySnapshot, WorkflowState};
use leptos::prelude::*;

#[component]
pub fn HistoryList<F>(
    state: RwSignal<WorkflowState>,
    on_reload: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let records = move || state.with(|s| s.history().records().to_vec());
    let is_loading = move || state.with(|s| s.history_in_flight());

    view! {
        <section class="history-list">
            <h2>{format!("Last {} Uploads", HistorySnapshot::SERVER_LIMIT)}</h2>
            <Show
                when=move || !records().is_empty()
                fallback=|| view! { <p class="text-muted">{EMPTY_HISTORY}</p> }
            >
                <ul>
                    <For
                        each=records
                        key=|record| record.id.clone()
                        children=|record| view! { <li>{history_line(&record)}</li> }
                    />
                </ul>
            </Show>
            <button
                class="btn btn-tertiary btn-small"
                disabled=is_loading
                on:click=move |_| on_reload(())
            >
                "再読込"
            </button>
        </section>
    }
}
