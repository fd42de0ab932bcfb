//! 集計結果とグラフ

use equipment_viz_common::format::summary_lines;
use equipment_viz_common::{project, ChartSeries, WorkflowState};
use leptos::prelude::*;

#[component]
pub fn SummaryPanel<F>(
    state: RwSignal<WorkflowState>,
    on_download: F,
) -> impl IntoView
where
    F: Fn(()) + 'static + Clone,
{
    let lines = move || state.with(|s| s.summary().map(summary_lines).unwrap_or_default());
    let chart = move || state.with(|s| project(s.summary()));
    let is_downloading = move || state.with(|s| s.download_in_flight());
    // アップロードが一度も成功していなければ出さない
    let display = move || if state.with(|s| s.summary().is_some()) { "" } else { "none" };

    view! {
        <section class="summary-panel" style:display=display>
            <h2>"Summary"</h2>
            <ul class="summary-lines">
                {move || lines().into_iter().map(|line| view! { <li>{line}</li> }).collect_view()}
            </ul>

            {move || chart().map(|series| view! { <BarChart series=series /> })}

            <button
                class="btn btn-secondary"
                disabled=is_downloading
                on:click=move |_| on_download(())
            >
                {move || if is_downloading() { "Generating PDF..." } else { "Download PDF Report" }}
            </button>
        </section>
    }
}

/// 種類別件数の横棒グラフ
#[component]
fn BarChart(series: ChartSeries) -> impl IntoView {
    let max = series.max_value().max(1);
    let label = series
        .datasets
        .first()
        .map(|d| d.label.clone())
        .unwrap_or_default();
    let bars = series
        .points()
        .map(|(name, count)| {
            let width = format!("width: {}%", count * 100 / max);
            view! {
                <div class="bar-row">
                    <span class="bar-label">{name.to_string()}</span>
                    <div class="bar" style=width></div>
                    <span class="bar-value">{count}</span>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="bar-chart">
            <p class="text-muted">{label}</p>
            {bars}
        </div>
    }
}
