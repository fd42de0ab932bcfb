//! ヘッダーコンポーネント

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Chemical Equipment Parameter Visualizer"</h1>
        </header>
    }
}
