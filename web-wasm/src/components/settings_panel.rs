//! 設定パネルコンポーネント
//!
//! 入力値はメモリ上にだけ保持する

use leptos::prelude::*;

#[component]
pub fn SettingsPanel(
    username: RwSignal<String>,
    password: RwSignal<String>,
) -> impl IntoView {
    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="username">"Username"</label>
                    <input
                        type="text"
                        id="username"
                        autocomplete="username"
                        prop:value=move || username.get()
                        on:input=move |ev| {
                            username.set(event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        type="password"
                        id="password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| {
                            password.set(event_target_value(&ev));
                        }
                    />
                </div>
            </div>
        </div>
    }
}
