//! 設定パネルの入力値を認証情報として使う

use equipment_viz_common::{AuthProvider, Credentials};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct SignalAuth {
    pub username: RwSignal<String>,
    pub password: RwSignal<String>,
}

impl SignalAuth {
    pub fn new() -> Self {
        Self {
            username: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
        }
    }
}

impl AuthProvider for SignalAuth {
    /// ユーザー名が空なら認証ヘッダーを付けない
    fn credentials(&self) -> Option<Credentials> {
        let username = self.username.get_untracked();
        if username.trim().is_empty() {
            return None;
        }
        Some(Credentials::new(username.trim(), self.password.get_untracked()))
    }
}
