use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equipment-viz")]
#[command(about = "化学設備CSVをアップロードして集計・履歴・PDFレポートを取得", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 直近のアップロード履歴を表示
    History,

    /// CSVをアップロードして集計結果を表示
    Upload {
        /// CSVファイルのパス
        #[arg(required = true)]
        file: PathBuf,

        /// PDFレポートもダウンロードする
        #[arg(long)]
        report: bool,

        /// レポートの保存先ディレクトリ
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定（例: http://127.0.0.1:8000）
        #[arg(long)]
        set_base_url: Option<String>,

        /// ユーザー名を設定
        #[arg(long)]
        set_username: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
