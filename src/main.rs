use clap::Parser;
use equipment_viz::{api, cli, config, display, error, input, logging, report};
use equipment_viz_common::{project, HistorySnapshot, Workflow};
use cli::{Cli, Commands};
use config::Config;
use error::Result;

type CliWorkflow = Workflow<api::HttpTransport, report::FileSaver>;

fn build_workflow(config: &Config, output_dir: std::path::PathBuf) -> Result<CliWorkflow> {
    let transport = api::HttpTransport::new(config.client_config()?)?;
    Ok(Workflow::new(transport, report::FileSaver::new(output_dir)))
}

async fn load_history(workflow: &CliWorkflow) {
    let pb = display::spinner("履歴を取得中...");
    workflow.refresh_history().await;
    pb.finish_and_clear();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?.with_env();

    match cli.command {
        Commands::History => {
            let workflow = build_workflow(&config, ".".into())?;
            load_history(&workflow).await;

            if let Some(e) = workflow.inspect(|s| s.history_status().error().cloned()) {
                eprintln!("{}", e);
            }
            println!("Last {} Uploads:", HistorySnapshot::SERVER_LIMIT);
            println!("{}", workflow.inspect(|s| display::render_history(s.history())));
        }

        Commands::Upload { file, report, output_dir } => {
            let csv = input::load_csv(&file)?;
            let workflow = build_workflow(&config, output_dir)?;
            load_history(&workflow).await;

            workflow.select_file(Some(csv));
            let pb = display::spinner("アップロード中...");
            workflow.upload_selected().await;
            pb.finish_and_clear();

            if let Some(e) = workflow.inspect(|s| s.error().cloned()) {
                return Err(e.into());
            }

            workflow.inspect(|s| {
                if let Some(summary) = s.summary() {
                    println!("Summary");
                    println!("{}\n", display::render_summary(summary));
                }
                if let Some(series) = project(s.summary()) {
                    println!("Equipment Type Distribution");
                    println!("{}\n", display::render_chart(&series));
                }
                println!("Last {} Uploads:", HistorySnapshot::SERVER_LIMIT);
                println!("{}", display::render_history(s.history()));
            });

            if report {
                let pb = display::spinner("PDFレポートを生成中...");
                workflow.download_report().await;
                pb.finish_and_clear();

                if let Some(e) = workflow.inspect(|s| s.error().cloned()) {
                    return Err(e.into());
                }
                if let Some(name) = workflow.inspect(|s| s.download_status().value().cloned()) {
                    println!("\n✔ レポートを保存: {}", workflow.saver().path_for(&name).display());
                }
            }
        }

        Commands::Config { set_base_url, set_username, show } => {
            let mut config = Config::load()?;

            if let Some(url) = set_base_url {
                config.set_base_url(url)?;
                println!("✔ ベースURLを設定しました");
            }

            if let Some(name) = set_username {
                config.set_username(name)?;
                println!("✔ ユーザー名を設定しました");
            }

            if show {
                let effective = config.with_env();
                println!("設定:");
                println!("  ベースURL: {}", effective.base_url);
                println!("  ユーザー名: {}", effective.username.as_deref().unwrap_or("未設定"));
                println!("  パスワード: {}", if effective.password.is_some() { "設定済み" } else { "未設定" });
            }
        }
    }

    Ok(())
}
