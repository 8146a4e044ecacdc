use anyhow::Context;
use clap::Parser;
use doclink_rust::{cli, config, run, scanner};
use cli::{Cli, Commands, TargetArgs};
use config::Config;
use run::{RunMode, RunOptions};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗")?;

    match cli.command {
        Commands::Run { target, output } => {
            println!("🔗 doclink - ドキュメント照合・リンク作成\n");
            let options = run_options(&target, &config, RunMode::Link { output });
            execute(&options, &target)?;
        }

        Commands::Check { target } => {
            println!("🔍 doclink - ドキュメント照合（確認のみ）\n");
            let options = run_options(&target, &config, RunMode::Check);
            execute(&options, &target)?;
        }

        Commands::Config { set_label, set_progress_interval, show } => {
            let mut config = config;

            if let Some(label) = set_label {
                config.set_header_label(label)?;
                println!("✔ 見出しラベルを設定しました");
            }

            if let Some(interval) = set_progress_interval {
                config.set_progress_interval(interval)?;
                println!("✔ 進捗表示の間隔を設定しました");
            }

            if show {
                println!("設定:");
                println!("  見出しラベル: {}", config.header_label);
                println!("  進捗表示の間隔: {}行", config.progress_interval);
                if let Ok(path) = Config::config_path() {
                    println!("  設定ファイル: {}", path.display());
                }
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_options(target: &TargetArgs, config: &Config, mode: RunMode) -> RunOptions {
    RunOptions {
        root: target.root.clone(),
        overrides: scanner::Overrides {
            workbook: target.workbook.clone(),
            folder: target.folder.clone(),
        },
        header_label: target.label.clone().unwrap_or_else(|| config.header_label.clone()),
        progress_interval: target.progress_interval.unwrap_or(config.progress_interval),
        mode,
    }
}

fn execute(options: &RunOptions, target: &TargetArgs) -> anyhow::Result<()> {
    let summary = run::execute(options).context("照合を中止しました")?;

    if let Some(path) = &summary.saved_to {
        println!("✔ 台帳を保存: {}", path.display());
    }

    match &summary.errata_path {
        Some(path) => println!(
            "⚠ 差異あり（余分なファイル {}件、欠落 {}件）: {}",
            summary.result.extraneous.len(),
            summary.result.missing.len(),
            path.display()
        ),
        None => println!("✔ 差異なし（差異リストは不要です）"),
    }

    if let Some(json_path) = &target.summary_json {
        let json = serde_json::to_string_pretty(&summary.result)?;
        std::fs::write(json_path, json)
            .with_context(|| format!("JSONを保存できません: {}", json_path.display()))?;
        println!("✔ 照合結果を保存: {}", json_path.display());
    }

    println!("\n✅ ハイパーリンク {}件", summary.result.hyperlinks);
    Ok(())
}
