use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "doclink")]
#[command(about = "台帳のドキュメントIDとファイルを照合し、ハイパーリンクと差異リストを作成", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 照合してハイパーリンクを書き込み、台帳を保存
    Run {
        #[command(flatten)]
        target: TargetArgs,

        /// 保存先（省略時は台帳を上書き）
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 照合のみ行い差異リストを出力（台帳は保存しない）
    Check {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// 設定を表示/編集
    Config {
        /// 見出しラベルを設定
        #[arg(long)]
        set_label: Option<String>,

        /// 進捗表示の間隔（行数）を設定
        #[arg(long)]
        set_progress_interval: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

/// 照合対象の指定
#[derive(Args, Clone, Debug)]
pub struct TargetArgs {
    /// 台帳とドキュメントフォルダがある作業フォルダ
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// 台帳ファイル（省略時は作業フォルダから自動検出）
    #[arg(short, long)]
    pub workbook: Option<PathBuf>,

    /// ドキュメントフォルダ（省略時は作業フォルダから自動検出）
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// ID列の見出しラベル（設定値より優先）
    #[arg(short, long)]
    pub label: Option<String>,

    /// 進捗表示の間隔（行数、0で非表示）
    #[arg(long)]
    pub progress_interval: Option<usize>,

    /// 照合結果をJSONで保存
    #[arg(long)]
    pub summary_json: Option<PathBuf>,
}
