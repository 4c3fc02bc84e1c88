use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fx-report")]
#[command(about = "為替レート取得・クロスレート計算・Excelレポート送信ツール", long_about = None)]
pub struct Cli {
    /// 省略時は run を既定値で実行
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// レートを取得してExcelに保存し、メールで送信
    Run(RunArgs),

    /// 設定を表示
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run(RunArgs::default())
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// 出力ワークブック（設定ファイルの値を上書き）
    #[arg(short, long)]
    pub workbook: Option<PathBuf>,

    /// 期間の終了日 YYYY-MM-DD（デフォルト: 昨日）
    #[arg(short, long)]
    pub date: Option<NaiveDate>,

    /// メールを送信しない
    #[arg(long)]
    pub no_email: bool,

    /// 結果の日付を旧形式（先頭から順に割り当て）で付ける
    #[arg(long)]
    pub positional_dates: bool,
}
