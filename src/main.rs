use clap::Parser;
use fx_report::{cli, config, error, pipeline};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use fx_report_common::DateAlignment;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load()?;

    match cli.command.unwrap_or_default() {
        Commands::Run(args) => {
            println!("💱 fx-report - 為替レポート\n");

            let mut config = config;
            if let Some(workbook) = args.workbook {
                config.workbook_path = workbook;
            }

            let options = pipeline::RunOptions {
                end_date: args.date,
                skip_email: args.no_email,
                date_alignment: args.positional_dates.then_some(DateAlignment::Positional),
            };

            let summary = pipeline::run_cycle(&config, &options).await?;

            println!(
                "\n✅ 完了: {} 〜 {} / {}行 / 結果{}件",
                summary.start_date,
                summary.end_date,
                summary.row_count,
                summary.results.len()
            );
            if summary.write.is_none() {
                println!("⚠ 今回のレートはExcelに保存されていません");
            }
        }

        Commands::Config { show } => {
            if show {
                println!("設定:");
                println!("  取得元: {}", config.source_url);
                println!("  ワークブック: {}", config.workbook_path.display());
                println!("  SMTP: {}:{}", config.smtp_host, config.smtp_port);
                println!("  送信元: {}", config.sender);
                println!("  送信先: {}", config.recipient);
                println!(
                    "  SMTPパスワード: {}",
                    if config.get_smtp_password().is_ok() { "設定済み" } else { "未設定" }
                );
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  取得日数: {}", config.lookback_days);
                println!("  日付の割り当て: {:?}", config.date_alignment);
                println!("  通貨ペア: {} / {}", config.dividend_pair, config.divisor_pair);
            } else {
                println!("設定ファイル: {}", Config::config_path()?.display());
            }
        }
    }

    Ok(())
}
