//! 1回分の処理: 取得 → 整形 → 保存 → 計算 → 追記 → 送信
//!
//! 失敗時の扱い:
//! - 取得・整形: ベストエフォート（空で続行）
//! - 保存: ログを出して続行
//! - 結果追記・メール送信: 中断

use crate::config::Config;
use crate::error::{FxReportError, Result};
use crate::workbook::WorkbookLock;
use crate::writer::WriteOutcome;
use crate::{appender, fetcher, notifier, writer};
use chrono::{Duration, Local, NaiveDate};
use fx_report_common::{compute_cross_rates, prepare_table, DateAlignment, ResultRecord};

/// 実行オプション
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// 期間の終了日（省略時は昨日）
    pub end_date: Option<NaiveDate>,
    pub skip_email: bool,
    /// 省略時は設定ファイルの値
    pub date_alignment: Option<DateAlignment>,
}

/// 実行結果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// 被除数ペアのデータ行数（メール本文の件数）
    pub row_count: usize,
    pub results: Vec<ResultRecord>,
    /// 保存に失敗した場合は None
    pub write: Option<WriteOutcome>,
    pub first_result_row: u32,
    pub emailed: bool,
}

/// 取得期間 (開始日, 終了日)
///
/// 終了日を指定しない場合は `today` の前日。開始日は終了日から `lookback_days` 日前。
/// 日付の範囲を超える場合は設定エラー。
pub fn date_window(
    today: NaiveDate,
    end_date: Option<NaiveDate>,
    lookback_days: i64,
) -> Result<(NaiveDate, NaiveDate)> {
    let out_of_range = || {
        FxReportError::Config(format!("取得期間が日付の範囲を超えています: {}日", lookback_days))
    };

    let end = match end_date {
        Some(end) => end,
        None => today.pred_opt().ok_or_else(out_of_range)?,
    };
    let start = Duration::try_days(lookback_days)
        .and_then(|lookback| end.checked_sub_signed(lookback))
        .ok_or_else(out_of_range)?;
    Ok((start, end))
}

pub async fn run_cycle(config: &Config, options: &RunOptions) -> Result<RunSummary> {
    let (start_date, end_date) = date_window(
        Local::now().date_naive(),
        options.end_date,
        config.lookback_days,
    )?;
    let alignment = options.date_alignment.unwrap_or(config.date_alignment);
    let (dividend_pair, divisor_pair) = config.pairs()?;
    let path = config.workbook_path.as_path();

    tracing::info!(%start_date, %end_date, workbook = %path.display(), "starting report cycle");

    let lock = WorkbookLock::acquire(path)?;

    // 1. 取得
    println!("[1/6] レートを取得中... ({})", start_date);
    let client = fetcher::build_client(config)?;
    let dividend_raw =
        fetcher::fetch_rates_best_effort(&client, &config.source_url, &dividend_pair, start_date).await;
    let divisor_raw =
        fetcher::fetch_rates_best_effort(&client, &config.source_url, &divisor_pair, start_date).await;
    println!(
        "✔ {}: {}件, {}: {}件\n",
        dividend_pair,
        dividend_raw.len(),
        divisor_pair,
        divisor_raw.len()
    );

    // 2. 整形
    println!("[2/6] データを整形中...");
    let dividend = prepare_table(&dividend_pair, &dividend_raw);
    let divisor = prepare_table(&divisor_pair, &divisor_raw);
    let missing = dividend.rates().chain(divisor.rates()).filter(Option::is_none).count();
    if missing > 0 {
        tracing::warn!(missing, "some rates could not be parsed and are left empty");
    }
    println!("✔ 整形完了\n");

    // 3. 保存（失敗しても続行）
    println!("[3/6] Excelに保存中...");
    let write = match writer::save_tables(path, &dividend, &divisor) {
        Ok(outcome) => {
            println!("✔ 保存: {}\n", path.display());
            Some(outcome)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to save rate tables; skipping this run's data");
            println!("⚠ Excel保存をスキップしました: {}\n", e);
            None
        }
    };

    // 4. クロスレート計算
    println!("[4/6] クロスレートを計算中...");
    let results = compute_cross_rates(&dividend, &divisor, alignment);
    tracing::info!(
        results = results.len(),
        dropped = dividend.len().max(divisor.len()) - results.len(),
        ?alignment,
        "cross rates computed"
    );
    println!("✔ {}件\n", results.len());

    // 5. 結果追記
    println!("[5/6] 結果を書き込み中...");
    let first_result_row = appender::append_results(path, &results)?;
    println!("✔ {}行目から書き込み\n", first_result_row);

    drop(lock);

    // 6. メール送信
    let row_count = dividend.len();
    let emailed = if options.skip_email {
        println!("[6/6] メール送信をスキップ");
        false
    } else {
        println!("[6/6] メールを送信中...");
        let message = notifier::compose_report(config, path, row_count)?;
        notifier::send_report(config, message).await?;
        println!("✔ 送信完了: {}", config.recipient);
        true
    };

    Ok(RunSummary {
        start_date,
        end_date,
        row_count,
        results,
        write,
        first_result_row,
        emailed,
    })
}
