//! 履歴レートページの取得
//!
//! ステータスコードは判定しない（エラーページもそのままパーサーに渡す）。
//! 通信エラーはベストエフォート扱いで、空の結果として続行できる。

use crate::config::Config;
use crate::error::Result;
use chrono::NaiveDate;
use fx_report_common::{parse_rates_html, CurrencyPair, ScrapedRates};

/// タイムアウト付きHTTPクライアント
pub fn build_client(config: &Config) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout())
        .user_agent(concat!("fx-report/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// 1ペア分のレートを取得
pub async fn fetch_rates(
    client: &reqwest::Client,
    source_url: &str,
    pair: &CurrencyPair,
    date: NaiveDate,
) -> Result<ScrapedRates> {
    let date = date.format("%Y-%m-%d").to_string();
    let response = client
        .get(source_url)
        .query(&[
            ("from", pair.base.as_str()),
            ("to", pair.quote.as_str()),
            ("amount", "1"),
            ("date", date.as_str()),
        ])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%pair, %status, "rates page returned non-success status; parsing anyway");
    }

    let body = response.text().await?;
    let rates = parse_rates_html(&body)?;
    tracing::info!(%pair, %date, rows = rates.len(), "rates scraped");
    Ok(rates)
}

/// 失敗しても空の結果で続行する版
pub async fn fetch_rates_best_effort(
    client: &reqwest::Client,
    source_url: &str,
    pair: &CurrencyPair,
    date: NaiveDate,
) -> ScrapedRates {
    match fetch_rates(client, source_url, pair, date).await {
        Ok(rates) => rates,
        Err(e) => {
            tracing::warn!(%pair, error = %e, "failed to fetch rates; continuing with no rows");
            ScrapedRates::new()
        }
    }
}
