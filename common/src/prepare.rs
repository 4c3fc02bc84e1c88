//! スクレイピング結果をテーブルに整形
//!
//! レート文字列の数値化（桁区切りの除去）を行う。数値化できない値は欠損（None）として残す。

use crate::types::{CurrencyPair, RateRecord, RateTable, ScrapedRates};

/// レート文字列を数値化
///
/// - `.` を含む場合: `,` はすべて桁区切り（"1,234.56" → 1234.56）
/// - `,` の後ろが常に3桁: 桁区切り（"1,234" → 1234）
/// - それ以外で `,` が1つ: 小数点（"100,00" → 100.0）
///
/// 数値にならない文字列や非有限値は None。
///
/// # Examples
/// ```
/// use fx_report_common::parse_rate;
///
/// assert_eq!(parse_rate("1,234.56"), Some(1234.56));
/// assert_eq!(parse_rate("100,00"), Some(100.0));
/// assert_eq!(parse_rate("bad"), None);
/// ```
pub fn parse_rate(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let normalized = if !text.contains(',') || text.contains('.') {
        text.replace(',', "")
    } else if is_grouped_thousands(text) {
        text.replace(',', "")
    } else if text.matches(',').count() == 1 {
        text.replace(',', ".")
    } else {
        return None;
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// "1,234,567" 形式か（先頭グループ1〜3桁、以降3桁ずつ）
fn is_grouped_thousands(text: &str) -> bool {
    let digits = text.strip_prefix(['-', '+']).unwrap_or(text);
    let mut groups = digits.split(',');

    let head_ok = groups
        .next()
        .map(|g| (1..=3).contains(&g.len()) && g.chars().all(|c| c.is_ascii_digit()))
        .unwrap_or(false);

    head_ok && groups.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
}

/// 生データを通貨ペアのテーブルに変換
pub fn prepare_table(pair: &CurrencyPair, scraped: &ScrapedRates) -> RateTable {
    let records = scraped
        .iter()
        .map(|raw| RateRecord {
            date: raw.date.clone(),
            rate: parse_rate(&raw.rate_text),
            time: raw.time.clone(),
        })
        .collect();

    RateTable {
        pair: pair.clone(),
        records,
    }
}
