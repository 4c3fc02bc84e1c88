//! 為替レートの型定義
//!
//! - CurrencyPair: 通貨ペア（USD/RUB など）
//! - RawRate / ScrapedRates: スクレイピング直後の生データ
//! - RateRecord / RateTable: 数値化済みのテーブル
//! - ResultRecord: クロスレート計算結果

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// 通貨ペア（base/quote）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
        }
    }

    pub fn usd_rub() -> Self {
        Self::new("USD", "RUB")
    }

    pub fn jpy_rub() -> Self {
        Self::new("JPY", "RUB")
    }

    /// 列名（例: "USD/RUB Rate"）
    pub fn column_name(&self, column: &str) -> String {
        format!("{} {}", self, column)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

impl FromStr for CurrencyPair {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('/') {
            Some((base, quote))
                if !base.trim().is_empty() && !quote.trim().is_empty() && !quote.contains('/') =>
            {
                Ok(Self::new(
                    base.trim().to_uppercase(),
                    quote.trim().to_uppercase(),
                ))
            }
            _ => Err(Error::InvalidPair(s.to_string())),
        }
    }
}

/// HTMLテーブルの1行（数値化前）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRate {
    pub date: String,
    pub rate_text: String,
    pub time: String,
}

/// 日付キーの挿入順マップ
///
/// 同じ日付が再度現れた場合は値だけを上書きし、位置は最初の出現のまま保つ。
#[derive(Debug, Clone, Default)]
pub struct ScrapedRates {
    entries: Vec<RawRate>,
    index: HashMap<String, usize>,
}

impl ScrapedRates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, rate: RawRate) {
        match self.index.get(&rate.date) {
            Some(&pos) => self.entries[pos] = rate,
            None => {
                self.index.insert(rate.date.clone(), self.entries.len());
                self.entries.push(rate);
            }
        }
    }

    pub fn get(&self, date: &str) -> Option<&RawRate> {
        self.index.get(date).map(|&pos| &self.entries[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawRate> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<RawRate> for ScrapedRates {
    fn from_iter<I: IntoIterator<Item = RawRate>>(iter: I) -> Self {
        let mut rates = Self::new();
        for rate in iter {
            rates.insert(rate);
        }
        rates
    }
}

/// 数値化済みの1行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub date: String,
    /// 数値化できなかった場合は None
    pub rate: Option<f64>,
    pub time: String,
}

/// 通貨ペア単位のテーブル（スクレイピング順）
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    pub pair: CurrencyPair,
    pub records: Vec<RateRecord>,
}

impl RateTable {
    pub fn new(pair: CurrencyPair) -> Self {
        Self {
            pair,
            records: Vec::new(),
        }
    }

    /// 列見出し: [Date, Rate, Time]
    pub fn headers(&self) -> [String; 3] {
        [
            self.pair.column_name("Date"),
            self.pair.column_name("Rate"),
            self.pair.column_name("Time"),
        ]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn rates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records.iter().map(|r| r.rate)
    }
}

/// クロスレート計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub date: String,
    pub ratio: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(date: &str, rate: &str) -> RawRate {
        RawRate {
            date: date.to_string(),
            rate_text: rate.to_string(),
            time: String::new(),
        }
    }

    #[test]
    fn test_pair_display_and_columns() {
        let pair = CurrencyPair::usd_rub();
        assert_eq!(pair.to_string(), "USD/RUB");
        assert_eq!(pair.column_name("Rate"), "USD/RUB Rate");
    }

    #[test]
    fn test_pair_from_str() {
        let pair: CurrencyPair = "jpy/rub".parse().unwrap();
        assert_eq!(pair, CurrencyPair::jpy_rub());

        assert!("USDRUB".parse::<CurrencyPair>().is_err());
        assert!("USD/".parse::<CurrencyPair>().is_err());
        assert!("A/B/C".parse::<CurrencyPair>().is_err());
    }

    #[test]
    fn test_scraped_rates_keep_insertion_order() {
        let rates: ScrapedRates = vec![raw("2024-01-03", "1"), raw("2024-01-01", "2")]
            .into_iter()
            .collect();

        let dates: Vec<&str> = rates.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-01-03", "2024-01-01"]);
    }

    #[test]
    fn test_scraped_rates_duplicate_overwrites_in_place() {
        let rates: ScrapedRates = vec![
            raw("2024-01-01", "1"),
            raw("2024-01-02", "2"),
            raw("2024-01-01", "3"),
        ]
        .into_iter()
        .collect();

        assert_eq!(rates.len(), 2);
        assert_eq!(rates.iter().next().unwrap().rate_text, "3");
        assert_eq!(rates.get("2024-01-02").unwrap().rate_text, "2");
    }

    #[test]
    fn test_table_headers() {
        let table = RateTable::new(CurrencyPair::jpy_rub());
        assert_eq!(
            table.headers(),
            [
                "JPY/RUB Date".to_string(),
                "JPY/RUB Rate".to_string(),
                "JPY/RUB Time".to_string()
            ]
        );
        assert!(table.is_empty());
    }
}
