//! クロスレート計算
//!
//! 2つのテーブルを行位置で対応させて比率（被除数 / 除数）を求める。
//! どちらかが欠損、または結果が非有限（0除算・0/0）の行は落とす。

use crate::types::{RateTable, ResultRecord};
use serde::{Deserialize, Serialize};

/// 計算結果に付ける日付の決め方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateAlignment {
    /// 比率が計算された行自身の日付を付ける
    #[default]
    Keyed,
    /// 残った比率に被除数テーブルの先頭N件の日付を順に付ける（旧レポート互換）
    ///
    /// 途中で行が落ちると、それ以降の日付が1行ずつ前にずれる。
    Positional,
}

impl std::str::FromStr for DateAlignment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "keyed" => Ok(DateAlignment::Keyed),
            "positional" => Ok(DateAlignment::Positional),
            _ => Err(format!("Unknown date alignment: {}. Use keyed or positional", s)),
        }
    }
}

fn ratio_at(dividend: &RateTable, divisor: &RateTable, idx: usize) -> Option<f64> {
    let a = dividend.records.get(idx)?.rate?;
    let b = divisor.records.get(idx)?.rate?;
    Some(a / b).filter(|r| r.is_finite())
}

/// クロスレートを計算
///
/// # Arguments
/// * `dividend` - 被除数（例: USD/RUB）
/// * `divisor` - 除数（例: JPY/RUB）
/// * `alignment` - 日付の付け方
///
/// # Returns
/// 残った行の `{date, ratio}`。長さは落ちた行数だけ短くなる。
pub fn compute_cross_rates(
    dividend: &RateTable,
    divisor: &RateTable,
    alignment: DateAlignment,
) -> Vec<ResultRecord> {
    let rows = dividend.len().max(divisor.len());

    let surviving: Vec<(usize, f64)> = (0..rows)
        .filter_map(|idx| ratio_at(dividend, divisor, idx).map(|ratio| (idx, ratio)))
        .collect();

    surviving
        .into_iter()
        .enumerate()
        .map(|(nth, (idx, ratio))| {
            let date_idx = match alignment {
                DateAlignment::Keyed => idx,
                DateAlignment::Positional => nth,
            };
            ResultRecord {
                date: dividend.records[date_idx].date.clone(),
                ratio,
            }
        })
        .collect()
}
