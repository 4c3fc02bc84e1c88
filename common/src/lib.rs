//! FX Report Common Library
//!
//! 為替レートの取得結果を扱う純粋な型と変換処理（I/Oなし）

pub mod types;
pub mod layout;
pub mod error;
pub mod parser;
pub mod prepare;
pub mod cross_rate;
pub mod plural;

pub use types::{CurrencyPair, RateRecord, RateTable, RawRate, ResultRecord, ScrapedRates};
pub use error::{Error, Result};
pub use parser::parse_rates_html;
pub use prepare::{parse_rate, prepare_table};
pub use cross_rate::{compute_cross_rates, DateAlignment};
pub use plural::{row_word, PluralForm};
