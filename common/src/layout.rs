//! ワークブックのレイアウト定義
//!
//! 1シート構成:
//! - A〜C列: ペアA（日付・レート・時刻）
//! - D〜F列: ペアB
//! - G〜H列: クロスレート結果（比率・日付）
//!
//! 行・列はすべて0始まり（rust_xlsxwriter / calamine と同じ）。

/// シート名
pub const SHEET_NAME: &str = "Sheet1";

/// ペアAの開始列
pub const PAIR_A_COL: u16 = 0;

/// ペアBの開始列
pub const PAIR_B_COL: u16 = 3;

/// 1テーブルあたりの列数（日付・レート・時刻）
pub const TABLE_WIDTH: u16 = 3;

/// 結果（比率）列 = G列
pub const RESULT_RATIO_COL: u16 = 6;

/// 結果（日付）列 = H列
pub const RESULT_DATE_COL: u16 = 7;

/// 見出し行
pub const HEADER_ROW: u32 = 0;

/// データ開始行（Excel上の2行目）
pub const FIRST_DATA_ROW: u32 = 1;

/// 結果列の見出し
pub const RESULT_HEADERS: [&str; 2] = ["Result", "Result Date"];

/// テーブル内の列位置
pub const DATE_OFFSET: u16 = 0;
pub const RATE_OFFSET: u16 = 1;
pub const TIME_OFFSET: u16 = 2;

/// 0始まりの行番号をExcel表記（1始まり）に変換
pub fn excel_row(row: u32) -> u32 {
    row + 1
}
