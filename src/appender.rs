//! クロスレート結果の追記
//!
//! G列を2行目から下へ走査し、最初の空セルから (比率, 日付) を書き込む。

use crate::error::Result;
use crate::workbook::Workbook;
use fx_report_common::layout::{excel_row, FIRST_DATA_ROW, RESULT_DATE_COL, RESULT_RATIO_COL};
use fx_report_common::ResultRecord;
use std::path::Path;

/// 結果を追記して保存
///
/// # Returns
/// 書き込みを開始した行（Excel表記、1始まり）
pub fn append_results(path: &Path, results: &[ResultRecord]) -> Result<u32> {
    let mut workbook = Workbook::load(path)?;
    let start_row = workbook.first_empty_row(RESULT_RATIO_COL, FIRST_DATA_ROW);

    for (row, result) in (start_row..).zip(results) {
        tracing::debug!(row = excel_row(row), ratio = result.ratio, date = %result.date, "writing result");
        workbook.set(row, RESULT_RATIO_COL, result.ratio);
        workbook.set(row, RESULT_DATE_COL, result.date.as_str());
    }

    workbook.save(path)?;
    Ok(excel_row(start_row))
}
