//! レートテーブルのExcel保存
//!
//! - ファイルがなければ見出し付きで新規作成（ペアAは0列目、ペアBは3列目）
//! - あれば各テーブルの列ブロックの末尾に見出しなしで追記

use crate::error::Result;
use crate::workbook::Workbook;
use fx_report_common::layout::{
    excel_row, DATE_OFFSET, HEADER_ROW, PAIR_A_COL, PAIR_B_COL, RATE_OFFSET, RESULT_DATE_COL,
    RESULT_HEADERS, RESULT_RATIO_COL, TABLE_WIDTH, TIME_OFFSET,
};
use fx_report_common::RateTable;
use std::path::Path;

/// 保存結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// 新規作成（データ行数）
    Created { rows: usize },
    /// 追記（各テーブルの書き込み開始行、Excel表記）
    Appended { first_row: u32, second_row: u32 },
}

/// 2つのテーブルを並べて保存
///
/// 失敗時は既存ファイルを変更せずにエラーを返す。
pub fn save_tables(path: &Path, first: &RateTable, second: &RateTable) -> Result<WriteOutcome> {
    if !path.exists() {
        let mut workbook = Workbook::new();
        write_headers(&mut workbook, first, PAIR_A_COL);
        write_headers(&mut workbook, second, PAIR_B_COL);
        workbook.set(HEADER_ROW, RESULT_RATIO_COL, RESULT_HEADERS[0]);
        workbook.set(HEADER_ROW, RESULT_DATE_COL, RESULT_HEADERS[1]);

        write_rows(&mut workbook, first, PAIR_A_COL, HEADER_ROW + 1);
        write_rows(&mut workbook, second, PAIR_B_COL, HEADER_ROW + 1);
        workbook.save(path)?;

        let rows = first.len().max(second.len());
        tracing::info!(path = %path.display(), rows, "workbook created");
        return Ok(WriteOutcome::Created { rows });
    }

    let mut workbook = Workbook::load(path)?;
    let first_row = workbook.next_free_row(PAIR_A_COL..PAIR_A_COL + TABLE_WIDTH);
    let second_row = workbook.next_free_row(PAIR_B_COL..PAIR_B_COL + TABLE_WIDTH);

    write_rows(&mut workbook, first, PAIR_A_COL, first_row);
    write_rows(&mut workbook, second, PAIR_B_COL, second_row);
    workbook.save(path)?;

    tracing::info!(
        path = %path.display(),
        first_row = excel_row(first_row),
        second_row = excel_row(second_row),
        "tables appended"
    );
    Ok(WriteOutcome::Appended {
        first_row: excel_row(first_row),
        second_row: excel_row(second_row),
    })
}

fn write_headers(workbook: &mut Workbook, table: &RateTable, col: u16) {
    for (offset, header) in (0u16..).zip(table.headers()) {
        workbook.set(HEADER_ROW, col + offset, header);
    }
}

fn write_rows(workbook: &mut Workbook, table: &RateTable, col: u16, start_row: u32) {
    for (row, record) in (start_row..).zip(&table.records) {
        workbook.set(row, col + DATE_OFFSET, record.date.as_str());
        // 欠損は空セル
        if let Some(rate) = record.rate {
            workbook.set(row, col + RATE_OFFSET, rate);
        }
        if !record.time.is_empty() {
            workbook.set(row, col + TIME_OFFSET, record.time.as_str());
        }
    }
}
