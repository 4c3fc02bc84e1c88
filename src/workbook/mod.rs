//! ワークブック（1シート）のメモリ上モデル
//!
//! calamine で読み込み、rust_xlsxwriter で書き出す。
//! 書き出しは一時ファイル経由で行い、途中で失敗しても既存ファイルは壊さない。

pub mod lock;

pub use lock::WorkbookLock;

use crate::error::{FxReportError, Result};
use calamine::{open_workbook, Data, Reader, Xlsx};
use fx_report_common::layout::{FIRST_DATA_ROW, HEADER_ROW, RESULT_DATE_COL, SHEET_NAME};
use rust_xlsxwriter::Format;
use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// 列幅（文字数）
const COLUMN_WIDTH: f64 = 16.0;

/// セル値
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(_) => None,
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

fn cell_from_data(data: &Data) -> Option<CellValue> {
    match data {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) if s.is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        Data::Float(f) => Some(CellValue::Number(*f)),
        Data::Int(i) => Some(CellValue::Number(*i as f64)),
        other => Some(CellValue::Text(other.to_string())),
    }
}

/// シート "Sheet1" の内容（疎な (行, 列) → 値）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Workbook {
    cells: BTreeMap<(u32, u16), CellValue>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既存ファイルを読み込み
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FxReportError::FileNotFound(path.display().to_string()));
        }

        let mut xlsx: Xlsx<_> = open_workbook(path)?;
        let range = xlsx.worksheet_range(SHEET_NAME)?;
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        let mut workbook = Self::new();
        for (row, col, data) in range.used_cells() {
            if let Some(value) = cell_from_data(data) {
                let row = start_row + row as u32;
                let col = u16::try_from(start_col as usize + col).map_err(|_| {
                    FxReportError::WorkbookRead(format!("列番号が範囲外です: {}", col))
                })?;
                workbook.cells.insert((row, col), value);
            }
        }

        tracing::debug!(path = %path.display(), cells = workbook.cells.len(), "workbook loaded");
        Ok(workbook)
    }

    /// 一時ファイルに書き出してから置き換える
    pub fn save(&self, path: &Path) -> Result<()> {
        let temp_path = temp_path_for(path);

        let result = self.write_xlsx(&temp_path).and_then(|_| {
            std::fs::rename(&temp_path, path).map_err(FxReportError::from)
        });
        if result.is_err() {
            std::fs::remove_file(&temp_path).ok();
        }
        result?;

        tracing::debug!(path = %path.display(), cells = self.cells.len(), "workbook saved");
        Ok(())
    }

    fn write_xlsx(&self, path: &Path) -> Result<()> {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;
        for col in 0..=RESULT_DATE_COL {
            worksheet.set_column_width(col, COLUMN_WIDTH)?;
        }

        for (&(row, col), value) in &self.cells {
            match value {
                CellValue::Text(s) if row == HEADER_ROW => {
                    worksheet.write_string_with_format(row, col, s, &header_format)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
            }
        }

        workbook.save(path)?;
        Ok(())
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    pub fn set(&mut self, row: u32, col: u16, value: impl Into<CellValue>) {
        self.cells.insert((row, col), value.into());
    }

    /// 指定列範囲で最後に値がある行（なければ None）
    pub fn last_used_row(&self, cols: Range<u16>) -> Option<u32> {
        self.cells
            .keys()
            .filter(|(_, col)| cols.contains(col))
            .map(|(row, _)| *row)
            .max()
    }

    /// 指定列範囲の次の空き行（データ開始行より前にはならない）
    pub fn next_free_row(&self, cols: Range<u16>) -> u32 {
        self.last_used_row(cols)
            .map(|row| row + 1)
            .unwrap_or(FIRST_DATA_ROW)
            .max(FIRST_DATA_ROW)
    }

    /// `from_row` から下へ、`col` が空になる最初の行を探す
    pub fn first_empty_row(&self, col: u16, from_row: u32) -> u32 {
        let mut row = from_row;
        while self.get(row, col).is_some() {
            row += 1;
        }
        row
    }

    /// 列の値を上から順に取得（空セルは None）
    pub fn column(&self, col: u16, rows: Range<u32>) -> Vec<Option<&CellValue>> {
        rows.map(|row| self.get(row, col)).collect()
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "workbook.xlsx".to_string());
    path.with_file_name(format!(".{}.tmp", file_name))
}
