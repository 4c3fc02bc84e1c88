//! 履歴レートページのHTMLパーサー
//!
//! `<tr>` を順に走査し、先頭行（見出し）を読み飛ばして
//! `<td>` が2つ以上ある行から (日付, レート文字列, 時刻) を取り出す。

use crate::error::{Error, Result};
use crate::types::{RawRate, ScrapedRates};
use scraper::{ElementRef, Html, Selector};

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| Error::Parse(format!("selector {}: {}", css, e)))
}

fn cell_text(cell: &ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// HTMLからレート表を抽出
///
/// セルが足りない行は黙って読み飛ばす。エラーページなど表のないHTMLは空の結果になる。
///
/// # Examples
/// ```
/// use fx_report_common::parse_rates_html;
///
/// let html = "<table><tr><th>Date</th><th>Rate</th></tr>\
///             <tr><td>2024-01-01</td><td>90.5</td></tr></table>";
/// let rates = parse_rates_html(html).unwrap();
/// assert_eq!(rates.len(), 1);
/// assert_eq!(rates.get("2024-01-01").unwrap().rate_text, "90.5");
/// ```
pub fn parse_rates_html(html: &str) -> Result<ScrapedRates> {
    let document = Html::parse_document(html);
    let row_selector = selector("tr")?;
    let cell_selector = selector("td")?;

    let mut rates = ScrapedRates::new();
    for row in document.select(&row_selector).skip(1) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_selector).collect();
        if cells.len() < 2 {
            continue;
        }

        rates.insert(RawRate {
            date: cell_text(&cells[0]),
            rate_text: cell_text(&cells[1]),
            time: cells.get(2).map(cell_text).unwrap_or_default(),
        });
    }

    Ok(rates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(rows: &str) -> String {
        format!(
            "<html><body><table><tr><th>Date</th><th>Rate</th><th>Time</th></tr>{}</table></body></html>",
            rows
        )
    }

    #[test]
    fn test_parse_rows_with_time() {
        let html = page(
            "<tr><td> 2024-01-02 </td><td>91.20</td><td>12:00</td></tr>\
             <tr><td>2024-01-01</td><td>1,234.56</td><td>11:00</td></tr>",
        );

        let rates = parse_rates_html(&html).unwrap();
        let rows: Vec<&RawRate> = rates.iter().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].date, "2024-01-02");
        assert_eq!(rows[0].rate_text, "91.20");
        assert_eq!(rows[0].time, "12:00");
        assert_eq!(rows[1].rate_text, "1,234.56");
    }

    #[test]
    fn test_parse_row_without_time() {
        let html = page("<tr><td>2024-01-01</td><td>90</td></tr>");
        let rates = parse_rates_html(&html).unwrap();
        assert_eq!(rates.get("2024-01-01").unwrap().time, "");
    }

    #[test]
    fn test_skip_header_and_short_rows() {
        // 先頭行は<td>でも見出し扱い
        let html = "<table>\
            <tr><td>2023-12-31</td><td>1</td></tr>\
            <tr><td>only-one-cell</td></tr>\
            <tr><td>2024-01-01</td><td>2</td></tr>\
            </table>";

        let rates = parse_rates_html(html).unwrap();
        assert_eq!(rates.len(), 1);
        assert!(rates.get("2023-12-31").is_none());
        assert!(rates.get("only-one-cell").is_none());
    }

    #[test]
    fn test_nested_markup_text() {
        let html = page("<tr><td><a href=\"#\">2024-01-01</a></td><td><b>90</b>.5</td></tr>");
        let rates = parse_rates_html(&html).unwrap();
        assert_eq!(rates.get("2024-01-01").unwrap().rate_text, "90.5");
    }

    #[test]
    fn test_error_page_yields_empty() {
        let rates = parse_rates_html("<html><body><h1>503 Service Unavailable</h1></body></html>").unwrap();
        assert!(rates.is_empty());
    }

    #[test]
    fn test_duplicate_dates_overwrite() {
        let html = page(
            "<tr><td>2024-01-01</td><td>1</td></tr>\
             <tr><td>2024-01-01</td><td>2</td></tr>",
        );
        let rates = parse_rates_html(&html).unwrap();
        assert_eq!(rates.len(), 1);
        assert_eq!(rates.get("2024-01-01").unwrap().rate_text, "2");
    }
}
