//! レポートメールの作成・送信
//!
//! 本文の件数表記はロシア語の語形変化に従う（1 строка / 2 строки / 5 строк）。

use crate::config::Config;
use crate::error::{FxReportError, Result};
use fx_report_common::row_word;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::path::Path;

pub const SUBJECT: &str = "Отчет по курсам валют";

/// 本文（例: "В отчете содержится 21 строка."）
pub fn report_body(row_count: usize) -> String {
    format!("В отчете содержится {} {}.", row_count, row_word(row_count as u64))
}

/// ワークブックを添付したメールを作成
pub fn compose_report(config: &Config, workbook_path: &Path, row_count: usize) -> Result<Message> {
    let bytes = std::fs::read(workbook_path)
        .map_err(|_| FxReportError::FileNotFound(workbook_path.display().to_string()))?;
    let filename = workbook_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "exchange_rates.xlsx".to_string());

    let content_type = ContentType::parse("application/octet-stream")
        .map_err(|e| FxReportError::EmailBuild(e.to_string()))?;

    let message = Message::builder()
        .from(config.sender.parse()?)
        .to(config.recipient.parse()?)
        .subject(SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(report_body(row_count)))
                .singlepart(Attachment::new(filename).body(bytes, content_type)),
        )?;

    Ok(message)
}

/// STARTTLSでリレーに接続して送信
///
/// 失敗はそのまま返す（リトライなし）。
pub async fn send_report(config: &Config, message: Message) -> Result<()> {
    let password = config.get_smtp_password()?;

    let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        .port(config.smtp_port)
        .credentials(Credentials::new(config.sender.clone(), password))
        .timeout(Some(config.timeout()))
        .build();

    let response = mailer.send(message).await?;
    tracing::info!(
        host = %config.smtp_host,
        port = config.smtp_port,
        code = %response.code(),
        "report sent"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_report_body_plural_forms() {
        assert_eq!(report_body(1), "В отчете содержится 1 строка.");
        assert_eq!(report_body(3), "В отчете содержится 3 строки.");
        assert_eq!(report_body(11), "В отчете содержится 11 строк.");
        assert_eq!(report_body(21), "В отчете содержится 21 строка.");
        assert_eq!(report_body(112), "В отчете содержится 112 строк.");
    }

    #[test]
    fn test_compose_attaches_workbook() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exchange_rates.xlsx");
        std::fs::write(&path, [0x50, 0x4b, 0x03, 0x04, 0xff, 0xfe, 0x00, 0x01]).unwrap();

        let message = compose_report(&Config::default(), &path, 5).unwrap();
        let formatted = String::from_utf8_lossy(&message.formatted()).to_string();

        assert!(formatted.contains("exchange_rates.xlsx"));
        assert!(formatted.contains("application/octet-stream"));
        assert!(formatted.contains("Content-Transfer-Encoding: base64"));
        assert!(formatted.contains("email@example.com"));
        assert!(formatted.contains("emailrecieve@example.com"));
    }

    #[test]
    fn test_compose_missing_workbook() {
        let dir = tempdir().unwrap();
        let result = compose_report(&Config::default(), &dir.path().join("none.xlsx"), 1);
        assert!(matches!(result, Err(FxReportError::FileNotFound(_))));
    }

    #[test]
    fn test_compose_invalid_address() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("exchange_rates.xlsx");
        std::fs::write(&path, b"PK").unwrap();

        let config = Config {
            recipient: "not an address".into(),
            ..Config::default()
        };
        let result = compose_report(&config, &path, 1);
        assert!(matches!(result, Err(FxReportError::EmailBuild(_))));
    }
}
