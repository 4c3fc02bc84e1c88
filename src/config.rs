use crate::error::{FxReportError, Result};
use fx_report_common::{CurrencyPair, DateAlignment};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// SMTPパスワードの環境変数名
pub const SMTP_PASSWORD_ENV: &str = "FX_REPORT_SMTP_PASSWORD";

/// 取得期間の上限（日数）
pub const MAX_LOOKBACK_DAYS: i64 = 3650;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 履歴レートページのURL（クエリは実行時に付与）
    pub source_url: String,
    pub workbook_path: PathBuf,
    pub smtp_host: String,
    pub smtp_port: u16,
    /// 送信元アドレス（SMTPログインIDを兼ねる）
    pub sender: String,
    pub recipient: String,
    pub smtp_password: Option<String>,
    pub timeout_seconds: u64,
    /// 取得期間（昨日から遡る日数）
    pub lookback_days: i64,
    pub date_alignment: DateAlignment,
    /// 被除数ペア（"USD/RUB" 形式）
    pub dividend_pair: String,
    /// 除数ペア
    pub divisor_pair: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: "https://www.x-rates.com/historical/".into(),
            workbook_path: PathBuf::from("exchange_rates.xlsx"),
            smtp_host: "examplesmtp.com".into(),
            smtp_port: 587,
            sender: "email@example.com".into(),
            recipient: "emailrecieve@example.com".into(),
            smtp_password: None,
            timeout_seconds: 30,
            lookback_days: 30,
            date_alignment: DateAlignment::Keyed,
            dividend_pair: CurrencyPair::usd_rub().to_string(),
            divisor_pair: CurrencyPair::jpy_rub().to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// 指定パスから読み込み（存在しなければデフォルト）
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| FxReportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("fx-report").join("config.json"))
    }

    fn validate(&self) -> Result<()> {
        if !(0..=MAX_LOOKBACK_DAYS).contains(&self.lookback_days) {
            return Err(FxReportError::Config(format!(
                "lookback_days は0〜{}を指定してください: {}",
                MAX_LOOKBACK_DAYS, self.lookback_days
            )));
        }
        if self.timeout_seconds == 0 {
            return Err(FxReportError::Config("timeout_seconds は1以上を指定してください".into()));
        }
        self.pairs()?;
        Ok(())
    }

    /// (被除数, 除数) の通貨ペア
    pub fn pairs(&self) -> Result<(CurrencyPair, CurrencyPair)> {
        let dividend: CurrencyPair = self.dividend_pair.parse()?;
        let divisor: CurrencyPair = self.divisor_pair.parse()?;
        Ok((dividend, divisor))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn get_smtp_password(&self) -> Result<String> {
        // 環境変数を優先
        if let Ok(password) = std::env::var(SMTP_PASSWORD_ENV) {
            if !password.is_empty() {
                return Ok(password);
            }
        }

        self.smtp_password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or(FxReportError::MissingSmtpPassword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();

        assert_eq!(config.smtp_host, "examplesmtp.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.workbook_path, PathBuf::from("exchange_rates.xlsx"));
        assert_eq!(config.lookback_days, 30);
        assert_eq!(config.date_alignment, DateAlignment::Keyed);
        assert!(config.smtp_password.is_none());
        assert_eq!(
            config.pairs().unwrap(),
            (CurrencyPair::usd_rub(), CurrencyPair::jpy_rub())
        );
    }

    #[test]
    fn test_partial_file_overrides() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(
            &path,
            r#"{"smtp_host": "mail.internal", "date_alignment": "positional", "timeout_seconds": 5}"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.smtp_host, "mail.internal");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.date_alignment, DateAlignment::Positional);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"lookback_days": -1}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(FxReportError::Config(_))));

        std::fs::write(&path, r#"{"timeout_seconds": 0}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(FxReportError::Config(_))));

        std::fs::write(&path, r#"{"lookback_days": 3651}"#).unwrap();
        assert!(matches!(Config::load_from(&path), Err(FxReportError::Config(_))));

        std::fs::write(&path, format!(r#"{{"lookback_days": {}}}"#, i64::MAX / 2)).unwrap();
        assert!(matches!(Config::load_from(&path), Err(FxReportError::Config(_))));

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Config::load_from(&path), Err(FxReportError::JsonParse(_))));
    }

    #[test]
    fn test_pairs_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"dividend_pair": "eur/rub", "divisor_pair": "CNY/RUB"}"#).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(
            config.pairs().unwrap(),
            (CurrencyPair::new("EUR", "RUB"), CurrencyPair::new("CNY", "RUB"))
        );

        std::fs::write(&path, r#"{"divisor_pair": "CNYRUB"}"#).unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(FxReportError::Common(fx_report_common::Error::InvalidPair(_)))
        ));
    }

    #[test]
    fn test_password_from_file() {
        // 環境変数が設定されている環境では環境変数が優先される
        if std::env::var(SMTP_PASSWORD_ENV).is_ok() {
            return;
        }

        let config = Config {
            smtp_password: Some("secret".into()),
            ..Config::default()
        };
        assert_eq!(config.get_smtp_password().unwrap(), "secret");

        let empty = Config {
            smtp_password: Some(String::new()),
            ..Config::default()
        };
        assert!(matches!(
            empty.get_smtp_password(),
            Err(FxReportError::MissingSmtpPassword)
        ));
    }
}
