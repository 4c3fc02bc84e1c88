use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxReportError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("SMTPパスワードが設定されていません。環境変数 FX_REPORT_SMTP_PASSWORD か設定ファイルの smtp_password を指定してください")]
    MissingSmtpPassword,

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("HTTP取得エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Excel読み込みエラー: {0}")]
    WorkbookRead(String),

    #[error("Excel書き込みエラー: {0}")]
    WorkbookWrite(String),

    #[error("ワークブックは別の実行が使用中です（ロック: {0}）。実行中のプロセスが終了してから再実行してください")]
    WorkbookLocked(String),

    #[error("メール作成エラー: {0}")]
    EmailBuild(String),

    #[error("メール送信エラー: {0}")]
    EmailSend(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] fx_report_common::Error),
}

impl From<calamine::XlsxError> for FxReportError {
    fn from(e: calamine::XlsxError) -> Self {
        FxReportError::WorkbookRead(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for FxReportError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        FxReportError::WorkbookWrite(e.to_string())
    }
}

impl From<lettre::error::Error> for FxReportError {
    fn from(e: lettre::error::Error) -> Self {
        FxReportError::EmailBuild(e.to_string())
    }
}

impl From<lettre::address::AddressError> for FxReportError {
    fn from(e: lettre::address::AddressError) -> Self {
        FxReportError::EmailBuild(format!("アドレス不正: {}", e))
    }
}

impl From<lettre::transport::smtp::Error> for FxReportError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        FxReportError::EmailSend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FxReportError>;
