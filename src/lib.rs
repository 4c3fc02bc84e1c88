pub mod appender;
pub mod cli;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod notifier;
pub mod pipeline;
pub mod workbook;
pub mod writer;
