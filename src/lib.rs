//! 취업규칙 검토 도구 (CLI / API 서버)

pub mod batch;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod scanner;
pub mod scorer;
pub mod server;
