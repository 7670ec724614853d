//! Policy Review Common Library
//!
//! CLI, 서버, Web(WASM)에서 공유하는 취업규칙 검토 로직과 타입

pub mod checklist;
pub mod error;
pub mod export;
pub mod intake;
pub mod parser;
pub mod preferences;
pub mod prompts;
pub mod report;
pub mod scoring;
pub mod session;
pub mod types;

pub use error::{Error, Result};
pub use export::{export_file_name, render, ExportFormat};
pub use intake::{accept, IntakeError};
pub use parser::{extract_json, parse_report_response};
pub use preferences::{HistoryEntry, KeyValue, KvPreferenceStore, PreferenceStore, Preferences};
pub use report::{analyze_text, assemble_report, demo_report};
pub use scoring::{FixedJitter, JitterSource, NoJitter, SequenceJitter};
pub use session::{Phase, Session, Ticket};
pub use types::{
    AnalysisReport, CategoryScore, Document, Grade, ItemStatus, Level, Recommendation, ReportMeta,
    RequiredItem, RiskFactor,
};
