//! 사용자 설정 (다크 모드, API 키, 분석 히스토리)
//!
//! 앱 시작 시 PreferenceStore::load로 한 번 읽고, 바뀔 때마다 save로 쓴다.
//! 브라우저는 localStorage, CLI는 설정 디렉터리의 JSON 파일을 저장소로 쓴다.

use crate::error::Result;
use crate::types::{AnalysisReport, Grade, Level};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;

/// 히스토리 최대 보관 수
pub const HISTORY_LIMIT: usize = 10;

/// localStorage 키
pub const KEY_DARK_MODE: &str = "darkMode";
pub const KEY_API_KEY: &str = "apiKey";
pub const KEY_HISTORY: &str = "analysisHistory";

/// 히스토리 한 건
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// 문서 지문 (같은 문서를 다시 분석하면 덮어쓴다)
    pub id: String,
    pub file_name: String,
    pub analyzed_at: String,
    pub compliance_score: u8,
    pub compliance_grade: Grade,
    pub risk_level: Level,
    /// 히스토리에서 다시 열 수 있도록 보관하는 전체 보고서
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<AnalysisReport>,
}

impl HistoryEntry {
    pub fn from_report(id: impl Into<String>, report: &AnalysisReport) -> Self {
        Self {
            id: id.into(),
            file_name: report.meta.file_name.clone(),
            analyzed_at: format!("{} {}", report.meta.analysis_date, report.meta.analysis_time)
                .trim()
                .to_string(),
            compliance_score: report.compliance_score,
            compliance_grade: report.compliance_grade,
            risk_level: report.risk_level,
            report: Some(report.clone()),
        }
    }

    /// 보고서 없이 요약만 남긴다 (파일 저장소 크기 절약용)
    pub fn without_report(mut self) -> Self {
        self.report = None;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub dark_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub history: Vec<HistoryEntry>,
}

impl Preferences {
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    /// 히스토리 맨 앞에 추가 (같은 id는 제거 후 추가, 최대 HISTORY_LIMIT건)
    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.retain(|e| e.id != entry.id);
        self.history.insert(0, entry);
        self.history.truncate(HISTORY_LIMIT);
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// 설정 저장소
pub trait PreferenceStore {
    fn load(&self) -> Result<Preferences>;
    fn save(&self, preferences: &Preferences) -> Result<()>;
}

/// 문자열 키-값 저장소 (localStorage 형태)
pub trait KeyValue {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// KeyValue 위에 올린 PreferenceStore
///
/// 항목마다 키를 따로 쓴다: `darkMode`는 "true"/"false",
/// `analysisHistory`는 JSON 배열.
pub struct KvPreferenceStore<K> {
    kv: K,
}

impl<K: KeyValue> KvPreferenceStore<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    pub fn inner(&self) -> &K {
        &self.kv
    }
}

impl<K: KeyValue> PreferenceStore for KvPreferenceStore<K> {
    fn load(&self) -> Result<Preferences> {
        let dark_mode = self.kv.get(KEY_DARK_MODE).as_deref() == Some("true");
        let api_key = self.kv.get(KEY_API_KEY).filter(|k| !k.is_empty());
        // 손상된 히스토리는 버리고 빈 목록으로 시작
        let mut history: Vec<HistoryEntry> = self
            .kv
            .get(KEY_HISTORY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        history.truncate(HISTORY_LIMIT);

        Ok(Preferences {
            dark_mode,
            api_key,
            history,
        })
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        self.kv
            .set(KEY_DARK_MODE, if preferences.dark_mode { "true" } else { "false" })?;
        match &preferences.api_key {
            Some(key) => self.kv.set(KEY_API_KEY, key)?,
            None => self.kv.remove(KEY_API_KEY)?,
        }
        let history = serde_json::to_string(&preferences.history)?;
        self.kv.set(KEY_HISTORY, &history)
    }
}

/// 메모리 저장소 (테스트, 저장소를 쓸 수 없는 환경)
#[derive(Debug, Default)]
pub struct MemoryKeyValue {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValue for MemoryKeyValue {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
