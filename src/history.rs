//! 설정 디렉터리의 JSON 파일에 저장하는 PreferenceStore

use crate::config::Config;
use policy_review_common::preferences::{HistoryEntry, PreferenceStore, Preferences};
use policy_review_common::Result;
use std::path::{Path, PathBuf};

pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// ~/.config/policy-review/preferences.json
    pub fn default_location() -> crate::error::Result<Self> {
        Ok(Self::new(Config::config_dir()?.join("preferences.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn load(&self) -> Result<Preferences> {
        if !self.path.exists() {
            return Ok(Preferences::default());
        }
        let content = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(preferences)?)?;
        Ok(())
    }
}

/// 기존 설정을 읽어 히스토리를 추가하고 저장한다
///
/// 읽기에 실패하면 저장하지 않고 오류를 돌려준다 (다크 모드, API 키 보존).
pub fn record_entries(store: &impl PreferenceStore, entries: Vec<HistoryEntry>) -> Result<()> {
    let mut prefs = store.load()?;
    for entry in entries {
        prefs.record(entry);
    }
    store.save(&prefs)
}
