//! 분석 결과 캐시
//!
//! 문서 본문의 SHA-256과 분석 방식을 키로 보고서를 저장해 두고,
//! 같은 문서를 같은 방식으로 다시 분석할 때 건너뛴다.

use crate::error::Result;
use crate::scorer::ScorerKind;
use policy_review_common::{AnalysisReport, Document};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

const CACHE_FILE_NAME: &str = ".policy-review-cache.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheFile {
    /// 형식 버전
    version: u32,
    entries: HashMap<String, CacheEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    pub file_name: String,
    pub file_size: u64,
    pub report: AnalysisReport,
}

impl CacheFile {
    const CURRENT_VERSION: u32 = 1;

    pub fn cache_path(folder: &Path) -> PathBuf {
        folder.join(CACHE_FILE_NAME)
    }

    /// 캐시 파일 읽기. 없거나 깨졌으면 빈 캐시.
    pub fn load(folder: &Path) -> Self {
        let cache_path = Self::cache_path(folder);
        let file = match File::open(&cache_path) {
            Ok(f) => f,
            Err(_) => return Self::default(),
        };

        match serde_json::from_reader::<_, CacheFile>(BufReader::new(file)) {
            Ok(cache) if cache.version == Self::CURRENT_VERSION => cache,
            Ok(_) => {
                tracing::warn!("캐시 버전 불일치, 새로 만듭니다");
                Self::default()
            }
            Err(e) => {
                tracing::warn!("캐시 파일을 읽을 수 없습니다: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self, folder: &Path) -> Result<()> {
        let file = File::create(Self::cache_path(folder))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    /// 캐시 파일 삭제. 파일이 있었으면 true.
    pub fn clear(folder: &Path) -> Result<bool> {
        let cache_path = Self::cache_path(folder);
        if cache_path.exists() {
            std::fs::remove_file(cache_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn key(document: &Document, kind: ScorerKind) -> String {
        format!("{}:{}", document.fingerprint(), kind)
    }

    pub fn get(&self, document: &Document, kind: ScorerKind) -> Option<&AnalysisReport> {
        self.entries.get(&Self::key(document, kind)).map(|e| &e.report)
    }

    pub fn insert(&mut self, document: &Document, kind: ScorerKind, report: AnalysisReport) {
        self.entries.insert(
            Self::key(document, kind),
            CacheEntry {
                file_name: document.file_name.clone(),
                file_size: document.size,
                report,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CacheFile {
    fn default() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            entries: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_review_common::{demo_report, ReportMeta};
    use tempfile::tempdir;

    fn document(content: &str) -> Document {
        Document {
            file_name: "rules.txt".into(),
            content: content.into(),
            size: content.len() as u64,
            ..Default::default()
        }
    }

    #[test]
    fn test_roundtrip_and_keying() {
        let dir = tempdir().unwrap();
        let doc = document("근로시간 규정");
        let mut cache = CacheFile::default();
        cache.insert(&doc, ScorerKind::Mock, demo_report(ReportMeta::default()));
        cache.save(dir.path()).unwrap();

        let loaded = CacheFile::load(dir.path());
        assert_eq!(loaded.len(), 1);
        assert!(loaded.get(&doc, ScorerKind::Mock).is_some());
        assert!(loaded.get(&doc, ScorerKind::Heuristic).is_none());
        assert!(loaded.get(&document("다른 문서"), ScorerKind::Mock).is_none());
    }

    #[test]
    fn test_corrupt_cache_is_empty() {
        let dir = tempdir().unwrap();
        std::fs::write(CacheFile::cache_path(dir.path()), "{broken").unwrap();
        assert!(CacheFile::load(dir.path()).is_empty());
    }

    #[test]
    fn test_clear() {
        let dir = tempdir().unwrap();
        assert!(!CacheFile::clear(dir.path()).unwrap());
        CacheFile::default().save(dir.path()).unwrap();
        assert!(CacheFile::clear(dir.path()).unwrap());
    }
}
