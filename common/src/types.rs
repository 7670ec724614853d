//! 분석 결과 타입 정의
//!
//! CLI, 서버, Web(WASM)이 공유하는 타입:
//! - Document: 업로드된 문서 (요청 동안만 존재)
//! - CategoryScore: 키워드 카테고리별 점수
//! - AnalysisReport: 최종 보고서 (필수 항목 / 위험 요소 / 권고사항)
//!
//! JSON 키는 camelCase, 열거값은 화면에 표시되는 한국어 라벨로 직렬화한다.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// 업로드된 문서
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub media_type: String,
    pub size: u64,
    pub content: String,
}

impl Document {
    /// 본문의 SHA-256 (히스토리 ID, 로그용)
    pub fn fingerprint(&self) -> String {
        hex::encode(Sha256::digest(self.content.as_bytes()))
    }

    /// 화면 표시용 크기 ("12.3 KB")
    pub fn display_size(&self) -> String {
        format_file_size(self.size)
    }
}

/// 바이트 수를 "12.3 KB" 형식으로 변환
pub fn format_file_size(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// 위험 수준 / 심각도 / 우선순위 공용 3단계
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    #[serde(rename = "낮음", alias = "low", alias = "Low")]
    Low,
    #[serde(rename = "중간", alias = "보통", alias = "medium", alias = "Medium")]
    Medium,
    #[serde(rename = "높음", alias = "high", alias = "High")]
    High,
}

pub type RiskLevel = Level;
pub type Severity = Level;
pub type Priority = Level;

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Low => "낮음",
            Level::Medium => "중간",
            Level::High => "높음",
        }
    }

    /// HTML 출력의 CSS 클래스 접미사
    pub fn css_suffix(&self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 준수율 등급 (60/70/80/90 경계)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A")]
    A,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=59 => Grade::D,
            60..=69 => Grade::C,
            70..=79 => Grade::CPlus,
            80..=89 => Grade::BPlus,
            _ => Grade::A,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Grade::D => "D",
            Grade::C => "C",
            Grade::CPlus => "C+",
            Grade::BPlus => "B+",
            Grade::A => "A",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 필수 항목 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemStatus {
    #[serde(rename = "준수", alias = "compliant")]
    Compliant,
    #[serde(rename = "개선필요", alias = "needs-improvement")]
    NeedsImprovement,
}

impl ItemStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Compliant => "준수",
            ItemStatus::NeedsImprovement => "개선필요",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ItemStatus::Compliant => "status-pass",
            ItemStatus::NeedsImprovement => "status-improve",
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 카테고리별 점수 (0-100)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub label: String,
    pub score: u8,
    /// 지터를 더하기 전의 키워드 적중 수
    pub hits: usize,
}

/// 필수 항목 검토 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredItem {
    pub item: String,
    pub status: ItemStatus,
    pub description: String,
    pub compliance: u8,
}

/// 위험 요소
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub factor: String,
    pub level: Severity,
    pub description: String,
    pub recommendation: String,
}

/// 개선 권고사항
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub item: String,
    pub action: String,
    pub deadline: String,
}

/// 보고서 메타데이터 (파이프라인이 채움)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportMeta {
    pub file_name: String,
    pub file_size: String,
    pub analysis_date: String,
    pub analysis_time: String,
    pub ai_mode: String,
    pub note: String,
}

impl ReportMeta {
    pub fn for_document(document: &Document, ai_mode: &str) -> Self {
        Self {
            file_name: document.file_name.clone(),
            file_size: document.display_size(),
            ai_mode: ai_mode.to_string(),
            note: DEFAULT_NOTE.to_string(),
            ..Default::default()
        }
    }

    pub fn with_timestamp(mut self, date: impl Into<String>, time: impl Into<String>) -> Self {
        self.analysis_date = date.into();
        self.analysis_time = time.into();
        self
    }
}

/// 보고서 하단 고지문
pub const DEFAULT_NOTE: &str =
    "본 분석 결과는 자동 검토 결과이며 참고용입니다. 정확한 법적 검토를 위해서는 노무사 상담을 받아보시기 바랍니다.";

/// 분석 보고서
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub meta: ReportMeta,
    pub risk_level: RiskLevel,
    pub summary: String,
    pub compliance_score: u8,
    pub compliance_grade: Grade,
    pub required_items: Vec<RequiredItem>,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
}

impl AnalysisReport {
    pub fn compliant_count(&self) -> usize {
        self.required_items
            .iter()
            .filter(|i| i.status == ItemStatus::Compliant)
            .count()
    }

    pub fn needs_improvement_count(&self) -> usize {
        self.required_items.len() - self.compliant_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> AnalysisReport {
        AnalysisReport {
            meta: ReportMeta {
                file_name: "rules.txt".to_string(),
                file_size: "1.0 KB".to_string(),
                ..Default::default()
            },
            risk_level: Level::Medium,
            summary: "요약".to_string(),
            compliance_score: 72,
            compliance_grade: Grade::CPlus,
            required_items: vec![RequiredItem {
                item: "근로시간 규정".to_string(),
                status: ItemStatus::Compliant,
                description: "명시됨".to_string(),
                compliance: 80,
            }],
            risk_factors: vec![],
            recommendations: vec![],
        }
    }

    #[test]
    fn test_grade_bands() {
        assert_eq!(Grade::from_score(0), Grade::D);
        assert_eq!(Grade::from_score(59), Grade::D);
        assert_eq!(Grade::from_score(60), Grade::C);
        assert_eq!(Grade::from_score(69), Grade::C);
        assert_eq!(Grade::from_score(70), Grade::CPlus);
        assert_eq!(Grade::from_score(80), Grade::BPlus);
        assert_eq!(Grade::from_score(89), Grade::BPlus);
        assert_eq!(Grade::from_score(90), Grade::A);
        assert_eq!(Grade::from_score(100), Grade::A);
    }

    #[test]
    fn test_report_serialize_keys() {
        let json = serde_json::to_string(&sample_report()).expect("직렬화 실패");
        assert!(json.contains("\"fileName\":\"rules.txt\""));
        assert!(json.contains("\"complianceScore\":72"));
        assert!(json.contains("\"complianceGrade\":\"C+\""));
        assert!(json.contains("\"riskLevel\":\"중간\""));
        assert!(json.contains("\"status\":\"준수\""));
    }

    #[test]
    fn test_report_deserialize_roundtrip() {
        let report = sample_report();
        let json = serde_json::to_string(&report).unwrap();
        let back: AnalysisReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_level_accepts_legacy_label() {
        let level: Level = serde_json::from_str("\"보통\"").unwrap();
        assert_eq!(level, Level::Medium);
        assert_eq!(level.label(), "중간");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0.0 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let doc = Document {
            content: "근로시간".to_string(),
            ..Default::default()
        };
        assert_eq!(doc.fingerprint(), doc.clone().fingerprint());
        assert_eq!(doc.fingerprint().len(), 64);
    }

    #[test]
    fn test_counts() {
        let report = sample_report();
        assert_eq!(report.compliant_count(), 1);
        assert_eq!(report.needs_improvement_count(), 0);
    }
}
