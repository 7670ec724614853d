//! AI 응답 파서
//!
//! 모델 응답에서 JSON을 꺼내고, 선언된 스키마로 검증한 뒤
//! AnalysisReport로 변환한다. 필드 누락이나 범위 위반은 기본값으로
//! 메우지 않고 오류로 돌려준다.

use crate::error::{Error, Result};
use crate::scoring;
use crate::types::{
    AnalysisReport, ItemStatus, Level, Recommendation, ReportMeta, RequiredItem, RiskFactor,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

/// 각 목록의 최대 길이
pub const MAX_LIST_LEN: usize = 10;

lazy_static! {
    static ref JSON_FENCE: Regex = Regex::new(r"(?s)```json\s*(.*?)```").unwrap();
    static ref ANY_FENCE: Regex = Regex::new(r"(?s)```[A-Za-z0-9_-]*\s*(.*?)```").unwrap();
}

/// 응답에서 JSON 객체 부분을 추출
///
/// 추출 우선순위:
/// 1. 응답 전체가 JSON
/// 2. ```json ... ``` 블록
/// 3. 언어 표시 없는 ``` ... ``` 블록
/// 4. 첫 `{` 부터 마지막 `}` 까지
///
/// # Examples
/// ```
/// use policy_review_common::extract_json;
///
/// let response = "결과입니다: {\"summary\": \"ok\"} 이상";
/// assert_eq!(extract_json(response).unwrap(), "{\"summary\": \"ok\"}");
/// ```
pub fn extract_json(response: &str) -> Result<&str> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Ok(trimmed);
    }

    for fence in [&*JSON_FENCE, &*ANY_FENCE] {
        if let Some(body) = fence.captures(response).and_then(|c| c.get(1)) {
            let body = body.as_str().trim();
            if body.starts_with('{') {
                return Ok(body);
            }
        }
    }

    if let (Some(start), Some(end)) = (response.find('{'), response.rfind('}')) {
        if end > start {
            return Ok(&response[start..=end]);
        }
    }

    Err(Error::Parse("응답에서 JSON을 찾을 수 없습니다".into()))
}

/// 모델이 돌려줘야 하는 보고서 스키마
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReport {
    risk_level: Level,
    summary: String,
    compliance_score: i64,
    required_items: Vec<ModelRequiredItem>,
    risk_factors: Vec<ModelRiskFactor>,
    recommendations: Vec<ModelRecommendation>,
}

#[derive(Debug, Deserialize)]
struct ModelRequiredItem {
    item: String,
    status: ItemStatus,
    description: String,
    compliance: i64,
}

#[derive(Debug, Deserialize)]
struct ModelRiskFactor {
    factor: String,
    level: Level,
    description: String,
    recommendation: String,
}

#[derive(Debug, Deserialize)]
struct ModelRecommendation {
    priority: Level,
    item: String,
    action: String,
    deadline: String,
}

fn check_score(field: &str, value: i64) -> Result<u8> {
    u8::try_from(value)
        .ok()
        .filter(|v| *v <= 100)
        .ok_or_else(|| Error::Schema(format!("{} 값 {}이(가) 0-100 범위를 벗어났습니다", field, value)))
}

fn check_len<T>(field: &str, list: &[T]) -> Result<()> {
    if list.len() > MAX_LIST_LEN {
        return Err(Error::Schema(format!(
            "{} 항목 수 {}개가 최대 {}개를 초과합니다",
            field,
            list.len(),
            MAX_LIST_LEN
        )));
    }
    Ok(())
}

fn check_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Schema(format!("{} 값이 비어 있습니다", field)));
    }
    Ok(())
}

impl ModelReport {
    fn validate(self, meta: ReportMeta) -> Result<AnalysisReport> {
        check_text("summary", &self.summary)?;
        let compliance_score = check_score("complianceScore", self.compliance_score)?;

        if self.required_items.is_empty() {
            return Err(Error::Schema("requiredItems가 비어 있습니다".into()));
        }
        check_len("requiredItems", &self.required_items)?;
        check_len("riskFactors", &self.risk_factors)?;
        check_len("recommendations", &self.recommendations)?;

        let required_items = self
            .required_items
            .into_iter()
            .map(|r| {
                check_text("requiredItems.item", &r.item)?;
                Ok(RequiredItem {
                    compliance: check_score("requiredItems.compliance", r.compliance)?,
                    item: r.item,
                    status: r.status,
                    description: r.description,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let risk_factors = self
            .risk_factors
            .into_iter()
            .map(|r| {
                check_text("riskFactors.factor", &r.factor)?;
                Ok(RiskFactor {
                    factor: r.factor,
                    level: r.level,
                    description: r.description,
                    recommendation: r.recommendation,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let recommendations = self
            .recommendations
            .into_iter()
            .map(|r| {
                check_text("recommendations.item", &r.item)?;
                Ok(Recommendation {
                    priority: r.priority,
                    item: r.item,
                    action: r.action,
                    deadline: r.deadline,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(AnalysisReport {
            meta,
            risk_level: self.risk_level,
            summary: self.summary,
            compliance_score,
            compliance_grade: scoring::grade(compliance_score),
            required_items,
            risk_factors,
            recommendations,
        })
    }
}

/// 모델 응답 텍스트를 보고서로 변환
///
/// 등급은 모델 값이 아니라 점수에서 다시 계산한다.
pub fn parse_report_response(response: &str, meta: ReportMeta) -> Result<AnalysisReport> {
    let json_str = extract_json(response)?;
    let model: ModelReport = serde_json::from_str(json_str)
        .map_err(|e| Error::Schema(format!("보고서 JSON이 스키마와 맞지 않습니다: {}", e)))?;
    model.validate(meta)
}
