//! AI 분석 프롬프트 생성
//!
//! - SYSTEM_PROMPT: 역할 지시
//! - build_analysis_prompt: 문서 본문 + 10개 주제 루브릭 + 출력 JSON 형식

use crate::checklist::LABOR_LAW_TOPICS;

/// 프롬프트에 넣는 본문 최대 문자 수
pub const MAX_PROMPT_DOCUMENT_CHARS: usize = 12_000;

pub const SYSTEM_PROMPT: &str = "당신은 한국 노동법 전문 공인노무사입니다. 취업규칙을 근로기준법 기준으로 검토하고, 지정된 JSON 형식으로만 답변합니다.";

/// 본문을 최대 길이로 자른다 (문자 경계 기준)
pub fn truncate_document(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => (&text[..byte_idx], true),
        None => (text, false),
    }
}

/// 분석 요청 프롬프트 생성
///
/// # Arguments
/// * `file_name` - 원본 파일명
/// * `text` - 문서 본문 (MAX_PROMPT_DOCUMENT_CHARS에서 잘림)
pub fn build_analysis_prompt(file_name: &str, text: &str) -> String {
    let topics = LABOR_LAW_TOPICS
        .iter()
        .enumerate()
        .map(|(i, topic)| format!("{}. {}", i + 1, topic))
        .collect::<Vec<_>>()
        .join("\n");

    let (body, truncated) = truncate_document(text, MAX_PROMPT_DOCUMENT_CHARS);
    let truncated_note = if truncated {
        "\n(문서가 길어 앞부분만 포함했습니다)"
    } else {
        ""
    };

    format!(
        r#"다음 취업규칙 문서를 검토하세요.

## 검토 주제
{topics}

## 출력 형식 (이 JSON 객체만 출력)
{{
  "riskLevel": "낮음" | "중간" | "높음",
  "summary": "종합 의견 (2-3문장)",
  "complianceScore": 0-100 정수,
  "requiredItems": [
    {{"item": "항목명", "status": "준수" | "개선필요", "description": "설명", "compliance": 0-100 정수}}
  ],
  "riskFactors": [
    {{"factor": "위험 요소", "level": "낮음" | "중간" | "높음", "description": "설명", "recommendation": "개선 방안"}}
  ],
  "recommendations": [
    {{"priority": "낮음" | "중간" | "높음", "item": "대상 항목", "action": "조치사항", "deadline": "완료 목표"}}
  ]
}}

## 주의
- 각 목록은 최대 10개
- 문서에 없는 내용은 "개선필요"로 판정
- JSON 외의 설명문은 출력하지 않음

## 문서: {file_name}{truncated_note}
{body}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_topics_and_document() {
        let prompt = build_analysis_prompt("rules.txt", "제1조 근로시간");
        assert!(prompt.contains("rules.txt"));
        assert!(prompt.contains("제1조 근로시간"));
        assert!(prompt.contains("10. 표창과 제재"));
        assert!(prompt.contains("\"complianceScore\""));
        assert!(!prompt.contains("앞부분만"));
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        let text = "가나다라마";
        assert_eq!(truncate_document(text, 2), ("가나", true));
        assert_eq!(truncate_document(text, 5), (text, false));
        assert_eq!(truncate_document(text, 10), (text, false));
    }

    #[test]
    fn test_long_document_is_marked() {
        let text = "가".repeat(MAX_PROMPT_DOCUMENT_CHARS + 5);
        let prompt = build_analysis_prompt("big.txt", &text);
        assert!(prompt.contains("앞부분만"));
    }
}
