//! 노동법 점검 항목 정의
//!
//! - CATEGORIES: 키워드 카테고리 (문자열 포함 여부로 판정)
//! - REQUIRED_ITEMS: 점수를 매기는 필수 기재사항 5개
//! - RISK_CHECKS: 위험 요소 2개 (징계, 연장근로)
//! - LABOR_LAW_TOPICS: AI 분석 프롬프트에 넣는 10개 주제

/// 키워드 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub key: &'static str,
    pub label: &'static str,
    pub keywords: &'static [&'static str],
}

impl Category {
    /// 본문에 포함된 키워드 수
    pub fn hits(&self, text: &str) -> usize {
        self.keywords.iter().filter(|kw| text.contains(*kw)).count()
    }

    /// 키워드가 하나라도 있는지
    pub fn is_covered(&self, text: &str) -> bool {
        self.keywords.iter().any(|kw| text.contains(kw))
    }
}

pub const WORKING_HOURS: Category = Category {
    key: "workingHours",
    label: "근로시간",
    keywords: &["근로시간", "업무시간", "40시간", "주휴일"],
};

pub const REST_TIME: Category = Category {
    key: "restTime",
    label: "휴게시간",
    keywords: &["휴게시간", "휴식시간", "30분", "1시간"],
};

pub const VACATION: Category = Category {
    key: "vacation",
    label: "휴가",
    keywords: &["연차", "휴가", "유급휴가", "연월차"],
};

pub const SALARY: Category = Category {
    key: "salary",
    label: "임금",
    keywords: &["임금", "급여", "월급", "시급", "수당"],
};

pub const RETIREMENT: Category = Category {
    key: "retirement",
    label: "퇴직",
    keywords: &["퇴직", "퇴직금", "퇴직급여"],
};

pub const DISCIPLINE: Category = Category {
    key: "discipline",
    label: "징계",
    keywords: &["징계", "해고", "처벌", "벌칙"],
};

pub const OVERTIME: Category = Category {
    key: "overtime",
    label: "연장근로",
    keywords: &["연장근로", "야근", "초과근무", "휴일근무"],
};

pub const CATEGORIES: [Category; 7] = [
    WORKING_HOURS,
    REST_TIME,
    VACATION,
    SALARY,
    RETIREMENT,
    DISCIPLINE,
    OVERTIME,
];

pub fn category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// 필수 기재사항
#[derive(Debug, Clone, Copy)]
pub struct RequiredItemRule {
    pub category: Category,
    pub item: &'static str,
    pub compliant_description: &'static str,
    pub missing_description: &'static str,
}

pub const REQUIRED_ITEMS: [RequiredItemRule; 5] = [
    RequiredItemRule {
        category: WORKING_HOURS,
        item: "근로시간 규정",
        compliant_description: "주 40시간 근로시간 원칙이 문서에 반영되어 있습니다.",
        missing_description: "근로시간에 대한 명확한 규정이 부족합니다.",
    },
    RequiredItemRule {
        category: REST_TIME,
        item: "휴게시간 규정",
        compliant_description: "휴게시간 규정이 적절히 명시되어 있습니다.",
        missing_description: "휴게시간에 대한 구체적인 명시가 필요합니다.",
    },
    RequiredItemRule {
        category: VACATION,
        item: "연차휴가 규정",
        compliant_description: "연차휴가 부여 기준이 문서에 포함되어 있습니다.",
        missing_description: "연차휴가 관련 규정이 부족합니다.",
    },
    RequiredItemRule {
        category: SALARY,
        item: "임금 지급 규정",
        compliant_description: "임금 지급에 관한 규정이 포함되어 있습니다.",
        missing_description: "임금 지급 기준과 방법에 대한 명시가 필요합니다.",
    },
    RequiredItemRule {
        category: RETIREMENT,
        item: "퇴직급여 규정",
        compliant_description: "퇴직급여 관련 규정이 적절히 명시되어 있습니다.",
        missing_description: "퇴직급여 산정 기준에 대한 세부 규정이 필요합니다.",
    },
];

/// 위험 요소 점검
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub category: Category,
    pub factor: &'static str,
    pub present_description: &'static str,
    pub missing_description: &'static str,
    pub present_recommendation: &'static str,
    pub missing_recommendation: &'static str,
}

pub const RISK_CHECKS: [RiskRule; 2] = [
    RiskRule {
        category: DISCIPLINE,
        factor: "징계 절차",
        present_description: "징계 관련 절차가 문서에 명시되어 있습니다.",
        missing_description: "징계 절차에서 근로자의 소명 기회 보장 규정이 부족합니다.",
        present_recommendation: "현재 규정을 유지하되, 세부 절차를 보완하세요.",
        missing_recommendation: "징계위원회 구성 및 소명 절차를 명확히 규정하세요.",
    },
    RiskRule {
        category: OVERTIME,
        factor: "연장근로 관리",
        present_description: "연장근로에 대한 규정이 포함되어 있습니다.",
        missing_description: "연장근로 승인 절차와 제한에 대한 규정이 미흡합니다.",
        present_recommendation: "연장근로 제한 시간을 명확히 하세요.",
        missing_recommendation: "연장근로 사전 승인제도와 제한 규정을 추가하세요.",
    },
];

/// AI 분석 루브릭 (근로기준법 제93조 필수 기재사항 중심)
pub const LABOR_LAW_TOPICS: [&str; 10] = [
    "업무의 시작과 종료 시각, 휴게시간, 휴일, 휴가 및 교대 근로",
    "임금의 결정·계산·지급 방법, 산정기간·지급시기 및 승급",
    "가족수당의 계산·지급 방법",
    "퇴직에 관한 사항",
    "퇴직급여, 상여 및 최저임금에 관한 사항",
    "근로자의 식비, 작업 용품 등의 부담에 관한 사항",
    "근로자를 위한 교육시설에 관한 사항",
    "출산전후휴가·육아휴직 등 일·가정 양립 지원에 관한 사항",
    "안전과 보건 및 직장 내 괴롭힘의 예방·조치에 관한 사항",
    "표창과 제재(징계)에 관한 사항",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hits_counts_distinct_keywords() {
        let text = "근로시간은 주 40시간이며 근로시간 외 근무는 없다";
        assert_eq!(WORKING_HOURS.hits(text), 2);
        assert!(WORKING_HOURS.is_covered(text));
        assert!(!SALARY.is_covered(text));
    }

    #[test]
    fn test_category_lookup() {
        assert_eq!(category("vacation").map(|c| c.label), Some("휴가"));
        assert!(category("unknown").is_none());
    }

    #[test]
    fn test_required_items_are_distinct_categories() {
        let mut keys: Vec<_> = REQUIRED_ITEMS.iter().map(|r| r.category.key).collect();
        keys.dedup();
        assert_eq!(keys.len(), REQUIRED_ITEMS.len());
    }

    #[test]
    fn test_rubric_has_ten_topics() {
        assert_eq!(LABOR_LAW_TOPICS.len(), 10);
    }
}
