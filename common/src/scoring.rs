//! 키워드 점수 계산
//!
//! 카테고리 점수 = min(100, 적중률 × 100 + 지터), 반올림.
//! 지터는 [0, 20) 범위이며 JitterSource로 주입받는다.

use crate::checklist::{Category, CATEGORIES};
use crate::types::{CategoryScore, Grade, Level};

/// 지터 상한 (점)
pub const JITTER_CEILING: f64 = 20.0;

/// 위험 수준 경계: 70 미만 높음, 85 미만 중간
pub const HIGH_RISK_BELOW: u8 = 70;
pub const MEDIUM_RISK_BELOW: u8 = 85;

/// 점수에 더할 난수의 공급원
pub trait JitterSource {
    /// [0, 1) 범위의 값
    fn next_unit(&mut self) -> f64;
}

/// 지터 없음 (테스트, 재현 가능한 출력용)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoJitter;

impl JitterSource for NoJitter {
    fn next_unit(&mut self) -> f64 {
        0.0
    }
}

/// 고정 지터
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub f64);

impl JitterSource for FixedJitter {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}

/// 호출마다 정해진 값을 순서대로 돌려준다 (끝나면 처음부터)
#[derive(Debug, Clone)]
pub struct SequenceJitter {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceJitter {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl JitterSource for SequenceJitter {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}

/// 한 카테고리의 점수
pub fn score_category(category: &Category, text: &str, jitter: &mut dyn JitterSource) -> CategoryScore {
    let hits = category.hits(text);
    let ratio = if category.keywords.is_empty() {
        0.0
    } else {
        hits as f64 / category.keywords.len() as f64
    };

    let unit = jitter.next_unit().clamp(0.0, 1.0 - f64::EPSILON);
    let raw = (ratio * 100.0 + unit * JITTER_CEILING).min(100.0);

    CategoryScore {
        category: category.key.to_string(),
        label: category.label.to_string(),
        score: raw.round() as u8,
        hits,
    }
}

/// 전체 카테고리 점수 (CATEGORIES 순서)
pub fn score_categories(text: &str, jitter: &mut dyn JitterSource) -> Vec<CategoryScore> {
    CATEGORIES
        .iter()
        .map(|c| score_category(c, text, &mut *jitter))
        .collect()
}

/// 단순 평균을 반올림한 종합 점수. 빈 목록은 0.
pub fn overall_score<'a, I>(scores: I) -> u8
where
    I: IntoIterator<Item = &'a CategoryScore>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0u32, 0u32), |(sum, count), s| (sum + s.score as u32, count + 1));

    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as u8
}

pub fn risk_level(score: u8) -> Level {
    if score < HIGH_RISK_BELOW {
        Level::High
    } else if score < MEDIUM_RISK_BELOW {
        Level::Medium
    } else {
        Level::Low
    }
}

pub fn grade(score: u8) -> Grade {
    Grade::from_score(score)
}
