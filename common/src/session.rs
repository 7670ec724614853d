//! 화면 상태 전이 (WASM 앱이 사용, 렌더링과 분리된 순수 로직)
//!
//! Empty → FileSelected → Analyzing → Reported → (새 분석) → Empty
//!
//! 분석 요청마다 티켓 번호를 발급하고, 응답이 도착했을 때 현재 티켓과
//! 다르면 (그 사이에 초기화되었으면) 응답을 버린다.

use crate::intake::{self, IntakeError};
use crate::types::{AnalysisReport, Document};

/// 진행률 타이머 간격 (ms)
pub const PROGRESS_TICK_MS: u32 = 200;
/// 틱당 최대 증가량
pub const MAX_PROGRESS_STEP: f64 = 15.0;
/// 분석 중 진행률 상한. 완료 시에만 100이 된다.
pub const PROGRESS_CAP: f64 = 95.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    FileSelected,
    Analyzing,
    Reported,
}

/// 분석 요청 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    document: Option<Document>,
    /// 선택한 파일의 원본 바이트 (서버로 보낼 때 그대로 사용)
    upload: Option<Vec<u8>>,
    report: Option<AnalysisReport>,
    error: Option<String>,
    progress: f64,
    generation: u64,
    min_chars: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(intake::DEFAULT_MIN_CONTENT_CHARS)
    }
}

impl Session {
    pub fn new(min_chars: usize) -> Self {
        Self {
            phase: Phase::Empty,
            document: None,
            upload: None,
            report: None,
            error: None,
            progress: 0.0,
            generation: 0,
            min_chars,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn upload_bytes(&self) -> Option<&[u8]> {
        self.upload.as_deref()
    }

    pub fn report(&self) -> Option<&AnalysisReport> {
        self.report.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// 표시용 진행률 (0-100 정수)
    pub fn progress(&self) -> u8 {
        self.progress.round().clamp(0.0, 100.0) as u8
    }

    /// 내용을 읽기 전 형식/크기 검사. 실패하면 오류 메시지를 남긴다.
    pub fn precheck(&mut self, name: &str, media_type: &str, size: u64) -> Result<(), IntakeError> {
        if !matches!(self.phase, Phase::Empty | Phase::FileSelected) {
            return Ok(());
        }
        intake::check_file(name, media_type, size).map_err(|e| {
            self.error = Some(e.to_string());
            e
        })
    }

    /// 파일 선택 또는 드롭
    ///
    /// 검증에 실패하면 단계는 그대로 두고 오류 메시지만 남긴다.
    /// 분석 중이거나 결과 화면에서는 무시한다.
    pub fn select_file(
        &mut self,
        name: &str,
        media_type: &str,
        bytes: &[u8],
    ) -> Result<(), IntakeError> {
        if !matches!(self.phase, Phase::Empty | Phase::FileSelected) {
            return Ok(());
        }

        match intake::accept(name, media_type, bytes, self.min_chars) {
            Ok(document) => {
                self.document = Some(document);
                self.upload = Some(bytes.to_vec());
                self.error = None;
                self.phase = Phase::FileSelected;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// 선택한 파일 제거
    pub fn remove_file(&mut self) {
        if self.phase == Phase::FileSelected {
            self.document = None;
            self.upload = None;
            self.error = None;
            self.phase = Phase::Empty;
        }
    }

    /// 분석 시작. 파일이 선택된 상태에서만 티켓을 돌려준다.
    pub fn start_analysis(&mut self) -> Option<Ticket> {
        if self.phase != Phase::FileSelected || self.document.is_none() {
            if self.phase == Phase::Empty {
                self.error = Some("파일을 먼저 선택해주세요.".to_string());
            }
            return None;
        }

        self.generation += 1;
        self.phase = Phase::Analyzing;
        self.error = None;
        self.progress = 0.0;
        Some(Ticket(self.generation))
    }

    /// 진행률 타이머 한 틱. `unit`은 [0, 1) 난수.
    pub fn tick_progress(&mut self, unit: f64) {
        if self.phase != Phase::Analyzing {
            return;
        }
        let step = unit.clamp(0.0, 1.0) * MAX_PROGRESS_STEP;
        self.progress = (self.progress + step).min(PROGRESS_CAP);
    }

    /// 분석 응답 반영. 티켓이 현재와 다르면 false를 돌려주고 아무것도 하지 않는다.
    ///
    /// 실패하면 FileSelected로 돌아가 다시 시도할 수 있게 한다.
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<AnalysisReport, String>) -> bool {
        if self.phase != Phase::Analyzing || ticket.0 != self.generation {
            return false;
        }

        match outcome {
            Ok(report) => {
                self.report = Some(report);
                self.progress = 100.0;
                self.phase = Phase::Reported;
            }
            Err(message) => {
                self.error = Some(message);
                self.progress = 0.0;
                self.phase = Phase::FileSelected;
            }
        }
        true
    }

    /// 히스토리에 저장된 보고서를 연다. 분석 중에는 무시한다.
    pub fn open_report(&mut self, report: AnalysisReport) -> bool {
        if self.phase == Phase::Analyzing {
            return false;
        }
        self.generation += 1;
        self.document = None;
        self.upload = None;
        self.report = Some(report);
        self.error = None;
        self.progress = 100.0;
        self.phase = Phase::Reported;
        true
    }

    /// 새 분석: 모든 상태를 버리고 처음으로
    pub fn reset(&mut self) {
        self.generation += 1;
        self.phase = Phase::Empty;
        self.document = None;
        self.upload = None;
        self.report = None;
        self.error = None;
        self.progress = 0.0;
    }
}
