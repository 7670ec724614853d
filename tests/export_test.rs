//! 내보내기 통합 테스트
//!
//! 키워드 분석 결과를 파일로 내보내고 다시 읽어 내용을 확인한다.

use policy_review::export::export_report;
use policy_review_common::export::delimited::{parse_delimited, Delimiter, HEADER};
use policy_review_common::{
    analyze_text, demo_report, AnalysisReport, ExportFormat, NoJitter, ReportMeta,
};
use tempfile::tempdir;

const RULES: &str = "\
제1조(목적) 이 규칙은 근로조건을 정한다.
제2조(근로시간) 근로시간은 1일 8시간, 1주 40시간으로 한다.
제3조(임금) 임금은 매월 25일에 지급한다.
제4조(휴가) 연차 휴가는 근로기준법에 따른다.";

fn heuristic_report(file_name: &str) -> AnalysisReport {
    analyze_text(
        RULES,
        &mut NoJitter,
        ReportMeta {
            file_name: file_name.to_string(),
            file_size: "0.2 KB".to_string(),
            analysis_date: "2024. 3. 1.".to_string(),
            analysis_time: "10:00:00".to_string(),
            ai_mode: "키워드 분석".to_string(),
            ..Default::default()
        },
    )
}

#[test]
fn test_csv_export_reads_back() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = heuristic_report("회사 규칙.txt");

    let written = export_report(&report, &[ExportFormat::Csv], dir.path()).unwrap();
    assert_eq!(written.len(), 1);
    assert_eq!(
        written[0].file_name().unwrap().to_string_lossy(),
        "취업규칙_분석결과_회사 규칙.csv"
    );

    let content = std::fs::read_to_string(&written[0]).unwrap();
    let rows = parse_delimited(&content, Delimiter::Comma).unwrap();

    assert_eq!(rows[0], HEADER.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    assert!(rows.iter().any(|r| r[0] == "기본정보" && r[3] == "회사 규칙.txt"));
    assert!(rows
        .iter()
        .any(|r| r[1] == "준수율" && r[3].contains(&report.compliance_score.to_string())));

    let required = rows.iter().filter(|r| r[0] == "필수항목").count();
    assert_eq!(required, report.required_items.len());
}

#[test]
fn test_tsv_export_uses_tabs() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = heuristic_report("rules.txt");

    let written = export_report(&report, &[ExportFormat::Tsv], dir.path()).unwrap();
    let content = std::fs::read_to_string(&written[0]).unwrap();
    let first_line = content.trim_start_matches('\u{FEFF}').lines().next().unwrap();
    assert_eq!(first_line, HEADER.join("\t"));
}

#[test]
fn test_all_formats_to_one_folder() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = demo_report(ReportMeta {
        file_name: "rules.docx".into(),
        ..Default::default()
    });

    let written = export_report(&report, &ExportFormat::ALL, dir.path()).unwrap();
    assert_eq!(written.len(), ExportFormat::ALL.len());
    for (path, format) in written.iter().zip(ExportFormat::ALL) {
        assert_eq!(
            path.extension().unwrap().to_string_lossy(),
            format.extension()
        );
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }

    let json = std::fs::read_to_string(dir.path().join("취업규칙_분석결과_rules.json")).unwrap();
    let back: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);

    let word = std::fs::read_to_string(dir.path().join("취업규칙_분석결과_rules.doc")).unwrap();
    assert!(word.contains("<table"));
    assert!(word.contains("해고 사유 명시"));
}

#[test]
fn test_multiple_formats_with_file_path_use_parent() {
    let dir = tempdir().expect("Failed to create temp dir");
    let report = heuristic_report("rules.txt");
    let target = dir.path().join("report.csv");

    let written =
        export_report(&report, &[ExportFormat::Csv, ExportFormat::Text], &target).unwrap();
    assert_eq!(written[0], dir.path().join("취업규칙_분석결과_rules.csv"));
    assert_eq!(written[1], dir.path().join("취업규칙_분석결과_rules.txt"));
    assert!(!target.exists());
}
