use crate::error::Result;
use policy_review_common::export::{export_file_name, render, ExportFormat};
use policy_review_common::AnalysisReport;
use std::path::{Path, PathBuf};

/// 출력 경로: 디렉터리(또는 확장자 없는 경로)면 규칙에 따른 파일명을 붙인다
pub fn output_path_for_format(output: &Path, report: &AnalysisReport, format: ExportFormat) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(export_file_name(&report.meta.file_name, format))
    } else {
        output.to_path_buf()
    }
}

/// 보고서를 지정 형식들로 저장
pub fn export_report(
    report: &AnalysisReport,
    formats: &[ExportFormat],
    output: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for &format in formats {
        // 여러 형식을 한 파일 경로로 받으면 덮어쓰지 않도록 디렉터리로 취급
        let target = if formats.len() > 1 && output.extension().is_some() {
            output
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(export_file_name(&report.meta.file_name, format))
        } else {
            output_path_for_format(output, report, format)
        };

        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let bytes = render(report, format)?;
        std::fs::write(&target, bytes)?;
        tracing::debug!(format = %format, path = %target.display(), "내보내기");
        written.push(target);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use policy_review_common::{demo_report, ReportMeta};
    use tempfile::tempdir;

    fn report() -> AnalysisReport {
        demo_report(ReportMeta {
            file_name: "rules.txt".into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_dir_output_uses_naming_rule() {
        let dir = tempdir().unwrap();
        let written = export_report(&report(), &[ExportFormat::Csv, ExportFormat::Word], dir.path()).unwrap();
        assert_eq!(written[0], dir.path().join("취업규칙_분석결과_rules.csv"));
        assert_eq!(written[1], dir.path().join("취업규칙_분석결과_rules.doc"));
        assert!(written.iter().all(|p| p.exists()));
    }

    #[test]
    fn test_explicit_file_path() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("out.csv");
        let written = export_report(&report(), &[ExportFormat::Csv], &target).unwrap();
        assert_eq!(written, vec![target.clone()]);
        let content = std::fs::read_to_string(target).unwrap();
        assert!(content.starts_with('\u{FEFF}'));
    }
}
