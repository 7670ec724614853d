//! 파일 접수 및 검증
//!
//! 형식(미디어 타입 또는 확장자), 크기(10MiB), 최소 길이를 검사하고
//! 바이트를 UTF-8 텍스트로 디코딩한다. PDF/DOC는 구조 해석 없이
//! 그대로 디코딩하므로 손실이 있을 수 있다.

use crate::types::Document;
use thiserror::Error;

/// 업로드 상한 (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// 기본 최소 본문 길이 (문자 수)
pub const DEFAULT_MIN_CONTENT_CHARS: usize = 50;

pub const ALLOWED_MEDIA_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

pub const ALLOWED_EXTENSIONS: &[&str] = &["txt", "pdf", "doc", "docx"];

/// 파일 선택 input의 accept 속성값
pub const ACCEPT_ATTRIBUTE: &str = ".txt,.pdf,.doc,.docx";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("파일이 없습니다.")]
    MissingFile,

    #[error("지원하는 파일 형식: .txt, .pdf, .doc, .docx (받은 파일: {0})")]
    UnsupportedType(String),

    #[error("파일 크기는 10MB 이하여야 합니다. (현재 {size} bytes)")]
    TooLarge { size: u64 },

    #[error("문서 내용이 너무 짧습니다. 최소 {min}자 이상이어야 합니다. (현재 {actual}자)")]
    TooShort { min: usize, actual: usize },
}

/// 확장자가 허용 목록에 있는지 (대소문자 무시)
pub fn has_accepted_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| {
            let ext = ext.to_ascii_lowercase();
            ALLOWED_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn has_accepted_media_type(media_type: &str) -> bool {
    // "text/plain; charset=utf-8" 형태도 허용
    let essence = media_type.split(';').next().unwrap_or("").trim();
    ALLOWED_MEDIA_TYPES
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(essence))
}

/// 읽기 전 검사 (형식, 크기)
///
/// 미디어 타입과 확장자가 모두 허용 목록 밖일 때만 형식 오류가 된다.
pub fn check_file(file_name: &str, media_type: &str, size: u64) -> Result<(), IntakeError> {
    if !has_accepted_media_type(media_type) && !has_accepted_extension(file_name) {
        return Err(IntakeError::UnsupportedType(file_name.to_string()));
    }

    if size > MAX_FILE_SIZE {
        return Err(IntakeError::TooLarge { size });
    }

    Ok(())
}

/// 바이트를 UTF-8로 디코딩 (BOM 제거, 잘못된 시퀀스는 대체 문자)
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}

/// 앞뒤 공백을 제외한 본문 길이 검사 (문장 안의 공백은 센다)
pub fn ensure_min_length(content: &str, min_chars: usize) -> Result<(), IntakeError> {
    let actual = content.trim().chars().count();
    if actual < min_chars {
        return Err(IntakeError::TooShort {
            min: min_chars,
            actual,
        });
    }
    Ok(())
}

/// 검사 후 Document 생성
pub fn accept(
    file_name: &str,
    media_type: &str,
    bytes: &[u8],
    min_chars: usize,
) -> Result<Document, IntakeError> {
    let size = bytes.len() as u64;
    check_file(file_name, media_type, size)?;

    let content = decode_text(bytes);
    ensure_min_length(&content, min_chars)?;

    Ok(Document {
        file_name: file_name.to_string(),
        media_type: media_type.to_string(),
        size,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_text() -> String {
        "제1조 근로시간은 1일 8시간, 1주 40시간으로 한다. ".repeat(4)
    }

    #[test]
    fn test_accepts_plain_text() {
        let text = long_text();
        let doc = accept("rules.txt", "text/plain", text.as_bytes(), 50).unwrap();
        assert_eq!(doc.file_name, "rules.txt");
        assert_eq!(doc.size, text.len() as u64);
        assert_eq!(doc.content, text);
    }

    #[test]
    fn test_unknown_type_with_txt_extension_is_accepted() {
        assert!(check_file("rules.TXT", "", 100).is_ok());
        assert!(check_file("rules.docx", "application/octet-stream", 100).is_ok());
    }

    #[test]
    fn test_media_type_with_parameters() {
        assert!(check_file("rules", "text/plain; charset=utf-8", 100).is_ok());
    }

    #[test]
    fn test_rejects_unsupported_type() {
        let err = check_file("photo.png", "image/png", 100).unwrap_err();
        assert_eq!(err, IntakeError::UnsupportedType("photo.png".to_string()));
        assert!(err.to_string().contains(".txt"));
    }

    #[test]
    fn test_rejects_oversize_regardless_of_type() {
        let err = check_file("rules.txt", "text/plain", MAX_FILE_SIZE + 1).unwrap_err();
        assert!(matches!(err, IntakeError::TooLarge { .. }));
        assert!(check_file("rules.txt", "text/plain", MAX_FILE_SIZE).is_ok());
    }

    #[test]
    fn test_rejects_short_content() {
        let err = accept("rules.txt", "text/plain", "근로시간".as_bytes(), 50).unwrap_err();
        assert_eq!(err, IntakeError::TooShort { min: 50, actual: 4 });
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let padded = format!("   {}   ", "가".repeat(10));
        assert!(ensure_min_length(&padded, 10).is_ok());
        assert!(ensure_min_length(&padded, 11).is_err());
    }

    #[test]
    fn test_inner_whitespace_counts() {
        let text = "  가 나\n다  ";
        assert!(ensure_min_length(text, 5).is_ok());
        assert_eq!(
            ensure_min_length(text, 6),
            Err(IntakeError::TooShort { min: 6, actual: 5 })
        );
    }

    #[test]
    fn test_decode_strips_bom_and_is_lossy() {
        assert_eq!(decode_text(b"\xEF\xBB\xBFabc"), "abc");
        let decoded = decode_text(&[b'a', 0xFF, b'b']);
        assert!(decoded.starts_with('a'));
        assert!(decoded.ends_with('b'));
    }

    #[test]
    fn test_extension_detection() {
        assert!(has_accepted_extension("a.PDF"));
        assert!(!has_accepted_extension("noext"));
        assert!(!has_accepted_extension("a.txt.exe"));
    }
}
