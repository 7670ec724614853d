use crate::error::{Result, ReviewError};
use policy_review_common::intake::{self, ALLOWED_EXTENSIONS};
use policy_review_common::Document;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

/// 폴더 (또는 단일 파일)에서 분석 대상 문서를 찾는다
///
/// 숨김 파일은 건너뛰고, 결과는 파일명 순으로 정렬한다.
pub fn scan_path(path: &Path, recursive: bool) -> Result<Vec<DocumentFile>> {
    if path.is_file() {
        return Ok(vec![document_file(path)?]);
    }
    if !path.exists() {
        return Err(ReviewError::FolderNotFound(path.display().to_string()));
    }

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut documents = Vec::new();

    for entry in WalkDir::new(path)
        .max_depth(max_depth)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(|e| e.ok())
    {
        let entry_path = entry.path();
        if !entry_path.is_file() {
            continue;
        }

        let file_name = entry_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if intake::has_accepted_extension(&file_name) {
            documents.push(document_file(entry_path)?);
        }
    }

    documents.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(documents)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

fn document_file(path: &Path) -> Result<DocumentFile> {
    let metadata = std::fs::metadata(path)
        .map_err(|_| ReviewError::FileNotFound(path.display().to_string()))?;
    Ok(DocumentFile {
        path: path.to_path_buf(),
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        size: metadata.len(),
    })
}

/// 확장자로 추정한 media type
pub fn media_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// 파일을 읽어 검증된 Document로
pub fn load_document(file: &DocumentFile, min_chars: usize) -> Result<Document> {
    let bytes = std::fs::read(&file.path)?;
    let document = intake::accept(
        &file.file_name,
        media_type_for(&file.file_name),
        &bytes,
        min_chars,
    )?;
    Ok(document)
}

/// 지원 확장자 목록 (안내 메시지용)
pub fn supported_extensions() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_path(Path::new("/nonexistent/folder"), false);
        assert!(matches!(result, Err(ReviewError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_filters_and_sorts() {
        let dir = tempdir().unwrap();
        for name in ["c.txt", "a.docx", "b.PDF", "image.png", ".hidden.txt"] {
            File::create(dir.path().join(name)).unwrap().write_all(b"x").unwrap();
        }

        let result = scan_path(dir.path(), false).unwrap();
        let names: Vec<_> = result.iter().map(|d| d.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.docx", "b.PDF", "c.txt"]);
    }

    #[test]
    fn test_recursive_scan() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir_all(&sub).unwrap();
        File::create(dir.path().join("top.txt")).unwrap();
        File::create(sub.join("nested.txt")).unwrap();

        assert_eq!(scan_path(dir.path(), false).unwrap().len(), 1);
        assert_eq!(scan_path(dir.path(), true).unwrap().len(), 2);
    }

    #[test]
    fn test_single_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.txt");
        File::create(&path).unwrap().write_all(b"hello").unwrap();

        let result = scan_path(&path, false).unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].size, 5);
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for("a.TXT"), "text/plain");
        assert_eq!(media_type_for("a.doc"), "application/msword");
        assert_eq!(media_type_for("noext"), "application/octet-stream");
    }

    #[test]
    fn test_load_document_rejects_short() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("short.txt");
        fs::write(&path, "짧은 문서").unwrap();
        let file = scan_path(&path, false).unwrap().remove(0);

        let result = load_document(&file, 50);
        assert!(matches!(
            result,
            Err(ReviewError::Common(policy_review_common::Error::Validation(_)))
        ));
    }
}
