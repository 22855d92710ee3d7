//! Input path resolution and document opening.

use std::path::{Component, Path, PathBuf};

use mupdf::Document;

use crate::error::{PdfReaderError, Result};

/// Resolve a path to an absolute, lexically normalized path.
///
/// Relative paths are joined to the current directory. `.` and `..` are
/// folded without touching the filesystem, so symlinks are left as they are.
pub fn resolve_path(raw: &str) -> Result<PathBuf> {
    let path = Path::new(raw);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };
    Ok(normalize(&joined))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `raw` and check that it names an existing regular `.pdf` file.
///
/// Checks run in order: existence, regular file, extension.
pub fn validate_pdf_path(raw: &str) -> Result<PathBuf> {
    let path = resolve_path(raw)?;

    if !path.exists() {
        return Err(PdfReaderError::PathNotFound(path));
    }
    if !path.is_file() {
        return Err(PdfReaderError::NotAFile(path));
    }
    if !has_pdf_extension(&path) {
        return Err(PdfReaderError::NotAPdf(path));
    }

    Ok(path)
}

fn has_pdf_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Open a PDF, authenticating when the document is encrypted.
pub fn open_document(path: &Path, password: Option<&str>) -> Result<Document> {
    let path_str = path
        .to_str()
        .ok_or_else(|| PdfReaderError::internal(format!("Path is not valid UTF-8: {}", path.display())))?;
    let mut doc = Document::open(path_str)?;

    if doc.needs_password()? {
        match password {
            Some(pw) => {
                if !doc.authenticate(pw)? {
                    return Err(PdfReaderError::InvalidPassword);
                }
            }
            None => return Err(PdfReaderError::PasswordRequired),
        }
    }

    Ok(doc)
}
