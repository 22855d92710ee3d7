//! Page specification parsing.
//!
//! A page spec is a compact, 1-based description of the pages to render:
//!
//! - empty or absent: every page
//! - `"4"`: page 4 only
//! - `"2-6"`: pages 2 through 6, inclusive
//! - `"1,3,5"`: pages 1, 3 and 5, in the order given
//!
//! Parsed selections hold zero-based indices, the convention MuPDF uses.

use crate::error::{PdfReaderError, Result};

/// Pages selected for rendering, as zero-based indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSelection {
    /// Render the whole document.
    All,
    /// Contiguous inclusive range. `start <= end` always holds.
    Range { start: i32, end: i32 },
    /// Explicit list, kept in the caller's order with duplicates.
    List(Vec<i32>),
}

impl PageSelection {
    /// Resolve the selection against a document with `page_count` pages.
    ///
    /// Fails on the first index outside `0..page_count`, reporting it with the
    /// 1-based number the caller wrote.
    pub fn resolve(&self, page_count: i32) -> Result<Vec<i32>> {
        let out_of_range = |index: i32| PdfReaderError::PageOutOfRange {
            page: index + 1,
            total: page_count,
        };

        match self {
            Self::All => Ok((0..page_count).collect()),
            Self::Range { start, end } => {
                // Bounds are checked before the range is materialised.
                if *start < 0 || *start >= page_count {
                    return Err(out_of_range(*start));
                }
                if *end >= page_count {
                    return Err(out_of_range(*end));
                }
                Ok((*start..=*end).collect())
            }
            Self::List(pages) => {
                if let Some(&bad) = pages.iter().find(|&&p| p < 0 || p >= page_count) {
                    return Err(out_of_range(bad));
                }
                Ok(pages.clone())
            }
        }
    }
}

/// Parse an optional page spec into a [`PageSelection`].
///
/// Page numbers below 1 are accepted here and rejected later, once the page
/// count of the document is known.
pub fn parse_page_spec(spec: Option<&str>) -> Result<PageSelection> {
    let raw = match spec {
        Some(s) if !s.trim().is_empty() => s,
        _ => return Ok(PageSelection::All),
    };
    let invalid = || PdfReaderError::InvalidPageSpec(raw.to_string());

    if raw.contains(',') {
        let pages = raw
            .split(',')
            .map(|piece| to_index(piece).ok_or_else(invalid))
            .collect::<Result<Vec<_>>>()?;
        return Ok(PageSelection::List(pages));
    }

    if raw.contains('-') {
        let mut parts = raw.split('-');
        let (start, end) = match (parts.next(), parts.next(), parts.next()) {
            (Some(start), Some(end), None) => (start, end),
            _ => return Err(invalid()),
        };
        let start = to_index(start).ok_or_else(invalid)?;
        let end = to_index(end).ok_or_else(invalid)?;
        if start > end {
            return Err(invalid());
        }
        return Ok(PageSelection::Range { start, end });
    }

    let page = to_index(raw).ok_or_else(invalid)?;
    Ok(PageSelection::List(vec![page]))
}

/// 1-based page number text to a zero-based index.
fn to_index(piece: &str) -> Option<i32> {
    piece.trim().parse::<i32>().ok()?.checked_sub(1)
}

#[cfg(test)]
impl PageSelection {
    /// Concrete indices of a restricted selection, `None` for [`PageSelection::All`].
    fn indices(&self) -> Option<Vec<i32>> {
        match self {
            Self::All => None,
            Self::Range { start, end } => Some((*start..=*end).collect()),
            Self::List(pages) => Some(pages.clone()),
        }
    }
}
