//! PDF to Markdown rendering on top of MuPDF structured text.
//!
//! The output is meant for language models, not for print: headers are
//! recovered from font sizes, lines of a text block are joined into
//! paragraphs, bullet glyphs become list items, and pages are separated by
//! a horizontal rule.

mod headers;

use std::collections::BTreeMap;

use mupdf::{Document, TextPageFlags};
use serde::Deserialize;

use crate::error::Result;
use crate::pages::PageSelection;

pub use headers::HeaderMap;

/// Glyphs that start a bulleted list item.
const BULLETS: &[char] = &['•', '◦', '▪', '‣', '●', '○', '■'];

/// Options for Markdown rendering.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Emit a `-----` rule after every rendered page.
    pub page_separators: bool,
    /// Maximum number of distinct header levels.
    pub max_header_levels: usize,
    /// Points a font must exceed the body size by to count as a header.
    pub header_size_delta: f32,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            page_separators: true,
            max_header_levels: 6,
            header_size_delta: 1.0,
        }
    }
}

/// One line of extracted text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    /// Characters of the line, in reading order.
    pub text: String,
    /// Dominant font size, rounded to whole points.
    pub size: u32,
    /// Index of the structured-text block the line belongs to.
    pub block: usize,
}

/// Render the selected pages of an open document as Markdown.
///
/// Pages appear in selection order. Every selected index is checked against
/// the page count before any page is loaded.
pub fn render_document(
    doc: &Document,
    selection: &PageSelection,
    options: &MarkdownOptions,
) -> Result<String> {
    let page_count = doc.page_count()?;
    let indices = selection.resolve(page_count)?;
    tracing::debug!(page_count, selected = indices.len(), "Rendering PDF pages");

    let pages = indices
        .iter()
        .map(|&index| extract_lines(doc, index))
        .collect::<Result<Vec<_>>>()?;

    Ok(render_pages(&pages, options))
}

/// Render already extracted pages.
pub fn render_pages(pages: &[Vec<TextLine>], options: &MarkdownOptions) -> String {
    let headers = HeaderMap::from_lines(pages.iter().flatten(), options);

    let mut out = String::new();
    for lines in pages {
        let mut writer = PageWriter::new(&headers, &mut out);
        for line in lines {
            writer.push(line);
        }
        writer.finish();

        if options.page_separators {
            out.push_str("-----\n\n");
        }
    }
    out
}

/// Extract the text lines of one page.
fn extract_lines(doc: &Document, index: i32) -> Result<Vec<TextLine>> {
    let page = doc.load_page(index)?;
    let text_page = page.to_text_page(TextPageFlags::empty())?;

    let mut lines = Vec::new();
    let mut block_index = 0;
    for block in text_page.blocks() {
        for line in block.lines() {
            let mut text = String::new();
            let mut sizes: BTreeMap<u32, usize> = BTreeMap::new();
            for ch in line.chars() {
                if let Some(c) = ch.char() {
                    text.push(c);
                    if !c.is_whitespace() {
                        *sizes.entry(ch.size().round() as u32).or_default() += 1;
                    }
                }
            }

            let size = sizes
                .into_iter()
                .max_by_key(|&(size, count)| (count, size))
                .map(|(size, _)| size)
                .unwrap_or(0);

            lines.push(TextLine {
                text,
                size,
                block: block_index,
            });
        }
        block_index += 1;
    }

    Ok(lines)
}

/// What is being accumulated before it is written out.
enum Pending {
    Nothing,
    Paragraph { block: usize, text: String },
    Header { block: usize, level: usize, text: String },
    ListItem { block: usize, text: String },
}

/// Turns the lines of one page into Markdown blocks.
struct PageWriter<'a> {
    headers: &'a HeaderMap,
    out: &'a mut String,
    pending: Pending,
    in_list: bool,
}

impl<'a> PageWriter<'a> {
    fn new(headers: &'a HeaderMap, out: &'a mut String) -> Self {
        Self {
            headers,
            out,
            pending: Pending::Nothing,
            in_list: false,
        }
    }

    fn push(&mut self, line: &TextLine) {
        let text = line.text.trim();
        if text.is_empty() {
            self.flush();
            return;
        }

        if let Some(level) = self.headers.level(line.size) {
            if let Pending::Header {
                block,
                level: current,
                text: header,
            } = &mut self.pending
            {
                if *block == line.block && *current == level {
                    header.push(' ');
                    header.push_str(text);
                    return;
                }
            }
            self.flush();
            self.pending = Pending::Header {
                block: line.block,
                level,
                text: text.to_string(),
            };
            return;
        }

        if let Some(item) = text.strip_prefix(BULLETS) {
            self.flush();
            self.pending = Pending::ListItem {
                block: line.block,
                text: item.trim_start().to_string(),
            };
            return;
        }

        match &mut self.pending {
            // A bare glyph takes the next line as its text, even from another block.
            Pending::ListItem { block, text: item } if item.is_empty() => {
                *block = line.block;
                item.push_str(text);
                return;
            }
            Pending::ListItem { block, text: item } | Pending::Paragraph { block, text: item }
                if *block == line.block =>
            {
                join_line(item, text);
                return;
            }
            _ => {}
        }
        self.flush();
        self.pending = Pending::Paragraph {
            block: line.block,
            text: text.to_string(),
        };
    }

    /// Write out whatever is pending.
    fn flush(&mut self) {
        let pending = std::mem::replace(&mut self.pending, Pending::Nothing);
        let (prefix, text) = match pending {
            Pending::Nothing => return,
            Pending::ListItem { text, .. } if text.is_empty() => return,
            Pending::ListItem { text, .. } => {
                self.out.push_str("- ");
                self.out.push_str(&text);
                self.out.push('\n');
                self.in_list = true;
                return;
            }
            Pending::Paragraph { text, .. } => (String::new(), text),
            Pending::Header { level, text, .. } => (format!("{} ", "#".repeat(level)), text),
        };

        if self.in_list {
            self.out.push('\n');
            self.in_list = false;
        }
        self.out.push_str(&prefix);
        self.out.push_str(&text);
        self.out.push_str("\n\n");
    }

    fn finish(mut self) {
        self.flush();
        if self.in_list {
            self.out.push('\n');
        }
    }
}

/// Append a line to a paragraph, merging words hyphenated across lines.
///
/// `exam-` + `ple` gives `example`; `Franco-` + `German` keeps the hyphen.
fn join_line(paragraph: &mut String, line: &str) {
    let mut tail = paragraph.chars().rev();
    let hyphenated = tail.next() == Some('-') && tail.next().is_some_and(char::is_alphabetic);
    if hyphenated {
        if line.starts_with(char::is_lowercase) {
            paragraph.pop();
        }
    } else {
        paragraph.push(' ');
    }
    paragraph.push_str(line);
}
