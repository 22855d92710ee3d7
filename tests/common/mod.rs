//! Shared fixtures for integration tests.

use std::path::{Path, PathBuf};

/// Build a small PDF. Each page gets a 24pt title line and a 12pt body line.
///
/// Titles and bodies must not contain `(`, `)` or `\`.
pub fn pdf_bytes(pages: &[(&str, &str)]) -> Vec<u8> {
    let kids = (0..pages.len())
        .map(|i| format!("{} 0 R", 4 + 2 * i))
        .collect::<Vec<_>>()
        .join(" ");

    let mut objects = vec![
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];
    for (i, (title, body)) in pages.iter().enumerate() {
        let content = format!(
            "BT /F1 24 Tf 72 720 Td ({}) Tj ET\nBT /F1 12 Tf 72 660 Td ({}) Tj ET",
            title, body
        );
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
             /Resources << /Font << /F1 3 0 R >> >> /Contents {} 0 R >>",
            5 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            content.len(),
            content
        ));
    }

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, object).as_bytes());
    }

    let xref_offset = out.len();
    let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        tail.push_str(&format!("{:010} 00000 n \n", offset));
    }
    tail.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    ));
    out.extend_from_slice(tail.as_bytes());
    out
}

/// The three-page document most tests use.
pub fn three_page_pdf() -> Vec<u8> {
    pdf_bytes(&[
        ("Page One Title", "This is the body text of the first page."),
        ("Page Two Title", "This is the body text of the second page."),
        ("Page Three Title", "This is the body text of the third page."),
    ])
}

/// Write `bytes` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}
