//! Renders an [`ExportDocument`] as a paginated PDF table.
//!
//! Output uses the standard Helvetica faces with WinAnsi encoding, so no fonts
//! are embedded. Characters outside that encoding (emoji included) render as
//! `?`. The header row repeats on every page.

use super::{ExportDocument, PaperConfig};
use crate::error::CatalogError;
use chrono::{DateTime, Utc};
use std::io::Write;
use std::path::Path;
use tracing::info;

const BASE_FONT_SIZE: f32 = 12.0;
const BASE_TITLE_SIZE: f32 = 20.0;
const BASE_ROW_HEIGHT: f32 = 22.0;
const BASE_CELL_PADDING: f32 = 6.0;
/// Average Helvetica advance as a fraction of the font size.
const AVERAGE_GLYPH_WIDTH: f32 = 0.52;
const MIN_SCALE: f32 = 0.1;

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const REGULAR_FONT_ID: usize = 3;
const BOLD_FONT_ID: usize = 4;
const INFO_ID: usize = 5;
const FIRST_PAGE_ID: usize = 6;

struct Layout {
    page_width: f32,
    page_height: f32,
    margin: f32,
    font_size: f32,
    title_size: f32,
    title_block: f32,
    row_height: f32,
    padding: f32,
    column_x: Vec<f32>,
    column_widths: Vec<f32>,
    rows_per_page: usize,
}

impl Layout {
    fn new(document: &ExportDocument, paper: &PaperConfig) -> Self {
        let (page_width, page_height) = paper.page_points();
        let margin = paper.margin_points();
        let scale = paper.scale.max(MIN_SCALE);
        let font_size = BASE_FONT_SIZE * scale;
        let title_size = BASE_TITLE_SIZE * scale;
        let title_block = title_size * 1.8;
        let row_height = BASE_ROW_HEIGHT * scale;
        let padding = BASE_CELL_PADDING * scale;

        let weights: Vec<f32> = if document.weights.len() == document.headers.len() {
            document.weights.clone()
        } else {
            vec![1.0; document.headers.len()]
        };
        let total_weight = weights.iter().sum::<f32>().max(f32::EPSILON);
        let usable_width = (page_width - 2.0 * margin).max(1.0);
        let column_widths: Vec<f32> = weights
            .iter()
            .map(|weight| usable_width * weight / total_weight)
            .collect();
        let mut column_x = Vec::with_capacity(column_widths.len());
        let mut x = margin;
        for width in &column_widths {
            column_x.push(x);
            x += width;
        }

        let body_height = page_height - 2.0 * margin - title_block - row_height;
        let rows_per_page = ((body_height / row_height).floor() as usize).max(1);

        Self {
            page_width,
            page_height,
            margin,
            font_size,
            title_size,
            title_block,
            row_height,
            padding,
            column_x,
            column_widths,
            rows_per_page,
        }
    }

    fn page_content(
        &self,
        document: &ExportDocument,
        rows: &[Vec<String>],
        page_index: usize,
        page_count: usize,
    ) -> Vec<u8> {
        let mut out = Vec::new();
        let top = self.page_height - self.margin;
        let left = self.margin;
        let right = self.page_width - self.margin;

        push_text(
            &mut out,
            "F2",
            self.title_size,
            left,
            top - self.title_size,
            &document.title,
        );
        let label = format!("Page {} of {}", page_index + 1, page_count);
        let label_width = estimate_width(&label, self.font_size);
        push_text(
            &mut out,
            "F1",
            self.font_size,
            right - label_width,
            top - self.title_size,
            &label,
        );

        let header_top = top - self.title_block;
        let header_bottom = header_top - self.row_height;
        let _ = writeln!(
            out,
            "0.92 g {:.2} {:.2} {:.2} {:.2} re f 0 g",
            left,
            header_bottom,
            right - left,
            self.row_height
        );
        self.push_row(&mut out, "F2", &document.headers, header_bottom);

        let mut row_top = header_bottom;
        for row in rows {
            let row_bottom = row_top - self.row_height;
            self.push_row(&mut out, "F1", row, row_bottom);
            let _ = writeln!(
                out,
                "0.8 G 0.5 w {:.2} {:.2} m {:.2} {:.2} l S 0 G",
                left, row_bottom, right, row_bottom
            );
            row_top = row_bottom;
        }
        out
    }

    fn push_row(&self, out: &mut Vec<u8>, font: &str, cells: &[String], row_bottom: f32) {
        let baseline = row_bottom + (self.row_height - self.font_size) / 2.0 + self.font_size * 0.2;
        for ((cell, x), width) in cells
            .iter()
            .zip(&self.column_x)
            .zip(&self.column_widths)
        {
            let fitted = fit_text(cell, width - 2.0 * self.padding, self.font_size);
            if fitted.is_empty() {
                continue;
            }
            push_text(out, font, self.font_size, x + self.padding, baseline, &fitted);
        }
    }
}

fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * AVERAGE_GLYPH_WIDTH
}

fn fit_text(text: &str, width: f32, font_size: f32) -> String {
    let max_chars = (width / (font_size * AVERAGE_GLYPH_WIDTH)).floor().max(0.0) as usize;
    let count = text.chars().count();
    if count <= max_chars {
        return text.to_string();
    }
    if max_chars <= 3 {
        return text.chars().take(max_chars).collect();
    }
    let mut fitted: String = text.chars().take(max_chars - 3).collect();
    fitted.push_str("...");
    fitted
}

fn push_text(out: &mut Vec<u8>, font: &str, size: f32, x: f32, y: f32, text: &str) {
    let _ = write!(out, "BT /{} {:.2} Tf {:.2} {:.2} Td ", font, size, x, y);
    push_pdf_string(out, text);
    out.extend_from_slice(b" Tj ET\n");
}

/// Append `text` as a PDF literal string in WinAnsi encoding.
fn push_pdf_string(out: &mut Vec<u8>, text: &str) {
    out.push(b'(');
    for ch in text.chars() {
        let byte = win_ansi_byte(ch);
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
}

fn win_ansi_byte(ch: char) -> u8 {
    match ch {
        '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => ch as u8,
        '€' => 0x80,
        '…' => 0x85,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '–' => 0x96,
        '—' => 0x97,
        c if c.is_whitespace() => b' ',
        _ => b'?',
    }
}

#[derive(Default)]
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut writer = Self::default();
        writer.buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        writer
    }

    /// Objects must be written in ascending id order starting at 1.
    fn object(&mut self, id: usize, body: &[u8]) {
        debug_assert_eq!(id, self.offsets.len() + 1, "objects written out of order");
        self.offsets.push(self.buf.len());
        let _ = writeln!(self.buf, "{} 0 obj", id);
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, data: &[u8]) {
        let mut body = format!("<< /Length {} >>\nstream\n", data.len()).into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(b"\nendstream");
        self.object(id, &body);
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_offset = self.buf.len();
        let _ = write!(
            self.buf,
            "xref\n0 {}\n0000000000 65535 f \n",
            self.offsets.len() + 1
        );
        for offset in &self.offsets {
            let _ = write!(self.buf, "{:010} 00000 n \n", offset);
        }
        let _ = write!(
            self.buf,
            "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
            self.offsets.len() + 1,
            CATALOG_ID,
            INFO_ID,
            xref_offset
        );
        self.buf
    }
}

/// Render `document` to PDF bytes.
pub fn render(
    document: &ExportDocument,
    paper: &PaperConfig,
    created_at: DateTime<Utc>,
) -> Vec<u8> {
    let layout = Layout::new(document, paper);
    let pages: Vec<&[Vec<String>]> = if document.rows.is_empty() {
        vec![&[]]
    } else {
        document.rows.chunks(layout.rows_per_page).collect()
    };
    let page_count = pages.len();
    let page_ids: Vec<usize> = (0..page_count)
        .map(|index| FIRST_PAGE_ID + index * 2)
        .collect();

    let mut writer = PdfWriter::new();
    writer.object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );
    let kids = page_ids
        .iter()
        .map(|id| format!("{} 0 R", id))
        .collect::<Vec<_>>()
        .join(" ");
    writer.object(
        PAGES_ID,
        format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, page_count).as_bytes(),
    );
    writer.object(
        REGULAR_FONT_ID,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>",
    );
    writer.object(
        BOLD_FONT_ID,
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );
    let mut info = b"<< /Title ".to_vec();
    push_pdf_string(&mut info, &document.title);
    let _ = write!(
        info,
        " /Producer (product catalog) /CreationDate (D:{}Z) >>",
        created_at.format("%Y%m%d%H%M%S")
    );
    writer.object(INFO_ID, &info);

    for (index, rows) in pages.iter().enumerate() {
        let page_id = page_ids[index];
        let content_id = page_id + 1;
        let page = format!(
            "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
             /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >> >> /Contents {} 0 R >>",
            PAGES_ID,
            layout.page_width,
            layout.page_height,
            REGULAR_FONT_ID,
            BOLD_FONT_ID,
            content_id
        );
        writer.object(page_id, page.as_bytes());
        let content = layout.page_content(document, rows, index, page_count);
        writer.stream(content_id, &content);
    }
    writer.finish()
}

/// Render `document` and write it to `path`, creating parent directories.
///
/// # Errors
/// Returns [`CatalogError::Export`] when `path` names a directory and
/// [`CatalogError::Io`] when the destination cannot be written.
pub fn write_to_path(
    document: &ExportDocument,
    paper: &PaperConfig,
    path: &Path,
) -> Result<(), CatalogError> {
    if path.is_dir() {
        return Err(CatalogError::Export(format!(
            "destination {} is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let bytes = render(document, paper, Utc::now());
    std::fs::write(path, &bytes)?;
    info!(
        path = %path.display(),
        rows = document.rows.len(),
        bytes = bytes.len(),
        "pdf export written"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::PaperSize;
    use chrono::TimeZone;

    fn document(rows: usize) -> ExportDocument {
        ExportDocument {
            title: "Products".to_string(),
            headers: vec!["ID".to_string(), "Name".to_string()],
            weights: vec![1.0, 3.0],
            rows: (0..rows)
                .map(|index| vec![index.to_string(), format!("Product {}", index)])
                .collect(),
        }
    }

    fn created_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .single()
            .expect("valid timestamp")
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|window| window == needle)
    }

    #[test]
    fn render_produces_well_formed_envelope() {
        let bytes = render(&document(3), &PaperConfig::default(), created_at());
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(contains(&bytes, b"/MediaBox [0 0 841.89 595.28]"));
        assert!(contains(&bytes, b"/CreationDate (D:20240301123000Z)"));
        assert!(contains(&bytes, b"(Product 2) Tj"));
    }

    #[test]
    fn xref_offsets_point_at_objects() {
        let bytes = render(&document(60), &PaperConfig::default(), created_at());
        let marker = b"startxref\n";
        let startxref = bytes
            .windows(marker.len())
            .rposition(|window| window == marker)
            .expect("startxref");
        let trailer =
            std::str::from_utf8(&bytes[startxref + marker.len()..]).expect("ascii trailer");
        let xref_offset: usize = trailer
            .lines()
            .next()
            .and_then(|line| line.trim().parse().ok())
            .expect("xref offset");
        assert!(bytes[xref_offset..].starts_with(b"xref\n"));

        let xref = std::str::from_utf8(&bytes[xref_offset..]).expect("ascii xref");
        let entries: Vec<usize> = xref
            .lines()
            .skip(3)
            .take_while(|line| line.ends_with(" n "))
            .map(|line| line[..10].parse().expect("offset"))
            .collect();
        assert!(!entries.is_empty());
        for (index, offset) in entries.iter().enumerate() {
            let expected = format!("{} 0 obj", index + 1);
            assert!(
                bytes[*offset..].starts_with(expected.as_bytes()),
                "object {} not at offset {}",
                index + 1,
                offset
            );
        }
    }

    #[test]
    fn letter_portrait_sets_media_box() {
        let paper = PaperConfig {
            size: PaperSize::Letter,
            landscape: false,
            ..PaperConfig::default()
        };
        let bytes = render(&document(3), &paper, created_at());
        assert!(contains(&bytes, b"/MediaBox [0 0 612.00 792.00]"));
        assert!(contains(&bytes, b"/Count 1"));
    }

    #[test]
    fn long_tables_span_multiple_pages_with_repeated_header() {
        let bytes = render(&document(120), &PaperConfig::default(), created_at());
        assert!(contains(&bytes, b"/Count 3"));
        let text = String::from_utf8_lossy(&bytes);
        assert_eq!(text.matches("(Name) Tj").count(), 3);
        assert!(contains(&bytes, b"(Page 3 of 3) Tj"));
        assert!(contains(&bytes, b"(Product 119) Tj"));
    }

    #[test]
    fn empty_document_still_has_one_page() {
        let bytes = render(&document(0), &PaperConfig::default(), created_at());
        assert!(contains(&bytes, b"/Count 1"));
        assert!(contains(&bytes, b"(ID) Tj"));
    }

    #[test]
    fn strings_are_escaped_and_win_ansi_encoded() {
        let mut out = Vec::new();
        push_pdf_string(&mut out, "Chef (Cajun) \\ Gumbär 🐟");
        assert_eq!(out, b"(Chef \\(Cajun\\) \\\\ Gumb\xE4r ?)".to_vec());
    }

    #[test]
    fn fit_text_truncates_with_ellipsis() {
        assert_eq!(fit_text("Chai", 100.0, 10.0), "Chai");
        let fitted = fit_text("Chef Anton's Cajun Seasoning", 54.0, 10.0);
        assert_eq!(fitted, "Chef An...");
        assert_eq!(fit_text("Chai", 0.0, 10.0), "");
    }

    #[test]
    fn write_to_path_creates_parent_directories() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let path = dir.path().join("nested").join("products.pdf");
        write_to_path(&document(2), &PaperConfig::default(), &path).expect("write");
        let bytes = std::fs::read(&path).expect("read back");
        assert!(bytes.starts_with(b"%PDF-1.4"));
    }

    #[test]
    fn write_to_path_rejects_directories() {
        let dir = tempfile::TempDir::new().expect("temp dir");
        let err = write_to_path(&document(1), &PaperConfig::default(), dir.path())
            .expect_err("directory destination");
        assert!(matches!(err, CatalogError::Export(_)));
    }
}
