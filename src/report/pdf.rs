//! PDF serialization of assembled page sheets.
//!
//! Pages are emitted as PDF 1.4 with the Helvetica core fonts and the
//! WinAnsi single-byte encoding, which covers the Portuguese accented
//! characters the report uses. Content streams are left uncompressed.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::warn;

use super::error::ReportError;
use super::sheet::{Align, Font, FontStyle, Op, PageSheet, CELL_PADDING, PAGE_HEIGHT};

const PT_PER_MM: f32 = 72.0 / 25.4;

/// A4 in points.
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

/// Resource names of the three fonts.
const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";
const FONT_ITALIC: &str = "F3";

/// Resource name of the header logo.
const LOGO_NAME: &str = "Im1";

/// Serialize the sheets into a PDF byte buffer. `logo` points at the image
/// drawn by `Op::Image` operations; when it is absent or unreadable those
/// operations are skipped.
pub fn render(pages: &[PageSheet], logo: Option<&Path>) -> Result<Vec<u8>, ReportError> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let regular_id = doc.add_object(font_dict("Helvetica"));
    let bold_id = doc.add_object(font_dict("Helvetica-Bold"));
    let italic_id = doc.add_object(font_dict("Helvetica-Oblique"));

    let logo = logo.and_then(|path| load_logo(&mut doc, path));

    let mut resources = dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => Object::Reference(regular_id),
            FONT_BOLD => Object::Reference(bold_id),
            FONT_ITALIC => Object::Reference(italic_id),
        },
    };
    if let Some(logo) = &logo {
        resources.set(
            "XObject",
            dictionary! { LOGO_NAME => Object::Reference(logo.id) },
        );
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, logo.as_ref());
        let stream = Stream::new(dictionary! {}, content.encode()?);
        let content_id = doc.add_object(stream);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![
                0.into(),
                0.into(),
                Object::Real(PAGE_WIDTH_PT),
                Object::Real(PAGE_HEIGHT_PT),
            ],
            "Contents" => Object::Reference(content_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

fn font_dict(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

struct Logo {
    id: ObjectId,
    width: u32,
    height: u32,
}

/// Decode the logo into a DeviceRGB image XObject. Any failure means the
/// header is drawn without it.
fn load_logo(doc: &mut Document, path: &Path) -> Option<Logo> {
    match image::open(path) {
        Ok(img) => {
            let rgb = img.to_rgb8();
            let (width, height) = rgb.dimensions();
            let stream = Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width as i64,
                    "Height" => height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8,
                },
                rgb.into_raw(),
            );
            Some(Logo {
                id: doc.add_object(stream),
                width,
                height,
            })
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Skipping unreadable logo image");
            None
        }
    }
}

fn page_content(page: &PageSheet, logo: Option<&Logo>) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            Op::Rect {
                x,
                y,
                w,
                h,
                fill,
                border,
            } => rect_ops(&mut operations, *x, *y, *w, *h, *fill, *border),
            Op::Text {
                x,
                y,
                w,
                h,
                font,
                align,
                text,
            } => text_ops(&mut operations, *x, *y, *w, *h, *font, *align, text),
            Op::Image { x, y, w } => {
                if let Some(logo) = logo {
                    image_ops(&mut operations, *x, *y, *w, logo);
                }
            }
        }
    }
    Content { operations }
}

fn rect_ops(
    operations: &mut Vec<Operation>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    fill: Option<(u8, u8, u8)>,
    border: bool,
) {
    let rect = vec![
        Object::Real(x * PT_PER_MM),
        Object::Real((PAGE_HEIGHT - y - h) * PT_PER_MM),
        Object::Real(w * PT_PER_MM),
        Object::Real(h * PT_PER_MM),
    ];
    let painter = match (fill.is_some(), border) {
        (true, true) => "B",
        (true, false) => "f",
        _ => "S",
    };

    operations.push(Operation::new("q", vec![]));
    if let Some((r, g, b)) = fill {
        operations.push(Operation::new(
            "rg",
            vec![
                Object::Real(r as f32 / 255.0),
                Object::Real(g as f32 / 255.0),
                Object::Real(b as f32 / 255.0),
            ],
        ));
    }
    operations.push(Operation::new("re", rect));
    operations.push(Operation::new(painter, vec![]));
    operations.push(Operation::new("Q", vec![]));
}

#[allow(clippy::too_many_arguments)]
fn text_ops(
    operations: &mut Vec<Operation>,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    font: Font,
    align: Align,
    text: &str,
) {
    let text_x = match align {
        Align::Left => x + CELL_PADDING,
        Align::Center => {
            let free = w - text_width_mm(text, font);
            x + (free / 2.0).max(CELL_PADDING)
        }
    };
    // Baseline sits at mid-cell plus a descender allowance.
    let size_mm = font.size / PT_PER_MM;
    let baseline_y = y + 0.5 * h + 0.3 * size_mm;

    operations.push(Operation::new("BT", vec![]));
    operations.push(Operation::new(
        "Tf",
        vec![font_name(font.style).into(), Object::Real(font.size)],
    ));
    operations.push(Operation::new(
        "Td",
        vec![
            Object::Real(text_x * PT_PER_MM),
            Object::Real((PAGE_HEIGHT - baseline_y) * PT_PER_MM),
        ],
    ));
    operations.push(Operation::new(
        "Tj",
        vec![Object::String(
            encode_win_ansi(text),
            StringFormat::Literal,
        )],
    ));
    operations.push(Operation::new("ET", vec![]));
}

fn image_ops(operations: &mut Vec<Operation>, x: f32, y: f32, w: f32, logo: &Logo) {
    // Height follows the image aspect ratio for the requested width.
    let h = w * logo.height as f32 / logo.width.max(1) as f32;
    operations.push(Operation::new("q", vec![]));
    operations.push(Operation::new(
        "cm",
        vec![
            Object::Real(w * PT_PER_MM),
            0.into(),
            0.into(),
            Object::Real(h * PT_PER_MM),
            Object::Real(x * PT_PER_MM),
            Object::Real((PAGE_HEIGHT - y - h) * PT_PER_MM),
        ],
    ));
    operations.push(Operation::new("Do", vec![LOGO_NAME.into()]));
    operations.push(Operation::new("Q", vec![]));
}

fn font_name(style: FontStyle) -> &'static str {
    match style {
        FontStyle::Regular => FONT_REGULAR,
        FontStyle::Bold => FONT_BOLD,
        FontStyle::Italic => FONT_ITALIC,
    }
}

/// Encode text into the WinAnsi single-byte encoding. Latin-1 code points
/// map directly; the CP1252 extras the report can meet (dashes, curly
/// quotes) map into 0x80..0x9F; anything else becomes '?'.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0020}'..='\u{007E}' | '\u{00A0}'..='\u{00FF}' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{2122}' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// Advance width of one character in thousandths of the font size. Width
/// classes approximating the Helvetica AFM tables; used only to resolve
/// centered alignment.
fn char_width(c: char, bold: bool) -> u32 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '!' | '|' | '\'' => {
            if bold {
                278
            } else {
                222
            }
        }
        ' ' | 'f' | 't' | 'r' | 'I' | '-' | '(' | ')' | '[' | ']' | '/' | '\\' => {
            if bold {
                333
            } else {
                278
            }
        }
        'm' | 'M' | 'W' | 'w' => {
            if bold {
                889
            } else {
                833
            }
        }
        'A'..='Z' | 'À'..='Þ' => {
            if bold {
                722
            } else {
                667
            }
        }
        _ => 556,
    }
}

fn text_width_mm(text: &str, font: Font) -> f32 {
    let bold = font.style == FontStyle::Bold;
    let units: u32 = text.chars().map(|c| char_width(c, bold)).sum();
    units as f32 * font.size / 1000.0 / PT_PER_MM
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::sheet::SheetBuilder;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_encode_win_ansi_latin1_passthrough() {
        assert_eq!(encode_win_ansi("Das 07h30 às 17h00"), b"Das 07h30 \xe0s 17h00");
        assert_eq!(encode_win_ansi("Página"), b"P\xe1gina");
        assert_eq!(encode_win_ansi("PREVENÇÃO"), b"PREVEN\xc7\xc3O");
    }

    #[test]
    fn test_encode_win_ansi_cp1252_extras() {
        assert_eq!(encode_win_ansi("–"), vec![0x96]);
        assert_eq!(encode_win_ansi("€"), vec![0x80]);
    }

    #[test]
    fn test_encode_win_ansi_unmappable_becomes_question_mark() {
        assert_eq!(encode_win_ansi("✓"), b"?");
    }

    #[test]
    fn test_render_produces_parseable_pdf() {
        let mut sheet = SheetBuilder::new(vec!["CABEÇALHO".to_string()], false);
        sheet.add_page();
        sheet.cell(0.0, 6.0, "corpo do relatório", true, true, Align::Left, true);
        let pages = sheet.finish(|p, t| format!("Página {}/{}", p, t));

        let bytes = render(&pages, None).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(contains(&bytes, b"%%EOF"));
        // Content streams are uncompressed, so the page text is visible.
        assert!(contains(&bytes, b"corpo do relat\xf3rio"));
        assert!(contains(&bytes, b"P\xe1gina 1/1"));
        assert!(contains(&bytes, b"Helvetica-Bold"));
    }

    #[test]
    fn test_render_page_count() {
        let mut sheet = SheetBuilder::new(vec![], false);
        sheet.add_page();
        sheet.add_page();
        sheet.add_page();
        let pages = sheet.finish(|p, t| format!("{}/{}", p, t));

        let bytes = render(&pages, None).unwrap();
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_render_missing_logo_is_skipped() {
        let mut sheet = SheetBuilder::new(vec!["TÍTULO".to_string()], true);
        sheet.add_page();
        let pages = sheet.finish(|p, t| format!("{}/{}", p, t));

        let bytes = render(&pages, Some(Path::new("/nonexistent/brasao.png"))).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.4"));
        assert!(!contains(&bytes, b"/XObject"));
    }

    #[test]
    fn test_centered_text_stays_inside_cell() {
        let font = Font {
            style: FontStyle::Bold,
            size: 8.0,
        };
        // Narrow cell, long text: alignment clamps to the left padding
        // instead of escaping the cell to the left.
        let mut operations = Vec::new();
        text_ops(&mut operations, 10.0, 10.0, 10.0, 6.0, font, Align::Center, "MATRÍCULA");
        let td = operations
            .iter()
            .find(|op| op.operator == "Td")
            .unwrap();
        match td.operands[0] {
            Object::Real(x) => assert!(x >= (10.0 + CELL_PADDING) * PT_PER_MM),
            _ => panic!("expected a real operand"),
        }
    }
}
