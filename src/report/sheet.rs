//! Millimetre-based page assembly.
//!
//! The report layout is expressed as a flat list of positioned operations
//! per page, built with a cursor-and-cell API. Nothing here knows about
//! PDF syntax: the builder produces `PageSheet`s, an intermediate
//! representation the serializer (and the tests) consume. Footers carry the
//! total page count, which only exists after pagination completes, so they
//! are stamped in `finish` rather than while pages are being written.

/// A4 portrait, in millimetres.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

/// Left, right and top margin.
pub const MARGIN: f32 = 10.0;

/// Automatic page breaks trigger this far from the bottom edge.
pub const BREAK_MARGIN: f32 = 20.0;

/// The footer band sits this far above the bottom edge.
const FOOTER_RISE: f32 = 15.0;

/// Inner horizontal padding of a cell.
pub const CELL_PADDING: f32 = 1.0;

/// Logo position and width in the page header.
const LOGO_X: f32 = 10.0;
const LOGO_Y: f32 = 8.0;
const LOGO_WIDTH: f32 = 20.0;

/// Vertical space the page header occupies (three 5 mm lines plus a 10 mm
/// gap below them).
const HEADER_LINE_HEIGHT: f32 = 5.0;
const HEADER_GAP: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
}

/// Font selection for a text operation; `size` is in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub style: FontStyle,
    pub size: f32,
}

/// One positioned drawing operation. Coordinates are millimetres from the
/// top-left page corner; `Text` coordinates describe the cell box the text
/// sits in, with alignment resolved later against real font metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        fill: Option<(u8, u8, u8)>,
        border: bool,
    },
    Text {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        font: Font,
        align: Align,
        text: String,
    },
    Image {
        x: f32,
        y: f32,
        w: f32,
    },
}

/// A fully assembled page.
#[derive(Debug, Clone, Default)]
pub struct PageSheet {
    pub ops: Vec<Op>,
}

impl PageSheet {
    /// All text contents on the page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| *t == needle)
    }
}

/// Cursor-and-cell page writer.
///
/// Models the classic report-writer contract: cells are drawn left to
/// right, `next_line` drops the cursor below the row, and a cell that
/// would cross the break margin opens a fresh page (with the repeated
/// header) first. A row of equal-height cells therefore never splits
/// across pages.
pub struct SheetBuilder {
    pages: Vec<PageSheet>,
    x: f32,
    y: f32,
    font: Font,
    fill_color: (u8, u8, u8),
    header_lines: Vec<String>,
    with_logo: bool,
}

impl SheetBuilder {
    pub fn new(header_lines: Vec<String>, with_logo: bool) -> Self {
        Self {
            pages: Vec::new(),
            x: MARGIN,
            y: MARGIN,
            font: Font {
                style: FontStyle::Regular,
                size: 12.0,
            },
            fill_color: (255, 255, 255),
            header_lines,
            with_logo,
        }
    }

    pub fn set_font(&mut self, style: FontStyle, size: f32) {
        self.font = Font { style, size };
    }

    pub fn set_fill_color(&mut self, r: u8, g: u8, b: u8) {
        self.fill_color = (r, g, b);
    }

    /// Open a new page and draw the repeated header on it. The caller's
    /// font survives the header.
    pub fn add_page(&mut self) {
        self.pages.push(PageSheet::default());
        self.x = MARGIN;
        self.y = MARGIN;

        let body_font = self.font;
        if self.with_logo {
            self.push(Op::Image {
                x: LOGO_X,
                y: LOGO_Y,
                w: LOGO_WIDTH,
            });
        }
        self.set_font(FontStyle::Bold, 12.0);
        let lines = self.header_lines.clone();
        for line in lines {
            self.cell(0.0, HEADER_LINE_HEIGHT, &line, false, true, Align::Center, false);
        }
        self.ln(HEADER_GAP);
        self.font = body_font;
    }

    /// Draw one cell at the cursor. A width of zero extends the cell to the
    /// right margin. `next_line` moves the cursor to the start of the next
    /// row instead of past the cell's right edge.
    pub fn cell(
        &mut self,
        w: f32,
        h: f32,
        text: &str,
        border: bool,
        next_line: bool,
        align: Align,
        fill: bool,
    ) {
        if self.y + h > PAGE_HEIGHT - BREAK_MARGIN && !self.pages.is_empty() {
            let keep_x = self.x;
            self.add_page();
            self.x = keep_x;
        }

        let w = if w == 0.0 {
            PAGE_WIDTH - MARGIN - self.x
        } else {
            w
        };
        let (x, y) = (self.x, self.y);

        if border || fill {
            self.push(Op::Rect {
                x,
                y,
                w,
                h,
                fill: fill.then_some(self.fill_color),
                border,
            });
        }
        if !text.is_empty() {
            let font = self.font;
            self.push(Op::Text {
                x,
                y,
                w,
                h,
                font,
                align,
                text: text.to_string(),
            });
        }

        if next_line {
            self.x = MARGIN;
            self.y += h;
        } else {
            self.x += w;
        }
    }

    /// Drop the cursor by `h` and return to the left margin.
    pub fn ln(&mut self, h: f32) {
        self.x = MARGIN;
        self.y += h;
    }

    /// Close the document: stamp the footer (page number, total) on every
    /// page and hand the sheets over.
    pub fn finish<F>(mut self, footer: F) -> Vec<PageSheet>
    where
        F: Fn(usize, usize) -> String,
    {
        let total = self.pages.len();
        for (index, page) in self.pages.iter_mut().enumerate() {
            page.ops.push(Op::Text {
                x: MARGIN,
                y: PAGE_HEIGHT - FOOTER_RISE,
                w: PAGE_WIDTH - 2.0 * MARGIN,
                h: 10.0,
                font: Font {
                    style: FontStyle::Italic,
                    size: 8.0,
                },
                align: Align::Center,
                text: footer(index + 1, total),
            });
        }
        self.pages
    }

    fn push(&mut self, op: Op) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
