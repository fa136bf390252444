//! Content blocks – the smallest independently measurable and paintable
//! units of a report, grouped into ordered sections.
//!
//! Blocks carry only the data needed to measure and paint themselves; none
//! of them reference page or document state.

use crate::theme::Color;

/// A named, ordered group of blocks covering one topical area.
#[derive(Debug, Clone)]
pub struct Section {
    /// Painted as a coloured heading line above the first block.
    pub title: Option<String>,
    pub blocks: Vec<Block>,
    /// Break to a fresh page when less than this much room remains.
    pub min_space: f32,
    /// Always start on a fresh page (attendee roster behaviour).
    pub fresh_page: bool,
}

impl Section {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            blocks: Vec::new(),
            min_space: 60.0,
            fresh_page: false,
        }
    }

    pub fn untitled() -> Self {
        Self {
            title: None,
            blocks: Vec::new(),
            min_space: 0.0,
            fresh_page: false,
        }
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }
}

/// Tagged variant over every block kind the engine can lay out.
#[derive(Debug, Clone)]
pub enum Block {
    Banner(Banner),
    KeyValue(KeyValueLine),
    Paragraph(Paragraph),
    Table(Table),
    StatCards(StatCardRow),
    Highlight(HighlightBox),
}

/// Full-width filled bar with centered title text.
#[derive(Debug, Clone)]
pub struct Banner {
    pub text: String,
    pub fill: Color,
    pub text_color: Color,
}

/// Bold label plus regular value on one (possibly wrapped) line.
#[derive(Debug, Clone)]
pub struct KeyValueLine {
    pub label: String,
    pub value: String,
}

impl KeyValueLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }

    /// The text as it flows on the page: "LABEL: value".
    pub fn joined(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Wrapped narrative text.
#[derive(Debug, Clone)]
pub struct Paragraph {
    pub text: String,
    pub color: Option<Color>,
    /// Tinted backdrop behind the text (AI narrative panel).
    pub panel: Option<Color>,
}

impl Paragraph {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            color: None,
            panel: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellAlign {
    Left,
    Center,
}

/// One table cell. Colour overrides implement score-band shading; an image
/// (signature) replaces the text when present and decodable.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    pub text: String,
    pub fill: Option<Color>,
    pub color: Option<Color>,
    pub bold: bool,
    pub image: Option<String>,
}

impl Cell {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Forces the row height instead of deriving it from wrapped content
    /// (fixed-height signature rows).
    pub height_override: Option<f32>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            height_override: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Column {
    pub heading: String,
    /// Fraction of the available width, expected to sum to ~1.0.
    pub width: f32,
    pub align: CellAlign,
}

/// Ordered rows of fixed-width cells under a re-emittable header row.
#[derive(Debug, Clone)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
    /// Shade every other body row.
    pub zebra: bool,
}

/// A single statistic card: big value over a small caption.
#[derive(Debug, Clone)]
pub struct StatCard {
    pub value: String,
    pub caption: String,
    pub tint: Color,
    pub value_color: Color,
}

/// Equal-width cards laid out side by side on one row.
#[derive(Debug, Clone)]
pub struct StatCardRow {
    pub cards: Vec<StatCard>,
}

/// Dynamically sized outlined box: title, wrapped body, optional meta line.
/// Height grows with the wrapped body, never below the theme minimum.
#[derive(Debug, Clone)]
pub struct HighlightBox {
    pub title: String,
    pub body: String,
    pub meta: Option<String>,
    pub accent: Color,
}
