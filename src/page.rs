//! Page state – the frozen draw-instruction stream for each page.
//!
//! This is the intermediate representation between the flow pass and PDF
//! emission: pass 1 accumulates ops per page, pass 2 appends header/footer
//! ops at absolute coordinates, and the renderer consumes the result.
//! Coordinates are points with the origin at the page's top-left.

use serde::{Deserialize, Serialize};

/// One drawing instruction. `[f32; 4]` colours are RGBA in 0.0–1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: [f32; 4],
    },
    RectOutline {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: [f32; 4],
        stroke_width: f32,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: [f32; 4],
        stroke_width: f32,
    },
    /// A single pre-wrapped line of text. `y` is the top of the line box;
    /// the renderer derives the baseline from the font size.
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: [f32; 4],
    },
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        source: ImageSource,
    },
}

/// Where an image's bytes come from at emission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageSource {
    /// Inline `data:<mime>;base64,...` payload (attendee signatures).
    DataUri(String),
    /// The shared organization logo asset.
    Logo,
}

/// Ephemeral state of one page: its index and accumulated draw ops.
/// Created on each page break, frozen when the next break occurs, consumed
/// by the stamping pass and the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageState {
    pub index: usize,
    pub ops: Vec<DrawOp>,
}

impl PageState {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            ops: Vec::new(),
        }
    }
}

/// A complete flowed document ready for emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    pub pages: Vec<PageState>,
}

impl Document {
    /// Serialise to JSON (debugging and structural tests).
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_json_roundtrip() {
        let doc = Document {
            title: "Acta N° 12".into(),
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            pages: vec![PageState {
                index: 0,
                ops: vec![
                    DrawOp::Text {
                        x: 40.0,
                        y: 108.0,
                        text: "OBJETIVO: Capacitación".into(),
                        size: 9.0,
                        bold: false,
                        color: [0.1, 0.1, 0.1, 1.0],
                    },
                    DrawOp::Image {
                        x: 40.0,
                        y: 50.0,
                        width: 60.0,
                        height: 24.0,
                        source: ImageSource::Logo,
                    },
                ],
            }],
        };
        let parsed = Document::from_json(&doc.to_json()).unwrap();
        assert_eq!(parsed.pages.len(), 1);
        assert_eq!(parsed.pages[0].ops.len(), 2);
    }
}
