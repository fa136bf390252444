//! Font metrics and text measurement using `ttf-parser`.
//!
//! Reports are set in the built-in Helvetica faces, so no font file is
//! required: width estimation falls back to average-advance heuristics that
//! track Helvetica closely enough for line wrapping. A real TTF/OTF can be
//! registered per face to measure with true glyph advances instead.

use std::collections::HashMap;

/// The two faces a report uses.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Parsed metrics for one registered face.
#[derive(Clone)]
struct FaceMetrics {
    /// Raw font bytes (kept alive for ttf-parser's zero-copy API).
    bytes: Vec<u8>,
    units_per_em: f32,
}

/// Measures text for the layout engine. Pure: identical inputs always yield
/// identical widths, so height estimation can run speculatively.
#[derive(Default)]
pub struct FontBook {
    faces: HashMap<Face, FaceMetrics>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a TTF/OTF for a face. Measurement uses its glyph advances
    /// from then on.
    pub fn register(
        &mut self,
        face: Face,
        bytes: Vec<u8>,
    ) -> Result<(), ttf_parser::FaceParsingError> {
        let parsed = ttf_parser::Face::parse(&bytes, 0)?;
        let metrics = FaceMetrics {
            units_per_em: parsed.units_per_em() as f32,
            bytes,
        };
        self.faces.insert(face, metrics);
        Ok(())
    }

    /// Width of `text` at `size` points.
    ///
    /// With no registered font, uses the average-advance heuristic
    /// (≈ 0.5 × size per char for Helvetica, ~10 % wider in bold).
    pub fn text_width(&self, text: &str, size: f32, face: Face) -> f32 {
        let Some(metrics) = self.faces.get(&face) else {
            let avg = match face {
                Face::Regular => 0.5,
                Face::Bold => 0.55,
            };
            return text.chars().count() as f32 * size * avg;
        };

        if let Ok(parsed) = ttf_parser::Face::parse(&metrics.bytes, 0) {
            let scale = size / metrics.units_per_em;
            let mut width = 0.0f32;
            for ch in text.chars() {
                if let Some(gid) = parsed.glyph_index(ch) {
                    width += parsed.glyph_hor_advance(gid).unwrap_or(0) as f32 * scale;
                } else {
                    width += size * 0.5;
                }
            }
            width
        } else {
            text.chars().count() as f32 * size * 0.5
        }
    }

    /// Line height at `size` points for the given leading factor.
    pub fn line_height(&self, size: f32, factor: f32) -> f32 {
        size * factor
    }

    /// Word-wrap `text` to fit within `max_width` points. Existing newlines
    /// are hard breaks; a word longer than the line gets a line of its own.
    pub fn wrap(&self, text: &str, size: f32, face: Face, max_width: f32) -> Vec<String> {
        if max_width <= 0.0 || text.is_empty() {
            return vec![text.to_string()];
        }

        let mut lines: Vec<String> = Vec::new();
        for paragraph in text.split('\n') {
            let words: Vec<&str> = paragraph.split_whitespace().collect();
            if words.is_empty() {
                lines.push(String::new());
                continue;
            }

            let mut current = String::new();
            for word in &words {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if self.text_width(&candidate, size, face) > max_width && !current.is_empty() {
                    lines.push(current);
                    current = word.to_string();
                } else {
                    current = candidate;
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }

        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}
