//! Error taxonomy for the render pipeline.
//!
//! Only [`RenderError::Fatal`] aborts a render. Everything else is recovered
//! locally and, where useful to the caller, reported as a [`RenderWarning`]
//! in the result metadata.

use thiserror::Error;

/// Failures that abort the whole render. A failed render returns no bytes;
/// partial output is never exposed.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying document primitive produced an unusable page stream.
    #[error("fatal render failure: {0}")]
    Fatal(String),
}

/// A block whose content cannot be measured. Recovered by skipping the block
/// and reserving a single-line placeholder height.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeasureError {
    #[error("table has no columns")]
    EmptyTable,
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("column {column} has non-positive width fraction")]
    BadColumnWidth { column: usize },
    #[error("stat card row is empty")]
    EmptyStatRow,
}

/// Non-fatal conditions surfaced to the caller alongside the rendered bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    /// A block was skipped because it could not be measured.
    Measurement { section: String, detail: String },
    /// A static asset could not be loaded; a placeholder was drawn instead.
    AssetLoad { asset: String, detail: String },
}

impl std::fmt::Display for RenderWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderWarning::Measurement { section, detail } => {
                write!(f, "unmeasurable block in '{section}': {detail}")
            }
            RenderWarning::AssetLoad { asset, detail } => {
                write!(f, "asset '{asset}' unavailable: {detail}")
            }
        }
    }
}
