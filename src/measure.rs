//! Measurement utility – estimates a block's rendered height without
//! drawing it.
//!
//! Every function here is a pure function of block content and available
//! width, so the flow controller can call it speculatively before committing
//! to a placement. Empty content still reserves a single-line height so
//! blank blocks keep their visual spacing.

use crate::blocks::{Block, HighlightBox, Paragraph, Row, Table};
use crate::error::MeasureError;
use crate::fonts::{Face, FontBook};
use crate::theme::Theme;

/// Smallest height any block reserves, even when empty or unmeasurable.
pub fn min_block_height(fonts: &FontBook, theme: &Theme) -> f32 {
    fonts.line_height(theme.body_size, theme.line_height)
}

/// Estimated height of `block` when painted into `width` points.
pub fn estimate_height(
    block: &Block,
    width: f32,
    fonts: &FontBook,
    theme: &Theme,
) -> Result<f32, MeasureError> {
    let h = match block {
        Block::Banner(_) => theme.banner_height,
        Block::KeyValue(kv) => {
            let lines = fonts.wrap(&kv.joined(), theme.body_size, Face::Regular, width);
            lines.len() as f32 * fonts.line_height(theme.body_size, theme.line_height)
        }
        Block::Paragraph(p) => paragraph_height(p, width, fonts, theme),
        Block::Table(t) => {
            validate_table(t)?;
            let mut h = theme.table_header_height;
            for row in &t.rows {
                h += row_height(t, row, width, fonts, theme);
            }
            h
        }
        Block::StatCards(row) => {
            if row.cards.is_empty() {
                return Err(MeasureError::EmptyStatRow);
            }
            theme.stat_card_height
        }
        Block::Highlight(hb) => highlight_height(hb, width, fonts, theme),
    };
    Ok(h.max(min_block_height(fonts, theme)))
}

pub fn paragraph_height(p: &Paragraph, width: f32, fonts: &FontBook, theme: &Theme) -> f32 {
    let pad = if p.panel.is_some() {
        2.0 * theme.cell_padding
    } else {
        0.0
    };
    let inner = width - pad;
    let lines = fonts.wrap(&p.text, theme.body_size, Face::Regular, inner);
    lines.len() as f32 * fonts.line_height(theme.body_size, theme.line_height) + pad
}

/// Commitment cards grow with their wrapped description:
/// `max(minimum, title + body + meta + chrome)`.
pub fn highlight_height(hb: &HighlightBox, width: f32, fonts: &FontBook, theme: &Theme) -> f32 {
    let inner = width - 2.0 * theme.cell_padding;
    let line = fonts.line_height(theme.body_size, theme.line_height);
    let body_lines = fonts.wrap(&hb.body, theme.body_size, Face::Regular, inner);
    let mut h = line; // title line
    h += body_lines.len() as f32 * line;
    if hb.meta.is_some() {
        h += fonts.line_height(theme.small_size, theme.line_height);
    }
    (h + theme.highlight_chrome).max(theme.highlight_min_height)
}

/// Height of one body row: the override when supplied, otherwise the tallest
/// wrapped cell plus padding, never below the theme's fixed row height.
pub fn row_height(table: &Table, row: &Row, width: f32, fonts: &FontBook, theme: &Theme) -> f32 {
    if let Some(h) = row.height_override {
        return h;
    }
    let line = fonts.line_height(theme.body_size, theme.line_height);
    let mut tallest = 0.0f32;
    for (cell, col) in row.cells.iter().zip(&table.columns) {
        let inner = width * col.width - 2.0 * theme.cell_padding;
        let lines = fonts.wrap(&cell.text, theme.body_size, Face::Regular, inner);
        tallest = tallest.max(lines.len() as f32 * line);
    }
    (tallest + 2.0 * theme.cell_padding).max(theme.table_row_height)
}

pub fn validate_table(table: &Table) -> Result<(), MeasureError> {
    if table.columns.is_empty() {
        return Err(MeasureError::EmptyTable);
    }
    for (i, col) in table.columns.iter().enumerate() {
        if col.width <= 0.0 {
            return Err(MeasureError::BadColumnWidth { column: i });
        }
    }
    for (i, row) in table.rows.iter().enumerate() {
        if row.cells.len() != table.columns.len() {
            return Err(MeasureError::RaggedRow {
                row: i,
                got: row.cells.len(),
                expected: table.columns.len(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Cell, CellAlign, Column};

    fn fixtures() -> (FontBook, Theme) {
        (FontBook::new(), Theme::default())
    }

    fn two_col_table(rows: usize) -> Table {
        Table {
            columns: vec![
                Column {
                    heading: "A".into(),
                    width: 0.7,
                    align: CellAlign::Left,
                },
                Column {
                    heading: "B".into(),
                    width: 0.3,
                    align: CellAlign::Center,
                },
            ],
            rows: (0..rows)
                .map(|i| Row::new(vec![Cell::text(format!("row {i}")), Cell::text("ok")]))
                .collect(),
            zebra: true,
        }
    }

    #[test]
    fn estimate_is_idempotent() {
        let (fonts, theme) = fixtures();
        let block = Block::Paragraph(Paragraph::plain(
            "Se socializó el protocolo de higiene de manos con el personal asistencial.",
        ));
        let a = estimate_height(&block, 300.0, &fonts, &theme).unwrap();
        let b = estimate_height(&block, 300.0, &fonts, &theme).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_paragraph_reserves_one_line() {
        let (fonts, theme) = fixtures();
        let block = Block::Paragraph(Paragraph::plain(""));
        let h = estimate_height(&block, 300.0, &fonts, &theme).unwrap();
        assert_eq!(h, min_block_height(&fonts, &theme));
    }

    #[test]
    fn narrower_width_never_shrinks_a_paragraph() {
        let (fonts, theme) = fixtures();
        let p = Paragraph::plain("texto largo que envuelve en varias líneas según el ancho");
        let wide = paragraph_height(&p, 500.0, &fonts, &theme);
        let narrow = paragraph_height(&p, 120.0, &fonts, &theme);
        assert!(narrow > wide);
    }

    #[test]
    fn table_height_sums_rows() {
        let (fonts, theme) = fixtures();
        let t = two_col_table(4);
        let rh = row_height(&t, &t.rows[0], 400.0, &fonts, &theme);
        assert!(rh >= theme.table_row_height);
        let h = estimate_height(&Block::Table(t), 400.0, &fonts, &theme).unwrap();
        assert!((h - (theme.table_header_height + 4.0 * rh)).abs() < 0.01);
    }

    #[test]
    fn row_override_wins() {
        let (fonts, theme) = fixtures();
        let mut t = two_col_table(1);
        t.rows[0].height_override = Some(40.0);
        assert_eq!(row_height(&t, &t.rows[0], 400.0, &fonts, &theme), 40.0);
    }

    #[test]
    fn long_cell_text_grows_its_row() {
        let (fonts, theme) = fixtures();
        let mut t = two_col_table(1);
        t.rows[0].cells[0].text =
            "compromiso con una descripción bastante extensa que no cabe en una sola línea \
             de la columna y debe envolver"
                .into();
        let h = row_height(&t, &t.rows[0], 300.0, &fonts, &theme);
        assert!(h > theme.table_row_height);
    }

    #[test]
    fn ragged_row_is_a_measure_error() {
        let (fonts, theme) = fixtures();
        let mut t = two_col_table(2);
        t.rows[1].cells.pop();
        let err = estimate_height(&Block::Table(t), 400.0, &fonts, &theme).unwrap_err();
        assert!(matches!(err, MeasureError::RaggedRow { row: 1, .. }));
    }

    #[test]
    fn highlight_respects_minimum() {
        let (fonts, theme) = fixtures();
        let hb = HighlightBox {
            title: "Compromiso 1".into(),
            body: "corto".into(),
            meta: None,
            accent: theme.primary,
        };
        let h = highlight_height(&hb, 400.0, &fonts, &theme);
        assert!(h >= theme.highlight_min_height);
    }

    #[test]
    fn highlight_grows_with_description() {
        let (fonts, theme) = fixtures();
        let short = HighlightBox {
            title: "Compromiso".into(),
            body: "corto".into(),
            meta: Some("Encargado: N/A".into()),
            accent: theme.primary,
        };
        let long = HighlightBox {
            body: "realizar seguimiento mensual a los indicadores de adherencia del servicio \
                   farmacéutico y presentar los resultados consolidados ante el comité de \
                   calidad con evidencias de las acciones correctivas adelantadas"
                .into(),
            ..short.clone()
        };
        let hs = highlight_height(&short, 350.0, &fonts, &theme);
        let hl = highlight_height(&long, 350.0, &fonts, &theme);
        assert!(hl > hs);
    }
}
