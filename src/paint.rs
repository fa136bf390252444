//! Block renderers – turn measured blocks into draw ops at a given origin.
//!
//! Each painter mirrors its estimator in [`crate::measure`]: the height a
//! painter consumes is exactly the height the estimator predicted, which is
//! what lets the flow controller commit to placements speculatively.

use crate::blocks::{
    Banner, Block, CellAlign, HighlightBox, KeyValueLine, Paragraph, StatCardRow, Table,
};
use crate::fonts::{Face, FontBook};
use crate::measure;
use crate::page::{DrawOp, ImageSource};
use crate::theme::{Color, Theme};

pub struct PaintCtx<'a> {
    pub fonts: &'a FontBook,
    pub theme: &'a Theme,
}

impl<'a> PaintCtx<'a> {
    fn line(&self, size: f32) -> f32 {
        self.fonts.line_height(size, self.theme.line_height)
    }
}

/// Height consumed by a painted section title line.
pub fn section_title_height(ctx: &PaintCtx) -> f32 {
    ctx.line(ctx.theme.section_size) + 4.0
}

/// Coloured heading line announcing a section.
pub fn paint_section_title(title: &str, x: f32, y: f32, ctx: &PaintCtx) -> (Vec<DrawOp>, f32) {
    let ops = vec![DrawOp::Text {
        x,
        y,
        text: title.to_string(),
        size: ctx.theme.section_size,
        bold: true,
        color: ctx.theme.primary.to_array(),
    }];
    (ops, section_title_height(ctx))
}

/// Paint any non-table block at `(x, y)` into `width` points.
/// Tables go through [`paint_table_fragment`] so the flow controller can
/// split them at row level.
pub fn paint_block(block: &Block, x: f32, y: f32, width: f32, ctx: &PaintCtx) -> (Vec<DrawOp>, f32) {
    match block {
        Block::Banner(b) => paint_banner(b, x, y, width, ctx),
        Block::KeyValue(kv) => paint_key_value(kv, x, y, width, ctx),
        Block::Paragraph(p) => paint_paragraph(p, x, y, width, ctx),
        Block::StatCards(row) => paint_stat_cards(row, x, y, width, ctx),
        Block::Highlight(hb) => paint_highlight(hb, x, y, width, ctx),
        Block::Table(t) => paint_table_fragment(t, 0..t.rows.len(), x, y, width, ctx),
    }
}

fn paint_banner(b: &Banner, x: f32, y: f32, width: f32, ctx: &PaintCtx) -> (Vec<DrawOp>, f32) {
    let h = ctx.theme.banner_height;
    let size = ctx.theme.section_size;
    let text_w = ctx.fonts.text_width(&b.text, size, Face::Bold);
    let ops = vec![
        DrawOp::Rect {
            x,
            y,
            width,
            height: h,
            fill: b.fill.to_array(),
        },
        DrawOp::Text {
            x: x + (width - text_w) / 2.0,
            y: y + (h - ctx.line(size)) / 2.0,
            text: b.text.clone(),
            size,
            bold: true,
            color: b.text_color.to_array(),
        },
    ];
    (ops, h)
}

fn paint_key_value(
    kv: &KeyValueLine,
    x: f32,
    y: f32,
    width: f32,
    ctx: &PaintCtx,
) -> (Vec<DrawOp>, f32) {
    let size = ctx.theme.body_size;
    let line = ctx.line(size);
    let lines = ctx.fonts.wrap(&kv.joined(), size, Face::Regular, width);
    let mut ops = Vec::new();

    for (i, text) in lines.iter().enumerate() {
        let ly = y + i as f32 * line;
        if i == 0 {
            // First line: bold label, regular remainder.
            let label = format!("{}: ", kv.label);
            let rest = text.strip_prefix(label.trim_end()).unwrap_or(text).trim_start();
            ops.push(DrawOp::Text {
                x,
                y: ly,
                text: label.trim_end().to_string(),
                size,
                bold: true,
                color: ctx.theme.text.to_array(),
            });
            if !rest.is_empty() {
                let label_w = ctx.fonts.text_width(&label, size, Face::Bold);
                ops.push(DrawOp::Text {
                    x: x + label_w,
                    y: ly,
                    text: rest.to_string(),
                    size,
                    bold: false,
                    color: ctx.theme.text.to_array(),
                });
            }
        } else {
            ops.push(DrawOp::Text {
                x,
                y: ly,
                text: text.clone(),
                size,
                bold: false,
                color: ctx.theme.text.to_array(),
            });
        }
    }
    (ops, lines.len() as f32 * line)
}

fn paint_paragraph(p: &Paragraph, x: f32, y: f32, width: f32, ctx: &PaintCtx) -> (Vec<DrawOp>, f32) {
    let size = ctx.theme.body_size;
    let line = ctx.line(size);
    let pad = if p.panel.is_some() {
        ctx.theme.cell_padding
    } else {
        0.0
    };
    let inner = width - 2.0 * pad;
    let lines = ctx.fonts.wrap(&p.text, size, Face::Regular, inner);
    let height = lines.len() as f32 * line + 2.0 * pad;

    let mut ops = Vec::new();
    if let Some(panel) = p.panel {
        ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill: panel.to_array(),
        });
    }
    let color = p.color.unwrap_or(ctx.theme.text);
    for (i, text) in lines.iter().enumerate() {
        if text.is_empty() {
            continue;
        }
        ops.push(DrawOp::Text {
            x: x + pad,
            y: y + pad + i as f32 * line,
            text: text.clone(),
            size,
            bold: false,
            color: color.to_array(),
        });
    }
    (ops, height)
}

/// Paint the header row plus body rows `range` of a table. Alternating-row
/// shading restarts at the first row of every fragment, so parity is
/// per-page rather than per-table.
pub fn paint_table_fragment(
    table: &Table,
    range: std::ops::Range<usize>,
    x: f32,
    y: f32,
    width: f32,
    ctx: &PaintCtx,
) -> (Vec<DrawOp>, f32) {
    let theme = ctx.theme;
    let size = theme.body_size;
    let line = ctx.line(size);
    let pad = theme.cell_padding;
    let mut ops = Vec::new();

    // Header row.
    let header_h = theme.table_header_height;
    ops.push(DrawOp::Rect {
        x,
        y,
        width,
        height: header_h,
        fill: theme.primary.to_array(),
    });
    let mut cx = x;
    for col in &table.columns {
        let col_w = width * col.width;
        let text_w = ctx.fonts.text_width(&col.heading, size, Face::Bold);
        let tx = match col.align {
            CellAlign::Left => cx + pad,
            CellAlign::Center => cx + (col_w - text_w) / 2.0,
        };
        ops.push(DrawOp::Text {
            x: tx,
            y: y + (header_h - line) / 2.0,
            text: col.heading.clone(),
            size,
            bold: true,
            color: Color::WHITE.to_array(),
        });
        cx += col_w;
    }

    // Body rows.
    let mut ry = y + header_h;
    for (local, idx) in range.enumerate() {
        let row = &table.rows[idx];
        let row_h = measure::row_height(table, row, width, ctx.fonts, ctx.theme);
        let zebra_fill = if table.zebra && local % 2 == 1 {
            Some(theme.section_bg)
        } else {
            None
        };

        let mut cx = x;
        for (cell, col) in row.cells.iter().zip(&table.columns) {
            let col_w = width * col.width;
            if let Some(fill) = cell.fill.or(zebra_fill) {
                ops.push(DrawOp::Rect {
                    x: cx,
                    y: ry,
                    width: col_w,
                    height: row_h,
                    fill: fill.to_array(),
                });
            }
            ops.push(DrawOp::RectOutline {
                x: cx,
                y: ry,
                width: col_w,
                height: row_h,
                color: theme.border.to_array(),
                stroke_width: 0.5,
            });

            if let Some(uri) = &cell.image {
                ops.push(DrawOp::Image {
                    x: cx + pad,
                    y: ry + 2.0,
                    width: col_w - 2.0 * pad,
                    height: row_h - 4.0,
                    source: ImageSource::DataUri(uri.clone()),
                });
            } else if !cell.text.is_empty() {
                let inner = col_w - 2.0 * pad;
                let mut lines = ctx.fonts.wrap(&cell.text, size, Face::Regular, inner);
                // Clip to the row height when an override is tighter than
                // the wrapped content.
                let max_lines = (((row_h - 2.0 * pad) / line).floor() as usize).max(1);
                lines.truncate(max_lines);
                let face = if cell.bold { Face::Bold } else { Face::Regular };
                let color = cell.color.unwrap_or(theme.text);
                for (i, text) in lines.iter().enumerate() {
                    let text_w = ctx.fonts.text_width(text, size, face);
                    let tx = match col.align {
                        CellAlign::Left => cx + pad,
                        CellAlign::Center => cx + (inner + 2.0 * pad - text_w) / 2.0,
                    };
                    ops.push(DrawOp::Text {
                        x: tx,
                        y: ry + pad + i as f32 * line,
                        text: text.clone(),
                        size,
                        bold: cell.bold,
                        color: color.to_array(),
                    });
                }
            }
            cx += col_w;
        }
        ry += row_h;
    }

    (ops, ry - y)
}

fn paint_stat_cards(
    row: &StatCardRow,
    x: f32,
    y: f32,
    width: f32,
    ctx: &PaintCtx,
) -> (Vec<DrawOp>, f32) {
    let theme = ctx.theme;
    let h = theme.stat_card_height;
    let gap = 6.0;
    let n = row.cards.len() as f32;
    let card_w = (width - gap * (n - 1.0)) / n;
    let mut ops = Vec::new();

    let mut cx = x;
    for card in &row.cards {
        ops.push(DrawOp::Rect {
            x: cx,
            y,
            width: card_w,
            height: h,
            fill: card.tint.to_array(),
        });
        ops.push(DrawOp::RectOutline {
            x: cx,
            y,
            width: card_w,
            height: h,
            color: theme.border.to_array(),
            stroke_width: 0.5,
        });

        let value_w = ctx
            .fonts
            .text_width(&card.value, theme.stat_value_size, Face::Bold);
        ops.push(DrawOp::Text {
            x: cx + (card_w - value_w) / 2.0,
            y: y + 7.0,
            text: card.value.clone(),
            size: theme.stat_value_size,
            bold: true,
            color: card.value_color.to_array(),
        });

        let caption_w = ctx
            .fonts
            .text_width(&card.caption, theme.small_size, Face::Regular);
        ops.push(DrawOp::Text {
            x: cx + (card_w - caption_w) / 2.0,
            y: y + h - ctx.line(theme.small_size) - 5.0,
            text: card.caption.clone(),
            size: theme.small_size,
            bold: false,
            color: card.value_color.to_array(),
        });

        cx += card_w + gap;
    }
    (ops, h)
}

fn paint_highlight(
    hb: &HighlightBox,
    x: f32,
    y: f32,
    width: f32,
    ctx: &PaintCtx,
) -> (Vec<DrawOp>, f32) {
    let theme = ctx.theme;
    let height = measure::highlight_height(hb, width, ctx.fonts, ctx.theme);
    let size = theme.body_size;
    let line = ctx.line(size);
    let pad = theme.cell_padding;
    let inner = width - 2.0 * pad;

    let mut ops = vec![
        DrawOp::RectOutline {
            x,
            y,
            width,
            height,
            color: hb.accent.to_array(),
            stroke_width: 0.8,
        },
        // Accent bar along the left edge.
        DrawOp::Rect {
            x,
            y,
            width: 3.0,
            height,
            fill: hb.accent.to_array(),
        },
    ];

    let mut ty = y + 8.0;
    ops.push(DrawOp::Text {
        x: x + pad + 4.0,
        y: ty,
        text: hb.title.clone(),
        size,
        bold: true,
        color: hb.accent.to_array(),
    });
    ty += line + 5.0;

    for text in ctx.fonts.wrap(&hb.body, size, Face::Regular, inner) {
        if !text.is_empty() {
            ops.push(DrawOp::Text {
                x: x + pad + 4.0,
                y: ty,
                text,
                size,
                bold: false,
                color: theme.text.to_array(),
            });
        }
        ty += line;
    }

    if let Some(meta) = &hb.meta {
        ops.push(DrawOp::Text {
            x: x + pad + 4.0,
            y: ty + 4.0,
            text: meta.clone(),
            size: theme.small_size,
            bold: false,
            color: theme.text_muted.to_array(),
        });
    }

    (ops, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{Cell, Column, Row, StatCard};
    use crate::measure::estimate_height;
    use crate::theme::Theme;

    fn ctx_fixtures() -> (FontBook, Theme) {
        (FontBook::new(), Theme::default())
    }

    fn sample_blocks(theme: &Theme) -> Vec<Block> {
        vec![
            Block::Banner(Banner {
                text: "ACTA DE REUNIÓN N° 12".into(),
                fill: theme.primary,
                text_color: Color::WHITE,
            }),
            Block::KeyValue(KeyValueLine::new("OBJETIVO", "Capacitación en higiene de manos")),
            Block::Paragraph(Paragraph::plain(
                "Durante la sesión se revisaron los cinco momentos de la higiene de manos \
                 y se realizó demostración práctica con cada participante.",
            )),
            Block::StatCards(StatCardRow {
                cards: vec![
                    StatCard {
                        value: "58%".into(),
                        caption: "Pre-Test".into(),
                        tint: theme.info_bg,
                        value_color: theme.info_fg,
                    },
                    StatCard {
                        value: "86%".into(),
                        caption: "Post-Test".into(),
                        tint: theme.band_good_bg,
                        value_color: theme.band_good_fg,
                    },
                ],
            }),
            Block::Highlight(HighlightBox {
                title: "Compromiso 1".into(),
                body: "Socializar el protocolo actualizado con el personal de urgencias".into(),
                meta: Some("Encargado: Coordinación de Enfermería — Fecha: 2026-09-01".into()),
                accent: theme.primary,
            }),
        ]
    }

    #[test]
    fn painted_height_matches_estimate() {
        let (fonts, theme) = ctx_fixtures();
        let ctx = PaintCtx {
            fonts: &fonts,
            theme: &theme,
        };
        for block in sample_blocks(&theme) {
            let est = estimate_height(&block, 400.0, &fonts, &theme).unwrap();
            let (_, painted) = paint_block(&block, 40.0, 108.0, 400.0, &ctx);
            assert!(
                (est - painted).abs() < 0.01,
                "estimate {est} != painted {painted} for {block:?}"
            );
        }
    }

    #[test]
    fn table_fragments_compose_to_full_height() {
        let (fonts, theme) = ctx_fixtures();
        let ctx = PaintCtx {
            fonts: &fonts,
            theme: &theme,
        };
        let table = Table {
            columns: vec![
                Column {
                    heading: "Nombre".into(),
                    width: 0.6,
                    align: CellAlign::Left,
                },
                Column {
                    heading: "Cargo".into(),
                    width: 0.4,
                    align: CellAlign::Left,
                },
            ],
            rows: (0..10)
                .map(|i| Row::new(vec![Cell::text(format!("Persona {i}")), Cell::text("Auxiliar")]))
                .collect(),
            zebra: true,
        };

        let (_, whole) = paint_table_fragment(&table, 0..10, 40.0, 108.0, 400.0, &ctx);
        let (_, first) = paint_table_fragment(&table, 0..6, 40.0, 108.0, 400.0, &ctx);
        let (_, second) = paint_table_fragment(&table, 6..10, 40.0, 108.0, 400.0, &ctx);
        // Each fragment re-emits the header, so the split costs one extra header.
        assert!((first + second - whole - theme.table_header_height).abs() < 0.01);
    }

    #[test]
    fn zebra_parity_restarts_each_fragment() {
        let (fonts, theme) = ctx_fixtures();
        let ctx = PaintCtx {
            fonts: &fonts,
            theme: &theme,
        };
        let table = Table {
            columns: vec![Column {
                heading: "X".into(),
                width: 1.0,
                align: CellAlign::Left,
            }],
            rows: (0..4).map(|i| Row::new(vec![Cell::text(format!("{i}"))])).collect(),
            zebra: true,
        };

        let shade = theme.section_bg.to_array();
        let count_shaded = |ops: &[DrawOp]| {
            ops.iter()
                .filter(|op| matches!(op, DrawOp::Rect { fill, .. } if *fill == shade))
                .count()
        };

        // Rows 1..4 as their own fragment: local row 0 (global row 1) is
        // unshaded again because parity is fragment-local.
        let (ops_full, _) = paint_table_fragment(&table, 0..4, 0.0, 0.0, 100.0, &ctx);
        let (ops_frag, _) = paint_table_fragment(&table, 1..4, 0.0, 0.0, 100.0, &ctx);
        assert_eq!(count_shaded(&ops_full), 2);
        assert_eq!(count_shaded(&ops_frag), 1);
    }

    #[test]
    fn signature_cell_emits_image_op() {
        let (fonts, theme) = ctx_fixtures();
        let ctx = PaintCtx {
            fonts: &fonts,
            theme: &theme,
        };
        let mut row = Row::new(vec![Cell::text("")]);
        row.cells[0].image = Some("data:image/png;base64,AAAA".into());
        row.height_override = Some(40.0);
        let table = Table {
            columns: vec![Column {
                heading: "Firma".into(),
                width: 1.0,
                align: CellAlign::Left,
            }],
            rows: vec![row],
            zebra: false,
        };
        let (ops, h) = paint_table_fragment(&table, 0..1, 0.0, 0.0, 200.0, &ctx);
        assert_eq!(h, theme.table_header_height + 40.0);
        assert!(ops
            .iter()
            .any(|op| matches!(op, DrawOp::Image { source: ImageSource::DataUri(_), .. })));
    }
}
