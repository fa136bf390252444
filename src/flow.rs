//! Section flow controller – walks sections in domain order and decides
//! where page breaks fall.
//!
//! Handles:
//! - minimum-space hints ("new section starts fresh if cramped")
//! - forced fresh-page sections (attendee roster)
//! - row-level table splits with the header row re-emitted per fragment
//! - oversized single blocks placed once with overflow instead of looping

use crate::blocks::{Block, Section, Table};
use crate::cursor::PageCursor;
use crate::error::RenderWarning;
use crate::fonts::FontBook;
use crate::measure;
use crate::page::PageState;
use crate::paint::{self, PaintCtx};
use crate::theme::{PageGeometry, Theme};

/// Result of the content-flow pass: one `PageState` per produced page plus
/// any non-fatal warnings collected along the way.
pub struct FlowOutcome {
    pub pages: Vec<PageState>,
    pub warnings: Vec<RenderWarning>,
}

/// Flow `sections` into pages. Never fails: unmeasurable blocks are skipped
/// with a placeholder height and reported as warnings.
pub fn flow_sections(
    sections: &[Section],
    geom: PageGeometry,
    fonts: &FontBook,
    theme: &Theme,
) -> FlowOutcome {
    let mut flow = Flow {
        cursor: PageCursor::new(geom),
        pages: vec![PageState::new(0)],
        warnings: Vec::new(),
        ctx: PaintCtx { fonts, theme },
        fonts,
        theme,
        x: geom.margin_left,
        width: geom.content_width(),
    };

    for section in sections {
        flow.place_section(section);
    }

    FlowOutcome {
        pages: flow.pages,
        warnings: flow.warnings,
    }
}

struct Flow<'a> {
    cursor: PageCursor,
    pages: Vec<PageState>,
    warnings: Vec<RenderWarning>,
    ctx: PaintCtx<'a>,
    fonts: &'a FontBook,
    theme: &'a Theme,
    x: f32,
    width: f32,
}

impl<'a> Flow<'a> {
    fn page(&mut self) -> &mut PageState {
        self.pages.last_mut().expect("page list is never empty")
    }

    fn break_page(&mut self) {
        if self.cursor.force_page_break() {
            let index = self.cursor.current_page();
            self.pages.push(PageState::new(index));
        }
    }

    fn place_section(&mut self, section: &Section) {
        if section.blocks.is_empty() {
            return;
        }

        if section.fresh_page {
            self.break_page();
        } else if section.min_space > 0.0 && self.cursor.remaining() < section.min_space {
            self.break_page();
        }

        if let Some(title) = &section.title {
            let title_h = paint::section_title_height(&self.ctx);
            let follow = measure::min_block_height(self.fonts, self.theme);
            // Keep the heading with at least one line of its content.
            if self.cursor.remaining() < title_h + follow {
                self.break_page();
            }
            let (ops, h) = paint::paint_section_title(title, self.x, self.cursor.offset(), &self.ctx);
            self.page().ops.extend(ops);
            self.cursor.advance(h);
        }

        let section_name = section.title.clone().unwrap_or_default();
        for block in &section.blocks {
            match block {
                Block::Table(table) => self.place_table(table, &section_name),
                other => self.place_block(other, &section_name),
            }
        }

        self.cursor.advance(self.theme.section_gap);
    }

    fn place_block(&mut self, block: &Block, section: &str) {
        let estimate = match measure::estimate_height(block, self.width, self.fonts, self.theme) {
            Ok(h) => h,
            Err(e) => {
                log::warn!("skipping unmeasurable block in '{section}': {e}");
                self.warnings.push(RenderWarning::Measurement {
                    section: section.to_string(),
                    detail: e.to_string(),
                });
                self.cursor
                    .advance(measure::min_block_height(self.fonts, self.theme) + self.theme.block_gap);
                return;
            }
        };

        if estimate > self.cursor.remaining() {
            self.break_page();
            if estimate > self.cursor.usable_height() {
                log::info!(
                    "block in '{section}' is taller than a full page ({estimate:.0} pt); \
                     placing with overflow"
                );
            }
        }

        let (ops, h) = paint::paint_block(block, self.x, self.cursor.offset(), self.width, &self.ctx);
        self.page().ops.extend(ops);
        self.cursor.advance(h + self.theme.block_gap);
    }

    /// Place a table, splitting it at row level. Each fragment re-emits the
    /// header row; row order is preserved and every row lands exactly once.
    fn place_table(&mut self, table: &Table, section: &str) {
        if let Err(e) = measure::validate_table(table) {
            log::warn!("skipping unmeasurable table in '{section}': {e}");
            self.warnings.push(RenderWarning::Measurement {
                section: section.to_string(),
                detail: e.to_string(),
            });
            self.cursor
                .advance(measure::min_block_height(self.fonts, self.theme) + self.theme.block_gap);
            return;
        }
        if table.rows.is_empty() {
            self.cursor
                .advance(measure::min_block_height(self.fonts, self.theme) + self.theme.block_gap);
            return;
        }

        let header_h = self.theme.table_header_height;
        let mut start = 0;
        while start < table.rows.len() {
            let first_h = measure::row_height(
                table,
                &table.rows[start],
                self.width,
                self.fonts,
                self.theme,
            );
            if header_h + first_h > self.cursor.remaining() && !self.cursor.at_top() {
                self.break_page();
            }

            // Fit as many rows as the page allows; a single row taller than
            // a fresh page is placed anyway with overflow.
            let mut used = header_h;
            let mut end = start;
            while end < table.rows.len() {
                let row_h = measure::row_height(
                    table,
                    &table.rows[end],
                    self.width,
                    self.fonts,
                    self.theme,
                );
                if used + row_h > self.cursor.remaining() {
                    if end == start {
                        log::info!(
                            "table row in '{section}' exceeds a full page; placing with overflow"
                        );
                        end += 1;
                    }
                    break;
                }
                used += row_h;
                end += 1;
            }

            let (ops, h) = paint::paint_table_fragment(
                table,
                start..end,
                self.x,
                self.cursor.offset(),
                self.width,
                &self.ctx,
            );
            self.page().ops.extend(ops);
            self.cursor.advance(h);

            start = end;
            if start < table.rows.len() {
                self.break_page();
            }
        }

        self.cursor.advance(self.theme.block_gap);
    }
}
