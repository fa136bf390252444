//! Page cursor – tracks the current page index and vertical write position.
//!
//! Every "is there room / start a new page" decision in the engine goes
//! through this one guarded primitive instead of ad hoc threshold checks at
//! each call site.

use crate::theme::PageGeometry;

#[derive(Debug, Clone)]
pub struct PageCursor {
    geom: PageGeometry,
    page: usize,
    offset: f32,
}

impl PageCursor {
    pub fn new(geom: PageGeometry) -> Self {
        let offset = geom.content_top();
        Self {
            geom,
            page: 0,
            offset,
        }
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    /// Current vertical write position (distance from page top).
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Vertical room left on the current page.
    pub fn remaining(&self) -> f32 {
        self.geom.content_bottom() - self.offset
    }

    /// Usable height of a full, empty page.
    pub fn usable_height(&self) -> f32 {
        self.geom.usable_height()
    }

    /// True when nothing has been placed on the current page yet.
    pub fn at_top(&self) -> bool {
        self.offset <= self.geom.content_top()
    }

    pub fn advance(&mut self, amount: f32) {
        self.offset += amount;
    }

    /// Move to the top of a fresh page. Calling this while already at the
    /// top of an empty page is a no-op, so repeated break requests can never
    /// produce blank pages. Returns whether a break actually happened.
    pub fn force_page_break(&mut self) -> bool {
        if self.at_top() {
            return false;
        }
        self.page += 1;
        self.offset = self.geom.content_top();
        true
    }
}
