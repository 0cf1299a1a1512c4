//! Fixed A4 page geometry and the top-down layout cursor.
//!
//! Everything is tracked in millimetres from the top of the page, the way
//! the original cell-by-cell layout worked; conversion to the PDF's
//! bottom-left origin happens at the single point where text and shapes are
//! emitted.

/// A4 portrait.
pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;

pub const MARGIN_LEFT: f32 = 10.0;
pub const MARGIN_RIGHT: f32 = 10.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
pub const CONTENT_RIGHT: f32 = PAGE_WIDTH - MARGIN_RIGHT;

/// Where body content starts on an interior page, below the repeated header.
pub const CONTENT_TOP: f32 = 32.0;

/// Hard bottom limit for body content; the footer lives below this.
pub const CONTENT_BOTTOM: f32 = 277.0;

/// A block header or top-level section never starts past this line; the
/// renderer breaks the page first. Bodies may still run down to
/// [`CONTENT_BOTTOM`].
pub const SECTION_BREAK_THRESHOLD: f32 = 250.0;

/// Gap between photos laid out side by side.
pub const PHOTO_GUTTER: f32 = 5.0;

/// Character budget for a material name cell in the materials table.
pub const MATERIAL_NAME_BUDGET: usize = 45;

/// Top-down cursor over one page, in millimetres.
#[derive(Debug, Clone, Copy)]
pub struct Cursor {
    y: f32,
}

impl Cursor {
    pub fn at_content_top() -> Self {
        Self { y: CONTENT_TOP }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn advance(
        &mut self,
        dy: f32,
    ) {
        self.y += dy;
    }

    pub fn jump_to(
        &mut self,
        y: f32,
    ) {
        self.y = y;
    }

    /// Millimetres left before the body bottom.
    pub fn room_left(&self) -> f32 {
        (CONTENT_BOTTOM - self.y).max(0.0)
    }

    /// True once the cursor has passed the near-bottom threshold where a
    /// new block header or section may no longer start.
    pub fn past_section_threshold(&self) -> bool {
        self.y > SECTION_BREAK_THRESHOLD
    }

    /// Converts a top-down position to the PDF's bottom-left origin, for the
    /// baseline of text drawn `line_height` below the cursor.
    pub fn baseline_from_bottom(
        &self,
        line_height: f32,
    ) -> f32 {
        PAGE_HEIGHT - self.y - line_height
    }
}
