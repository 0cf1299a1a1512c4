//! Proposal renderer: maps a finished quote draft plus branding assets to a
//! paginated PDF byte stream.
//!
//! The document structure is fixed: intro cover pages, a client header page,
//! one section per service block, commercial terms, the final totals band,
//! footer observations, closing cover pages. Interior pages repeat the
//! company header, the page-number footer and the watermark; cover pages are
//! full-bleed and bypass all three.
//!
//! Missing assets (logo, covers, photos, watermark source) are never fatal:
//! the element is skipped and rendering continues.

pub mod branding;
pub mod layout;
pub mod render;
pub mod text;

pub use branding::{Branding, Watermark};
pub use render::{RenderError, proposal_file_name, render_proposal};
