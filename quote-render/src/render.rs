//! The page-description procedure.
//!
//! One pass over the draft, top to bottom, tracking a manual cursor the way
//! the original cell layout did. Cover pages are full bleed; every interior
//! page is decorated with the repeated header, footer and watermark at the
//! moment it is created.

use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use printpdf::image_crate::GenericImageView;
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerIndex, PdfLayerReference, PdfPageIndex, Point, Rect, Rgb,
};
use quote_core::format::{format_brl, format_quantity};
use quote_core::{QuoteDraft, QuoteTotals, ServiceBlock};
use thiserror::Error;
use tracing::{debug, warn};

use crate::branding::Branding;
use crate::layout::{
    CONTENT_BOTTOM, CONTENT_RIGHT, CONTENT_WIDTH, Cursor, MARGIN_LEFT, MATERIAL_NAME_BUDGET,
    PAGE_HEIGHT, PAGE_WIDTH, PHOTO_GUTTER,
};
use crate::text::{sanitize, text_width_mm, truncate_cell, wrap};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("pdf generation failed: {0}")]
    Pdf(String),
}

const PT_TO_MM: f32 = 0.352_778;

/// Line heights in millimetres, matching the original cell heights.
const LINE: f32 = 6.0;
const LINE_SMALL: f32 = 5.0;
const LINE_HEADER: f32 = 8.0;

/// Table column widths: name, quantity, unit price, line total.
const COL_NAME: f32 = 100.0;
const COL_QTY: f32 = 20.0;
const COL_UNIT: f32 = 35.0;
const COL_TOTAL: f32 = 35.0;
const ROW_HEIGHT: f32 = 7.0;

const INK: Color = Color::Rgb(Rgb {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    icc_profile: None,
});
const ACCENT: Color = Color::Rgb(Rgb {
    r: 0.12,
    g: 0.29,
    b: 0.49,
    icc_profile: None,
});
const ALERT: Color = Color::Rgb(Rgb {
    r: 0.75,
    g: 0.10,
    b: 0.10,
    icc_profile: None,
});
const TABLE_HEADER_BG: Color = Color::Rgb(Rgb {
    r: 0.88,
    g: 0.88,
    b: 0.88,
    icc_profile: None,
});
const WHITE: Color = Color::Rgb(Rgb {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    icc_profile: None,
});

/// Deterministic download name for a rendered proposal.
///
/// Mirrors `Orcamento_<cliente>.pdf`, with the client name reduced to a
/// filesystem-safe slug.
pub fn proposal_file_name(client_name: &str) -> String {
    let mut slug = String::new();
    for c in client_name.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' {
            slug.push(c);
        } else if (c == ' ' || c == '_') && !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    if slug.is_empty() {
        "Orcamento.pdf".to_string()
    } else {
        format!("Orcamento_{slug}.pdf")
    }
}

/// Renders the complete proposal and returns the PDF bytes.
///
/// Pure with respect to the draft: totals are recomputed here from the
/// blocks and adjustment, so the document can never disagree with the
/// session state it was generated from.
pub fn render_proposal(
    draft: &QuoteDraft,
    branding: &Branding,
    issue_date: NaiveDate,
) -> Result<Vec<u8>, RenderError> {
    let totals = draft.totals();

    let (doc, first_page, first_layer) =
        PdfDocument::new("Orçamento Comercial", Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Página");

    let fonts = Fonts {
        regular: add_font(&doc, BuiltinFont::Helvetica)?,
        bold: add_font(&doc, BuiltinFont::HelveticaBold)?,
        italic: add_font(&doc, BuiltinFont::HelveticaOblique)?,
    };

    // Decoration images are loaded once and reused on every interior page.
    let watermark = branding
        .watermark_path()
        .as_deref()
        .and_then(Renderer::load_image);
    let logo = branding
        .logo_path
        .as_deref()
        .and_then(Renderer::load_image);

    let mut renderer = Renderer {
        doc: &doc,
        branding,
        fonts,
        watermark,
        logo,
        first_page: Some((first_page, first_layer)),
        layer: None,
        cursor: Cursor::at_content_top(),
        page_number: 0,
    };

    renderer.covers(&branding.intro_covers);
    renderer.client_header_page(draft, issue_date);
    for (index, block) in draft.blocks.iter().enumerate() {
        renderer.service_block(index + 1, block);
    }
    renderer.commercial_terms(&draft.commercial_terms_text);
    renderer.final_totals(&totals);
    renderer.footer_notes(&draft.footer_notes);
    renderer.signature();
    renderer.covers(&branding.closing_covers);

    doc.save_to_bytes().map_err(|e| RenderError::Pdf(e.to_string()))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
}

fn add_font(
    doc: &PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, RenderError> {
    doc.add_builtin_font(font)
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

struct Renderer<'a> {
    doc: &'a PdfDocumentReference,
    branding: &'a Branding,
    fonts: Fonts,
    watermark: Option<printpdf::image_crate::DynamicImage>,
    logo: Option<printpdf::image_crate::DynamicImage>,

    /// The page created together with the document, consumed by whichever
    /// page request comes first.
    first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    layer: Option<PdfLayerReference>,
    cursor: Cursor,
    page_number: usize,
}

impl Renderer<'_> {
    // ─── page management ─────────────────────────────────────────────────

    fn blank_page(&mut self) -> PdfLayerReference {
        let (page, layer) = match self.first_page.take() {
            Some(indices) => indices,
            None => self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Página"),
        };
        self.doc.get_page(page).get_layer(layer)
    }

    /// Starts a fresh interior page: watermark first (so it sits behind the
    /// content), then the repeated header and footer.
    fn interior_page(&mut self) {
        let layer = self.blank_page();
        self.layer = Some(layer);
        self.page_number += 1;
        self.cursor = Cursor::at_content_top();

        self.draw_watermark();
        self.draw_page_header();
        self.draw_page_footer();
    }

    fn layer(&self) -> &PdfLayerReference {
        self.layer
            .as_ref()
            .expect("interior_page() must run before drawing")
    }

    /// Page break before a new block or top-level section once the cursor
    /// is past the near-bottom threshold.
    fn ensure_section_start(&mut self) {
        if self.layer.is_none() || self.cursor.past_section_threshold() {
            self.interior_page();
        }
    }

    /// Page break when fewer than `needed` millimetres remain for body
    /// content.
    fn ensure_room(
        &mut self,
        needed: f32,
    ) {
        if self.layer.is_none() || self.cursor.room_left() < needed {
            self.interior_page();
        }
    }

    // ─── low-level drawing ───────────────────────────────────────────────

    fn text_at(
        &self,
        content: &str,
        font: &IndirectFontRef,
        size_pt: f32,
        x: f32,
        y_top: f32,
    ) {
        let baseline = PAGE_HEIGHT - y_top - size_pt * PT_TO_MM;
        self.layer()
            .use_text(sanitize(content), size_pt, Mm(x), Mm(baseline), font);
    }

    fn text_right(
        &self,
        content: &str,
        font: &IndirectFontRef,
        size_pt: f32,
        right_edge: f32,
        y_top: f32,
    ) {
        let x = right_edge - text_width_mm(content, size_pt);
        self.text_at(content, font, size_pt, x, y_top);
    }

    fn text_centered(
        &self,
        content: &str,
        font: &IndirectFontRef,
        size_pt: f32,
        y_top: f32,
    ) {
        let x = (PAGE_WIDTH - text_width_mm(content, size_pt)) / 2.0;
        self.text_at(content, font, size_pt, x, y_top);
    }

    fn fill_rect(
        &self,
        x: f32,
        y_top: f32,
        width: f32,
        height: f32,
        color: Color,
    ) {
        self.layer().set_fill_color(color);
        let rect = Rect::new(
            Mm(x),
            Mm(PAGE_HEIGHT - y_top - height),
            Mm(x + width),
            Mm(PAGE_HEIGHT - y_top),
        )
        .with_mode(PaintMode::Fill);
        self.layer().add_rect(rect);
        self.layer().set_fill_color(INK);
    }

    fn rule(
        &self,
        x1: f32,
        x2: f32,
        y_top: f32,
    ) {
        let y = PAGE_HEIGHT - y_top;
        let line = Line {
            points: vec![
                (Point::new(Mm(x1), Mm(y)), false),
                (Point::new(Mm(x2), Mm(y)), false),
            ],
            is_closed: false,
        };
        self.layer().set_outline_color(INK);
        self.layer().set_outline_thickness(0.4);
        self.layer().add_line(line);
    }

    /// Writes wrapped text starting at the cursor, breaking pages as needed.
    /// Returns nothing; the cursor ends just below the last line.
    fn paragraph(
        &mut self,
        content: &str,
        font_kind: FontKind,
        size_pt: f32,
        line_height: f32,
    ) {
        let lines = wrap(&sanitize(content), size_pt, CONTENT_WIDTH);
        for line in lines {
            self.ensure_room(line_height);
            let font = self.font(font_kind);
            self.text_at(&line, &font, size_pt, MARGIN_LEFT, self.cursor.y());
            self.cursor.advance(line_height);
        }
    }

    fn font(
        &self,
        kind: FontKind,
    ) -> IndirectFontRef {
        match kind {
            FontKind::Regular => self.fonts.regular.clone(),
            FontKind::Bold => self.fonts.bold.clone(),
            FontKind::Italic => self.fonts.italic.clone(),
        }
    }

    // ─── images ──────────────────────────────────────────────────────────

    fn load_image(path: &Path) -> Option<printpdf::image_crate::DynamicImage> {
        match printpdf::image_crate::open(path) {
            Ok(img) => Some(img),
            Err(error) => {
                warn!(path = %path.display(), %error, "image unavailable, skipping");
                None
            }
        }
    }

    /// Places an image with its top-left corner at (`x`, `y_top`), scaled to
    /// exactly `width` × `height` millimetres.
    fn place_image(
        &self,
        img: &printpdf::image_crate::DynamicImage,
        x: f32,
        y_top: f32,
        width: f32,
        height: f32,
    ) {
        const DPI: f32 = 300.0;
        let (px_w, px_h) = img.dimensions();
        if px_w == 0 || px_h == 0 {
            return;
        }
        let natural_w = px_w as f32 * 25.4 / DPI;
        let natural_h = px_h as f32 * 25.4 / DPI;

        let image = printpdf::Image::from_dynamic_image(img);
        image.add_to_layer(
            self.layer().clone(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(PAGE_HEIGHT - y_top - height)),
                scale_x: Some(width / natural_w),
                scale_y: Some(height / natural_h),
                dpi: Some(DPI),
                ..Default::default()
            },
        );
    }

    // ─── page decorations ────────────────────────────────────────────────

    fn draw_watermark(&self) {
        let Some(img) = &self.watermark else { return };

        let (px_w, px_h) = img.dimensions();
        if px_w == 0 {
            return;
        }
        let width = 150.0;
        let height = width * px_h as f32 / px_w as f32;
        let x = (PAGE_WIDTH - width) / 2.0;
        let y_top = (PAGE_HEIGHT - height) / 2.0;
        self.place_image(img, x, y_top, width, height);
    }

    fn draw_page_header(&self) {
        if let Some(img) = &self.logo {
            let (px_w, px_h) = img.dimensions();
            if px_w > 0 && px_h > 0 {
                // Nominal 32 mm wide, shrunk when the logo is tall.
                let scale = (32.0 / px_w as f32).min(16.0 / px_h as f32);
                let width = px_w as f32 * scale;
                let height = px_h as f32 * scale;
                self.place_image(img, MARGIN_LEFT, 8.0, width, height);
            }
        }

        self.text_centered(&self.branding.company_name, &self.fonts.bold, 10.0, 10.0);
        let id_line = format!(
            "{} | {}",
            self.branding.company_tax_id, self.branding.company_city_line
        );
        self.text_centered(&id_line, &self.fonts.regular, 8.0, 16.0);
        self.rule(MARGIN_LEFT, CONTENT_RIGHT, 27.0);
    }

    fn draw_page_footer(&self) {
        self.rule(MARGIN_LEFT, CONTENT_RIGHT, 283.0);
        self.text_at(
            &self.branding.company_name,
            &self.fonts.regular,
            7.0,
            MARGIN_LEFT,
            285.0,
        );
        let page = format!("Página {}", self.page_number);
        self.text_right(&page, &self.fonts.regular, 7.0, CONTENT_RIGHT, 285.0);
    }

    // ─── document sections ───────────────────────────────────────────────

    /// Full-bleed pages, no header, no footer, no watermark. Missing files
    /// are skipped without complaint.
    fn covers(
        &mut self,
        paths: &[PathBuf],
    ) {
        for path in paths {
            let Some(img) = Self::load_image(path) else { continue };
            let layer = self.blank_page();
            self.layer = Some(layer);
            self.place_image(&img, 0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT);
            // A cover consumes the current layer; body content must open a
            // fresh interior page afterwards.
            self.layer = None;
        }
        self.layer = None;
    }

    fn client_header_page(
        &mut self,
        draft: &QuoteDraft,
        issue_date: NaiveDate,
    ) {
        self.interior_page();

        self.cursor.advance(4.0);
        self.text_centered(
            &self.branding.document_title,
            &self.fonts.bold,
            16.0,
            self.cursor.y(),
        );
        self.cursor.advance(LINE_HEADER + 4.0);

        let font = self.fonts.bold.clone();
        self.text_at("DADOS DO CLIENTE", &font, 12.0, MARGIN_LEFT, self.cursor.y());
        self.cursor.advance(LINE_HEADER);

        let validity = issue_date + Days::new(15);
        let rows = [
            format!("Cliente: {}", draft.client_name),
            format!("CNPJ/CPF: {}", draft.client_tax_id),
            format!("Data de emissão: {}", issue_date.format("%d/%m/%Y")),
            format!("Válido até: {}", validity.format("%d/%m/%Y")),
        ];
        for row in rows {
            let font = self.fonts.regular.clone();
            self.text_at(&row, &font, 11.0, MARGIN_LEFT, self.cursor.y());
            self.cursor.advance(LINE);
        }
        self.cursor.advance(LINE);
    }

    fn service_block(
        &mut self,
        number: usize,
        block: &ServiceBlock,
    ) {
        self.ensure_section_start();

        // Title bar, numbered sequentially from 1.
        let title = format!("{number}. {}", block.title.to_uppercase());
        self.fill_rect(MARGIN_LEFT, self.cursor.y(), CONTENT_WIDTH, 9.0, ACCENT);
        self.layer().set_fill_color(WHITE);
        let font = self.fonts.bold.clone();
        self.text_at(&title, &font, 12.0, MARGIN_LEFT + 2.0, self.cursor.y() + 1.5);
        self.layer().set_fill_color(INK);
        self.cursor.advance(12.0);

        if let Some(damage) = block
            .damage_description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
        {
            self.layer().set_fill_color(ALERT);
            let font = self.fonts.bold.clone();
            self.text_at(
                "DIAGNÓSTICO DO PROBLEMA:",
                &font,
                10.0,
                MARGIN_LEFT,
                self.cursor.y(),
            );
            self.cursor.advance(LINE);
            self.paragraph(damage, FontKind::Regular, 10.0, LINE_SMALL);
            self.layer().set_fill_color(INK);
            self.cursor.advance(2.0);
        }

        self.photos(&block.photos);

        if !block.technical_description.trim().is_empty() {
            self.paragraph(&block.technical_description, FontKind::Regular, 10.0, LINE_SMALL);
            self.cursor.advance(2.0);
        }

        if !block.materials.is_empty() {
            self.materials_table(block);
        }

        self.block_totals(block);
        self.cursor.advance(4.0);
    }

    /// Photos laid out left to right: a solitary photo may take the full
    /// content width, multiple photos take half each, two per row. Heights
    /// always preserve the source aspect ratio.
    fn photos(
        &mut self,
        photos: &[PathBuf],
    ) {
        let images: Vec<_> = photos
            .iter()
            .filter_map(|p| Self::load_image(p))
            .filter(|img| img.dimensions().0 > 0)
            .collect();
        if images.is_empty() {
            return;
        }

        let column_width = if images.len() == 1 {
            CONTENT_WIDTH
        } else {
            (CONTENT_WIDTH - PHOTO_GUTTER) / 2.0
        };

        for row in images.chunks(2) {
            let sized: Vec<_> = row
                .iter()
                .map(|img| {
                    let (px_w, px_h) = img.dimensions();
                    let mut w = column_width;
                    let mut h = w * px_h as f32 / px_w as f32;
                    // Keep a tall photo from swallowing the page.
                    if h > 160.0 {
                        let shrink = 160.0 / h;
                        h *= shrink;
                        w *= shrink;
                    }
                    (img, w, h)
                })
                .collect();

            let row_height = sized.iter().fold(0.0_f32, |acc, (_, _, h)| acc.max(*h));
            self.ensure_room(row_height + 2.0);

            let y = self.cursor.y();
            let mut x = MARGIN_LEFT;
            for (img, w, h) in sized {
                self.place_image(img, x, y, w, h);
                x += column_width + PHOTO_GUTTER;
            }
            self.cursor.advance(row_height + 4.0);
        }
    }

    fn materials_table(
        &mut self,
        block: &ServiceBlock,
    ) {
        self.ensure_room(ROW_HEIGHT * 2.0);
        self.table_header();

        for line in &block.materials {
            if self.cursor.room_left() < ROW_HEIGHT {
                self.interior_page();
                self.table_header();
            }
            let y = self.cursor.y();
            let name = truncate_cell(&line.material_name, MATERIAL_NAME_BUDGET);
            let font = self.fonts.regular.clone();
            self.text_at(&name, &font, 9.0, MARGIN_LEFT + 1.5, y + 1.5);
            self.text_centered_in(
                &format_quantity(line.quantity),
                &font,
                9.0,
                MARGIN_LEFT + COL_NAME,
                COL_QTY,
                y + 1.5,
            );
            self.text_right(
                &format!("R$ {}", format_brl(line.unit_price)),
                &font,
                9.0,
                MARGIN_LEFT + COL_NAME + COL_QTY + COL_UNIT - 1.5,
                y + 1.5,
            );
            self.text_right(
                &format!("R$ {}", format_brl(line.line_total)),
                &font,
                9.0,
                MARGIN_LEFT + COL_NAME + COL_QTY + COL_UNIT + COL_TOTAL - 1.5,
                y + 1.5,
            );
            self.rule(MARGIN_LEFT, CONTENT_RIGHT, y + ROW_HEIGHT);
            self.cursor.advance(ROW_HEIGHT);
        }
        self.cursor.advance(2.0);
    }

    fn table_header(&mut self) {
        let y = self.cursor.y();
        self.fill_rect(MARGIN_LEFT, y, CONTENT_WIDTH, ROW_HEIGHT, TABLE_HEADER_BG);
        let font = self.fonts.bold.clone();
        self.text_at("Item / Serviço", &font, 9.0, MARGIN_LEFT + 1.5, y + 1.5);
        self.text_centered_in("Qtd", &font, 9.0, MARGIN_LEFT + COL_NAME, COL_QTY, y + 1.5);
        self.text_right(
            "Vl. Unit",
            &font,
            9.0,
            MARGIN_LEFT + COL_NAME + COL_QTY + COL_UNIT - 1.5,
            y + 1.5,
        );
        self.text_right(
            "Total",
            &font,
            9.0,
            MARGIN_LEFT + COL_NAME + COL_QTY + COL_UNIT + COL_TOTAL - 1.5,
            y + 1.5,
        );
        self.cursor.advance(ROW_HEIGHT);
    }

    fn text_centered_in(
        &self,
        content: &str,
        font: &IndirectFontRef,
        size_pt: f32,
        x: f32,
        width: f32,
        y_top: f32,
    ) {
        let offset = (width - text_width_mm(content, size_pt)) / 2.0;
        self.text_at(content, font, size_pt, x + offset.max(0.0), y_top);
    }

    fn block_totals(
        &mut self,
        block: &ServiceBlock,
    ) {
        self.ensure_room(LINE * 3.0);

        let rows = [
            (
                "Materiais:",
                format!("R$ {}", format_brl(block.materials_subtotal())),
                FontKind::Regular,
            ),
            (
                "Mão de obra:",
                format!("R$ {}", format_brl(block.labor_cost)),
                FontKind::Regular,
            ),
            (
                "Total do serviço:",
                format!("R$ {}", format_brl(block.block_total())),
                FontKind::Bold,
            ),
        ];
        for (label, value, kind) in rows {
            let font = self.font(kind);
            self.text_right(label, &font, 10.0, CONTENT_RIGHT - 40.0, self.cursor.y());
            self.text_right(&value, &font, 10.0, CONTENT_RIGHT, self.cursor.y());
            self.cursor.advance(LINE);
        }
    }

    fn commercial_terms(
        &mut self,
        terms: &str,
    ) {
        if terms.trim().is_empty() {
            return;
        }
        self.ensure_section_start();

        let font = self.fonts.bold.clone();
        self.text_at(
            "CONDIÇÕES E OBSERVAÇÕES:",
            &font,
            12.0,
            MARGIN_LEFT,
            self.cursor.y(),
        );
        self.cursor.advance(LINE_HEADER);
        self.paragraph(terms, FontKind::Regular, 10.0, LINE);
        self.cursor.advance(2.0);
    }

    fn final_totals(
        &mut self,
        totals: &QuoteTotals,
    ) {
        self.ensure_section_start();
        self.ensure_room(LINE * 2.0 + 14.0);

        if totals.has_adjustment() {
            let label = if totals.is_discount() {
                "Desconto:"
            } else {
                "Ajuste:"
            };
            let font = self.fonts.regular.clone();
            self.text_right("Subtotal:", &font, 11.0, CONTENT_RIGHT - 40.0, self.cursor.y());
            self.text_right(
                &format!("R$ {}", format_brl(totals.subtotal)),
                &font,
                11.0,
                CONTENT_RIGHT,
                self.cursor.y(),
            );
            self.cursor.advance(LINE);
            self.text_right(label, &font, 11.0, CONTENT_RIGHT - 40.0, self.cursor.y());
            self.text_right(
                &format!("R$ {}", format_brl(totals.adjustment_value)),
                &font,
                11.0,
                CONTENT_RIGHT,
                self.cursor.y(),
            );
            self.cursor.advance(LINE);
            self.rule(CONTENT_RIGHT - 80.0, CONTENT_RIGHT, self.cursor.y());
            self.cursor.advance(2.0);
        }

        // Final total on a filled band, the visual anchor of the document.
        self.fill_rect(MARGIN_LEFT, self.cursor.y(), CONTENT_WIDTH, 12.0, ACCENT);
        self.layer().set_fill_color(WHITE);
        let font = self.fonts.bold.clone();
        self.text_at("TOTAL FINAL:", &font, 14.0, MARGIN_LEFT + 2.0, self.cursor.y() + 2.5);
        self.text_right(
            &format!("R$ {}", format_brl(totals.final_total)),
            &font,
            14.0,
            CONTENT_RIGHT - 2.0,
            self.cursor.y() + 2.5,
        );
        self.layer().set_fill_color(INK);
        self.cursor.advance(16.0);
    }

    fn footer_notes(
        &mut self,
        notes: &str,
    ) {
        if notes.trim().is_empty() {
            return;
        }
        self.ensure_section_start();
        self.paragraph(notes, FontKind::Italic, 9.0, LINE_SMALL);
        self.cursor.advance(2.0);
    }

    fn signature(&mut self) {
        self.ensure_room(LINE * 4.0 + 10.0);
        let y = (self.cursor.y() + 14.0).min(CONTENT_BOTTOM - LINE * 3.0);
        self.cursor.jump_to(y);

        self.rule(55.0, PAGE_WIDTH - 55.0, self.cursor.y());
        self.cursor.advance(2.0);
        self.text_centered(
            &self.branding.company_name,
            &self.fonts.regular,
            9.0,
            self.cursor.y(),
        );
        self.cursor.advance(LINE_SMALL);
        self.text_centered(
            &self.branding.signer_name,
            &self.fonts.regular,
            9.0,
            self.cursor.y(),
        );
        self.cursor.advance(LINE_SMALL);
        debug!(pages = self.page_number, "proposal body rendered");
    }
}

#[derive(Debug, Clone, Copy)]
enum FontKind {
    Regular,
    Bold,
    Italic,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_draft() -> QuoteDraft {
        let mut draft = QuoteDraft::new();
        draft.client_name = "Acme Corp".to_string();
        draft.client_tax_id = "12.345.678/0001-90".to_string();
        let block = draft.add_block("Window Sealing");
        draft
            .add_material_line(block, "Selante Fibrado (Balde)", dec!(2), dec!(950.00))
            .unwrap();
        draft.set_labor_cost(block, dec!(500.00)).unwrap();
        draft
    }

    fn issue_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 8).unwrap()
    }

    fn assert_is_pdf(bytes: &[u8]) {
        assert!(bytes.len() > 1000, "suspiciously small document");
        assert_eq!(&bytes[..5], b"%PDF-");
    }

    #[test]
    fn renders_a_nonempty_document() {
        let branding = Branding {
            logo_path: None,
            ..Branding::default()
        };

        let bytes = render_proposal(&sample_draft(), &branding, issue_date()).unwrap();

        assert_is_pdf(&bytes);
    }

    #[test]
    fn missing_assets_never_abort_rendering() {
        let branding = Branding {
            logo_path: Some("/nonexistent/logo.png".into()),
            intro_covers: vec!["/nonexistent/capa1.jpg".into()],
            closing_covers: vec!["/nonexistent/final.jpg".into()],
            ..Branding::default()
        };
        let mut draft = sample_draft();
        draft.add_photo(0, "/nonexistent/foto.jpg".into()).unwrap();

        let bytes = render_proposal(&draft, &branding, issue_date()).unwrap();

        assert_is_pdf(&bytes);
    }

    #[test]
    fn real_assets_are_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let logo = dir.path().join("logo.png");
        let cover = dir.path().join("capa.png");
        let photo = dir.path().join("foto.png");
        image::RgbImage::from_pixel(80, 40, image::Rgb([0, 60, 120]))
            .save(&logo)
            .unwrap();
        image::RgbImage::from_pixel(100, 141, image::Rgb([200, 200, 200]))
            .save(&cover)
            .unwrap();
        image::RgbImage::from_pixel(120, 90, image::Rgb([90, 90, 90]))
            .save(&photo)
            .unwrap();

        let branding = Branding {
            logo_path: Some(logo),
            intro_covers: vec![cover.clone()],
            closing_covers: vec![cover],
            ..Branding::default()
        };
        let mut draft = sample_draft();
        draft.add_photo(0, photo).unwrap();

        let plain = render_proposal(&sample_draft(), &branding, issue_date()).unwrap();
        let with_assets = render_proposal(&draft, &branding, issue_date()).unwrap();

        assert_is_pdf(&with_assets);
        assert!(
            with_assets.len() > plain.len(),
            "embedded photo should grow the document"
        );
    }

    #[test]
    fn many_blocks_paginate_without_panicking() {
        let mut draft = sample_draft();
        for i in 0..25 {
            let b = draft.add_block(format!("Serviço {i}"));
            draft
                .add_material_line(b, "Selante Fibrado (Balde)", dec!(1), dec!(950.00))
                .unwrap();
            draft.set_labor_cost(b, dec!(100.00)).unwrap();
        }
        let branding = Branding {
            logo_path: None,
            ..Branding::default()
        };

        let bytes = render_proposal(&draft, &branding, issue_date()).unwrap();

        assert_is_pdf(&bytes);
    }

    #[test]
    fn file_name_is_deterministic_and_safe() {
        assert_eq!(proposal_file_name("Acme Corp"), "Orcamento_Acme_Corp.pdf");
        assert_eq!(proposal_file_name("  Acme  "), "Orcamento_Acme.pdf");
        assert_eq!(
            proposal_file_name("Condomínio Solar/2026"),
            "Orcamento_Condomnio_Solar2026.pdf"
        );
        assert_eq!(proposal_file_name("???"), "Orcamento.pdf");
    }
}
