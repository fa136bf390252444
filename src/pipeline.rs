//! Two-pass renderer – ties the adapter, flow controller and PDF emitter
//! into a single call.
//!
//! Pass 1 flows every section into page states and yields the total page
//! count. Pass 2 stamps the running header banner and the
//! "Página i de N" footer onto every page at absolute coordinates — the
//! "of N" is unknowable until all content has flowed, which is the whole
//! reason the split exists. Stamping never touches the flowing cursor, so
//! it can never trigger another page break.

use crate::adapter;
use crate::assets::LogoImage;
use crate::error::{RenderError, RenderWarning};
use crate::flow::flow_sections;
use crate::fonts::{Face, FontBook};
use crate::model::ReportModel;
use crate::page::{Document, DrawOp, ImageSource, PageState};
use crate::render;
use crate::sources::{apply_narrative, NarrativeSource};
use crate::theme::{PageGeometry, Theme};

/// Configuration for one render invocation.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    pub geometry: PageGeometry,
    pub theme: Theme,
}

/// A finished render: complete page-numbered bytes plus non-fatal warnings.
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<RenderWarning>,
}

/// Run both passes without emitting PDF bytes – the frozen instruction
/// stream is what structural tests inspect.
pub fn compute_document(
    model: &ReportModel,
    config: &RenderConfig,
    has_logo: bool,
) -> (Document, Vec<RenderWarning>) {
    let fonts = FontBook::new();

    // Pass 1: content flow.
    let sections = adapter::build_sections(model, &config.theme);
    let outcome = flow_sections(&sections, config.geometry, &fonts, &config.theme);
    let mut pages = outcome.pages;
    let mut warnings = outcome.warnings;
    let total = pages.len();

    // Pass 2: header/footer stamping, now that N is known.
    for page in &mut pages {
        stamp_furniture(page, total, model, config, &fonts, has_logo);
    }
    if !has_logo {
        warnings.push(RenderWarning::AssetLoad {
            asset: crate::assets::LOGO_ASSET.to_string(),
            detail: "not available; text-only header used".to_string(),
        });
    }

    let document = Document {
        title: format!("Acta de Reunión N° {}", model.number),
        page_width_pt: config.geometry.width,
        page_height_pt: config.geometry.height,
        pages,
    };
    (document, warnings)
}

/// Render a fully resolved model into a paginated PDF.
///
/// Either succeeds with a complete, page-numbered document or fails
/// atomically — there is no partially rendered output state.
pub fn render_report(
    model: &ReportModel,
    config: &RenderConfig,
    logo: Option<&LogoImage>,
) -> Result<RenderedReport, RenderError> {
    let (document, mut warnings) = compute_document(model, config, logo.is_some());
    let page_count = document.pages.len();

    let (bytes, emit_warnings) = render::emit_pdf(&document, logo)?;
    warnings.extend(emit_warnings);

    Ok(RenderedReport {
        bytes,
        page_count,
        warnings,
    })
}

/// Ask the narrative collaborator to enrich the model first, then render.
/// The collaborator having nothing to say is not an error — the AI-analysis
/// section is simply absent.
pub fn render_with_narrative(
    model: &ReportModel,
    source: &dyn NarrativeSource,
    config: &RenderConfig,
    logo: Option<&LogoImage>,
) -> Result<RenderedReport, RenderError> {
    let mut enriched = model.clone();
    if enriched.analysis.is_none() {
        if let Some(outcome) = source.analyze(&enriched) {
            apply_narrative(&mut enriched, outcome);
        }
    }
    render_report(&enriched, config, logo)
}

/// Stamp one page's banner and footer. All coordinates are page-absolute;
/// the bands were reserved by the geometry, so stamped ops can never
/// overlap flowed content.
fn stamp_furniture(
    page: &mut PageState,
    total: usize,
    model: &ReportModel,
    config: &RenderConfig,
    fonts: &FontBook,
    has_logo: bool,
) {
    let g = &config.geometry;
    let t = &config.theme;
    let left = g.margin_left;
    let width = g.content_width();
    let mut ops = Vec::new();

    // ── Header banner ─────────────────────────────────────────────────────
    let mut text_x = left;
    if has_logo {
        ops.push(DrawOp::Image {
            x: left,
            y: g.margin_top,
            width: 64.0,
            height: 28.0,
            source: ImageSource::Logo,
        });
        text_x += 72.0;
    }

    ops.push(DrawOp::Text {
        x: text_x,
        y: g.margin_top,
        text: model.org_name().to_string(),
        size: t.section_size,
        bold: true,
        color: t.primary.to_array(),
    });

    let mut org_meta: Vec<String> = Vec::new();
    if let Some(org) = &model.organization {
        if let Some(tax_id) = &org.tax_id {
            org_meta.push(format!("NIT: {tax_id}"));
        }
        if let Some(address) = &org.address {
            org_meta.push(address.clone());
        }
        if let Some(phone) = &org.phone {
            org_meta.push(format!("Tel: {phone}"));
        }
    }
    if !org_meta.is_empty() {
        ops.push(DrawOp::Text {
            x: text_x,
            y: g.margin_top + 15.0,
            text: org_meta.join(" | "),
            size: t.small_size,
            bold: false,
            color: t.text_muted.to_array(),
        });
    }

    let generated = format!("Generado: {}", model.date);
    let generated_w = fonts.text_width(&generated, t.small_size, Face::Regular);
    ops.push(DrawOp::Text {
        x: left + width - generated_w,
        y: g.margin_top,
        text: generated,
        size: t.small_size,
        bold: false,
        color: t.text_muted.to_array(),
    });

    let rule_y = g.content_top() - 8.0;
    ops.push(DrawOp::Line {
        x1: left,
        y1: rule_y,
        x2: left + width,
        y2: rule_y,
        color: t.primary.to_array(),
        stroke_width: 1.5,
    });

    // ── Footer ────────────────────────────────────────────────────────────
    let footer = format!(
        "{} | Página {} de {}",
        model.org_name(),
        page.index + 1,
        total
    );
    let footer_w = fonts.text_width(&footer, t.small_size, Face::Regular);
    ops.push(DrawOp::Text {
        x: left + (width - footer_w) / 2.0,
        y: g.height - 30.0,
        text: footer,
        size: t.small_size,
        bold: false,
        color: t.text_muted.to_array(),
    });

    page.ops.extend(ops);
}
