//! PDF emitter – takes a flowed [`Document`] and produces PDF bytes using
//! `printpdf` (v0.8 ops-based API).
//!
//! Signature images whose data URI cannot be decoded are skipped with a
//! `log::warn` — a missing picture never aborts the document.

use std::collections::{HashMap, HashSet};

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use printpdf::*;

use crate::assets::LogoImage;
use crate::error::{RenderError, RenderWarning};
use crate::page::{Document, DrawOp, ImageSource};

/// A printpdf XObject together with the pixel dimensions of the source image.
struct ImageResource {
    xobj_id: XObjectId,
    px_width: u32,
    px_height: u32,
}

/// Render the document into PDF bytes plus any asset warnings collected on
/// the way. The only fatal path: the underlying page stream comes back
/// unusable, in which case no bytes are returned.
pub fn emit_pdf(
    document: &Document,
    logo: Option<&LogoImage>,
) -> Result<(Vec<u8>, Vec<RenderWarning>), RenderError> {
    let page_w = Mm(document.page_width_pt * 0.352778); // pt → mm
    let page_h_pt = document.page_height_pt;
    let page_h = Mm(page_h_pt * 0.352778);

    let mut doc = PdfDocument::new(&document.title);
    let mut img_warnings: Vec<PdfWarnMsg> = Vec::new();
    let mut warnings: Vec<RenderWarning> = Vec::new();

    // ── Pre-register all images ────────────────────────────────────────────
    let mut data_srcs: HashSet<&str> = HashSet::new();
    let mut logo_used = false;
    for page in &document.pages {
        for op in &page.ops {
            if let DrawOp::Image { source, .. } = op {
                match source {
                    ImageSource::DataUri(uri) => {
                        data_srcs.insert(uri.as_str());
                    }
                    ImageSource::Logo => logo_used = true,
                }
            }
        }
    }

    let mut images: HashMap<String, ImageResource> = HashMap::new();
    for src in &data_srcs {
        let bytes = match parse_data_uri(src) {
            Ok(b) => b,
            Err(e) => {
                log::warn!("Skipping image — {e}");
                warnings.push(RenderWarning::AssetLoad {
                    asset: "embedded image".to_string(),
                    detail: e,
                });
                continue;
            }
        };
        let dyn_img = match ::image::load_from_memory(&bytes) {
            Ok(img) => img,
            Err(e) => {
                log::warn!("Skipping image — decode error: {e}");
                warnings.push(RenderWarning::AssetLoad {
                    asset: "embedded image".to_string(),
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let raw = match RawImage::decode_from_bytes(&bytes, &mut img_warnings) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping image — PDF encode error: {e}");
                warnings.push(RenderWarning::AssetLoad {
                    asset: "embedded image".to_string(),
                    detail: e.to_string(),
                });
                continue;
            }
        };
        let xobj_id = doc.add_image(&raw);
        images.insert(
            src.to_string(),
            ImageResource {
                xobj_id,
                px_width: dyn_img.width(),
                px_height: dyn_img.height(),
            },
        );
    }

    let logo_resource = if logo_used {
        logo.and_then(|l| match RawImage::decode_from_bytes(&l.bytes, &mut img_warnings) {
            Ok(raw) => Some(ImageResource {
                xobj_id: doc.add_image(&raw),
                px_width: l.px_width,
                px_height: l.px_height,
            }),
            Err(e) => {
                log::warn!("Skipping logo — PDF encode error: {e}");
                None
            }
        })
    } else {
        None
    };

    // ── Render pages ──────────────────────────────────────────────────────
    let mut pages = Vec::new();
    for page in &document.pages {
        let mut ops = Vec::new();
        for op in &page.ops {
            render_op(&mut ops, op, page_h_pt, &images, logo_resource.as_ref());
        }
        pages.push(PdfPage::new(page_w, page_h, ops));
    }
    if pages.is_empty() {
        pages.push(PdfPage::new(page_w, page_h, Vec::new()));
    }

    doc.with_pages(pages);
    let bytes = doc.save(&PdfSaveOptions::default(), &mut Vec::new());

    if bytes.len() < 5 || &bytes[0..5] != b"%PDF-" {
        return Err(RenderError::Fatal(
            "document primitive produced an invalid page stream".to_string(),
        ));
    }
    Ok((bytes, warnings))
}

fn render_op(
    ops: &mut Vec<Op>,
    op: &DrawOp,
    page_h: f32,
    images: &HashMap<String, ImageResource>,
    logo: Option<&ImageResource>,
) {
    match op {
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            ops.push(Op::SetFillColor {
                col: rgb(fill),
            });
            ops.push(Op::DrawPolygon {
                polygon: rect_polygon(*x, page_h - y - height, *x + width, page_h - y),
            });
        }
        DrawOp::RectOutline {
            x,
            y,
            width,
            height,
            color,
            stroke_width,
        } => {
            ops.push(Op::SetOutlineColor { col: rgb(color) });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(*stroke_width),
            });
            ops.push(Op::DrawLine {
                line: rect_outline(*x, page_h - y - height, *x + width, page_h - y),
            });
        }
        DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            stroke_width,
        } => {
            ops.push(Op::SetOutlineColor { col: rgb(color) });
            ops.push(Op::SetOutlineThickness {
                pt: Pt(*stroke_width),
            });
            ops.push(Op::DrawLine {
                line: Line {
                    points: vec![
                        line_point(*x1, page_h - y1),
                        line_point(*x2, page_h - y2),
                    ],
                    is_closed: false,
                },
            });
        }
        DrawOp::Text {
            x,
            y,
            text,
            size,
            bold,
            color,
        } => {
            if text.is_empty() {
                return;
            }
            let font = if *bold {
                BuiltinFont::HelveticaBold
            } else {
                BuiltinFont::Helvetica
            };
            // Baseline ≈ top of line + ascender (approx 0.75 × font size).
            let baseline = page_h - y - size * 0.75;

            ops.push(Op::StartTextSection);
            ops.push(Op::SetTextCursor {
                pos: Point {
                    x: Pt(*x),
                    y: Pt(baseline),
                },
            });
            ops.push(Op::SetFontSizeBuiltinFont {
                size: Pt(*size),
                font,
            });
            ops.push(Op::SetFillColor { col: rgb(color) });
            ops.push(Op::WriteTextBuiltinFont {
                items: vec![TextItem::Text(to_winlatin(text))],
                font,
            });
            ops.push(Op::EndTextSection);
        }
        DrawOp::Image {
            x,
            y,
            width,
            height,
            source,
        } => {
            let resource = match source {
                ImageSource::DataUri(uri) => images.get(uri.as_str()),
                ImageSource::Logo => logo,
            };
            let Some(res) = resource else {
                return;
            };
            if res.px_width == 0 || res.px_height == 0 {
                return;
            }
            // Aspect-fit inside the target box, centered both ways.
            let scale = (width / res.px_width as f32).min(height / res.px_height as f32);
            let draw_w = res.px_width as f32 * scale;
            let draw_h = res.px_height as f32 * scale;
            let tx = x + (width - draw_w) / 2.0;
            let ty = page_h - y - height + (height - draw_h) / 2.0;

            ops.push(Op::UseXobject {
                id: res.xobj_id.clone(),
                transform: XObjectTransform {
                    translate_x: Some(Pt(tx)),
                    translate_y: Some(Pt(ty)),
                    dpi: Some(72.0),
                    scale_x: Some(scale),
                    scale_y: Some(scale),
                    rotate: None,
                },
            });
        }
    }
}

fn rgb(color: &[f32; 4]) -> Color {
    Color::Rgb(Rgb {
        r: color[0],
        g: color[1],
        b: color[2],
        icc_profile: None,
    })
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: Point { x: Pt(x), y: Pt(y) },
        bezier: false,
    }
}

/// Filled rectangle from PDF-space corners (y up).
fn rect_polygon(x1: f32, y1: f32, x2: f32, y2: f32) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                line_point(x1, y1),
                line_point(x2, y1),
                line_point(x2, y2),
                line_point(x1, y2),
            ],
        }],
        mode: PaintMode::Fill,
        winding_order: WindingOrder::NonZero,
    }
}

fn rect_outline(x1: f32, y1: f32, x2: f32, y2: f32) -> Line {
    Line {
        points: vec![
            line_point(x1, y2),
            line_point(x2, y2),
            line_point(x2, y1),
            line_point(x1, y1),
        ],
        is_closed: true,
    }
}

/// Convert a UTF-8 string to raw Windows-1252 bytes then wrap in a String so
/// printpdf writes the bytes unchanged into the PDF stream (builtin fonts use
/// WinAnsiEncoding, so each glyph is one byte 0x00–0xFF). Spanish accents and
/// Ñ sit below 0x100 and pass straight through.
fn to_winlatin(s: &str) -> String {
    let bytes: Vec<u8> = s
        .chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80, // euro
            '\u{2026}' => 0x85, // ellipsis
            '\u{2018}' => 0x91, // left single quote
            '\u{2019}' => 0x92, // right single quote
            '\u{201C}' => 0x93, // left double quote
            '\u{201D}' => 0x94, // right double quote
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en-dash
            '\u{2014}' => 0x97, // em-dash
            '\u{00A0}' => 0x20, // non-breaking space -> space
            c if (c as u32) < 256 => c as u8,
            _ => b'?',
        })
        .collect();
    // SAFETY: intentionally non-UTF-8 for the 0x80-0x9F range; printpdf
    // passes these bytes straight to the PDF stream, decoded by
    // WinAnsiEncoding.
    #[allow(unsafe_code)]
    unsafe {
        String::from_utf8_unchecked(bytes)
    }
}

/// Parse a `data:<mime>;base64,<data>` URI and return the raw decoded bytes.
fn parse_data_uri(src: &str) -> Result<Vec<u8>, String> {
    if !src.starts_with("data:") {
        let preview = if src.len() > 80 { &src[..80] } else { src };
        return Err(format!(
            "Image src must be a base64 data URI \
             (e.g. `data:image/png;base64,...`). Got: {preview:?}"
        ));
    }
    let rest = &src["data:".len()..];
    let comma_pos = rest.find(',').ok_or_else(|| {
        "Invalid data URI: missing `,` separator between header and data".to_string()
    })?;
    let header = &rest[..comma_pos];
    if !header.contains(";base64") {
        return Err("Only base64-encoded data URIs are supported. \
             The header must contain `;base64` (e.g. `data:image/png;base64,...`)."
            .to_string());
    }
    let b64_data = rest[comma_pos + 1..].trim();
    BASE64_STD
        .decode(b64_data)
        .map_err(|e| format!("Base64 decode error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageState;

    #[test]
    fn emit_empty_document() {
        let doc = Document {
            title: "Acta".into(),
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            pages: vec![PageState::new(0)],
        };
        let (bytes, warnings) = emit_pdf(&doc, None).unwrap();
        assert!(bytes.len() > 100, "PDF should have content");
        assert_eq!(&bytes[0..5], b"%PDF-");
        assert!(warnings.is_empty());
    }

    #[test]
    fn bad_data_uri_is_skipped_not_fatal() {
        let doc = Document {
            title: "Acta".into(),
            page_width_pt: 612.0,
            page_height_pt: 792.0,
            pages: vec![PageState {
                index: 0,
                ops: vec![DrawOp::Image {
                    x: 40.0,
                    y: 100.0,
                    width: 80.0,
                    height: 40.0,
                    source: ImageSource::DataUri("data:image/png;base64,!!notbase64".into()),
                }],
            }],
        };
        let (bytes, warnings) = emit_pdf(&doc, None).unwrap();
        assert_eq!(&bytes[0..5], b"%PDF-");
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn winlatin_keeps_spanish_accents() {
        let encoded = to_winlatin("Reunión N° 5 – Capacitación");
        // ó, ° and the en-dash all map to single bytes, nothing to '?'.
        assert!(!encoded.as_bytes().contains(&b'?'));
        assert_eq!(encoded.as_bytes().len(), "Reunión N° 5 – Capacitación".chars().count());
    }

    #[test]
    fn data_uri_parsing() {
        assert!(parse_data_uri("http://example.com/x.png").is_err());
        assert!(parse_data_uri("data:image/png,plain").is_err());
        let bytes = parse_data_uri("data:image/png;base64,AQID").unwrap();
        assert_eq!(bytes, vec![1, 2, 3]);
    }
}
