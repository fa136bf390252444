//! Report model adapter – shapes a [`ReportModel`] into the fixed-order
//! section/block list the flow controller consumes.
//!
//! Pure data shaping: score-band colours and card tints are pre-computed
//! here, but no measurement or placement happens. Sections with no content
//! are omitted entirely.

use crate::blocks::{
    Banner, Block, Cell, CellAlign, Column, HighlightBox, KeyValueLine, Paragraph, Row, Section,
    StatCard, StatCardRow, Table,
};
use crate::model::{Commitment, ReportModel};
use crate::theme::{Color, Theme};

/// Build the document's sections in domain order.
pub fn build_sections(model: &ReportModel, theme: &Theme) -> Vec<Section> {
    let mut sections = Vec::new();

    sections.push(title_section(model, theme));
    sections.push(general_info(model));
    if let Some(s) = training_info(model) {
        sections.push(s);
    }
    if let Some(s) = evaluation_results(model, theme) {
        sections.push(s);
    }
    if let Some(s) = topics(model) {
        sections.push(s);
    }
    if let Some(s) = prior_commitments(model) {
        sections.push(s);
    }
    if let Some(s) = development(model) {
        sections.push(s);
    }
    if let Some(s) = attendee_roster(model) {
        sections.push(s);
    }
    if let Some(s) = ai_analysis(model, theme) {
        sections.push(s);
    }
    if let Some(s) = next_commitments(model, theme) {
        sections.push(s);
    }

    sections
}

/// Drop markup tags the authoring editor may have left in narrative text.
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

fn title_section(model: &ReportModel, theme: &Theme) -> Section {
    let mut s = Section::untitled();
    s.push(Block::Banner(Banner {
        text: format!("ACTA DE REUNIÓN N° {}", model.number),
        fill: theme.primary,
        text_color: Color::WHITE,
    }));
    s
}

fn general_info(model: &ReportModel) -> Section {
    let mut s = Section::new("INFORMACIÓN GENERAL");

    let labels: Vec<&str> = model.meeting_kinds.iter().map(|k| k.label()).collect();
    let joined = if labels.is_empty() {
        "No especificado".to_string()
    } else {
        let mut text = labels.join(", ");
        if let Some(other) = &model.kind_other {
            text.push_str(" - ");
            text.push_str(other);
        }
        text
    };
    s.push(Block::KeyValue(KeyValueLine::new("TIPO DE REUNIÓN", joined)));
    s.push(Block::KeyValue(KeyValueLine::new("OBJETIVO", &model.objective)));
    s.push(Block::KeyValue(KeyValueLine::new("FECHA", &model.date)));
    if let (Some(start), Some(end)) = (&model.start_time, &model.end_time) {
        s.push(Block::KeyValue(KeyValueLine::new(
            "HORA",
            format!("{start} - {end}"),
        )));
    }
    if let Some(location) = &model.location {
        s.push(Block::KeyValue(KeyValueLine::new("LUGAR", location)));
    }
    s
}

fn training_info(model: &ReportModel) -> Option<Section> {
    let training = model.training.as_ref()?;
    let mut s = Section::new("CAPACITACIÓN");
    s.push(Block::KeyValue(KeyValueLine::new("TEMA", &training.topic)));
    if let Some(activity) = &training.activity {
        s.push(Block::KeyValue(KeyValueLine::new("ACTIVIDAD", activity)));
    }
    Some(s)
}

fn pct_cell(pct: Option<u32>, theme: &Theme) -> Cell {
    match pct {
        Some(p) => {
            let (fill, color) = theme.score_band(p);
            Cell {
                text: format!("{p}%"),
                fill: Some(fill),
                color: Some(color),
                bold: false,
                image: None,
            }
        }
        None => Cell::text("—"),
    }
}

fn evaluation_results(model: &ReportModel, theme: &Theme) -> Option<Section> {
    if model.evaluations.is_empty() {
        return None;
    }
    let mut s = Section::new("ANÁLISIS PRE-TEST VS POST-TEST");

    let rows = model
        .evaluations
        .iter()
        .map(|result| {
            let delta_cell = match result.improvement() {
                Some(delta) => Cell {
                    text: format!("{delta:+}%"),
                    fill: None,
                    color: Some(theme.delta_color(delta)),
                    bold: true,
                    image: None,
                },
                None => Cell::text("—"),
            };
            Row::new(vec![
                Cell::text(&result.participant),
                pct_cell(result.pre_pct, theme),
                pct_cell(result.post_pct, theme),
                delta_cell,
            ])
        })
        .collect();

    s.push(Block::Table(Table {
        columns: vec![
            Column {
                heading: "Participante".into(),
                width: 0.40,
                align: CellAlign::Left,
            },
            Column {
                heading: "Pre-Test".into(),
                width: 0.20,
                align: CellAlign::Center,
            },
            Column {
                heading: "Post-Test".into(),
                width: 0.20,
                align: CellAlign::Center,
            },
            Column {
                heading: "Mejora".into(),
                width: 0.20,
                align: CellAlign::Center,
            },
        ],
        rows,
        zebra: true,
    }));
    Some(s)
}

fn topics(model: &ReportModel) -> Option<Section> {
    if model.topics.is_empty() {
        return None;
    }
    let mut s = Section::new("TEMAS A TRATAR");
    let numbered = model
        .topics
        .iter()
        .enumerate()
        .map(|(i, topic)| format!("{}. {topic}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");
    s.push(Block::Paragraph(Paragraph::plain(numbered)));
    Some(s)
}

fn prior_commitments(model: &ReportModel) -> Option<Section> {
    if model.prior_commitments.is_empty() {
        return None;
    }
    let mut s = Section::new("COMPROMISOS ACTA ANTERIOR");
    let rows = model
        .prior_commitments
        .iter()
        .map(|c| {
            Row::new(vec![
                Cell::text(&c.description),
                Cell::text(c.fulfilled.as_deref().unwrap_or("N/A")),
            ])
        })
        .collect();
    s.push(Block::Table(Table {
        columns: vec![
            Column {
                heading: "Compromiso".into(),
                width: 0.70,
                align: CellAlign::Left,
            },
            Column {
                heading: "Cumplió".into(),
                width: 0.30,
                align: CellAlign::Center,
            },
        ],
        rows,
        zebra: true,
    }));
    Some(s)
}

fn development(model: &ReportModel) -> Option<Section> {
    let body = model.development.as_ref()?;
    let mut s = Section::new("DESARROLLO DE LA REUNIÓN");
    s.push(Block::Paragraph(Paragraph::plain(strip_tags(body))));
    Some(s)
}

fn attendee_roster(model: &ReportModel) -> Option<Section> {
    if model.attendees.is_empty() {
        return None;
    }
    let mut s = Section::new("ASISTENTES");
    s.fresh_page = true;

    let rows = model
        .attendees
        .iter()
        .map(|a| {
            let signature_cell = match &a.signature {
                Some(uri) => Cell {
                    image: Some(uri.clone()),
                    ..Cell::default()
                },
                None => Cell::text(""),
            };
            let mut row = Row::new(vec![
                Cell::text(&a.name),
                Cell::text(a.role.as_deref().unwrap_or("")),
                signature_cell,
            ]);
            row.height_override = Some(40.0);
            row
        })
        .collect();

    s.push(Block::Table(Table {
        columns: vec![
            Column {
                heading: "Nombre".into(),
                width: 0.35,
                align: CellAlign::Left,
            },
            Column {
                heading: "Cargo".into(),
                width: 0.25,
                align: CellAlign::Left,
            },
            Column {
                heading: "Firma".into(),
                width: 0.40,
                align: CellAlign::Left,
            },
        ],
        rows,
        zebra: false,
    }));
    Some(s)
}

fn ai_analysis(model: &ReportModel, theme: &Theme) -> Option<Section> {
    let analysis = model.analysis.as_ref()?;
    let mut s = Section::new("ANÁLISIS DE ADHERENCIA");

    if let Some(m) = &analysis.metrics {
        let delta_tint = if m.improvement_pct > 0 {
            (theme.band_good_bg, theme.band_good_fg)
        } else if m.improvement_pct < 0 {
            (theme.band_low_bg, theme.band_low_fg)
        } else {
            (theme.section_bg, theme.text_muted)
        };
        s.push(Block::StatCards(StatCardRow {
            cards: vec![
                StatCard {
                    value: format!("{}%", m.pre_avg),
                    caption: "Pre-Test".into(),
                    tint: theme.info_bg,
                    value_color: theme.info_fg,
                },
                StatCard {
                    value: format!("{}%", m.post_avg),
                    caption: "Post-Test".into(),
                    tint: theme.band_good_bg,
                    value_color: theme.band_good_fg,
                },
                StatCard {
                    value: format!("{:+}%", m.improvement_pct),
                    caption: "Mejora".into(),
                    tint: delta_tint.0,
                    value_color: delta_tint.1,
                },
                StatCard {
                    value: m.participants.to_string(),
                    caption: "Evaluados".into(),
                    tint: theme.ai_bg,
                    value_color: theme.ai_fg,
                },
            ],
        }));
        if let Some(level) = &m.adherence_level {
            s.push(Block::KeyValue(KeyValueLine::new("NIVEL DE ADHERENCIA", level)));
        }
    }

    s.push(Block::Paragraph(Paragraph {
        text: strip_tags(&analysis.narrative),
        color: None,
        panel: Some(theme.ai_bg),
    }));

    let mut meta = Vec::new();
    if let Some(label) = &analysis.model_label {
        meta.push(label.clone());
    }
    if let Some(when) = &analysis.generated_at {
        meta.push(format!("Generado: {when}"));
    }
    if !meta.is_empty() {
        s.push(Block::Paragraph(Paragraph {
            text: meta.join(" · "),
            color: Some(theme.text_muted),
            panel: None,
        }));
    }

    Some(s)
}

fn commitment_meta(c: &Commitment) -> String {
    let mut meta = format!(
        "Encargado: {} — Fecha: {}",
        c.owner.as_deref().unwrap_or("N/A"),
        c.due.as_deref().unwrap_or("N/A")
    );
    if c.ai_suggested {
        meta.push_str(" · Sugerido por IA");
    }
    meta
}

fn next_commitments(model: &ReportModel, theme: &Theme) -> Option<Section> {
    if model.next_commitments.is_empty() {
        return None;
    }
    let mut s = Section::new("COMPROMISOS PRÓXIMA ACTA");
    for (i, c) in model.next_commitments.iter().enumerate() {
        s.push(Block::Highlight(HighlightBox {
            title: format!("Compromiso {}", i + 1),
            body: c.description.clone(),
            meta: Some(commitment_meta(c)),
            accent: if c.ai_suggested {
                theme.ai_fg
            } else {
                theme.primary
            },
        }));
    }
    Some(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AiAnalysis, Attendee, EvaluationResult, MetricsSnapshot};

    fn base_model() -> ReportModel {
        serde_json::from_str(
            r#"{"number": 12, "date": "4 de agosto de 2026", "objective": "Capacitación"}"#,
        )
        .unwrap()
    }

    fn titles(sections: &[Section]) -> Vec<String> {
        sections.iter().filter_map(|s| s.title.clone()).collect()
    }

    #[test]
    fn empty_collections_omit_their_sections() {
        let theme = Theme::default();
        let sections = build_sections(&base_model(), &theme);
        let titles = titles(&sections);
        assert!(titles.contains(&"INFORMACIÓN GENERAL".to_string()));
        assert!(!titles.iter().any(|t| t == "ASISTENTES"));
        assert!(!titles.iter().any(|t| t.contains("PRE-TEST")));
        assert!(!titles.iter().any(|t| t.contains("ADHERENCIA")));
    }

    #[test]
    fn roster_is_a_fresh_page_section() {
        let theme = Theme::default();
        let mut model = base_model();
        model.attendees.push(Attendee {
            name: "Ana Ruiz".into(),
            role: Some("Enfermera Jefe".into()),
            signature: None,
        });
        let sections = build_sections(&model, &theme);
        let roster = sections
            .iter()
            .find(|s| s.title.as_deref() == Some("ASISTENTES"))
            .unwrap();
        assert!(roster.fresh_page);
    }

    #[test]
    fn score_bands_are_precomputed() {
        let theme = Theme::default();
        let mut model = base_model();
        model.evaluations.push(EvaluationResult {
            participant: "Carlos".into(),
            pre_pct: Some(45),
            post_pct: Some(82),
        });
        let sections = build_sections(&model, &theme);
        let section = sections
            .iter()
            .find(|s| s.title.as_deref() == Some("ANÁLISIS PRE-TEST VS POST-TEST"))
            .unwrap();
        let Block::Table(table) = &section.blocks[0] else {
            panic!("expected a table");
        };
        let row = &table.rows[0];
        assert_eq!(row.cells[1].fill, Some(theme.band_low_bg));
        assert_eq!(row.cells[2].fill, Some(theme.band_good_bg));
        assert_eq!(row.cells[3].text, "+37%");
        assert_eq!(row.cells[3].color, Some(theme.band_good_fg));
    }

    #[test]
    fn ai_section_present_only_with_analysis() {
        let theme = Theme::default();
        let mut model = base_model();
        model.analysis = Some(AiAnalysis {
            narrative: "<p>Buena adherencia general.</p>".into(),
            metrics: Some(MetricsSnapshot {
                adherence_level: Some("Alta".into()),
                pre_avg: 58,
                post_avg: 86,
                improvement_pct: 48,
                participants: 9,
            }),
            model_label: Some("gpt-4o-mini".into()),
            generated_at: Some("2026-08-04 10:30".into()),
        });
        let sections = build_sections(&model, &theme);
        let section = sections
            .iter()
            .find(|s| s.title.as_deref() == Some("ANÁLISIS DE ADHERENCIA"))
            .unwrap();
        assert!(matches!(section.blocks[0], Block::StatCards(_)));
        // Markup is stripped before layout.
        let has_tagged = section.blocks.iter().any(|b| {
            matches!(b, Block::Paragraph(p) if p.text.contains('<'))
        });
        assert!(!has_tagged);
    }

    #[test]
    fn suggested_commitment_gets_ai_accent() {
        let theme = Theme::default();
        let mut model = base_model();
        model.next_commitments.push(Commitment {
            description: "Refuerzo en un mes".into(),
            owner: Some("Calidad".into()),
            due: Some("2026-09-04".into()),
            fulfilled: None,
            ai_suggested: true,
        });
        let sections = build_sections(&model, &theme);
        let section = sections
            .iter()
            .find(|s| s.title.as_deref() == Some("COMPROMISOS PRÓXIMA ACTA"))
            .unwrap();
        let Block::Highlight(hb) = &section.blocks[0] else {
            panic!("expected a highlight box");
        };
        assert_eq!(hb.accent, theme.ai_fg);
        assert!(hb.meta.as_deref().unwrap().contains("Sugerido por IA"));
    }

    #[test]
    fn strip_tags_removes_markup_only() {
        assert_eq!(strip_tags("<p>Hola <b>mundo</b></p>"), "Hola mundo");
        assert_eq!(strip_tags("sin etiquetas"), "sin etiquetas");
    }
}
