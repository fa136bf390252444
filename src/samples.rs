//! Sample report models for testing and demonstration.
//!
//! Each fixture exercises a different slice of the engine: the full acta
//! touches every section kind, the minimal one only the mandatory fields.

use crate::model::{
    AiAnalysis, Attendee, Commitment, EvaluationResult, MeetingKind, MetricsSnapshot, OrgIdentity,
    ReportModel, TrainingInfo,
};

/// 1×1 transparent PNG, valid for the `image` crate decoder.
pub const TINY_PNG_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

fn organization() -> OrgIdentity {
    OrgIdentity {
        name: "CLÍNICA VIDA PLENA SAS".into(),
        tax_id: Some("901234567-8".into()),
        address: Some("Cra. 5 #28-85, Ibagué".into()),
        phone: Some("(608) 555 0134".into()),
    }
}

/// A record touching every section: training, evaluations, commitments,
/// roster with one signature and an AI analysis.
pub fn full_acta() -> ReportModel {
    ReportModel {
        number: 12,
        date: "martes, 4 de agosto de 2026".into(),
        meeting_kinds: vec![MeetingKind::Capacitacion],
        kind_other: None,
        objective: "Capacitación: Higiene de manos y los cinco momentos".into(),
        start_time: Some("08:00".into()),
        end_time: Some("10:00".into()),
        location: Some("Auditorio principal".into()),
        topics: vec![
            "Los cinco momentos de la higiene de manos".into(),
            "Técnica de lavado clínico".into(),
            "Uso de soluciones a base de alcohol".into(),
        ],
        development: Some(
            "<p>Se desarrolló la sesión teórico-práctica programada. El personal \
             asistencial participó en la demostración de la técnica de lavado y se \
             resolvieron dudas sobre el uso de guantes como sustituto de la higiene \
             de manos.</p>"
                .into(),
        ),
        training: Some(TrainingInfo {
            topic: "Higiene de manos".into(),
            activity: Some("Taller práctico con retroalimentación individual".into()),
        }),
        attendees: vec![
            Attendee {
                name: "Ana María Ruiz".into(),
                role: Some("Enfermera Jefe".into()),
                signature: Some(TINY_PNG_URI.into()),
            },
            Attendee {
                name: "Carlos Pérez".into(),
                role: Some("Auxiliar de Enfermería".into()),
                signature: None,
            },
            Attendee {
                name: "Diana Gómez".into(),
                role: Some("Médica General".into()),
                signature: None,
            },
            Attendee {
                name: "Jorge Valencia".into(),
                role: Some("Fisioterapeuta".into()),
                signature: None,
            },
        ],
        evaluations: vec![
            EvaluationResult {
                participant: "Ana María Ruiz".into(),
                pre_pct: Some(70),
                post_pct: Some(95),
            },
            EvaluationResult {
                participant: "Carlos Pérez".into(),
                pre_pct: Some(45),
                post_pct: Some(80),
            },
            EvaluationResult {
                participant: "Diana Gómez".into(),
                pre_pct: Some(60),
                post_pct: Some(60),
            },
            EvaluationResult {
                participant: "Jorge Valencia".into(),
                pre_pct: None,
                post_pct: Some(75),
            },
        ],
        prior_commitments: vec![
            Commitment {
                description: "Publicar el cronograma de capacitaciones del semestre en la \
                              cartelera institucional y socializarlo por correo"
                    .into(),
                owner: Some("Talento Humano".into()),
                due: Some("2026-07-01".into()),
                fulfilled: Some("Sí".into()),
                ai_suggested: false,
            },
            Commitment {
                description: "Actualizar el inventario de dispensadores de gel".into(),
                owner: Some("Infraestructura".into()),
                due: Some("2026-07-15".into()),
                fulfilled: Some("Parcial".into()),
                ai_suggested: false,
            },
        ],
        next_commitments: vec![
            Commitment {
                description: "Realizar ronda de observación de adherencia en los servicios \
                              de urgencias y hospitalización durante dos semanas"
                    .into(),
                owner: Some("Coordinación de Enfermería".into()),
                due: Some("2026-09-01".into()),
                fulfilled: None,
                ai_suggested: false,
            },
            Commitment {
                description: "Repetir el post-test al personal con puntaje inferior al 60 %".into(),
                owner: Some("Calidad".into()),
                due: Some("2026-09-15".into()),
                fulfilled: None,
                ai_suggested: true,
            },
        ],
        analysis: Some(AiAnalysis {
            narrative: "El grupo pasó de un promedio de 58 % en el pre-test a 78 % en el \
                        post-test, una mejora del 34 %. La brecha se concentra en el uso \
                        de soluciones de alcohol; se recomienda refuerzo dirigido en ese \
                        tema durante el próximo mes."
                .into(),
            metrics: Some(MetricsSnapshot {
                adherence_level: Some("Media-Alta".into()),
                pre_avg: 58,
                post_avg: 78,
                improvement_pct: 34,
                participants: 4,
            }),
            model_label: Some("narrativa-v2".into()),
            generated_at: Some("2026-08-04 10:30".into()),
        }),
        organization: Some(organization()),
    }
}

/// Only the mandatory fields: every optional section must be omitted.
pub fn minimal_acta() -> ReportModel {
    ReportModel {
        number: 1,
        date: "1 de agosto de 2026".into(),
        meeting_kinds: vec![MeetingKind::ReunionInterna],
        kind_other: None,
        objective: "Reunión de seguimiento".into(),
        start_time: None,
        end_time: None,
        location: None,
        topics: vec![],
        development: None,
        training: None,
        attendees: vec![],
        evaluations: vec![],
        prior_commitments: vec![],
        next_commitments: vec![],
        analysis: None,
        organization: None,
    }
}

/// A roster big enough to force row-level table splits.
pub fn roster_heavy_acta(attendees: usize) -> ReportModel {
    let mut model = minimal_acta();
    model.attendees = (0..attendees)
        .map(|i| Attendee {
            name: format!("Asistente {:02}", i + 1),
            role: Some("Auxiliar".into()),
            signature: None,
        })
        .collect();
    model
}

/// A narrative long enough to span several pages on its own.
pub fn long_narrative_acta(sentences: usize) -> ReportModel {
    let mut model = minimal_acta();
    let sentence = "Se revisaron los hallazgos de la ronda de seguridad y se definieron \
                    acciones puntuales por servicio. ";
    model.development = Some(sentence.repeat(sentences));
    model
}

/// Commitments with description lengths covering one-liners to full cards.
pub fn commitment_spread_acta() -> ReportModel {
    let mut model = minimal_acta();
    let word = "seguimiento ";
    model.next_commitments = (1..=10)
        .map(|i| Commitment {
            description: word.repeat(i * 4),
            owner: Some("Calidad".into()),
            due: Some("2026-12-01".into()),
            fulfilled: None,
            ai_suggested: i % 3 == 0,
        })
        .collect();
    model
}
