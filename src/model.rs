//! Report model – the fully resolved record a render call consumes.
//!
//! Everything here is plain data handed over by the owning services
//! (record store, evaluation aggregator, narrative generator). The engine
//! never fetches anything itself; the sequence number is assigned by the
//! record store at creation time, never here.

use serde::{Deserialize, Serialize};

/// Root value object for one document instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportModel {
    /// Sequence number, unique and monotonically assigned by the owner.
    pub number: u32,
    /// Pre-formatted date label (e.g. "martes, 4 de agosto de 2026").
    pub date: String,
    #[serde(default)]
    pub meeting_kinds: Vec<MeetingKind>,
    /// Free-text qualifier when `meeting_kinds` contains [`MeetingKind::Other`].
    #[serde(default)]
    pub kind_other: Option<String>,
    pub objective: String,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    /// Narrative meeting-development body. May carry markup tags from the
    /// authoring editor; they are stripped before layout.
    #[serde(default)]
    pub development: Option<String>,
    #[serde(default)]
    pub training: Option<TrainingInfo>,
    #[serde(default)]
    pub attendees: Vec<Attendee>,
    #[serde(default)]
    pub evaluations: Vec<EvaluationResult>,
    #[serde(default)]
    pub prior_commitments: Vec<Commitment>,
    #[serde(default)]
    pub next_commitments: Vec<Commitment>,
    /// AI adherence analysis; absence omits that section entirely.
    #[serde(default)]
    pub analysis: Option<AiAnalysis>,
    #[serde(default)]
    pub organization: Option<OrgIdentity>,
}

impl ReportModel {
    /// Organization display name for headers and footers.
    pub fn org_name(&self) -> &str {
        self.organization
            .as_ref()
            .map(|o| o.name.as_str())
            .unwrap_or("Acta de Reunión")
    }
}

/// Meeting classification tags, matching the record store's enum values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingKind {
    Comite,
    Auditoria,
    ReunionInterna,
    Capacitacion,
    ReunionPersonal,
    JuntaDirectiva,
    ReunionClienteProveedor,
    VisitaEntesReguladores,
    Otro,
}

impl MeetingKind {
    pub fn label(&self) -> &'static str {
        match self {
            MeetingKind::Comite => "Comité",
            MeetingKind::Auditoria => "Auditoría",
            MeetingKind::ReunionInterna => "Reunión interna",
            MeetingKind::Capacitacion => "Capacitación",
            MeetingKind::ReunionPersonal => "Reunión Personal",
            MeetingKind::JuntaDirectiva => "Junta Directiva",
            MeetingKind::ReunionClienteProveedor => "Reunión con cliente y/o proveedores",
            MeetingKind::VisitaEntesReguladores => "Visita entes reguladores",
            MeetingKind::Otro => "Otro",
        }
    }
}

/// Training sub-record for session-linked records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingInfo {
    pub topic: String,
    #[serde(default)]
    pub activity: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Signature image as a base64 data URI; a text placeholder is drawn
    /// when absent or undecodable.
    #[serde(default)]
    pub signature: Option<String>,
}

/// Per-participant pre/post evaluation percentages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub participant: String,
    #[serde(default)]
    pub pre_pct: Option<u32>,
    #[serde(default)]
    pub post_pct: Option<u32>,
}

impl EvaluationResult {
    /// Post-minus-pre improvement delta; `None` until both tests exist.
    pub fn improvement(&self) -> Option<i32> {
        match (self.pre_pct, self.post_pct) {
            (Some(pre), Some(post)) => Some(post as i32 - pre as i32),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commitment {
    pub description: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub due: Option<String>,
    /// Fulfillment verdict for prior-record commitments ("Sí"/"No"/"Parcial").
    #[serde(default)]
    pub fulfilled: Option<String>,
    /// Set on commitments proposed by the narrative generator.
    #[serde(default)]
    pub ai_suggested: bool,
}

/// Output of the narrative-generation collaborator, stored on the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiAnalysis {
    pub narrative: String,
    #[serde(default)]
    pub metrics: Option<MetricsSnapshot>,
    /// Model label shown in the analysis metadata line.
    #[serde(default)]
    pub model_label: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

/// Aggregated evaluation metrics backing the stat cards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    #[serde(default)]
    pub adherence_level: Option<String>,
    pub pre_avg: u32,
    pub post_avg: u32,
    pub improvement_pct: i32,
    pub participants: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgIdentity {
    pub name: String,
    #[serde(default)]
    pub tax_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn improvement_needs_both_tests() {
        let mut r = EvaluationResult {
            participant: "x".into(),
            pre_pct: Some(40),
            post_pct: None,
        };
        assert_eq!(r.improvement(), None);
        r.post_pct = Some(70);
        assert_eq!(r.improvement(), Some(30));
        r.pre_pct = Some(90);
        assert_eq!(r.improvement(), Some(-20));
    }

    #[test]
    fn meeting_kind_roundtrip() {
        let json = "\"CAPACITACION\"";
        let kind: MeetingKind = serde_json::from_str(json).unwrap();
        assert_eq!(kind, MeetingKind::Capacitacion);
        assert_eq!(kind.label(), "Capacitación");
        assert_eq!(serde_json::to_string(&kind).unwrap(), json);
    }

    #[test]
    fn minimal_model_deserializes() {
        let json = r#"{"number": 7, "date": "2026-08-04", "objective": "Revisión"}"#;
        let model: ReportModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.number, 7);
        assert!(model.attendees.is_empty());
        assert!(model.analysis.is_none());
        assert_eq!(model.org_name(), "Acta de Reunión");
    }
}
