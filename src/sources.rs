//! Narrative-generation seam.
//!
//! The engine never talks to a language model itself; a collaborator
//! implementing [`NarrativeSource`] may enrich the model before rendering.
//! Its absence — or an empty answer — simply leaves the AI-analysis section
//! out of the document.

use crate::model::{AiAnalysis, Commitment, MetricsSnapshot, ReportModel};

/// What the narrative collaborator returns for a summarized record.
#[derive(Debug, Clone)]
pub struct NarrativeOutcome {
    pub narrative: String,
    pub metrics: Option<MetricsSnapshot>,
    pub suggested_commitments: Vec<Commitment>,
}

pub trait NarrativeSource {
    /// `None` when the collaborator has nothing to contribute (service not
    /// configured, no evaluation data, ...).
    fn analyze(&self, model: &ReportModel) -> Option<NarrativeOutcome>;
}

/// Merge a collaborator's outcome into the model: attach the analysis and
/// append its proposed commitments, flagged as AI-suggested.
pub fn apply_narrative(model: &mut ReportModel, outcome: NarrativeOutcome) {
    model.analysis = Some(AiAnalysis {
        narrative: outcome.narrative,
        metrics: outcome.metrics,
        model_label: None,
        generated_at: None,
    });
    for commitment in outcome.suggested_commitments {
        model.next_commitments.push(Commitment {
            ai_suggested: true,
            ..commitment
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_marks_commitments_as_suggested() {
        let mut model: ReportModel = serde_json::from_str(
            r#"{"number": 1, "date": "2026-08-04", "objective": "x"}"#,
        )
        .unwrap();
        apply_narrative(
            &mut model,
            NarrativeOutcome {
                narrative: "Mejora significativa".into(),
                metrics: None,
                suggested_commitments: vec![Commitment {
                    description: "Refuerzo mensual".into(),
                    owner: None,
                    due: None,
                    fulfilled: None,
                    ai_suggested: false,
                }],
            },
        );
        assert!(model.analysis.is_some());
        assert!(model.next_commitments[0].ai_suggested);
    }
}
