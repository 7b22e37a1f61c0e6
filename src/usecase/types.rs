use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::scoring::{classify_quadrant, priority_score, Assessment, ImplementationType, Quadrant};

/// Question id -> selected option.
pub type Answers = BTreeMap<String, String>;

/// A scored use case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCase {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub impact: u8,
    pub effort: u8,
    #[serde(default)]
    pub answers: Answers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_type: Option<ImplementationType>,
}

impl UseCase {
    pub fn from_assessment(id: u64, draft: UseCaseDraft, assessment: &Assessment) -> Self {
        Self {
            id,
            name: draft.name.trim().to_string(),
            description: draft.description.trim().to_string(),
            impact: assessment.impact,
            effort: assessment.effort,
            answers: draft.answers,
            implementation_type: Some(assessment.implementation_type),
        }
    }

    pub fn quadrant(&self) -> Quadrant {
        classify_quadrant(self.impact, self.effort)
    }

    pub fn priority_score(&self) -> f64 {
        priority_score(self.impact, self.effort)
    }

    /// Questionnaire input that would reproduce this use case.
    pub fn to_draft(&self) -> UseCaseDraft {
        UseCaseDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            answers: self.answers.clone(),
        }
    }
}

/// Questionnaire output before scoring.
///
/// Example YAML (for `add --from`):
/// ```yaml
/// name: Ticket triage
/// description: Route incoming support tickets
/// answers:
///   taskFrequency: Frequently (daily)
///   finiteInputs: "No"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UseCaseDraft {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub answers: Answers,
}
