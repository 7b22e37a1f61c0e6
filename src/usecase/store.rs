use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::types::{UseCase, UseCaseDraft};
use crate::questionnaire::validate_submission;
use crate::scoring::evaluate;

pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("Use case {0} not found")]
    NotFound(u64),

    #[error("Invalid use case: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// The working list of use cases.
///
/// Holds no scoring logic of its own: every add and edit runs the draft
/// through the engine and stores the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UseCaseStore {
    pub version: u32,
    #[serde(default)]
    use_cases: Vec<UseCase>,
}

impl Default for UseCaseStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UseCaseStore {
    pub fn new() -> Self {
        Self {
            version: STORE_VERSION,
            use_cases: Vec::new(),
        }
    }

    /// Use cases in insertion order.
    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn get(&self, id: u64) -> Option<&UseCase> {
        self.use_cases.iter().find(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.use_cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.use_cases.is_empty()
    }

    /// Score a submitted draft and append it. The id is derived from `now`
    /// (milliseconds since the epoch) and bumped past any existing id.
    pub fn add(&mut self, draft: UseCaseDraft, now: DateTime<Utc>) -> Result<&UseCase, StoreError> {
        validate_submission(&draft).map_err(StoreError::Invalid)?;

        let id = self.next_id(now);
        let assessment = evaluate(&draft.answers);
        debug!(id, impact = assessment.impact, effort = assessment.effort, "scored new use case");

        self.use_cases
            .push(UseCase::from_assessment(id, draft, &assessment));
        let index = self.use_cases.len() - 1;
        Ok(&self.use_cases[index])
    }

    /// Replace a use case's details and answers, rescoring from scratch.
    /// The id is kept.
    pub fn edit(&mut self, id: u64, draft: UseCaseDraft) -> Result<&UseCase, StoreError> {
        let index = self
            .use_cases
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        validate_submission(&draft).map_err(StoreError::Invalid)?;

        let assessment = evaluate(&draft.answers);
        debug!(id, impact = assessment.impact, effort = assessment.effort, "rescored use case");

        self.use_cases[index] = UseCase::from_assessment(id, draft, &assessment);
        Ok(&self.use_cases[index])
    }

    pub fn delete(&mut self, id: u64) -> Result<UseCase, StoreError> {
        let index = self
            .use_cases
            .iter()
            .position(|u| u.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.use_cases.remove(index))
    }

    fn next_id(&self, now: DateTime<Utc>) -> u64 {
        let from_clock = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        match self.use_cases.iter().map(|u| u.id).max() {
            Some(max) if from_clock <= max => max + 1,
            _ => from_clock,
        }
    }
}
