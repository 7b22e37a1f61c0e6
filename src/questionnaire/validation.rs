use super::catalog::{find_question, NOT_RELEVANT, STEPS};
use super::types::{Step, StepKind};
use crate::scoring::ImplementationType;
use crate::usecase::UseCaseDraft;

/// Answer key carrying the derived deployment pattern. Exported answer sets
/// include it; it is recomputed on every submission, so only its value is checked.
const IMPLEMENTATION_TYPE_KEY: &str = "implementationType";

/// Check one questionnaire step. The step cannot advance while this fails.
/// Returns all validation errors at once (not just the first).
pub fn validate_step(step: &Step, draft: &UseCaseDraft) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    match step.kind {
        StepKind::Details => {
            if draft.name.trim().is_empty() {
                errors.push("name: must not be empty".to_string());
            }
            if draft.description.trim().is_empty() {
                errors.push("description: must not be empty".to_string());
            }
        }
        StepKind::Questions(_) => {
            for question in step.questions().filter(|q| q.required) {
                let answered = draft
                    .answers
                    .get(question.id)
                    .is_some_and(|a| !a.is_empty());
                if !answered {
                    errors.push(format!("answers.{}: required", question.id));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check a draft before it is scored and stored.
///
/// Every step must pass, and every supplied answer must name a known
/// question and one of that question's options.
pub fn validate_submission(draft: &UseCaseDraft) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for step in STEPS {
        if let Err(step_errors) = validate_step(step, draft) {
            errors.extend(step_errors);
        }
    }

    for (id, answer) in &draft.answers {
        if id == IMPLEMENTATION_TYPE_KEY {
            if !answer.is_empty()
                && answer != NOT_RELEVANT
                && ImplementationType::from_name(answer).is_none()
            {
                errors.push(format!("answers.{}: invalid option '{}'", id, answer));
            }
            continue;
        }
        match find_question(id) {
            None => errors.push(format!("answers.{}: unknown question", id)),
            Some(question) => {
                if !answer.is_empty() && !question.has_option(answer) {
                    errors.push(format!(
                        "answers.{}: invalid option '{}'",
                        id, answer
                    ));
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
