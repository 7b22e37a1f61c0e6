use anyhow::Result;
use std::io::{BufRead, Write};

use super::catalog::STEPS;
use super::types::{Question, Step, StepKind};
use super::validation::validate_step;
use crate::prompt::Prompter;
use crate::scoring::determine_implementation_type;
use crate::usecase::UseCaseDraft;

const BACK: &str = "b";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Navigation {
    Next,
    Back,
}

/// Walk the user through every questionnaire step and return the draft.
///
/// `initial` prefills the answers when editing; pressing enter keeps them.
/// Typing `b` at a question goes back one step. A step does not advance
/// while it is invalid.
pub fn run_questionnaire<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    initial: Option<&UseCaseDraft>,
) -> Result<UseCaseDraft> {
    let mut draft = initial.cloned().unwrap_or_default();
    let mut index = 0;

    while index < STEPS.len() {
        let step = &STEPS[index];
        prompter.say("")?;
        prompter.say(&format!("Step {}/{}: {}", index + 1, STEPS.len(), step.title))?;
        if let Some(intro) = step.intro {
            prompter.say(intro)?;
        }
        if step.show_recommendation {
            let recommended = determine_implementation_type(&draft.answers);
            prompter.say(&format!("Recommended implementation approach: {}", recommended))?;
            prompter.say(&format!("  {}", recommended.description()))?;
        }

        let navigation = match step.kind {
            StepKind::Details => ask_details(prompter, &mut draft)?,
            StepKind::Questions(_) => ask_questions(prompter, step, &mut draft)?,
        };

        if navigation == Navigation::Back {
            index = index.saturating_sub(1);
            continue;
        }

        match validate_step(step, &draft) {
            Ok(()) => index += 1,
            Err(errors) => {
                prompter.say("Please complete this step:")?;
                for error in errors {
                    prompter.say(&format!("  - {}", error))?;
                }
            }
        }
    }

    Ok(draft)
}

fn ask_details<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    draft: &mut UseCaseDraft,
) -> Result<Navigation> {
    draft.name = prompter.ask_with_default("Name", &draft.name)?;
    draft.description = prompter.ask_with_default("Description", &draft.description)?;
    Ok(Navigation::Next)
}

fn ask_questions<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    step: &Step,
    draft: &mut UseCaseDraft,
) -> Result<Navigation> {
    for question in step.questions() {
        if ask_question(prompter, question, draft)? == Navigation::Back {
            return Ok(Navigation::Back);
        }
    }
    Ok(Navigation::Next)
}

fn ask_question<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    question: &Question,
    draft: &mut UseCaseDraft,
) -> Result<Navigation> {
    prompter.say("")?;
    let marker = if question.required { " *" } else { "" };
    prompter.say(&format!("{}{}", question.text, marker))?;
    if let Some(hint) = question.hint {
        prompter.say(&format!("  {}", hint))?;
    }
    for (i, option) in question.options.iter().enumerate() {
        prompter.say(&format!("  {}) {}", i, option))?;
    }

    let current = draft.answers.get(question.id).cloned();
    let current_index = current
        .as_deref()
        .and_then(|c| question.options.iter().position(|o| *o == c));

    loop {
        let message = match current_index {
            Some(i) => format!("Choice [{}]: ", i),
            None => "Choice: ".to_string(),
        };
        let input = prompter.ask(&message)?;

        if input.eq_ignore_ascii_case(BACK) {
            return Ok(Navigation::Back);
        }

        if input.is_empty() {
            if current_index.is_some() || !question.required {
                return Ok(Navigation::Next);
            }
            prompter.say("  This question is required.")?;
            continue;
        }

        match input.parse::<usize>() {
            Ok(i) if i < question.options.len() => {
                draft
                    .answers
                    .insert(question.id.to_string(), question.options[i].to_string());
                return Ok(Navigation::Next);
            }
            _ => prompter.say(&format!(
                "  Enter a number between 0 and {}, or '{}' to go back.",
                question.options.len() - 1,
                BACK
            ))?,
        }
    }
}
