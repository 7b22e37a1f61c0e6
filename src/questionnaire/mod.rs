pub mod catalog;
pub mod interactive;
pub mod types;
pub mod validation;

pub use catalog::{find_question, NOT_RELEVANT, QUESTIONS, STEPS};
pub use interactive::run_questionnaire;
pub use types::{Question, Step, StepKind};
pub use validation::{validate_step, validate_submission};
