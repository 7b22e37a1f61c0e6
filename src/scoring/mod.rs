pub mod engine;
pub mod factors;
pub mod implementation;
pub mod quadrant;

pub use engine::{
    compute_effort, compute_impact, evaluate, Assessment, FactorContribution, ScoreBreakdown,
    EFFORT_QUESTIONS, IMPACT_QUESTIONS,
};
pub use factors::{classify_answer, AnswerScale};
pub use implementation::{determine_implementation_type, ImplementationType};
pub use quadrant::{classify_quadrant, priority_key, priority_score, Quadrant, HIGH_THRESHOLD};
