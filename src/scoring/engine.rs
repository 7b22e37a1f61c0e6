use super::factors::classify_answer;
use super::implementation::{determine_implementation_type, ImplementationType};
use super::quadrant::{classify_quadrant, priority_score, Quadrant};
use crate::usecase::Answers;

/// Questions averaged into the impact score, in order.
pub const IMPACT_QUESTIONS: [&str; 8] = [
    "aiImprovement",
    "competitiveAdvantage",
    "employeePercentage",
    "taskFrequency",
    "roi",
    "finiteInputs",
    "asyncResponses",
    "performanceNeeds",
];

/// Questions averaged into the effort score, in order. The recommended
/// implementation type is added as one more term.
pub const EFFORT_QUESTIONS: [&str; 6] = [
    "timeConsuming",
    "dataSources",
    "dataSensitivity",
    "implementationTime",
    "selfOperation",
    "modelComplexity",
];

// Raw scores run 0-4, so the average is scaled onto 0-10.
const SCALE: f64 = 2.5;
const MIN_SCORE: u8 = 1;
const MAX_SCORE: u8 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct FactorContribution {
    pub label: String,          // question id, or "implementationType"
    pub answer: Option<String>, // None when unanswered
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub impact: Vec<FactorContribution>,
    pub effort: Vec<FactorContribution>,
}

/// Everything the engine derives from one answer set.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub impact: u8,
    pub effort: u8,
    pub quadrant: Quadrant,
    pub priority_score: f64,
    pub implementation_type: ImplementationType,
    pub breakdown: ScoreBreakdown,
}

pub fn compute_impact(answers: &Answers) -> u8 {
    let sum: u32 = IMPACT_QUESTIONS
        .iter()
        .map(|id| u32::from(score_of(answers, id)))
        .sum();
    scale_and_clamp(sum, IMPACT_QUESTIONS.len())
}

pub fn compute_effort(answers: &Answers, recommended: ImplementationType) -> u8 {
    let sum: u32 = EFFORT_QUESTIONS
        .iter()
        .map(|id| u32::from(score_of(answers, id)))
        .sum();
    scale_and_clamp(sum + u32::from(recommended.score()), EFFORT_QUESTIONS.len() + 1)
}

/// Run the whole engine over one answer set.
pub fn evaluate(answers: &Answers) -> Assessment {
    let implementation_type = determine_implementation_type(answers);
    let impact = compute_impact(answers);
    let effort = compute_effort(answers, implementation_type);

    let mut effort_factors = contributions(answers, &EFFORT_QUESTIONS);
    effort_factors.push(FactorContribution {
        label: "implementationType".to_string(),
        answer: Some(implementation_type.name().to_string()),
        score: implementation_type.score(),
    });

    Assessment {
        impact,
        effort,
        quadrant: classify_quadrant(impact, effort),
        priority_score: priority_score(impact, effort),
        implementation_type,
        breakdown: ScoreBreakdown {
            impact: contributions(answers, &IMPACT_QUESTIONS),
            effort: effort_factors,
        },
    }
}

fn score_of(answers: &Answers, question_id: &str) -> u8 {
    classify_answer(answers.get(question_id).map(String::as_str), question_id)
}

fn contributions(answers: &Answers, ids: &[&str]) -> Vec<FactorContribution> {
    ids.iter()
        .map(|id| FactorContribution {
            label: id.to_string(),
            answer: answers.get(*id).cloned(),
            score: score_of(answers, id),
        })
        .collect()
}

fn scale_and_clamp(sum: u32, count: usize) -> u8 {
    let scaled = (f64::from(sum) / count as f64 * SCALE).round();
    scaled.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE)) as u8
}
