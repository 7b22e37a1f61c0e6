use super::implementation::ImplementationType;
use crate::questionnaire::{find_question, NOT_RELEVANT};

const FINITE_INPUTS: &[(&str, u8)] = &[("Yes", 3), ("No", 5)];
const ASYNC_RESPONSES: &[(&str, u8)] = &[("Yes", 2), ("No", 4)];
const PERFORMANCE_NEEDS: &[(&str, u8)] = &[("Yes", 5), ("No", 2)];
const SELF_OPERATION: &[(&str, u8)] = &[("Yes", 4), ("No", 2)];
const MODEL_COMPLEXITY: &[(&str, u8)] = &[
    ("Simple (e.g., regression, classification)", 2),
    ("Moderate (e.g., boosted trees, neural networks)", 3),
    ("Complex (e.g., LLMs, computer vision)", 5),
];

/// How an answer to a given question turns into a score.
#[derive(Debug, Clone, Copy)]
pub enum AnswerScale {
    /// Score is the answer's zero-based position in the option list
    Position(&'static [&'static str]),
    /// Score comes from a fixed lookup table, not the option position
    Table(&'static [(&'static str, u8)]),
    /// Answer names an implementation type; score is that type's weight
    Implementation,
}

impl AnswerScale {
    pub fn for_question(question_id: &str) -> Option<Self> {
        match question_id {
            "finiteInputs" => Some(AnswerScale::Table(FINITE_INPUTS)),
            "asyncResponses" => Some(AnswerScale::Table(ASYNC_RESPONSES)),
            "performanceNeeds" => Some(AnswerScale::Table(PERFORMANCE_NEEDS)),
            "selfOperation" => Some(AnswerScale::Table(SELF_OPERATION)),
            "modelComplexity" => Some(AnswerScale::Table(MODEL_COMPLEXITY)),
            "implementationType" => Some(AnswerScale::Implementation),
            other => find_question(other).map(|q| AnswerScale::Position(q.options)),
        }
    }

    /// Score a non-empty answer. Anything not on the scale scores 0.
    pub fn score(&self, answer: &str) -> u8 {
        match self {
            AnswerScale::Position(options) => options
                .iter()
                .position(|o| *o == answer)
                .map(|i| i as u8)
                .unwrap_or(0),
            AnswerScale::Table(table) => table
                .iter()
                .find(|(option, _)| *option == answer)
                .map(|(_, score)| *score)
                .unwrap_or(0),
            AnswerScale::Implementation => ImplementationType::from_name(answer)
                .map(|t| t.score())
                .unwrap_or(0),
        }
    }
}

/// Score one questionnaire answer.
///
/// Absent, empty and "Not relevant" answers score 0, as do unknown
/// questions and options that are not on the question's scale.
pub fn classify_answer(answer: Option<&str>, question_id: &str) -> u8 {
    let answer = match answer {
        Some(a) if !a.is_empty() && a != NOT_RELEVANT => a,
        _ => return 0,
    };

    AnswerScale::for_question(question_id)
        .map(|scale| scale.score(answer))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::QUESTIONS;

    #[test]
    fn test_absent_and_not_relevant_score_zero_everywhere() {
        for q in QUESTIONS {
            assert_eq!(classify_answer(None, q.id), 0, "{}", q.id);
            assert_eq!(classify_answer(Some(""), q.id), 0, "{}", q.id);
            assert_eq!(classify_answer(Some("Not relevant"), q.id), 0, "{}", q.id);
        }
        assert_eq!(classify_answer(None, "implementationType"), 0);
        assert_eq!(classify_answer(Some("Not relevant"), "implementationType"), 0);
    }

    #[test]
    fn test_positional_scores() {
        assert_eq!(classify_answer(Some("Rarely (monthly or less)"), "taskFrequency"), 1);
        assert_eq!(classify_answer(Some("Occasionally (weekly)"), "taskFrequency"), 2);
        assert_eq!(classify_answer(Some("Frequently (daily)"), "taskFrequency"), 3);
        assert_eq!(
            classify_answer(Some("Continuously (multiple times per day)"), "taskFrequency"),
            4
        );
        assert_eq!(classify_answer(Some("7+ sources"), "dataSources"), 4);
    }

    #[test]
    fn test_yes_no_tables_are_not_positional() {
        assert_eq!(classify_answer(Some("Yes"), "finiteInputs"), 3);
        assert_eq!(classify_answer(Some("No"), "finiteInputs"), 5);
        assert_eq!(classify_answer(Some("Yes"), "asyncResponses"), 2);
        assert_eq!(classify_answer(Some("No"), "asyncResponses"), 4);
        assert_eq!(classify_answer(Some("Yes"), "performanceNeeds"), 5);
        assert_eq!(classify_answer(Some("No"), "performanceNeeds"), 2);
        assert_eq!(classify_answer(Some("Yes"), "selfOperation"), 4);
        assert_eq!(classify_answer(Some("No"), "selfOperation"), 2);
    }

    #[test]
    fn test_model_complexity_table() {
        assert_eq!(
            classify_answer(Some("Simple (e.g., regression, classification)"), "modelComplexity"),
            2
        );
        assert_eq!(
            classify_answer(Some("Moderate (e.g., boosted trees, neural networks)"), "modelComplexity"),
            3
        );
        assert_eq!(
            classify_answer(Some("Complex (e.g., LLMs, computer vision)"), "modelComplexity"),
            5
        );
    }

    #[test]
    fn test_implementation_type_answers() {
        assert_eq!(classify_answer(Some("Precompute responses"), "implementationType"), 2);
        assert_eq!(classify_answer(Some("Deploy advanced stack"), "implementationType"), 5);
        assert_eq!(classify_answer(Some("Use managed service"), "implementationType"), 2);
    }

    #[test]
    fn test_unknown_answers_score_zero() {
        assert_eq!(classify_answer(Some("Maybe"), "finiteInputs"), 0);
        assert_eq!(classify_answer(Some("Sometimes"), "taskFrequency"), 0);
        assert_eq!(classify_answer(Some("Yes"), "noSuchQuestion"), 0);
    }

    #[test]
    fn test_option_from_other_question_scores_zero() {
        // Position is looked up in the question's own list only
        assert_eq!(classify_answer(Some("7+ sources"), "taskFrequency"), 0);
    }
}
