use super::types::{Question, Step, StepKind};

/// Option at index 0 of every question. Always scores 0.
pub const NOT_RELEVANT: &str = "Not relevant";

pub const QUESTIONS: &[Question] = &[
    Question {
        id: "taskFrequency",
        text: "How often is this task performed?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Rarely (monthly or less)",
            "Occasionally (weekly)",
            "Frequently (daily)",
            "Continuously (multiple times per day)",
        ],
        required: true,
    },
    Question {
        id: "employeePercentage",
        text: "What percentage of employees perform this task?",
        hint: None,
        options: &[NOT_RELEVANT, "Less than 10%", "10-30%", "31-60%", "More than 60%"],
        required: true,
    },
    Question {
        id: "timeConsuming",
        text: "On average, how time-consuming is this task?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Quick (< 15 minutes)",
            "Moderate (15-60 minutes)",
            "Lengthy (1-4 hours)",
            "Very time-intensive (> 4 hours)",
        ],
        required: true,
    },
    Question {
        id: "aiImprovement",
        text: "How much would AI improve the quality of the task output?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Minimal improvement",
            "Moderate improvement",
            "Significant improvement",
            "Transformative improvement",
        ],
        required: true,
    },
    Question {
        id: "competitiveAdvantage",
        text: "How much would this AI implementation enhance our competitive advantage?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Minimal impact",
            "Some differentiation",
            "Clear competitive advantage",
            "Industry-leading innovation",
        ],
        required: true,
    },
    Question {
        id: "existingAiTools",
        text: "Have existing AI tools been tried for this task?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Not yet attempted",
            "Attempted with poor results",
            "Attempted with moderate success",
            "Successfully implemented",
        ],
        required: false,
    },
    Question {
        id: "dataSources",
        text: "How many data sources does this task typically involve?",
        hint: None,
        options: &[NOT_RELEVANT, "Single source", "2-3 sources", "4-6 sources", "7+ sources"],
        required: false,
    },
    Question {
        id: "aiInteraction",
        text: "What's the ideal way to interact with the AI for this task?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Simple chat interface",
            "Integrated web/mobile app",
            "API for system integration",
            "Customer-facing AI solution",
        ],
        required: false,
    },
    Question {
        id: "dataSensitivity",
        text: "How sensitive is the data involved in this task?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Public data",
            "Internal, non-sensitive data",
            "Confidential business data",
            "Highly sensitive or regulated data",
        ],
        required: false,
    },
    Question {
        id: "implementationTime",
        text: "Estimated time to implement and deploy the AI solution:",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Quick win (< 1 month)",
            "Short-term (1-3 months)",
            "Medium-term (3-6 months)",
            "Long-term (6+ months)",
        ],
        required: false,
    },
    Question {
        id: "roi",
        text: "Expected return on investment (ROI) timeframe:",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Immediate (< 3 months)",
            "Short-term (3-6 months)",
            "Medium-term (6-12 months)",
            "Long-term (> 12 months)",
        ],
        required: false,
    },
    Question {
        id: "finiteInputs",
        text: "Is there a finite enough set of inputs known in advance?",
        hint: Some("If inputs can be precomputed, like personalized recommendations based on historical data."),
        options: &[NOT_RELEVANT, "No", "Yes"],
        required: true,
    },
    Question {
        id: "asyncResponses",
        text: "Is it ok to return responses asynchronously in minutes?",
        hint: Some("If users can wait minutes for results rather than needing immediate responses."),
        options: &[NOT_RELEVANT, "No", "Yes"],
        required: true,
    },
    Question {
        id: "selfOperation",
        text: "Are you comfortable operating services by yourself?",
        hint: Some("Whether you prefer operating services yourself or using managed solutions."),
        options: &[NOT_RELEVANT, "No", "Yes"],
        required: true,
    },
    Question {
        id: "performanceNeeds",
        text: "Do you require large scale or low latency?",
        hint: Some("If your application requires high throughput (many requests/second) or very low latency."),
        options: &[NOT_RELEVANT, "No", "Yes"],
        required: true,
    },
    Question {
        id: "modelComplexity",
        text: "What is the complexity level of the model needed?",
        hint: None,
        options: &[
            NOT_RELEVANT,
            "Simple (e.g., regression, classification)",
            "Moderate (e.g., boosted trees, neural networks)",
            "Complex (e.g., LLMs, computer vision)",
        ],
        required: true,
    },
];

pub const STEPS: &[Step] = &[
    Step {
        title: "Basic Information",
        intro: None,
        kind: StepKind::Details,
        show_recommendation: false,
    },
    Step {
        title: "Business Impact Assessment",
        intro: None,
        kind: StepKind::Questions(&[
            "taskFrequency",
            "employeePercentage",
            "timeConsuming",
            "aiImprovement",
            "competitiveAdvantage",
            "existingAiTools",
        ]),
        show_recommendation: false,
    },
    Step {
        title: "Deployment Requirements",
        intro: Some(
            "These questions determine the deployment approach: precomputing responses, \
             triggering a workflow, deploying a simple service, deploying an advanced stack, \
             or using a managed service.",
        ),
        kind: StepKind::Questions(&[
            "finiteInputs",
            "asyncResponses",
            "selfOperation",
            "performanceNeeds",
            "modelComplexity",
        ]),
        show_recommendation: false,
    },
    Step {
        title: "Implementation Considerations",
        intro: None,
        kind: StepKind::Questions(&[
            "dataSources",
            "aiInteraction",
            "dataSensitivity",
            "implementationTime",
            "roi",
        ]),
        show_recommendation: true,
    },
];

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_question_starts_with_not_relevant() {
        for q in QUESTIONS {
            assert_eq!(q.options[0], NOT_RELEVANT, "{}", q.id);
        }
    }

    #[test]
    fn test_question_ids_unique() {
        let ids: HashSet<_> = QUESTIONS.iter().map(|q| q.id).collect();
        assert_eq!(ids.len(), QUESTIONS.len());
    }

    #[test]
    fn test_every_question_in_exactly_one_step() {
        let mut seen = Vec::new();
        for step in STEPS {
            for q in step.questions() {
                seen.push(q.id);
            }
        }
        assert_eq!(seen.len(), QUESTIONS.len());
        let unique: HashSet<_> = seen.iter().collect();
        assert_eq!(unique.len(), QUESTIONS.len());
    }

    #[test]
    fn test_scoring_questions_exist_in_catalog() {
        for id in crate::scoring::IMPACT_QUESTIONS
            .iter()
            .chain(crate::scoring::EFFORT_QUESTIONS.iter())
        {
            assert!(find_question(id).is_some(), "missing {}", id);
        }
    }

    #[test]
    fn test_find_question() {
        assert_eq!(find_question("roi").map(|q| q.required), Some(false));
        assert!(find_question("scalability").is_none());
    }
}
