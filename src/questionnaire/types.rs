use super::catalog::find_question;

/// One multiple-choice question. Option index 0 is always "Not relevant";
/// the remaining positions express increasing magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub hint: Option<&'static str>,
    pub options: &'static [&'static str],
    pub required: bool,
}

impl Question {
    pub fn has_option(&self, option: &str) -> bool {
        self.options.contains(&option)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Free-text name and description
    Details,
    /// Question ids answered on this step
    Questions(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub title: &'static str,
    pub intro: Option<&'static str>,
    pub kind: StepKind,
    /// Show the current implementation recommendation before this step
    pub show_recommendation: bool,
}

impl Step {
    pub fn questions(&self) -> impl Iterator<Item = &'static Question> {
        let ids: &'static [&'static str] = match self.kind {
            StepKind::Details => &[],
            StepKind::Questions(ids) => ids,
        };
        ids.iter().filter_map(|id| find_question(id))
    }
}
