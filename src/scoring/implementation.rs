use serde::{Deserialize, Serialize};
use std::fmt;

use crate::usecase::Answers;

/// Recommended deployment pattern for a use case.
///
/// Each variant carries a fixed effort weight (`score`) that enters the
/// effort average as one extra term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplementationType {
    #[serde(rename = "Precompute responses")]
    PrecomputeResponses,
    #[serde(rename = "Trigger workflow")]
    TriggerWorkflow,
    #[serde(rename = "Deploy simple service")]
    DeploySimpleService,
    #[serde(rename = "Deploy advanced stack")]
    DeployAdvancedStack,
    #[serde(rename = "Use managed service")]
    UseManagedService,
}

impl ImplementationType {
    pub const ALL: [ImplementationType; 5] = [
        ImplementationType::PrecomputeResponses,
        ImplementationType::TriggerWorkflow,
        ImplementationType::DeploySimpleService,
        ImplementationType::DeployAdvancedStack,
        ImplementationType::UseManagedService,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ImplementationType::PrecomputeResponses => "Precompute responses",
            ImplementationType::TriggerWorkflow => "Trigger workflow",
            ImplementationType::DeploySimpleService => "Deploy simple service",
            ImplementationType::DeployAdvancedStack => "Deploy advanced stack",
            ImplementationType::UseManagedService => "Use managed service",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ImplementationType::PrecomputeResponses => {
                "Best when you have a finite set of all inputs. Precompute results and store them in a cache."
            }
            ImplementationType::TriggerWorkflow => {
                "For cases when inputs aren't known in advance but asynchronous responses (in minutes) are acceptable."
            }
            ImplementationType::DeploySimpleService => {
                "For real-time responses with self-operation, without high scale/latency requirements."
            }
            ImplementationType::DeployAdvancedStack => {
                "For complex real-time serving with high scale or low latency requirements, requiring significant engineering."
            }
            ImplementationType::UseManagedService => {
                "When you need real-time responses but don't want to operate services yourself."
            }
        }
    }

    /// Effort contribution of this deployment pattern.
    pub fn score(&self) -> u8 {
        match self {
            ImplementationType::PrecomputeResponses => 2,
            ImplementationType::TriggerWorkflow => 3,
            ImplementationType::DeploySimpleService => 3,
            ImplementationType::DeployAdvancedStack => 5,
            ImplementationType::UseManagedService => 2,
        }
    }

    /// Look up a type by its display name (exact match).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

impl fmt::Display for ImplementationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the deployment pattern for a set of answers.
///
/// This is a priority chain: the first matching rule wins, so
/// `finiteInputs = Yes` beats every later condition.
pub fn determine_implementation_type(answers: &Answers) -> ImplementationType {
    let is = |id: &str, value: &str| answers.get(id).map(String::as_str) == Some(value);

    if is("finiteInputs", "Yes") {
        ImplementationType::PrecomputeResponses
    } else if is("asyncResponses", "Yes") {
        ImplementationType::TriggerWorkflow
    } else if is("selfOperation", "No") {
        ImplementationType::UseManagedService
    } else if is("performanceNeeds", "Yes") {
        ImplementationType::DeployAdvancedStack
    } else {
        ImplementationType::DeploySimpleService
    }
}
