use std::cmp::Reverse;

use crate::scoring::{priority_key, Quadrant};
use crate::usecase::UseCase;

/// A use case with its position in the ranking.
#[derive(Debug, Clone, Copy)]
pub struct RankedUseCase<'a> {
    pub rank: usize, // 1-based
    pub use_case: &'a UseCase,
    pub priority_score: f64,
    pub quadrant: Quadrant,
}

/// Order use cases by priority score, highest first.
///
/// The sort is stable: use cases with equal scores keep their input order.
/// Scores are compared as exact integers, never as floats.
pub fn rank_use_cases(use_cases: &[UseCase]) -> Vec<RankedUseCase<'_>> {
    let mut sorted: Vec<&UseCase> = use_cases.iter().collect();

    // Vec::sort_by_key is stable
    sorted.sort_by_key(|u| Reverse(priority_key(u.impact, u.effort)));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, use_case)| RankedUseCase {
            rank: i + 1,
            use_case,
            priority_score: use_case.priority_score(),
            quadrant: use_case.quadrant(),
        })
        .collect()
}
