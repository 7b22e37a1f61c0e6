use serde::{Deserialize, Serialize};
use std::fmt;

/// Scores at or above this value count as "high" on either axis.
pub const HIGH_THRESHOLD: u8 = 5;

const IMPACT_WEIGHT: f64 = 0.7;
const EFFORT_WEIGHT: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quadrant {
    /// High impact, low effort
    #[serde(rename = "Quick Wins")]
    QuickWins,
    /// High impact, high effort
    #[serde(rename = "Strategic Ventures")]
    StrategicVentures,
    /// Low impact, low effort
    #[serde(rename = "Foundation Labs")]
    FoundationLabs,
    /// Low impact, high effort
    #[serde(rename = "Optimization Zone")]
    OptimizationZone,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::QuickWins,
        Quadrant::StrategicVentures,
        Quadrant::FoundationLabs,
        Quadrant::OptimizationZone,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::QuickWins => "Quick Wins",
            Quadrant::StrategicVentures => "Strategic Ventures",
            Quadrant::FoundationLabs => "Foundation Labs",
            Quadrant::OptimizationZone => "Optimization Zone",
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Place an (impact, effort) pair in its quadrant. 5 is always "high".
pub fn classify_quadrant(impact: u8, effort: u8) -> Quadrant {
    let high_impact = impact >= HIGH_THRESHOLD;
    let high_effort = effort >= HIGH_THRESHOLD;
    match (high_impact, high_effort) {
        (true, false) => Quadrant::QuickWins,
        (true, true) => Quadrant::StrategicVentures,
        (false, false) => Quadrant::FoundationLabs,
        (false, true) => Quadrant::OptimizationZone,
    }
}

/// Weighted blend used for ranking: `0.7 * impact + 0.3 * (10 - effort)`.
///
/// Not clamped. With both inputs in [1,10] the result lies in [0.7, 9.7].
pub fn priority_score(impact: u8, effort: u8) -> f64 {
    f64::from(impact) * IMPACT_WEIGHT + (10.0 - f64::from(effort)) * EFFORT_WEIGHT
}

/// The priority score times ten, as an exact integer. Ordering compares this
/// instead of the `f64`, so mathematically equal scores always tie.
pub fn priority_key(impact: u8, effort: u8) -> u32 {
    7 * u32::from(impact) + 3 * u32::from(10u8.saturating_sub(effort))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundary_cases() {
        assert_eq!(classify_quadrant(5, 5), Quadrant::StrategicVentures);
        assert_eq!(classify_quadrant(4, 5), Quadrant::OptimizationZone);
        assert_eq!(classify_quadrant(5, 4), Quadrant::QuickWins);
        assert_eq!(classify_quadrant(4, 4), Quadrant::FoundationLabs);
    }

    #[test]
    fn test_grid_partition() {
        let mut counts = std::collections::HashMap::new();
        for impact in 1..=10u8 {
            for effort in 1..=10u8 {
                let q = classify_quadrant(impact, effort);
                let expected = match (impact >= 5, effort >= 5) {
                    (true, false) => Quadrant::QuickWins,
                    (true, true) => Quadrant::StrategicVentures,
                    (false, false) => Quadrant::FoundationLabs,
                    (false, true) => Quadrant::OptimizationZone,
                };
                assert_eq!(q, expected, "impact={} effort={}", impact, effort);
                *counts.entry(q).or_insert(0) += 1;
            }
        }
        // Low side is 1..=4 (4 values), high side is 5..=10 (6 values)
        assert_eq!(counts[&Quadrant::QuickWins], 24);
        assert_eq!(counts[&Quadrant::StrategicVentures], 36);
        assert_eq!(counts[&Quadrant::FoundationLabs], 16);
        assert_eq!(counts[&Quadrant::OptimizationZone], 24);
    }

    #[test]
    fn test_priority_score_extremes() {
        assert!((priority_score(10, 1) - 9.7).abs() < 1e-9);
        assert!((priority_score(1, 10) - 0.7).abs() < 1e-9);
        assert!((priority_score(5, 5) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_priority_key_matches_score() {
        for impact in 1..=10u8 {
            for effort in 1..=10u8 {
                let key = priority_key(impact, effort);
                assert!((f64::from(key) / 10.0 - priority_score(impact, effort)).abs() < 1e-9);
            }
        }
        // 0.7 + 2.7 and 2.8 + 0.6 are both 3.4
        assert_eq!(priority_key(1, 1), priority_key(4, 8));
    }

    #[test]
    fn test_priority_score_favors_impact() {
        // One point of impact outweighs one point of effort
        assert!(priority_score(6, 6) > priority_score(5, 5));
        assert!(priority_score(6, 5) > priority_score(5, 4));
    }

    #[test]
    fn test_label_roundtrip() {
        for q in Quadrant::ALL {
            let json = serde_json::to_string(&q).unwrap();
            assert_eq!(json, format!("\"{}\"", q.label()));
        }
    }
}
