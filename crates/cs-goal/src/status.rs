// status.rs — Goal status taxonomy and band classification.
//
// The status of a goal is recomputed from scratch at every calculation;
// there is no terminal status and any status may follow any other. The
// thresholds that separate the bands are explicit configuration
// (StatusBands), not constants buried in the comparison.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::goal::ComparisonDirection;

/// A goal's classified standing at one calculation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    /// Close enough to the target that the current pace reaches it.
    OnTrack,
    /// Falling behind; reaching the target needs a push.
    AtRisk,
    /// The target is currently satisfied.
    Met,
    /// Too far from the target for the current pace to reach it.
    Missed,
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalStatus::OnTrack => write!(f, "on_track"),
            GoalStatus::AtRisk => write!(f, "at_risk"),
            GoalStatus::Met => write!(f, "met"),
            GoalStatus::Missed => write!(f, "missed"),
        }
    }
}

pub const DEFAULT_ON_TRACK_RATIO: f64 = 0.75;
pub const DEFAULT_AT_RISK_RATIO: f64 = 0.40;
pub const DEFAULT_EXACT_TOLERANCE: f64 = 1e-9;

/// The thresholds separating status bands.
///
/// Ratios are fractions of the target: with the defaults, an at-least goal
/// reads OnTrack from 75% of target upward and AtRisk from 40% upward.
/// Overridable per deployment via `courtside.toml` (see [`crate::config`]).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct StatusBands {
    /// Fraction of target at which an unmet goal still reads OnTrack.
    pub on_track_ratio: f64,

    /// Fraction of target at which an unmet goal reads AtRisk rather
    /// than Missed.
    pub at_risk_ratio: f64,

    /// Absolute slack for `Exact` goals to count as Met.
    pub exact_tolerance: f64,
}

impl Default for StatusBands {
    fn default() -> Self {
        Self {
            on_track_ratio: DEFAULT_ON_TRACK_RATIO,
            at_risk_ratio: DEFAULT_AT_RISK_RATIO,
            exact_tolerance: DEFAULT_EXACT_TOLERANCE,
        }
    }
}

/// Classify an actual value against a target.
///
/// The rules, spelled out because they are the contract consumers see:
///
/// - `AtLeast`: `actual >= target` is Met. Otherwise the ratio
///   `actual / target` decides: `>= on_track_ratio` OnTrack,
///   `>= at_risk_ratio` AtRisk, below that Missed.
/// - `AtMost`: `actual <= target` is Met. Otherwise the overshoot
///   `(actual - target) / target` decides: within `1 - on_track_ratio`
///   AtRisk, beyond that Missed. A blown cap never reads OnTrack.
/// - `Exact`: `|actual - target| <= exact_tolerance` is Met. Otherwise the
///   relative error `|actual - target| / target` decides: within
///   `1 - on_track_ratio` OnTrack, within `1 - at_risk_ratio` AtRisk,
///   beyond that Missed.
///
/// A non-positive target degenerates to the direct comparison: Met when
/// satisfied, Missed otherwise (no ratio is meaningful).
pub fn classify(
    direction: ComparisonDirection,
    actual: f64,
    target: f64,
    bands: &StatusBands,
) -> GoalStatus {
    match direction {
        ComparisonDirection::AtLeast => {
            if actual >= target {
                return GoalStatus::Met;
            }
            if target <= 0.0 {
                return GoalStatus::Missed;
            }
            let ratio = actual / target;
            if ratio >= bands.on_track_ratio {
                GoalStatus::OnTrack
            } else if ratio >= bands.at_risk_ratio {
                GoalStatus::AtRisk
            } else {
                GoalStatus::Missed
            }
        }
        ComparisonDirection::AtMost => {
            if actual <= target {
                return GoalStatus::Met;
            }
            if target <= 0.0 {
                return GoalStatus::Missed;
            }
            let overshoot = (actual - target) / target;
            if overshoot <= 1.0 - bands.on_track_ratio {
                GoalStatus::AtRisk
            } else {
                GoalStatus::Missed
            }
        }
        ComparisonDirection::Exact => {
            let delta = actual - target;
            if delta.abs() <= bands.exact_tolerance {
                return GoalStatus::Met;
            }
            if target <= 0.0 {
                return GoalStatus::Missed;
            }
            let rel_err = delta.abs() / target;
            if rel_err <= 1.0 - bands.on_track_ratio {
                GoalStatus::OnTrack
            } else if rel_err <= 1.0 - bands.at_risk_ratio {
                GoalStatus::AtRisk
            } else {
                GoalStatus::Missed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ComparisonDirection::*;

    fn bands() -> StatusBands {
        StatusBands::default()
    }

    #[test]
    fn at_least_bands() {
        assert_eq!(classify(AtLeast, 55.0, 50.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(AtLeast, 50.0, 50.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(AtLeast, 40.0, 50.0, &bands()), GoalStatus::OnTrack);
        assert_eq!(classify(AtLeast, 25.0, 50.0, &bands()), GoalStatus::AtRisk);
        assert_eq!(classify(AtLeast, 10.0, 50.0, &bands()), GoalStatus::Missed);
    }

    #[test]
    fn at_most_bands() {
        assert_eq!(classify(AtMost, 10.0, 12.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(AtMost, 12.0, 12.0, &bands()), GoalStatus::Met);
        // 14/12 overshoots by ~16.7%, inside the 25% at-risk window.
        assert_eq!(classify(AtMost, 14.0, 12.0, &bands()), GoalStatus::AtRisk);
        assert_eq!(classify(AtMost, 20.0, 12.0, &bands()), GoalStatus::Missed);
    }

    #[test]
    fn at_most_never_reads_on_track_once_exceeded() {
        for actual in [12.1, 13.0, 15.0, 24.0, 120.0] {
            assert_ne!(
                classify(AtMost, actual, 12.0, &bands()),
                GoalStatus::OnTrack,
                "actual={}",
                actual
            );
        }
    }

    #[test]
    fn exact_bands() {
        assert_eq!(classify(Exact, 10.0, 10.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(Exact, 12.0, 10.0, &bands()), GoalStatus::OnTrack);
        assert_eq!(classify(Exact, 15.0, 10.0, &bands()), GoalStatus::AtRisk);
        assert_eq!(classify(Exact, 30.0, 10.0, &bands()), GoalStatus::Missed);
        // Symmetric below the target.
        assert_eq!(classify(Exact, 8.0, 10.0, &bands()), GoalStatus::OnTrack);
    }

    #[test]
    fn non_positive_target_degenerates_to_direct_comparison() {
        assert_eq!(classify(AtLeast, 1.0, 0.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(AtLeast, -1.0, 0.0, &bands()), GoalStatus::Missed);
        assert_eq!(classify(AtMost, 0.0, 0.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(AtMost, 3.0, 0.0, &bands()), GoalStatus::Missed);
        assert_eq!(classify(Exact, 0.0, 0.0, &bands()), GoalStatus::Met);
        assert_eq!(classify(Exact, 1.0, 0.0, &bands()), GoalStatus::Missed);
    }

    #[test]
    fn custom_bands_move_the_boundaries() {
        let strict = StatusBands {
            on_track_ratio: 0.9,
            at_risk_ratio: 0.6,
            exact_tolerance: 0.5,
        };
        // 40/50 = 0.8: OnTrack by default, AtRisk under the strict bands.
        assert_eq!(classify(AtLeast, 40.0, 50.0, &strict), GoalStatus::AtRisk);
        // Exact tolerance of 0.5 admits 10.4 as Met.
        assert_eq!(classify(Exact, 10.4, 10.0, &strict), GoalStatus::Met);
    }

    #[test]
    fn status_display_format() {
        assert_eq!(GoalStatus::OnTrack.to_string(), "on_track");
        assert_eq!(GoalStatus::Met.to_string(), "met");
    }
}
