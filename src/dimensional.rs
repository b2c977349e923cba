//! Knowledge-base range scoring.
//!
//! Every furniture profile gets a weighted score in `[0, 1]`:
//!
//! | Check | Weight |
//! |---|---|
//! | width, height, depth inside the typical ranges (hits / 3) | 0.4 |
//! | height/width and depth/width inside the proportion ranges (hits / 2) | 0.3 |
//! | area inside the typical range | 0.2 |
//! | volume inside the typical range | 0.1 |
//!
//! Profiles scoring above [`SCORE_THRESHOLD`] are ranked; the best one becomes the
//! verdict and the next two become alternatives.

use itertools::Itertools;

use crate::analysis::{Analysis, Analyzer, AnalyzerKind, Verdict};
use crate::component::Component;
use crate::knowledge::FurnitureProfile;
use crate::rules::Rules;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::RawComponent;
    use crate::knowledge::default_profiles;
    use approx::assert_relative_eq;

    fn component(dims: [f64; 3], area: f64) -> Component {
        Component::from_raw(&RawComponent::with_dimensions("Part", dims, area)).unwrap()
    }

    fn profile(name: &str) -> FurnitureProfile {
        default_profiles()
            .into_iter()
            .find(|p| p.name == name)
            .unwrap()
    }

    #[test]
    fn upper_cabinet_scores_full_marks_as_cabinet() {
        let cabinet = profile("cabinet");
        let score = score_profile(&cabinet, &component([800.0, 600.0, 350.0], 2.5));
        assert_relative_eq!(score.score, 1.0, epsilon = 1e-9);
        assert_eq!(score.passed.len(), 7);
    }

    #[test]
    fn partial_matches_are_weighted() {
        // tall unit: width and depth fit, height does not; depth/width fits; area fits
        let tall = profile("tall-unit");
        let score = score_profile(&tall, &component([800.0, 600.0, 350.0], 2.5));
        assert_relative_eq!(score.score, 2.0 / 3.0 * 0.4 + 0.15 + 0.2, epsilon = 1e-9);
    }

    #[test]
    fn zero_width_gives_zero_proportions() {
        let c = component([0.0, 600.0, 350.0], 0.0);
        let shelf = profile("shelf");
        let score = score_profile(&shelf, &c);
        assert!(!score.passed.iter().any(|p| p.contains("proportion")));
    }

    #[test]
    fn best_profile_wins_with_runner_ups() {
        let analysis = DimensionalAnalyzer.analyze(&component([800.0, 600.0, 350.0], 2.5), Rules::builtin());
        assert_eq!(analysis.verdict, Verdict::Furniture("cabinet".to_string()));
        assert_relative_eq!(analysis.confidence, MAX_CONFIDENCE);
        assert_eq!(analysis.alternatives, vec!["drawer-bank", "tall-unit"]);
        assert!(analysis.reason.starts_with("Compatible dimensions: typical width"));
    }

    #[test]
    fn nothing_above_threshold_is_undetermined() {
        let analysis = DimensionalAnalyzer.analyze(&component([3000.0, 3000.0, 3000.0], 0.0), Rules::builtin());
        assert_eq!(analysis.verdict, Verdict::Undetermined);
        assert_eq!(analysis.confidence, NO_MATCH_CONFIDENCE);
    }
}

pub const DIMENSION_WEIGHT: f64 = 0.4;
pub const PROPORTION_WEIGHT: f64 = 0.3;
pub const AREA_WEIGHT: f64 = 0.2;
pub const VOLUME_WEIGHT: f64 = 0.1;
/// Profiles must score strictly above this to be considered.
pub const SCORE_THRESHOLD: f64 = 0.3;
pub const MAX_CONFIDENCE: f64 = 0.9;
pub const NO_MATCH_CONFIDENCE: f64 = 0.1;
const MAX_ALTERNATIVES: usize = 2;

/// Score of one profile against one component, with the checks that passed.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileScore<'a> {
    pub profile: &'a str,
    pub score: f64,
    pub passed: Vec<&'static str>,
}

/// Scores `component` against a single profile.
pub fn score_profile<'a>(profile: &'a FurnitureProfile, component: &Component) -> ProfileScore<'a> {
    let dims = &component.dimensions;
    let mut passed = Vec::new();

    let mut dim_hits = 0;
    for (label, range, value) in [
        ("typical width", profile.width, dims.width),
        ("typical height", profile.height, dims.height),
        ("typical depth", profile.depth, dims.depth),
    ] {
        if range.contains(value) {
            dim_hits += 1;
            passed.push(label);
        }
    }
    let mut score = (dim_hits as f64 / 3.0) * DIMENSION_WEIGHT;

    let (height_width, depth_width) = if dims.width > 0.0 {
        (dims.height / dims.width, dims.depth / dims.width)
    } else {
        (0.0, 0.0)
    };

    let mut prop_hits = 0;
    if profile.height_width.contains(height_width) {
        prop_hits += 1;
        passed.push("typical height/width proportion");
    }
    if profile.depth_width.contains(depth_width) {
        prop_hits += 1;
        passed.push("typical depth/width proportion");
    }
    score += (prop_hits as f64 / 2.0) * PROPORTION_WEIGHT;

    if profile.area.contains(component.area_m2) {
        score += AREA_WEIGHT;
        passed.push("typical area");
    }

    if let Some(volume) = profile.volume {
        if volume.contains(component.volume_m3) {
            score += VOLUME_WEIGHT;
            passed.push("typical volume");
        }
    }

    ProfileScore {
        profile: &profile.name,
        score,
        passed,
    }
}

/// Scores every knowledge-base profile and keeps the best.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionalAnalyzer;

impl Analyzer for DimensionalAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Dimensional
    }

    fn analyze(&self, component: &Component, rules: &Rules) -> Analysis {
        // stable sort: equal scores keep knowledge-base order
        let ranked: Vec<_> = rules
            .profiles
            .iter()
            .map(|profile| score_profile(profile, component))
            .filter(|s| s.score > SCORE_THRESHOLD)
            .sorted_by(|a, b| b.score.total_cmp(&a.score))
            .collect();

        let Some((best, rest)) = ranked.split_first() else {
            return Analysis::new(
                self.kind(),
                Verdict::Undetermined,
                NO_MATCH_CONFIDENCE,
                "Dimensions not compatible with any known type".to_string(),
            );
        };

        tracing::trace!(
            component = %component.name,
            best = best.profile,
            score = best.score,
            "dimensional ranking"
        );

        Analysis::new(
            self.kind(),
            Verdict::Furniture(best.profile.to_string()),
            best.score.min(MAX_CONFIDENCE),
            format!("Compatible dimensions: {}", best.passed.join(", ")),
        )
        .with_alternatives(
            rest.iter()
                .take(MAX_ALTERNATIVES)
                .map(|s| s.profile.to_string())
                .collect(),
        )
    }
}
