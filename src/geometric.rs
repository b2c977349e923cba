//! Shape-pattern signal.

use crate::analysis::{Analysis, Analyzer, AnalyzerKind, Verdict};
use crate::component::Component;
use crate::patterns::first_match;
use crate::rules::Rules;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::RawComponent;

    fn analyze(dims: [f64; 3]) -> Analysis {
        let raw = RawComponent::with_dimensions("Part", dims, 0.0);
        GeometricAnalyzer.analyze(&Component::from_raw(&raw).unwrap(), Rules::builtin())
    }

    #[test]
    fn flat_panels_read_as_shelf_first() {
        let analysis = analyze([800.0, 18.0, 400.0]);
        assert_eq!(analysis.verdict, Verdict::Furniture("shelf".to_string()));
        assert_eq!(analysis.confidence, PATTERN_CONFIDENCE);
        assert_eq!(analysis.alternatives, vec!["door", "top"]);
        assert!(analysis.reason.contains("very-flat"));
    }

    #[test]
    fn very_flat_always_fires_below_five_percent() {
        for dims in [
            [1000.0, 20.0, 600.0],
            [18.0, 2000.0, 500.0],
            [600.0, 1800.0, 19.0],
            [4000.0, 150.0, 199.0],
        ] {
            let analysis = analyze(dims);
            assert!(analysis.reason.contains("very-flat"), "{:?}", dims);
            let kind = analysis.verdict.furniture_type().unwrap();
            assert!(["shelf", "door", "top"].contains(&kind));
        }
    }

    #[test]
    fn tall_units_are_recognised() {
        let analysis = analyze([600.0, 2200.0, 580.0]);
        assert_eq!(analysis.verdict, Verdict::Furniture("tall-unit".to_string()));
        assert_eq!(analysis.alternatives, vec!["cabinet"]);
    }

    #[test]
    fn no_pattern_is_undetermined() {
        // cube-ish and taller than a counter, shorter than a tall unit, too deep for a wall unit
        let analysis = analyze([600.0, 1200.0, 600.0]);
        assert_eq!(analysis.verdict, Verdict::Undetermined);
        assert_eq!(analysis.confidence, NO_PATTERN_CONFIDENCE);
        assert!(analysis.alternatives.is_empty());
    }
}

pub const PATTERN_CONFIDENCE: f64 = 0.7;
pub const NO_PATTERN_CONFIDENCE: f64 = 0.2;

/// Evaluates the pattern table in declaration order and reports the first match.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometricAnalyzer;

impl Analyzer for GeometricAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Geometric
    }

    fn analyze(&self, component: &Component, rules: &Rules) -> Analysis {
        let best = first_match(&rules.patterns, &component.dimensions)
            .and_then(|p| p.candidates.split_first().map(|split| (p, split)));

        tracing::trace!(
            component = %component.name,
            pattern = best.map(|(p, _)| p.name.as_str()),
            "geometric pattern"
        );

        match best {
            Some((pattern, (primary, rest))) => Analysis::new(
                self.kind(),
                Verdict::Furniture(primary.clone()),
                PATTERN_CONFIDENCE,
                format!("Geometric pattern: {}", pattern.name),
            )
            .with_alternatives(rest.to_vec()),
            None => Analysis::new(
                self.kind(),
                Verdict::Undetermined,
                NO_PATTERN_CONFIDENCE,
                "No geometric pattern identified".to_string(),
            ),
        }
    }
}
