//! Name-based signal.

use crate::analysis::{Analysis, Analyzer, AnalyzerKind, Verdict};
use crate::component::Component;
use crate::rules::Rules;


pub const NON_WOODWORK_CONFIDENCE: f64 = 0.9;
pub const TYPE_CONFIDENCE: f64 = 0.8;
pub const GENERIC_CONFIDENCE: f64 = 0.5;
pub const UNDETERMINED_CONFIDENCE: f64 = 0.1;
/// Type assumed for names that read as woodwork without naming a specific piece.
pub const DEFAULT_TYPE: &str = "cabinet";

/// Matches the case-folded component name against the keyword tables.
///
/// Priority: non-woodwork or appliance keywords, then the first profile whose
/// keywords match, then generic woodwork words, then nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticAnalyzer;

impl Analyzer for SemanticAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Semantic
    }

    fn analyze(&self, component: &Component, rules: &Rules) -> Analysis {
        let name = component.name.to_lowercase();
        let kind = self.kind();

        if rules.keywords.is_non_woodwork(&name) {
            return Analysis::new(
                kind,
                Verdict::NonWoodwork,
                NON_WOODWORK_CONFIDENCE,
                "Name indicates a non-woodwork element".to_string(),
            );
        }

        if let Some(profile) = rules.profiles.iter().find(|p| p.matches_name(&name)) {
            return Analysis::new(
                kind,
                Verdict::Furniture(profile.name.clone()),
                TYPE_CONFIDENCE,
                format!("Name indicates {}", profile.name),
            );
        }

        if rules.keywords.is_woodwork(&name) {
            return Analysis::new(
                kind,
                Verdict::Furniture(DEFAULT_TYPE.to_string()),
                GENERIC_CONFIDENCE,
                "Name indicates generic woodwork".to_string(),
            );
        }

        Analysis::new(
            kind,
            Verdict::Undetermined,
            UNDETERMINED_CONFIDENCE,
            "Name is inconclusive".to_string(),
        )
    }
}
