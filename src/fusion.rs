//! Combines the voting analyses into one decision.
//!
//! Semantic, geometric and dimensional analyses vote for a furniture type with
//! `confidence * weight`. Votes for the same type add up. The type with the highest
//! total wins; ties go to the type that received its first vote earliest, in the
//! order semantic, geometric, dimensional. A semantic non-woodwork verdict
//! overrides everything. The structural analysis is attached for traceability only.

use crate::analysis::{Analyses, Verdict};
use crate::result::{Classification, Contribution, Detail, DetectedType};
use crate::rules::ConfidenceWeights;


pub const MAX_CONFIDENCE: f64 = 0.95;
pub const UNDETERMINED_CONFIDENCE: f64 = 0.2;
const LOW_CONFIDENCE: f64 = 0.5;
const MODERATE_CONFIDENCE: f64 = 0.7;
const MAX_ALTERNATIVES: usize = 2;

/// Votes collected for one furniture type.
#[derive(Debug, Clone)]
struct Candidate {
    name: String,
    total: f64,
    contributions: Vec<Contribution>,
    reasons: Vec<String>,
}

/// Fuses the four analyses of a valid component into its classification.
pub fn fuse(analyses: Analyses, weights: &ConfidenceWeights) -> Classification {
    if analyses.semantic.verdict == Verdict::NonWoodwork {
        return Classification {
            detected_type: DetectedType::NonWoodwork,
            confidence: analyses.semantic.confidence,
            reason: analyses.semantic.reason.clone(),
            suggestions: vec![
                "Filter out this element".to_string(),
                "Do not include it in the quote".to_string(),
            ],
            alternatives: Vec::new(),
            detail: Some(Detail {
                contributions: Vec::new(),
                analyses,
            }),
        };
    }

    // insertion order doubles as the tie-break
    let mut candidates: Vec<Candidate> = Vec::new();
    for analysis in analyses.voting() {
        let (Some(name), Some(weight)) = (
            analysis.verdict.furniture_type(),
            weights.voting_weight(analysis.kind),
        ) else {
            continue;
        };

        let score = analysis.confidence * weight;
        let index = match candidates.iter().position(|c| c.name == name) {
            Some(index) => index,
            None => {
                candidates.push(Candidate {
                    name: name.to_string(),
                    total: 0.0,
                    contributions: Vec::new(),
                    reasons: Vec::new(),
                });
                candidates.len() - 1
            }
        };
        let candidate = &mut candidates[index];
        candidate.total += score;
        candidate.contributions.push(Contribution {
            analyzer: analysis.kind,
            score,
        });
        candidate
            .reasons
            .push(format!("{}: {}", analysis.kind, analysis.reason));
    }

    // stable sort keeps first-inserted candidates ahead on equal totals
    candidates.sort_by(|a, b| b.total.total_cmp(&a.total));
    let mut ranked = candidates.into_iter();
    let Some(best) = ranked.next() else {
        return Classification {
            detected_type: DetectedType::Undetermined,
            confidence: UNDETERMINED_CONFIDENCE,
            reason: "Could not classify confidently".to_string(),
            suggestions: vec![
                "Check the object name".to_string(),
                "Check the dimensions".to_string(),
                "Classify manually".to_string(),
            ],
            alternatives: Vec::new(),
            detail: Some(Detail {
                contributions: Vec::new(),
                analyses,
            }),
        };
    };
    let alternatives: Vec<String> = ranked.take(MAX_ALTERNATIVES).map(|c| c.name).collect();

    let confidence = round3(best.total.min(MAX_CONFIDENCE));
    let mut suggestions = Vec::new();
    if confidence < LOW_CONFIDENCE {
        suggestions.push("Low confidence - verify manually".to_string());
    }
    if confidence < MODERATE_CONFIDENCE {
        suggestions.push("Consider an alternative classification".to_string());
    }

    tracing::debug!(
        detected = %best.name,
        confidence,
        alternatives = ?alternatives,
        "fused classification"
    );

    Classification {
        detected_type: DetectedType::Furniture(best.name),
        confidence,
        reason: best.reasons.join("; "),
        suggestions,
        alternatives,
        detail: Some(Detail {
            contributions: best.contributions,
            analyses,
        }),
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
