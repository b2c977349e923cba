//! Hand-off to a pricing engine.
//!
//! Extraction gives every component a cheap baseline type from its name alone.
//! A confident classification replaces that baseline; anything the classifier
//! recognises as non-woodwork is dropped from the quote.

use serde::Serialize;

use crate::batch::BatchReport;
use crate::component::{Component, RawComponent};
use crate::result::{Classification, DetectedType};
use crate::rules::Rules;


/// Baseline label for extraction-level non-woodwork names.
pub const NON_WOODWORK: &str = "non-woodwork";
/// Baseline label when nothing in the name matches.
pub const DEFAULT_BASELINE: &str = "cabinet";

const EXTRACTION_NON_WOODWORK: [&str; 11] = [
    "wall", "parede", "floor", "piso", "ceiling", "teto", "window", "janela", "geladeira",
    "fogao", "pia",
];

/// Where a quote line's type came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Baseline,
    Classifier,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuoteComponent {
    pub name: String,
    pub baseline_type: String,
    pub final_type: String,
    pub origin: Origin,
    pub area_m2: f64,
    pub volume_m3: f64,
    pub classification: Classification,
}

#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub components: Vec<QuoteComponent>,
    pub total_area_m2: f64,
}

/// Name-only type guess made during extraction.
pub fn baseline_type(name: &str, rules: &Rules) -> String {
    let name = name.to_lowercase();
    if let Some(profile) = rules.profiles.iter().find(|p| p.matches_name(&name)) {
        return profile.name.clone();
    }
    if EXTRACTION_NON_WOODWORK.iter().any(|w| name.contains(w)) {
        return NON_WOODWORK.to_string();
    }
    DEFAULT_BASELINE.to_string()
}

/// Merges batch classifications into the extraction records.
///
/// `components` and `report.results` must be in the same order, as returned by
/// [`analyze_batch`](crate::batch::analyze_batch).
pub fn enrich(
    components: &[RawComponent],
    report: &BatchReport,
    rules: &Rules,
    threshold: f64,
) -> Quote {
    let mut lines = Vec::new();

    for (raw, result) in components.iter().zip(&report.results) {
        let classification = &result.classification;
        if classification.detected_type == DetectedType::NonWoodwork {
            tracing::debug!(component = %raw.name, "dropped from quote");
            continue;
        }

        let baseline = baseline_type(&raw.name, rules);
        let (final_type, origin) = if classification.overrides_baseline(threshold) {
            (classification.detected_type.to_string(), Origin::Classifier)
        } else {
            (baseline.clone(), Origin::Baseline)
        };

        let volume_m3 = Component::from_raw(raw)
            .map(|c| c.volume_m3)
            .unwrap_or(0.0);

        lines.push(QuoteComponent {
            name: raw.name.clone(),
            baseline_type: baseline,
            final_type,
            origin,
            area_m2: raw.area_m2,
            volume_m3,
            classification: classification.clone(),
        });
    }

    let total_area_m2 = lines.iter().map(|l| l.area_m2).sum();
    Quote {
        components: lines,
        total_area_m2,
    }
}
