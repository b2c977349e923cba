//! Batch classification and model-level statistics.
//!
//! Each component is classified independently, optionally in parallel with rayon.
//! Results always come back in input order. Statistics, insights and
//! recommendations are derived from the finished result set and are advisory only:
//! they never feed back into any classification.
//!
//! - [`analyze_batch`]: classify a list of components and summarise it
//! - [`BatchStats`]: counts, type frequencies and confidence figures over valid results
//! - [`insights`] / [`recommendations`]: plain-text observations about the model

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::Classifier;
use crate::component::RawComponent;
use crate::result::{Classification, DetectedType};


const EXCELLENT_VALIDITY: f64 = 0.9;
const GOOD_VALIDITY: f64 = 0.7;
const WELL_PREPARED: f64 = 0.8;
const MIXED: f64 = 0.5;
const HIGH_CONFIDENCE: f64 = 0.8;
const MODERATE_CONFIDENCE: f64 = 0.6;
const LOW_CONFIDENCE: f64 = 0.5;
const UNDETERMINED_SHARE: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    pub parallel: bool,
    pub progress: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            progress: false,
        }
    }
}

/// Classification of one component in a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentResult {
    pub name: String,
    #[serde(flatten)]
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub name: String,
    pub count: usize,
}

/// Model-level figures. Confidence figures cover valid results only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    pub total: usize,
    pub valid: usize,
    pub woodwork: usize,
    pub non_woodwork: usize,
    pub undetermined: usize,
    /// Furniture type frequencies in first-seen order.
    pub type_counts: Vec<TypeCount>,
    pub mean_confidence: f64,
    pub min_confidence: f64,
    pub max_confidence: f64,
    pub high_confidence: usize,
    pub low_confidence: usize,
}

impl BatchStats {
    pub fn from_results<'a>(results: impl Iterator<Item = &'a Classification>) -> Self {
        let mut stats = Self {
            total: 0,
            valid: 0,
            woodwork: 0,
            non_woodwork: 0,
            undetermined: 0,
            type_counts: Vec::new(),
            mean_confidence: 0.0,
            min_confidence: 0.0,
            max_confidence: 0.0,
            high_confidence: 0,
            low_confidence: 0,
        };
        let mut confidences = Vec::new();

        for result in results {
            stats.total += 1;
            if !result.detected_type.is_valid() {
                continue;
            }
            stats.valid += 1;
            confidences.push(result.confidence);

            match &result.detected_type {
                DetectedType::NonWoodwork => stats.non_woodwork += 1,
                DetectedType::Undetermined => stats.undetermined += 1,
                DetectedType::Furniture(name) => {
                    stats.woodwork += 1;
                    match stats.type_counts.iter_mut().find(|t| &t.name == name) {
                        Some(entry) => entry.count += 1,
                        None => stats.type_counts.push(TypeCount {
                            name: name.clone(),
                            count: 1,
                        }),
                    }
                }
                DetectedType::Invalid | DetectedType::Error => {}
            }
        }

        if !confidences.is_empty() {
            stats.mean_confidence = confidences.iter().sum::<f64>() / confidences.len() as f64;
            stats.min_confidence = confidences.iter().copied().fold(f64::INFINITY, f64::min);
            stats.max_confidence = confidences.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            stats.high_confidence = confidences.iter().filter(|&&c| c > HIGH_CONFIDENCE).count();
            stats.low_confidence = confidences.iter().filter(|&&c| c < LOW_CONFIDENCE).count();
        }

        stats
    }

    /// Share of components that could be analysed, if there were any.
    pub fn validity_ratio(&self) -> Option<f64> {
        (self.total > 0).then(|| self.valid as f64 / self.total as f64)
    }

    /// Share of valid components classified as a furniture type.
    pub fn woodwork_ratio(&self) -> Option<f64> {
        (self.valid > 0).then(|| self.woodwork as f64 / self.valid as f64)
    }

    /// The most frequent furniture type; ties go to the first seen.
    pub fn most_common_type(&self) -> Option<&TypeCount> {
        self.type_counts
            .iter()
            .fold(None, |best: Option<&TypeCount>, t| match best {
                Some(b) if b.count >= t.count => Some(b),
                _ => Some(t),
            })
    }
}

/// Everything produced for one batch.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub results: Vec<ComponentResult>,
    pub stats: BatchStats,
    pub insights: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Classifies every component and summarises the batch.
pub fn analyze_batch(
    classifier: &Classifier,
    components: &[RawComponent],
    options: &BatchOptions,
) -> BatchReport {
    let start = Instant::now();
    tracing::info!(
        components = components.len(),
        parallel = options.parallel,
        "classifying batch"
    );

    let pb = if options.progress {
        let pb = ProgressBar::new(components.len() as u64);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {bar:40.green/blue} {pos:>5}/{len:5} {msg}",
        ) {
            pb.set_style(style.progress_chars("█▇▆▅▄▃▂▁"));
        }
        pb.set_message("component".to_string());
        pb
    } else {
        ProgressBar::hidden()
    };

    let classify = |raw: &RawComponent| {
        let classification = classifier.classify(raw);
        pb.inc(1);
        ComponentResult {
            name: raw.name.clone(),
            classification,
        }
    };

    // collect on an indexed parallel iterator keeps input order
    let results: Vec<ComponentResult> = if options.parallel {
        components.par_iter().map(classify).collect()
    } else {
        components.iter().map(classify).collect()
    };
    pb.finish_and_clear();

    let stats = BatchStats::from_results(results.iter().map(|r| &r.classification));
    let insights = insights(&stats);
    let recommendations = recommendations(&stats);

    tracing::info!(
        valid = stats.valid,
        woodwork = stats.woodwork,
        elapsed = ?start.elapsed(),
        "batch classified"
    );

    BatchReport {
        results,
        stats,
        insights,
        recommendations,
    }
}

/// Plain-text observations about validity, woodwork share, confidence and the
/// most common type.
pub fn insights(stats: &BatchStats) -> Vec<String> {
    let mut insights = Vec::new();

    if let Some(ratio) = stats.validity_ratio() {
        let pct = ratio * 100.0;
        insights.push(if ratio > EXCELLENT_VALIDITY {
            format!("Excellent quality: {:.1}% of components are valid", pct)
        } else if ratio > GOOD_VALIDITY {
            format!("Good quality: {:.1}% of components are valid", pct)
        } else {
            format!("Low quality: only {:.1}% of components are valid", pct)
        });
    }

    if let Some(ratio) = stats.woodwork_ratio() {
        let pct = ratio * 100.0;
        insights.push(if ratio > WELL_PREPARED {
            format!("Well prepared file: {:.1}% is woodwork", pct)
        } else if ratio > MIXED {
            format!("Mixed file: {:.1}% is woodwork", pct)
        } else {
            format!("Many non-woodwork elements: only {:.1}% is woodwork", pct)
        });
    }

    let mean = stats.mean_confidence;
    insights.push(if mean > HIGH_CONFIDENCE {
        format!("High confidence: {:.1}% on average", mean * 100.0)
    } else if mean > MODERATE_CONFIDENCE {
        format!("Moderate confidence: {:.1}% on average", mean * 100.0)
    } else {
        format!("Low confidence: {:.1}% on average", mean * 100.0)
    });

    if let Some(most) = stats.most_common_type() {
        insights.push(format!(
            "Most common type: {} ({} occurrences)",
            most.name, most.count
        ));
    }

    insights
}

/// Advice for improving the model before the next run.
pub fn recommendations(stats: &BatchStats) -> Vec<String> {
    let mut recs: Vec<&str> = Vec::new();

    if stats.validity_ratio().is_some_and(|r| r < GOOD_VALIDITY) {
        recs.extend(["Improve preparation of the 3D file", "Check scale and units"]);
    }
    if stats.woodwork_ratio().is_some_and(|r| r < MIXED) {
        recs.extend([
            "Remove non-woodwork elements from the model",
            "Keep only furniture and wooden components",
        ]);
    }
    if stats.mean_confidence < MODERATE_CONFIDENCE {
        recs.extend([
            "Use more descriptive object names",
            "Check that dimensions are realistic",
        ]);
    }
    if stats.undetermined as f64 > stats.woodwork as f64 * UNDETERMINED_SHARE {
        recs.extend([
            "Review undetermined objects manually",
            "Add tags or groups to the model",
        ]);
    }

    recs.into_iter().map(String::from).collect()
}
