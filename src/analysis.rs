//! The analyzer capability shared by the four independent signals.
//!
//! Every analyzer maps a [`Component`] to an [`Analysis`]: a verdict, a confidence in
//! `[0, 1]`, a human-readable reason and optional alternatives. Analyzers never look
//! at each other's output, so they can run in any order; the fusion engine reads them
//! back in the fixed order of [`ANALYZERS`].
//!
//! # Signals
//!
//! - [`SemanticAnalyzer`](crate::semantic::SemanticAnalyzer): keywords in the object name
//! - [`GeometricAnalyzer`](crate::geometric::GeometricAnalyzer): shape patterns
//! - [`DimensionalAnalyzer`](crate::dimensional::DimensionalAnalyzer): knowledge-base range scoring
//! - [`StructuralAnalyzer`](crate::structural::StructuralAnalyzer): mesh complexity (diagnostic only)

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::dimensional::DimensionalAnalyzer;
use crate::geometric::GeometricAnalyzer;
use crate::rules::Rules;
use crate::semantic::SemanticAnalyzer;
use crate::structural::StructuralAnalyzer;

/// Which signal produced an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    Semantic,
    Geometric,
    Dimensional,
    Structural,
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnalyzerKind::Semantic => "semantic",
            AnalyzerKind::Geometric => "geometric",
            AnalyzerKind::Dimensional => "dimensional",
            AnalyzerKind::Structural => "structural",
        };
        f.write_str(name)
    }
}

/// Mesh complexity bucket reported by the structural analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    Medium,
    Complex,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// What one analyzer concluded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "type", rename_all = "kebab-case")]
pub enum Verdict {
    /// A furniture type name, usually one of the knowledge-base profiles.
    Furniture(String),
    NonWoodwork,
    Undetermined,
    /// Structural descriptor; never a furniture type.
    Structure(Complexity),
}

impl Verdict {
    /// The furniture type this verdict votes for, if any.
    pub fn furniture_type(&self) -> Option<&str> {
        match self {
            Verdict::Furniture(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Furniture(name) => f.write_str(name),
            Verdict::NonWoodwork => f.write_str("non-woodwork"),
            Verdict::Undetermined => f.write_str("undetermined"),
            Verdict::Structure(complexity) => write!(f, "{}", complexity),
        }
    }
}

/// Output of a single analyzer for a single component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub kind: AnalyzerKind,
    pub verdict: Verdict,
    pub confidence: f64,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl Analysis {
    pub fn new(kind: AnalyzerKind, verdict: Verdict, confidence: f64, reason: String) -> Self {
        Self {
            kind,
            verdict,
            confidence,
            reason,
            alternatives: Vec::new(),
        }
    }

    pub fn with_alternatives(mut self, alternatives: Vec<String>) -> Self {
        self.alternatives = alternatives;
        self
    }
}

/// A single independent classification signal.
pub trait Analyzer: Sync {
    fn kind(&self) -> AnalyzerKind;

    fn analyze(&self, component: &Component, rules: &Rules) -> Analysis;
}

/// The analyzers in fusion order: semantic, geometric, dimensional, structural.
pub const ANALYZERS: [&dyn Analyzer; 4] = [
    &SemanticAnalyzer,
    &GeometricAnalyzer,
    &DimensionalAnalyzer,
    &StructuralAnalyzer,
];

/// The four analyses of one component, kept in [`ANALYZERS`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analyses {
    pub semantic: Analysis,
    pub geometric: Analysis,
    pub dimensional: Analysis,
    pub structural: Analysis,
}

impl Analyses {
    /// Runs every analyzer over `component`.
    pub fn run(component: &Component, rules: &Rules) -> Self {
        let [semantic, geometric, dimensional, structural] = ANALYZERS.map(|analyzer| {
            let analysis = analyzer.analyze(component, rules);
            tracing::debug!(
                component = %component.name,
                analyzer = %analysis.kind,
                verdict = %analysis.verdict,
                confidence = analysis.confidence,
                "analysis"
            );
            analysis
        });
        Self {
            semantic,
            geometric,
            dimensional,
            structural,
        }
    }

    /// The analyses allowed to vote on the furniture type, in tie-break order.
    pub fn voting(&self) -> [&Analysis; 3] {
        [&self.semantic, &self.geometric, &self.dimensional]
    }
}
