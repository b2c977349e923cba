//! The complete rule tables consumed by the classifier.
//!
//! [`Rules`] bundles the knowledge base, the shape patterns, the validation bounds and
//! the fusion weights. The built-in tables are created once per process and shared
//! read-only through [`Rules::builtin`]. A full replacement can be loaded from TOML,
//! which lets the tables be tuned without touching analyzer code.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalyzerKind;
use crate::knowledge::{default_profiles, FurnitureProfile, Keywords};
use crate::patterns::{default_patterns, GeometricPattern};
use crate::validation::ValidationRules;


/// Per-signal weights for fusing analyzer confidences.
///
/// The structural weight is carried for completeness but never applied: the
/// structural analyzer does not vote on the furniture type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub geometric: f64,
    pub dimensional: f64,
    pub semantic: f64,
    pub structural: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            geometric: 0.4,
            dimensional: 0.3,
            semantic: 0.2,
            structural: 0.1,
        }
    }
}

impl ConfidenceWeights {
    /// Weight applied when fusing a vote from `kind`, or `None` if it does not vote.
    pub fn voting_weight(&self, kind: AnalyzerKind) -> Option<f64> {
        match kind {
            AnalyzerKind::Semantic => Some(self.semantic),
            AnalyzerKind::Geometric => Some(self.geometric),
            AnalyzerKind::Dimensional => Some(self.dimensional),
            AnalyzerKind::Structural => None,
        }
    }
}

/// Every table the classifier reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub weights: ConfidenceWeights,
    pub validation: ValidationRules,
    pub keywords: Keywords,
    pub profiles: Vec<FurnitureProfile>,
    pub patterns: Vec<GeometricPattern>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            weights: ConfidenceWeights::default(),
            validation: ValidationRules::default(),
            keywords: Keywords::default(),
            profiles: default_profiles(),
            patterns: default_patterns(),
        }
    }
}

static BUILTIN: OnceLock<Rules> = OnceLock::new();

impl Rules {
    /// Process-wide built-in tables, initialised on first use.
    pub fn builtin() -> &'static Rules {
        BUILTIN.get_or_init(Rules::default)
    }

    /// Loads a complete replacement rule set from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read rule tables from {}", path.display()))?;
        let rules = Self::from_toml_str(&text)
            .with_context(|| format!("invalid rule tables in {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            profiles = rules.profiles.len(),
            patterns = rules.patterns.len(),
            "loaded custom rule tables"
        );
        Ok(rules)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let rules: Rules = toml::from_str(text)?;
        rules.check()?;
        Ok(rules)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Rejects tables the analyzers cannot work with.
    pub fn check(&self) -> Result<()> {
        if self.profiles.is_empty() {
            bail!("rule tables must define at least one furniture profile");
        }

        for profile in &self.profiles {
            for (label, range) in profile.ranges() {
                if !range.is_ordered() {
                    bail!(
                        "profile '{}' has an inverted {} range ({} > {})",
                        profile.name,
                        label,
                        range.min,
                        range.max
                    );
                }
            }
        }

        for pattern in &self.patterns {
            if pattern.candidates.is_empty() {
                bail!("pattern '{}' has no candidate types", pattern.name);
            }
        }

        let v = &self.validation;
        for (label, range) in [
            ("dimension", v.dimension),
            ("area", v.area),
            ("volume", v.volume),
            ("density", v.density),
        ] {
            if !range.is_ordered() {
                bail!("validation {} bounds are inverted", label);
            }
        }
        if v.max_aspect_ratio < 1.0 {
            bail!("maximum aspect ratio must be at least 1");
        }

        let w = &self.weights;
        for weight in [w.geometric, w.dimensional, w.semantic, w.structural] {
            if !(0.0..=1.0).contains(&weight) {
                bail!("confidence weights must lie in [0, 1], got {}", weight);
            }
        }

        Ok(())
    }
}
