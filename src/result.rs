use std::fmt;

use serde::{Serialize, Serializer};

use crate::analysis::{Analyses, AnalyzerKind};
use crate::validation::Rejection;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detected_type_labels() {
        assert_eq!(DetectedType::Furniture("door".into()).to_string(), "door");
        assert_eq!(DetectedType::NonWoodwork.to_string(), "non-woodwork");
        assert_eq!(DetectedType::Undetermined.to_string(), "undetermined");
        assert_eq!(DetectedType::Invalid.to_string(), "invalid");
        assert_eq!(DetectedType::Error.to_string(), "error");
    }

    #[test]
    fn only_confident_furniture_overrides_baseline() {
        let mut c = Classification::error("boom");
        assert!(!c.overrides_baseline(0.6));

        c.detected_type = DetectedType::Furniture("cabinet".into());
        c.confidence = 0.6;
        assert!(!c.overrides_baseline(0.6));
        c.confidence = 0.61;
        assert!(c.overrides_baseline(0.6));

        c.detected_type = DetectedType::NonWoodwork;
        c.confidence = 0.9;
        assert!(!c.overrides_baseline(0.6));
    }

    #[test]
    fn error_result_carries_generic_remedies() {
        let c = Classification::error("vertex 3 has a non-finite coordinate");
        assert_eq!(c.detected_type, DetectedType::Error);
        assert_eq!(c.confidence, 0.0);
        assert!(c.reason.contains("vertex 3"));
        assert_eq!(c.suggestions, vec!["Check the file format", "Try again"]);
    }

    #[test]
    fn serializes_type_as_plain_label() {
        let c = Classification::error("x");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["detected_type"], "error");
        assert!(json.get("detail").is_none());
    }
}

/// Final label assigned to a component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DetectedType {
    Furniture(String),
    NonWoodwork,
    Undetermined,
    Invalid,
    Error,
}

impl DetectedType {
    /// Counts towards batch validity: everything except `invalid` and `error`.
    pub fn is_valid(&self) -> bool {
        !matches!(self, DetectedType::Invalid | DetectedType::Error)
    }

    pub fn furniture_type(&self) -> Option<&str> {
        match self {
            DetectedType::Furniture(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for DetectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectedType::Furniture(name) => f.write_str(name),
            DetectedType::NonWoodwork => f.write_str("non-woodwork"),
            DetectedType::Undetermined => f.write_str("undetermined"),
            DetectedType::Invalid => f.write_str("invalid"),
            DetectedType::Error => f.write_str("error"),
        }
    }
}

impl Serialize for DetectedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Weighted vote one analyzer gave the winning type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contribution {
    pub analyzer: AnalyzerKind,
    pub score: f64,
}

/// Traceability data: the raw analyses and, when a type won, each signal's share.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Detail {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<Contribution>,
    pub analyses: Analyses,
}

/// Outcome of classifying one component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    pub detected_type: DetectedType,
    pub confidence: f64,
    pub reason: String,
    pub suggestions: Vec<String>,
    pub alternatives: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Detail>,
}

impl Classification {
    pub fn invalid(rejection: Rejection) -> Self {
        Self {
            detected_type: DetectedType::Invalid,
            confidence: 0.0,
            reason: rejection.reason,
            suggestions: rejection.suggestions,
            alternatives: Vec::new(),
            detail: None,
        }
    }

    /// Converts a fault in the analysis of one component into a result.
    pub fn error(message: impl fmt::Display) -> Self {
        Self {
            detected_type: DetectedType::Error,
            confidence: 0.0,
            reason: format!("Analysis error: {}", message),
            suggestions: vec!["Check the file format".to_string(), "Try again".to_string()],
            alternatives: Vec::new(),
            detail: None,
        }
    }

    /// Whether a pricing engine should replace the component's baseline type with
    /// this classification.
    pub fn overrides_baseline(&self, threshold: f64) -> bool {
        matches!(self.detected_type, DetectedType::Furniture(_)) && self.confidence > threshold
    }
}
