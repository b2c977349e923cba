//! Shape patterns: named predicates over a bounding box that each imply a short,
//! ordered list of candidate furniture types.
//!
//! Table order matters. The geometric analyzer takes the first pattern that
//! matches, so earlier entries win over later ones.

use serde::{Deserialize, Serialize};

use crate::component::Dimensions;
use crate::knowledge::Range;


/// Predicate over a `(width, height, depth)` triple in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeRule {
    /// Smallest dimension over largest dimension below `max_ratio`.
    Flat { max_ratio: f64 },
    /// Height strictly above `height`.
    TallerThan { height: f64 },
    /// Height within an inclusive range.
    HeightWithin { height: Range },
    /// Height strictly below `height`.
    LowerThan { height: f64 },
    /// Depth and width both exceed height.
    DrawerProportion,
    /// Height and depth both within the given ranges, and no deeper than wide.
    WallUnit { height: Range, depth: Range },
}

impl ShapeRule {
    pub fn matches(&self, dims: &Dimensions) -> bool {
        match self {
            ShapeRule::Flat { max_ratio } => {
                let largest = dims.max();
                largest > 0.0 && dims.min() / largest < *max_ratio
            }
            ShapeRule::TallerThan { height } => dims.height > *height,
            ShapeRule::HeightWithin { height } => height.contains(dims.height),
            ShapeRule::LowerThan { height } => dims.height < *height,
            ShapeRule::DrawerProportion => dims.depth > dims.height && dims.width > dims.height,
            ShapeRule::WallUnit { height, depth } => {
                height.contains(dims.height)
                    && depth.contains(dims.depth)
                    && dims.width >= dims.depth
            }
        }
    }
}

/// A named shape rule and the furniture types it suggests, best first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricPattern {
    pub name: String,
    pub rule: ShapeRule,
    pub candidates: Vec<String>,
}

impl GeometricPattern {
    fn new(name: &str, rule: ShapeRule, candidates: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            rule,
            candidates: candidates.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Returns the first pattern in table order whose rule matches.
pub fn first_match<'a>(
    patterns: &'a [GeometricPattern],
    dims: &Dimensions,
) -> Option<&'a GeometricPattern> {
    patterns.iter().find(|p| p.rule.matches(dims))
}

pub fn default_patterns() -> Vec<GeometricPattern> {
    vec![
        GeometricPattern::new(
            "very-flat",
            ShapeRule::Flat { max_ratio: 0.05 },
            &["shelf", "door", "top"],
        ),
        GeometricPattern::new(
            "very-tall",
            ShapeRule::TallerThan { height: 1800.0 },
            &["tall-unit", "cabinet"],
        ),
        GeometricPattern::new(
            "counter-height",
            ShapeRule::HeightWithin {
                height: Range::new(700.0, 900.0),
            },
            &["counter", "drawer-bank"],
        ),
        GeometricPattern::new(
            "very-low",
            ShapeRule::LowerThan { height: 400.0 },
            &["drawer", "shelf", "skirting"],
        ),
        GeometricPattern::new(
            "drawer-proportion",
            ShapeRule::DrawerProportion,
            &["drawer", "drawer-bank"],
        ),
        // Upper cabinets match nothing above; without this entry they fuse below 0.5.
        GeometricPattern::new(
            "wall-unit",
            ShapeRule::WallUnit {
                height: Range::new(400.0, 1000.0),
                depth: Range::new(250.0, 450.0),
            },
            &["cabinet", "drawer-bank"],
        ),
    ]
}
