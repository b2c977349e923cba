//! Plausibility gate run before any classification is attempted.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. largest dimension above the upper bound
//! 2. smallest dimension below the lower bound
//! 3. area above the upper bound
//! 4. area below the lower bound (only when an area is known)
//! 5. aspect ratio above the bound
//! 6. density (volume / area) outside its bounds (only when an area is known)

use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::knowledge::Range;


/// Scalar bounds a component must satisfy to be classified at all.
///
/// Dimensions in millimetres, area in m², volume in m³, density in m³/m².
/// The volume bounds are carried with the rule set but not enforced by
/// [`validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRules {
    pub dimension: Range,
    pub area: Range,
    pub volume: Range,
    pub max_aspect_ratio: f64,
    pub density: Range,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            dimension: Range::new(10.0, 5000.0),
            area: Range::new(0.01, 25.0),
            volume: Range::new(0.001, 10.0),
            max_aspect_ratio: 100.0,
            density: Range::new(0.005, 2.0),
        }
    }
}

/// Why a component was rejected, and what the user can do about it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub reason: String,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Valid,
    Invalid(Rejection),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    fn invalid(reason: String, suggestions: [&str; 2]) -> Self {
        Validation::Invalid(Rejection {
            reason,
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        })
    }
}

/// Runs the plausibility checks against `rules`. Pure; safe to call repeatedly.
pub fn validate(component: &Component, rules: &ValidationRules) -> Validation {
    let max_dim = component.dimensions.max();
    let min_dim = component.dimensions.min();
    let area = component.area_m2;

    if max_dim > rules.dimension.max {
        return Validation::invalid(
            format!("Dimension too large: {:.1}mm", max_dim),
            ["Check the file scale", "May be a structural element"],
        );
    }

    if min_dim < rules.dimension.min {
        return Validation::invalid(
            format!("Dimension too small: {:.1}mm", min_dim),
            ["Check whether this is a detail", "May be noise in the geometry"],
        );
    }

    if area > rules.area.max {
        return Validation::invalid(
            format!("Area too large: {:.2}m²", area),
            ["Likely a wall or floor", "Filter out structural elements"],
        );
    }

    if area > 0.0 && area < rules.area.min {
        return Validation::invalid(
            format!("Area too small: {:.4}m²", area),
            ["Likely an accessory", "Check whether it is relevant"],
        );
    }

    let proportion = max_dim / min_dim;
    if proportion > rules.max_aspect_ratio {
        return Validation::invalid(
            format!("Extreme proportion: {:.1}:1", proportion),
            ["May be a linear element", "Check the geometry"],
        );
    }

    if area > 0.0 {
        let density = component.volume_m3 / area;
        if density < rules.density.min {
            return Validation::invalid(
                format!("Volume/area density too low: {:.3}", density),
                ["May be a very thin element", "Check the volume calculation"],
            );
        }
        if density > rules.density.max {
            return Validation::invalid(
                format!("Volume/area density too high: {:.3}", density),
                ["May be a very thick element", "Check the geometry"],
            );
        }
    }

    Validation::Valid
}
