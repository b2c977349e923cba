//! Reference data describing the furniture types the classifier can recognise.
//!
//! This module holds the knowledge base: for every furniture type, the ranges of
//! dimensions, proportions, surface area and volume that a typical piece falls in,
//! plus the name keywords that identify it. It also holds the keyword lists used to
//! separate woodwork from everything else found in an architectural model.
//!
//! The knowledge base provides:
//! - Inclusive numeric ranges for dimensional matching
//! - Ordered furniture-type profiles (declaration order is a tie-break)
//! - Woodwork, non-woodwork and appliance keyword lists
//!
//! All values are plain data. Nothing here has behaviour beyond range checks and
//! keyword lookups; the analyzers decide what the data means.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_inclusive() {
        let range = Range::new(600.0, 2400.0);
        assert!(range.contains(600.0));
        assert!(range.contains(2400.0));
        assert!(!range.contains(599.9));
        assert!(!range.contains(f64::NAN));
    }

    #[test]
    fn profiles_keep_declaration_order() {
        let names: Vec<_> = default_profiles().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["cabinet", "tall-unit", "counter", "drawer-bank", "shelf", "door", "drawer"]
        );
    }

    #[test]
    fn every_profile_has_a_volume_range() {
        assert!(default_profiles().iter().all(|p| p.volume.is_some()));
    }

    #[test]
    fn keyword_lookup_is_substring_based() {
        let keywords = Keywords::default();
        assert!(contains_any("upper_wall_cabinet", &keywords.non_woodwork));
        assert!(contains_any("my fridge", &keywords.appliances));
        assert!(!contains_any("plinth", &keywords.woodwork));
    }
}

/// An inclusive numeric interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// True when `value` lies within `[min, max]`. NaN is never contained.
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn is_ordered(&self) -> bool {
        self.min <= self.max
    }
}

/// Typical dimensional profile of one furniture type.
///
/// Dimensions are in millimetres, area in m² and volume in m³. Proportions are
/// `height / width` and `depth / width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnitureProfile {
    pub name: String,
    pub width: Range,
    pub height: Range,
    pub depth: Range,
    pub height_width: Range,
    pub depth_width: Range,
    pub area: Range,
    #[serde(default)]
    pub volume: Option<Range>,
    pub keywords: Vec<String>,
}

impl FurnitureProfile {
    /// True when any of this profile's keywords occurs in an already case-folded name.
    pub fn matches_name(&self, name: &str) -> bool {
        contains_any(name, &self.keywords)
    }

    /// Every range in the profile, labelled, for consistency checks.
    pub fn ranges(&self) -> Vec<(&'static str, Range)> {
        let mut ranges = vec![
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
            ("height_width", self.height_width),
            ("depth_width", self.depth_width),
            ("area", self.area),
        ];
        if let Some(volume) = self.volume {
            ranges.push(("volume", volume));
        }
        ranges
    }
}

/// Name keywords that split a model into woodwork and everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keywords {
    pub woodwork: Vec<String>,
    pub non_woodwork: Vec<String>,
    pub appliances: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            woodwork: strings(&[
                "armario", "cabinet", "wardrobe", "closet", "guarda", "despenseiro", "pantry",
                "coluna", "torre", "balcao", "counter", "base", "inferior", "gaveteiro",
                "drawer", "gaveta", "chest", "prateleira", "shelf", "estante", "porta", "door",
                "folha", "movel", "furniture", "mobile",
            ]),
            non_woodwork: strings(&[
                "wall", "parede", "muro", "floor", "piso", "chao", "ceiling", "teto", "laje",
                "window", "janela", "vidro", "door_frame", "batente", "marco", "pipe", "tubo",
                "cano", "wire", "fio", "cabo", "light", "luz", "lampada", "outlet", "tomada",
                "interruptor",
            ]),
            appliances: strings(&[
                "geladeira", "refrigerator", "fridge", "fogao", "stove", "cooktop",
                "microondas", "microwave", "lava", "dishwasher", "washing", "forno", "oven",
            ]),
        }
    }
}

impl Keywords {
    /// True when the case-folded name names a structural element or an appliance.
    pub fn is_non_woodwork(&self, name: &str) -> bool {
        contains_any(name, &self.non_woodwork) || contains_any(name, &self.appliances)
    }

    pub fn is_woodwork(&self, name: &str) -> bool {
        contains_any(name, &self.woodwork)
    }
}

/// Substring search of every keyword in `haystack`.
pub fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn profile(
    name: &str,
    width: (f64, f64),
    height: (f64, f64),
    depth: (f64, f64),
    height_width: (f64, f64),
    depth_width: (f64, f64),
    area: (f64, f64),
    volume: (f64, f64),
    keywords: &[&str],
) -> FurnitureProfile {
    FurnitureProfile {
        name: name.to_string(),
        width: Range::new(width.0, width.1),
        height: Range::new(height.0, height.1),
        depth: Range::new(depth.0, depth.1),
        height_width: Range::new(height_width.0, height_width.1),
        depth_width: Range::new(depth_width.0, depth_width.1),
        area: Range::new(area.0, area.1),
        volume: Some(Range::new(volume.0, volume.1)),
        keywords: strings(keywords),
    }
}

/// Built-in furniture profiles, in match priority order.
pub fn default_profiles() -> Vec<FurnitureProfile> {
    vec![
        profile(
            "cabinet",
            (400.0, 1200.0),
            (600.0, 2400.0),
            (300.0, 600.0),
            (0.5, 4.0),
            (0.25, 1.5),
            (0.5, 8.0),
            (0.1, 3.0),
            &["armario", "cabinet", "wardrobe", "closet", "guarda"],
        ),
        profile(
            "tall-unit",
            (300.0, 1000.0),
            (1800.0, 2600.0),
            (300.0, 600.0),
            (1.8, 8.0),
            (0.3, 2.0),
            (1.0, 6.0),
            (0.5, 4.0),
            &["despenseiro", "pantry", "tall", "alto", "coluna"],
        ),
        profile(
            "counter",
            (300.0, 1200.0),
            (700.0, 900.0),
            (400.0, 700.0),
            (0.3, 2.0),
            (0.5, 2.0),
            (0.3, 3.0),
            (0.2, 2.0),
            &["balcao", "counter", "base", "inferior", "bancada"],
        ),
        profile(
            "drawer-bank",
            (300.0, 800.0),
            (200.0, 800.0),
            (300.0, 600.0),
            (0.25, 2.0),
            (0.5, 2.0),
            (0.2, 2.0),
            (0.1, 1.0),
            &["gaveteiro", "drawer", "gaveta", "chest"],
        ),
        profile(
            "shelf",
            (200.0, 1200.0),
            (15.0, 50.0),
            (200.0, 600.0),
            (0.01, 0.25),
            (0.2, 3.0),
            (0.1, 2.0),
            (0.01, 0.1),
            &["prateleira", "shelf", "estante", "divider"],
        ),
        profile(
            "door",
            (300.0, 800.0),
            (400.0, 2000.0),
            (15.0, 25.0),
            (1.0, 6.0),
            (0.02, 0.1),
            (0.2, 1.5),
            (0.005, 0.05),
            &["porta", "door", "folha", "leaf"],
        ),
        profile(
            "drawer",
            (200.0, 800.0),
            (80.0, 300.0),
            (300.0, 600.0),
            (0.1, 1.5),
            (0.5, 3.0),
            (0.1, 1.5),
            (0.05, 0.5),
            &["gaveta", "drawer", "box", "caixa"],
        ),
    ]
}
