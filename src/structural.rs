//! Mesh-complexity signal. Reported for diagnostics only; it never votes on the
//! furniture type.

use crate::analysis::{Analysis, Analyzer, AnalyzerKind, Complexity, Verdict};
use crate::component::Component;
use crate::rules::Rules;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_follow_faces_per_vertex() {
        assert_eq!(bucket(0, 0), (Complexity::Simple, 0.4));
        assert_eq!(bucket(8, 6), (Complexity::Simple, 0.4));
        assert_eq!(bucket(8, 13), (Complexity::Medium, 0.5));
        assert_eq!(bucket(8, 25), (Complexity::Complex, 0.6));
        // boundaries are exclusive
        assert_eq!(bucket(2, 3), (Complexity::Simple, 0.4));
        assert_eq!(bucket(1, 3), (Complexity::Medium, 0.5));
    }
}

const COMPLEX_RATIO: f64 = 3.0;
const MEDIUM_RATIO: f64 = 1.5;

/// Complexity bucket and confidence for a mesh with the given counts.
pub fn bucket(num_vertices: usize, num_faces: usize) -> (Complexity, f64) {
    let complexity = if num_vertices > 0 {
        num_faces as f64 / num_vertices as f64
    } else {
        0.0
    };

    if complexity > COMPLEX_RATIO {
        (Complexity::Complex, 0.6)
    } else if complexity > MEDIUM_RATIO {
        (Complexity::Medium, 0.5)
    } else {
        (Complexity::Simple, 0.4)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralAnalyzer;

impl Analyzer for StructuralAnalyzer {
    fn kind(&self) -> AnalyzerKind {
        AnalyzerKind::Structural
    }

    fn analyze(&self, component: &Component, _rules: &Rules) -> Analysis {
        let (vertices, faces) = (component.num_vertices(), component.num_faces());
        let (complexity, confidence) = bucket(vertices, faces);
        let label = match complexity {
            Complexity::Complex => "Complex",
            Complexity::Medium => "Medium",
            Complexity::Simple => "Simple",
        };

        Analysis::new(
            self.kind(),
            Verdict::Structure(complexity),
            confidence,
            format!("{} geometry ({} faces, {} vertices)", label, faces, vertices),
        )
    }
}
