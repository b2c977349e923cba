use approx::assert_relative_eq;
use nalgebra::Point3;

use joinery::analysis::{Analyzer, Verdict};
use joinery::classifier::Classifier;
use joinery::component::{Component, RawComponent};
use joinery::fusion::MAX_CONFIDENCE;
use joinery::result::DetectedType;
use joinery::rules::Rules;
use joinery::semantic::SemanticAnalyzer;
use joinery::validation::validate;

fn box_component(name: &str, w: f64, h: f64, d: f64, area_m2: f64) -> RawComponent {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(w, 0.0, 0.0),
        Point3::new(w, h, 0.0),
        Point3::new(0.0, h, 0.0),
        Point3::new(0.0, 0.0, d),
        Point3::new(w, 0.0, d),
        Point3::new(w, h, d),
        Point3::new(0.0, h, d),
    ];
    let faces = vec![
        vec![0, 1, 2, 3],
        vec![4, 5, 6, 7],
        vec![0, 1, 5, 4],
        vec![1, 2, 6, 5],
        vec![2, 3, 7, 6],
        vec![3, 0, 4, 7],
    ];
    RawComponent {
        name: name.to_string(),
        area_m2,
        vertices,
        faces,
        dimensions: None,
    }
}

#[test]
fn upper_kitchen_cabinet() {
    let raw = box_component("Cabinet_Upper_Kitchen", 800.0, 600.0, 350.0, 2.5);
    let c = Classifier::default().classify(&raw);

    assert_eq!(c.detected_type, DetectedType::Furniture("cabinet".to_string()));
    assert!(c.confidence > 0.5);
    // 0.8 * 0.2 + 0.7 * 0.4 + 0.9 * 0.3
    assert_relative_eq!(c.confidence, 0.71, epsilon = 1e-9);
    assert!(c.reason.contains("semantic: Name indicates cabinet"));
    assert!(c.suggestions.is_empty());

    let detail = c.detail.unwrap();
    assert_eq!(detail.contributions.len(), 3);
    assert_eq!(
        detail.analyses.structural.verdict,
        Verdict::Structure(joinery::analysis::Complexity::Simple)
    );
}

#[test]
fn wall_partition_is_non_woodwork() {
    for (w, h, d, area) in [
        (2000.0, 2400.0, 100.0, 4.8),
        (600.0, 600.0, 600.0, 0.36),
        (1200.0, 800.0, 500.0, 0.96),
    ] {
        let raw = RawComponent::with_dimensions("Wall_Partition", [w, h, d], area);
        let c = Classifier::default().classify(&raw);
        assert_eq!(c.detected_type, DetectedType::NonWoodwork, "{:?}", (w, h, d));
        assert_eq!(c.confidence, 0.9);
        assert!(c.alternatives.is_empty());
    }
}

#[test]
fn tiny_components_are_invalid() {
    let raw = RawComponent::with_dimensions("Cabinet_Handle", [5.0, 5.0, 5.0], 0.5);
    let c = Classifier::default().classify(&raw);

    assert_eq!(c.detected_type, DetectedType::Invalid);
    assert_eq!(c.confidence, 0.0);
    assert!(c.reason.contains("too small"));
    assert_eq!(c.suggestions.len(), 2);
    assert!(c.detail.is_none());
}

#[test]
fn missing_geometry_defaults_to_a_100mm_cube() {
    let raw = RawComponent::named("Mesh");
    let component = Component::from_raw(&raw).unwrap();
    assert_eq!(component.dimensions.as_array(), [100.0, 100.0, 100.0]);
    assert_relative_eq!(component.volume_m3, 100.0 * 100.0 * 100.0 / 1e9);

    let c = Classifier::default().classify(&raw);
    assert!(c.detected_type.is_valid());
}

#[test]
fn door_leaf_beats_the_flat_shelf_pattern() {
    let raw = box_component("Door_Living", 450.0, 1800.0, 20.0, 0.81);
    let c = Classifier::default().classify(&raw);

    // 0.8 * 0.2 + 0.9 * 0.3 against 0.7 * 0.4 for shelf
    assert_eq!(c.detected_type, DetectedType::Furniture("door".to_string()));
    assert_relative_eq!(c.confidence, 0.43, epsilon = 1e-9);
    assert_eq!(c.alternatives, vec!["shelf"]);
    assert_eq!(c.suggestions.len(), 2);
}

#[test]
fn fusion_confidence_stays_in_bounds() {
    let classifier = Classifier::default();
    let names = ["Cabinet", "Porta", "Gaveta", "Object", "Geladeira", "Prateleira"];
    let sizes: [f64; 7] = [20.0, 150.0, 400.0, 800.0, 1500.0, 2400.0, 4000.0];

    for name in names {
        for &w in &sizes {
            for &h in &sizes {
                for &d in &sizes {
                    let area = (w * h).max(h * d).max(w * d) / 1e6;
                    let raw = RawComponent::with_dimensions(name, [w, h, d], area);
                    let c = classifier.classify(&raw);
                    assert!(
                        (0.0..=MAX_CONFIDENCE).contains(&c.confidence),
                        "{} {:?}: {}",
                        name,
                        (w, h, d),
                        c.confidence
                    );
                }
            }
        }
    }
}

#[test]
fn non_woodwork_names_always_short_circuit() {
    let classifier = Classifier::default();
    for (w, h, d, area) in [
        (600.0, 1800.0, 700.0, 1.26),
        (300.0, 300.0, 300.0, 0.09),
        (1200.0, 900.0, 600.0, 1.08),
        (800.0, 18.0, 400.0, 0.32),
    ] {
        let raw = RawComponent::with_dimensions("Geladeira_Inox", [w, h, d], area);
        let c = classifier.classify(&raw);
        assert_eq!(c.detected_type, DetectedType::NonWoodwork, "{:?}", (w, h, d));
    }
}

#[test]
fn validation_is_idempotent() {
    let rules = Rules::builtin();
    for raw in [
        box_component("A", 800.0, 600.0, 350.0, 2.5),
        RawComponent::with_dimensions("B", [5.0, 5.0, 5.0], 0.5),
        RawComponent::with_dimensions("C", [6000.0, 100.0, 100.0], 0.6),
    ] {
        let component = Component::from_raw(&raw).unwrap();
        assert_eq!(
            validate(&component, &rules.validation),
            validate(&component, &rules.validation)
        );
    }
}

#[test]
fn semantic_confidence_ignores_geometry() {
    let rules = Rules::builtin();
    let a = Component::from_raw(&RawComponent::with_dimensions("Balcao_Pia", [600.0, 850.0, 550.0], 0.5)).unwrap();
    let b = Component::from_raw(&RawComponent::with_dimensions("Balcao_Pia", [2000.0, 30.0, 90.0], 0.2)).unwrap();
    let (x, y) = (SemanticAnalyzer.analyze(&a, rules), SemanticAnalyzer.analyze(&b, rules));
    assert_eq!(x.confidence, y.confidence);
    assert_eq!(x.verdict, y.verdict);
}

#[test]
fn malformed_faces_are_reported_not_raised() {
    let mut raw = box_component("Cabinet", 800.0, 600.0, 350.0, 2.5);
    raw.faces.push(vec![0, 1, 42]);

    let classifier = Classifier::default();
    assert!(classifier.try_classify(&raw).is_err());

    let c = classifier.classify(&raw);
    assert_eq!(c.detected_type, DetectedType::Error);
    assert_eq!(c.confidence, 0.0);
    assert_eq!(c.suggestions, vec!["Check the file format", "Try again"]);
}
