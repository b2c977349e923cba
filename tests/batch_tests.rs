use approx::assert_relative_eq;
use nalgebra::Point3;

use joinery::batch::{analyze_batch, BatchOptions};
use joinery::classifier::Classifier;
use joinery::component::RawComponent;
use joinery::result::DetectedType;

fn kitchen() -> Vec<RawComponent> {
    let mut broken = RawComponent::named("Broken_Import");
    broken.vertices = vec![Point3::new(0.0, f64::NAN, 0.0)];

    vec![
        RawComponent::with_dimensions("Cabinet_Upper_Kitchen", [800.0, 600.0, 350.0], 2.5),
        RawComponent::with_dimensions("Wall_Partition", [2000.0, 2400.0, 100.0], 4.8),
        RawComponent::with_dimensions("Door_Living", [450.0, 1800.0, 20.0], 0.81),
        RawComponent::with_dimensions("Screw", [5.0, 5.0, 5.0], 0.5),
        broken,
    ]
}

#[test]
fn mean_confidence_covers_valid_results_only() {
    let report = analyze_batch(&Classifier::default(), &kitchen(), &BatchOptions::default());
    let stats = &report.stats;

    assert_eq!(stats.total, 5);
    assert_eq!(stats.valid, 3);
    assert_eq!(stats.woodwork, 2);
    assert_eq!(stats.non_woodwork, 1);
    assert_eq!(stats.undetermined, 0);
    assert_relative_eq!(stats.mean_confidence, (0.71 + 0.9 + 0.43) / 3.0, epsilon = 1e-9);
    assert_relative_eq!(stats.min_confidence, 0.43, epsilon = 1e-9);
    assert_relative_eq!(stats.max_confidence, 0.9, epsilon = 1e-9);

    let expected: f64 = report
        .results
        .iter()
        .map(|r| &r.classification)
        .filter(|c| c.detected_type.is_valid())
        .map(|c| c.confidence)
        .sum::<f64>()
        / 3.0;
    assert_relative_eq!(stats.mean_confidence, expected);
}

#[test]
fn one_bad_component_does_not_abort_the_batch() {
    let report = analyze_batch(&Classifier::default(), &kitchen(), &BatchOptions::default());
    let types: Vec<_> = report
        .results
        .iter()
        .map(|r| r.classification.detected_type.clone())
        .collect();

    assert_eq!(
        types,
        vec![
            DetectedType::Furniture("cabinet".to_string()),
            DetectedType::NonWoodwork,
            DetectedType::Furniture("door".to_string()),
            DetectedType::Invalid,
            DetectedType::Error,
        ]
    );
    assert_eq!(report.results[4].name, "Broken_Import");
}

#[test]
fn insights_and_recommendations_follow_the_statistics() {
    let report = analyze_batch(
        &Classifier::default(),
        &kitchen(),
        &BatchOptions {
            parallel: false,
            progress: false,
        },
    );

    assert_eq!(
        report.insights,
        vec![
            "Low quality: only 60.0% of components are valid",
            "Mixed file: 66.7% is woodwork",
            "Moderate confidence: 68.0% on average",
            "Most common type: cabinet (1 occurrences)",
        ]
    );
    assert_eq!(
        report.recommendations,
        vec!["Improve preparation of the 3D file", "Check scale and units"]
    );
}

#[test]
fn empty_batches_are_fine() {
    let report = analyze_batch(&Classifier::default(), &[], &BatchOptions::default());
    assert_eq!(report.stats.total, 0);
    assert!(report.results.is_empty());
    assert_eq!(report.stats.mean_confidence, 0.0);
}
