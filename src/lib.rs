//! Furniture classification for 3D models.
//!
//! Each component extracted from a model is validated, run through four independent
//! analyzers (name semantics, shape patterns, knowledge-base dimensions, mesh
//! structure) and the weighted votes are fused into a single type with a confidence,
//! a reason and alternatives. Batches add model-level statistics and advice.
//!
//! ```no_run
//! use joinery::batch::{analyze_batch, BatchOptions};
//! use joinery::classifier::Classifier;
//! use joinery::geom::load_components;
//!
//! let components = load_components("kitchen.obj")?;
//! let report = analyze_batch(&Classifier::default(), &components, &BatchOptions::default());
//! println!("{} woodwork components", report.stats.woodwork);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod analysis;
pub mod batch;
pub mod classifier;
pub mod component;
pub mod dimensional;
pub mod enrich;
pub mod fusion;
pub mod geom;
pub mod geometric;
pub mod knowledge;
pub mod output;
pub mod patterns;
pub mod result;
pub mod rules;
pub mod semantic;
pub mod settings;
pub mod structural;
pub mod validation;
