//! Geometry extraction: turns model files into [`RawComponent`] records.
//!
//! - Wavefront OBJ via `tobj`: every object or group becomes one component
//! - JSON: a list of component records
//!
//! Coordinates are taken to be millimetres. The format is chosen from the file
//! extension.

use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use nalgebra::Point3;

use crate::component::{Dimensions, RawComponent};


/// Minimum number of vertices for a mesh to count as a component.
pub const MIN_VERTICES: usize = 3;
/// Name tobj gives geometry that appears before any `o` or `g` line.
const UNNAMED_OBJECT: &str = "unnamed_object";

/// Loads every component in `path`, dispatching on the file extension.
pub fn load_components(path: impl AsRef<Path>) -> Result<Vec<RawComponent>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    let components = match extension.as_deref() {
        Some("obj") => load_obj(path)?,
        Some("json") => load_json(path)?,
        _ => bail!(
            "unsupported model format for {} (expected .obj or .json)",
            path.display()
        ),
    };

    tracing::info!(
        path = %path.display(),
        components = components.len(),
        "loaded model"
    );
    Ok(components)
}

/// Reads a Wavefront OBJ file. Objects with fewer than [`MIN_VERTICES`] vertices
/// are skipped.
///
/// tobj only keeps the vertices that faces reference, so an object made of bare
/// `v` lines has no geometry and never becomes a component.
pub fn load_obj(path: &Path) -> Result<Vec<RawComponent>> {
    let (models, _) = tobj::load_obj(path, &tobj::LoadOptions::default())
        .with_context(|| format!("failed to load OBJ file {}", path.display()))?;

    let mut components = Vec::with_capacity(models.len());
    for (i, model) in models.iter().enumerate() {
        let name = component_name(&model.name, i, models.len(), path);

        let mesh = &model.mesh;
        let vertices: Vec<Point3<f64>> = mesh
            .positions
            .chunks_exact(3)
            .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64))
            .collect();

        if vertices.len() < MIN_VERTICES {
            tracing::warn!(
                object = %name,
                vertices = vertices.len(),
                indices = mesh.indices.len(),
                "skipping degenerate object"
            );
            continue;
        }

        let faces = faces_from_indices(&mesh.indices, &mesh.face_arities);
        let area_m2 = approximate_area(&vertices);

        components.push(RawComponent {
            name,
            area_m2,
            vertices,
            faces,
            dimensions: None,
        });
    }

    Ok(components)
}

/// Picks the component name for the `index`-th of `count` OBJ models. A lone
/// unnamed model is named after the file.
fn component_name(name: &str, index: usize, count: usize, path: &Path) -> String {
    let name = name.trim();
    if !name.is_empty() && name != UNNAMED_OBJECT {
        return name.to_string();
    }
    match path.file_stem().and_then(OsStr::to_str) {
        Some(stem) if count == 1 => stem.to_string(),
        _ => format!("Object_{}", index + 1),
    }
}

/// Reads a JSON array of component records.
pub fn load_json(path: &Path) -> Result<Vec<RawComponent>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let components = serde_json::from_str(&text)
        .with_context(|| format!("invalid component list in {}", path.display()))?;
    Ok(components)
}

/// Splits a flat index list into faces. Without arity data every face is a triangle.
fn faces_from_indices(indices: &[u32], arities: &[u32]) -> Vec<Vec<usize>> {
    if arities.is_empty() {
        return indices
            .chunks_exact(3)
            .map(|f| f.iter().map(|&i| i as usize).collect())
            .collect();
    }

    let mut faces = Vec::with_capacity(arities.len());
    let mut next_face = 0;
    for &arity in arities {
        let end = next_face + arity as usize;
        let Some(face_indices) = indices.get(next_face..end) else {
            break;
        };
        faces.push(face_indices.iter().map(|&i| i as usize).collect());
        next_face = end;
    }
    faces
}

/// Largest bounding-box face in m², rounded to 4 decimals.
fn approximate_area(vertices: &[Point3<f64>]) -> f64 {
    let area = Dimensions::bounding(vertices)
        .map(|d| d.largest_face_m2())
        .unwrap_or(0.0);
    (area * 1e4).round() / 1e4
}
