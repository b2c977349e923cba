//! Component records: the raw shape handed over by geometry extraction, and the
//! normalised form every analyzer consumes.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;


pub const DEFAULT_NAME: &str = "Component";
/// Edge length used when a record carries neither vertices nor dimensions.
pub const DEFAULT_DIMENSION_MM: f64 = 100.0;
const MM3_PER_M3: f64 = 1e9;

/// Faults detected while normalising a component record. Each one ends the
/// analysis of that component only.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { index: usize },

    #[error("face {face} references vertex {index}, but only {len} vertices exist")]
    FaceIndexOutOfRange { face: usize, index: usize, len: usize },

    #[error("surface area {0} is not a finite, non-negative value")]
    InvalidArea(f64),

    #[error("explicit dimensions {0:?} are not finite")]
    NonFiniteDimensions([f64; 3]),
}

/// A component as produced by geometry extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawComponent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub area_m2: f64,
    #[serde(default)]
    pub vertices: Vec<Point3<f64>>,
    #[serde(default)]
    pub faces: Vec<Vec<usize>>,
    /// Width, height, depth in millimetres. Ignored when vertices are present.
    #[serde(default)]
    pub dimensions: Option<[f64; 3]>,
}

impl RawComponent {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            area_m2: 0.0,
            vertices: Vec::new(),
            faces: Vec::new(),
            dimensions: None,
        }
    }

    /// A vertex-less record with explicit dimensions and area.
    pub fn with_dimensions(name: &str, dimensions: [f64; 3], area_m2: f64) -> Self {
        Self {
            dimensions: Some(dimensions),
            area_m2,
            ..Self::named(name)
        }
    }
}

/// Width, height and depth of an axis-aligned bounding box, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    pub fn from_array(dims: [f64; 3]) -> Self {
        Self::new(dims[0], dims[1], dims[2])
    }

    /// Extent of the bounding box around `vertices`. Returns `None` when empty.
    pub fn bounding(vertices: &[Point3<f64>]) -> Option<Self> {
        let first = vertices.first()?;
        let (lo, hi) = vertices
            .iter()
            .fold((*first, *first), |(lo, hi), v| (lo.inf(v), hi.sup(v)));
        let extent = hi - lo;
        Some(Self::new(extent.x, extent.y, extent.z))
    }

    pub fn as_array(&self) -> [f64; 3] {
        [self.width, self.height, self.depth]
    }

    pub fn min(&self) -> f64 {
        self.width.min(self.height).min(self.depth)
    }

    pub fn max(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }

    /// Bounding-box volume in m³.
    pub fn volume_m3(&self) -> f64 {
        self.width * self.height * self.depth / MM3_PER_M3
    }

    /// Largest bounding-box face in m².
    pub fn largest_face_m2(&self) -> f64 {
        let (w, h, d) = (self.width / 1e3, self.height / 1e3, self.depth / 1e3);
        (w * h).max(h * d).max(w * d)
    }
}

/// A normalised component, immutable for the duration of one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub name: String,
    pub area_m2: f64,
    /// Always `width * height * depth`, converted from mm³ to m³.
    pub volume_m3: f64,
    pub dimensions: Dimensions,
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<Vec<usize>>,
    pub centroid: Point3<f64>,
}

impl Component {
    /// Normalises a raw record.
    ///
    /// Dimensions are recomputed from the vertex bounding box whenever vertices
    /// exist, overriding any supplied triple; otherwise the supplied triple is
    /// used, or a 100 mm cube when none is given.
    pub fn from_raw(raw: &RawComponent) -> Result<Self, AnalysisError> {
        if let Some(index) = raw
            .vertices
            .iter()
            .position(|v| !v.coords.iter().all(|c| c.is_finite()))
        {
            return Err(AnalysisError::NonFiniteVertex { index });
        }

        for (face, indices) in raw.faces.iter().enumerate() {
            if let Some(&index) = indices.iter().find(|&&i| i >= raw.vertices.len()) {
                return Err(AnalysisError::FaceIndexOutOfRange {
                    face,
                    index,
                    len: raw.vertices.len(),
                });
            }
        }

        if !raw.area_m2.is_finite() || raw.area_m2 < 0.0 {
            return Err(AnalysisError::InvalidArea(raw.area_m2));
        }

        let (dimensions, centroid) = match Dimensions::bounding(&raw.vertices) {
            Some(dims) => (dims, centroid(&raw.vertices)),
            None => {
                let explicit = raw.dimensions.unwrap_or([DEFAULT_DIMENSION_MM; 3]);
                if !explicit.iter().all(|d| d.is_finite()) {
                    return Err(AnalysisError::NonFiniteDimensions(explicit));
                }
                (Dimensions::from_array(explicit), Point3::origin())
            }
        };

        let name = match raw.name.trim() {
            "" => DEFAULT_NAME.to_string(),
            _ => raw.name.clone(),
        };

        Ok(Self {
            name,
            area_m2: raw.area_m2,
            volume_m3: dimensions.volume_m3(),
            dimensions,
            vertices: raw.vertices.clone(),
            faces: raw.faces.clone(),
            centroid,
        })
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }
}

fn centroid(vertices: &[Point3<f64>]) -> Point3<f64> {
    let sum = vertices
        .iter()
        .fold(Point3::origin(), |acc, point| acc + point.coords);
    sum / vertices.len() as f64
}
