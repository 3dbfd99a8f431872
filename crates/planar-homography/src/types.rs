use serde::{Deserialize, Serialize};

use crate::error::HomographyError;

/// A point in a 2d plane.
///
/// Serialized as a two-element array `[x, y]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<[f64; 2]> for Point2D {
    fn from(p: [f64; 2]) -> Self {
        Self::new(p[0], p[1])
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2D> for [f64; 2] {
    fn from(p: Point2D) -> Self {
        [p.x, p.y]
    }
}

/// A matched pair of points, one in the scene plane and one in the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correspondence {
    /// Point in the scene plane.
    pub scene: Point2D,
    /// Observed point in the image plane.
    pub image: Point2D,
}

impl Correspondence {
    /// Create a new correspondence.
    pub fn new(scene: impl Into<Point2D>, image: impl Into<Point2D>) -> Self {
        Self {
            scene: scene.into(),
            image: image.into(),
        }
    }

    /// Pair scene and image points by index.
    ///
    /// # Errors
    ///
    /// Returns [`HomographyError::MismatchedArrayLengths`] if the slices differ in length.
    pub fn zip(scene: &[Point2D], image: &[Point2D]) -> Result<Vec<Self>, HomographyError> {
        if scene.len() != image.len() {
            return Err(HomographyError::MismatchedArrayLengths {
                left_name: "scene points",
                left_len: scene.len(),
                right_name: "image points",
                right_len: image.len(),
            });
        }

        Ok(scene
            .iter()
            .zip(image)
            .map(|(&scene, &image)| Self { scene, image })
            .collect())
    }
}
