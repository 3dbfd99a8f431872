use serde::Serialize;

use crate::error::HomographyError;
use crate::matrix::HomographyMatrix;
use crate::projection::{project_point, reprojection_error};
use crate::types::{Correspondence, Point2D};

/// Reprojection result of a single correspondence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointResidual {
    /// The scene point.
    pub scene: Point2D,
    /// The scene point projected into the image.
    pub projected: Point2D,
    /// The observed image point.
    pub actual: Point2D,
    /// Distance between the projected and the observed point.
    pub error: f64,
}

/// Per-point and aggregate reprojection errors of a homography.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReprojectionReport {
    /// One residual per correspondence, in input order.
    pub points: Vec<PointResidual>,
    /// Sum of the point errors.
    pub total_error: f64,
    /// Mean point error, zero for an empty set.
    pub mean_error: f64,
    /// Largest point error, zero for an empty set.
    pub max_error: f64,
    /// Root mean square of the point errors, zero for an empty set.
    pub rmse: f64,
}

impl ReprojectionReport {
    /// Number of correspondences in the report.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the report covers no correspondence.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Measure how well `homography` maps each scene point onto its image point.
///
/// Works on any correspondence set, the fitting set as well as a hold-out set
/// the homography was not estimated from.
///
/// # Errors
///
/// Returns [`HomographyError::DegenerateProjection`] if a scene point maps to infinity.
pub fn validate_homography(
    homography: &HomographyMatrix,
    correspondences: &[Correspondence],
) -> Result<ReprojectionReport, HomographyError> {
    let mut points = Vec::with_capacity(correspondences.len());
    let mut total_error = 0.0;
    let mut squared_error = 0.0;
    let mut max_error: f64 = 0.0;

    for (i, c) in correspondences.iter().enumerate() {
        let projected = project_point(&c.scene, homography)?;
        let error = reprojection_error(&projected, &c.image);

        log::debug!(
            "Point {i}: scene ({:.4}, {:.4}) projected ({:.4}, {:.4}) actual ({:.4}, {:.4}) error {:.6}",
            c.scene.x,
            c.scene.y,
            projected.x,
            projected.y,
            c.image.x,
            c.image.y,
            error
        );

        total_error += error;
        squared_error += error * error;
        max_error = max_error.max(error);
        points.push(PointResidual {
            scene: c.scene,
            projected,
            actual: c.image,
            error,
        });
    }

    let (mean_error, rmse) = if points.is_empty() {
        (0.0, 0.0)
    } else {
        let n = points.len() as f64;
        (total_error / n, (squared_error / n).sqrt())
    };

    log::debug!("Total reprojection error: {total_error:.6}");

    Ok(ReprojectionReport {
        points,
        total_error,
        mean_error,
        max_error,
        rmse,
    })
}
