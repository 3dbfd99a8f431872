use planar_optim::CostFunction;

use crate::error::HomographyError;
use crate::matrix::{HomographyMatrix, HomographyParams};
use crate::types::Correspondence;

/// Minimum number of correspondences needed to determine the 8 parameters.
pub const MIN_CORRESPONDENCES: usize = 4;

/// Cost assigned to parameters under which a scene point maps to infinity.
pub const DEGENERATE_COST: f64 = f64::INFINITY;

/// Sum of squared reprojection errors of a correspondence set.
///
/// Holds a borrowed view of the correspondences and evaluates candidate
/// parameter vectors against them. It is the cost function handed to the
/// optimizer during estimation.
#[derive(Debug, Clone, Copy)]
pub struct ReprojectionObjective<'a> {
    correspondences: &'a [Correspondence],
}

impl<'a> ReprojectionObjective<'a> {
    /// Create the objective for a correspondence set.
    ///
    /// # Errors
    ///
    /// Returns [`HomographyError::InsufficientCorrespondences`] for fewer than 4 correspondences.
    pub fn new(correspondences: &'a [Correspondence]) -> Result<Self, HomographyError> {
        if correspondences.len() < MIN_CORRESPONDENCES {
            return Err(HomographyError::InsufficientCorrespondences {
                required: MIN_CORRESPONDENCES,
                actual: correspondences.len(),
            });
        }
        Ok(Self { correspondences })
    }

    /// The correspondences this objective is evaluated on.
    pub fn correspondences(&self) -> &'a [Correspondence] {
        self.correspondences
    }

    /// Evaluate the sum of squared reprojection errors for `h`.
    ///
    /// Returns [`DEGENERATE_COST`] when a scene point falls on the line at
    /// infinity of `h` or the sum overflows.
    pub fn evaluate(&self, h: &HomographyParams) -> f64 {
        let mut error = 0.0;
        for c in self.correspondences {
            let (x, y) = (c.scene.x, c.scene.y);
            let (u, v) = (c.image.x, c.image.y);

            let w = h[6] * x + h[7] * y + 1.0;
            if w == 0.0 {
                return DEGENERATE_COST;
            }

            let u_proj = (h[0] * x + h[1] * y + h[2]) / w;
            let v_proj = (h[3] * x + h[4] * y + h[5]) / w;

            error += (u - u_proj).powi(2) + (v - v_proj).powi(2);
        }

        if error.is_finite() {
            error
        } else {
            DEGENERATE_COST
        }
    }
}

impl CostFunction for ReprojectionObjective<'_> {
    fn cost(&self, params: &[f64]) -> f64 {
        match <&HomographyParams>::try_from(params) {
            Ok(h) => self.evaluate(h),
            Err(_) => DEGENERATE_COST,
        }
    }
}

/// Build the reprojection objective for a correspondence set.
///
/// # Errors
///
/// Returns [`HomographyError::InsufficientCorrespondences`] for fewer than 4 correspondences.
pub fn build_objective(
    correspondences: &[Correspondence],
) -> Result<ReprojectionObjective<'_>, HomographyError> {
    ReprojectionObjective::new(correspondences)
}

/// Turn an optimized parameter vector into a homography matrix.
pub fn reconstruct_matrix(h: &HomographyParams) -> HomographyMatrix {
    HomographyMatrix::from_params(h)
}
