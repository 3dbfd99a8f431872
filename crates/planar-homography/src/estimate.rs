use planar_optim::NelderMead;
use serde::{Deserialize, Serialize};

use crate::error::HomographyError;
use crate::matcher::{match_correspondences, DegreeMatrix};
use crate::matrix::{HomographyMatrix, HomographyParams, IDENTITY_PARAMS};
use crate::objective::{build_objective, reconstruct_matrix};
use crate::types::{Correspondence, Point2D};

/// Parameters for the non-linear homography estimation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomographyEstimationParams {
    /// Starting point of the search, the identity homography by default.
    pub initial_guess: HomographyParams,
    /// Simplex optimizer configuration.
    pub optimizer: NelderMead,
}

impl Default for HomographyEstimationParams {
    fn default() -> Self {
        Self {
            initial_guess: IDENTITY_PARAMS,
            optimizer: NelderMead::default(),
        }
    }
}

/// Result of a homography estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct HomographyEstimate {
    /// Estimated homography from the scene plane to the image plane.
    pub homography: HomographyMatrix,
    /// Sum of squared reprojection errors at the solution.
    pub cost: f64,
    /// Number of optimizer iterations.
    pub iterations: usize,
    /// Number of cost evaluations.
    pub evaluations: usize,
}

/// Estimate the homography that maps scene points onto image points.
///
/// Minimizes the sum of squared reprojection errors over the 8 free entries
/// of the matrix, keeping the bottom-right entry fixed to 1.
///
/// # Arguments
///
/// * `correspondences` - At least 4 scene/image point pairs.
/// * `params` - Initial guess and optimizer configuration.
///
/// # Errors
///
/// Returns [`HomographyError::InsufficientCorrespondences`] for fewer than 4
/// pairs and [`HomographyError::Optimizer`] when the search does not converge
/// within the iteration budget.
///
/// # Example
///
/// ```
/// use planar_homography::{estimate_homography, Correspondence, HomographyEstimationParams};
///
/// let correspondences: Vec<Correspondence> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
///     .iter()
///     .map(|p| Correspondence::new(*p, *p))
///     .collect();
///
/// let estimate = estimate_homography(&correspondences, &HomographyEstimationParams::default())?;
/// assert!(estimate.cost < 1e-6);
/// # Ok::<(), planar_homography::HomographyError>(())
/// ```
pub fn estimate_homography(
    correspondences: &[Correspondence],
    params: &HomographyEstimationParams,
) -> Result<HomographyEstimate, HomographyError> {
    let objective = build_objective(correspondences)?;

    log::debug!(
        "Estimating homography from {} correspondences",
        correspondences.len()
    );

    let result = params
        .optimizer
        .optimize(&objective, &params.initial_guess)?;

    // the optimizer returns a vector of the initial guess length
    let mut h = IDENTITY_PARAMS;
    h.copy_from_slice(&result.params);

    let homography = reconstruct_matrix(&h);
    log::debug!(
        "Homography estimated in {} iterations, cost: {:e}",
        result.iterations,
        result.cost
    );

    Ok(HomographyEstimate {
        homography,
        cost: result.cost,
        iterations: result.iterations,
        evaluations: result.evaluations,
    })
}

/// Estimate the homography from scene and image points paired by index.
///
/// # Errors
///
/// Returns [`HomographyError::MismatchedArrayLengths`] if the slices differ in
/// length, otherwise the errors of [`estimate_homography`].
pub fn estimate_homography_from_points(
    scene: &[Point2D],
    image: &[Point2D],
    params: &HomographyEstimationParams,
) -> Result<HomographyEstimate, HomographyError> {
    let correspondences = Correspondence::zip(scene, image)?;
    estimate_homography(&correspondences, params)
}

/// Select correspondences from a degree matrix, then estimate the homography.
///
/// Every scene point is paired with its highest-affinity image point (see
/// [`match_correspondences`]) before the estimation runs.
///
/// # Returns
///
/// The estimate together with the correspondences it was fitted on.
///
/// # Errors
///
/// Fails if matching fails (shape mismatch or a row without a match) or if the
/// estimation fails.
pub fn estimate_homography_with_degree_matrix(
    scene: &[Point2D],
    image: &[Point2D],
    degree: &DegreeMatrix,
    params: &HomographyEstimationParams,
) -> Result<(HomographyEstimate, Vec<Correspondence>), HomographyError> {
    let correspondences = match_correspondences(scene, image, degree)?;
    let estimate = estimate_homography(&correspondences, params)?;
    Ok((estimate, correspondences))
}
