#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Planar Homography
//!
//! Fits the 3x3 projective transform between a scene plane and an image plane
//! from point correspondences, by minimizing the reprojection error with a
//! Nelder-Mead simplex search.
//!
//! ## Example: estimate and project
//!
//! ```rust
//! use planar_homography::{
//!     estimate_homography_from_points, project_point, HomographyEstimationParams, Point2D,
//! };
//!
//! let scene = [
//!     Point2D::new(0.0, 0.0),
//!     Point2D::new(1.0, 0.0),
//!     Point2D::new(0.0, 1.0),
//!     Point2D::new(1.0, 1.0),
//! ];
//!
//! let estimate =
//!     estimate_homography_from_points(&scene, &scene, &HomographyEstimationParams::default())?;
//!
//! let p = project_point(&Point2D::new(0.5, 0.5), &estimate.homography)?;
//! assert!(p.distance(&Point2D::new(0.5, 0.5)) < 1e-3);
//! # Ok::<(), planar_homography::HomographyError>(())
//! ```
//!
//! ## Example: match with a degree matrix
//!
//! ```rust
//! use planar_homography::{match_correspondences, DegreeMatrix, Point2D};
//!
//! let scene = [Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0)];
//! let image = [Point2D::new(10.0, 0.0), Point2D::new(0.0, 0.0)];
//! let degree = DegreeMatrix::from_rows(&[[0.1, 0.9], [0.8, 0.2]])?;
//!
//! let matched = match_correspondences(&scene, &image, &degree)?;
//! assert_eq!(matched[0].image, image[1]);
//! assert_eq!(matched[1].image, image[0]);
//! # Ok::<(), planar_homography::HomographyError>(())
//! ```

/// Error types for the homography module.
pub mod error;

/// Non-linear homography estimation.
pub mod estimate;

mod linalg;

pub mod matcher;

/// The 3x3 homography matrix and its parameter vector.
pub mod matrix;

/// Reprojection error objective minimized during estimation.
pub mod objective;

/// Forward and inverse point projection.
pub mod projection;

/// Points and point correspondences.
pub mod types;

/// Per-point reprojection reports.
pub mod validation;

pub use error::HomographyError;
pub use estimate::{
    estimate_homography, estimate_homography_from_points, estimate_homography_with_degree_matrix,
    HomographyEstimate, HomographyEstimationParams,
};
pub use matcher::{best_matches, match_correspondences, DegreeMatrix, NO_MATCH_SENTINEL};
pub use matrix::{HomographyMatrix, HomographyParams, IDENTITY_PARAMS, NUM_PARAMS};
pub use objective::{
    build_objective, reconstruct_matrix, ReprojectionObjective, DEGENERATE_COST,
    MIN_CORRESPONDENCES,
};
pub use projection::{
    back_project_point, back_project_points, project_point, project_points, reprojection_error,
    total_reprojection_error,
};
pub use types::{Correspondence, Point2D};
pub use validation::{validate_homography, PointResidual, ReprojectionReport};
