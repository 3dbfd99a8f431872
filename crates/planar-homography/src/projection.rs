use crate::error::HomographyError;
use crate::matrix::HomographyMatrix;
use crate::types::{Correspondence, Point2D};

/// Project a point through a homography.
///
/// The point is lifted to `(x, y, 1)`, multiplied by `homography` and divided
/// by the resulting third component.
///
/// # Arguments
///
/// * `point` - The point in the source plane.
/// * `homography` - The 3x3 transform from the source to the destination plane.
///
/// # Errors
///
/// Returns [`HomographyError::DegenerateProjection`] if the homogeneous
/// coordinate is zero.
///
/// # Example
///
/// ```
/// use planar_homography::{project_point, HomographyMatrix, Point2D};
///
/// let h = HomographyMatrix::new([[1.0, 0.0, 2.0], [0.0, 1.0, -1.0], [0.0, 0.0, 1.0]]);
/// let p = project_point(&Point2D::new(1.0, 1.0), &h)?;
/// assert_eq!(p, Point2D::new(3.0, 0.0));
/// # Ok::<(), planar_homography::HomographyError>(())
/// ```
pub fn project_point(
    point: &Point2D,
    homography: &HomographyMatrix,
) -> Result<Point2D, HomographyError> {
    let [u, v, w] = homography.mul_vec3(&[point.x, point.y, 1.0]);
    if w == 0.0 {
        return Err(HomographyError::DegenerateProjection {
            x: point.x,
            y: point.y,
        });
    }
    Ok(Point2D::new(u / w, v / w))
}

/// Map a point from the destination plane back to the source plane.
///
/// Inverts `homography` and projects `point` with the inverse.
///
/// # Errors
///
/// Returns [`HomographyError::SingularMatrix`] if the homography is not
/// invertible and [`HomographyError::DegenerateProjection`] if the point maps
/// to infinity.
pub fn back_project_point(
    point: &Point2D,
    homography: &HomographyMatrix,
) -> Result<Point2D, HomographyError> {
    let inverse = homography.inverse()?;
    project_point(point, &inverse)
}

/// Project a set of points through a homography.
///
/// # Errors
///
/// Fails on the first point that maps to infinity.
pub fn project_points(
    points: &[Point2D],
    homography: &HomographyMatrix,
) -> Result<Vec<Point2D>, HomographyError> {
    points.iter().map(|p| project_point(p, homography)).collect()
}

/// Map a set of points back through the inverse of a homography.
///
/// The inverse is computed once for the whole set.
///
/// # Errors
///
/// Returns [`HomographyError::SingularMatrix`] if the homography is not
/// invertible and fails on the first point that maps to infinity.
pub fn back_project_points(
    points: &[Point2D],
    homography: &HomographyMatrix,
) -> Result<Vec<Point2D>, HomographyError> {
    let inverse = homography.inverse()?;
    project_points(points, &inverse)
}

/// Euclidean distance between a projected point and the observed one.
pub fn reprojection_error(projected: &Point2D, actual: &Point2D) -> f64 {
    projected.distance(actual)
}

/// Sum of the reprojection errors of every correspondence under `homography`.
///
/// # Errors
///
/// Fails if any scene point maps to infinity.
pub fn total_reprojection_error(
    homography: &HomographyMatrix,
    correspondences: &[Correspondence],
) -> Result<f64, HomographyError> {
    let mut total = 0.0;
    for c in correspondences {
        let projected = project_point(&c.scene, homography)?;
        total += reprojection_error(&projected, &c.image);
    }
    Ok(total)
}
