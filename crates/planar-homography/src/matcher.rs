//! Greedy correspondence selection from a degree (affinity) matrix.
//!
//! Each scene point is paired with the image point of highest affinity in its
//! row, independently of the other rows. The same image point can therefore
//! be selected for several scene points.

use crate::error::HomographyError;
use crate::types::{Correspondence, Point2D};

/// Scores at or below this value are never selected.
pub const NO_MATCH_SENTINEL: f64 = f64::MIN;

/// Affinity scores between scene points (rows) and image points (columns).
#[derive(Debug, Clone)]
pub struct DegreeMatrix(faer::Mat<f64>);

impl DegreeMatrix {
    /// Create a degree matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`HomographyError::RaggedDegreeMatrix`] if the rows differ in length.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, HomographyError> {
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some((row, r)) = rows
            .iter()
            .enumerate()
            .find(|(_, r)| r.as_ref().len() != ncols)
        {
            return Err(HomographyError::RaggedDegreeMatrix {
                row,
                expected: ncols,
                actual: r.as_ref().len(),
            });
        }

        Ok(Self(faer::Mat::from_fn(rows.len(), ncols, |i, j| {
            rows[i].as_ref()[j]
        })))
    }

    /// Create a degree matrix by evaluating `f(row, col)` for every entry.
    pub fn from_fn(nrows: usize, ncols: usize, f: impl FnMut(usize, usize) -> f64) -> Self {
        Self(faer::Mat::from_fn(nrows, ncols, f))
    }

    /// Number of rows (scene points).
    pub fn nrows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns (image points).
    pub fn ncols(&self) -> usize {
        self.0.ncols()
    }

    /// Score between scene point `row` and image point `col`.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.0.read(row, col)
    }

    /// Underlying dense matrix.
    pub fn as_mat(&self) -> faer::MatRef<'_, f64> {
        self.0.as_ref()
    }

    /// Column of maximum score in `row`, ties resolved to the lowest column.
    ///
    /// Returns `None` when no score in the row exceeds [`NO_MATCH_SENTINEL`].
    pub fn best_in_row(&self, row: usize) -> Option<usize> {
        let mut best = None;
        let mut max_degree = NO_MATCH_SENTINEL;
        for col in 0..self.ncols() {
            let degree = self.get(row, col);
            if degree > max_degree {
                max_degree = degree;
                best = Some(col);
            }
        }
        best
    }
}

impl From<faer::Mat<f64>> for DegreeMatrix {
    fn from(mat: faer::Mat<f64>) -> Self {
        Self(mat)
    }
}

/// Select the best image column for every row of a degree matrix.
///
/// # Errors
///
/// Returns [`HomographyError::NoMatch`] for the first row without an admissible column.
pub fn best_matches(degree: &DegreeMatrix) -> Result<Vec<usize>, HomographyError> {
    (0..degree.nrows())
        .map(|row| {
            degree
                .best_in_row(row)
                .ok_or(HomographyError::NoMatch { row })
        })
        .collect()
}

/// Pair every scene point with its highest-affinity image point.
///
/// # Arguments
///
/// * `scene` - Scene points, one per degree matrix row.
/// * `image` - Image points, one per degree matrix column.
/// * `degree` - Affinity scores with shape (scene.len(), image.len()).
///
/// # Returns
///
/// One correspondence per scene point, in scene order.
///
/// # Errors
///
/// Returns [`HomographyError::DegreeMatrixShape`] when the matrix does not match
/// the point sets and [`HomographyError::NoMatch`] when a row has no admissible
/// column. No partial result is returned.
pub fn match_correspondences(
    scene: &[Point2D],
    image: &[Point2D],
    degree: &DegreeMatrix,
) -> Result<Vec<Correspondence>, HomographyError> {
    if degree.nrows() != scene.len() || degree.ncols() != image.len() {
        return Err(HomographyError::DegreeMatrixShape {
            expected_rows: scene.len(),
            expected_cols: image.len(),
            rows: degree.nrows(),
            cols: degree.ncols(),
        });
    }

    let matches = best_matches(degree)?;

    let mut correspondences = Vec::with_capacity(scene.len());
    for (row, col) in matches.into_iter().enumerate() {
        log::trace!("Scene point {row} matched to image point {col}");
        correspondences.push(Correspondence {
            scene: scene[row],
            image: image[col],
        });
    }

    Ok(correspondences)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(n: usize) -> Vec<Point2D> {
        (0..n).map(|i| Point2D::new(i as f64, 10.0 * i as f64)).collect()
    }

    #[test]
    fn test_from_rows() -> Result<(), HomographyError> {
        let degree = DegreeMatrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]])?;
        assert_eq!(degree.nrows(), 2);
        assert_eq!(degree.ncols(), 3);
        assert_eq!(degree.get(1, 2), 6.0);
        assert_eq!(degree.as_mat().read(0, 1), 2.0);
        Ok(())
    }

    #[test]
    fn test_from_rows_ragged() {
        let err = DegreeMatrix::from_rows(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(
            err,
            HomographyError::RaggedDegreeMatrix {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_unambiguous_maximum() -> Result<(), HomographyError> {
        let scene = points(3);
        let image = points(3);
        let degree = DegreeMatrix::from_rows(&[
            [0.1, 0.9, 0.0],
            [0.0, 0.2, 0.7],
            [0.8, 0.1, 0.1],
        ])?;

        assert_eq!(best_matches(&degree)?, vec![1, 2, 0]);

        let matched = match_correspondences(&scene, &image, &degree)?;
        assert_eq!(matched.len(), 3);
        assert_eq!(matched[0], Correspondence { scene: scene[0], image: image[1] });
        assert_eq!(matched[1], Correspondence { scene: scene[1], image: image[2] });
        assert_eq!(matched[2], Correspondence { scene: scene[2], image: image[0] });
        Ok(())
    }

    #[test]
    fn test_ties_pick_lowest_column() -> Result<(), HomographyError> {
        let degree = DegreeMatrix::from_rows(&[[0.5, 0.5, 0.1], [0.0, 0.3, 0.3]])?;
        assert_eq!(best_matches(&degree)?, vec![0, 1]);
        Ok(())
    }

    #[test]
    fn test_same_image_point_may_repeat() -> Result<(), HomographyError> {
        let scene = points(2);
        let image = points(2);
        let degree = DegreeMatrix::from_rows(&[[0.9, 0.1], [0.8, 0.2]])?;
        let matched = match_correspondences(&scene, &image, &degree)?;
        assert_eq!(matched[0].image, image[0]);
        assert_eq!(matched[1].image, image[0]);
        Ok(())
    }

    #[test]
    fn test_negative_scores_still_match() -> Result<(), HomographyError> {
        let degree = DegreeMatrix::from_rows(&[[-5.0, -1.0, -3.0]])?;
        assert_eq!(best_matches(&degree)?, vec![1]);
        Ok(())
    }

    #[test]
    fn test_sentinel_row_fails() -> Result<(), HomographyError> {
        let scene = points(2);
        let image = points(2);
        let degree = DegreeMatrix::from_rows(&[
            [0.3, 0.4],
            [NO_MATCH_SENTINEL, f64::NEG_INFINITY],
        ])?;
        assert_eq!(
            match_correspondences(&scene, &image, &degree),
            Err(HomographyError::NoMatch { row: 1 })
        );
        Ok(())
    }

    #[test]
    fn test_nan_is_not_admissible() -> Result<(), HomographyError> {
        let degree = DegreeMatrix::from_rows(&[[f64::NAN, 0.1], [f64::NAN, f64::NAN]])?;
        assert_eq!(degree.best_in_row(0), Some(1));
        assert_eq!(degree.best_in_row(1), None);
        Ok(())
    }

    #[test]
    fn test_empty_columns_fail() {
        let scene = points(1);
        let degree = DegreeMatrix::from_fn(1, 0, |_, _| 0.0);
        assert_eq!(
            match_correspondences(&scene, &[], &degree),
            Err(HomographyError::NoMatch { row: 0 })
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let scene = points(3);
        let image = points(2);
        let degree = DegreeMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
        assert_eq!(
            match_correspondences(&scene, &image, &degree),
            Err(HomographyError::DegreeMatrixShape {
                expected_rows: 3,
                expected_cols: 2,
                rows: 3,
                cols: 3
            })
        );
    }
}
