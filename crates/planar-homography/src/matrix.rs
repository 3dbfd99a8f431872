use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::HomographyError;
use crate::linalg;

/// Number of free homography parameters.
pub const NUM_PARAMS: usize = 8;

/// The 8 free entries of a homography, in row-major order, with the
/// bottom-right entry fixed to 1.
pub type HomographyParams = [f64; NUM_PARAMS];

/// Parameters of the identity homography.
pub const IDENTITY_PARAMS: HomographyParams = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];

/// Determinant magnitude below which a homography is treated as singular.
pub const SINGULAR_DET_EPS: f64 = 1e-10;

/// A 3x3 planar homography in row-major order.
///
/// Serialized as three rows of three numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HomographyMatrix([[f64; 3]; 3]);

impl HomographyMatrix {
    /// Wrap a row-major 3x3 array.
    pub const fn new(data: [[f64; 3]; 3]) -> Self {
        Self(data)
    }

    /// The identity homography.
    pub const fn identity() -> Self {
        Self([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Build the matrix `[[h0, h1, h2], [h3, h4, h5], [h6, h7, 1]]`.
    pub fn from_params(h: &HomographyParams) -> Self {
        Self([[h[0], h[1], h[2]], [h[3], h[4], h[5]], [h[6], h[7], 1.0]])
    }

    /// The 8 free parameters after scaling the matrix so its bottom-right entry is 1.
    ///
    /// # Errors
    ///
    /// Returns [`HomographyError::NotNormalizable`] when the bottom-right entry is zero.
    pub fn to_params(&self) -> Result<HomographyParams, HomographyError> {
        let m = &self.0;
        let scale = m[2][2];
        if scale == 0.0 {
            return Err(HomographyError::NotNormalizable);
        }

        Ok([
            m[0][0] / scale,
            m[0][1] / scale,
            m[0][2] / scale,
            m[1][0] / scale,
            m[1][1] / scale,
            m[1][2] / scale,
            m[2][0] / scale,
            m[2][1] / scale,
        ])
    }

    /// Row-major view of the matrix entries.
    pub const fn as_array(&self) -> &[[f64; 3]; 3] {
        &self.0
    }

    /// Determinant of the matrix.
    pub fn determinant(&self) -> f64 {
        linalg::det_mat33(&self.0)
    }

    /// Inverse of the matrix.
    ///
    /// # Errors
    ///
    /// Returns [`HomographyError::SingularMatrix`] when `|det| < SINGULAR_DET_EPS`
    /// or the determinant is not finite.
    pub fn inverse(&self) -> Result<Self, HomographyError> {
        let determinant = self.determinant();
        if !determinant.is_finite() || determinant.abs() < SINGULAR_DET_EPS {
            return Err(HomographyError::SingularMatrix { determinant });
        }

        let mut inv = linalg::adjugate_mat33(&self.0);
        let inv_det = 1.0 / determinant;
        for val in inv.iter_mut().flatten() {
            *val *= inv_det;
        }

        Ok(Self(inv))
    }

    /// Apply the matrix to a homogeneous 3d vector.
    pub fn mul_vec3(&self, v: &[f64; 3]) -> [f64; 3] {
        let mut out = [0.0; 3];
        linalg::mat33_mul_vec3(&self.0, v, &mut out);
        out
    }

    /// Composition `self * rhs`: applies `rhs` first, then `self`.
    pub fn compose(&self, rhs: &Self) -> Self {
        Self(linalg::mat33_mul_mat33(&self.0, &rhs.0))
    }
}

impl Default for HomographyMatrix {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<[[f64; 3]; 3]> for HomographyMatrix {
    fn from(data: [[f64; 3]; 3]) -> Self {
        Self(data)
    }
}

impl From<HomographyMatrix> for [[f64; 3]; 3] {
    fn from(m: HomographyMatrix) -> Self {
        m.0
    }
}

impl fmt::Display for HomographyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[{:>12.6}, {:>12.6}, {:>12.6}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}
