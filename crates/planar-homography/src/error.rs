use planar_optim::OptimizerError;

/// Error types for homography estimation, matching and projection.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum HomographyError {
    /// Invalid input data - insufficient correspondences to determine the 8 parameters
    #[error("Homography estimation requires at least {required} correspondences, got {actual}")]
    InsufficientCorrespondences {
        /// Minimum number of correspondences required
        required: usize,
        /// Actual number of correspondences provided
        actual: usize,
    },

    /// Invalid input data - mismatched array lengths
    #[error("Mismatched array lengths: {left_name} ({left_len}) != {right_name} ({right_len})")]
    MismatchedArrayLengths {
        /// Name of the first array
        left_name: &'static str,
        /// Length of the first array
        left_len: usize,
        /// Name of the second array
        right_name: &'static str,
        /// Length of the second array
        right_len: usize,
    },

    /// Invalid input data - degree matrix shape does not match the point sets
    #[error("Degree matrix is {rows}x{cols}, expected {expected_rows}x{expected_cols}")]
    DegreeMatrixShape {
        /// Number of scene points
        expected_rows: usize,
        /// Number of image points
        expected_cols: usize,
        /// Actual number of rows
        rows: usize,
        /// Actual number of columns
        cols: usize,
    },

    /// Invalid input data - degree matrix rows have different lengths
    #[error("Degree matrix row {row} has {actual} columns, expected {expected}")]
    RaggedDegreeMatrix {
        /// Offending row index
        row: usize,
        /// Number of columns of the first row
        expected: usize,
        /// Number of columns of the offending row
        actual: usize,
    },

    /// No admissible image point for a scene point
    #[error("No valid match found for scene point {row}")]
    NoMatch {
        /// Row of the degree matrix without an admissible column
        row: usize,
    },

    /// The optimizer failed
    #[error("Optimization failed: {0}")]
    Optimizer(#[from] OptimizerError),

    /// The homography cannot be inverted
    #[error("Homography is singular (determinant {determinant:e})")]
    SingularMatrix {
        /// Determinant of the matrix
        determinant: f64,
    },

    /// The homogeneous coordinate of a projected point is zero
    #[error("Point ({x}, {y}) projects to infinity")]
    DegenerateProjection {
        /// x coordinate of the input point
        x: f64,
        /// y coordinate of the input point
        y: f64,
    },

    /// The homography has a zero bottom-right entry and cannot be normalized
    #[error("Homography bottom-right entry is zero, cannot normalize to 8 parameters")]
    NotNormalizable,
}
