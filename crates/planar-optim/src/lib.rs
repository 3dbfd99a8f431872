#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]
//!
//! # Planar Optim
//!
//! Minimizes a scalar cost over a real parameter vector using only cost
//! evaluations, no derivatives.
//!
//! ## Example
//!
//! ```rust
//! use planar_optim::NelderMead;
//!
//! // minimize (x - 3)^2 + (y + 1)^2
//! let cost = |p: &[f64]| (p[0] - 3.0).powi(2) + (p[1] + 1.0).powi(2);
//!
//! let optimizer = NelderMead {
//!     tolerance: 1e-12,
//!     ..Default::default()
//! };
//! let result = optimizer.optimize(&cost, &[0.0, 0.0])?;
//!
//! assert!((result.params[0] - 3.0).abs() < 1e-3);
//! assert!((result.params[1] + 1.0).abs() < 1e-3);
//! # Ok::<(), planar_optim::OptimizerError>(())
//! ```

/// Objective functions accepted by the optimizer.
pub mod cost;

/// Nelder-Mead downhill simplex search.
pub mod nelder_mead;

mod simplex;

pub use cost::CostFunction;
pub use nelder_mead::{minimize, NelderMead, OptimizerError, OptimizerResult};
