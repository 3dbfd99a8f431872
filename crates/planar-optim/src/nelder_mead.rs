//! Nelder-Mead downhill simplex optimizer.
//!
//! The method keeps `n + 1` candidate points in an `n`-dimensional parameter
//! space and repeatedly replaces the worst one by reflecting, expanding or
//! contracting it through the centroid of the others, or shrinks the whole
//! simplex toward the best point. Only cost values are needed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cost::CostFunction;
use crate::simplex::{step_from, Simplex};

/// Errors that can occur during optimization.
#[derive(Debug, Error, PartialEq)]
pub enum OptimizerError {
    /// The initial guess has no parameters.
    #[error("Initial guess must contain at least one parameter")]
    EmptyInitialGuess,

    /// A configuration value or the initial guess is out of range.
    #[error("Invalid optimizer parameter: {0}")]
    InvalidParameter(String),

    /// The iteration budget ran out before the simplex collapsed below the tolerance.
    #[error("Nelder-Mead did not converge within {max_iterations} iterations (cost spread {spread:e})")]
    ConvergenceFailure {
        /// Iteration budget that was exhausted.
        max_iterations: usize,
        /// Cost difference between the worst and best vertex when the search stopped.
        spread: f64,
    },
}

/// Result of a converged optimization run.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerResult {
    /// Best parameter vector found.
    pub params: Vec<f64>,
    /// Cost at `params`.
    pub cost: f64,
    /// Number of iterations performed until convergence.
    pub iterations: usize,
    /// Number of cost function evaluations.
    pub evaluations: usize,
}

/// Kind of simplex update applied in one iteration.
#[derive(Debug, Clone, Copy)]
enum Move {
    Reflection,
    Expansion,
    Contraction,
    Shrink,
}

/// Nelder-Mead optimizer configuration.
///
/// Missing fields take their default value when deserialized, so a partial
/// configuration such as `{"tolerance": 1e-8}` is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMead {
    /// Convergence threshold on the cost spread between the worst and best vertex.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Offset added along each axis to build the initial simplex.
    pub initial_step: f64,
    /// Reflection coefficient.
    pub reflection: f64,
    /// Expansion coefficient.
    pub expansion: f64,
    /// Contraction coefficient.
    pub contraction: f64,
    /// Shrink coefficient.
    pub shrink: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 5000,
            initial_step: 0.05,
            reflection: 1.0,
            expansion: 2.0,
            contraction: 0.5,
            shrink: 0.5,
        }
    }
}

impl NelderMead {
    /// Create a new optimizer with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Minimize `cost_fn` starting from `initial_guess`.
    ///
    /// # Arguments
    ///
    /// * `cost_fn` - The objective to minimize.
    /// * `initial_guess` - Starting parameter vector. Its length sets the problem dimension.
    ///
    /// # Returns
    ///
    /// The best vertex of the simplex once the cost spread drops below `tolerance`.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::ConvergenceFailure`] when `max_iterations` is
    /// exhausted, and a validation error for an empty or non-finite initial
    /// guess or an invalid configuration.
    pub fn optimize<C>(
        &self,
        cost_fn: &C,
        initial_guess: &[f64],
    ) -> Result<OptimizerResult, OptimizerError>
    where
        C: CostFunction + ?Sized,
    {
        self.validate(initial_guess)?;

        let mut simplex = Simplex::new(cost_fn, initial_guess, self.initial_step);

        for iteration in 0..self.max_iterations {
            simplex.sort();

            let spread = simplex.spread();
            if spread < self.tolerance {
                let evaluations = simplex.evaluations();
                let best = simplex.into_best();
                log::debug!(
                    "Nelder-Mead converged after {} iterations ({} evaluations), cost: {:e}",
                    iteration,
                    evaluations,
                    best.cost
                );
                return Ok(OptimizerResult {
                    params: best.params,
                    cost: best.cost,
                    iterations: iteration,
                    evaluations,
                });
            }

            let centroid = simplex.centroid();

            let reflected_params = step_from(&centroid, &simplex.worst().params, -self.reflection);
            let reflected = simplex.evaluate(reflected_params);

            let applied = if reflected.cost < simplex.best().cost {
                let expanded_params = step_from(&centroid, &reflected.params, self.expansion);
                let expanded = simplex.evaluate(expanded_params);
                if expanded.cost < reflected.cost {
                    simplex.replace_worst(expanded);
                    Move::Expansion
                } else {
                    simplex.replace_worst(reflected);
                    Move::Reflection
                }
            } else if reflected.cost < simplex.second_worst().cost {
                simplex.replace_worst(reflected);
                Move::Reflection
            } else {
                let contracted_params =
                    step_from(&centroid, &simplex.worst().params, self.contraction);
                let contracted = simplex.evaluate(contracted_params);
                if contracted.cost < simplex.worst().cost {
                    simplex.replace_worst(contracted);
                    Move::Contraction
                } else {
                    simplex.shrink(self.shrink);
                    Move::Shrink
                }
            };

            log::trace!(
                "Iteration {}: {:?}, best cost: {:e}, spread: {:e}",
                iteration,
                applied,
                simplex.best().cost,
                spread
            );
        }

        simplex.sort();
        let spread = simplex.spread();
        log::debug!(
            "Nelder-Mead stopped after {} iterations without converging, spread: {:e}",
            self.max_iterations,
            spread
        );

        Err(OptimizerError::ConvergenceFailure {
            max_iterations: self.max_iterations,
            spread,
        })
    }

    fn validate(&self, initial_guess: &[f64]) -> Result<(), OptimizerError> {
        if initial_guess.is_empty() {
            return Err(OptimizerError::EmptyInitialGuess);
        }

        if let Some(i) = initial_guess.iter().position(|v| !v.is_finite()) {
            return Err(OptimizerError::InvalidParameter(format!(
                "initial guess entry {i} is not finite"
            )));
        }

        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }

        if !self.initial_step.is_finite() || self.initial_step == 0.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "initial step must be finite and non-zero, got {}",
                self.initial_step
            )));
        }

        if self.reflection.is_nan() || self.reflection <= 0.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "reflection must be positive, got {}",
                self.reflection
            )));
        }

        if self.expansion.is_nan() || self.expansion <= 1.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "expansion must be greater than 1, got {}",
                self.expansion
            )));
        }

        if !(0.0..1.0).contains(&self.contraction) || self.contraction == 0.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "contraction must be in (0, 1), got {}",
                self.contraction
            )));
        }

        if !(0.0..1.0).contains(&self.shrink) || self.shrink == 0.0 {
            return Err(OptimizerError::InvalidParameter(format!(
                "shrink must be in (0, 1), got {}",
                self.shrink
            )));
        }

        Ok(())
    }
}

/// Minimize `cost_fn` with the default simplex coefficients.
///
/// Shorthand for [`NelderMead::optimize`] that returns only the best
/// parameter vector.
///
/// # Arguments
///
/// * `cost_fn` - The objective to minimize.
/// * `initial_guess` - Starting parameter vector.
/// * `tolerance` - Convergence threshold on the cost spread (usually `1e-6`).
/// * `max_iterations` - Iteration budget (usually `5000`).
pub fn minimize<C>(
    cost_fn: &C,
    initial_guess: &[f64],
    tolerance: f64,
    max_iterations: usize,
) -> Result<Vec<f64>, OptimizerError>
where
    C: CostFunction + ?Sized,
{
    let optimizer = NelderMead {
        tolerance,
        max_iterations,
        ..Default::default()
    };
    optimizer
        .optimize(cost_fn, initial_guess)
        .map(|result| result.params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rosenbrock(p: &[f64]) -> f64 {
        (1.0 - p[0]).powi(2) + 100.0 * (p[1] - p[0] * p[0]).powi(2)
    }

    #[test]
    fn test_optimizer_default() {
        let optimizer = NelderMead::default();
        assert_eq!(optimizer.tolerance, 1e-6);
        assert_eq!(optimizer.max_iterations, 5000);
        assert_eq!(optimizer.initial_step, 0.05);
        assert_eq!(optimizer.reflection, 1.0);
        assert_eq!(optimizer.expansion, 2.0);
        assert_eq!(optimizer.contraction, 0.5);
        assert_eq!(optimizer.shrink, 0.5);
    }

    #[test]
    fn test_shifted_quadratic() -> Result<(), OptimizerError> {
        let cost = |p: &[f64]| (p[0] - 3.0).powi(2) + (p[1] + 1.0).powi(2) + 0.5;
        let optimizer = NelderMead {
            tolerance: 1e-12,
            ..Default::default()
        };
        let result = optimizer.optimize(&cost, &[0.0, 0.0])?;

        assert_relative_eq!(result.params[0], 3.0, epsilon = 1e-4);
        assert_relative_eq!(result.params[1], -1.0, epsilon = 1e-4);
        assert_relative_eq!(result.cost, 0.5, epsilon = 1e-8);
        assert!(result.iterations > 0);
        assert!(result.evaluations > result.iterations);
        Ok(())
    }

    #[test]
    fn test_rosenbrock() -> Result<(), OptimizerError> {
        let optimizer = NelderMead {
            tolerance: 1e-12,
            max_iterations: 20_000,
            ..Default::default()
        };
        let result = optimizer.optimize(&rosenbrock, &[-1.2, 1.0])?;

        assert_relative_eq!(result.params[0], 1.0, epsilon = 1e-2);
        assert_relative_eq!(result.params[1], 1.0, epsilon = 1e-2);
        Ok(())
    }

    #[test]
    fn test_already_converged() -> Result<(), OptimizerError> {
        // a flat cost converges before any move is made
        let cost = |_: &[f64]| 1.0;
        let result = NelderMead::new().optimize(&cost, &[4.0, 5.0])?;
        assert_eq!(result.params, vec![4.0, 5.0]);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.evaluations, 3);
        Ok(())
    }

    #[test]
    fn test_deterministic() -> Result<(), OptimizerError> {
        let optimizer = NelderMead {
            max_iterations: 20_000,
            ..Default::default()
        };
        let first = optimizer.optimize(&rosenbrock, &[-1.2, 1.0])?;
        let second = optimizer.optimize(&rosenbrock, &[-1.2, 1.0])?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_zero_iterations_fails() {
        let cost = |p: &[f64]| p[0] * p[0];
        let optimizer = NelderMead {
            max_iterations: 0,
            ..Default::default()
        };
        let err = optimizer.optimize(&cost, &[1.0]).unwrap_err();
        match err {
            OptimizerError::ConvergenceFailure {
                max_iterations,
                spread,
            } => {
                assert_eq!(max_iterations, 0);
                assert_relative_eq!(spread, 1.05 * 1.05 - 1.0, epsilon = 1e-12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_budget_exhausted() {
        let optimizer = NelderMead {
            tolerance: 0.0,
            max_iterations: 10,
            ..Default::default()
        };
        let err = optimizer.optimize(&rosenbrock, &[-1.2, 1.0]).unwrap_err();
        assert!(matches!(
            err,
            OptimizerError::ConvergenceFailure {
                max_iterations: 10,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        let cost = |p: &[f64]| p.iter().sum::<f64>();
        let optimizer = NelderMead::default();

        assert_eq!(
            optimizer.optimize(&cost, &[]),
            Err(OptimizerError::EmptyInitialGuess)
        );
        assert!(matches!(
            optimizer.optimize(&cost, &[0.0, f64::NAN]),
            Err(OptimizerError::InvalidParameter(_))
        ));

        let bad_tolerance = NelderMead {
            tolerance: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad_tolerance.optimize(&cost, &[0.0]),
            Err(OptimizerError::InvalidParameter(_))
        ));

        let bad_step = NelderMead {
            initial_step: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_step.optimize(&cost, &[0.0]),
            Err(OptimizerError::InvalidParameter(_))
        ));

        let bad_contraction = NelderMead {
            contraction: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            bad_contraction.optimize(&cost, &[0.0]),
            Err(OptimizerError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_infinite_region_is_avoided() -> Result<(), OptimizerError> {
        // cost is undefined for x > 2, the minimum sits at the border of that region
        let cost = |p: &[f64]| {
            if p[0] > 2.0 {
                f64::INFINITY
            } else {
                (p[0] - 2.0).powi(2)
            }
        };
        let optimizer = NelderMead {
            tolerance: 1e-12,
            ..Default::default()
        };
        let result = optimizer.optimize(&cost, &[0.0])?;
        assert!(result.params[0] <= 2.0);
        assert_relative_eq!(result.params[0], 2.0, epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_minimize_shorthand() -> Result<(), OptimizerError> {
        let cost = |p: &[f64]| (p[0] + 0.5).powi(2);
        let params = minimize(&cost, &[1.0], 1e-10, 5000)?;
        assert_relative_eq!(params[0], -0.5, epsilon = 1e-3);
        Ok(())
    }

    #[test]
    fn test_partial_config_from_json() {
        let optimizer: NelderMead =
            serde_json::from_str(r#"{"tolerance": 1e-8, "max_iterations": 100}"#).unwrap();
        assert_eq!(optimizer.tolerance, 1e-8);
        assert_eq!(optimizer.max_iterations, 100);
        assert_eq!(optimizer.initial_step, 0.05);
        assert_eq!(optimizer.expansion, 2.0);
    }
}
