/// A scalar objective over a real parameter vector.
///
/// The optimizer only ever calls [`CostFunction::cost`], so an implementation
/// must be pure: the same parameters always give the same value. A `NaN` cost
/// is treated as `+inf` by the optimizer.
///
/// Any `Fn(&[f64]) -> f64` closure is a cost function. Problems that carry
/// data (observations, weights) are better expressed as a struct holding that
/// data and implementing this trait.
///
/// # Example
///
/// ```rust
/// use planar_optim::CostFunction;
///
/// struct DistanceTo {
///     target: Vec<f64>,
/// }
///
/// impl CostFunction for DistanceTo {
///     fn cost(&self, params: &[f64]) -> f64 {
///         params
///             .iter()
///             .zip(&self.target)
///             .map(|(p, t)| (p - t).powi(2))
///             .sum()
///     }
/// }
///
/// let cost = DistanceTo { target: vec![1.0, 2.0] };
/// assert_eq!(cost.cost(&[1.0, 2.0]), 0.0);
/// ```
pub trait CostFunction {
    /// Evaluate the cost at `params`.
    fn cost(&self, params: &[f64]) -> f64;
}

impl<F> CostFunction for F
where
    F: Fn(&[f64]) -> f64,
{
    fn cost(&self, params: &[f64]) -> f64 {
        self(params)
    }
}
