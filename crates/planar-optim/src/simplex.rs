use crate::cost::CostFunction;

/// A simplex vertex and its cached cost.
#[derive(Debug, Clone)]
pub(crate) struct Vertex {
    pub params: Vec<f64>,
    pub cost: f64,
}

/// The working simplex of a single optimizer call.
///
/// Holds `n + 1` vertices for an `n`-dimensional problem. Vertices are only
/// ordered by cost right after [`Simplex::sort`].
pub(crate) struct Simplex<'a, C: ?Sized> {
    cost_fn: &'a C,
    vertices: Vec<Vertex>,
    evaluations: usize,
}

impl<'a, C> Simplex<'a, C>
where
    C: CostFunction + ?Sized,
{
    /// Build the initial simplex: the guess plus one vertex per axis offset by `step`.
    pub fn new(cost_fn: &'a C, initial_guess: &[f64], step: f64) -> Self {
        let n = initial_guess.len();
        let mut simplex = Self {
            cost_fn,
            vertices: Vec::with_capacity(n + 1),
            evaluations: 0,
        };

        let first = simplex.evaluate(initial_guess.to_vec());
        simplex.vertices.push(first);

        for i in 0..n {
            let mut params = initial_guess.to_vec();
            params[i] += step;
            let vertex = simplex.evaluate(params);
            simplex.vertices.push(vertex);
        }

        simplex
    }

    /// Evaluate the cost of `params`, mapping `NaN` to `+inf`.
    pub fn evaluate(&mut self, params: Vec<f64>) -> Vertex {
        self.evaluations += 1;
        let cost = self.cost_fn.cost(&params);
        let cost = if cost.is_nan() { f64::INFINITY } else { cost };
        Vertex { params, cost }
    }

    /// Number of cost evaluations so far.
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Sort vertices by ascending cost. Ties keep their current order.
    pub fn sort(&mut self) {
        self.vertices.sort_by(|a, b| a.cost.total_cmp(&b.cost));
    }

    pub fn best(&self) -> &Vertex {
        &self.vertices[0]
    }

    pub fn worst(&self) -> &Vertex {
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn second_worst(&self) -> &Vertex {
        let n = self.vertices.len();
        &self.vertices[n.saturating_sub(2)]
    }

    /// Cost difference between the worst and the best vertex.
    pub fn spread(&self) -> f64 {
        self.worst().cost - self.best().cost
    }

    /// Centroid of every vertex except the worst one.
    pub fn centroid(&self) -> Vec<f64> {
        let n = self.vertices.len() - 1;
        let mut centroid = vec![0.0; self.best().params.len()];
        for vertex in &self.vertices[..n] {
            for (c, p) in centroid.iter_mut().zip(&vertex.params) {
                *c += p;
            }
        }
        for c in centroid.iter_mut() {
            *c /= n as f64;
        }
        centroid
    }

    pub fn replace_worst(&mut self, vertex: Vertex) {
        let last = self.vertices.len() - 1;
        self.vertices[last] = vertex;
    }

    /// Move every vertex but the best toward the best one by `factor`.
    pub fn shrink(&mut self, factor: f64) {
        let best = self.vertices[0].params.clone();
        for i in 1..self.vertices.len() {
            let params = step_from(&best, &self.vertices[i].params, factor);
            self.vertices[i] = self.evaluate(params);
        }
    }

    pub fn into_best(mut self) -> Vertex {
        self.vertices.swap_remove(0)
    }
}

/// `origin + factor * (toward - origin)`, element-wise.
pub(crate) fn step_from(origin: &[f64], toward: &[f64], factor: f64) -> Vec<f64> {
    origin
        .iter()
        .zip(toward)
        .map(|(o, t)| o + factor * (t - o))
        .collect()
}
