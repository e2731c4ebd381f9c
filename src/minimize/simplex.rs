use ndarray::prelude::*;
use ndarray::Zip;
use std::mem;

/// Vertices of an N-dimensional simplex together with their scores
///
/// The vertex matrix has shape (N+1, N). Rows are kept ascending by score, so
/// row 0 holds the best vertex and row N the worst. Only the minimizer reorders
/// or overwrites rows.
#[derive(Debug, Clone)]
pub struct Simplex {
    vertices: Array2<f64>,
    scores: Array1<f64>,
    scratch: Array2<f64>,
    order: Vec<usize>,
}

impl Simplex {
    pub fn new(n: usize) -> Self {
        Simplex {
            vertices: Array2::zeros((n + 1, n)),
            scores: Array1::zeros(n + 1),
            scratch: Array2::zeros((n + 1, n)),
            order: (0..=n).collect(),
        }
    }

    pub fn dim(&self) -> usize {
        self.vertices.ncols()
    }

    pub fn vertices(&self) -> ArrayView2<f64> {
        self.vertices.view()
    }

    pub fn vertex(&self, i: usize) -> ArrayView1<f64> {
        self.vertices.row(i)
    }

    pub(crate) fn vertex_mut(&mut self, i: usize) -> ArrayViewMut1<f64> {
        self.vertices.row_mut(i)
    }

    pub fn scores(&self) -> ArrayView1<f64> {
        self.scores.view()
    }

    pub fn score(&self, i: usize) -> f64 {
        self.scores[i]
    }

    pub(crate) fn set_score(&mut self, i: usize, f: f64) {
        self.scores[i] = f;
    }

    pub fn best(&self) -> ArrayView1<f64> {
        self.vertices.row(0)
    }

    pub fn worst(&self) -> ArrayView1<f64> {
        self.vertices.row(self.dim())
    }

    pub fn best_score(&self) -> f64 {
        self.scores[0]
    }

    pub fn worst_score(&self) -> f64 {
        self.scores[self.dim()]
    }

    /// Reorder vertices ascending by score.
    ///
    /// The sort is stable, so equal scores keep their current relative order.
    /// `total_cmp` places +inf after every finite score.
    pub(crate) fn sort(&mut self) {
        let scores = &self.scores;
        self.order.iter_mut().enumerate().for_each(|(i, k)| *k = i);
        self.order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));

        let sorted_scores: Array1<f64> = self.order.iter().map(|&k| self.scores[k]).collect();
        for (i, &k) in self.order.iter().enumerate() {
            self.scratch.row_mut(i).assign(&self.vertices.row(k));
        }
        mem::swap(&mut self.vertices, &mut self.scratch);
        self.scores = sorted_scores;
    }

    /// Largest absolute coordinate difference between vertex i and vertex i+1.
    pub fn x_spread(&self) -> f64 {
        let n = self.dim();
        let mut max = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                // f64::max ignores NaN operands
                max = max.max((self.vertices[(i + 1, j)] - self.vertices[(i, j)]).abs());
            }
        }
        max
    }

    /// Largest absolute score difference between any vertex and the best.
    pub fn f_spread(&self) -> f64 {
        let f0 = self.scores[0];
        self.scores
            .iter()
            .skip(1)
            .fold(0.0_f64, |max, &f| max.max((f - f0).abs()))
    }

    /// Mean of every vertex except the worst, written into `out`.
    pub fn centroid(&self, out: &mut Array1<f64>) {
        let n = self.dim();
        out.fill(0.0);
        for row in self.vertices.slice(s![..n, ..]).rows() {
            *out += &row;
        }
        *out /= n as f64;
    }

    /// Overwrite the worst vertex and restore the sorted order.
    pub(crate) fn replace_worst(&mut self, x: ArrayView1<f64>, f: f64) {
        let n = self.dim();
        self.vertices.row_mut(n).assign(&x);
        self.scores[n] = f;
        self.sort();
    }

    /// Move vertex `i` toward the best vertex: best + sigma * (v_i - best).
    ///
    /// The score of the vertex is left stale; the caller rescores it.
    pub(crate) fn shrink_vertex(&mut self, i: usize, sigma: f64) {
        let (head, mut tail) = self.vertices.view_mut().split_at(Axis(0), i);
        let best = head.row(0);
        Zip::from(tail.row_mut(0))
            .and(&best)
            .for_each(|v, &b| *v = b + sigma * (*v - b));
    }
}
