use crate::{
    error::MinimizerError,
    minimize::{Minimizer, MinimizerResult, NelderMeadOptions, Scorer, Simplex},
};
use ndarray::prelude::*;
use ndarray::Zip;
use tracing::{debug, info, trace, warn};

/// Simplex move applied during one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Reflect,
    Expand,
    ContractOutside,
    ContractInside,
    Shrink,
}

/// Result of Nelder-Mead optimization
#[derive(Debug, Clone)]
pub struct NelderMeadResult {
    pub xmin: Array1<f64>,
    pub fmin: f64,
    pub iters: usize,
    pub fn_evals: usize,
    pub hit_iteration_cap: bool,
    /// Best score after initialization and after every iteration
    pub history: Array1<f64>,
}

impl MinimizerResult for NelderMeadResult {
    fn xmin(&self) -> Array1<f64> {
        self.xmin.clone()
    }

    fn fmin(&self) -> f64 {
        self.fmin
    }

    fn iters(&self) -> usize {
        self.iters
    }

    fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    fn converged(&self) -> bool {
        !self.hit_iteration_cap
    }
}

/// Downhill simplex minimizer over a black-box scorer
///
/// The optimizer is generic over the scorer so it can own one or borrow one
/// through `&mut S`. Storage is sized for N+1 vertices of N coordinates and is
/// reused across runs of the same dimension.
pub struct NelderMead<S: Scorer> {
    scorer: S,
    n: usize,
    options: NelderMeadOptions,
    simplex: Simplex,
    x_mean: Array1<f64>,
    x_r: Array1<f64>,
    x_tmp: Array1<f64>,
    initialized: bool,
    iters: usize,
    fn_evals: usize,
    hit_cap: bool,
    history: Vec<f64>,
}

// NaN is treated as the worst possible score so sorting stays total.
fn evaluate<S: Scorer>(scorer: &mut S, fn_evals: &mut usize, x: ArrayView1<f64>) -> f64 {
    *fn_evals += 1;
    let f = scorer.score(x);
    if f.is_nan() {
        debug!("scorer returned NaN at {:?}, using +inf", x.to_vec());
        f64::INFINITY
    } else {
        f
    }
}

impl<S: Scorer> NelderMead<S> {
    pub fn new(n: usize, scorer: S) -> Result<Self, MinimizerError> {
        Self::with_options(n, scorer, NelderMeadOptions::default())
    }

    pub fn with_options(
        n: usize,
        scorer: S,
        options: NelderMeadOptions,
    ) -> Result<Self, MinimizerError> {
        if n == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        options.validate()?;
        Ok(NelderMead {
            scorer,
            n,
            options,
            simplex: Simplex::new(n),
            x_mean: Array1::zeros(n),
            x_r: Array1::zeros(n),
            x_tmp: Array1::zeros(n),
            initialized: false,
            iters: 0,
            fn_evals: 0,
            hit_cap: false,
            history: Vec::new(),
        })
    }

    /// Bind a new scorer, reallocating storage if the dimension changes.
    pub fn set_scorer(&mut self, scorer: S, n: usize) -> Result<(), MinimizerError> {
        if n == 0 {
            return Err(MinimizerError::InvalidDimension);
        }
        if n != self.n {
            self.simplex = Simplex::new(n);
            self.x_mean = Array1::zeros(n);
            self.x_r = Array1::zeros(n);
            self.x_tmp = Array1::zeros(n);
            self.n = n;
        }
        self.scorer = scorer;
        self.reset();
        Ok(())
    }

    pub fn set_options(&mut self, options: NelderMeadOptions) -> Result<(), MinimizerError> {
        options.validate()?;
        self.options = options;
        Ok(())
    }

    pub fn options(&self) -> &NelderMeadOptions {
        &self.options
    }

    pub fn dimension(&self) -> usize {
        self.n
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    pub fn into_scorer(self) -> S {
        self.scorer
    }

    fn reset(&mut self) {
        self.initialized = false;
        self.iters = 0;
        self.fn_evals = 0;
        self.hit_cap = false;
        self.history.clear();
    }

    /// Build and score the starting simplex around `x0`.
    ///
    /// Vertex 0 is `x0`; vertex i perturbs coordinate i-1 by a factor of
    /// `1 + delta`, or sets it to `zero_delta` when it is exactly zero. When the
    /// previous vertex scored infinite, the factor becomes `1 + 100 * delta`.
    pub fn initialize(&mut self, x0: ArrayView1<f64>) -> Result<(), MinimizerError> {
        if x0.len() != self.n {
            return Err(MinimizerError::DimensionMismatch {
                expected: self.n,
                found: x0.len(),
            });
        }
        self.reset();

        let delta = self.options.delta;
        for i in 0..=self.n {
            let escape = i > 1 && self.simplex.score(i - 1).is_infinite();
            {
                let mut v = self.simplex.vertex_mut(i);
                v.assign(&x0);
                if i > 0 {
                    let j = i - 1;
                    v[j] = if x0[j] != 0.0 {
                        let factor = if escape { 1.0 + 100.0 * delta } else { 1.0 + delta };
                        factor * x0[j]
                    } else {
                        self.options.zero_delta
                    };
                }
            }
            if escape {
                debug!("vertex {} follows an infinite score, widening step", i);
            }
            let f = evaluate(&mut self.scorer, &mut self.fn_evals, self.simplex.vertex(i));
            self.simplex.set_score(i, f);
        }
        self.simplex.sort();
        self.initialized = true;
        self.history.push(self.simplex.best_score());
        debug!(
            "initial simplex: best {} worst {}",
            self.simplex.best_score(),
            self.simplex.worst_score()
        );
        Ok(())
    }

    /// Both the coordinate spread and the score spread are within tolerance.
    pub fn is_converged(&self) -> bool {
        self.initialized
            && self.simplex.x_spread() <= self.options.tolx
            && self.simplex.f_spread() <= self.options.tolf
    }

    /// Perform one reflect/expand/contract/shrink iteration.
    pub fn step(&mut self) -> Result<Move, MinimizerError> {
        if !self.initialized {
            return Err(MinimizerError::NotInitialized);
        }
        let opt = self.options;
        self.simplex.centroid(&mut self.x_mean);

        Zip::from(&mut self.x_r)
            .and(&self.x_mean)
            .and(self.simplex.worst())
            .for_each(|r, &m, &w| *r = m + opt.rho * (m - w));
        let f_r = evaluate(&mut self.scorer, &mut self.fn_evals, self.x_r.view());

        let f_best = self.simplex.best_score();
        let f_worst = self.simplex.worst_score();

        let mv = if f_r < f_best {
            Zip::from(&mut self.x_tmp)
                .and(&self.x_mean)
                .and(&self.x_r)
                .for_each(|e, &m, &r| *e = m + opt.chi * (r - m));
            let f_e = evaluate(&mut self.scorer, &mut self.fn_evals, self.x_tmp.view());
            if f_e < f_r {
                self.simplex.replace_worst(self.x_tmp.view(), f_e);
                Move::Expand
            } else {
                self.simplex.replace_worst(self.x_r.view(), f_r);
                Move::Reflect
            }
        } else if f_r >= f_worst {
            if f_r > f_worst {
                Zip::from(&mut self.x_tmp)
                    .and(&self.x_mean)
                    .and(self.simplex.worst())
                    .for_each(|c, &m, &w| *c = m + opt.psi * (m - w));
                let f_cc = evaluate(&mut self.scorer, &mut self.fn_evals, self.x_tmp.view());
                if f_cc < f_worst {
                    self.simplex.replace_worst(self.x_tmp.view(), f_cc);
                    Move::ContractInside
                } else {
                    self.shrink();
                    Move::Shrink
                }
            } else {
                Zip::from(&mut self.x_tmp)
                    .and(&self.x_mean)
                    .and(&self.x_r)
                    .for_each(|c, &m, &r| *c = m + opt.psi * (r - m));
                let f_c = evaluate(&mut self.scorer, &mut self.fn_evals, self.x_tmp.view());
                if f_c <= f_r {
                    self.simplex.replace_worst(self.x_tmp.view(), f_c);
                    Move::ContractOutside
                } else {
                    self.shrink();
                    Move::Shrink
                }
            }
        } else {
            self.simplex.replace_worst(self.x_r.view(), f_r);
            Move::Reflect
        };

        self.iters += 1;
        self.history.push(self.simplex.best_score());
        trace!(
            "iteration: {}\tmove: {:?}\tbest: {}",
            self.iters,
            mv,
            self.simplex.best_score()
        );
        Ok(mv)
    }

    fn shrink(&mut self) {
        let sigma = self.options.sigma;
        for i in 1..=self.n {
            self.simplex.shrink_vertex(i, sigma);
            let f = evaluate(&mut self.scorer, &mut self.fn_evals, self.simplex.vertex(i));
            self.simplex.set_score(i, f);
        }
        self.simplex.sort();
    }

    pub fn simplex(&self) -> &Simplex {
        &self.simplex
    }

    pub fn vertex(&self, i: usize) -> ArrayView1<f64> {
        self.simplex.vertex(i)
    }

    pub fn scores(&self) -> ArrayView1<f64> {
        self.simplex.scores()
    }

    /// Best point found so far; all zeros before the first run.
    pub fn best_point(&self) -> ArrayView1<f64> {
        self.simplex.best()
    }

    pub fn best_score(&self) -> f64 {
        self.simplex.best_score()
    }

    pub fn iterations(&self) -> usize {
        self.iters
    }

    pub fn fn_evals(&self) -> usize {
        self.fn_evals
    }

    pub fn hit_iteration_cap(&self) -> bool {
        self.hit_cap
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }

    fn result(&self) -> NelderMeadResult {
        NelderMeadResult {
            xmin: self.simplex.best().to_owned(),
            fmin: self.simplex.best_score(),
            iters: self.iters,
            fn_evals: self.fn_evals,
            hit_iteration_cap: self.hit_cap,
            history: Array1::from(self.history.clone()),
        }
    }
}

impl<S: Scorer> Minimizer for NelderMead<S> {
    type Output = NelderMeadResult;

    fn minimize(&mut self, x0: ArrayView1<f64>) -> Result<NelderMeadResult, MinimizerError> {
        self.initialize(x0)?;
        let max_iters = self.options.max_iterations;
        loop {
            if self.iters == max_iters {
                self.hit_cap = true;
                warn!(
                    "iteration cap {} reached, best score {}",
                    max_iters,
                    self.simplex.best_score()
                );
                break;
            }
            if self.is_converged() {
                info!(
                    "converged after {} iterations ({} evaluations), best score {}",
                    self.iters,
                    self.fn_evals,
                    self.simplex.best_score()
                );
                break;
            }
            self.step()?;
        }
        Ok(self.result())
    }
}
