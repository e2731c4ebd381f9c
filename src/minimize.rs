use crate::error::MinimizerError;
use ndarray::prelude::*;

pub mod nelder_mead;
pub mod objective;
pub mod options;
pub mod simplex;

pub use self::nelder_mead::{Move, NelderMead, NelderMeadResult};
pub use self::objective::{CachedScorer, FnScorer, Scorer};
pub use self::options::NelderMeadOptions;
pub use self::simplex::Simplex;

pub trait Minimizer {
    type Output: MinimizerResult;

    /// Run the optimization from the initial guess `x0`
    fn minimize(&mut self, x0: ArrayView1<f64>) -> Result<Self::Output, MinimizerError>;
}

pub trait MinimizerResult {
    fn xmin(&self) -> Array1<f64>;
    fn fmin(&self) -> f64;
    fn fn_evals(&self) -> usize;
    fn iters(&self) -> usize;
    fn converged(&self) -> bool;
}
