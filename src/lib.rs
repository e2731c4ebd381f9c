//! Derivative-free parameter fitting with the downhill simplex method.
//!
//! The optimizer treats the objective as a black box: anything implementing
//! [`minimize::Scorer`] maps a parameter vector to a score, smaller being
//! better. Infeasible regions are expressed by returning `f64::INFINITY`.
//!
//! ```
//! use ndarray::prelude::*;
//! use nmfit::prelude::*;
//!
//! let scorer = FnScorer::new(|x: ArrayView1<f64>| (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2));
//! let mut nm = NelderMead::new(2, scorer).unwrap();
//! let res = nm.minimize(array![0.0, 0.0].view()).unwrap();
//! assert!(res.converged());
//! assert!((res.xmin[0] - 3.0).abs() < 1e-4);
//! ```
pub mod error;
pub mod minimize;
pub mod prelude;
