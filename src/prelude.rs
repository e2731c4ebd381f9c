//! nmfit prelude.
//!
//! This module contains the most used types and traits that you can import
//! easily as a group.
//!
//! ```
//! use nmfit::prelude::*;
//!
//! ```

#[doc(no_inline)]
pub use crate::error::MinimizerError;

#[doc(no_inline)]
pub use crate::minimize::{
    CachedScorer, FnScorer, Minimizer, MinimizerResult, Move, NelderMead, NelderMeadOptions,
    NelderMeadResult, Scorer, Simplex,
};
