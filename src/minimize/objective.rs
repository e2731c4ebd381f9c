use ndarray::prelude::*;
use std::collections::HashMap;

/// Objective function minimized by the simplex optimizer
///
/// Smaller scores are better. Infeasible or numerically unstable points are
/// signalled by returning `f64::INFINITY` (or NaN, which the optimizer treats
/// as infinity). Implementations may keep internal state such as a cache, but
/// should return the same score for the same point.
pub trait Scorer {
    fn score(&mut self, x: ArrayView1<f64>) -> f64;
}

impl<S> Scorer for &mut S
where
    S: Scorer + ?Sized,
{
    fn score(&mut self, x: ArrayView1<f64>) -> f64 {
        (**self).score(x)
    }
}

impl<S> Scorer for Box<S>
where
    S: Scorer + ?Sized,
{
    fn score(&mut self, x: ArrayView1<f64>) -> f64 {
        (**self).score(x)
    }
}

// Wrapper for closures
#[derive(Clone)]
pub struct FnScorer<F>(pub F)
where
    F: FnMut(ArrayView1<f64>) -> f64;

impl<F> FnScorer<F>
where
    F: FnMut(ArrayView1<f64>) -> f64,
{
    pub fn new(f: F) -> Self {
        FnScorer(f)
    }
}

impl<F> Scorer for FnScorer<F>
where
    F: FnMut(ArrayView1<f64>) -> f64,
{
    fn score(&mut self, x: ArrayView1<f64>) -> f64 {
        (self.0)(x)
    }
}

/// Memoizing wrapper around another scorer
///
/// Points are keyed by the exact bit pattern of their coordinates, so only
/// bit-identical vectors share an entry.
pub struct CachedScorer<S: Scorer> {
    inner: S,
    cache: HashMap<Vec<u64>, f64>,
    hits: usize,
    misses: usize,
}

impl<S: Scorer> CachedScorer<S> {
    pub fn new(inner: S) -> Self {
        CachedScorer {
            inner,
            cache: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Scorer> Scorer for CachedScorer<S> {
    fn score(&mut self, x: ArrayView1<f64>) -> f64 {
        let key: Vec<u64> = x.iter().map(|v| v.to_bits()).collect();
        if let Some(&f) = self.cache.get(&key) {
            self.hits += 1;
            return f;
        }
        self.misses += 1;
        let f = self.inner.score(x);
        self.cache.insert(key, f);
        f
    }
}
