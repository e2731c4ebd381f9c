use crate::error::MinimizerError;
use serde::{Deserialize, Serialize};

/// Tunable coefficients and tolerances of a Nelder-Mead run
///
/// Fields missing from a deserialized configuration take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NelderMeadOptions {
    /// Reflection coefficient, > 0 (default 1)
    pub rho: f64,
    /// Expansion coefficient, > 1 (default 2)
    pub chi: f64,
    /// Contraction coefficient, in (0, 1) (default 0.5)
    pub psi: f64,
    /// Shrink coefficient, in (0, 1) (default 0.5)
    pub sigma: f64,
    /// Largest coordinate gap between neighbouring vertices at convergence (default 1e-6)
    pub tolx: f64,
    /// Largest score gap to the best vertex at convergence (default 1e-6)
    pub tolf: f64,
    /// Relative perturbation of non-zero coordinates in the initial simplex (default 0.05)
    pub delta: f64,
    /// Value used for coordinates that are exactly zero in the initial guess (default 0.00025)
    pub zero_delta: f64,
    /// Iteration cap (default 10000)
    pub max_iterations: usize,
}

impl Default for NelderMeadOptions {
    fn default() -> Self {
        Self {
            rho: 1.0,
            chi: 2.0,
            psi: 0.5,
            sigma: 0.5,
            tolx: 1e-6,
            tolf: 1e-6,
            delta: 0.05,
            zero_delta: 0.00025,
            max_iterations: 10_000,
        }
    }
}

impl NelderMeadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rho(&mut self, rho: f64) -> &mut Self {
        self.rho = rho;
        self
    }

    pub fn set_chi(&mut self, chi: f64) -> &mut Self {
        self.chi = chi;
        self
    }

    pub fn set_psi(&mut self, psi: f64) -> &mut Self {
        self.psi = psi;
        self
    }

    pub fn set_sigma(&mut self, sigma: f64) -> &mut Self {
        self.sigma = sigma;
        self
    }

    pub fn set_tolx(&mut self, tol: f64) -> &mut Self {
        self.tolx = tol;
        self
    }

    pub fn set_tolf(&mut self, tol: f64) -> &mut Self {
        self.tolf = tol;
        self
    }

    pub fn set_delta(&mut self, delta: f64) -> &mut Self {
        self.delta = delta;
        self
    }

    pub fn set_zero_delta(&mut self, zero_delta: f64) -> &mut Self {
        self.zero_delta = zero_delta;
        self
    }

    pub fn set_max_iterations(&mut self, iters: usize) -> &mut Self {
        self.max_iterations = iters;
        self
    }

    /// Reject coefficient and tolerance values the algorithm cannot work with.
    pub fn validate(&self) -> Result<(), MinimizerError> {
        let fields = [
            ("rho", self.rho),
            ("chi", self.chi),
            ("psi", self.psi),
            ("sigma", self.sigma),
            ("tolx", self.tolx),
            ("tolf", self.tolf),
            ("delta", self.delta),
            ("zero_delta", self.zero_delta),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(MinimizerError::InvalidParameters(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }

        let invalid = |msg: String| -> Result<(), MinimizerError> {
            Err(MinimizerError::InvalidParameters(msg))
        };
        if self.rho <= 0.0 {
            return invalid(format!("rho must be positive, got {}", self.rho));
        }
        if self.chi <= 1.0 {
            return invalid(format!("chi must be greater than 1, got {}", self.chi));
        }
        if self.psi <= 0.0 || self.psi >= 1.0 {
            return invalid(format!("psi must lie in (0, 1), got {}", self.psi));
        }
        if self.sigma <= 0.0 || self.sigma >= 1.0 {
            return invalid(format!("sigma must lie in (0, 1), got {}", self.sigma));
        }
        if self.tolx <= 0.0 {
            return invalid(format!("tolx must be positive, got {}", self.tolx));
        }
        if self.tolf <= 0.0 {
            return invalid(format!("tolf must be positive, got {}", self.tolf));
        }
        if self.delta <= 0.0 {
            return invalid(format!("delta must be positive, got {}", self.delta));
        }
        if self.zero_delta == 0.0 {
            return invalid("zero_delta must be non-zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let opt = NelderMeadOptions::default();
        assert_eq!(opt.rho, 1.0);
        assert_eq!(opt.chi, 2.0);
        assert_eq!(opt.psi, 0.5);
        assert_eq!(opt.sigma, 0.5);
        assert_eq!(opt.tolx, 1e-6);
        assert_eq!(opt.tolf, 1e-6);
        assert_eq!(opt.delta, 0.05);
        assert_eq!(opt.zero_delta, 0.00025);
        assert_eq!(opt.max_iterations, 10_000);
        assert!(opt.validate().is_ok());
    }

    #[test]
    fn setters_chain() {
        let mut opt = NelderMeadOptions::new();
        opt.set_tolx(1e-8).set_tolf(1e-9).set_max_iterations(5);
        assert_eq!(opt.tolx, 1e-8);
        assert_eq!(opt.tolf, 1e-9);
        assert_eq!(opt.max_iterations, 5);
    }

    fn assert_rejected(mutate: impl Fn(&mut NelderMeadOptions)) {
        let mut opt = NelderMeadOptions::default();
        mutate(&mut opt);
        assert!(
            matches!(opt.validate(), Err(MinimizerError::InvalidParameters(_))),
            "accepted {:?}",
            opt
        );
    }

    #[test]
    fn rejects_bad_coefficients() {
        assert_rejected(|o| o.rho = 0.0);
        assert_rejected(|o| o.chi = 1.0);
        assert_rejected(|o| o.psi = 1.0);
        assert_rejected(|o| o.psi = 0.0);
        assert_rejected(|o| o.sigma = 1.5);
        assert_rejected(|o| o.tolx = 0.0);
        assert_rejected(|o| o.tolf = -1e-6);
        assert_rejected(|o| o.delta = 0.0);
        assert_rejected(|o| o.zero_delta = 0.0);
        assert_rejected(|o| o.rho = f64::NAN);
        assert_rejected(|o| o.tolf = f64::INFINITY);
    }

    #[test]
    fn error_message_names_field() {
        let mut opt = NelderMeadOptions::default();
        opt.set_sigma(2.0);
        let msg = opt.validate().unwrap_err().to_string();
        assert!(msg.contains("sigma"), "{}", msg);
    }
}
