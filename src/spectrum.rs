//! JONSWAP wave energy spectrum.

use serde::{Deserialize, Serialize};

use crate::grid::FrequencyGrid;
use crate::interval::{Interval, IntervalVector};
use crate::{ensure_len, IfrError};

/// Gravitational acceleration [m/s^2]
pub const GRAVITY: f64 = 9.81;

/// JONSWAP shape parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JonswapParams {
    /// Energy scale (Phillips constant)
    pub alpha: f64,
    /// Peak angular frequency [rad/s]
    pub w_p: f64,
    /// Peak enhancement factor
    pub gamma: f64,
    /// Peak width below `w_p`
    pub sigma1: f64,
    /// Peak width above `w_p`
    pub sigma2: f64,
}

impl Default for JonswapParams {
    fn default() -> Self {
        Self {
            alpha: 0.01,
            w_p: 0.5,
            gamma: 3.3,
            sigma1: 0.07,
            sigma2: 0.09,
        }
    }
}

impl JonswapParams {
    pub fn validate(&self) -> Result<(), IfrError> {
        let fields = [
            ("alpha", self.alpha),
            ("w_p", self.w_p),
            ("gamma", self.gamma),
            ("sigma1", self.sigma1),
            ("sigma2", self.sigma2),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(IfrError::InvalidConfig(format!("{name} must be finite")));
        }
        if self.alpha < 0.0 {
            return Err(IfrError::InvalidConfig(
                "alpha must be non-negative".to_string(),
            ));
        }
        if self.w_p <= 0.0 || self.gamma <= 0.0 || self.sigma1 <= 0.0 || self.sigma2 <= 0.0 {
            return Err(IfrError::InvalidConfig(
                "w_p, gamma, sigma1 and sigma2 must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Peak enhancement exponent `r(w)`; `sigma1` applies up to the peak, `sigma2` beyond.
    pub fn peak_shape(&self, w: f64) -> f64 {
        let sigma = if w <= self.w_p { self.sigma1 } else { self.sigma2 };
        (-(w - self.w_p).powi(2) / (2.0 * sigma.powi(2) * self.w_p.powi(2))).exp()
    }

    /// Spectral density at a single frequency. Zero frequency maps to zero.
    pub fn density(&self, w: f64) -> f64 {
        if w == 0.0 {
            return 0.0;
        }
        // The cutoff underflows to zero well before `1 / w^5` overflows.
        let cutoff = (-1.25 * (self.w_p / w).powi(4)).exp();
        if cutoff == 0.0 {
            return 0.0;
        }
        self.alpha * GRAVITY.powi(2) / w.powi(5) * cutoff * self.gamma.powf(self.peak_shape(w))
    }
}

/// Evaluates the JONSWAP spectrum at every frequency in `w`.
pub fn jonswap_spectrum(w: &[f64], params: &JonswapParams) -> Vec<f64> {
    w.iter().map(|&wn| params.density(wn)).collect()
}

/// JONSWAP spectrum with an uncertain energy scale.
///
/// The density is linear in `alpha`, so evaluating the two bounds of a
/// non-negative `alpha` interval encloses every admissible spectrum exactly.
pub fn jonswap_spectrum_interval(
    w: &[f64],
    params: &JonswapParams,
    alpha: Interval,
) -> IntervalVector {
    let unit = JonswapParams {
        alpha: 1.0,
        ..*params
    };
    w.iter().map(|&wn| alpha * unit.density(wn)).collect()
}

/// Spectral densities bound to the frequency grid they were sampled on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Spectrum {
    grid: FrequencyGrid,
    density: Vec<f64>,
}

impl Spectrum {
    pub fn new(grid: FrequencyGrid, density: Vec<f64>) -> Result<Self, IfrError> {
        ensure_len("spectrum density", grid.len(), density.len())?;
        Ok(Self { grid, density })
    }

    pub fn jonswap(grid: FrequencyGrid, params: &JonswapParams) -> Self {
        let density = jonswap_spectrum(grid.values(), params);
        Self { grid, density }
    }

    pub fn grid(&self) -> &FrequencyGrid {
        &self.grid
    }

    pub fn density(&self) -> &[f64] {
        &self.density
    }

    pub fn peak_index(&self) -> usize {
        self.density
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    pub fn peak_frequency(&self) -> f64 {
        self.grid.values()[self.peak_index()]
    }

    /// Rectangle-rule integral `sum S dw`.
    pub fn energy(&self) -> f64 {
        self.density.iter().sum::<f64>() * self.grid.step()
    }
}
