//! Simulation harness
//!
//! Runs the complete wave-to-response pipeline for one monopile: spectrum,
//! interval spectrum, seeded signal realisation, periodogram and response
//! bounds.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::grid::{FrequencyGrid, TimeGrid};
use crate::interval::{Interval, IntervalVector};
use crate::periodogram::{estimate_psd, PsdEstimate};
use crate::process::{theoretical_variance, Signal};
use crate::response::{frequency_response, frequency_response_interval, ResponseBounds};
use crate::spectrum::{jonswap_spectrum_interval, JonswapParams, Spectrum};
use crate::structure::{wind_turbine, MonopileParams, Oscillator};
use crate::IfrError;

/// Simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Lowest angular frequency [rad/s]
    pub w_min: f64,
    /// Highest angular frequency [rad/s]
    pub w_max: f64,
    /// Number of frequency bins
    pub n_freq: usize,
    /// Sampling step of the synthesised signal [s]
    pub dt: f64,
    /// Number of time samples
    pub n_time: usize,
    pub jonswap: JonswapParams,
    /// Lower bound of the uncertain energy scale
    pub alpha_lo: f64,
    /// Upper bound of the uncertain energy scale
    pub alpha_hi: f64,
    /// Extra relative half-width applied to every spectral interval
    pub relative_width: f64,
    pub monopile: MonopileParams,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            w_min: 0.01,
            w_max: 3.0,
            n_freq: 300,
            dt: 0.25,
            n_time: 4096,
            jonswap: JonswapParams::default(),
            alpha_lo: 0.008,
            alpha_hi: 0.012,
            relative_width: 0.0,
            monopile: MonopileParams::default(),
            seed: 42,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), IfrError> {
        if !(self.w_min.is_finite() && self.w_max.is_finite()) || self.w_min < 0.0 {
            return Err(IfrError::InvalidConfig(
                "w_min and w_max must be finite and w_min >= 0".to_string(),
            ));
        }
        if self.w_max <= self.w_min {
            return Err(IfrError::InvalidConfig(
                "w_max must be greater than w_min".to_string(),
            ));
        }
        if self.n_freq < 2 {
            return Err(IfrError::InvalidConfig(
                "n_freq must be at least 2".to_string(),
            ));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(IfrError::InvalidConfig("dt must be > 0".to_string()));
        }
        if self.n_time < 2 {
            return Err(IfrError::InvalidConfig(
                "n_time must be at least 2".to_string(),
            ));
        }
        if !(self.alpha_lo.is_finite() && self.alpha_hi.is_finite()) || self.alpha_lo < 0.0 {
            return Err(IfrError::InvalidConfig(
                "alpha bounds must be finite and non-negative".to_string(),
            ));
        }
        if self.alpha_hi < self.alpha_lo {
            return Err(IfrError::InvalidConfig(
                "alpha_hi must be greater than or equal to alpha_lo".to_string(),
            ));
        }
        if !(self.relative_width.is_finite() && (0.0..1.0).contains(&self.relative_width)) {
            return Err(IfrError::InvalidConfig(
                "relative_width must be in [0, 1)".to_string(),
            ));
        }
        self.jonswap.validate()?;
        self.monopile.validate()?;
        Ok(())
    }

    pub fn frequency_grid(&self) -> Result<FrequencyGrid, IfrError> {
        FrequencyGrid::linspace(self.w_min, self.w_max, self.n_freq)
    }

    pub fn time_grid(&self) -> Result<TimeGrid, IfrError> {
        TimeGrid::from_step(self.dt, self.n_time)
    }

    pub fn alpha_interval(&self) -> Result<Interval, IfrError> {
        Interval::new(self.alpha_lo, self.alpha_hi)
    }

    /// Largest angular frequency the time grid resolves without aliasing.
    pub fn nyquist(&self) -> f64 {
        std::f64::consts::PI / self.dt
    }
}

/// Scalar results of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    pub w0: f64,
    pub xi: f64,
    pub peak_frequency: f64,
    /// `sum S dw` of the nominal spectrum
    pub spectral_energy: f64,
    /// Ensemble variance `2 sum S dw` of the synthesised process
    pub theoretical_variance: f64,
    /// Sample variance of the realisation
    pub signal_variance: f64,
    /// `sum S dw` of the periodogram estimate
    pub psd_energy: f64,
    /// `sum H dw` of the nominal response
    pub response_energy: f64,
    pub response_energy_low: f64,
    pub response_energy_high: f64,
}

/// Full pipeline output
#[derive(Debug, Clone)]
pub struct SimResult {
    pub oscillator: Oscillator,
    pub spectrum: Spectrum,
    pub spectrum_bounds: IntervalVector,
    pub signal: Signal,
    pub psd: PsdEstimate,
    pub response: Vec<f64>,
    pub response_bounds: ResponseBounds,
    pub summary: SimSummary,
}

/// Run the wave-to-response pipeline
pub fn run_simulation(config: &SimConfig) -> Result<SimResult, IfrError> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

    let grid = config.frequency_grid()?;
    let dw = grid.step();
    if config.w_max > config.nyquist() {
        debug!(
            w_max = config.w_max,
            nyquist = config.nyquist(),
            "frequency grid extends beyond the signal Nyquist frequency"
        );
    }

    // Nominal and interval spectra
    let spectrum = Spectrum::jonswap(grid, &config.jonswap);
    let widening = Interval::from_relative(1.0, config.relative_width);
    let spectrum_bounds: IntervalVector = jonswap_spectrum_interval(
        spectrum.grid().values(),
        &config.jonswap,
        config.alpha_interval()?,
    )
    .iter()
    .map(|&s| s * widening)
    .collect();
    debug!(
        bins = spectrum.grid().len(),
        peak = spectrum.peak_frequency(),
        "generated JONSWAP spectrum"
    );

    // Time-domain realisation and its periodogram
    let signal = Signal::synthesize(&spectrum, config.time_grid()?, &mut rng)?;
    let psd = estimate_psd(&signal)?;

    // Structural response
    let oscillator = wind_turbine(&config.monopile);
    let w = spectrum.grid().values();
    let response = frequency_response(spectrum.density(), w, &oscillator)?;
    let response_bounds = frequency_response_interval(&spectrum_bounds, w, &oscillator)?;

    let summary = SimSummary {
        w0: oscillator.w0,
        xi: oscillator.xi,
        peak_frequency: spectrum.peak_frequency(),
        spectral_energy: spectrum.energy(),
        theoretical_variance: theoretical_variance(spectrum.density(), spectrum.grid())?,
        signal_variance: signal.variance(),
        psd_energy: psd.energy(),
        response_energy: response.iter().sum::<f64>() * dw,
        response_energy_low: response_bounds.low.iter().sum::<f64>() * dw,
        response_energy_high: response_bounds.high.iter().sum::<f64>() * dw,
    };

    info!(
        w0 = summary.w0,
        xi = summary.xi,
        peak = summary.peak_frequency,
        response_low = summary.response_energy_low,
        response_high = summary.response_energy_high,
        "simulation complete"
    );

    Ok(SimResult {
        oscillator,
        spectrum,
        spectrum_bounds,
        signal,
        psd,
        response,
        response_bounds,
        summary,
    })
}
