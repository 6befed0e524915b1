//! Periodogram power spectral density estimation.

use std::f64::consts::{PI, TAU};

use num_complex::Complex64;
use rustfft::FftPlanner;
use serde::Serialize;
use tracing::debug;

use crate::process::Signal;
use crate::IfrError;

/// Rescales spectral amplitudes into a PSD estimate: `v^2 dt^2 / t_last / (2 pi)`.
///
/// `t_last` is the final element of `t`, taken as the observation duration.
/// The input is left untouched and a new vector is returned.
pub fn periodogram(values: &[f64], t: &[f64], dt: f64) -> Result<Vec<f64>, IfrError> {
    let t_last = *t.last().ok_or(IfrError::EmptyInput("periodogram time vector"))?;
    Ok(values
        .iter()
        .map(|v| v.powi(2) * dt.powi(2) / t_last / (2.0 * PI))
        .collect())
}

/// DFT magnitudes `|X_k|` for the non-negative frequency bins `k = 0..=N/2`.
pub fn amplitude_spectrum(signal: &[f64]) -> Vec<f64> {
    if signal.is_empty() {
        return Vec::new();
    }

    let n = signal.len();
    let mut buffer: Vec<Complex64> = signal.iter().map(|&x| Complex64::new(x, 0.0)).collect();
    let fft = FftPlanner::<f64>::new().plan_fft_forward(n);
    fft.process(&mut buffer);

    buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect()
}

/// Angular frequencies `2 pi k / (N dt)` matching [`amplitude_spectrum`] bins.
pub fn dft_frequencies(n: usize, dt: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    (0..=n / 2)
        .map(|k| TAU * k as f64 / (n as f64 * dt))
        .collect()
}

/// One-sided PSD estimate of a sampled signal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PsdEstimate {
    pub w: Vec<f64>,
    pub psd: Vec<f64>,
}

impl PsdEstimate {
    /// Rectangle-rule integral over the estimate's frequency bins.
    pub fn energy(&self) -> f64 {
        if self.w.len() < 2 {
            return 0.0;
        }
        self.psd.iter().sum::<f64>() * (self.w[1] - self.w[0])
    }
}

/// Amplitude spectrum of `signal` passed through [`periodogram`].
pub fn estimate_psd(signal: &Signal) -> Result<PsdEstimate, IfrError> {
    let time = signal.time();
    let dt = time.step();
    let amplitudes = amplitude_spectrum(signal.values());
    let psd = periodogram(&amplitudes, time.values(), dt)?;
    let w = dft_frequencies(signal.values().len(), dt);

    debug!(bins = psd.len(), dt, "estimated periodogram");
    Ok(PsdEstimate { w, psd })
}
