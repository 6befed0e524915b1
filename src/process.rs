//! Random-phase synthesis of a stationary wave elevation signal
//!
//! Each frequency bin contributes one cosine whose amplitude follows from the
//! spectral density and whose phase is drawn from the caller's random source.

use std::f64::consts::{SQRT_2, TAU};

use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::Serialize;
use tracing::debug;

use crate::grid::{FrequencyGrid, TimeGrid};
use crate::spectrum::Spectrum;
use crate::{ensure_len, IfrError};

/// Draws one realisation `sum_n sqrt(2) A_n cos(w_n t + phi_n)` with `A_n = sqrt(2 S_n dw)`.
///
/// Every call consumes `w.len()` uniform phases from `rng`, so repeated calls on
/// the same generator yield independent realisations.
pub fn stochastic_process<R>(
    spectrum: &[f64],
    w: &FrequencyGrid,
    t: &[f64],
    rng: &mut R,
) -> Result<Vec<f64>, IfrError>
where
    R: Rng + ?Sized,
{
    ensure_len("stochastic_process spectrum", w.len(), spectrum.len())?;

    let dw = w.step();
    let phase_dist = Uniform::new(0.0, TAU);
    let mut signal = vec![0.0; t.len()];

    for (&wn, &sn) in w.values().iter().zip(spectrum) {
        let amplitude = if wn == 0.0 { 0.0 } else { (2.0 * sn * dw).sqrt() };
        let phi = phase_dist.sample(rng);
        let scale = SQRT_2 * amplitude;
        for (x, &tk) in signal.iter_mut().zip(t) {
            *x += scale * (wn * tk + phi).cos();
        }
    }

    debug!(
        bins = w.len(),
        samples = t.len(),
        "synthesised stochastic process"
    );
    Ok(signal)
}

/// Ensemble variance of [`stochastic_process`] output: `2 sum S_n dw` over non-zero bins.
pub fn theoretical_variance(spectrum: &[f64], w: &FrequencyGrid) -> Result<f64, IfrError> {
    ensure_len("theoretical_variance spectrum", w.len(), spectrum.len())?;
    let dw = w.step();
    Ok(w.values()
        .iter()
        .zip(spectrum)
        .filter(|(wn, _)| **wn != 0.0)
        .map(|(_, &sn)| 2.0 * sn * dw)
        .sum())
}

/// Signal samples bound to their time grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    time: TimeGrid,
    values: Vec<f64>,
}

impl Signal {
    pub fn new(time: TimeGrid, values: Vec<f64>) -> Result<Self, IfrError> {
        ensure_len("signal samples", time.len(), values.len())?;
        Ok(Self { time, values })
    }

    pub fn synthesize<R>(
        spectrum: &Spectrum,
        time: TimeGrid,
        rng: &mut R,
    ) -> Result<Self, IfrError>
    where
        R: Rng + ?Sized,
    {
        let values = stochastic_process(spectrum.density(), spectrum.grid(), time.values(), rng)?;
        Ok(Self { time, values })
    }

    pub fn time(&self) -> &TimeGrid {
        &self.time
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn mean(&self) -> f64 {
        self.values.iter().sum::<f64>() / self.values.len() as f64
    }

    /// Population variance of the samples.
    pub fn variance(&self) -> f64 {
        let mean = self.mean();
        self.values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / self.values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectrum::JonswapParams;
    use approx::assert_relative_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Grid whose bins are integer multiples of 0.01 rad/s, sampled over exactly
    /// one common period so the cross terms vanish.
    fn periodic_setup() -> (Spectrum, TimeGrid) {
        let w = FrequencyGrid::linspace(0.01, 3.0, 300).unwrap();
        let spectrum = Spectrum::jonswap(w, &JonswapParams::default());
        let n = 2048;
        let t = TimeGrid::from_step(TAU / 0.01 / n as f64, n).unwrap();
        (spectrum, t)
    }

    #[test]
    fn repeated_draws_share_variance_but_not_samples() {
        let (spectrum, t) = periodic_setup();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let a = Signal::synthesize(&spectrum, t.clone(), &mut rng).unwrap();
        let b = Signal::synthesize(&spectrum, t, &mut rng).unwrap();

        let expected = theoretical_variance(spectrum.density(), spectrum.grid()).unwrap();
        assert_relative_eq!(a.variance(), expected, max_relative = 1e-6);
        assert_relative_eq!(b.variance(), expected, max_relative = 1e-6);
        assert_relative_eq!(expected, 2.0 * spectrum.energy(), max_relative = 1e-12);
        assert_ne!(a.values(), b.values());
    }

    #[test]
    fn same_seed_reproduces_realisation() {
        let (spectrum, t) = periodic_setup();
        let mut rng_a = ChaCha8Rng::seed_from_u64(3);
        let mut rng_b = ChaCha8Rng::seed_from_u64(3);
        let a = Signal::synthesize(&spectrum, t.clone(), &mut rng_a).unwrap();
        let b = Signal::synthesize(&spectrum, t, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_frequency_bin_contributes_nothing() {
        let w = FrequencyGrid::new(vec![0.0, 1.0]).unwrap();
        let t = [0.0, 0.5, 1.0];
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let x = stochastic_process(&[100.0, 0.0], &w, &t, &mut rng).unwrap();
        assert!(x.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn signal_rejects_sample_count_off_grid() {
        let t = TimeGrid::from_step(1.0, 3).unwrap();
        assert!(matches!(
            Signal::new(t.clone(), vec![0.0; 2]),
            Err(IfrError::LengthMismatch { expected: 3, got: 2, .. })
        ));
        let signal = Signal::new(t, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(signal.mean(), 2.0);
        assert_relative_eq!(signal.variance(), 2.0 / 3.0, max_relative = 1e-12);
    }

    #[test]
    fn mismatched_spectrum_is_rejected() {
        let w = FrequencyGrid::linspace(0.0, 1.0, 4).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = stochastic_process(&[1.0; 3], &w, &[0.0, 1.0], &mut rng).unwrap_err();
        assert!(matches!(err, IfrError::LengthMismatch { expected: 4, got: 3, .. }));
    }
}
