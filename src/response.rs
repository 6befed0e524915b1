//! Single-degree-of-freedom transfer function applied to wave spectra.
//!
//! The response spectrum is `H(w) = S(w) |1 / (w0^2 - w^2 + 2 xi w0 w i)|^2`.
//! For interval spectra the formula is applied to the lower and upper bound
//! vectors separately; the gain does not depend on the spectral amplitude and
//! is non-negative, so the bounds map onto bounds.

use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use crate::interval::IntervalVector;
use crate::structure::Oscillator;
use crate::{ensure_len, IfrError};

/// Receptance `1 / (w0^2 - w^2 + 2 xi w0 w i)`.
pub fn transfer_function(w: f64, osc: &Oscillator) -> Complex64 {
    transfer_denominator(w, osc).inv()
}

/// Magnitude-squared gain `|transfer_function|^2`.
///
/// Undamped resonance (`w == w0`, `xi == 0`) yields `+inf`.
pub fn transfer_gain(w: f64, osc: &Oscillator) -> f64 {
    1.0 / transfer_denominator(w, osc).norm_sqr()
}

fn transfer_denominator(w: f64, osc: &Oscillator) -> Complex64 {
    Complex64::new(osc.w0 * osc.w0 - w * w, 2.0 * osc.xi * osc.w0 * w)
}

/// Response spectrum of a point-valued input spectrum.
pub fn frequency_response(
    spectrum: &[f64],
    w: &[f64],
    osc: &Oscillator,
) -> Result<Vec<f64>, IfrError> {
    ensure_len("frequency_response spectrum", w.len(), spectrum.len())?;
    Ok(apply_gain(spectrum, w, osc))
}

/// Lower and upper response spectra
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseBounds {
    pub low: Vec<f64>,
    pub high: Vec<f64>,
}

impl ResponseBounds {
    pub fn len(&self) -> usize {
        self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.low.is_empty()
    }

    pub fn to_intervals(&self) -> Result<IntervalVector, IfrError> {
        IntervalVector::from_bounds(&self.low, &self.high)
    }
}

/// Response bounds of an interval-valued input spectrum.
pub fn frequency_response_interval(
    spectrum: &IntervalVector,
    w: &[f64],
    osc: &Oscillator,
) -> Result<ResponseBounds, IfrError> {
    ensure_len("frequency_response_interval spectrum", w.len(), spectrum.len())?;

    let low = apply_gain(&spectrum.lo(), w, osc);
    let high = apply_gain(&spectrum.hi(), w, osc);

    debug!(bins = w.len(), w0 = osc.w0, xi = osc.xi, "applied interval transfer function");
    Ok(ResponseBounds { low, high })
}

fn apply_gain(spectrum: &[f64], w: &[f64], osc: &Oscillator) -> Vec<f64> {
    spectrum
        .iter()
        .zip(w)
        .map(|(&s, &wn)| s * transfer_gain(wn, osc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FrequencyGrid;
    use crate::interval::Interval;
    use crate::spectrum::{jonswap_spectrum, jonswap_spectrum_interval, JonswapParams};
    use crate::structure::{wind_turbine, MonopileParams};
    use approx::assert_relative_eq;

    fn setup() -> (Vec<f64>, Vec<f64>, Oscillator) {
        let w = FrequencyGrid::linspace(0.01, 3.0, 300).unwrap();
        let spectrum = jonswap_spectrum(w.values(), &JonswapParams::default());
        let osc = wind_turbine(&MonopileParams::default());
        (w.values().to_vec(), spectrum, osc)
    }

    #[test]
    fn degenerate_intervals_reduce_to_point_response() {
        let (w, spectrum, osc) = setup();
        let point = frequency_response(&spectrum, &w, &osc).unwrap();
        let bounds =
            frequency_response_interval(&IntervalVector::from_points(&spectrum), &w, &osc)
                .unwrap();
        assert_eq!(bounds.low, point);
        assert_eq!(bounds.high, point);
    }

    #[test]
    fn interval_bounds_enclose_point_response() {
        let (w, spectrum, osc) = setup();
        let alpha = Interval::new(0.008, 0.012).unwrap();
        let intervals = jonswap_spectrum_interval(&w, &JonswapParams::default(), alpha);
        let bounds = frequency_response_interval(&intervals, &w, &osc).unwrap();
        let point = frequency_response(&spectrum, &w, &osc).unwrap();
        for i in 0..w.len() {
            assert!(bounds.low[i] <= point[i] * (1.0 + 1e-12));
            assert!(point[i] <= bounds.high[i] * (1.0 + 1e-12));
        }
        assert!(bounds.to_intervals().is_ok());
    }

    #[test]
    fn gain_matches_complex_magnitude() {
        let osc = Oscillator::new(2.0, 0.05);
        for w in [0.0, 0.7, 1.9, 2.0, 5.0] {
            assert_relative_eq!(
                transfer_gain(w, &osc),
                transfer_function(w, &osc).norm_sqr(),
                max_relative = 1e-12
            );
        }
        // static gain 1 / w0^4
        assert_relative_eq!(transfer_gain(0.0, &osc), 1.0 / 16.0, max_relative = 1e-12);
    }

    #[test]
    fn undamped_resonance_is_infinite() {
        let osc = Oscillator::new(1.5, 0.0);
        assert!(transfer_gain(1.5, &osc).is_infinite());
        let h = frequency_response(&[1.0], &[1.5], &osc).unwrap();
        assert!(h[0].is_infinite());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let osc = Oscillator::new(1.0, 0.1);
        assert!(frequency_response(&[1.0, 2.0], &[0.5], &osc).is_err());
        let intervals = IntervalVector::from_points(&[1.0]);
        assert!(matches!(
            frequency_response_interval(&intervals, &[0.1, 0.2], &osc),
            Err(IfrError::LengthMismatch { .. })
        ));
    }
}
