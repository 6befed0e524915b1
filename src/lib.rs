//! IFR - Interval Frequency Response
//!
//! Wave-loading response analysis for an offshore monopile with
//! interval-valued spectral uncertainty: JONSWAP spectrum generation,
//! random-phase signal synthesis, periodogram estimation and a
//! single-degree-of-freedom transfer function applied to point and
//! interval spectra.

pub mod grid;
pub mod interval;
pub mod periodogram;
pub mod process;
pub mod response;
pub mod sim;
pub mod spectrum;
pub mod structure;

use thiserror::Error;

// Re-export main types
pub use grid::{FrequencyGrid, TimeGrid};
pub use interval::{Interval, IntervalVector};
pub use periodogram::{estimate_psd, periodogram, PsdEstimate};
pub use process::{stochastic_process, Signal};
pub use response::{frequency_response, frequency_response_interval, ResponseBounds};
pub use sim::{run_simulation, SimConfig, SimResult, SimSummary};
pub use spectrum::{jonswap_spectrum, JonswapParams, Spectrum};
pub use structure::{wind_turbine, MonopileParams, Oscillator};

#[derive(Debug, Error)]
pub enum IfrError {
    #[error("{context} length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid grid: {0}")]
    InvalidGrid(String),
    #[error("invalid interval: lower bound {lo} exceeds upper bound {hi}")]
    InvalidInterval { lo: f64, hi: f64 },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("{0} must not be empty")]
    EmptyInput(&'static str),
}

pub(crate) fn ensure_len(
    context: &'static str,
    expected: usize,
    actual: usize,
) -> Result<(), IfrError> {
    if expected == actual {
        return Ok(());
    }

    Err(IfrError::LengthMismatch {
        context,
        expected,
        got: actual,
    })
}
