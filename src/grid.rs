//! Uniform frequency and time vectors.
//!
//! Both grids are validated once at construction so the numeric routines
//! can rely on `step()` describing every gap in the vector.

use serde::Serialize;

use crate::IfrError;

/// Relative tolerance used when checking that a grid is uniformly spaced.
const UNIFORM_RTOL: f64 = 1e-6;

/// Angular frequency vector [rad/s]: non-negative, strictly increasing, uniform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyGrid {
    values: Vec<f64>,
}

impl FrequencyGrid {
    pub fn new(values: Vec<f64>) -> Result<Self, IfrError> {
        validate_uniform("frequency grid", &values)?;
        if values[0] < 0.0 {
            return Err(IfrError::InvalidGrid(format!(
                "frequency grid must be non-negative, first value is {}",
                values[0]
            )));
        }
        Ok(Self { values })
    }

    /// `n` evenly spaced points over `[start, end]`, endpoint included.
    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, IfrError> {
        Self::new(linspace(start, end, n))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Uniform spacing `w[1] - w[0]`.
    pub fn step(&self) -> f64 {
        self.values[1] - self.values[0]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index of the grid point closest to `w`.
    pub fn nearest_index(&self, w: f64) -> usize {
        nearest_index(&self.values, w)
    }
}

/// Time vector [s]: strictly increasing, uniform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    values: Vec<f64>,
}

impl TimeGrid {
    pub fn new(values: Vec<f64>) -> Result<Self, IfrError> {
        validate_uniform("time grid", &values)?;
        Ok(Self { values })
    }

    pub fn linspace(start: f64, end: f64, n: usize) -> Result<Self, IfrError> {
        Self::new(linspace(start, end, n))
    }

    /// `n` samples `t_k = k * dt` starting at zero.
    pub fn from_step(dt: f64, n: usize) -> Result<Self, IfrError> {
        Self::new((0..n).map(|k| k as f64 * dt).collect())
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn step(&self) -> f64 {
        self.values[1] - self.values[0]
    }

    /// Final time sample, taken as the observation duration.
    pub fn duration(&self) -> f64 {
        self.values[self.values.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

pub(crate) fn nearest_index(values: &[f64], x: f64) -> usize {
    values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| (*a - x).abs().total_cmp(&(*b - x).abs()))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn validate_uniform(name: &str, values: &[f64]) -> Result<(), IfrError> {
    if values.len() < 2 {
        return Err(IfrError::InvalidGrid(format!(
            "{name} needs at least two points, got {}",
            values.len()
        )));
    }

    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(IfrError::InvalidGrid(format!(
            "{name} contains non-finite value {bad}"
        )));
    }

    let step = values[1] - values[0];
    if step <= 0.0 {
        return Err(IfrError::InvalidGrid(format!(
            "{name} must be strictly increasing"
        )));
    }

    for (idx, pair) in values.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        if (gap - step).abs() > UNIFORM_RTOL * step {
            return Err(IfrError::InvalidGrid(format!(
                "{name} is not uniformly spaced at index {idx}: gap {gap} vs step {step}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_matches_endpoints_and_step() {
        let w = FrequencyGrid::linspace(0.01, 3.0, 300).unwrap();
        assert_eq!(w.len(), 300);
        assert_eq!(w.values()[0], 0.01);
        assert_eq!(w.values()[299], 3.0);
        assert!((w.step() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn frequency_grid_rejects_negative_values() {
        let err = FrequencyGrid::new(vec![-0.1, 0.0, 0.1]).unwrap_err();
        assert!(matches!(err, IfrError::InvalidGrid(_)));
    }

    #[test]
    fn grids_reject_non_uniform_spacing() {
        assert!(FrequencyGrid::new(vec![0.0, 0.1, 0.3]).is_err());
        assert!(TimeGrid::new(vec![0.0, 1.0, 1.5]).is_err());
    }

    #[test]
    fn grids_reject_single_point() {
        assert!(TimeGrid::new(vec![1.0]).is_err());
        assert!(FrequencyGrid::linspace(0.0, 1.0, 1).is_err());
    }

    #[test]
    fn time_linspace_includes_both_endpoints() {
        let t = TimeGrid::linspace(0.0, 10.0, 41).unwrap();
        assert_eq!(t.len(), 41);
        assert_eq!(t.values()[0], 0.0);
        assert_eq!(t.duration(), 10.0);
        assert!((t.step() - 0.25).abs() < 1e-12);
        assert!(TimeGrid::linspace(1.0, 0.0, 5).is_err());
    }

    #[test]
    fn time_grid_duration_is_last_sample() {
        let t = TimeGrid::from_step(0.5, 9).unwrap();
        assert_eq!(t.duration(), 4.0);
        assert_eq!(t.step(), 0.5);
    }

    #[test]
    fn nearest_index_picks_closest_point() {
        let w = FrequencyGrid::linspace(0.0, 1.0, 11).unwrap();
        assert_eq!(w.nearest_index(0.52), 5);
        assert_eq!(w.nearest_index(7.0), 10);
    }
}
