//! Monopile structural parameters
//!
//! Reduces a hollow steel pile to the natural frequency and damping ratio of
//! an equivalent single-degree-of-freedom oscillator.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::IfrError;

/// Hollow circular steel pile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonopileParams {
    /// Outer radius R [m]
    pub outer_radius: f64,
    /// Inner radius r [m]
    pub inner_radius: f64,
    /// Pile height [m]
    pub pile_height: f64,
    /// Steel density [kg/m^3]
    pub steel_density: f64,
    /// Viscous damping coefficient c [N s/m]
    pub damping: f64,
    /// Lateral stiffness k [N/m]
    pub stiffness: f64,
}

impl Default for MonopileParams {
    fn default() -> Self {
        Self {
            outer_radius: 3.0,
            inner_radius: 2.9,
            pile_height: 1.0,
            steel_density: 7850.0,
            damping: 1e5,
            stiffness: 1e7,
        }
    }
}

impl MonopileParams {
    pub fn validate(&self) -> Result<(), IfrError> {
        let positive = [
            ("outer_radius", self.outer_radius),
            ("pile_height", self.pile_height),
            ("steel_density", self.steel_density),
            ("stiffness", self.stiffness),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(IfrError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if !(self.inner_radius.is_finite()
            && self.inner_radius >= 0.0
            && self.inner_radius < self.outer_radius)
        {
            return Err(IfrError::InvalidConfig(
                "inner_radius must be in [0, outer_radius)".to_string(),
            ));
        }
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(IfrError::InvalidConfig(
                "damping must be finite and >= 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Annulus area `pi (R^2 - r^2)`.
    pub fn cross_section_area(&self) -> f64 {
        (self.outer_radius.powi(2) - self.inner_radius.powi(2)) * PI
    }

    pub fn volume(&self) -> f64 {
        self.cross_section_area() * self.pile_height
    }

    pub fn mass(&self) -> f64 {
        self.steel_density * self.volume()
    }
}

/// Single-degree-of-freedom oscillator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    /// Natural angular frequency [rad/s]
    pub w0: f64,
    /// Damping ratio
    pub xi: f64,
}

impl Oscillator {
    pub fn new(w0: f64, xi: f64) -> Self {
        Self { w0, xi }
    }
}

/// Natural frequency `sqrt(k/m)` and damping ratio `c / (2 w0 m)` of the pile.
///
/// Non-positive geometry or material values propagate as Inf/NaN.
pub fn wind_turbine(params: &MonopileParams) -> Oscillator {
    let m = params.mass();
    let w0 = (params.stiffness / m).sqrt();
    let xi = params.damping / (w0 * 2.0 * m);
    Oscillator { w0, xi }
}
