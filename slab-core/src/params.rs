use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::material::Material;

/// Inputs of one simulation run. Temperatures in °C, lengths in m, times in s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    pub t_left: f64,
    pub t_right: f64,
    pub t_start: f64,
    /// Slab thickness L
    pub length: f64,
    /// Spatial step
    pub h: f64,
    /// Time step
    pub tau: f64,
    pub total_time: f64,
    #[serde(default)]
    pub material: Material,
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            t_left: -100.0,
            t_right: 100.0,
            t_start: 20.0,
            length: 0.1,
            h: 0.01,
            tau: 0.01,
            total_time: 2.0,
            material: Material::steel(),
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), SolverError> {
        for (name, v) in [("length", self.length), ("h", self.h), ("tau", self.tau)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SolverError::invalid(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        if !self.total_time.is_finite() || self.total_time < 0.0 {
            return Err(SolverError::invalid(format!(
                "total_time must be finite and >= 0, got {}",
                self.total_time
            )));
        }
        for (name, v) in [
            ("t_left", self.t_left),
            ("t_right", self.t_right),
            ("t_start", self.t_start),
        ] {
            if !v.is_finite() {
                return Err(SolverError::invalid(format!("{name} must be finite, got {v}")));
            }
        }
        self.material.validate()
    }

    /// `N = floor(L / h) + 1`. Callers size the output buffer as `2 * N`.
    pub fn point_count(&self) -> usize {
        point_count(self.length, self.h)
    }

    /// `r = a * tau / h^2`
    pub fn mesh_ratio(&self) -> f64 {
        self.material.diffusivity() * self.tau / (self.h * self.h)
    }

    /// `round(total_time / tau)`
    pub fn steps(&self) -> usize {
        (self.total_time / self.tau).round() as usize
    }
}

/// Number of grid points for a slab of `length` sampled every `h`.
///
/// Returns 0 when the inputs cannot describe a grid (non-positive or non-finite).
pub fn point_count(length: f64, h: f64) -> usize {
    if !(length > 0.0 && h > 0.0) || !length.is_finite() || !h.is_finite() {
        return 0;
    }
    ((length / h).floor() as usize).saturating_add(1)
}
