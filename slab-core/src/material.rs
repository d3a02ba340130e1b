use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Thermophysical properties of the slab. Constant in space and time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Thermal conductivity, W/(m·K)
    pub conductivity: f64,
    /// Density, kg/m³
    pub density: f64,
    /// Specific heat, J/(kg·K)
    pub specific_heat: f64,
}

impl Material {
    /// Carbon steel, as used by the lab kernel.
    pub fn steel() -> Self {
        Self {
            conductivity: 46.0,
            density: 7800.0,
            specific_heat: 460.0,
        }
    }

    /// Normalized material: diffusivity is exactly 1, so `r = tau / h^2`.
    pub fn unit() -> Self {
        Self {
            conductivity: 1.0,
            density: 1.0,
            specific_heat: 1.0,
        }
    }

    /// Thermal diffusivity `a = lambda / (rho * c)`, m²/s.
    pub fn diffusivity(&self) -> f64 {
        self.conductivity / (self.density * self.specific_heat)
    }

    pub fn validate(&self) -> Result<(), SolverError> {
        for (name, v) in [
            ("conductivity", self.conductivity),
            ("density", self.density),
            ("specific_heat", self.specific_heat),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(SolverError::invalid(format!(
                    "material {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Material {
    fn default() -> Self {
        Material::steel()
    }
}
