use slab_core::{Material, SimulationParams, calculate, point_count, result_len};
use wasm_bindgen::prelude::*;

/// Slab solver bound to a material. Stateless between calls.
#[wasm_bindgen]
pub struct Slab {
    material: Material,
}

#[wasm_bindgen]
impl Slab {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Slab {
        Slab {
            material: Material::steel(),
        }
    }

    pub fn unit() -> Slab {
        Slab {
            material: Material::unit(),
        }
    }

    pub fn set_material(&mut self, conductivity: f64, density: f64, specific_heat: f64) -> Result<(), JsValue> {
        let material = Material {
            conductivity,
            density,
            specific_heat,
        };
        material.validate().map_err(to_js)?;
        self.material = material;
        Ok(())
    }

    pub fn diffusivity(&self) -> f64 {
        self.material.diffusivity()
    }

    /// `N = floor(L / h) + 1`, for sizing the result on the JS side.
    pub fn point_count(length: f64, h: f64) -> usize {
        point_count(length, h)
    }

    // Returns the interleaved [x0, T0, x1, T1, ...] buffer
    #[allow(clippy::too_many_arguments)]
    pub fn calculate(
        &self,
        t_left: f64,
        t_right: f64,
        t_start: f64,
        length: f64,
        h: f64,
        tau: f64,
        total_time: f64,
    ) -> Result<RunInfo, JsValue> {
        let params = SimulationParams {
            t_left,
            t_right,
            t_start,
            length,
            h,
            tau,
            total_time,
            material: self.material,
        };
        let len = result_len(&params).map_err(to_js)?;
        let mut result = Vec::new();
        result
            .try_reserve_exact(len)
            .map_err(|e| JsValue::from_str(&format!("cannot allocate {len} result values: {e}")))?;
        result.resize(len, 0.0);

        let t0 = now_ms();
        let summary = calculate(&params, &mut result).map_err(to_js)?;
        let t1 = now_ms();

        Ok(RunInfo {
            result,
            points: summary.points,
            steps: summary.steps,
            mesh_ratio: summary.mesh_ratio,
            compute_ms: t1 - t0,
        })
    }
}

impl Default for Slab {
    fn default() -> Self {
        Slab::new()
    }
}

#[wasm_bindgen]
pub struct RunInfo {
    result: Vec<f64>,
    points: usize,
    steps: usize,
    mesh_ratio: f64,
    compute_ms: f64,
}

#[wasm_bindgen]
impl RunInfo {
    pub fn result(&self) -> Vec<f64> { self.result.clone() }
    pub fn positions(&self) -> Vec<f64> { self.result.iter().step_by(2).copied().collect() }
    pub fn temperatures(&self) -> Vec<f64> { self.result.iter().skip(1).step_by(2).copied().collect() }
    pub fn center_temperature(&self) -> f64 { self.result[2 * (self.points / 2) + 1] }
    pub fn points(&self) -> usize { self.points }
    pub fn steps(&self) -> usize { self.steps }
    pub fn mesh_ratio(&self) -> f64 { self.mesh_ratio }
    pub fn compute_ms(&self) -> f64 { self.compute_ms }
}

fn to_js(e: slab_core::SolverError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
