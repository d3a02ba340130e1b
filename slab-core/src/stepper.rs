use log::{trace, warn};

use crate::error::SolverError;
use crate::field::{Boundary, pin_boundary};

/// Largest mesh ratio for which the explicit FTCS scheme is stable.
pub const STABILITY_LIMIT: f64 = 0.5;

/// Fails with `Unstable` when `r > 0.5`, `InvalidConfig` when `r` is negative or not finite.
pub fn check_stability(r: f64) -> Result<(), SolverError> {
    if !r.is_finite() || r < 0.0 {
        return Err(SolverError::invalid(format!(
            "mesh ratio must be finite and >= 0, got {r}"
        )));
    }
    if r > STABILITY_LIMIT {
        warn!("mesh ratio r = {r} exceeds stability limit {STABILITY_LIMIT}");
        return Err(SolverError::Unstable {
            ratio: r,
            limit: STABILITY_LIMIT,
        });
    }
    Ok(())
}

/// Explicit FTCS time stepper with Dirichlet ends.
///
/// Holds two buffers: `field` is the current time level, `next` is written by
/// the kernel and the two swap after every step.
pub struct TimeStepper {
    r: f64,
    boundary: Boundary,
    field: Vec<f64>,
    next: Vec<f64>,
}

impl TimeStepper {
    /// `r = a * tau / h^2`. Fails with `Unstable` when `r > 0.5`.
    pub fn new(field: Vec<f64>, r: f64, boundary: Boundary) -> Result<TimeStepper, SolverError> {
        if field.len() < 2 {
            return Err(SolverError::invalid(format!(
                "field needs at least 2 points, got {}",
                field.len()
            )));
        }
        check_stability(r)?;

        let next = vec![0.0; field.len()];
        let mut stepper = TimeStepper {
            r,
            boundary,
            field,
            next,
        };
        stepper.apply_dirichlet_bc();
        Ok(stepper)
    }

    // ---- Accessors ----

    pub fn n(&self) -> usize {
        self.field.len()
    }

    pub fn mesh_ratio(&self) -> f64 {
        self.r
    }

    pub fn field(&self) -> &[f64] {
        &self.field
    }

    pub fn into_field(self) -> Vec<f64> {
        self.field
    }

    // ---- Stepping ----

    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Like `run`, calling `observer(step, field)` after each step with
    /// boundaries already re-pinned. `step` counts from 1.
    pub fn run_observed<F>(&mut self, steps: usize, mut observer: F)
    where
        F: FnMut(usize, &[f64]),
    {
        for k in 1..=steps {
            self.step();
            trace!("step {k}/{steps}");
            observer(k, &self.field);
        }
    }

    pub fn step(&mut self) {
        let n = self.n();
        let r = self.r;

        for i in 1..(n - 1) {
            let u = self.field[i];
            let left = self.field[i - 1];
            let right = self.field[i + 1];

            // left + right first so the stencil is mirror-symmetric bit for bit
            let lap = (left + right) - 2.0 * u;
            self.next[i] = u + r * lap;
        }

        self.swap_buffers();
        self.apply_dirichlet_bc();
    }

    fn apply_dirichlet_bc(&mut self) {
        pin_boundary(&mut self.field, self.boundary);
    }

    fn swap_buffers(&mut self) {
        std::mem::swap(&mut self.field, &mut self.next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const B: Boundary = Boundary {
        left: -100.0,
        right: 100.0,
    };

    #[test]
    fn rejects_ratio_above_limit() {
        let err = TimeStepper::new(vec![0.0; 5], 0.5000001, B).err().unwrap();
        assert!(matches!(err, SolverError::Unstable { limit, .. } if limit == 0.5));
    }

    #[test]
    fn accepts_ratio_at_limit() {
        assert!(TimeStepper::new(vec![0.0; 5], 0.5, B).is_ok());
    }

    #[test]
    fn rejects_negative_ratio() {
        let err = TimeStepper::new(vec![0.0; 5], -0.1, B).err().unwrap();
        assert!(matches!(err, SolverError::InvalidConfig { .. }));
    }

    #[test]
    fn at_limit_interior_is_neighbour_average() {
        let mut s = TimeStepper::new(vec![-100.0, 20.0, 20.0, 20.0, 100.0], 0.5, B).unwrap();
        s.step();
        let f = s.field();
        assert_abs_diff_eq!(f[1], -40.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f[2], 20.0, epsilon = 1e-12);
        assert_abs_diff_eq!(f[3], 60.0, epsilon = 1e-12);
    }

    #[test]
    fn update_reads_only_previous_level() {
        // an in-place sweep would feed the new f[1] into f[2]
        let mut s = TimeStepper::new(vec![0.0, 0.0, 0.0, 0.0], 0.25, Boundary { left: 8.0, right: 0.0 })
            .unwrap();
        s.step();
        assert_eq!(s.field(), &[8.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn two_point_field_never_changes() {
        let mut s = TimeStepper::new(vec![1.0, 3.0], 0.5, Boundary { left: 1.0, right: 3.0 }).unwrap();
        s.run(10);
        assert_eq!(s.field(), &[1.0, 3.0]);
    }

    #[test]
    fn observer_sees_every_step() {
        let mut s = TimeStepper::new(vec![-100.0, 20.0, 20.0, 100.0], 0.3, B).unwrap();
        let mut seen = Vec::new();
        s.run_observed(4, |k, f| {
            assert_eq!(f[0], -100.0);
            assert_eq!(f[3], 100.0);
            seen.push(k);
        });
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[test]
    fn constructor_pins_boundaries() {
        let s = TimeStepper::new(vec![5.0; 4], 0.1, B).unwrap();
        assert_eq!(s.n(), 4);
        assert_eq!(s.field(), &[-100.0, 5.0, 5.0, 100.0]);
    }
}
