//! Transient 1-D heat conduction in a slab with fixed end temperatures,
//! solved with an explicit forward-time, centered-space scheme.
//!
//! A run goes grid -> initial field -> time stepping -> packing. Every call
//! is independent; nothing is kept between calls.

pub mod error;
pub mod field;
pub mod grid;
pub mod material;
pub mod pack;
pub mod params;
pub mod stepper;

use log::debug;

pub use error::SolverError;
pub use field::{Boundary, initial_field};
pub use grid::Grid;
pub use material::Material;
pub use pack::{Profile, pack_into, unpack};
pub use params::{SimulationParams, point_count};
pub use stepper::{STABILITY_LIMIT, TimeStepper, check_stability};

/// What `calculate` did, next to the values it wrote.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub points: usize,
    pub steps: usize,
    pub mesh_ratio: f64,
}

/// Runs the simulation and writes interleaved `(x_i, T_i)` pairs into `out`.
///
/// All checks (parameters, stability, buffer capacity) happen before the
/// first step; on error `out` is not modified.
pub fn calculate(params: &SimulationParams, out: &mut [f64]) -> Result<RunSummary, SolverError> {
    let plan = check(params)?;
    pack::ensure_capacity(plan.points, out.len())?;

    let (grid, mut stepper, steps) = prepare(params)?;

    stepper.run(steps);
    pack_into(grid.positions(), stepper.field(), out)?;

    Ok(RunSummary {
        points: grid.n(),
        steps,
        mesh_ratio: stepper.mesh_ratio(),
    })
}

/// Runs the simulation and returns the final profile.
pub fn simulate(params: &SimulationParams) -> Result<Profile, SolverError> {
    simulate_observed(params, |_, _| {})
}

/// Like `simulate`, calling `observer(step, field)` after each step.
pub fn simulate_observed<F>(params: &SimulationParams, observer: F) -> Result<Profile, SolverError>
where
    F: FnMut(usize, &[f64]),
{
    let (grid, mut stepper, steps) = prepare(params)?;
    stepper.run_observed(steps, observer);

    Ok(Profile {
        positions: grid.positions().to_vec(),
        temperatures: stepper.into_field(),
    })
}

/// Validates parameters, grid size and stability without allocating anything.
pub fn check(params: &SimulationParams) -> Result<RunSummary, SolverError> {
    params.validate()?;

    let points = params.point_count();
    if points < 2 {
        return Err(SolverError::invalid(format!(
            "grid needs at least 2 points, L = {} and h = {} give {points}",
            params.length, params.h
        )));
    }

    let mesh_ratio = params.mesh_ratio();
    stepper::check_stability(mesh_ratio)?;

    Ok(RunSummary {
        points,
        steps: params.steps(),
        mesh_ratio,
    })
}

/// Length of the interleaved result buffer, `2 * N`, for a valid configuration.
pub fn result_len(params: &SimulationParams) -> Result<usize, SolverError> {
    let plan = check(params)?;
    plan.points.checked_mul(2).ok_or_else(|| {
        SolverError::invalid(format!("grid of {} points is too large", plan.points))
    })
}

fn prepare(params: &SimulationParams) -> Result<(Grid, TimeStepper, usize), SolverError> {
    check(params)?;
    let grid = Grid::new(params.length, params.h)?;

    let boundary = Boundary {
        left: params.t_left,
        right: params.t_right,
    };
    let field = initial_field(grid.n(), boundary, params.t_start);

    let r = params.mesh_ratio();
    let steps = params.steps();
    debug!(
        "slab: N = {}, h = {}, tau = {}, a = {:e}, r = {r}, steps = {steps}",
        grid.n(),
        grid.h(),
        params.tau,
        params.material.diffusivity()
    );

    let stepper = TimeStepper::new(field, r, boundary)?;
    Ok((grid, stepper, steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculate_leaves_buffer_alone_on_error() {
        let mut out = vec![-1.0; 4];
        let err = calculate(&SimulationParams::default(), &mut out).unwrap_err();
        assert_eq!(
            err,
            SolverError::BufferTooSmall {
                required: 22,
                provided: 4
            }
        );
        assert!(out.iter().all(|&v| v == -1.0));
    }

    #[test]
    fn stability_is_checked_before_capacity() {
        let p = SimulationParams {
            material: Material::unit(),
            ..SimulationParams::default()
        };
        let mut out = vec![];
        assert!(matches!(calculate(&p, &mut out), Err(SolverError::Unstable { .. })));
    }

    #[test]
    fn oversized_grid_reports_capacity_before_allocating() {
        // stable (r ~ 0.128) but N is about 1e15
        let p = SimulationParams {
            length: 1e12,
            h: 1e-3,
            ..SimulationParams::default()
        };
        let mut out = vec![0.0; 22];
        match calculate(&p, &mut out) {
            Err(SolverError::BufferTooSmall { required, provided }) => {
                assert_eq!(required, 2 * p.point_count());
                assert_eq!(provided, 22);
            }
            other => panic!("expected BufferTooSmall, got {other:?}"),
        }
        assert!(out.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn check_does_not_need_a_buffer() {
        let plan = check(&SimulationParams::default()).unwrap();
        assert_eq!(plan.points, 11);
        assert_eq!(plan.steps, 200);
        assert_eq!(result_len(&SimulationParams::default()).unwrap(), 22);

        let single = SimulationParams {
            length: 0.005,
            ..SimulationParams::default()
        };
        assert!(matches!(check(&single), Err(SolverError::InvalidConfig { .. })));
    }

    #[test]
    fn saturated_point_count_is_rejected_not_overflowed() {
        // steel with h = 1 m is stable; L / h saturates usize
        let p = SimulationParams {
            length: 1e300,
            h: 1.0,
            ..SimulationParams::default()
        };
        assert_eq!(p.point_count(), usize::MAX);
        assert!(check(&p).is_ok());
        match result_len(&p) {
            Err(SolverError::InvalidConfig { reason }) => assert!(reason.contains("too large")),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn summary_reports_discretization() {
        let p = SimulationParams::default();
        let mut out = vec![0.0; 2 * p.point_count()];
        let s = calculate(&p, &mut out).unwrap();
        assert_eq!(s.points, 11);
        assert_eq!(s.steps, 200);
        assert_eq!(s.mesh_ratio, p.mesh_ratio());
    }
}
