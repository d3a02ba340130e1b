use crate::error::SolverError;
use crate::params::point_count;

/// Uniform 1-D grid `x_i = i * h`, `i = 0 .. N-1`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    h: f64,
    positions: Vec<f64>,
}

impl Grid {
    pub fn new(length: f64, h: f64) -> Result<Grid, SolverError> {
        if !h.is_finite() || h <= 0.0 {
            return Err(SolverError::invalid(format!("h must be finite and > 0, got {h}")));
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(SolverError::invalid(format!(
                "length must be finite and > 0, got {length}"
            )));
        }

        let n = point_count(length, h);
        if n < 2 {
            return Err(SolverError::invalid(format!(
                "grid needs at least 2 points, L = {length} and h = {h} give {n}"
            )));
        }

        let positions = (0..n).map(|i| i as f64 * h).collect();
        Ok(Grid { h, positions })
    }

    pub fn n(&self) -> usize {
        self.positions.len()
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn positions(&self) -> &[f64] {
        &self.positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_multiples_of_h() {
        let g = Grid::new(0.1, 0.01).unwrap();
        assert_eq!(g.n(), 11);
        assert_eq!(g.positions()[0], 0.0);
        for (i, &x) in g.positions().iter().enumerate() {
            assert_eq!(x, i as f64 * 0.01);
        }
    }

    #[test]
    fn single_point_is_rejected() {
        let err = Grid::new(0.05, 0.1).unwrap_err();
        assert!(matches!(err, SolverError::InvalidConfig { .. }));
    }

    #[test]
    fn two_points_is_enough() {
        let g = Grid::new(1.0, 1.0).unwrap();
        assert_eq!(g.positions(), &[0.0, 1.0]);
    }

    #[test]
    fn non_positive_inputs_are_rejected() {
        assert!(Grid::new(0.1, 0.0).is_err());
        assert!(Grid::new(0.1, -0.01).is_err());
        assert!(Grid::new(0.0, 0.01).is_err());
        assert!(Grid::new(f64::NAN, 0.01).is_err());
    }
}
