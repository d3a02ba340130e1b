use crate::error::SolverError;

/// Writes `[x_0, T_0, x_1, T_1, ...]` into `out`.
///
/// `out` may be longer than `2N`; the tail is left untouched.
pub fn pack_into(positions: &[f64], temperatures: &[f64], out: &mut [f64]) -> Result<(), SolverError> {
    if positions.len() != temperatures.len() {
        return Err(SolverError::invalid(format!(
            "grid has {} points but field has {}",
            positions.len(),
            temperatures.len()
        )));
    }
    ensure_capacity(positions.len(), out.len())?;

    for ((pair, &x), &t) in out.chunks_exact_mut(2).zip(positions).zip(temperatures) {
        pair[0] = x;
        pair[1] = t;
    }
    Ok(())
}

/// Fails with `BufferTooSmall` when `provided < 2 * n`.
pub fn ensure_capacity(n: usize, provided: usize) -> Result<(), SolverError> {
    let required = n.saturating_mul(2);
    if provided < required {
        return Err(SolverError::BufferTooSmall { required, provided });
    }
    Ok(())
}

/// Splits the first `2n` values of an interleaved buffer into `(x, T)`.
pub fn unpack(buffer: &[f64], n: usize) -> Result<(Vec<f64>, Vec<f64>), SolverError> {
    ensure_capacity(n, buffer.len())?;
    let pairs = &buffer[..2 * n];
    let xs = pairs.iter().step_by(2).copied().collect();
    let ts = pairs.iter().skip(1).step_by(2).copied().collect();
    Ok((xs, ts))
}

/// Final temperature profile of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub positions: Vec<f64>,
    pub temperatures: Vec<f64>,
}

impl Profile {
    pub fn n(&self) -> usize {
        self.positions.len()
    }

    /// `T[N / 2]`, the value reported as the slab centre.
    pub fn center_temperature(&self) -> Option<f64> {
        self.temperatures.get(self.temperatures.len() / 2).copied()
    }

    pub fn to_interleaved(&self) -> Result<Vec<f64>, SolverError> {
        let mut out = vec![0.0; 2 * self.n()];
        pack_into(&self.positions, &self.temperatures, &mut out)?;
        Ok(out)
    }
}
