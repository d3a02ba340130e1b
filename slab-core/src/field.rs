/// Fixed temperatures at `x = 0` and `x = L`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub left: f64,
    pub right: f64,
}

/// Initial field: `T_0 = left`, `T_{N-1} = right`, interior at `t_start`.
///
/// `n` must be at least 2; `Grid` guarantees it.
pub fn initial_field(n: usize, boundary: Boundary, t_start: f64) -> Vec<f64> {
    let mut field = vec![t_start; n];
    pin_boundary(&mut field, boundary);
    field
}

pub(crate) fn pin_boundary(field: &mut [f64], boundary: Boundary) {
    if let Some(first) = field.first_mut() {
        *first = boundary.left;
    }
    if let Some(last) = field.last_mut() {
        *last = boundary.right;
    }
}
