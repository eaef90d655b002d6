use gridpath_core::Coord;

/// Cost of one diagonal step, and the diagonal factor of [`octile`].
pub const SQRT2: f64 = std::f64::consts::SQRT_2;

/// Octile distance between two cells: the exact shortest-path length on an
/// unobstructed 8-connected grid with orthogonal cost 1 and diagonal cost
/// [`SQRT2`]. Admissible and consistent for that cost model.
#[inline]
pub fn octile(a: Coord, b: Coord) -> f64 {
    octile_with(a, b, SQRT2)
}

/// [`octile`] with an explicit diagonal step cost.
///
/// Stays admissible and consistent as long as `diagonal` is in `[1, 2]`.
#[inline]
pub fn octile_with(a: Coord, b: Coord, diagonal: f64) -> f64 {
    let dx = (a.row - b.row).abs();
    let dy = (a.col - b.col).abs();
    f64::from(dx.min(dy)) * diagonal + f64::from((dx - dy).abs())
}

/// Cost of stepping from `from` to the adjacent cell `to`.
#[inline]
pub fn step_cost(from: Coord, to: Coord) -> f64 {
    step_cost_with(from, to, SQRT2)
}

/// [`step_cost`] with an explicit diagonal step cost.
#[inline]
pub fn step_cost_with(from: Coord, to: Coord, diagonal: f64) -> f64 {
    if from.is_diagonal_to(to) { diagonal } else { 1.0 }
}
