//! Radially biased random seeding.

use log::debug;
use rand::Rng;

use crate::cell::Cell;
use crate::grid::{probability, CellGrid};

/// Fills `grid` so that cells near the center are more likely to be alive.
///
/// The probability of life falls linearly from `center_density` at the
/// center to `edge_density` at the farthest corner. The grid is cleared
/// first, so the generation counter restarts at zero.
pub fn seed_radial_density(grid: &mut CellGrid, center_density: f64, edge_density: f64) {
    seed_radial_density_with(&mut rand::thread_rng(), grid, center_density, edge_density);
}

/// Like [`seed_radial_density`] with a caller-supplied RNG.
///
/// # Arguments
///
/// * `rng` - Source of the per-cell coin flips
/// * `grid` - The automaton to reseed
/// * `center_density` - Probability of life at the center, clamped to `[0, 1]`
/// * `edge_density` - Probability of life at the farthest corner, clamped to `[0, 1]`
///
/// Probabilities of exactly 0 or 1 never consult `rng`.
pub fn seed_radial_density_with<R: Rng + ?Sized>(
    rng: &mut R,
    grid: &mut CellGrid,
    center_density: f64,
    edge_density: f64,
) {
    grid.clear_grid();

    let center_x = (grid.cols() as f64 - 1.0) / 2.0;
    let center_y = (grid.rows() as f64 - 1.0) / 2.0;
    // Distance from the center cell to a corner cell.
    let max_distance = center_x.hypot(center_y);

    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let r = if max_distance > 0.0 {
                ((x as f64 - center_x).hypot(y as f64 - center_y) / max_distance).min(1.0)
            } else {
                0.0
            };
            let p = probability(center_density + (edge_density - center_density) * r);
            let alive = if p <= 0.0 {
                false
            } else if p >= 1.0 {
                true
            } else {
                rng.gen_bool(p)
            };
            grid.set_cell(x as i64, y as i64, Cell::from(alive));
        }
    }

    debug!(
        "radial seed {}x{} ({:.2} -> {:.2}): {} alive",
        grid.cols(),
        grid.rows(),
        center_density,
        edge_density,
        grid.count_alive_cells()
    );
}
