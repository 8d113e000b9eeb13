//! Density regulation.
//!
//! Left alone, most automatons die out or freeze within a few dozen
//! generations. These helpers inject live cells so that gameplay shapes stay
//! visible. They only ever add cells and take an optional grid, so hosts can
//! call them for every entity whether or not it owns an automaton.

use log::trace;
use rand::Rng;

use crate::cell::Cell;
use crate::grid::{probability, CellGrid};
use crate::tuning::{LifeForce, Maintain};

/// Slack for floating-point error when turning a density into a cell count.
const DENSITY_TOLERANCE: f64 = 1e-9;

fn random_position<R: Rng + ?Sized>(rng: &mut R, grid: &CellGrid) -> (i64, i64) {
    (
        rng.gen_range(0..grid.cols()) as i64,
        rng.gen_range(0..grid.rows()) as i64,
    )
}

/// Makes a random cell alive. Returns `true` if it was dead before.
fn revive_random<R: Rng + ?Sized>(rng: &mut R, grid: &mut CellGrid) -> bool {
    let (x, y) = random_position(rng, grid);
    if grid.get_cell(x, y).is_alive() {
        false
    } else {
        grid.set_cell(x, y, Cell::Alive);
        true
    }
}

/// Injects life into an evolving automaton that is thinning out, using the
/// default [`LifeForce`] tuning.
///
/// Returns the number of cells that became alive.
pub fn apply_life_force(grid: Option<&mut CellGrid>) -> usize {
    apply_life_force_with(&mut rand::thread_rng(), grid, LifeForce::default())
}

/// Like [`apply_life_force`] with a caller-supplied RNG and tuning.
///
/// Below `tuning.threshold` density, `tuning.injections` random cells are
/// set alive. Picks that land on live cells are not retried. At or above the
/// threshold the grid is left untouched.
pub fn apply_life_force_with<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Option<&mut CellGrid>,
    tuning: LifeForce,
) -> usize {
    let grid = match grid {
        Some(grid) => grid,
        None => return 0,
    };
    if grid.get_density() >= tuning.threshold {
        return 0;
    }

    let added = (0..tuning.injections)
        .filter(|_| revive_random(rng, grid))
        .count();
    trace!(
        "life force: +{} cells, density now {:.2}",
        added,
        grid.get_density()
    );
    added
}

/// Tops up a non-evolving automaton to `target_density` so it keeps
/// flickering, using the default attempt budget.
///
/// Returns the number of cells that became alive.
pub fn maintain_density(grid: Option<&mut CellGrid>, target_density: f64) -> usize {
    maintain_density_with(
        &mut rand::thread_rng(),
        grid,
        target_density,
        Maintain::default().attempts_per_cell,
    )
}

/// Like [`maintain_density`] with a caller-supplied RNG and attempt budget.
///
/// Random cells are set alive until the density reaches the target or
/// `attempts_per_cell` placements per missing cell have been spent, so a
/// target close to 1.0 cannot loop forever. Live cells are never killed.
///
/// # Arguments
///
/// * `rng` - Source of the random positions
/// * `grid` - The automaton to top up, or `None` for entities without one
/// * `target_density` - Density to reach, clamped to `[0, 1]`
/// * `attempts_per_cell` - Placement attempts allowed per missing cell
///
/// # Returns
///
/// The number of cells that became alive. Zero when the grid is absent or
/// already at or above the target.
pub fn maintain_density_with<R: Rng + ?Sized>(
    rng: &mut R,
    grid: Option<&mut CellGrid>,
    target_density: f64,
    attempts_per_cell: usize,
) -> usize {
    let grid = match grid {
        Some(grid) => grid,
        None => return 0,
    };

    let target = probability(target_density);
    if grid.get_density() >= target {
        return 0;
    }

    // Smallest population whose density reaches the target. The tolerance
    // keeps products like 0.55 * 100 = 55.000000000000007 from asking for 56.
    let alive = grid.count_alive_cells();
    let wanted = (target * grid.len() as f64 - DENSITY_TOLERANCE).ceil() as usize;
    let wanted = wanted.max(alive + 1).min(grid.len());
    let deficit = wanted - alive;
    let mut added = 0;
    let mut attempts = 0;
    let max_attempts = deficit.saturating_mul(attempts_per_cell);
    while added < deficit && attempts < max_attempts {
        if revive_random(rng, grid) {
            added += 1;
        }
        attempts += 1;
    }
    trace!(
        "maintain density: +{} cells in {} attempts (target {:.2})",
        added,
        attempts,
        target_density
    );
    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn cells(grid: &CellGrid) -> Vec<(usize, usize)> {
        grid.alive_cells().collect()
    }

    #[test]
    fn test_life_force_without_grid() {
        assert_eq!(apply_life_force(None), 0);
        assert_eq!(maintain_density(None, 0.6), 0);
    }

    #[test]
    fn test_life_force_revives_empty_grid() {
        let mut grid = CellGrid::with_size(20, 20).unwrap();
        let added = apply_life_force_with(&mut rng(), Some(&mut grid), LifeForce::default());
        assert!(added > 0 && added <= 15);
        assert_eq!(grid.count_alive_cells(), added);
    }

    #[test]
    fn test_life_force_never_kills() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(10, 10).unwrap();
        grid.random_seed_with(&mut rng, 0.2);
        let before = cells(&grid);
        assert!(grid.get_density() < 0.35);

        apply_life_force_with(&mut rng, Some(&mut grid), LifeForce::default());
        let after = cells(&grid);
        assert!(after.len() > before.len());
        assert!(before.iter().all(|cell| after.contains(cell)));
    }

    #[test]
    fn test_life_force_leaves_dense_grid_alone() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(10, 10).unwrap();
        for x in 0..10 {
            for y in 0..4 {
                grid.set_cell(x, y, Cell::Alive);
            }
        }
        assert!(grid.get_density() >= 0.35);
        let before = grid.get_pattern();
        assert_eq!(
            apply_life_force_with(&mut rng, Some(&mut grid), LifeForce::default()),
            0
        );
        assert_eq!(grid.get_pattern(), before);
    }

    #[test]
    fn test_life_force_threshold_is_inclusive() {
        // 7 of 20 cells is exactly 0.35.
        let mut rng = rng();
        let mut grid = CellGrid::with_size(4, 5).unwrap();
        for x in 0..4 {
            grid.set_cell(x, 0, Cell::Alive);
        }
        for x in 0..3 {
            grid.set_cell(x, 1, Cell::Alive);
        }
        assert_eq!(grid.get_density(), 0.35);
        let before = grid.get_pattern();
        assert_eq!(
            apply_life_force_with(&mut rng, Some(&mut grid), LifeForce::default()),
            0
        );
        assert_eq!(grid.get_pattern(), before);
    }

    #[test]
    fn test_life_force_just_below_threshold() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(4, 5).unwrap();
        for x in 0..4 {
            grid.set_cell(x, 0, Cell::Alive);
        }
        for x in 0..2 {
            grid.set_cell(x, 1, Cell::Alive);
        }
        assert!(grid.get_density() < 0.35);
        let before = cells(&grid);
        let added = apply_life_force_with(&mut rng, Some(&mut grid), LifeForce::default());
        assert!(added > 0);
        assert_eq!(grid.count_alive_cells(), 6 + added);
        let after = cells(&grid);
        assert!(before.iter().all(|cell| after.contains(cell)));
    }

    #[test]
    fn test_life_force_on_full_grid() {
        let mut grid = CellGrid::with_size(1, 1).unwrap();
        grid.set_cell(0, 0, Cell::Alive);
        assert_eq!(apply_life_force(Some(&mut grid)), 0);
        assert_eq!(grid.count_alive_cells(), 1);
    }

    #[test]
    fn test_maintain_reaches_target() {
        let mut grid = CellGrid::with_size(10, 10).unwrap();
        let added = maintain_density_with(&mut rng(), Some(&mut grid), 0.6, 4);
        assert_eq!(added, grid.count_alive_cells());
        // 60 missing cells, 240 attempts: collisions cannot plausibly eat
        // the whole budget.
        assert_eq!(grid.count_alive_cells(), 60);
    }

    #[test]
    fn test_maintain_never_kills() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(12, 12).unwrap();
        grid.set_pattern(patterns::get("pulsar").unwrap(), 0, 0);
        let before = cells(&grid);
        maintain_density_with(&mut rng, Some(&mut grid), 0.8, 4);
        let after = cells(&grid);
        assert!(after.len() >= before.len());
        assert!(before.iter().all(|cell| after.contains(cell)));
    }

    #[test]
    fn test_maintain_above_target_is_noop() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(8, 8).unwrap();
        grid.random_seed_with(&mut rng, 0.9);
        let before = grid.get_pattern();
        let target = grid.get_density() - 0.1;
        assert_eq!(maintain_density_with(&mut rng, Some(&mut grid), target, 4), 0);
        assert_eq!(grid.get_pattern(), before);
    }

    #[test]
    fn test_maintain_exactly_at_target_is_noop() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(10, 10).unwrap();
        for i in 0..55 {
            grid.set_cell(i % 10, i / 10, Cell::Alive);
        }
        assert_eq!(grid.get_density(), 0.55);
        let before = grid.get_pattern();
        assert_eq!(maintain_density_with(&mut rng, Some(&mut grid), 0.55, 4), 0);
        assert_eq!(grid.get_pattern(), before);
    }

    #[test]
    fn test_maintain_stops_at_target() {
        let mut rng = rng();
        let mut grid = CellGrid::with_size(10, 10).unwrap();
        for i in 0..50 {
            grid.set_cell(i % 10, i / 10, Cell::Alive);
        }
        assert_eq!(maintain_density_with(&mut rng, Some(&mut grid), 0.55, 8), 5);
        assert_eq!(grid.count_alive_cells(), 55);
    }

    #[test]
    fn test_maintain_full_target_terminates() {
        let mut grid = CellGrid::with_size(3, 3).unwrap();
        let added = maintain_density_with(&mut rng(), Some(&mut grid), 1.0, 1);
        // At most one attempt per missing cell.
        assert!(added <= 9);
        assert_eq!(grid.count_alive_cells(), added);
    }

    #[test]
    fn test_maintain_does_not_advance_generation() {
        let mut grid = CellGrid::with_size(6, 3).unwrap();
        maintain_density(Some(&mut grid), 0.6);
        assert_eq!(grid.generation(), 0);
        assert!(grid.get_density() > 0.0);
    }
}
