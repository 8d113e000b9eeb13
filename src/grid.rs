//! The double-buffered automaton engine.
//!
//! A [`CellGrid`] owns two equally sized buffers. [`CellGrid::update`]
//! computes every cell of the back buffer from the front buffer and then
//! swaps them, so a generation is always derived from a complete previous
//! generation. The boundary is fixed: everything outside the grid is dead.
//!
//! No method fails because of coordinates. Reads outside the grid yield
//! [`Cell::Dead`] and writes outside the grid are ignored, since hosts
//! routinely read cells just past an edge from inside a frame callback.

use log::debug;
use rand::Rng;

use crate::cell::{apply_rule, Cell};
use crate::error::{Error, Result};
use crate::patterns::Pattern;

/// Advisory update rate used when none is given.
pub const DEFAULT_UPDATE_RATE_FPS: u32 = 10;

/// Density used by [`CellGrid::random_seed`].
pub const DEFAULT_SEED_DENSITY: f64 = 0.3;

/// Offsets of the Moore neighborhood.
const NEIGHBORHOOD: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Births and deaths counted while computing one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Cells that were dead and became alive
    pub births: u64,
    /// Cells that were alive and died
    pub deaths: u64,
}

/// Running statistics since the grid was last cleared or reseeded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Counts for the most recent generation
    pub last: GenerationStats,
    /// Total number of cells born
    pub cells_created: u64,
    /// Total number of cells that died
    pub cells_destroyed: u64,
}

/// A bounded Game of Life grid with double buffering.
#[derive(Debug, Clone)]
pub struct CellGrid {
    cols: usize,
    rows: usize,
    /// Committed generation, row-major.
    current: Vec<Cell>,
    /// Scratch buffer for the generation being computed.
    next: Vec<Cell>,
    generation: u64,
    update_rate_fps: u32,
    stats: Stats,
}

/// Counts live cells around `(x, y)` in `buffer`, treating everything past
/// the edge as dead.
fn live_neighbors_in(buffer: &[Cell], cols: usize, rows: usize, x: i64, y: i64) -> u8 {
    let mut count = 0;
    for &(dx, dy) in &NEIGHBORHOOD {
        let (nx, ny) = match (x.checked_add(dx), y.checked_add(dy)) {
            (Some(nx), Some(ny)) => (nx, ny),
            _ => continue,
        };
        if nx >= 0
            && ny >= 0
            && (nx as usize) < cols
            && (ny as usize) < rows
            && buffer[ny as usize * cols + nx as usize].is_alive()
        {
            count += 1;
        }
    }
    count
}

/// `base + delta`, or `None` if the sum does not fit in an `i64`.
fn offset(base: i64, delta: usize) -> Option<i64> {
    i64::try_from(delta).ok().and_then(|delta| base.checked_add(delta))
}

/// Clamps `p` into a valid Bernoulli probability; NaN counts as zero.
pub(crate) fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

impl CellGrid {
    /// Creates an empty grid with the given advisory update rate.
    ///
    /// # Arguments
    ///
    /// * `cols` - The width of the grid
    /// * `rows` - The height of the grid
    /// * `update_rate_fps` - Generations per second the host should aim for
    ///
    /// # Returns
    ///
    /// An all-dead grid at generation 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyGrid`] if either dimension is zero.
    pub fn new(cols: usize, rows: usize, update_rate_fps: u32) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(Error::EmptyGrid { cols, rows });
        }
        Ok(CellGrid {
            cols,
            rows,
            current: vec![Cell::Dead; cols * rows],
            next: vec![Cell::Dead; cols * rows],
            generation: 0,
            update_rate_fps,
            stats: Stats::default(),
        })
    }

    /// Creates an empty grid updating at [`DEFAULT_UPDATE_RATE_FPS`].
    pub fn with_size(cols: usize, rows: usize) -> Result<Self> {
        Self::new(cols, rows, DEFAULT_UPDATE_RATE_FPS)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Always `false`; grids have at least one cell.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Number of generations computed since the last clear or reseed.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// How many generations per second the host should aim for. The grid
    /// itself never looks at this value.
    pub fn update_rate_fps(&self) -> u32 {
        self.update_rate_fps
    }

    pub fn set_update_rate_fps(&mut self, update_rate_fps: u32) {
        self.update_rate_fps = update_rate_fps;
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows {
            Some(y as usize * self.cols + x as usize)
        } else {
            None
        }
    }

    /// Returns the state of `(x, y)`; `Dead` outside the grid.
    pub fn get_cell(&self, x: i64, y: i64) -> Cell {
        self.index(x, y).map_or(Cell::Dead, |i| self.current[i])
    }

    /// Sets the state of `(x, y)`; no-op outside the grid.
    pub fn set_cell(&mut self, x: i64, y: i64, state: Cell) {
        if let Some(i) = self.index(x, y) {
            self.current[i] = state;
        }
    }

    /// Flips the state of `(x, y)`; no-op outside the grid.
    pub fn toggle_cell(&mut self, x: i64, y: i64) {
        if let Some(i) = self.index(x, y) {
            self.current[i] = self.current[i].toggled();
        }
    }

    /// Counts the live cells in the Moore neighborhood of `(x, y)` in the
    /// committed generation.
    pub fn count_live_neighbors(&self, x: i64, y: i64) -> u8 {
        live_neighbors_in(&self.current, self.cols, self.rows, x, y)
    }

    /// Advances the grid by one generation.
    pub fn update(&mut self) {
        let (cols, rows) = (self.cols, self.rows);
        let current = &self.current;
        let next = &mut self.next;
        let mut last = GenerationStats::default();

        for y in 0..rows {
            for x in 0..cols {
                let i = y * cols + x;
                let state = current[i];
                let live_neighbors = live_neighbors_in(current, cols, rows, x as i64, y as i64);
                let new_state = apply_rule(state, live_neighbors);
                match (state, new_state) {
                    (Cell::Dead, Cell::Alive) => last.births += 1,
                    (Cell::Alive, Cell::Dead) => last.deaths += 1,
                    _ => {}
                }
                next[i] = new_state;
            }
        }

        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        self.stats.last = last;
        self.stats.cells_created += last.births;
        self.stats.cells_destroyed += last.deaths;
    }

    /// Kills every cell and resets the generation counter.
    pub fn clear_grid(&mut self) {
        self.current.fill(Cell::Dead);
        self.generation = 0;
        self.stats = Stats::default();
    }

    /// Clears the grid, then makes each cell alive with probability
    /// `density` using the thread-local RNG.
    pub fn random_seed(&mut self, density: f64) {
        self.random_seed_with(&mut rand::thread_rng(), density);
    }

    /// Like [`random_seed`](Self::random_seed) with a caller-supplied RNG.
    pub fn random_seed_with<R: Rng + ?Sized>(&mut self, rng: &mut R, density: f64) {
        self.clear_grid();
        let density = probability(density);
        for cell in &mut self.current {
            *cell = Cell::from(rng.gen_bool(density));
        }
        debug!(
            "seeded {}x{} grid at density {:.2}: {} alive",
            self.cols,
            self.rows,
            density,
            self.count_alive_cells()
        );
    }

    /// Stamps `pattern` into the grid, dead cells included.
    ///
    /// # Arguments
    ///
    /// * `pattern` - The shape to copy into the grid
    /// * `offset_x` - Grid column that receives the pattern's first column
    /// * `offset_y` - Grid row that receives the pattern's first row
    ///
    /// Cells that land outside the grid, including coordinates that would
    /// overflow an `i64`, are skipped.
    pub fn set_pattern(&mut self, pattern: &Pattern, offset_x: i64, offset_y: i64) {
        for py in 0..pattern.rows() {
            for px in 0..pattern.cols() {
                if let (Some(x), Some(y)) = (offset(offset_x, px), offset(offset_y, py)) {
                    self.set_cell(x, y, pattern.get(px, py));
                }
            }
        }
    }

    /// Returns a copy of the whole grid.
    pub fn get_pattern(&self) -> Pattern {
        self.get_region(0, 0, self.cols, self.rows)
    }

    /// Copies a rectangular window of the grid.
    ///
    /// # Arguments
    ///
    /// * `x` - Grid column of the window's left edge
    /// * `y` - Grid row of the window's top edge
    /// * `width` - Number of columns to copy
    /// * `height` - Number of rows to copy
    ///
    /// # Returns
    ///
    /// An independent `width × height` [`Pattern`]. Parts of the window
    /// outside the grid, or beyond the range of `i64`, read as dead.
    pub fn get_region(&self, x: i64, y: i64, width: usize, height: usize) -> Pattern {
        let mut region = Pattern::dead(width, height);
        for ry in 0..height {
            for rx in 0..width {
                if let (Some(gx), Some(gy)) = (offset(x, rx), offset(y, ry)) {
                    region.set(rx, ry, self.get_cell(gx, gy));
                }
            }
        }
        region
    }

    /// Number of live cells.
    pub fn count_alive_cells(&self) -> usize {
        self.current.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Fraction of live cells, in `[0, 1]`.
    pub fn get_density(&self) -> f64 {
        self.count_alive_cells() as f64 / self.current.len() as f64
    }

    /// Returns `true` if no cell is alive.
    pub fn is_extinct(&self) -> bool {
        !self.current.iter().any(|cell| cell.is_alive())
    }

    /// Iterates over the coordinates of live cells in row-major order.
    pub fn alive_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.current
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_alive())
            .map(move |(i, _)| (i % cols, i / cols))
    }

    /// Committed cells of row `y`, for renderers.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y < self.rows {
            Some(&self.current[y * self.cols..(y + 1) * self.cols])
        } else {
            None
        }
    }
}
