//! Cell states and the B3/S23 transition rule.

/// State of a single cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Dead = 0,
    Alive = 1,
}

impl Cell {
    /// Returns `true` if the cell is alive.
    #[inline]
    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    /// Returns the opposite state.
    #[inline]
    pub fn toggled(self) -> Cell {
        match self {
            Cell::Alive => Cell::Dead,
            Cell::Dead => Cell::Alive,
        }
    }
}

impl From<bool> for Cell {
    #[inline]
    fn from(alive: bool) -> Self {
        if alive {
            Cell::Alive
        } else {
            Cell::Dead
        }
    }
}

impl From<Cell> for u8 {
    #[inline]
    fn from(cell: Cell) -> u8 {
        cell as u8
    }
}

/// Computes the next state of a cell under Conway's rules:
///
/// * A live cell with two or three live neighbors survives
/// * A dead cell with exactly three live neighbors is born
/// * Every other cell is dead in the next generation
#[inline]
pub fn apply_rule(state: Cell, live_neighbors: u8) -> Cell {
    match (state, live_neighbors) {
        (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive,
        (Cell::Dead, 3) => Cell::Alive,
        _ => Cell::Dead,
    }
}
