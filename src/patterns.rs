//! Named canonical shapes and the rectangular [`Pattern`] matrix used to
//! exchange cells with a [`CellGrid`](crate::CellGrid).
//!
//! Patterns are indexed `[x][y]` exactly like the grid. The catalogue is built
//! once on first access and never mutated afterwards.

use std::fmt;

use lazy_static::lazy_static;

use crate::cell::Cell;
use crate::error::{Error, Result};

/// Display size reported for names that are not in the catalogue.
pub const PLACEHOLDER_DIMENSIONS: (usize, usize) = (7, 7);

/// A rectangular matrix of cells.
///
/// A `Pattern` is always rectangular: the constructors reject jagged input.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    cols: usize,
    rows: usize,
    /// Row-major storage, `cells[y * cols + x]`.
    cells: Vec<Cell>,
}

impl Pattern {
    /// Creates an all-dead pattern. Either dimension may be zero.
    pub fn dead(cols: usize, rows: usize) -> Self {
        Pattern {
            cols,
            rows,
            cells: vec![Cell::Dead; cols * rows],
        }
    }

    /// Builds a pattern from an `[x][y]` matrix of 0/1 values.
    pub fn from_columns<C: AsRef<[u8]>>(columns: &[C]) -> Result<Self> {
        let rows = Self::check_rectangular(columns)?;
        let mut pattern = Pattern::dead(columns.len(), rows);
        for (x, column) in columns.iter().enumerate() {
            for (y, &value) in column.as_ref().iter().enumerate() {
                pattern.set(x, y, Self::cell_from_value(value)?);
            }
        }
        Ok(pattern)
    }

    /// Builds a pattern from a `[y][x]` matrix of 0/1 values, the way shapes
    /// are usually written down.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let cols = Self::check_rectangular(rows)?;
        let mut pattern = Pattern::dead(cols, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &value) in row.as_ref().iter().enumerate() {
                pattern.set(x, y, Self::cell_from_value(value)?);
            }
        }
        Ok(pattern)
    }

    /// Parses ASCII art, one line per row. `#`, `O` and `*` are alive, `.`
    /// is dead. Blank lines and surrounding whitespace are ignored.
    pub fn parse(art: &str) -> Result<Self> {
        let lines = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.chars()
                    .map(|glyph| match glyph {
                        '#' | 'O' | '*' => Ok(1),
                        '.' => Ok(0),
                        _ => Err(Error::InvalidGlyph { glyph }),
                    })
                    .collect::<Result<Vec<u8>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_rows(&lines)
    }

    fn check_rectangular<L: AsRef<[u8]>>(lines: &[L]) -> Result<usize> {
        let expected = lines.first().map_or(0, |line| line.as_ref().len());
        if expected == 0 {
            return Err(Error::EmptyPattern);
        }
        for (line, cells) in lines.iter().enumerate() {
            let found = cells.as_ref().len();
            if found != expected {
                return Err(Error::JaggedPattern {
                    line,
                    expected,
                    found,
                });
            }
        }
        Ok(expected)
    }

    fn cell_from_value(value: u8) -> Result<Cell> {
        match value {
            0 => Ok(Cell::Dead),
            1 => Ok(Cell::Alive),
            value => Err(Error::InvalidCell { value }),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the cell at `(x, y)`, or `Dead` outside the pattern.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x]
        } else {
            Cell::Dead
        }
    }

    /// Sets the cell at `(x, y)`; ignored outside the pattern.
    pub fn set(&mut self, x: usize, y: usize, state: Cell) {
        if x < self.cols && y < self.rows {
            self.cells[y * self.cols + x] = state;
        }
    }

    /// Number of live cells.
    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Exports the pattern as an `[x][y]` matrix of 0/1 values.
    pub fn to_columns(&self) -> Vec<Vec<u8>> {
        (0..self.cols)
            .map(|x| (0..self.rows).map(|y| u8::from(self.get(x, y))).collect())
            .collect()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let glyph = if self.get(x, y).is_alive() { '#' } else { '.' };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Catalogue source, in display order.
const CATALOG_ART: &[(&str, &str)] = &[
    ("glider", ".#.\n..#\n###"),
    ("blinker", "#\n#\n#"),
    (
        "pulsar",
        "..###...###..
         .............
         #....#.#....#
         #....#.#....#
         #....#.#....#
         ..###...###..
         .............
         ..###...###..
         #....#.#....#
         #....#.#....#
         #....#.#....#
         .............
         ..###...###..",
    ),
    ("block", "##\n##"),
    ("beehive", ".##.\n#..#\n.##."),
    ("toad", ".###\n###."),
    ("lwss", ".#..#\n#....\n#...#\n####."),
    ("r-pentomino", ".##\n##.\n.#."),
    ("beacon", "##..\n##..\n..##\n..##"),
    ("boat", "##.\n#.#\n.#."),
    ("loaf", ".##.\n#..#\n.#.#\n..#."),
    ("diehard", "......#.\n##......\n.#...###"),
    ("acorn", ".#.....\n...#...\n##..###"),
];

/// Alternative spellings accepted by [`get`].
const ALIASES: &[(&str, &str)] = &[
    ("spaceship", "lwss"),
    ("lightweight-spaceship", "lwss"),
    ("rpentomino", "r-pentomino"),
    ("r-pent", "r-pentomino"),
];

lazy_static! {
    static ref CATALOG: Vec<(&'static str, Pattern)> = CATALOG_ART
        .iter()
        .map(|&(name, art)| {
            let pattern = Pattern::parse(art)
                .unwrap_or_else(|e| panic!("catalogue pattern {:?} is malformed: {}", name, e));
            (name, pattern)
        })
        .collect();
}

fn normalize(name: &str) -> String {
    let name = name
        .trim()
        .to_ascii_lowercase()
        .replace(|c: char| c == '_' || c == ' ', "-");
    ALIASES
        .iter()
        .find(|&&(alias, _)| alias == name)
        .map_or(name, |&(_, canonical)| canonical.to_string())
}

/// Looks up a catalogue pattern by name (case-insensitive; `_` and spaces
/// are treated as `-`).
pub fn get(name: &str) -> Option<&'static Pattern> {
    let name = normalize(name);
    CATALOG
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, pattern)| pattern)
}

/// Like [`get`], but reports unknown names as an error.
pub fn require(name: &str) -> Result<&'static Pattern> {
    get(name).ok_or_else(|| Error::UnknownPattern(name.to_string()))
}

/// Names of every catalogue pattern, in catalogue order.
pub fn names() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|(name, _)| *name)
}

/// Display dimensions `(cols, rows)` of a named pattern, used for layout.
/// Unknown names get [`PLACEHOLDER_DIMENSIONS`].
pub fn pattern_dimensions(name: &str) -> (usize, usize) {
    get(name).map_or(PLACEHOLDER_DIMENSIONS, |pattern| {
        (pattern.cols(), pattern.rows())
    })
}
