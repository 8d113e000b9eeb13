//! # Life Arcade
//!
//! Conway's Game of Life as the visual substrate of arcade mini-games.
//!
//! Each gameplay entity owns a small bounded [`CellGrid`] that is advanced
//! generation by generation under the B3/S23 rule. Because most patterns
//! die out or freeze quickly, the [`regulate`] helpers inject live cells so
//! shapes stay visible, and [`seeding`] provides a center-weighted initial
//! population.
//!
//! ```
//! use life_arcade::{patterns, regulate, CellGrid};
//!
//! let mut grid = CellGrid::with_size(16, 16).unwrap();
//! grid.set_pattern(patterns::get("glider").unwrap(), 1, 1);
//! grid.update();
//! assert_eq!(grid.generation(), 1);
//!
//! regulate::apply_life_force(Some(&mut grid));
//! assert!(grid.count_alive_cells() >= 5);
//! ```

pub mod arcade;
pub mod cell;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod regulate;
pub mod seeding;
pub mod tuning;

pub use arcade::{Arcade, Entity, EntityKind, HasAutomaton, Stability, VisualPolicy};
pub use cell::{apply_rule, Cell};
pub use error::{Error, Result};
pub use grid::{CellGrid, GenerationStats, Stats};
pub use patterns::Pattern;
pub use tuning::ArcadeConfig;
