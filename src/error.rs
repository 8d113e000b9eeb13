//! Error types.
//!
//! Coordinate irregularities never produce errors; only construction of grids
//! and patterns can fail.

use thiserror::Error;

/// Errors that can occur while building grids or patterns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A grid was requested with a zero dimension.
    #[error("grid dimensions must be non-zero (got {cols}x{rows})")]
    EmptyGrid { cols: usize, rows: usize },

    /// A pattern matrix had no cells.
    #[error("pattern has no cells")]
    EmptyPattern,

    /// A pattern matrix was not rectangular.
    #[error("pattern line {line} has {found} cells, expected {expected}")]
    JaggedPattern {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A pattern matrix contained something other than 0 or 1.
    #[error("invalid cell value {value}, expected 0 or 1")]
    InvalidCell { value: u8 },

    /// Pattern art contained an unknown character.
    #[error("invalid pattern glyph {glyph:?}")]
    InvalidGlyph { glyph: char },

    /// The entity does not own an automaton.
    #[error("{0} has no automaton")]
    NoAutomaton(String),

    /// No pattern with this name exists in the catalogue.
    #[error("unknown pattern: {0}")]
    UnknownPattern(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
