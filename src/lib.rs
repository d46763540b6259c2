//! # Jewel Solver Library
//!
//! This library finds the next move on an 8x8 jewel-matching board. A move is a
//! swap of two cells; the solver looks for local shapes ("patterns") that complete a
//! line of matching pieces once the swap is played, picks the most valuable one and
//! maps it back onto screen coordinates.
//!
//! It is used by three binaries:
//! - `ai_solver`: Reads a screenshot (or a textual board), scans it and prints the
//!   move to play.
//! - `pattern_evaluator`: Compares the scoring policies on seeded random boards.
//! - `pattern_catalog`: Prints every pattern compiled from a pattern source.
//!
//! ## Modules
//! - `engine`: The board model (`Board`) and the piece palette (`PieceColor`).
//! - `patterns`: Parses shape templates, expands their symmetries and compiles them
//!   into bitmask patterns (`PatternLibrary`).
//! - `color`: Maps sampled pixel colors onto the palette.
//! - `geometry`: Per-mode board layout, capture scaling and the cell-to-pixel mapper.
//! - `scanner`: Turns a capture into a `Board`.
//! - `solver`: Searches a board for pattern matches and builds the `Solution`.
//! - `heuristics`: Scores and ranks the matches the solver found.
//! - `utils`: Parses boards from text.
//! - `error`: The error type shared by everything that loads input.

pub mod color;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod heuristics;
pub mod patterns;
pub mod scanner;
pub mod solver;
pub mod utils;

pub use error::Error;
