//! Match solver: finds the swap to play on a classified board.
//!
//! For every piece color the board is reduced to an occupancy bitboard. Every 4x4
//! and 3x3 window of that bitboard is encoded the same way patterns are (bit
//! `side² - 1` for the window's top-left cell, bit 0 for its bottom-right cell), and
//! a pattern matches when the window holds all of the pattern's required cells.
use crate::engine::{Board, PieceColor, COL_COUNT, ROW_COUNT};
use crate::geometry::{BoardGeometry, Point};
use crate::heuristics::{choose_best_candidate, ScoringPolicy};
use crate::patterns::{Pattern, PatternLibrary};

/// A pattern found on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Candidate {
    /// The matched pattern.
    pub pattern: Pattern,
    /// Board row of the pattern window's top-left cell.
    pub top_row: usize,
    /// Board column of the pattern window's top-left cell.
    pub left_col: usize,
    /// The color whose occupancy matched.
    pub color: PieceColor,
}

impl Candidate {
    /// Board (row, column) of the swap's source cell.
    pub fn source_cell(&self) -> (usize, usize) {
        let (dr, dc) = self.pattern.source_offset();
        (self.top_row + dr, self.left_col + dc)
    }

    /// Board (row, column) of the swap's destination cell.
    pub fn destination_cell(&self) -> (usize, usize) {
        let (dr, dc) = self.pattern.destination_offset();
        (self.top_row + dr, self.left_col + dc)
    }
}

/// The move chosen for one board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Solution {
    /// Pixel to press on, center of the source cell.
    pub source: Point,
    /// Pixel to release on, center of the destination cell.
    pub destination: Point,
    /// The winning candidate.
    pub candidate: Candidate,
    /// Score the candidate won with.
    pub score: u32,
}

/// Occupancy bitboard of `color`: bit `row * COL_COUNT + col` is set when the cell
/// holds that color.
pub fn occupancy(board: &Board, color: PieceColor) -> u64 {
    let mut bits = 0u64;
    for (r, row) in board.get_grid().iter().enumerate() {
        for (c, &piece) in row.iter().enumerate() {
            if piece == color {
                bits |= 1 << (r * COL_COUNT + c);
            }
        }
    }
    bits
}

/// Encodes the `side` x `side` window at (`top`, `left`) of an occupancy bitboard.
///
/// Bit `side² - 1` is the window's top-left cell and bit 0 its bottom-right cell.
///
/// # Panics
/// Panics in debug builds if the window does not fit on the board.
pub fn window_mask(occupancy: u64, top: usize, left: usize, side: usize) -> u16 {
    debug_assert!(top + side <= ROW_COUNT && left + side <= COL_COUNT);
    let mut mask = 0u16;
    for r in 0..side {
        for c in 0..side {
            let occupied = (occupancy >> ((top + r) * COL_COUNT + left + c)) & 1;
            mask = (mask << 1) | occupied as u16;
        }
    }
    mask
}

fn push_matches(
    candidates: &mut Vec<Candidate>,
    patterns: &[Pattern],
    window: u16,
    top_row: usize,
    left_col: usize,
    color: PieceColor,
) {
    candidates.extend(
        patterns
            .iter()
            .filter(|pattern| window & pattern.required_mask == pattern.required_mask)
            .map(|&pattern| Candidate {
                pattern,
                top_row,
                left_col,
                color,
            }),
    );
}

/// Lists every pattern match on the board.
///
/// Candidates are returned in search order: colors in `PieceColor::ALL` order, then
/// window positions row by row, and at each position the 4x4 patterns before the 3x3
/// patterns, each collection in library order.
pub fn find_candidates(board: &Board, library: &PatternLibrary) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    for (color, pieces) in PieceColor::ALL.into_iter().zip(board.color_counts()) {
        let before = candidates.len();
        let bits = occupancy(board, color);

        for top in 0..ROW_COUNT {
            for left in 0..COL_COUNT {
                if top + 4 <= ROW_COUNT && left + 4 <= COL_COUNT {
                    let window = window_mask(bits, top, left, 4);
                    push_matches(&mut candidates, library.patterns_4x4(), window, top, left, color);
                }
                if top + 3 <= ROW_COUNT && left + 3 <= COL_COUNT {
                    let window = window_mask(bits, top, left, 3);
                    push_matches(&mut candidates, library.patterns_3x3(), window, top, left, color);
                }
            }
        }

        if pieces > 0 {
            log::debug!(
                "{:?}: {} pieces on board, {} matches found",
                color,
                pieces,
                candidates.len() - before
            );
        }
    }
    candidates
}

/// Finds the swap to play.
///
/// # Arguments
/// * `board`: the classified board.
/// * `library`: the compiled patterns.
/// * `geometry`: pixel geometry used to place the click points.
/// * `policy`: how candidates are ranked.
///
/// # Returns
/// The best-scoring candidate with the centers of its source and destination cells,
/// or `None` when no pattern matches. Equal scores are won by the candidate found
/// first (see `find_candidates`), so identical inputs always yield the same solution.
///
/// # Panics
/// Panics if `geometry` does not describe an 8x8 board.
pub fn solve(
    board: &Board,
    library: &PatternLibrary,
    geometry: &BoardGeometry,
    policy: ScoringPolicy,
) -> Option<Solution> {
    assert!(
        geometry.rows == ROW_COUNT && geometry.cols == COL_COUNT,
        "board geometry must be {}x{}, got {}x{}",
        ROW_COUNT,
        COL_COUNT,
        geometry.rows,
        geometry.cols
    );

    let candidates = find_candidates(board, library);
    let Some((candidate, score)) = choose_best_candidate(&candidates, policy) else {
        log::debug!("No valid patterns found on board");
        return None;
    };

    let (src_row, src_col) = candidate.source_cell();
    let (dst_row, dst_col) = candidate.destination_cell();
    let solution = Solution {
        source: geometry.cell_center(src_row, src_col),
        destination: geometry.cell_center(dst_row, dst_col),
        candidate,
        score,
    };
    log::debug!(
        "Best of {} candidates: {}x{} {:?} pattern at ({}, {}) with score {}, swap {} -> {}",
        candidates.len(),
        candidate.pattern.side_length,
        candidate.pattern.side_length,
        candidate.color,
        candidate.top_row,
        candidate.left_col,
        score,
        solution.source,
        solution.destination
    );
    Some(solution)
}
