//! Board model for the jewel-matching puzzle.
//!
//! This module defines the value types every other component works on:
//! - `PieceColor`: the closed palette of piece colors a board cell can hold.
//! - `Board`: an immutable 8x8 grid of classified piece colors, built fresh for
//!   each analysis cycle and discarded once the solver has consumed it.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Represents the color of a piece on the game board.
///
/// The declaration order is also the order in which the solver iterates colors,
/// so it takes part in the deterministic tie-break between equally scored matches.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceColor {
    /// A red piece.
    Red,
    /// A purple piece.
    Purple,
    /// A blue piece.
    Blue,
    /// A green piece.
    Green,
    /// A yellow piece.
    Yellow,
    /// An orange piece.
    Orange,
    /// A white piece, also used for washed-out or low-saturation samples.
    White,
}

impl PieceColor {
    /// Every piece color, in solver iteration order.
    pub const ALL: [PieceColor; 7] = [
        PieceColor::Red,
        PieceColor::Purple,
        PieceColor::Blue,
        PieceColor::Green,
        PieceColor::Yellow,
        PieceColor::Orange,
        PieceColor::White,
    ];

    /// Converts the color to its character representation.
    ///
    /// This is the same alphabet accepted by `utils::board_from_str_array`.
    ///
    /// # Examples
    ///
    /// ```
    /// use jewel_solver::engine::PieceColor;
    /// assert_eq!(PieceColor::Red.to_char(), 'R');
    /// assert_eq!(PieceColor::Orange.to_char(), 'O');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            PieceColor::Red => 'R',
            PieceColor::Purple => 'P',
            PieceColor::Blue => 'B',
            PieceColor::Green => 'G',
            PieceColor::Yellow => 'Y',
            PieceColor::Orange => 'O',
            PieceColor::White => 'W',
        }
    }

    /// Parses a color from its character representation.
    ///
    /// # Returns
    /// `Some(PieceColor)` for one of `R P B G Y O W`, `None` otherwise.
    pub fn from_char(c: char) -> Option<PieceColor> {
        PieceColor::ALL.into_iter().find(|color| color.to_char() == c)
    }

    /// Returns the ANSI background color code used for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            PieceColor::Red => "41",
            PieceColor::Purple => "45",
            PieceColor::Blue => "44",
            PieceColor::Green => "42",
            PieceColor::Yellow => "43",
            PieceColor::Orange => "48;5;208",
            PieceColor::White => "47",
        }
    }
}

fn generate_random_piece_color(rng: &mut impl Rng) -> PieceColor {
    PieceColor::ALL[rng.gen_range(0..PieceColor::ALL.len())]
}

/// Number of rows on the game board.
pub const ROW_COUNT: usize = 8;

/// Number of columns on the game board.
pub const COL_COUNT: usize = 8;

/// Represents the game board as a 2D grid of `PieceColor`s, indexed `[row][col]`
/// with row 0 at the top.
///
/// A board has no mutators: it is built once per analysis cycle, either by the
/// board scanner, by parsing text, or from a random seed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[PieceColor; COL_COUNT]; ROW_COUNT],
}

impl Board {
    /// Creates a board where every cell holds the same color.
    ///
    /// # Examples
    /// ```
    /// use jewel_solver::engine::{Board, PieceColor};
    /// let board = Board::filled(PieceColor::Blue);
    /// assert_eq!(board.get_piece(7, 7), PieceColor::Blue);
    /// ```
    pub fn filled(color: PieceColor) -> Self {
        Board {
            grid: [[color; COL_COUNT]; ROW_COUNT],
        }
    }

    /// Creates a board with randomly assigned colors using a provided seed.
    ///
    /// The same seed always produces the same board, which keeps evaluations and
    /// tests reproducible.
    ///
    /// # Arguments
    /// * `seed`: A `u64` value used to seed the random number generator.
    pub fn new_random_with_seed(seed: u64) -> Self {
        let mut grid = [[PieceColor::White; COL_COUNT]; ROW_COUNT];
        let mut rng = SmallRng::seed_from_u64(seed);

        for row in grid.iter_mut() {
            for cell in row.iter_mut() {
                *cell = generate_random_piece_color(&mut rng);
            }
        }
        Board { grid }
    }

    /// Creates a new board from a predefined grid.
    ///
    /// # Arguments
    /// * `grid`: A 2D array of `PieceColor`s, row-major with row 0 at the top.
    pub fn from_grid(grid: [[PieceColor; COL_COUNT]; ROW_COUNT]) -> Self {
        Board { grid }
    }

    /// Returns the color at the specified row (`r`) and column (`c`).
    ///
    /// # Panics
    /// Panics if `r >= ROW_COUNT` or `c >= COL_COUNT`.
    pub fn get_piece(&self, r: usize, c: usize) -> PieceColor {
        self.grid[r][c]
    }

    /// Returns an immutable reference to the underlying grid.
    pub fn get_grid(&self) -> &[[PieceColor; COL_COUNT]; ROW_COUNT] {
        &self.grid
    }

    /// Counts how many cells hold each color, indexed like `PieceColor::ALL`.
    pub fn color_counts(&self) -> [usize; PieceColor::ALL.len()] {
        let mut counts = [0; PieceColor::ALL.len()];
        for &piece in self.grid.iter().flatten() {
            counts[piece as usize] += 1;
        }
        counts
    }

    /// Renders the board as plain text, one line per row, using `PieceColor::to_char`.
    ///
    /// The output can be parsed back with `utils::board_from_str_array`.
    pub fn to_text(&self) -> String {
        self.grid
            .iter()
            .map(|row| row.iter().map(PieceColor::to_char).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generates a terminal rendering of the board, optionally marking cells.
    ///
    /// The output includes row and column numbers and uses ANSI escape codes for the
    /// piece colors. Every cell listed in `marks` is drawn as `..` instead of blank,
    /// which is how a proposed swap is shown.
    ///
    /// # Arguments
    /// * `marks`: (row, column) pairs to highlight.
    pub fn to_string_with_marks(&self, marks: &[(usize, usize)]) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..COL_COUNT {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..ROW_COUNT {
            output.push_str(&format!("{:<2}", r_idx));

            for c_idx in 0..COL_COUNT {
                let piece = self.grid[r_idx][c_idx];
                let content = if marks.contains(&(r_idx, c_idx)) {
                    ".."
                } else {
                    "  "
                };
                output.push_str(&format!(
                    "\x1b[1;{};m{}\x1b[m",
                    piece.to_ansi_color_code(),
                    content
                ));
            }
            if r_idx < ROW_COUNT - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    /// Formats the board for display using `to_string_with_marks(&[])`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_marks(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_filled_board() {
        let board = Board::filled(PieceColor::Green);
        for r in 0..ROW_COUNT {
            for c in 0..COL_COUNT {
                assert_eq!(board.get_piece(r, c), PieceColor::Green);
            }
        }
    }

    #[test]
    fn test_new_random_with_seed_determinism() {
        let seed = 123;
        let board1 = Board::new_random_with_seed(seed);
        let board2 = Board::new_random_with_seed(seed);
        assert_eq!(
            board1.grid, board2.grid,
            "Boards with the same seed must be identical."
        );

        let board3 = Board::new_random_with_seed(seed + 1);
        assert_ne!(
            board1.grid, board3.grid,
            "Boards with different seeds should differ."
        );
    }

    #[test]
    fn test_new_random_uses_several_colors() {
        let board = Board::new_random_with_seed(514514);
        let distinct = board.color_counts().iter().filter(|&&n| n > 0).count();
        assert!(distinct > 1, "A random 64-cell board should not be monochrome");
    }

    #[test]
    fn test_piece_color_char_round_trip() {
        for color in PieceColor::ALL {
            assert_eq!(PieceColor::from_char(color.to_char()), Some(color));
        }
        assert_eq!(PieceColor::from_char('.'), None);
        assert_eq!(PieceColor::from_char('r'), None);
    }

    #[test]
    fn test_color_counts() {
        let board = board_from_str_array(&[
            "RRRRRRRR", "PPPPPPPP", "BBBBBBBB", "GGGGGGGG", "YYYYYYYY", "OOOOOOOO",
            "WWWWWWWW", "RRRRWWWW",
        ])
        .unwrap();
        assert_eq!(board.color_counts(), [12, 8, 8, 8, 8, 8, 12]);
        assert_eq!(board.color_counts().iter().sum::<usize>(), ROW_COUNT * COL_COUNT);
    }

    #[test]
    fn test_to_text_parses_back() {
        let board = Board::new_random_with_seed(7);
        let text = board.to_text();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(board_from_str_array(&rows).unwrap(), board);
    }

    #[test]
    fn test_display_board_formatting() {
        let board = Board::filled(PieceColor::Yellow);
        let display_str = format!("{}", board);

        assert!(
            display_str.contains("  0 1 2 3 4 5 6 7 "),
            "Missing or incorrect column numbers"
        );
        assert_eq!(
            display_str.trim().lines().count(),
            ROW_COUNT + 1,
            "Incorrect number of lines in display output"
        );
        assert!(!display_str.contains(".."), "No cell should be marked");
    }

    #[test]
    fn test_marks_are_rendered() {
        let board = Board::filled(PieceColor::Red);
        let rendered = board.to_string_with_marks(&[(0, 0), (0, 1)]);
        assert_eq!(rendered.matches("..").count(), 2);
    }
}
