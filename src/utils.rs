use crate::engine::{Board, PieceColor, COL_COUNT, ROW_COUNT};
use crate::error::Error;
use std::fs;
use std::path::Path;

/// Parses an array of string slices into a `Board` object.
///
/// Each string slice represents one row of the board, starting from row 0 at the top.
/// Unlike a screenshot, a textual board must be complete: exactly `ROW_COUNT` rows of
/// exactly `COL_COUNT` characters each.
///
/// Valid characters are the ones produced by `PieceColor::to_char`:
/// - 'R': `PieceColor::Red`
/// - 'P': `PieceColor::Purple`
/// - 'B': `PieceColor::Blue`
/// - 'G': `PieceColor::Green`
/// - 'Y': `PieceColor::Yellow`
/// - 'O': `PieceColor::Orange`
/// - 'W': `PieceColor::White`
///
/// # Arguments
/// * `s`: A slice of string slices (`&[&str]`) representing the rows of the board.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(Error::BoardText)` if:
///     - The number of rows in `s` is not `ROW_COUNT`.
///     - Any row does not have exactly `COL_COUNT` characters.
///     - An unrecognized character is encountered.
///
/// # Examples
/// ```
/// use jewel_solver::utils::board_from_str_array;
/// use jewel_solver::engine::PieceColor;
///
/// let rows = [
///     "RPBGYOWR", "PBGYOWRP", "BGYOWRPB", "GYOWRPBG",
///     "YOWRPBGY", "OWRPBGYO", "WRPBGYOW", "RPBGYOWR",
/// ];
/// let board = board_from_str_array(&rows).unwrap();
/// assert_eq!(board.get_piece(0, 0), PieceColor::Red);
/// assert_eq!(board.get_piece(7, 6), PieceColor::White);
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, Error> {
    if s.len() != ROW_COUNT {
        return Err(Error::BoardText(format!(
            "Invalid number of rows. Expected {}, found {}",
            ROW_COUNT,
            s.len()
        )));
    }

    let mut grid = [[PieceColor::White; COL_COUNT]; ROW_COUNT];

    for (r, row_str) in s.iter().enumerate() {
        let len = row_str.chars().count();
        if len != COL_COUNT {
            return Err(Error::BoardText(format!(
                "Row {} has {} characters, expected {}",
                r, len, COL_COUNT
            )));
        }

        for (c, ch) in row_str.chars().enumerate() {
            grid[r][c] = PieceColor::from_char(ch).ok_or_else(|| {
                Error::BoardText(format!(
                    "Unrecognized character '{}' in row {} col {}",
                    ch, r, c
                ))
            })?;
        }
    }
    Ok(Board::from_grid(grid))
}

/// Parses a whole board file.
///
/// Lines are trimmed and blank lines are skipped before the remaining rows are handed
/// to `board_from_str_array`, so files may use either line ending and carry a
/// trailing newline.
pub fn board_from_text(text: &str) -> Result<Board, Error> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

/// Reads and parses a board file.
///
/// # Returns
/// `Error::BoardSource` if the file cannot be read, `Error::BoardText` if its
/// content is not a valid board.
pub fn board_from_file(path: impl AsRef<Path>) -> Result<Board, Error> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| Error::BoardSource {
        path: path.to_path_buf(),
        source,
    })?;
    board_from_text(&content)
}
