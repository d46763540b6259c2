//! Pixel geometry of the board and the per-mode layout table.
//!
//! The solver works on grid cells; everything that ties cells to pixels lives here.
//! `BoardGeometry::cell_center` is the coordinate mapper used to turn a chosen swap
//! into click points, and `BoardGeometry::for_capture` resolves the geometry of a
//! screenshot from the game mode's reference layout.
use crate::engine::{COL_COUNT, ROW_COUNT};
use std::fmt;
use std::time::Duration;

/// Width of the game client area the reference layouts were measured on.
pub const REFERENCE_WIDTH: i32 = 1024;
/// Height of the game client area the reference layouts were measured on.
pub const REFERENCE_HEIGHT: i32 = 802;
/// Horizontal pixels a capture carries in addition to the client area.
pub const FRAME_MARGIN: i32 = 8;
/// Width of the window frame on each side of the client area.
pub const FRAME_BORDER: i32 = 4;
/// Cell pitch at reference resolution.
pub const REFERENCE_CELL_SIZE: i32 = 82;

/// A pixel position, relative to the capture's top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The game modes, which differ in board placement, pacing and scoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum GameMode {
    /// Standard mode.
    Classic,
    /// Relaxed mode without a clock.
    Zen,
    /// Timed mode with a header bar above the board.
    Lightning,
    /// Mode with rising ice columns.
    IceStorm,
    /// Mode with a shifted board.
    Balance,
}

/// How fast an automation loop should drive a mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeTiming {
    /// Time between two board scans.
    pub scan_interval: Duration,
    /// Time to hold between the two clicks of a swap.
    pub move_time: Duration,
}

impl GameMode {
    /// Every mode.
    pub const ALL: [GameMode; 5] = [
        GameMode::Classic,
        GameMode::Zen,
        GameMode::Lightning,
        GameMode::IceStorm,
        GameMode::Balance,
    ];

    /// Board top-left corner at reference resolution.
    pub fn reference_origin(self) -> Point {
        match self {
            GameMode::Classic | GameMode::Zen => Point::new(338, 77),
            GameMode::Lightning => Point::new(338, 115),
            GameMode::IceStorm => Point::new(338, 105),
            GameMode::Balance => Point::new(293, 103),
        }
    }

    /// Whether candidates are scored with a bonus that depends on their row.
    ///
    /// Only Classic is; the other modes score by pattern priority alone.
    pub fn row_weighted_scoring(self) -> bool {
        self == GameMode::Classic
    }

    /// Pacing of the automation loop for this mode.
    pub fn timing(self) -> ModeTiming {
        let (interval_ms, move_ms) = match self {
            GameMode::Classic => (1500, 100),
            GameMode::Zen => (500, 50),
            GameMode::Lightning | GameMode::IceStorm | GameMode::Balance => (300, 50),
        };
        ModeTiming {
            scan_interval: Duration::from_millis(interval_ms),
            move_time: Duration::from_millis(move_ms),
        }
    }
}

/// Resolved pixel geometry of the board inside one capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardGeometry {
    /// Top-left corner of cell (0, 0).
    pub origin: Point,
    /// Horizontal cell pitch.
    pub cell_width: i32,
    /// Vertical cell pitch.
    pub cell_height: i32,
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl BoardGeometry {
    /// Creates the geometry of a standard 8x8 board.
    pub fn new(origin: Point, cell_width: i32, cell_height: i32) -> Self {
        BoardGeometry {
            origin,
            cell_width,
            cell_height,
            rows: ROW_COUNT,
            cols: COL_COUNT,
        }
    }

    /// Resolves the geometry of a capture of the given size.
    ///
    /// The capture is assumed to show the whole game window, frame included. The
    /// reference layout of `mode` is scaled by `(width - FRAME_MARGIN) / REFERENCE_WIDTH`;
    /// the board's top edge is measured from the bottom of the capture so that a
    /// title bar of any height does not shift it. Values are rounded half to even.
    ///
    /// # Examples
    /// ```
    /// use jewel_solver::geometry::{BoardGeometry, GameMode, Point};
    /// let geometry = BoardGeometry::for_capture(GameMode::Lightning, 1032, 802);
    /// assert_eq!(geometry.origin, Point::new(338, 115));
    /// assert_eq!(geometry.cell_width, 82);
    /// ```
    pub fn for_capture(mode: GameMode, width: u32, height: u32) -> Self {
        let factor = (width as f32 - FRAME_MARGIN as f32) / REFERENCE_WIDTH as f32;
        let scale = |value: i32| (factor * value as f32).round_ties_even() as i32;
        let reference = mode.reference_origin();

        let cell = scale(REFERENCE_CELL_SIZE);
        let left = scale(reference.x - FRAME_BORDER) + FRAME_BORDER;
        let top = height as i32
            - (scale(REFERENCE_HEIGHT - reference.y - FRAME_BORDER) + FRAME_BORDER);

        BoardGeometry::new(Point::new(left, top), cell, cell)
    }

    /// The geometry at reference resolution, where the board sits exactly at
    /// `mode.reference_origin()`.
    pub fn reference(mode: GameMode) -> Self {
        BoardGeometry::for_capture(
            mode,
            (REFERENCE_WIDTH + FRAME_MARGIN) as u32,
            REFERENCE_HEIGHT as u32,
        )
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, row: usize, col: usize) -> Point {
        Point::new(
            self.origin.x + col as i32 * self.cell_width,
            self.origin.y + row as i32 * self.cell_height,
        )
    }

    /// Center pixel of a cell: `origin + index * size + size / 2` on each axis.
    ///
    /// # Examples
    /// ```
    /// use jewel_solver::geometry::{BoardGeometry, Point};
    /// let geometry = BoardGeometry::new(Point::new(10, 20), 40, 30);
    /// assert_eq!(geometry.cell_center(2, 3), Point::new(10 + 3 * 40 + 20, 20 + 2 * 30 + 15));
    /// ```
    pub fn cell_center(&self, row: usize, col: usize) -> Point {
        let corner = self.cell_origin(row, col);
        Point::new(
            corner.x + self.cell_width / 2,
            corner.y + self.cell_height / 2,
        )
    }

    /// Whether the whole board lies inside an image of the given size.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        let right = i64::from(self.origin.x) + self.cols as i64 * i64::from(self.cell_width);
        let bottom = i64::from(self.origin.y) + self.rows as i64 * i64::from(self.cell_height);
        self.origin.x >= 0
            && self.origin.y >= 0
            && self.cell_width > 0
            && self.cell_height > 0
            && right <= i64::from(width)
            && bottom <= i64::from(height)
    }
}
