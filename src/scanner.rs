//! Board scanner: turns a capture into a grid of piece colors.
//!
//! Each cell is sampled over a centered square window rather than a single pixel,
//! which averages away gem highlights, borders and animation noise before the color
//! is classified.
use crate::color::classify_rgb;
use crate::engine::{Board, PieceColor, COL_COUNT, ROW_COUNT};
use crate::error::Error;
use crate::geometry::BoardGeometry;
use image::{RgbImage, RgbaImage};
use std::path::Path;

/// Random access to the RGB pixels of an image.
pub trait PixelSource {
    /// Width and height in pixels.
    fn dimensions(&self) -> (u32, u32);

    /// The RGB value of the pixel at (`x`, `y`).
    ///
    /// # Panics
    /// Implementations may panic if the coordinates are out of bounds.
    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3];
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgb_at(&self, x: u32, y: u32) -> [u8; 3] {
        let [r, g, b, _] = self.get_pixel(x, y).0;
        [r, g, b]
    }
}

/// The part of each cell that is averaged, as fractions of the cell size.
///
/// The same fractions apply on both axes, so the window is square for square cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SamplingWindow {
    /// Start of the window, inclusive.
    pub start: f64,
    /// End of the window, exclusive.
    pub end: f64,
}

impl Default for SamplingWindow {
    /// The middle band of the cell, roughly a quarter of its area.
    fn default() -> Self {
        SamplingWindow {
            start: 0.366,
            end: 0.610,
        }
    }
}

impl SamplingWindow {
    /// Pixel offsets `(first, end)` of the window inside a cell of `extent` pixels,
    /// rounded half to even.
    pub fn bounds(&self, extent: i32) -> (u32, u32) {
        let extent = f64::from(extent);
        (
            (extent * self.start).round_ties_even() as u32,
            (extent * self.end).round_ties_even() as u32,
        )
    }
}

/// Averages the window of one cell.
///
/// Channels are summed and divided with integer division.
fn sample_cell<P: PixelSource>(
    image: &P,
    geometry: &BoardGeometry,
    window: &SamplingWindow,
    row: usize,
    col: usize,
) -> [u8; 3] {
    let corner = geometry.cell_origin(row, col);
    let (x0, y0) = (corner.x as u32, corner.y as u32);
    let (x_first, x_end) = window.bounds(geometry.cell_width);
    let (y_first, y_end) = window.bounds(geometry.cell_height);

    let mut sum = [0u64; 3];
    let mut count = 0u64;
    for dy in y_first..y_end {
        for dx in x_first..x_end {
            let rgb = image.rgb_at(x0 + dx, y0 + dy);
            for (total, channel) in sum.iter_mut().zip(rgb) {
                *total += u64::from(channel);
            }
            count += 1;
        }
    }
    sum.map(|total| (total / count) as u8)
}

/// Scans the board out of a capture.
///
/// # Arguments
/// * `image`: the capture.
/// * `geometry`: resolved pixel geometry of the board inside `image`.
/// * `window`: the part of each cell to average.
///
/// # Returns
/// The classified board.
///
/// # Panics
/// Panics if `geometry` is not 8x8, if the board does not lie inside the image, or if
/// the sampling window is empty. All three are caller bugs; use
/// `BoardGeometry::fits_within` to check untrusted captures first.
pub fn scan_board<P: PixelSource>(
    image: &P,
    geometry: &BoardGeometry,
    window: &SamplingWindow,
) -> Board {
    assert!(
        geometry.rows == ROW_COUNT && geometry.cols == COL_COUNT,
        "board geometry must be {}x{}, got {}x{}",
        ROW_COUNT,
        COL_COUNT,
        geometry.rows,
        geometry.cols
    );
    let (width, height) = image.dimensions();
    assert!(
        geometry.fits_within(width, height),
        "board geometry {:?} exceeds the {}x{} capture",
        geometry,
        width,
        height
    );
    let (x_first, x_end) = window.bounds(geometry.cell_width);
    let (y_first, y_end) = window.bounds(geometry.cell_height);
    assert!(
        x_first < x_end && y_first < y_end && x_end <= geometry.cell_width as u32
            && y_end <= geometry.cell_height as u32,
        "sampling window {:?} selects no pixel of a {}x{} cell",
        window,
        geometry.cell_width,
        geometry.cell_height
    );

    let mut grid = [[PieceColor::White; COL_COUNT]; ROW_COUNT];
    for (r, row) in grid.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let rgb = sample_cell(image, geometry, window, r, c);
            *cell = classify_rgb(rgb);
            log::trace!("cell ({}, {}): rgb {:?} -> {:?}", r, c, rgb, cell);
        }
    }
    Board::from_grid(grid)
}

/// Decodes a capture file into an RGB image.
pub fn open_capture(path: impl AsRef<Path>) -> Result<RgbImage, Error> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::Image {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.into_rgb8())
}
