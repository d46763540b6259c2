//! Error types shared by the pattern loader, the board parser and the binaries.

use std::path::PathBuf;

/// Errors produced while loading inputs for the solver.
///
/// Only load-time and input-decoding failures are represented here. A board with
/// no available match is not an error (the solver returns `None`), and violated
/// caller contracts such as a geometry that samples outside the image panic.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum Error {
    /// The pattern source file could not be read.
    #[display("failed to read pattern source {}: {source}", path.display())]
    PatternSource {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A template in the pattern source is malformed.
    #[display("{_0}")]
    MalformedPattern(#[error(not(source))] MalformedPatternError),
    /// The board file could not be read.
    #[display("failed to read board file {}: {source}", path.display())]
    BoardSource {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// A textual board could not be parsed.
    #[display("invalid board text: {_0}")]
    BoardText(#[error(not(source))] String),
    /// A screenshot could not be decoded.
    #[display("failed to decode capture {}: {source}", path.display())]
    Image {
        /// Path of the capture.
        path: PathBuf,
        /// Decoder failure.
        source: image::ImageError,
    },
    /// The capture is too small to contain the board at the resolved geometry.
    #[display("capture of {width}x{height} pixels does not contain the board region")]
    CaptureTooSmall {
        /// Capture width in pixels.
        width: u32,
        /// Capture height in pixels.
        height: u32,
    },
}

impl From<MalformedPatternError> for Error {
    fn from(err: MalformedPatternError) -> Self {
        Error::MalformedPattern(err)
    }
}

/// A shape template that cannot be compiled into patterns.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("malformed pattern template #{template}: {kind}")]
pub struct MalformedPatternError {
    /// 0-based index of the template within the pattern source.
    pub template: usize,
    /// What is wrong with it.
    pub kind: MalformedPatternKind,
}

/// The ways a shape template can be malformed.
#[derive(Clone, Debug, PartialEq, Eq, derive_more::Display)]
pub enum MalformedPatternKind {
    /// A row's length differs from the number of rows.
    #[display("row {row} has {found} cells, expected {expected}")]
    NotSquare {
        /// 0-based row index.
        row: usize,
        /// Number of rows, which every row length must equal.
        expected: usize,
        /// Actual row length.
        found: usize,
    },
    /// The template does not hold 9 or 16 cells.
    #[display("template has {_0} cells, expected 9 or 16")]
    InvalidCellCount(usize),
    /// A cell uses a character outside the marker alphabet.
    #[display("unknown cell character {_0:?}")]
    UnknownCell(char),
    /// The template has no cell with the given marker.
    #[display("missing {_0:?} marker")]
    MissingMarker(char),
    /// The template has more than one cell with the given marker.
    #[display("more than one {_0:?} marker")]
    DuplicateMarker(char),
}
