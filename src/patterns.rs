//! Pattern library: shape templates and their compiled, symmetry-expanded form.
//!
//! Authors write one canonical template per kind of match. Loading a source expands
//! every template into its orbit under rotations and reflections, removes duplicates
//! and compiles each distinct shape into a [`Pattern`] bitmask, so the solver never
//! has to rotate anything at search time.
//!
//! # Source format
//!
//! Templates are square grids of side 3 or 4 separated by blank lines:
//!
//! ```text
//! XBX
//! -A-
//! ---
//! ```
//!
//! - `A` marks the source cell of the swap,
//! - `B` marks the destination cell of the swap,
//! - `X` marks a cell that must hold the searched color,
//! - `-` marks a cell whose content does not matter.
use crate::error::{Error, MalformedPatternError, MalformedPatternKind};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Marker of the cell the swap starts from.
pub const SOURCE_MARKER: char = 'A';
/// Marker of the cell the swap ends on.
pub const DESTINATION_MARKER: char = 'B';
/// Marker of a cell that must hold the searched color.
pub const REQUIRED_MARKER: char = 'X';
/// Marker of a cell whose content does not matter.
pub const IGNORED_MARKER: char = '-';

/// The pattern set shipped with the crate.
pub const BUILTIN_PATTERNS: &str = include_str!("../patterns.txt");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Cell {
    Source,
    Destination,
    Required,
    Ignored,
}

impl Cell {
    fn from_char(c: char) -> Option<Cell> {
        match c {
            SOURCE_MARKER => Some(Cell::Source),
            DESTINATION_MARKER => Some(Cell::Destination),
            REQUIRED_MARKER => Some(Cell::Required),
            IGNORED_MARKER => Some(Cell::Ignored),
            _ => None,
        }
    }

    fn to_char(self) -> char {
        match self {
            Cell::Source => SOURCE_MARKER,
            Cell::Destination => DESTINATION_MARKER,
            Cell::Required => REQUIRED_MARKER,
            Cell::Ignored => IGNORED_MARKER,
        }
    }
}

/// Controls whether the destination marker sets a bit in the compiled mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DestinationMask {
    /// Both swap markers count as required cells.
    #[default]
    Required,
    /// Only the source marker counts; the destination cell may hold any color.
    Vacant,
}

/// A validated shape template.
///
/// Cells are stored flattened in row-major order, index 0 being the top-left cell.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Template {
    side: usize,
    cells: Vec<Cell>,
}

impl Template {
    /// Parses one template block.
    ///
    /// # Arguments
    /// * `block`: the template's rows, one per line. Surrounding whitespace on each
    ///   line is ignored, as are blank lines.
    /// * `index`: position of the template in its source, reported in errors.
    ///
    /// # Returns
    /// The template, or a `MalformedPatternError` if the block does not hold 9 or 16
    /// cells, is not square, uses an unknown character, or does not have exactly one
    /// source and one destination marker.
    ///
    /// # Examples
    /// ```
    /// use jewel_solver::patterns::Template;
    /// let template = Template::parse("A-B\nXXX\n---", 0).unwrap();
    /// assert_eq!(template.side_length(), 3);
    /// assert!(Template::parse("AB\nXX", 0).is_err());
    /// ```
    pub fn parse(block: &str, index: usize) -> Result<Template, MalformedPatternError> {
        let malformed = |kind| MalformedPatternError {
            template: index,
            kind,
        };

        let rows: Vec<&str> = block
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let cell_count: usize = rows.iter().map(|row| row.chars().count()).sum();
        if cell_count != 9 && cell_count != 16 {
            return Err(malformed(MalformedPatternKind::InvalidCellCount(cell_count)));
        }

        let side = rows.len();
        if let Some((row, found)) = rows
            .iter()
            .map(|row| row.chars().count())
            .enumerate()
            .find(|&(_, len)| len != side)
        {
            return Err(malformed(MalformedPatternKind::NotSquare {
                row,
                expected: side,
                found,
            }));
        }

        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| {
                Cell::from_char(c).ok_or_else(|| malformed(MalformedPatternKind::UnknownCell(c)))
            })
            .collect::<Result<Vec<Cell>, _>>()?;

        for (marker, cell) in [
            (SOURCE_MARKER, Cell::Source),
            (DESTINATION_MARKER, Cell::Destination),
        ] {
            match cells.iter().filter(|&&c| c == cell).count() {
                0 => return Err(malformed(MalformedPatternKind::MissingMarker(marker))),
                1 => {}
                _ => return Err(malformed(MalformedPatternKind::DuplicateMarker(marker))),
            }
        }

        Ok(Template { side, cells })
    }

    /// Side length of the template (3 or 4).
    pub fn side_length(&self) -> usize {
        self.side
    }

    /// Returns the template's rows using the marker alphabet.
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .chunks(self.side)
            .map(|row| row.iter().map(|cell| cell.to_char()).collect())
            .collect()
    }

    /// Builds a new template where cell `(r, c)` is taken from `source(r, c)` of `self`.
    fn remap(&self, source: impl Fn(usize, usize) -> (usize, usize)) -> Template {
        let n = self.side;
        let cells = (0..n * n)
            .map(|i| {
                let (r, c) = source(i / n, i % n);
                self.cells[r * n + c]
            })
            .collect();
        Template { side: n, cells }
    }

    /// Rotates the template 90 degrees clockwise.
    pub fn rotated(&self) -> Template {
        let last = self.side - 1;
        self.remap(|r, c| (last - c, r))
    }

    /// Mirrors the template left to right: cells swap within each row.
    pub fn flipped_horizontally(&self) -> Template {
        let last = self.side - 1;
        self.remap(|r, c| (r, last - c))
    }

    /// Mirrors the template top to bottom: whole rows swap.
    pub fn flipped_vertically(&self) -> Template {
        let last = self.side - 1;
        self.remap(|r, c| (last - r, c))
    }

    /// Expands the template into its distinct rotations and reflections.
    ///
    /// The identity, the horizontal mirror and the vertical mirror are each rotated
    /// through four quarter turns. Variants are returned in generation order with
    /// duplicates removed, so a template with its own symmetries yields fewer than
    /// eight shapes.
    pub fn symmetry_orbit(&self) -> Vec<Template> {
        let mut seen = HashSet::new();
        let mut orbit = Vec::new();

        for base in [
            self.clone(),
            self.flipped_horizontally(),
            self.flipped_vertically(),
        ] {
            let mut current = base;
            for _ in 0..4 {
                let next = current.rotated();
                if seen.insert(current.clone()) {
                    orbit.push(current);
                }
                current = next;
            }
        }
        orbit
    }

    /// Compiles the template into a bitmask pattern.
    pub fn compile(&self, destination: DestinationMask) -> Pattern {
        let count = self.cells.len();
        let mut required_mask = 0u16;
        let mut move_src_index = 0;
        let mut move_dst_index = 0;

        for (i, cell) in self.cells.iter().enumerate() {
            let required = match cell {
                Cell::Source => {
                    move_src_index = i;
                    true
                }
                Cell::Destination => {
                    move_dst_index = i;
                    destination == DestinationMask::Required
                }
                Cell::Required => true,
                Cell::Ignored => false,
            };
            if required {
                required_mask |= 1 << (count - 1 - i);
            }
        }

        Pattern {
            side_length: self.side,
            required_mask,
            move_src_index,
            move_dst_index,
            priority: required_mask.count_ones(),
        }
    }
}

/// A compiled match shape.
///
/// Bit `side_length² - 1` of `required_mask` is the top-left cell and bit 0 the
/// bottom-right cell, in row-major order. Swap indices are flattened row-major
/// indices into the same grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pattern {
    /// Side length of the shape, 3 or 4.
    pub side_length: usize,
    /// Cells that must hold the searched color.
    pub required_mask: u16,
    /// Flattened index of the swap's source cell.
    pub move_src_index: usize,
    /// Flattened index of the swap's destination cell.
    pub move_dst_index: usize,
    /// Number of required cells; shapes needing more cells are preferred.
    pub priority: u32,
}

impl Pattern {
    /// Number of cells in the shape.
    pub fn cell_count(&self) -> usize {
        self.side_length * self.side_length
    }

    /// Whether the cell at flattened index `index` must hold the searched color.
    pub fn requires(&self, index: usize) -> bool {
        self.required_mask & (1 << (self.cell_count() - 1 - index)) != 0
    }

    /// (row, column) of the source cell relative to the shape's top-left corner.
    pub fn source_offset(&self) -> (usize, usize) {
        (
            self.move_src_index / self.side_length,
            self.move_src_index % self.side_length,
        )
    }

    /// (row, column) of the destination cell relative to the shape's top-left corner.
    pub fn destination_offset(&self) -> (usize, usize) {
        (
            self.move_dst_index / self.side_length,
            self.move_dst_index % self.side_length,
        )
    }

    /// Renders the shape back into template rows.
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.side_length)
            .map(|r| {
                (0..self.side_length)
                    .map(|c| {
                        let i = r * self.side_length + c;
                        if i == self.move_src_index {
                            SOURCE_MARKER
                        } else if i == self.move_dst_index {
                            DESTINATION_MARKER
                        } else if self.requires(i) {
                            REQUIRED_MARKER
                        } else {
                            IGNORED_MARKER
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Splits a source into template blocks separated by runs of blank lines.
fn template_blocks(source: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in source.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }
    blocks
}

/// The compiled patterns, partitioned by side length.
///
/// Within each collection, patterns keep the order in which the symmetry expansion
/// first produced them. The solver relies on this order to break ties.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PatternLibrary {
    patterns_3x3: Vec<Pattern>,
    patterns_4x4: Vec<Pattern>,
}

impl PatternLibrary {
    /// Loads a pattern source with the default `DestinationMask::Required` rule.
    ///
    /// # Examples
    /// ```
    /// use jewel_solver::patterns::PatternLibrary;
    /// let library = PatternLibrary::load("A-B\nXXX\n---").unwrap();
    /// assert_eq!(library.patterns_3x3().len(), 8);
    /// assert!(library.patterns_3x3().iter().all(|p| p.priority == 5));
    /// ```
    pub fn load(source: &str) -> Result<PatternLibrary, MalformedPatternError> {
        PatternLibrary::load_with(source, DestinationMask::default())
    }

    /// Loads a pattern source.
    ///
    /// Every template is validated before anything is compiled, so a malformed
    /// template never leaves a partial library behind.
    pub fn load_with(
        source: &str,
        destination: DestinationMask,
    ) -> Result<PatternLibrary, MalformedPatternError> {
        let templates = template_blocks(source)
            .iter()
            .enumerate()
            .map(|(index, block)| Template::parse(block, index))
            .collect::<Result<Vec<_>, _>>()?;

        let mut seen = HashSet::new();
        let mut library = PatternLibrary::default();

        for variant in templates.iter().flat_map(Template::symmetry_orbit) {
            if !seen.insert(variant.clone()) {
                continue;
            }
            let pattern = variant.compile(destination);
            if pattern.side_length == 3 {
                library.patterns_3x3.push(pattern);
            } else {
                library.patterns_4x4.push(pattern);
            }
        }

        log::debug!(
            "Loaded {} templates into {} 3x3 and {} 4x4 patterns",
            templates.len(),
            library.patterns_3x3.len(),
            library.patterns_4x4.len()
        );
        Ok(library)
    }

    /// Reads and loads a pattern file.
    ///
    /// # Returns
    /// `Error::PatternSource` if the file cannot be read, `Error::MalformedPattern`
    /// if one of its templates is malformed.
    pub fn load_file(
        path: impl AsRef<Path>,
        destination: DestinationMask,
    ) -> Result<PatternLibrary, Error> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| Error::PatternSource {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(PatternLibrary::load_with(&source, destination)?)
    }

    /// Loads the pattern set shipped with the crate.
    pub fn builtin(destination: DestinationMask) -> Result<PatternLibrary, MalformedPatternError> {
        PatternLibrary::load_with(BUILTIN_PATTERNS, destination)
    }

    /// Compiled 3x3 patterns.
    pub fn patterns_3x3(&self) -> &[Pattern] {
        &self.patterns_3x3
    }

    /// Compiled 4x4 patterns.
    pub fn patterns_4x4(&self) -> &[Pattern] {
        &self.patterns_4x4
    }

    /// Total number of compiled patterns.
    pub fn len(&self) -> usize {
        self.patterns_3x3.len() + self.patterns_4x4.len()
    }

    /// Whether the library holds no pattern at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over all patterns, 3x3 first.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns_3x3.iter().chain(self.patterns_4x4.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn template(rows: &[&str]) -> Template {
        Template::parse(&rows.join("\n"), 0).unwrap()
    }

    fn template_of(pattern: &Pattern) -> Template {
        Template::parse(&pattern.to_rows().join("\n"), 0).unwrap()
    }

    fn arb_template() -> impl Strategy<Value = Template> {
        prop_oneof![Just(3usize), Just(4usize)]
            .prop_flat_map(|side| {
                let n = side * side;
                (
                    Just(side),
                    prop::collection::vec(any::<bool>(), n),
                    0..n,
                    0..n,
                )
            })
            .prop_filter("swap cells must differ", |(_, _, src, dst)| src != dst)
            .prop_map(|(side, required, src, dst)| {
                let cells = required
                    .iter()
                    .enumerate()
                    .map(|(i, &req)| {
                        if i == src {
                            Cell::Source
                        } else if i == dst {
                            Cell::Destination
                        } else if req {
                            Cell::Required
                        } else {
                            Cell::Ignored
                        }
                    })
                    .collect();
                Template { side, cells }
            })
    }

    #[test]
    fn test_parse_valid_template() {
        let t = template(&["A-B", "XXX", "---"]);
        assert_eq!(t.side_length(), 3);
        assert_eq!(t.to_rows(), vec!["A-B", "XXX", "---"]);
    }

    #[test]
    fn test_parse_rejects_invalid_cell_count() {
        let err = Template::parse("AB\nXX", 2).unwrap_err();
        assert_eq!(err.template, 2);
        assert_eq!(err.kind, MalformedPatternKind::InvalidCellCount(4));

        let err = Template::parse("AB-XX\nXXXX\n------", 0).unwrap_err();
        assert_eq!(err.kind, MalformedPatternKind::InvalidCellCount(15));
    }

    #[test]
    fn test_parse_rejects_non_square() {
        let err = Template::parse("AB-X\nXXXXX\n-------", 0).unwrap_err();
        assert_eq!(
            err.kind,
            MalformedPatternKind::NotSquare {
                row: 0,
                expected: 3,
                found: 4
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_cell() {
        let err = Template::parse("A-B\nXYX\n---", 0).unwrap_err();
        assert_eq!(err.kind, MalformedPatternKind::UnknownCell('Y'));
    }

    #[test]
    fn test_parse_rejects_marker_count() {
        let err = Template::parse("A--\nXXX\n---", 0).unwrap_err();
        assert_eq!(err.kind, MalformedPatternKind::MissingMarker('B'));

        let err = Template::parse("A-A\nXBX\n---", 0).unwrap_err();
        assert_eq!(err.kind, MalformedPatternKind::DuplicateMarker('A'));

        let err = Template::parse("A-B\nXBX\n---", 0).unwrap_err();
        assert_eq!(err.kind, MalformedPatternKind::DuplicateMarker('B'));
    }

    #[test]
    fn test_transforms() {
        let t = template(&["AB-", "X--", "---"]);
        assert_eq!(t.rotated().to_rows(), vec!["-XA", "--B", "---"]);
        assert_eq!(t.flipped_horizontally().to_rows(), vec!["-BA", "--X", "---"]);
        assert_eq!(t.flipped_vertically().to_rows(), vec!["---", "X--", "AB-"]);

        let t = template(&["AB--", "X---", "----", "---X"]);
        assert_eq!(t.rotated().to_rows(), vec!["--XA", "---B", "----", "X---"]);
    }

    #[test]
    fn test_compile_mask_layout() {
        let p = template(&["A--", "---", "--B"]).compile(DestinationMask::Required);
        assert_eq!(p.required_mask, 0b1_0000_0001);
        assert_eq!(p.move_src_index, 0);
        assert_eq!(p.move_dst_index, 8);
        assert_eq!(p.priority, 2);
        assert_eq!(p.source_offset(), (0, 0));
        assert_eq!(p.destination_offset(), (2, 2));

        let p = template(&["---B", "---A", "----", "X---"]).compile(DestinationMask::Required);
        assert_eq!(p.required_mask, 0b0001_0001_0000_1000);
        assert_eq!(p.move_src_index, 7);
        assert_eq!(p.move_dst_index, 3);
        assert!(p.requires(12));
        assert!(!p.requires(15));
    }

    #[test]
    fn test_compile_vacant_destination() {
        let t = template(&["A-B", "XXX", "---"]);
        let p = t.compile(DestinationMask::Vacant);
        assert_eq!(p.required_mask, 0b100_111_000);
        assert_eq!(p.priority, 4);
        assert_eq!(p.to_rows(), vec!["A-B", "XXX", "---"]);
    }

    #[test]
    fn test_load_example_template() {
        let library = PatternLibrary::load("A-B\nXXX\n---").unwrap();
        assert_eq!(library.patterns_3x3().len(), 8);
        assert!(library.patterns_4x4().is_empty());
        assert!(library.patterns_3x3().iter().all(|p| p.priority == 5));
        assert_eq!(library.patterns_3x3()[0].required_mask, 0b101_111_000);
    }

    #[test]
    fn test_self_symmetric_template_has_smaller_orbit() {
        let t = template(&["XBX", "-A-", "---"]);
        assert_eq!(t.symmetry_orbit().len(), 4);
    }

    #[test]
    fn test_load_deduplicates_across_templates() {
        let library = PatternLibrary::load("XXB\n--A\n---\n\nBXX\nA--\n---").unwrap();
        assert_eq!(library.patterns_3x3().len(), 8);
    }

    #[test]
    fn test_load_handles_blank_line_runs_and_crlf() {
        let source = "\r\nA-B\r\nXXX\r\n---\r\n\r\n\r\n  \r\nA--B\r\nXXXX\r\n----\r\n----\r\n";
        let library = PatternLibrary::load(source).unwrap();
        assert_eq!(library.patterns_3x3().len(), 8);
        assert_eq!(library.patterns_4x4().len(), 8);
        assert_eq!(library.len(), 16);
    }

    #[test]
    fn test_load_reports_template_index() {
        let err = PatternLibrary::load("A-B\nXXX\n---\n\nA-B\nXX\n---").unwrap_err();
        assert_eq!(err.template, 1);
        assert_eq!(err.kind, MalformedPatternKind::InvalidCellCount(8));
    }

    #[test]
    fn test_load_empty_source() {
        let library = PatternLibrary::load("\n\n").unwrap();
        assert!(library.is_empty());
    }

    #[test]
    fn test_load_file_missing() {
        let err = PatternLibrary::load_file("does/not/exist.txt", DestinationMask::Required)
            .unwrap_err();
        assert!(matches!(err, Error::PatternSource { .. }));
        assert!(err.to_string().contains("does/not/exist.txt"));
    }

    #[test]
    fn test_builtin_library() {
        let library = PatternLibrary::builtin(DestinationMask::Vacant).unwrap();
        assert_eq!(library.patterns_3x3().len(), 12);
        assert_eq!(library.patterns_4x4().len(), 16);
        assert_eq!(library.iter().count(), library.len());
    }

    #[test]
    fn test_builtin_library_is_closed_under_symmetry() {
        for destination in [DestinationMask::Required, DestinationMask::Vacant] {
            let library = PatternLibrary::builtin(destination).unwrap();
            for collection in [library.patterns_3x3(), library.patterns_4x4()] {
                for pattern in collection {
                    let t = template_of(pattern);
                    for image in [t.rotated(), t.flipped_horizontally(), t.flipped_vertically()] {
                        assert!(collection.contains(&image.compile(destination)));
                    }
                }
            }
        }
    }

    proptest! {
        #[test]
        fn prop_rotation_has_order_four(t in arb_template()) {
            let rotated = t.rotated().rotated().rotated().rotated();
            prop_assert_eq!(&rotated, &t);
        }

        #[test]
        fn prop_reflections_are_involutions(t in arb_template()) {
            prop_assert_eq!(&t.flipped_horizontally().flipped_horizontally(), &t);
            prop_assert_eq!(&t.flipped_vertically().flipped_vertically(), &t);
        }

        #[test]
        fn prop_orbit_is_closed_under_symmetry(t in arb_template()) {
            let library = PatternLibrary::load(&t.to_rows().join("\n")).unwrap();
            let collection = if t.side_length() == 3 {
                library.patterns_3x3()
            } else {
                library.patterns_4x4()
            };
            prop_assert!(collection.len() <= 8);
            prop_assert_eq!(8 % collection.len(), 0);
            for pattern in collection {
                let variant = template_of(pattern);
                for image in [variant.rotated(), variant.flipped_horizontally(), variant.flipped_vertically()] {
                    prop_assert!(collection.contains(&image.compile(DestinationMask::Required)));
                }
            }
        }

        #[test]
        fn prop_priority_is_required_cell_count(t in arb_template(), vacant in any::<bool>()) {
            let destination = if vacant { DestinationMask::Vacant } else { DestinationMask::Required };
            let library = PatternLibrary::load_with(&t.to_rows().join("\n"), destination).unwrap();
            for pattern in library.iter() {
                prop_assert_eq!(pattern.priority, pattern.required_mask.count_ones());
                let required = (0..pattern.cell_count()).filter(|&i| pattern.requires(i)).count();
                prop_assert_eq!(pattern.priority as usize, required);
            }
        }
    }
}
