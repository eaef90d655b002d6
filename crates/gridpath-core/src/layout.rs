//! Versioned grid layouts for editors and loaders.
//!
//! A [`Layout`] is the persisted form of a grid: an explicit `rows × cols`
//! header plus a flat row-major array of [`Role`]s. Search tags are never
//! persisted. Two encodings are provided, neither of which touches the file
//! system itself.
//!
//! ## Binary format
//!
//! ```text
//! [magic: b"GPTH"]
//! [version: u16 LE]   (currently 1)
//! [rows: u32 LE]
//! [cols: u32 LE]
//! rows * cols role bytes: 0 empty, 1 barrier, 2 start, 3 end
//! ```
//!
//! ## Text format
//!
//! ```text
//! gridpath 1 3 4
//! S...
//! .##.
//! ...E
//! ```
//!
//! The header names the format, version, rows and columns; each following
//! line is one row using `.` `#` `S` `E`.

use std::fmt;
use std::io::{self, Read, Write};

use crate::cell::Role;
use crate::geom::{Bounds, Coord};
use crate::grid::Grid;

/// Leading bytes of the binary encoding.
pub const MAGIC: [u8; 4] = *b"GPTH";
/// Current layout format version.
pub const VERSION: u16 = 1;
/// First token of the text header.
pub const TEXT_TAG: &str = "gridpath";

/// Header size: magic(4) + version(2) + rows(4) + cols(4) = 14
const HEADER_SIZE: usize = 14;

// ---------------------------------------------------------------------------
// LayoutError
// ---------------------------------------------------------------------------

/// Errors that can occur when reading or validating a layout.
#[derive(Debug)]
pub enum LayoutError {
    /// The underlying reader or writer failed.
    Io(io::Error),
    /// The binary stream does not start with [`MAGIC`].
    BadMagic([u8; 4]),
    /// The encoded version is not one this crate understands.
    UnsupportedVersion(u16),
    /// The text header line is missing or malformed.
    BadHeader(String),
    /// The role array does not hold `rows * cols` entries.
    SizeMismatch { expected: usize, got: usize },
    /// The text body has the wrong number of rows.
    RowCount { expected: usize, got: usize },
    /// A text row has the wrong number of columns.
    RowWidth { row: usize, expected: usize, got: usize },
    /// A binary role byte is not a known role code.
    InvalidRole { code: u8, index: usize },
    /// A text character is not a known role rune.
    InvalidRune { ch: char, pos: Coord },
    /// More than one cell carries the start or end role.
    MultipleMarkers(Role),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "layout i/o error: {e}"),
            Self::BadMagic(m) => write!(f, "layout: bad magic {m:02x?}"),
            Self::UnsupportedVersion(v) => write!(f, "layout: unsupported version {v}"),
            Self::BadHeader(h) => write!(f, "layout: bad header \u{201c}{h}\u{201d}"),
            Self::SizeMismatch { expected, got } => {
                write!(f, "layout: expected {expected} roles, got {got}")
            }
            Self::RowCount { expected, got } => {
                write!(f, "layout: expected {expected} rows, got {got}")
            }
            Self::RowWidth { row, expected, got } => {
                write!(f, "layout: row {row} has {got} columns, expected {expected}")
            }
            Self::InvalidRole { code, index } => {
                write!(f, "layout: invalid role code {code} at index {index}")
            }
            Self::InvalidRune { ch, pos } => {
                write!(f, "layout contains invalid rune \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MultipleMarkers(role) => write!(f, "layout: more than one {role:?} cell"),
        }
    }
}

impl std::error::Error for LayoutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LayoutError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// The persisted form of a grid: dimensions plus a row-major role array.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Layout {
    pub version: u16,
    pub rows: u32,
    pub cols: u32,
    pub roles: Vec<Role>,
}

impl Layout {
    /// Build a validated layout at the current [`VERSION`].
    pub fn new(rows: u32, cols: u32, roles: Vec<Role>) -> Result<Self, LayoutError> {
        let layout = Self {
            version: VERSION,
            rows,
            cols,
            roles,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// An all-empty layout.
    pub fn empty(rows: u32, cols: u32) -> Self {
        Self {
            version: VERSION,
            rows,
            cols,
            roles: vec![Role::Empty; rows as usize * cols as usize],
        }
    }

    /// Check the version, the dimensions and the at-most-one start/end
    /// invariant.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.version != VERSION {
            return Err(LayoutError::UnsupportedVersion(self.version));
        }
        let expected = role_count(self.rows, self.cols)?;
        if self.roles.len() != expected {
            return Err(LayoutError::SizeMismatch {
                expected,
                got: self.roles.len(),
            });
        }
        for marker in [Role::Start, Role::End] {
            if self.roles.iter().filter(|&&r| r == marker).count() > 1 {
                return Err(LayoutError::MultipleMarkers(marker));
            }
        }
        Ok(())
    }

    /// Capture the roles of `grid`. Search tags are dropped.
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            version: VERSION,
            rows: grid.rows() as u32,
            cols: grid.cols() as u32,
            roles: grid.cells().iter().map(|cell| cell.role).collect(),
        }
    }

    /// Build a fresh grid (all tags unvisited) from this layout.
    pub fn to_grid(&self) -> Result<Grid, LayoutError> {
        self.validate()?;
        let mut grid = Grid::new(self.rows as i32, self.cols as i32);
        let bounds = grid.bounds();
        for (i, &role) in self.roles.iter().enumerate() {
            grid.set_role(bounds.coord(i), role);
        }
        Ok(grid)
    }

    /// Consuming form of [`to_grid`](Self::to_grid).
    pub fn into_grid(self) -> Result<Grid, LayoutError> {
        self.to_grid()
    }

    /// Swap rows and columns.
    ///
    /// Useful when importing data that was stored column-major
    /// (`data[col][row]`).
    pub fn transposed(&self) -> Self {
        let (rows, cols) = (self.rows as usize, self.cols as usize);
        let mut roles = Vec::with_capacity(self.roles.len());
        for c in 0..cols {
            for r in 0..rows {
                roles.push(self.roles.get(r * cols + c).copied().unwrap_or_default());
            }
        }
        Self {
            version: self.version,
            rows: self.cols,
            cols: self.rows,
            roles,
        }
    }

    /// Parse the text encoding.
    ///
    /// Leading and trailing blank lines are ignored, as is a trailing `\r`
    /// on each line.
    pub fn parse_text(s: &str) -> Result<Self, LayoutError> {
        let mut lines = s.trim().lines().map(|l| l.strip_suffix('\r').unwrap_or(l));
        let header = lines
            .next()
            .ok_or_else(|| LayoutError::BadHeader(String::new()))?;
        let (version, rows, cols) = parse_header(header)?;
        if version != VERSION {
            return Err(LayoutError::UnsupportedVersion(version));
        }

        // The header alone never sizes an allocation: a body shorter than it
        // claims fails below, so reserve no more than the input could hold.
        let expected = role_count(rows, cols)?;
        let mut roles = Vec::with_capacity(expected.min(s.len()));
        let mut row = 0usize;
        for line in lines {
            if row < rows as usize {
                let mut width = 0usize;
                for (col, ch) in line.chars().enumerate() {
                    let role = Role::from_rune(ch).ok_or(LayoutError::InvalidRune {
                        ch,
                        pos: Coord::new(row as i32, col as i32),
                    })?;
                    roles.push(role);
                    width += 1;
                }
                if width != cols as usize {
                    return Err(LayoutError::RowWidth {
                        row,
                        expected: cols as usize,
                        got: width,
                    });
                }
            }
            row += 1;
        }
        if row != rows as usize {
            return Err(LayoutError::RowCount {
                expected: rows as usize,
                got: row,
            });
        }
        Self::new(rows, cols, roles)
    }

    /// Render the text encoding, ending with a newline.
    pub fn to_text(&self) -> String {
        let mut out = format!("{TEXT_TAG} {} {} {}\n", self.version, self.rows, self.cols);
        if self.cols == 0 {
            return out;
        }
        for row in self.roles.chunks(self.cols as usize) {
            out.extend(row.iter().map(|r| r.rune()));
            out.push('\n');
        }
        out
    }

    /// Bounds of the grid this layout describes.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.rows as i32, self.cols as i32)
    }
}

impl From<&Grid> for Layout {
    fn from(grid: &Grid) -> Self {
        Self::from_grid(grid)
    }
}

/// Number of roles in a `rows × cols` layout, rejecting dimensions a
/// [`Grid`] cannot address.
fn role_count(rows: u32, cols: u32) -> Result<usize, LayoutError> {
    if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
        return Err(LayoutError::BadHeader(format!(
            "{rows} x {cols} exceeds the addressable grid size"
        )));
    }
    (rows as usize)
        .checked_mul(cols as usize)
        .ok_or_else(|| LayoutError::BadHeader(format!("{rows} x {cols}")))
}

fn parse_header(line: &str) -> Result<(u16, u32, u32), LayoutError> {
    let bad = || LayoutError::BadHeader(line.to_string());
    let mut parts = line.split_whitespace();
    if parts.next() != Some(TEXT_TAG) {
        return Err(bad());
    }
    let version = parts.next().and_then(|v| v.parse().ok()).ok_or_else(bad)?;
    let rows = parts.next().and_then(|v| v.parse().ok()).ok_or_else(bad)?;
    let cols = parts.next().and_then(|v| v.parse().ok()).ok_or_else(bad)?;
    if parts.next().is_some() {
        return Err(bad());
    }
    Ok((version, rows, cols))
}

// ---------------------------------------------------------------------------
// LayoutEncoder
// ---------------------------------------------------------------------------

/// Encodes [`Layout`]s to a byte-oriented writer.
pub struct LayoutEncoder<W: Write> {
    writer: W,
}

impl<W: Write> LayoutEncoder<W> {
    /// Wrap a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single layout.
    pub fn encode(&mut self, layout: &Layout) -> Result<(), LayoutError> {
        layout.validate()?;
        self.writer.write_all(&MAGIC)?;
        self.writer.write_all(&layout.version.to_le_bytes())?;
        self.writer.write_all(&layout.rows.to_le_bytes())?;
        self.writer.write_all(&layout.cols.to_le_bytes())?;
        let body: Vec<u8> = layout.roles.iter().map(|r| r.code()).collect();
        self.writer.write_all(&body)?;
        Ok(())
    }

    /// Write the roles of `grid`.
    pub fn encode_grid(&mut self, grid: &Grid) -> Result<(), LayoutError> {
        self.encode(&Layout::from_grid(grid))
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    /// Consume the encoder, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

// ---------------------------------------------------------------------------
// LayoutDecoder
// ---------------------------------------------------------------------------

/// Decodes [`Layout`]s from a byte-oriented reader.
pub struct LayoutDecoder<R: Read> {
    reader: R,
}

impl<R: Read> LayoutDecoder<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Read one layout.
    pub fn decode(&mut self) -> Result<Layout, LayoutError> {
        let mut header = [0u8; HEADER_SIZE];
        self.reader.read_exact(&mut header)?;

        let magic = [header[0], header[1], header[2], header[3]];
        if magic != MAGIC {
            return Err(LayoutError::BadMagic(magic));
        }
        let version = u16::from_le_bytes([header[4], header[5]]);
        if version != VERSION {
            return Err(LayoutError::UnsupportedVersion(version));
        }
        let rows = u32::from_le_bytes([header[6], header[7], header[8], header[9]]);
        let cols = u32::from_le_bytes([header[10], header[11], header[12], header[13]]);
        let expected = (rows as usize)
            .checked_mul(cols as usize)
            .ok_or_else(|| LayoutError::BadHeader(format!("{rows} x {cols}")))?;

        // Bounded read so a corrupt header cannot force a huge allocation
        // before the short body is noticed.
        let mut body = Vec::new();
        (&mut self.reader)
            .take(expected as u64)
            .read_to_end(&mut body)?;
        if body.len() != expected {
            return Err(LayoutError::SizeMismatch {
                expected,
                got: body.len(),
            });
        }

        let roles = body
            .iter()
            .enumerate()
            .map(|(index, &code)| Role::from_code(code).ok_or(LayoutError::InvalidRole { code, index }))
            .collect::<Result<Vec<_>, _>>()?;
        Layout::new(rows, cols, roles)
    }

    /// Read one layout and build a grid from it.
    pub fn decode_grid(&mut self) -> Result<Grid, LayoutError> {
        self.decode()?.to_grid()
    }

    /// Consume the decoder, returning the inner reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use crate::cell::Cell;

    #[test]
    fn layout_json_round_trip() {
        let layout = Layout::parse_text("gridpath 1 2 2\nS#\n.E\n").unwrap();
        let json = serde_json::to_string(&layout).unwrap();
        let back: Layout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
        assert!(back.validate().is_ok());
    }

    #[test]
    fn cell_json_round_trip() {
        let cell = Cell::new(Role::End).with_tag(crate::SearchTag::Path);
        let json = serde_json::to_string(&cell).unwrap();
        let back: Cell = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cell);
    }
}
