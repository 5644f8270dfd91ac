//! Cell reference parsing and formatting.
//!
//! Provides bidirectional conversion between spreadsheet-style cell references
//! (e.g., "A1", "$B$2", "AA100") and zero-indexed column/row coordinates.
//!
//! # Examples
//!
//! ```
//! use tally_engine::engine::CellRef;
//!
//! let cell: CellRef = "B3".parse().unwrap();
//! assert_eq!(cell.col, 1); // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

use super::error::{InvalidReference, ParseError};

/// A reference to a cell by column and row indices (0-indexed).
///
/// Ordering is row-major, which is also the order ranges are iterated in.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Convert column index to spreadsheet-style letters (0 -> A, 25 -> Z, 26 -> AA).
    pub fn col_to_letters(col: usize) -> String {
        index_to_column(col)
    }
}

/// Decode column letters as a bijective base-26 numeral ("A" -> 0, "Z" -> 25, "AA" -> 26).
pub fn column_to_index(letters: &str) -> Result<usize, InvalidReference> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(InvalidReference(letters.to_string()));
    }

    let mut col_acc = 0usize;
    for c in letters.bytes() {
        let digit = (c - b'A') as usize + 1;
        col_acc = col_acc
            .checked_mul(26)
            .and_then(|acc| acc.checked_add(digit))
            .ok_or_else(|| InvalidReference(letters.to_string()))?;
    }
    Ok(col_acc - 1)
}

/// Encode a column index as letters. Inverse of [`column_to_index`].
pub fn index_to_column(col: usize) -> String {
    let mut result = String::new();
    let mut n = col as u128 + 1;
    while n > 0 {
        n -= 1;
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        n /= 26;
    }
    result
}

/// Per-axis `$` anchoring of a reference.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AbsFlags {
    pub col: bool,
    pub row: bool,
}

impl AbsFlags {
    pub const RELATIVE: AbsFlags = AbsFlags {
        col: false,
        row: false,
    };
    pub const ABSOLUTE: AbsFlags = AbsFlags {
        col: true,
        row: true,
    };
}

/// Column/row offset applied by fill, copy and paste.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct Delta {
    pub dx: isize,
    pub dy: isize,
}

impl Delta {
    pub fn new(dx: isize, dy: isize) -> Delta {
        Delta { dx, dy }
    }

    /// The offset that moves `from` onto `to`.
    pub fn between(from: &CellRef, to: &CellRef) -> Delta {
        Delta {
            dx: to.col as isize - from.col as isize,
            dy: to.row as isize - from.row as isize,
        }
    }
}

/// A cell reference as written in a formula: coordinates plus anchoring.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub cell: CellRef,
    pub abs: AbsFlags,
}

impl Reference {
    pub fn new(cell: CellRef, abs: AbsFlags) -> Reference {
        Reference { cell, abs }
    }

    pub fn relative(cell: CellRef) -> Reference {
        Reference::new(cell, AbsFlags::RELATIVE)
    }

    /// Offset the non-anchored axes by `delta`.
    /// Returns None if the result would fall left of column A or above row 1.
    pub fn shifted(&self, delta: Delta) -> Option<Reference> {
        let col = if self.abs.col {
            self.cell.col
        } else {
            self.cell.col.checked_add_signed(delta.dx)?
        };
        let row = if self.abs.row {
            self.cell.row
        } else {
            self.cell.row.checked_add_signed(delta.dy)?
        };
        Some(Reference::new(CellRef::new(col, row), self.abs))
    }
}

fn reference_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?<col_abs>\$?)(?<letters>[A-Z]+)(?<row_abs>\$?)(?<numbers>[1-9][0-9]*)")
            .expect("reference regex must compile")
    })
}

/// Match `$?LETTERS$?DIGITS` at the start of `text`.
///
/// Rows are 1-based in text and 0-based in the returned coordinate. On success
/// the consumed byte length is returned so parsing can continue after it.
pub fn parse_reference(text: &str) -> Result<(Reference, usize), ParseError> {
    let caps = reference_re()
        .captures(text)
        .ok_or_else(|| ParseError::new("expected a cell reference", text))?;
    let consumed = caps.get(0).map_or(0, |m| m.end());

    let col = column_to_index(&caps["letters"])
        .map_err(|_| ParseError::new("column out of range", text))?;
    let row = caps["numbers"]
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| ParseError::new("row out of range", text))?;

    let abs = AbsFlags {
        col: !caps["col_abs"].is_empty(),
        row: !caps["row_abs"].is_empty(),
    };
    Ok((Reference::new(CellRef::new(col, row), abs), consumed))
}

/// A rectangle of cells spanned by two corners given in any order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct CellRange {
    start: CellRef,
    end: CellRef,
}

impl CellRange {
    /// Build a range from two corners; the corners are normalized so that
    /// `start` is the top-left and `end` the bottom-right cell.
    pub fn new(a: CellRef, b: CellRef) -> CellRange {
        CellRange {
            start: CellRef::new(a.col.min(b.col), a.row.min(b.row)),
            end: CellRef::new(a.col.max(b.col), a.row.max(b.row)),
        }
    }

    pub fn top_left(&self) -> CellRef {
        self.start
    }

    pub fn width(&self) -> usize {
        self.end.col - self.start.col + 1
    }

    pub fn height(&self) -> usize {
        self.end.row - self.start.row + 1
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        (self.start.col..=self.end.col).contains(&cell.col)
            && (self.start.row..=self.end.row).contains(&cell.row)
    }

    /// Iterate row-major: rows ascending, columns ascending within a row.
    pub fn iter(&self) -> impl Iterator<Item = CellRef> + use<> {
        let (start, end) = (self.start, self.end);
        (start.row..=end.row)
            .flat_map(move |row| (start.col..=end.col).map(move |col| CellRef::new(col, row)))
    }
}

impl std::str::FromStr for CellRef {
    type Err = InvalidReference;

    /// Parse a plain reference such as `b3` or `$B$3` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        match parse_reference(&upper) {
            Ok((reference, consumed)) if consumed == upper.len() => Ok(reference.cell),
            _ => Err(InvalidReference(s.to_string())),
        }
    }
}

impl std::str::FromStr for CellRange {
    type Err = InvalidReference;

    /// Parse `A1:B5`; a single reference yields a one-cell range.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((a, b)) => Ok(CellRange::new(a.parse()?, b.parse()?)),
            None => {
                let cell: CellRef = s.parse()?;
                Ok(CellRange::new(cell, cell))
            }
        }
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", index_to_column(self.col), self.row as u128 + 1)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_marker = if self.abs.col { "$" } else { "" };
        let row_marker = if self.abs.row { "$" } else { "" };
        write!(
            f,
            "{}{}{}{}",
            col_marker,
            index_to_column(self.cell.col),
            row_marker,
            self.cell.row as u128 + 1
        )
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
