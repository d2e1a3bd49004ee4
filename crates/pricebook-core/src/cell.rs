//! Cell reference type and column letter conversion

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell reference in A1 notation (e.g., "Q28")
///
/// Rows and columns are 1-based, matching how positions are reported in
/// diagnostics and how the automation backends address cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    /// Row number (1-based)
    pub row: u32,
    /// Column number (1-based, A=1)
    pub col: u32,
}

impl CellRef {
    /// Create a new cell reference.
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Parse a reference from A1-style notation.
    ///
    /// # Examples
    /// ```
    /// use pricebook_core::CellRef;
    ///
    /// let r = CellRef::parse("Q28").unwrap();
    /// assert_eq!(r.row, 28);
    /// assert_eq!(r.col, 17);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCellRef("empty reference".into()));
        }

        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| Error::InvalidCellRef(format!("no row number in '{s}'")))?;
        if split == 0 {
            return Err(Error::InvalidCellRef(format!("no column letters in '{s}'")));
        }

        let col = Self::letters_to_column(&s[..split])?;
        let row: u32 = s[split..]
            .parse()
            .map_err(|_| Error::InvalidCellRef(format!("invalid row number in '{s}'")))?;
        if row == 0 {
            return Err(Error::InvalidCellRef(format!("row must be >= 1 in '{s}'")));
        }

        Ok(Self { row, col })
    }

    /// Convert column letters to a 1-based column number (A=1, Z=26, AA=27).
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidColumn("empty column letters".into()));
        }
        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidColumn(letters.to_string()));
            }
            let v = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
            col = col
                .checked_mul(26)
                .and_then(|c2| c2.checked_add(v))
                .ok_or_else(|| Error::InvalidColumn(letters.to_string()))?;
        }
        Ok(col)
    }

    /// Convert a 1-based column number to letters (1=A, 26=Z, 27=AA).
    pub fn column_to_letters(col: u32) -> String {
        debug_assert!(col >= 1);
        let mut col = col;
        let mut letters = Vec::new();
        while col > 0 {
            let rem = ((col - 1) % 26) as u8;
            letters.push(b'A' + rem);
            col = (col - 1) / 26;
        }
        letters.reverse();
        String::from_utf8(letters).unwrap_or_default()
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::column_to_letters(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellRef::letters_to_column("A").unwrap(), 1);
        assert_eq!(CellRef::letters_to_column("E").unwrap(), 5);
        assert_eq!(CellRef::letters_to_column("Q").unwrap(), 17);
        assert_eq!(CellRef::letters_to_column("Z").unwrap(), 26);
        assert_eq!(CellRef::letters_to_column("AA").unwrap(), 27);
        assert_eq!(CellRef::letters_to_column("AB").unwrap(), 28);

        // Case insensitive
        assert_eq!(CellRef::letters_to_column("q").unwrap(), 17);

        assert!(CellRef::letters_to_column("").is_err());
        assert!(CellRef::letters_to_column("A1").is_err());
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellRef::column_to_letters(1), "A");
        assert_eq!(CellRef::column_to_letters(5), "E");
        assert_eq!(CellRef::column_to_letters(15), "O");
        assert_eq!(CellRef::column_to_letters(17), "Q");
        assert_eq!(CellRef::column_to_letters(26), "Z");
        assert_eq!(CellRef::column_to_letters(27), "AA");
    }

    #[test]
    fn test_parse() {
        let r = CellRef::parse("A1").unwrap();
        assert_eq!((r.row, r.col), (1, 1));

        let r = CellRef::parse("O28").unwrap();
        assert_eq!((r.row, r.col), (28, 15));

        let r = CellRef::parse(" f12 ").unwrap();
        assert_eq!((r.row, r.col), (12, 6));

        assert!(CellRef::parse("").is_err());
        assert!(CellRef::parse("28").is_err());
        assert!(CellRef::parse("Q").is_err());
        assert!(CellRef::parse("Q0").is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for s in ["A1", "E17", "F100", "Q28", "AA3"] {
            assert_eq!(CellRef::parse(s).unwrap().to_string(), s);
        }
    }
}
