//! Read/write seams over a single sheet
//!
//! The scanner and matcher only need [`SheetRead`]; the writers need
//! [`SheetWrite`]. Concrete automation backends implement these per sheet.

use crate::cell::CellRef;
use crate::error::Result;
use crate::value::CellValue;

/// Read-only access to one sheet of an open document.
pub trait SheetRead {
    /// The sheet's name, as the document reports it.
    fn name(&self) -> &str;

    /// Read a cell's value. Out-of-range cells read as [`CellValue::Empty`].
    fn read_cell(&self, cell: CellRef) -> Result<CellValue>;

    /// The sheet's used extent as (max_row, max_col), both 1-based.
    /// (0, 0) for an empty sheet.
    fn used_range(&self) -> (u32, u32);
}

/// Mutable access to one sheet of an open document.
pub trait SheetWrite: SheetRead {
    /// Write a cell's value.
    fn write_cell(&mut self, cell: CellRef, value: CellValue) -> Result<()>;
}
