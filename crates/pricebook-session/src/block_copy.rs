//! Block copy: transplant a fixed-shape resource block between documents
//!
//! The resource roster has no single-cell label to match against, so both
//! ends are located by content heuristics: the source block is the first
//! candidate range whose rows carry real resource content; the target area
//! is the first candidate range that is mostly empty or placeholder rows.
//! Discovery failure is soft: zero cells copied, reason recorded.

use pricebook_core::{BlockCopyOutcome, CellRef, CellValue, SheetRead, SheetWrite};

/// Keywords whose presence marks a row as real resource content.
const RESOURCE_KEYWORDS: [&str; 7] = [
    "consultant",
    "manager",
    "director",
    "analyst",
    "engineer",
    "architect",
    "partner",
];

/// Share of empty/placeholder rows required of a target area.
const TARGET_SUITABILITY: f64 = 0.8;

/// A rectangular cell block, 1-based, inclusive of all its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockRange {
    pub start_row: u32,
    pub start_col: u32,
    pub rows: u32,
    pub cols: u32,
}

impl BlockRange {
    pub fn new(start_row: u32, start_col: u32, rows: u32, cols: u32) -> Self {
        Self {
            start_row,
            start_col,
            rows,
            cols,
        }
    }

    /// A1-style range string, e.g. "C28:H34".
    pub fn a1(&self) -> String {
        let first = CellRef::new(self.start_row, self.start_col);
        let last = CellRef::new(
            self.start_row + self.rows - 1,
            self.start_col + self.cols - 1,
        );
        format!("{first}:{last}")
    }

    pub fn cell_count(&self) -> u32 {
        self.rows * self.cols
    }
}

/// Whether a cell's text is a bare placeholder token ("Group 1").
fn is_placeholder(text: &str) -> bool {
    let t = text.trim().to_lowercase();
    match t.strip_prefix("group ") {
        Some(rest) => !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

fn read_block<S: SheetRead + ?Sized>(sheet: &S, range: BlockRange) -> Option<Vec<Vec<CellValue>>> {
    let mut rows = Vec::with_capacity(range.rows as usize);
    for r in 0..range.rows {
        let mut row = Vec::with_capacity(range.cols as usize);
        for c in 0..range.cols {
            let cell = CellRef::new(range.start_row + r, range.start_col + c);
            match sheet.read_cell(cell) {
                Ok(v) => row.push(v),
                Err(e) => {
                    tracing::debug!(range = %range.a1(), error = %e, "range not readable");
                    return None;
                }
            }
        }
        rows.push(row);
    }
    Some(rows)
}

fn row_text(row: &[CellValue]) -> String {
    row.iter()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_display_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// A block is meaningful when at least two of its rows carry resource
/// content that is more than a placeholder token.
fn has_meaningful_rows(block: &[Vec<CellValue>]) -> bool {
    let meaningful = block
        .iter()
        .filter(|row| {
            let text = row_text(row);
            let trimmed = text.trim();
            !trimmed.is_empty()
                && !is_placeholder(trimmed)
                && RESOURCE_KEYWORDS
                    .iter()
                    .any(|kw| trimmed.to_lowercase().contains(kw))
        })
        .count();
    meaningful >= 2
}

/// A target area is suitable when at least 80% of its rows are empty or
/// placeholder-only.
fn is_suitable_target(block: &[Vec<CellValue>]) -> bool {
    if block.is_empty() {
        return true;
    }
    let open = block
        .iter()
        .filter(|row| {
            let text = row_text(row);
            let trimmed = text.trim();
            trimmed.is_empty() || is_placeholder(trimmed)
        })
        .count();
    (open as f64 / block.len() as f64) >= TARGET_SUITABILITY
}

/// Candidate source ranges: the primary expected location first, then
/// nearby offsets.
fn source_candidates(rows: u32) -> Vec<BlockRange> {
    vec![
        BlockRange::new(28, 3, rows, 6), // C:H, expected location
        BlockRange::new(25, 3, rows, 6), // a bit higher
        BlockRange::new(30, 3, rows, 6), // a bit lower
        BlockRange::new(28, 2, rows, 7), // B:H, data shifted left
        BlockRange::new(28, 4, rows, 6), // D:I, data shifted right
        BlockRange::new(28, 1, rows, 8), // A:H, widest
    ]
}

/// Candidate target areas, parallel to the source list.
fn target_candidates(rows: u32) -> Vec<BlockRange> {
    let start_rows = [28u32, 25, 30, 20, 35];
    let col_spans = [(2u32, 7u32), (3, 6), (1, 8)]; // B:H, C:H, A:H
    let mut out = Vec::new();
    for row in start_rows {
        for (col, width) in col_spans {
            out.push(BlockRange::new(row, col, rows, width));
        }
    }
    out
}

/// Find the source block, trying expected locations then a bounded sweep.
pub fn find_source_block<S: SheetRead + ?Sized>(sheet: &S, rows: u32) -> Option<BlockRange> {
    for range in source_candidates(rows) {
        if let Some(block) = read_block(sheet, range) {
            if has_meaningful_rows(&block) {
                tracing::info!(range = %range.a1(), "found source resource block");
                return Some(range);
            }
        }
    }

    // Broader sweep over the sheet's top rows
    let (used_rows, _) = sheet.used_range();
    let max_row = used_rows.min(50);
    if max_row < rows {
        return None;
    }
    for start_row in 1..=(max_row - rows + 1).min(19) {
        for start_col in 1..=3 {
            let range = BlockRange::new(start_row, start_col, rows, 6);
            if let Some(block) = read_block(sheet, range) {
                if has_meaningful_rows(&block) {
                    tracing::info!(range = %range.a1(), "sweep found source resource block");
                    return Some(range);
                }
            }
        }
    }
    None
}

/// Find a suitable target area, trying expected locations then a fallback
/// sweep further down the sheet.
pub fn find_target_area<S: SheetRead + ?Sized>(sheet: &S, rows: u32) -> Option<BlockRange> {
    for range in target_candidates(rows) {
        if let Some(block) = read_block(sheet, range) {
            if is_suitable_target(&block) {
                tracing::info!(range = %range.a1(), "found target area");
                return Some(range);
            }
        }
    }

    for start_row in (20..=100).step_by(5) {
        for (col, width) in [(2u32, 7u32), (3, 6)] {
            let range = BlockRange::new(start_row, col, rows, width);
            if let Some(block) = read_block(sheet, range) {
                if is_suitable_target(&block) {
                    tracing::info!(range = %range.a1(), "fallback found target area");
                    return Some(range);
                }
            }
        }
    }
    None
}

/// Copy the resource block from `source` into a suitable area of `target`.
///
/// Cell values are transferred verbatim, preserving the block's row/column
/// shape. Both discovery failures are soft: the outcome records zero cells
/// copied and the reason, and the error never propagates.
pub fn copy_block<S, W>(source: &S, target: &mut W, rows: u32) -> BlockCopyOutcome
where
    S: SheetRead + ?Sized,
    W: SheetWrite + ?Sized,
{
    let source_range = match find_source_block(source, rows) {
        Some(r) => r,
        None => {
            tracing::warn!("no meaningful source resource block found");
            return BlockCopyOutcome::failed("no source resource block found");
        }
    };

    let target_range = match find_target_area(target, rows) {
        Some(r) => r,
        None => {
            tracing::warn!("no suitable target area found");
            return BlockCopyOutcome::failed("no suitable target area found");
        }
    };

    let block = match read_block(source, source_range) {
        Some(b) => b,
        None => return BlockCopyOutcome::failed("source block became unreadable"),
    };

    // The copy preserves the source shape even when the target candidate
    // was declared wider
    for (r, row) in block.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let cell = CellRef::new(
                target_range.start_row + r as u32,
                target_range.start_col + c as u32,
            );
            if let Err(e) = target.write_cell(cell, value.clone()) {
                tracing::warn!(cell = %cell, error = %e, "copy aborted mid-block");
                return BlockCopyOutcome {
                    cells_copied: 0,
                    source_range: Some(source_range.a1()),
                    target_range: Some(target_range.a1()),
                    success: false,
                    reason: Some(format!("write failed at {cell}: {e}")),
                };
            }
        }
    }

    let copied = BlockRange::new(
        target_range.start_row,
        target_range.start_col,
        source_range.rows,
        source_range.cols,
    );
    tracing::info!(
        cells = source_range.cell_count(),
        source = %source_range.a1(),
        target = %copied.a1(),
        "resource block copied"
    );
    BlockCopyOutcome {
        cells_copied: source_range.cell_count(),
        source_range: Some(source_range.a1()),
        target_range: Some(copied.a1()),
        success: true,
        reason: None,
    }
}
