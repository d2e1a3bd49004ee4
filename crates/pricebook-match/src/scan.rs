//! Candidate scanner: enumerate string-bearing cells worth testing as labels
//!
//! The optimized mode reads only the configured label/value column pair over
//! a bounded row count. The generic mode sweeps a wider row/column window
//! and is the fallback when the sheet is unrecognized or the optimized scan
//! comes back empty. Scan order is row-major, columns in declared order;
//! the matcher relies on that order for its tie-break.

use pricebook_core::{CellLocation, CellRef, MatchMethod, ReconcileConfig, SheetRead};

/// Row cap for the generic sweep.
const GENERIC_ROW_CAP: u32 = 100;
/// Column cap for the generic sweep.
const GENERIC_COL_CAP: u32 = 20;

/// Scan a sheet for label candidates, choosing the mode from the sheet name.
///
/// Returns the candidates in scan order together with the mode that
/// produced them. Scanning never mutates the document.
pub fn scan_candidates<S: SheetRead + ?Sized>(
    sheet: &S,
    config: &ReconcileConfig,
) -> (Vec<CellLocation>, MatchMethod) {
    let recognized = sheet
        .name()
        .to_lowercase()
        .contains(&config.field_sheet.to_lowercase());

    if recognized {
        let found = scan_optimized(sheet, config);
        if !found.is_empty() {
            return (found, MatchMethod::Optimized);
        }
        tracing::debug!(sheet = sheet.name(), "optimized scan found nothing, widening");
    } else {
        tracing::debug!(sheet = sheet.name(), "unrecognized sheet, using generic scan");
    }

    (scan_generic(sheet), MatchMethod::Generic)
}

/// Scan only the configured label and value columns, rows 1..=row_scan_limit.
pub fn scan_optimized<S: SheetRead + ?Sized>(sheet: &S, config: &ReconcileConfig) -> Vec<CellLocation> {
    let (used_rows, _) = sheet.used_range();
    let max_row = config.row_scan_limit.min(used_rows);
    let columns = [config.label_column, config.value_column];

    let mut found = Vec::new();
    for row in 1..=max_row {
        for col in columns {
            collect_candidate(sheet, row, col, &mut found);
        }
    }
    tracing::debug!(candidates = found.len(), max_row, "optimized scan complete");
    found
}

/// Sweep a wider window: rows and columns capped at 100×20.
pub fn scan_generic<S: SheetRead + ?Sized>(sheet: &S) -> Vec<CellLocation> {
    let (used_rows, used_cols) = sheet.used_range();
    let max_row = used_rows.min(GENERIC_ROW_CAP);
    let max_col = used_cols.min(GENERIC_COL_CAP);

    let mut found = Vec::new();
    for row in 1..=max_row {
        for col in 1..=max_col {
            collect_candidate(sheet, row, col, &mut found);
        }
    }
    tracing::debug!(candidates = found.len(), max_row, max_col, "generic scan complete");
    found
}

fn collect_candidate<S: SheetRead + ?Sized>(sheet: &S, row: u32, col: u32, found: &mut Vec<CellLocation>) {
    let value = match sheet.read_cell(CellRef::new(row, col)) {
        Ok(v) => v,
        Err(e) => {
            tracing::trace!(row, col, error = %e, "skipping unreadable cell");
            return;
        }
    };
    if value.is_empty() {
        return;
    }
    let text = value.to_display_string();
    let text = text.trim();
    if is_potential_label(text) {
        found.push(CellLocation::new(row, col, text));
    }
}

/// Whether cell text could plausibly be a field label.
pub fn is_potential_label(text: &str) -> bool {
    let len = text.chars().count();
    if !(3..=200).contains(&len) {
        return false;
    }

    // Pure numbers (ignoring '.' and '-') are data, not labels
    let stripped: String = text.chars().filter(|c| *c != '.' && *c != '-').collect();
    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    // Formulas and reference errors
    if text.starts_with('=') || text.starts_with('#') {
        return false;
    }

    // Labels are words: require at least 3 alphabetic characters
    text.chars().filter(|c| c.is_alphabetic()).count() >= 3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_potential_label() {
        assert!(is_potential_label("Client Name:"));
        assert!(is_potential_label("01. Opportunity ID"));

        assert!(!is_potential_label("ab"));
        assert!(!is_potential_label(&"x".repeat(201)));
        assert!(!is_potential_label("12345"));
        assert!(!is_potential_label("12.5"));
        assert!(!is_potential_label("-42"));
        assert!(!is_potential_label("=SUM(A1:A10)"));
        assert!(!is_potential_label("#REF!"));
        assert!(!is_potential_label("$$$"));
        assert!(!is_potential_label("a1 2"));
    }
}
