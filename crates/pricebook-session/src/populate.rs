//! Population writer: write matched values and verify by read-back

use pricebook_core::{
    CellRef, CellValue, MatchCandidate, PopulationOutcome, ReconcileConfig, SheetWrite,
};

/// Resolve where a match's value is actually written.
///
/// A match found in the configured label column writes to the value column
/// at the same row (a fixed column offset, not content-derived); any other
/// match writes in place.
pub fn resolve_write_target(candidate: &MatchCandidate, config: &ReconcileConfig) -> CellRef {
    if candidate.target.column == config.label_column {
        CellRef::new(candidate.target.row, config.value_column)
    } else {
        candidate.target.cell_ref()
    }
}

/// Write every match's value to its resolved target and verify by reading
/// the cell back.
///
/// A failing field is counted and diagnosed but never aborts the batch;
/// `succeeded + failed == attempted` always holds. Matches are applied in
/// order, so when two fields resolved to the same cell the later one's
/// value stands.
pub fn populate<W: SheetWrite + ?Sized>(
    sheet: &mut W,
    matches: &[MatchCandidate],
    config: &ReconcileConfig,
) -> PopulationOutcome {
    let mut outcome = PopulationOutcome::default();

    for candidate in matches {
        outcome.attempted += 1;
        let target = resolve_write_target(candidate, config);

        let read_back = sheet
            .write_cell(target, CellValue::from(candidate.source_value.as_str()))
            .and_then(|_| sheet.read_cell(target));

        match read_back {
            Ok(value) if value.to_display_string() == candidate.source_value => {
                tracing::debug!(
                    field = %candidate.source_field,
                    target = %target,
                    "populated field"
                );
                outcome.succeeded += 1;
                outcome.populated_names.push(candidate.source_field.clone());
            }
            Ok(value) => {
                outcome.failed += 1;
                outcome.errors.push(format!(
                    "Verification failed for '{}' at {}: expected '{}', got '{}'",
                    candidate.source_field,
                    target,
                    candidate.source_value,
                    value.to_display_string()
                ));
            }
            Err(e) => {
                outcome.failed += 1;
                outcome.errors.push(format!(
                    "Failed to write '{}' at {}: {e}",
                    candidate.source_field, target
                ));
            }
        }
    }

    tracing::info!(
        attempted = outcome.attempted,
        succeeded = outcome.succeeded,
        failed = outcome.failed,
        "population complete"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySheet;
    use pretty_assertions::assert_eq;
    use pricebook_core::{CellLocation, Error, MatchMethod, Result};

    fn match_at(row: u32, col: u32, field: &str, value: &str) -> MatchCandidate {
        MatchCandidate {
            source_field: field.to_string(),
            target: CellLocation::new(row, col, format!("{field}:")),
            confidence: 1.0,
            source_value: value.to_string(),
            method: MatchMethod::Optimized,
        }
    }

    #[test]
    fn test_label_column_match_writes_to_value_column() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Pricing Setup");
        sheet.set("E2", "Client Name:").unwrap();

        let outcome = populate(&mut sheet, &[match_at(2, 5, "Client Name", "Acme Corp")], &config);

        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 0);
        assert_eq!(sheet.get("F2").unwrap(), CellValue::Text("Acme Corp".into()));
        // The label cell is untouched
        assert_eq!(sheet.get("E2").unwrap(), CellValue::Text("Client Name:".into()));
    }

    #[test]
    fn test_non_label_match_writes_in_place() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Other");

        let outcome = populate(&mut sheet, &[match_at(3, 2, "Cost Centre", "12345")], &config);

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(sheet.get("B3").unwrap(), CellValue::Text("12345".into()));
    }

    #[test]
    fn test_counts_invariant_with_failures() {
        /// Sheet that rejects writes to row 9.
        struct Flaky(MemorySheet);

        impl pricebook_core::SheetRead for Flaky {
            fn name(&self) -> &str {
                self.0.name()
            }
            fn read_cell(&self, cell: CellRef) -> Result<CellValue> {
                self.0.read_cell(cell)
            }
            fn used_range(&self) -> (u32, u32) {
                self.0.used_range()
            }
        }

        impl SheetWrite for Flaky {
            fn write_cell(&mut self, cell: CellRef, value: CellValue) -> Result<()> {
                if cell.row == 9 {
                    return Err(Error::Backend("cell is protected".into()));
                }
                self.0.write_cell(cell, value)
            }
        }

        let config = ReconcileConfig::default();
        let mut sheet = Flaky(MemorySheet::new("Pricing Setup"));
        let matches = vec![
            match_at(2, 5, "Client Name", "Acme Corp"),
            match_at(9, 5, "Opportunity Name", "Project X"),
            match_at(4, 5, "Cost Centre", "12345"),
        ];

        let outcome = populate(&mut sheet, &matches, &config);

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.succeeded + outcome.failed, outcome.attempted);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].contains("Opportunity Name"));
        assert!(outcome.errors[0].contains("F9"));
        assert_eq!(outcome.populated_names, vec!["Client Name", "Cost Centre"]);
    }

    #[test]
    fn test_shared_target_last_writer_wins() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Pricing Setup");

        let matches = vec![
            match_at(2, 5, "Client Name", "First"),
            match_at(2, 5, "Client", "Second"),
        ];
        let outcome = populate(&mut sheet, &matches, &config);

        assert_eq!(outcome.succeeded, 2);
        assert_eq!(sheet.get("F2").unwrap(), CellValue::Text("Second".into()));
    }

    #[test]
    fn test_empty_matches() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Pricing Setup");
        let outcome = populate(&mut sheet, &[], &config);
        assert_eq!(outcome, PopulationOutcome::default());
    }
}
