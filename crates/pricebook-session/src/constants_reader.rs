//! Reads label/value pairs out of a reference constants document.
//!
//! The reference layout is two adjacent columns: labels in one, values in
//! the next. Rows with an empty label or an empty value are skipped.

use pricebook_core::{CellRef, FieldMap, ReconcileConfig, SheetRead};

/// Collect source fields from the configured label/value column pair.
///
/// Scans rows top-down up to `row_scan_limit`, bounded by the sheet's used
/// range. A label that repeats keeps its first position but takes the
/// later value, matching [`FieldMap`] insert semantics.
pub fn read_source_fields<S: SheetRead + ?Sized>(
    sheet: &S,
    config: &ReconcileConfig,
) -> FieldMap {
    let mut fields = FieldMap::new();
    let (used_rows, _) = sheet.used_range();
    let last_row = used_rows.min(config.row_scan_limit);

    for row in 1..=last_row {
        let label = match sheet.read_cell(CellRef::new(row, config.source_label_column)) {
            Ok(v) if !v.is_empty() => v.to_display_string(),
            _ => continue,
        };
        let value = match sheet.read_cell(CellRef::new(row, config.source_value_column)) {
            Ok(v) if !v.is_empty() => v.to_display_string(),
            _ => continue,
        };
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        fields.insert(label, value);
    }

    tracing::debug!(
        sheet = sheet.name(),
        fields = fields.len(),
        "source fields read"
    );
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySheet;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_reads_label_value_pairs() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Constants");
        sheet.set("C1", "Client Name").unwrap();
        sheet.set("D1", "Acme Corp").unwrap();
        sheet.set("C2", "Project Duration").unwrap();
        sheet.set("D2", 12.0).unwrap();
        // value without a label, and a label without a value
        sheet.set("D3", "orphan").unwrap();
        sheet.set("C4", "Region").unwrap();

        let fields = read_source_fields(&sheet, &config);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("Client Name"), Some("Acme Corp"));
        assert_eq!(fields.get("Project Duration"), Some("12"));
        assert_eq!(fields.get("Region"), None);
    }

    #[test]
    fn test_repeated_label_takes_later_value() {
        let config = ReconcileConfig::default();
        let mut sheet = MemorySheet::new("Constants");
        sheet.set("C1", "Margin").unwrap();
        sheet.set("D1", "40%").unwrap();
        sheet.set("C5", "Margin").unwrap();
        sheet.set("D5", "45%").unwrap();

        let fields = read_source_fields(&sheet, &config);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("Margin"), Some("45%"));
    }

    #[test]
    fn test_scan_bounded_by_limit() {
        let config = ReconcileConfig {
            row_scan_limit: 10,
            ..ReconcileConfig::default()
        };
        let mut sheet = MemorySheet::new("Constants");
        sheet.set("C5", "Inside").unwrap();
        sheet.set("D5", "yes").unwrap();
        sheet.set("C50", "Outside").unwrap();
        sheet.set("D50", "no").unwrap();

        let fields = read_source_fields(&sheet, &config);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("Inside"), Some("yes"));
    }
}
