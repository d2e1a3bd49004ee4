//! Rate derivation: standard cost rates → client-billable rates
//!
//! Rates are read from a fixed-width vertical run of rows. Invalid entries
//! are kept in the list (not dropped) so the row alignment with the output
//! column is preserved through derivation and writing.

use pricebook_core::{
    CellRef, CellValue, DerivedRate, Error, RateOutcome, ReconcileConfig, Result, SheetRead,
    SheetWrite, StandardCostRate,
};

/// Derive a billable rate from a cost and a margin fraction.
///
/// `cost` must be positive and finite; `margin` must satisfy
/// `0 <= margin < 1`. A margin of 1 or more is a domain error, not
/// something to clamp. The result is rounded to the nearest whole unit.
///
/// # Examples
/// ```
/// use pricebook_session::derive_rate;
///
/// assert_eq!(derive_rate(100.0, 0.45).unwrap(), 182);
/// assert_eq!(derive_rate(120.0, 0.50).unwrap(), 240);
/// assert!(derive_rate(100.0, 1.0).is_err());
/// ```
pub fn derive_rate(cost: f64, margin: f64) -> Result<i64> {
    if !cost.is_finite() || cost <= 0.0 {
        return Err(Error::RateDomain(format!(
            "cost must be a positive number, got {cost}"
        )));
    }
    if !margin.is_finite() || !(0.0..1.0).contains(&margin) {
        return Err(Error::RateDomain(format!(
            "margin must be in [0, 1), got {margin}"
        )));
    }
    Ok((cost / (1.0 - margin)).round() as i64)
}

/// Read the standard cost rate block from the configured column.
///
/// Always returns exactly `resource_row_count` entries; rows that are
/// empty, non-numeric, or non-positive come back invalid with a reason.
pub fn read_standard_rates<S: SheetRead + ?Sized>(
    sheet: &S,
    config: &ReconcileConfig,
) -> Vec<StandardCostRate> {
    let mut rates = Vec::with_capacity(config.resource_row_count as usize);

    for i in 0..config.resource_row_count {
        let row = config.rate_start_row + i;
        let level = format!("Level {}", i + 1);
        let cell = CellRef::new(row, config.standard_rate_column);

        let rate = match sheet.read_cell(cell) {
            Ok(CellValue::Empty) => StandardCostRate::invalid(level, row, "Empty cell"),
            Ok(value) => match value.as_number() {
                Some(cost) if cost > 0.0 => StandardCostRate::valid(level, cost, row),
                Some(cost) => StandardCostRate::invalid(
                    level,
                    row,
                    format!("Invalid rate: {cost} (must be positive)"),
                ),
                None => StandardCostRate::invalid(
                    level,
                    row,
                    format!("Non-numeric value: {}", value.to_display_string()),
                ),
            },
            Err(e) => StandardCostRate::invalid(level, row, format!("Read failed: {e}")),
        };
        rates.push(rate);
    }

    tracing::debug!(
        valid = rates.iter().filter(|r| r.valid).count(),
        total = rates.len(),
        "standard cost rates read"
    );
    rates
}

/// Derive a rate for every entry, carrying invalid entries through as
/// skipped so row alignment is preserved.
pub fn derive_rates(standard: &[StandardCostRate], margin: f64) -> Vec<DerivedRate> {
    standard
        .iter()
        .map(|rate| {
            let base = DerivedRate {
                level: rate.level.clone(),
                cost: rate.cost,
                row: rate.row,
                valid: false,
                error: rate.error.clone(),
                margin,
                derived: None,
            };
            match rate.cost {
                Some(cost) if rate.valid => match derive_rate(cost, margin) {
                    Ok(derived) => DerivedRate {
                        valid: true,
                        error: None,
                        derived: Some(derived),
                        ..base
                    },
                    Err(e) => DerivedRate {
                        error: Some(e.to_string()),
                        ..base
                    },
                },
                _ => base,
            }
        })
        .collect()
}

/// Write derived rates to the configured output column as whole-currency
/// strings. Invalid entries leave their cell untouched.
pub fn write_derived_rates<W: SheetWrite + ?Sized>(
    sheet: &mut W,
    derived: &[DerivedRate],
    config: &ReconcileConfig,
) -> RateOutcome {
    let mut outcome = RateOutcome {
        rates_read: derived.len() as u32,
        derived: derived.iter().filter(|r| r.valid).count() as u32,
        ..RateOutcome::default()
    };

    for (i, rate) in derived.iter().enumerate() {
        let row = rate.row.unwrap_or(config.rate_start_row + i as u32);
        let cell = CellRef::new(row, config.derived_rate_column);

        match rate.derived {
            Some(value) if rate.valid => {
                match sheet.write_cell(cell, CellValue::Text(format!("${value}"))) {
                    Ok(()) => outcome.written += 1,
                    Err(e) => outcome
                        .errors
                        .push(format!("Failed to write {} at {cell}: {e}", rate.level)),
                }
            }
            _ => {
                outcome.skipped += 1;
                tracing::debug!(
                    level = %rate.level,
                    reason = rate.error.as_deref().unwrap_or("invalid"),
                    "skipped rate row"
                );
            }
        }
    }

    outcome.success = outcome.written > 0;
    tracing::info!(
        written = outcome.written,
        skipped = outcome.skipped,
        "derived rates written"
    );
    outcome
}
