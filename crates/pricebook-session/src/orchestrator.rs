//! Session orchestration: one open/operate/save/close cycle per document.
//!
//! The orchestrator runs up to three operations against a target document:
//! field population, resource block copy, and rate derivation. With a
//! backend that can serve several operations from one handle, all of them
//! run inside a single consolidated session; otherwise each operation gets
//! its own open/close cycle. An operation failing is soft: it is recorded
//! on the result and the remaining operations still run.

use std::path::PathBuf;
use std::time::Instant;

use pricebook_core::{
    Category, Error, FieldMap, ReconcileConfig, Reporting, Result, SessionResult,
};
use pricebook_match::reconcile_sheet;

use crate::backend::{DocumentBackend, DocumentHandle};
use crate::block_copy::copy_block;
use crate::populate::populate;
use crate::rates::{derive_rates, read_standard_rates, write_derived_rates};

/// How the orchestrator maps operations onto document sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStrategy {
    /// One handle held open across every operation, one save at the end.
    Consolidated,
    /// A fresh open/close cycle per operation.
    Independent,
}

/// Everything one session needs: the documents, the data, and which
/// operations to run.
#[derive(Debug, Clone)]
pub struct SessionRequest {
    /// Document to populate and save.
    pub target: PathBuf,
    /// Reference document holding the resource block to copy, when block
    /// copy is requested.
    pub reference: Option<PathBuf>,
    pub fields: FieldMap,
    /// Margin fraction for rate derivation.
    pub margin: f64,
    pub copy_resource_block: bool,
    pub calculate_rates: bool,
}

impl SessionRequest {
    pub fn new(target: impl Into<PathBuf>, fields: FieldMap) -> Self {
        Self {
            target: target.into(),
            reference: None,
            fields,
            margin: 0.0,
            copy_resource_block: false,
            calculate_rates: false,
        }
    }

    pub fn with_block_copy(mut self, reference: impl Into<PathBuf>) -> Self {
        self.reference = Some(reference.into());
        self.copy_resource_block = true;
        self
    }

    pub fn with_rates(mut self, margin: f64) -> Self {
        self.margin = margin;
        self.calculate_rates = true;
        self
    }

    fn total_operations(&self) -> u32 {
        1 + self.copy_resource_block as u32 + self.calculate_rates as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Unopened,
    Open,
    Closing,
    Closed,
}

/// Runs sessions against a document backend.
pub struct Orchestrator<B: DocumentBackend> {
    backend: B,
    config: ReconcileConfig,
    reporting: Reporting,
}

impl<B: DocumentBackend> Orchestrator<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: ReconcileConfig::default(),
            reporting: Reporting::default(),
        }
    }

    pub fn with_config(mut self, config: ReconcileConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_reporting(mut self, reporting: Reporting) -> Self {
        self.reporting = reporting;
        self
    }

    /// The strategy this orchestrator will start with.
    pub fn strategy(&self) -> SessionStrategy {
        if self.backend.supports_shared_handle() {
            SessionStrategy::Consolidated
        } else {
            SessionStrategy::Independent
        }
    }

    /// Run one session and return its consolidated result.
    ///
    /// The session succeeds overall when at least one operation completed;
    /// individual failures are collected in `result.errors`. A consolidated
    /// session that cannot even open the target falls back to the
    /// independent strategy once.
    pub fn run(&self, request: &SessionRequest) -> SessionResult {
        let started = Instant::now();
        let mut result = SessionResult {
            total_operations: request.total_operations(),
            ..SessionResult::default()
        };

        if self.reporting.enabled(Category::Session) {
            tracing::info!(
                target = %request.target.display(),
                operations = result.total_operations,
                strategy = ?self.strategy(),
                "session starting"
            );
        }

        match self.strategy() {
            SessionStrategy::Consolidated => {
                if !self.run_consolidated(request, &mut result) {
                    tracing::warn!("consolidated session could not open target, retrying independently");
                    self.run_independent(request, &mut result);
                }
            }
            SessionStrategy::Independent => self.run_independent(request, &mut result),
        }

        result.overall_success = result.operations_completed > 0;
        result.elapsed_seconds = started.elapsed().as_secs_f64();

        if self.reporting.enabled(Category::Session) {
            tracing::info!(
                completed = result.operations_completed,
                total = result.total_operations,
                success = result.overall_success,
                "session finished"
            );
        }
        result
    }

    /// One handle for everything. Returns false when the target could not
    /// be opened at all, so the caller can fall back.
    fn run_consolidated(&self, request: &SessionRequest, result: &mut SessionResult) -> bool {
        let mut state = SessionState::Unopened;
        tracing::debug!(state = ?state, "session state");

        let mut handle = match self.backend.open(&request.target) {
            Ok(h) => h,
            Err(e) => {
                result.errors.push(format!("Failed to open target: {e}"));
                return false;
            }
        };
        state = SessionState::Open;
        tracing::debug!(state = ?state, "session state");

        let mut writes_attempted = false;

        match self.populate_fields(handle.as_mut(), request) {
            Ok(outcome) => {
                writes_attempted |= outcome.attempted > 0;
                if outcome.succeeded > 0 {
                    result.operations_completed += 1;
                }
                result.population = Some(outcome);
            }
            Err(e) => result.errors.push(format!("Population failed: {e}")),
        }

        if request.copy_resource_block {
            match self.copy_resource_block(handle.as_mut(), request) {
                Ok(outcome) => {
                    writes_attempted |= outcome.cells_copied > 0;
                    if outcome.success {
                        result.operations_completed += 1;
                    } else if let Some(reason) = &outcome.reason {
                        result.errors.push(format!("Block copy failed: {reason}"));
                    }
                    result.block_copy = Some(outcome);
                }
                Err(e) => result.errors.push(format!("Block copy failed: {e}")),
            }
        }

        if request.calculate_rates {
            match self.calculate_rates(handle.as_mut(), request) {
                Ok(outcome) => {
                    writes_attempted |= outcome.written > 0 || !outcome.errors.is_empty();
                    if outcome.success {
                        result.operations_completed += 1;
                    } else {
                        result.errors.push("Rate calculation wrote no rates".to_string());
                    }
                    result.rate_calc = Some(outcome);
                }
                Err(e) => result.errors.push(format!("Rate calculation failed: {e}")),
            }
        }

        state = SessionState::Closing;
        tracing::debug!(state = ?state, save = writes_attempted, "session state");
        if let Err(e) = handle.close(writes_attempted) {
            result.errors.push(format!("Failed to close target: {e}"));
        }
        state = SessionState::Closed;
        tracing::debug!(state = ?state, "session state");
        true
    }

    /// A fresh open/close cycle per operation. Open failures are soft here;
    /// the remaining operations still get their own attempt.
    fn run_independent(&self, request: &SessionRequest, result: &mut SessionResult) {
        match self.backend.open(&request.target) {
            Ok(mut handle) => {
                match self.populate_fields(handle.as_mut(), request) {
                    Ok(outcome) => {
                        let save = outcome.attempted > 0;
                        if outcome.succeeded > 0 {
                            result.operations_completed += 1;
                        }
                        result.population = Some(outcome);
                        if let Err(e) = handle.close(save) {
                            result.errors.push(format!("Failed to close target: {e}"));
                        }
                    }
                    Err(e) => {
                        result.errors.push(format!("Population failed: {e}"));
                        let _ = handle.close(false);
                    }
                }
            }
            Err(e) => result.errors.push(format!("Failed to open target: {e}")),
        }

        if request.copy_resource_block {
            match self.backend.open(&request.target) {
                Ok(mut handle) => {
                    match self.copy_resource_block(handle.as_mut(), request) {
                        Ok(outcome) => {
                            let save = outcome.cells_copied > 0;
                            if outcome.success {
                                result.operations_completed += 1;
                            } else if let Some(reason) = &outcome.reason {
                                result.errors.push(format!("Block copy failed: {reason}"));
                            }
                            result.block_copy = Some(outcome);
                            if let Err(e) = handle.close(save) {
                                result.errors.push(format!("Failed to close target: {e}"));
                            }
                        }
                        Err(e) => {
                            result.errors.push(format!("Block copy failed: {e}"));
                            let _ = handle.close(false);
                        }
                    }
                }
                Err(e) => result.errors.push(format!("Failed to open target: {e}")),
            }
        }

        if request.calculate_rates {
            match self.backend.open(&request.target) {
                Ok(mut handle) => {
                    match self.calculate_rates(handle.as_mut(), request) {
                        Ok(outcome) => {
                            let save = outcome.written > 0;
                            if outcome.success {
                                result.operations_completed += 1;
                            } else {
                                result.errors.push("Rate calculation wrote no rates".to_string());
                            }
                            result.rate_calc = Some(outcome);
                            if let Err(e) = handle.close(save) {
                                result.errors.push(format!("Failed to close target: {e}"));
                            }
                        }
                        Err(e) => {
                            result.errors.push(format!("Rate calculation failed: {e}"));
                            let _ = handle.close(false);
                        }
                    }
                }
                Err(e) => result.errors.push(format!("Failed to open target: {e}")),
            }
        }
    }

    fn populate_fields(
        &self,
        handle: &mut dyn DocumentHandle,
        request: &SessionRequest,
    ) -> Result<pricebook_core::PopulationOutcome> {
        let name = resolve_sheet_name(&handle.sheet_names(), &self.config.field_sheet)
            .or_else(|| handle.sheet_names().first().cloned())
            .ok_or_else(|| Error::SheetNotFound(self.config.field_sheet.clone()))?;
        let sheet = handle.sheet(&name)?;

        let matches = reconcile_sheet(&*sheet, &request.fields, &self.config);
        if self.reporting.enabled(Category::Matching) {
            tracing::info!(sheet = %name, matched = matches.len(), "fields matched");
        }
        let outcome = populate(sheet, &matches, &self.config);
        if self.reporting.enabled(Category::Writes) {
            tracing::info!(
                succeeded = outcome.succeeded,
                failed = outcome.failed,
                "fields populated"
            );
        }
        Ok(outcome)
    }

    fn copy_resource_block(
        &self,
        handle: &mut dyn DocumentHandle,
        request: &SessionRequest,
    ) -> Result<pricebook_core::BlockCopyOutcome> {
        let reference = request.reference.as_deref().ok_or_else(|| {
            Error::DocumentAccess("block copy requested without a reference document".to_string())
        })?;

        let target_name = resolve_sheet_name(&handle.sheet_names(), &self.config.resource_sheet)
            .ok_or_else(|| Error::SheetNotFound(self.config.resource_sheet.clone()))?;

        // The reference is read through its own handle and never saved.
        let mut source_handle = self.backend.open(reference)?;
        let source_name =
            match resolve_sheet_name(&source_handle.sheet_names(), &self.config.resource_sheet) {
                Some(n) => n,
                None => {
                    let _ = source_handle.close(false);
                    return Err(Error::SheetNotFound(self.config.resource_sheet.clone()));
                }
            };

        let outcome = {
            let source = match source_handle.sheet(&source_name) {
                Ok(s) => s,
                Err(e) => {
                    let _ = source_handle.close(false);
                    return Err(e);
                }
            };
            copy_block(&*source, handle.sheet(&target_name)?, self.config.resource_row_count)
        };
        source_handle.close(false)?;
        Ok(outcome)
    }

    fn calculate_rates(
        &self,
        handle: &mut dyn DocumentHandle,
        request: &SessionRequest,
    ) -> Result<pricebook_core::RateOutcome> {
        let name = resolve_sheet_name(&handle.sheet_names(), &self.config.resource_sheet)
            .ok_or_else(|| Error::SheetNotFound(self.config.resource_sheet.clone()))?;
        let sheet = handle.sheet(&name)?;

        let standard = read_standard_rates(&*sheet, &self.config);
        let derived = derive_rates(&standard, request.margin);
        Ok(write_derived_rates(sheet, &derived, &self.config))
    }
}

/// Case-insensitive substring match over sheet names.
fn resolve_sheet_name(names: &[String], pattern: &str) -> Option<String> {
    let pattern = pattern.to_lowercase();
    names
        .iter()
        .find(|n| n.to_lowercase().contains(&pattern))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_resolve_sheet_name() {
        let names = vec![
            "Summary".to_string(),
            "Client Pricing Setup".to_string(),
            "Resource Setup".to_string(),
        ];
        assert_eq!(
            resolve_sheet_name(&names, "pricing setup"),
            Some("Client Pricing Setup".to_string())
        );
        assert_eq!(resolve_sheet_name(&names, "Missing"), None);
    }

    #[test]
    fn test_request_operation_count() {
        let base = SessionRequest::new("deal.xlsx", FieldMap::new());
        assert_eq!(base.total_operations(), 1);
        let full = SessionRequest::new("deal.xlsx", FieldMap::new())
            .with_block_copy("reference.xlsx")
            .with_rates(0.45);
        assert_eq!(full.total_operations(), 3);
    }
}
