//! # pricebook-match
//!
//! Fuzzy label matching: locate, for each named source field, the best
//! corresponding cell in a semi-structured sheet whose label text varies in
//! punctuation, numbering prefixes, and row position across document
//! versions.
//!
//! The pipeline is scan → normalize → score → select:
//!
//! ```rust,ignore
//! use pricebook_match::reconcile_sheet;
//!
//! let matches = reconcile_sheet(&sheet, &fields, &config);
//! ```
//!
//! Everything here is deterministic and side-effect-free; writes happen in
//! `pricebook-session`.

pub mod matcher;
pub mod normalize;
pub mod scan;
pub mod similarity;

pub use matcher::{match_fields, reconcile_sheet};
pub use normalize::normalize_label;
pub use scan::{is_potential_label, scan_candidates, scan_generic, scan_optimized};
pub use similarity::similarity;
