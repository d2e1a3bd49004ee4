//! Document sessions and write operations for pricebook workbooks.
//!
//! This crate owns everything that touches an open document: the backend
//! seam ([`DocumentBackend`]/[`DocumentHandle`]), the in-memory backend
//! used by tests and dry runs, the three write operations (population,
//! block copy, rate derivation), and the [`Orchestrator`] that runs them
//! as one session.

pub mod backend;
pub mod block_copy;
pub mod constants_reader;
pub mod memory;
pub mod orchestrator;
pub mod populate;
pub mod rates;

pub use backend::{DocumentBackend, DocumentHandle};
pub use block_copy::{copy_block, find_source_block, find_target_area, BlockRange};
pub use constants_reader::read_source_fields;
pub use memory::{MemoryBackend, MemoryDocument, MemorySheet};
pub use orchestrator::{Orchestrator, SessionRequest, SessionStrategy};
pub use populate::{populate, resolve_write_target};
pub use rates::{derive_rate, derive_rates, read_standard_rates, write_derived_rates};
