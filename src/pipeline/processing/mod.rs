//! Pure transformation core: column location, value coercion, name
//! canonicalization and cross-source resolution. Nothing in here performs
//! I/O or returns an error; malformed input degrades to defaults.

pub mod canonical;
pub mod coerce;
pub mod columns;
pub mod records;
pub mod resolve;

pub use canonical::NameExtraction;
pub use columns::{FieldIndexMap, FieldRule, StatField};
pub use records::{ScoringBatch, StandingsBatch};
pub use resolve::{NameDirectory, Resolution};
