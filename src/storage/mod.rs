//!  Storage is organized through [data_store::JsonDataStore].
//!  The basic idea is:
//!   - All metrics live in a single JSON file, keyed by metric name.
//!   - Every metric is an object keyed by day (`YYYY-MM-DD`), holding the value of that day.
//!   - The file is read fully on start and replaced atomically on save.

pub mod data_store;
pub mod entities;
pub mod registry;
