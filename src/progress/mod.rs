//! Persisted study progress.
//!
//! Progress is a small JSON document: the set of question ids ever displayed,
//! the set of starred ids, and a map of per-session resume indices. It is
//! loaded once at startup and written back after every mutation, with no
//! batching, so another instance of the application (the "other tab" of the
//! original browser tool) always sees a complete state on disk.

pub mod data;
pub mod store;

pub use data::ProgressState;
pub use store::{LoadOutcome, ProgressStore};
