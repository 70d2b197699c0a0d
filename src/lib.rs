//! # Tally
//!
//! A word-frequency aggregation engine that produces the same logical
//! result under three execution disciplines: a single sequential pass, one
//! worker process per input with results merged over a byte-stream
//! protocol, and worker threads sharing one lock-guarded store.
//!
//! ## Modules
//!
//! - `store` - aggregate stores keyed by word text (plain and lock-guarded)
//! - `tokenize` - character-classification word splitter
//! - `sort` - stable sort stage with the canonical count-descending order
//! - `protocol` - line-oriented merge encoding between workers and coordinator
//! - `subprocess` - process-runner abstraction used by the fork driver
//! - `driver` - the three orchestration strategies plus the fork worker
//! - `error` - crate error type

pub mod driver;
pub mod error;
pub mod protocol;
pub mod sort;
pub mod store;
pub mod subprocess;
pub mod tokenize;

pub use error::{Result, TallyError};
pub use store::{SharedWordStore, WordRecord, WordStore};
