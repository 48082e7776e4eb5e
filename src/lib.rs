//! token-counter: counts lines of text in an open-addressing hash table
//! that uses double hashing and grows when probing runs out.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: an in-memory multiset of string keys with a hard bound on the
//!   work done per insertion.
//! - Layers:
//!   - `digest`: size-dependent rolling multiplicative hash of a key.
//!   - `probe`: double-hashing slot sequence derived from a digest; at most
//!     `probe_limit + 1` candidates per key.
//!   - `Table`: `2^size_bits` slots of `Option<Entry>`; `upsert` inserts,
//!     increments, or reports `ProbeExhausted` without touching any slot.
//!   - `TokenCounter`: owns the live `Table`; on exhaustion it moves every
//!     entry into a larger table and retries, failing once the next size
//!     would reach `size_bits_limit`.
//!   - `app`: reads lines from a file, records each one, writes the tally.
//!
//! Constraints
//! - Single-threaded; the counter is owned by one control flow.
//! - Capacity is always a power of two and never shrinks.
//! - Keys in a table are pairwise distinct; each entry owns its key bytes.
//! - Keys are raw bytes; input lines are never decoded.
//! - The digest depends on the table size, so growth re-digests every key.
//!
//! Growth policy
//! - Growth is triggered by probe exhaustion, not by a load factor. A small
//!   probe budget bounds insertion cost; the table doubles only when some
//!   key actually fails to find room.
//! - If moving an entry into the doubled table also exhausts its probes, the
//!   old table is restored and the next size is tried. Sizes are tried in
//!   increasing order up to (not including) `size_bits_limit`.
//! - `GrowthError::TableTooLarge` is the only failure `record` can return.
//!   Callers are expected to abandon the run; counts recorded before the
//!   failing call remain intact.
//!
//! Notes and non-goals
//! - No deletion, hence no tombstones.
//! - Enumeration order is storage order: not insertion order, not sorted,
//!   and it changes across growth.
//! - No serialization of the table and no concurrent access.

pub mod app;
pub mod config;
mod counter;
pub mod digest;
pub mod error;
pub mod probe;
pub mod report;
pub mod source;
pub mod table;

#[cfg(test)]
mod counter_proptest;

// Public surface
pub use app::run;
pub use config::CounterConfig;
pub use counter::{Recorded, TokenCounter};
pub use error::{ConfigError, CountError, GrowthError};
pub use table::{Entry, Table, Upsert};
