//! TokenCounter: owns the live `Table` and grows it when probing runs out.

use crate::config::CounterConfig;
use crate::error::{ConfigError, GrowthError};
use crate::table::{Entries, Table, Upsert};
use tracing::{debug, warn};

/// Successful outcome of [`TokenCounter::record`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Recorded {
    Inserted,
    Incremented,
}

#[derive(Debug)]
pub struct TokenCounter {
    table: Table,
    size_bits_limit: u32,
    growths: u32,
    total: u64,
}

impl TokenCounter {
    /// Counter with the default sizing (`2^21` slots, limit 22, 10 probes).
    pub fn new() -> Self {
        let config = CounterConfig::default();
        Self {
            table: Table::new(config.initial_size_bits, config.probe_limit),
            size_bits_limit: config.size_bits_limit,
            growths: 0,
            total: 0,
        }
    }

    pub fn with_config(config: CounterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            table: Table::new(config.initial_size_bits, config.probe_limit),
            size_bits_limit: config.size_bits_limit,
            growths: 0,
            total: 0,
        })
    }

    /// Count one occurrence of `key`, growing the table as needed.
    ///
    /// Keys are raw bytes, so `&str`, `String`, `&[u8]` and `Vec<u8>` all
    /// work. On error the counter still holds exactly the counts recorded
    /// before this call; `key` itself was not counted.
    pub fn record<K>(&mut self, key: &K) -> Result<Recorded, GrowthError>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        let key = key.as_ref();
        // One upsert per table size still reachable; each failed upsert
        // grows by at least one size bit.
        let sizes_left = self.size_bits_limit - self.table.size_bits();
        for _ in 0..sizes_left {
            match self.table.upsert(key) {
                Upsert::Inserted => {
                    self.total += 1;
                    return Ok(Recorded::Inserted);
                }
                Upsert::Incremented => {
                    self.total += 1;
                    return Ok(Recorded::Incremented);
                }
                Upsert::ProbeExhausted => self.grow()?,
            }
        }
        Err(GrowthError::TableTooLarge {
            size_bits: self.size_bits_limit,
        })
    }

    /// Replace the table with the smallest larger one that accepts every
    /// live entry.
    fn grow(&mut self) -> Result<(), GrowthError> {
        let from = self.table.size_bits();
        for bits in (from + 1)..self.size_bits_limit {
            match self.table.rehash(bits) {
                Some(next) => {
                    debug!(from, to = bits, entries = next.len(), "grew token table");
                    self.table = next;
                    self.growths += 1;
                    return Ok(());
                }
                None => warn!(from, to = bits, "rehash exhausted probes, trying a larger table"),
            }
        }
        Err(GrowthError::TableTooLarge {
            size_bits: self.size_bits_limit,
        })
    }

    /// Count for `key`, if it has been recorded.
    pub fn get<K>(&self, key: &K) -> Option<u64>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.table.get(key.as_ref())
    }

    /// `(key, count)` pairs in table storage order.
    ///
    /// The order is not insertion order and is not sorted. It depends on the
    /// hash layout and changes whenever the table grows.
    pub fn entries(&self) -> Entries<'_> {
        self.table.entries()
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.table.len()
    }
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn size_bits(&self) -> u32 {
        self.table.size_bits()
    }
    pub fn size_bits_limit(&self) -> u32 {
        self.size_bits_limit
    }
    pub fn probe_limit(&self) -> u32 {
        self.table.probe_limit()
    }
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
    /// Number of successful growth steps so far.
    pub fn growths(&self) -> u32 {
        self.growths
    }
}

impl Default for TokenCounter {
    fn default() -> Self {
        Self::new()
    }
}
