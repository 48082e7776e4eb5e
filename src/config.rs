//! Sizing parameters for a `TokenCounter`.

use crate::error::ConfigError;

/// Default initial table size, as a power of two.
pub const DEFAULT_INITIAL_SIZE_BITS: u32 = 21;
/// Default exclusive ceiling on table size bits.
pub const DEFAULT_SIZE_BITS_LIMIT: u32 = 22;
/// Default number of extra probes after the first candidate slot.
pub const DEFAULT_PROBE_LIMIT: u32 = 10;

/// Counter sizing.
///
/// `size_bits_limit` is exclusive: a table never reaches `2^size_bits_limit`
/// slots. With the defaults the table stays at `2^21` slots and the first
/// growth attempt fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterConfig {
    /// Starting table size is `2^initial_size_bits` slots.
    pub initial_size_bits: u32,
    /// Growth that would reach this many size bits is fatal.
    pub size_bits_limit: u32,
    /// Highest probe attempt index; each key gets `probe_limit + 1` candidates.
    pub probe_limit: u32,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            initial_size_bits: DEFAULT_INITIAL_SIZE_BITS,
            size_bits_limit: DEFAULT_SIZE_BITS_LIMIT,
            probe_limit: DEFAULT_PROBE_LIMIT,
        }
    }
}

impl CounterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_size_bits < 1 {
            return Err(ConfigError::InitialBitsTooSmall(self.initial_size_bits));
        }
        if self.size_bits_limit <= self.initial_size_bits {
            return Err(ConfigError::LimitNotAboveInitial {
                initial: self.initial_size_bits,
                limit: self.size_bits_limit,
            });
        }
        if self.size_bits_limit > usize::BITS {
            return Err(ConfigError::LimitTooLarge {
                limit: self.size_bits_limit,
                max: usize::BITS,
            });
        }
        Ok(())
    }

    /// Upper bound on growth steps a counter with this config can take.
    pub fn max_growths(&self) -> u32 {
        self.size_bits_limit
            .saturating_sub(self.initial_size_bits)
            .saturating_sub(1)
    }
}
