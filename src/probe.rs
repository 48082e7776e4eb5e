//! ProbeSequence: double-hashing slot candidates derived from a digest.

/// Odd multiplier used for the secondary (probe) hash.
pub const MIX_B: u64 = 9_999_999_997_777_777_333;

#[inline]
fn mix_b(x: u64, size_bits: u32) -> u64 {
    debug_assert!((1..=64).contains(&size_bits));
    x.wrapping_mul(MIX_B) >> (64 - size_bits)
}

/// Slot index for probe `attempt` of `digest` in a table of `2^size_bits` slots.
#[inline]
pub fn probe(digest: u64, attempt: u32, size_bits: u32) -> usize {
    mix_b(digest.wrapping_add(u64::from(attempt)), size_bits) as usize
}

/// Iterator over the `probe_limit + 1` candidate slots of one digest,
/// in attempt order.
#[derive(Clone, Debug)]
pub struct ProbeSequence {
    digest: u64,
    size_bits: u32,
    attempt: u32,
    probe_limit: u32,
    done: bool,
}

impl ProbeSequence {
    pub fn new(digest: u64, size_bits: u32, probe_limit: u32) -> Self {
        Self {
            digest,
            size_bits,
            attempt: 0,
            probe_limit,
            done: false,
        }
    }
}

impl Iterator for ProbeSequence {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.done {
            return None;
        }
        let idx = probe(self.digest, self.attempt, self.size_bits);
        if self.attempt == self.probe_limit {
            self.done = true;
        } else {
            self.attempt += 1;
        }
        Some(idx)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.done {
            0
        } else {
            (self.probe_limit - self.attempt) as usize + 1
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for ProbeSequence {}
