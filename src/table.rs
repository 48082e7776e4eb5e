//! Table: fixed-capacity open-addressing storage with bounded double-hash probing.

use crate::digest::digest;
use crate::probe::ProbeSequence;

/// A counted token held by exactly one slot. Keys are raw bytes; they need
/// not be valid UTF-8.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub key: Vec<u8>,
    pub count: u64,
}

impl Entry {
    fn new(key: &[u8]) -> Self {
        Self {
            key: key.to_vec(),
            count: 1,
        }
    }
}

/// Outcome of [`Table::upsert`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Upsert {
    /// The key was absent and now occupies a slot with count 1.
    Inserted,
    /// The key was present and its count went up by one.
    Incremented,
    /// Every candidate slot holds a different key; nothing was changed.
    ProbeExhausted,
}

pub struct Table {
    slots: Vec<Option<Entry>>,
    size_bits: u32,
    probe_limit: u32,
    len: usize,
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("size_bits", &self.size_bits)
            .field("probe_limit", &self.probe_limit)
            .field("len", &self.len)
            .finish_non_exhaustive()
    }
}

/// Iterator over occupied slots in storage order.
///
/// The order follows the hash layout and insertion history. It is neither
/// insertion order nor sorted, and it changes whenever the table grows.
pub struct Entries<'a> {
    it: core::slice::Iter<'a, Option<Entry>>,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a [u8], u64);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .by_ref()
            .flatten()
            .next()
            .map(|e| (e.key.as_slice(), e.count))
    }
}

impl Table {
    /// Allocate an empty table of `2^size_bits` slots.
    ///
    /// # Panics
    /// Panics unless `1 <= size_bits < usize::BITS`. `CounterConfig::validate`
    /// enforces this range for counters.
    pub fn new(size_bits: u32, probe_limit: u32) -> Self {
        assert!(
            (1..usize::BITS).contains(&size_bits),
            "size_bits must be in 1..{}",
            usize::BITS
        );
        let capacity = 1usize << size_bits;
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            size_bits,
            probe_limit,
            len: 0,
        }
    }

    pub fn size_bits(&self) -> u32 {
        self.size_bits
    }
    pub fn probe_limit(&self) -> u32 {
        self.probe_limit
    }
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn probes(&self, key: &[u8]) -> ProbeSequence {
        ProbeSequence::new(digest(key, self.size_bits), self.size_bits, self.probe_limit)
    }

    /// Insert `key` with count 1, or bump its count if already present.
    pub fn upsert(&mut self, key: &[u8]) -> Upsert {
        for idx in self.probes(key) {
            match self.slots[idx] {
                None => {
                    self.slots[idx] = Some(Entry::new(key));
                    self.len += 1;
                    return Upsert::Inserted;
                }
                Some(ref mut e) if e.key == key => {
                    e.count += 1;
                    return Upsert::Incremented;
                }
                Some(_) => {}
            }
        }
        Upsert::ProbeExhausted
    }

    /// Count for `key`, if present.
    pub fn get(&self, key: &[u8]) -> Option<u64> {
        for idx in self.probes(key) {
            match &self.slots[idx] {
                None => return None,
                Some(e) if e.key == key => return Some(e.count),
                Some(_) => {}
            }
        }
        None
    }

    pub fn entries(&self) -> Entries<'_> {
        Entries {
            it: self.slots.iter(),
        }
    }

    #[cfg(test)]
    pub(crate) fn key_at(&self, idx: usize) -> Option<&[u8]> {
        self.slots[idx].as_ref().map(|e| e.key.as_slice())
    }

    /// Move an existing entry into its first free candidate slot.
    /// Gives the entry back when every candidate is taken.
    fn place(&mut self, entry: Entry) -> Result<usize, Entry> {
        // Keys are distinct across a table, so only empty slots matter here.
        let found = self.probes(&entry.key).find(|&idx| self.slots[idx].is_none());
        match found {
            Some(idx) => {
                self.slots[idx] = Some(entry);
                self.len += 1;
                Ok(idx)
            }
            None => Err(entry),
        }
    }

    /// Build a table of `2^size_bits` slots and move every entry into it,
    /// re-digesting each key for the new size.
    ///
    /// Returns `None` if some entry exhausts its probes in the new table. In
    /// that case every moved entry is returned to its original slot, so
    /// `self` is left exactly as it was.
    ///
    /// # Panics
    /// Panics under the same `size_bits` range as [`Table::new`].
    pub fn rehash(&mut self, size_bits: u32) -> Option<Table> {
        let mut next = Table::new(size_bits, self.probe_limit);
        let mut moved: Vec<(usize, usize)> = Vec::with_capacity(self.len);

        for from in 0..self.slots.len() {
            let Some(entry) = self.slots[from].take() else {
                continue;
            };
            match next.place(entry) {
                Ok(to) => moved.push((from, to)),
                Err(entry) => {
                    self.slots[from] = Some(entry);
                    for (from, to) in moved {
                        self.slots[from] = next.slots[to].take();
                    }
                    return None;
                }
            }
        }

        self.len = 0;
        Some(next)
    }
}
