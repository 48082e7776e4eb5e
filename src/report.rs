//! Output: one `"<key> <count>"` line per counted token.

use std::io::{self, Write};

/// Write every `(key, count)` pair in the order given.
///
/// Keys are written back byte for byte, exactly as they were read.
pub fn write_counts<'a, W, I>(out: &mut W, entries: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = (&'a [u8], u64)>,
{
    for (key, count) in entries {
        out.write_all(key)?;
        writeln!(out, " {count}")?;
    }
    out.flush()
}
