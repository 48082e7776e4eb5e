//! Driver: feed every line of an input into a `TokenCounter`, then report.

use crate::config::CounterConfig;
use crate::counter::TokenCounter;
use crate::error::CountError;
use crate::report::write_counts;
use crate::source::LineSource;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Count the lines of the file at `path`.
pub fn count_file(path: &Path, config: CounterConfig) -> Result<TokenCounter, CountError> {
    config.validate()?;
    let source = LineSource::open(path).map_err(|source| CountError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    count_lines(source, path, config)
}

/// Count every line of `source`. `origin` only labels read errors.
pub fn count_lines<R: BufRead>(
    source: LineSource<R>,
    origin: &Path,
    config: CounterConfig,
) -> Result<TokenCounter, CountError> {
    let mut counter = TokenCounter::with_config(config)?;
    for line in source {
        let token = line.map_err(|source| CountError::Read {
            path: origin.to_path_buf(),
            source,
        })?;
        counter.record(&token)?;
    }
    Ok(counter)
}

/// Count `path` and write the tally to `out`.
///
/// Nothing is written unless every line was counted.
pub fn run<W: Write>(path: &Path, config: CounterConfig, out: W) -> Result<(), CountError> {
    let counter = count_file(path, config)?;
    info!(
        distinct = counter.len(),
        total = counter.total(),
        size_bits = counter.size_bits(),
        growths = counter.growths(),
        "counted {}",
        path.display()
    );
    let mut out = BufWriter::new(out);
    write_counts(&mut out, counter.entries()).map_err(CountError::Write)
}
