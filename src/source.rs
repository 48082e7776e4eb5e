//! Line source: one token per input line, terminator stripped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Lazily yields each line of `R` as raw bytes without its `\n` (or `\r\n`)
/// terminator. Bytes are not decoded, so any encoding passes through
/// unchanged. No other trimming is done; blank lines yield an empty token.
pub struct LineSource<R> {
    reader: R,
}

impl LineSource<BufReader<File>> {
    pub fn open(path: &Path) -> io::Result<Self> {
        Ok(Self::new(BufReader::new(File::open(path)?)))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = io::Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut line = Vec::new();
        match self.reader.read_until(b'\n', &mut line) {
            Ok(0) => None,
            Ok(_) => {
                if line.last() == Some(&b'\n') {
                    line.pop();
                    if line.last() == Some(&b'\r') {
                        line.pop();
                    }
                }
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
