//! Physical line splitting for CSV import.
//!
//! # Invariants
//! - A line ends at `\n`, `\r\n` or a lone `\r`; the terminator is dropped.
//! - A final line without terminator is still yielded; an empty input yields nothing.
//! - Each line must be valid UTF-8, otherwise reading stops with `InvalidData`.

use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Iterator over the physical lines of a buffered reader.
pub struct PhysicalLines<R> {
    reader: R,
    pending: VecDeque<String>,
    done: bool,
}

impl<R: BufRead> PhysicalLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
            done: false,
        }
    }

    fn fill(&mut self) -> io::Result<()> {
        let mut chunk = Vec::new();
        if self.reader.read_until(b'\n', &mut chunk)? == 0 {
            self.done = true;
            return Ok(());
        }

        if chunk.last() == Some(&b'\n') {
            chunk.pop();
        }
        // `\r\n` and a `\r` closing the input both end the last line here.
        if chunk.last() == Some(&b'\r') {
            chunk.pop();
        }

        let text = String::from_utf8(chunk)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.pending.extend(text.split('\r').map(str::to_string));
        Ok(())
    }
}

impl<R: BufRead> Iterator for PhysicalLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pending.is_empty() && !self.done {
            if let Err(err) = self.fill() {
                self.done = true;
                return Some(Err(err));
            }
        }
        self.pending.pop_front().map(Ok)
    }
}
