//! Lazy line iteration over a single readable source.

use std::io::{self, BufRead, BufReader, Read};

/// Yields 1-based `(line_number, line_text)` pairs from any [`Read`].
///
/// Lines are delimited by `\n` (a trailing `\r` is stripped); a trailing
/// partial line with no terminator is still yielded if non-empty. A
/// malformed-UTF-8 chunk surfaces as `Err` and ends the iterator — callers
/// should treat the whole source as skipped rather than keep reading past it.
pub struct LineIter<R> {
    reader: BufReader<R>,
    line_no: usize,
    done: bool,
}

impl<R: Read> LineIter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader: BufReader::new(reader), line_no: 0, done: false }
    }
}

impl<R: Read> Iterator for LineIter<R> {
    type Item = io::Result<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => {
                self.done = true;
                None
            }
            Ok(_) => {
                if buf.last() == Some(&b'\n') {
                    buf.pop();
                    if buf.last() == Some(&b'\r') {
                        buf.pop();
                    }
                } else {
                    self.done = true;
                }
                self.line_no += 1;
                match String::from_utf8(buf) {
                    Ok(s) => Some(Ok((self.line_no, s))),
                    Err(e) => {
                        self.done = true;
                        Some(Err(io::Error::new(io::ErrorKind::InvalidData, e.utf8_error())))
                    }
                }
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
