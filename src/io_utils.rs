//! I/O convenience helpers used by the search engine.
//!
//! Opens either a named file or stdin via the conventional "-" path. Actual
//! line splitting is lazy and lives in `source::LineIter`.

use std::fs::File;
use std::io::{self, Read};

/// Open a file path for reading, or stdin when `path` is `"-"`.
pub fn open_input(path: &str) -> io::Result<Box<dyn Read>> {
    if path == "-" {
        Ok(Box::new(io::stdin()))
    } else {
        Ok(Box::new(File::open(path)?))
    }
}
