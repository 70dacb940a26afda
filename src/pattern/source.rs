//! Line sources for pattern files.
//!
//! Pattern records live in one or more plain-text files searched in order.
//! The compiler only needs sequential lines, a rewind back to the start of
//! the group, and a way to move on to the next file, so that is the whole
//! interface.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

pub trait PatternSource {
    /// Next line of the current file, or `None` at its end.
    fn next_line(&mut self) -> io::Result<Option<String>>;

    /// Reposition at the start of the group's first file, so a source can
    /// be searched again from the top.
    fn rewind(&mut self) -> io::Result<()>;

    /// Move to the next file in the group. Returns `false` when there is
    /// none left.
    fn advance(&mut self) -> io::Result<bool>;
}

/// An ordered group of pattern files on disk, opened lazily.
pub struct FileGroup {
    paths: Vec<PathBuf>,
    index: usize,
    reader: Option<BufReader<File>>,
}

impl FileGroup {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self {
            paths,
            index: 0,
            reader: None,
        }
    }
}

impl PatternSource for FileGroup {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        if self.index >= self.paths.len() {
            return Ok(None);
        }
        if self.reader.is_none() {
            self.reader = Some(BufReader::new(File::open(&self.paths[self.index])?));
        }
        let reader = self.reader.as_mut().expect("reader just opened");
        let mut buf = String::new();
        if reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn rewind(&mut self) -> io::Result<()> {
        // Back to the first file; it reopens on the next read.
        self.index = 0;
        self.reader = None;
        Ok(())
    }

    fn advance(&mut self) -> io::Result<bool> {
        self.reader = None;
        if self.index < self.paths.len() {
            self.index += 1;
        }
        Ok(self.index < self.paths.len())
    }
}

/// In-memory source over a single "file" of lines.
pub struct MemorySource {
    lines: Vec<String>,
    pos: usize,
}

impl MemorySource {
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
            pos: 0,
        }
    }
}

impl PatternSource for MemorySource {
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let line = self.lines.get(self.pos).cloned();
        if line.is_some() {
            self.pos += 1;
        }
        Ok(line)
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.pos = 0;
        Ok(())
    }

    fn advance(&mut self) -> io::Result<bool> {
        self.pos = self.lines.len();
        Ok(false)
    }
}
