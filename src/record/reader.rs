//! Line-at-a-time reader with one line of pushback.
//!
//! The record decoders sometimes only discover a record has ended when the
//! next record's header appears; `unread` hands that line back so the next
//! decode call starts on it. Each cursor owns its buffers, so any number of
//! decodes may run concurrently on separate cursors.

use std::io::{self, BufRead};

pub struct LineCursor<R: BufRead> {
    inner: R,
    pending: Option<String>,
}

impl<R: BufRead> LineCursor<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            pending: None,
        }
    }

    /// Next line without its trailing newline, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            return Ok(Some(line));
        }
        let mut buf = String::new();
        let n = self.inner.read_line(&mut buf)?;
        if n == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    /// Hand a line back; the next `next_line` call returns it.
    pub fn unread(&mut self, line: String) {
        debug_assert!(self.pending.is_none(), "only one line of pushback");
        self.pending = Some(line);
    }
}
