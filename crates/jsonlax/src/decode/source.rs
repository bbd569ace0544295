//! Byte-level input adapter.

use std::io::{ErrorKind, Read};

/// Wraps the input stream, producing one byte at a time with one byte of
/// look-ahead. Read errors fold into end-of-input: the parser treats both
/// the same and finishes at whatever depth it stands.
pub(crate) struct ByteSource<R> {
    inner: R,
    peeked: i32,
}

impl<R: Read> ByteSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, peeked: -1 }
    }

    /// Next byte as a non-negative integer, -1 on EOF or read error.
    pub(crate) fn next_byte(&mut self) -> i32 {
        if self.peeked >= 0 {
            let b = self.peeked;
            self.peeked = -1;
            return b;
        }
        self.read_raw()
    }

    /// Next byte without consuming it, -1 on EOF.
    pub(crate) fn peek_byte(&mut self) -> i32 {
        if self.peeked < 0 {
            self.peeked = self.read_raw();
        }
        self.peeked
    }

    fn read_raw(&mut self) -> i32 {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return -1,
                Ok(_) => return i32::from(buf[0]),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => return -1,
            }
        }
    }
}
