//! Byte-at-a-time input shared by the move parser and the save-file loader.

use std::io::{self, BufRead, Bytes, Read};

/// A byte stream with explicit end-of-input.
#[derive(Debug)]
pub struct Scanner<R> {
    bytes: Bytes<R>,
}

impl<R: BufRead> Scanner<R> {
    /// Wraps a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
        }
    }

    /// Reads the next byte; `None` at end of input.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        self.bytes.next().transpose()
    }

    /// Reads a non-negative decimal integer no larger than `max`.
    ///
    /// Scanning stops at the first non-digit, which is consumed and reported
    /// in [`Number::stop`]. A leading `0` is the whole number, so `07` reads
    /// as `0` stopped by `7`. A value that would exceed `max` saturates at
    /// `max` and stops on the digit that overflowed it.
    pub fn read_number(&mut self, max: usize) -> io::Result<Number> {
        let first = self.next_byte()?;
        let mut value = match first {
            Some(b'0') => {
                return Ok(Number {
                    value: Some(0),
                    stop: self.next_byte()?,
                });
            }
            Some(digit @ b'1'..=b'9') => usize::from(digit - b'0'),
            stop => return Ok(Number { value: None, stop }),
        };

        if value > max {
            return Ok(Number {
                value: Some(max),
                stop: first,
            });
        }

        loop {
            match self.next_byte()? {
                Some(digit @ b'0'..=b'9') => {
                    value = 10 * value + usize::from(digit - b'0');
                    if value > max {
                        return Ok(Number {
                            value: Some(max),
                            stop: Some(digit),
                        });
                    }
                }
                stop => {
                    return Ok(Number {
                        value: Some(value),
                        stop,
                    });
                }
            }
        }
    }

    /// Consumes input up to and including the next newline, starting from
    /// a byte that has already been read.
    pub fn skip_line(&mut self, mut current: Option<u8>) -> io::Result<()> {
        while !is_line_end(current) {
            current = self.next_byte()?;
        }
        Ok(())
    }
}

/// Result of [`Scanner::read_number`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Number {
    /// The value read, or `None` if the first byte was not a digit.
    pub value: Option<usize>,
    /// The byte that ended the scan; `None` at end of input.
    pub stop: Option<u8>,
}

/// A newline or end of input.
pub fn is_line_end(byte: Option<u8>) -> bool {
    matches!(byte, None | Some(b'\n'))
}
