//! Line source: decodes a byte stream into text lines.
//!
//! Lines are split on `\n` and `\r` bytes before decoding, which is why only
//! ASCII-compatible charsets are accepted by
//! [`ConvertOptions`](crate::ConvertOptions).
//!
//! ```rust
//! use pipe2xml::Lines;
//! use std::io::Cursor;
//!
//! let input = Cursor::new("P|Elof\r\nF|Hans\rF|Anna\n");
//! let lines: Vec<String> = Lines::new(input, encoding_rs::UTF_8)
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(lines, ["P|Elof", "F|Hans", "F|Anna"]);
//! ```

use encoding_rs::Encoding;
use std::io::{self, BufRead};

/// Forward-only iterator over the decoded lines of a reader.
///
/// A line ends at `\n`, `\r` or `\r\n`, even when the `\r\n` pair is split
/// across two reads. Terminators are removed, a final unterminated line is
/// still yielded and a byte order mark at the very start is dropped.
/// Malformed byte sequences decode to U+FFFD. After the first I/O error the
/// iterator is exhausted.
pub struct Lines<R> {
    reader: R,
    charset: &'static Encoding,
    buf: Vec<u8>,
    at_start: bool,
    skip_lf: bool,
    done: bool,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R, charset: &'static Encoding) -> Self {
        Lines {
            reader,
            charset,
            buf: Vec::with_capacity(128),
            at_start: true,
            skip_lf: false,
            done: false,
        }
    }

    /// Reads the next line into `buf`, without its terminator. Returns
    /// `false` at end of input when nothing was read.
    fn read_line(&mut self) -> io::Result<bool> {
        self.buf.clear();
        loop {
            let available = match self.reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                return Ok(!self.buf.is_empty());
            }

            // The `\n` of a `\r\n` pair may arrive with the next fill.
            if self.skip_lf {
                self.skip_lf = false;
                if available[0] == b'\n' {
                    self.reader.consume(1);
                    continue;
                }
            }

            match available.iter().position(|&b| b == b'\n' || b == b'\r') {
                Some(end) => {
                    self.skip_lf = available[end] == b'\r';
                    self.buf.extend_from_slice(&available[..end]);
                    self.reader.consume(end + 1);
                    return Ok(true);
                }
                None => {
                    let len = available.len();
                    self.buf.extend_from_slice(available);
                    self.reader.consume(len);
                }
            }
        }
    }

    fn decode(&mut self) -> String {
        let text = if self.at_start {
            self.at_start = false;
            self.charset.decode_with_bom_removal(&self.buf).0
        } else {
            self.charset.decode_without_bom_handling(&self.buf).0
        };
        text.into_owned()
    }
}

impl<R: BufRead> Iterator for Lines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.read_line() {
            Ok(false) => {
                self.done = true;
                None
            }
            Ok(true) => Some(Ok(self.decode())),
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
