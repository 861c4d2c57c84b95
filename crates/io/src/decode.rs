// Line-at-a-time reading of legacy report text

use std::io::{self, BufRead};

/// Decode one line: UTF-8 when valid, otherwise Windows-1252 (the dumps
/// come off an old DOS/Windows reporting host).
pub fn decode_line(bytes: &[u8]) -> String {
    decode(bytes).0
}

/// Decoded text, and whether the Windows-1252 fallback was needed.
fn decode(bytes: &[u8]) -> (String, bool) {
    match std::str::from_utf8(bytes) {
        Ok(s) => (s.to_owned(), false),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            (decoded.into_owned(), true)
        }
    }
}

/// Iterator over decoded lines with the terminator removed. Only one line
/// is buffered at a time.
///
/// The first line that needs the Windows-1252 fallback is logged at warn
/// level; later ones only at debug.
pub struct DecodedLines<R> {
    reader: R,
    buf: Vec<u8>,
    name: String,
    line_number: u64,
    fallbacks: usize,
}

impl<R: BufRead> DecodedLines<R> {
    /// `name` labels the fallback warning.
    pub fn named(reader: R, name: &str) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            name: name.to_string(),
            line_number: 0,
            fallbacks: 0,
        }
    }

    /// Lines so far that were not valid UTF-8.
    pub fn fallbacks(&self) -> usize {
        self.fallbacks
    }
}

impl<R: BufRead> Iterator for DecodedLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                if self.buf.ends_with(b"\n") {
                    self.buf.pop();
                    if self.buf.ends_with(b"\r") {
                        self.buf.pop();
                    }
                }
                self.line_number += 1;
                let (text, fallback) = decode(&self.buf);
                if fallback {
                    self.fallbacks += 1;
                    if self.fallbacks == 1 {
                        log::warn!(
                            "{} line {}: not valid UTF-8, decoding as Windows-1252",
                            self.name,
                            self.line_number
                        );
                    } else {
                        log::debug!("{} line {}: Windows-1252", self.name, self.line_number);
                    }
                }
                Some(Ok(text))
            }
            Err(e) => Some(Err(e)),
        }
    }
}
