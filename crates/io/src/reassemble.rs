//! Line reassembly: physical lines → logical record buffers.
//!
//! The report wraps narrative text onto the next physical line, sometimes
//! across a page break, with nothing marking the wrap. A line that follows
//! a data line and also looks like data is taken as its continuation. After
//! a page number, the first data line is a continuation only when it is
//! short.

use std::io;

use crate::classify::LineClassifier;

/// Longest line (in tokens) still taken as a continuation after a page break.
pub const CONTINUATION_MAX_TOKENS: usize = 4;

/// One reassembled buffer and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    pub text: String,
    /// Last physical line (1-based) merged into `text`. Noise skipped after
    /// a page break does not move it, so when the line after the break
    /// starts a new record the buffer keeps the number of its own last line.
    pub line_number: u64,
}

/// Iterator adaptor over physical lines. Holds at most one lookahead line.
pub struct Reassembler<I> {
    lines: I,
    classifier: LineClassifier,
    continuation_max_tokens: usize,
    lookahead: Option<(String, u64)>,
    line_number: u64,
}

impl<I> Reassembler<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, classifier: LineClassifier, continuation_max_tokens: usize) -> Self {
        Self {
            lines,
            classifier,
            continuation_max_tokens,
            lookahead: None,
            line_number: 0,
        }
    }

    fn next_physical(&mut self) -> Option<io::Result<(String, u64)>> {
        if let Some(pending) = self.lookahead.take() {
            return Some(Ok(pending));
        }
        let line = self.lines.next()?;
        self.line_number += 1;
        Some(line.map(|l| (l.trim().to_string(), self.line_number)))
    }

    /// Consume lines up to the first interesting one after a page break.
    /// Returns it when it is short enough to be a continuation; otherwise
    /// it is kept as the start of the next buffer.
    fn after_page_break(&mut self) -> io::Result<Option<(String, u64)>> {
        while let Some(line) = self.next_physical() {
            let (text, number) = line?;
            if !self.classifier.interesting(&text) {
                continue;
            }
            if text.split_whitespace().count() <= self.continuation_max_tokens {
                return Ok(Some((text, number)));
            }
            log::debug!("line {number}: too long to continue across page break");
            self.lookahead = Some((text, number));
            break;
        }
        Ok(None)
    }

    fn assemble(&mut self, mut text: String, mut line_number: u64) -> io::Result<LogicalLine> {
        if let Some(next) = self.next_physical() {
            let (next, next_number) = next?;
            if self.classifier.interesting(&next) {
                text.push_str(&next);
                line_number = next_number;
            } else if self.classifier.likely_page_number(&next) {
                if let Some((cont, cont_number)) = self.after_page_break()? {
                    log::debug!("line {line_number}: narrative continued across page break");
                    text.push_str(&cont);
                    line_number = cont_number;
                }
            } else {
                self.lookahead = Some((next, next_number));
            }
        }
        Ok(LogicalLine { text, line_number })
    }
}

impl<I> Iterator for Reassembler<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (text, number) = match self.next_physical()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            if self.classifier.interesting(&text) {
                return Some(self.assemble(text, number));
            }
        }
    }
}
