//! Line classifier: real data line, or report boilerplate?
//!
//! The dumps interleave records with page headers, legends, column titles,
//! totals footers, separator rules, page numbers and an ASCII-art "CLOSED"
//! banner. Anything that is none of those is a candidate data line.

use std::sync::LazyLock;

use regex::RegexSet;

/// A lone number at or below this is taken to be a page number.
pub const PAGE_NUMBER_MAX: u64 = 1000;

static BOILERPLATE: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        // run date stamp: "30 JAN 2014  14:02:11"
        r"^[0-9]{1,2} [A-Z]{3} [0-9]{4} *([0-9]{2}:){2}[0-9]{2}$",
        r"^AIRCRAFT STATUS REPORT - CLOSED FAULTS$",
        r"^\* = RED X$",
        r"^A/C   +MDS    +A/C HRS PHASE  +\+ = CIRCLE RED X$",
        r"^ST FAULT DT #",
        r"^Field #   Name",
        // vendor banner
        r"AWAAM",
        r"^TOTAL RECORDS PRINTED",
        r"^TOTAL PAGES PRINTED",
        r"^TOTAL FIELDS USED",
        r"^ELAPSED TIME FOR REPORT",
        r"^SUMMARY OF ADHOC REPORT",
        r"^-{50,}",
        r"^\*{50,}",
    ])
    .expect("boilerplate patterns are valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClassifier {
    pub page_number_max: u64,
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self {
            page_number_max: PAGE_NUMBER_MAX,
        }
    }
}

impl LineClassifier {
    pub fn new(page_number_max: u64) -> Self {
        Self { page_number_max }
    }

    /// Whether `line` is worth handing to the tokenizer.
    pub fn interesting(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || BOILERPLATE.is_match(line) {
            return false;
        }
        if collapse_repeats(line) == "CLOSED" {
            return false;
        }
        !self.likely_page_number(line)
    }

    /// Bare integer no larger than `page_number_max`.
    pub fn likely_page_number(&self, line: &str) -> bool {
        let line = line.trim();
        if line.is_empty() || !line.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        // too long for u64 is certainly not a page number
        line.parse::<u64>()
            .is_ok_and(|n| n <= self.page_number_max)
    }
}

/// [`LineClassifier::interesting`] with the default page-number threshold.
pub fn interesting(line: &str) -> bool {
    LineClassifier::default().interesting(line)
}

/// [`LineClassifier::likely_page_number`] with the default threshold.
pub fn likely_page_number(line: &str) -> bool {
    LineClassifier::default().likely_page_number(line)
}

/// Drop whitespace and collapse runs of the same character, so the banner
/// art `C C L L O O S S E E D D` reduces to `CLOSED`.
pub fn collapse_repeats(s: &str) -> String {
    let mut out = String::new();
    let mut current = None;
    for c in s.chars() {
        if !c.is_whitespace() && Some(c) != current {
            out.push(c);
            current = Some(c);
        }
    }
    out
}
