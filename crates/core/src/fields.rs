//! Field layout of a report record and the "looks like" predicates the
//! tokenizer uses to guess which optional fields are present.
//!
//! Every predicate is pure and operates on a single whitespace-free token.

pub const FIELD_COUNT: usize = 9;

pub const CORR_DATE_TIME: usize = 0;
pub const WUC: usize = 1;
pub const SYS_CODE: usize = 2;
pub const MODEL: usize = 3;
pub const EQUIPMENT_ID: usize = 4;
pub const EVENT_DATE: usize = 5;
pub const EVENT_NO: usize = 6;
pub const STATUS: usize = 7;
pub const NARRATIVE: usize = 8;

pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "CORR_DATE_TIME",
    "WUC",
    "SYS_CODE",
    "MODEL",
    "EQUIPMENT_ID",
    "EVENT_DATE",
    "EVENT_NO",
    "STATUS",
    "NARRATIVE",
];

pub const SYS_CODES: &[char] = &['A', 'W', 'E', 'O'];
pub const STATUS_CODES: &[char] = &['-', '*', 'C', 'N', 'X', 'B', '+', '/'];
pub const MODEL_PREFIXES: &[&str] = &["AH", "UH", "CH"];

/// Stray tokens the report sometimes prints after the WUC column.
pub const JUNK_TOKENS: &[&str] = &["U", "UN", "\\", "."];

/// Eight ASCII digits, `YYYYMMDD`.
pub fn looks_like_date(s: &str) -> bool {
    s.len() == 8 && s.bytes().all(|b| b.is_ascii_digit())
}

pub fn looks_like_sys_code(s: &str) -> bool {
    single_char_in(s, SYS_CODES)
}

pub fn looks_like_model(s: &str) -> bool {
    MODEL_PREFIXES.iter().any(|prefix| s.starts_with(prefix))
}

pub fn looks_like_status(s: &str) -> bool {
    single_char_in(s, STATUS_CODES)
}

pub fn is_junk(s: &str) -> bool {
    JUNK_TOKENS.contains(&s)
}

fn single_char_in(s: &str, set: &[char]) -> bool {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => set.contains(&c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_table() {
        for s in ["20140130", "00000000", "19991231"] {
            assert!(looks_like_date(s), "{s}");
        }
        for s in ["", "2014013", "201401300", "2014-01-3", "2014013O", "１２３４５６７８"] {
            assert!(!looks_like_date(s), "{s}");
        }
    }

    #[test]
    fn sys_code_table() {
        for s in ["A", "W", "E", "O"] {
            assert!(looks_like_sys_code(s), "{s}");
        }
        for s in ["", "a", "AW", "X", "AWEO", "SN5"] {
            assert!(!looks_like_sys_code(s), "{s}");
        }
    }

    #[test]
    fn model_table() {
        for s in ["UH1234", "AH64D", "CH47", "UH"] {
            assert!(looks_like_model(s), "{s}");
        }
        for s in ["", "U", "uh60", "HH60", "XUH60"] {
            assert!(!looks_like_model(s), "{s}");
        }
    }

    #[test]
    fn status_table() {
        for s in ["-", "*", "C", "N", "X", "B", "+", "/"] {
            assert!(looks_like_status(s), "{s}");
        }
        for s in ["", "CN", "c", "A", "EVT01"] {
            assert!(!looks_like_status(s), "{s}");
        }
    }

    #[test]
    fn junk_table() {
        for s in ["U", "UN", "\\", "."] {
            assert!(is_junk(s), "{s}");
        }
        for s in ["", "UNK", "u", "..", "A"] {
            assert!(!is_junk(s), "{s}");
        }
    }

    #[test]
    fn field_names_follow_indices() {
        assert_eq!(FIELD_NAMES[CORR_DATE_TIME], "CORR_DATE_TIME");
        assert_eq!(FIELD_NAMES[EQUIPMENT_ID], "EQUIPMENT_ID");
        assert_eq!(FIELD_NAMES[NARRATIVE], "NARRATIVE");
    }
}
