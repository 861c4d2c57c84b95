//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! | Code | Description                                                   |
//! |------|---------------------------------------------------------------|
//! | 0    | Success                                                       |
//! | 1    | General error (unspecified)                                   |
//! | 2    | CLI usage error (bad args, no input root)                     |
//! | 3    | IO / resource error (missing lookup table, unreadable input)  |
//! | 4    | Configuration error (bad TOML, invalid priority)              |
//! | 5    | Malformed record in an extract                                |
//! | 6    | Completed, but rejected lines were found under `--strict`     |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Input or output could not be read or written, including the
/// identifier lookup tables.
pub const EXIT_IO: u8 = 3;

/// Settings file does not parse or validate, or an invalid priority.
pub const EXIT_CONFIG: u8 = 4;

/// An extract line does not hold eleven fields.
pub const EXIT_RECORD: u8 = 5;

/// `--strict` and at least one interesting line failed to tokenize.
/// Outputs are still written.
pub const EXIT_REJECTS: u8 = 6;
