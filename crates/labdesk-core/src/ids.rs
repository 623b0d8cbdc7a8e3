//! ID prefix constants.
//!
//! Store-assigned IDs are `<prefix>-<8 hex chars>`, generated inside the
//! database (see `labdesk-store`). Prefixes keep IDs self-describing in
//! logs.

/// Lab report.
pub const PREFIX_REPORT: &str = "rpt";

/// All known prefixes, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_REPORT];
