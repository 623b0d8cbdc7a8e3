//! Entity structs for the Labdesk report domain.
//!
//! Each entity maps to a row shape in the libSQL store. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod report;

pub use report::{Evaluation, Report, ReportDraft, MAX_MARKS, validate_marks};
