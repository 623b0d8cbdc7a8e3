//! # labdesk-app
//!
//! The dashboard subsystem: submission form, evaluation editor, student and
//! faculty dashboards, the two-state view router, and the portal session
//! that wires identity → role → live report subscription.
//!
//! All components are event-driven: state transitions happen on discrete
//! calls (user input, store confirmations, auth-state updates), with no
//! locking in component code. Errors are surfaced as inline messages at the
//! component that initiated the action; nothing is retried automatically and
//! nothing crashes the session.

pub mod bootstrap;
pub mod dashboard;
pub mod evaluate;
pub mod session;
pub mod submit;
pub mod view;

pub use bootstrap::{resolver_from_config, role_rule_from_config, store_from_config};
pub use dashboard::{
    AverageScore, FacultySummary, ReportDetail, ReportRow, ReportStatus, faculty_rows,
    faculty_summary, report_detail, student_rows,
};
pub use evaluate::{EditorSignal, EvaluationEditor};
pub use session::PortalSession;
pub use submit::{FormMessage, FormPhase, FormSignal, SubmissionForm};
pub use view::ViewRouter;
