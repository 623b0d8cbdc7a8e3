//! Role-specific dashboard aggregates and view models.
//!
//! Pure functions over the current subscription snapshot — nothing here
//! talks to the store, so a dashboard can never observe unconfirmed state.

use chrono::{DateTime, Utc};
use std::fmt;

use labdesk_core::entities::Report;

/// Batch average over marked reports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageScore {
    /// No reports are marked yet — there is nothing to average.
    NotApplicable,
    /// Mean of marks over marked reports, rounded to 2 decimal places.
    Value(f64),
}

impl fmt::Display for AverageScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotApplicable => f.write_str("N/A"),
            Self::Value(avg) => write!(f, "{avg:.2}"),
        }
    }
}

/// Faculty dashboard summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct FacultySummary {
    pub total_submissions: usize,
    pub total_marked: usize,
    pub average_score: AverageScore,
}

/// Evaluation status badge on a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    /// Marked, showing `<marks>/100`.
    Marked(i64),
    PendingReview,
}

/// One row in a dashboard list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub report_id: String,
    pub experiment_name: String,
    /// Shown on faculty rows; students already know whose reports they see.
    pub student_name: Option<String>,
    pub submitted: DateTime<Utc>,
    pub status: ReportStatus,
}

/// Student-facing detail of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportDetail {
    /// Awaiting faculty review and marking.
    Pending,
    Evaluated { marks: i64, feedback: String },
}

/// Compute the faculty summary.
///
/// The average over zero marked reports is the `NotApplicable` sentinel,
/// never a division by zero.
#[must_use]
pub fn faculty_summary(reports: &[Report]) -> FacultySummary {
    let marked: Vec<i64> = reports
        .iter()
        .filter(|r| r.evaluation.marked)
        .filter_map(|r| r.evaluation.marks)
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let average_score = if marked.is_empty() {
        AverageScore::NotApplicable
    } else {
        let mean = marked.iter().sum::<i64>() as f64 / marked.len() as f64;
        AverageScore::Value((mean * 100.0).round() / 100.0)
    };

    FacultySummary {
        total_submissions: reports.len(),
        total_marked: marked.len(),
        average_score,
    }
}

fn row(report: &Report, with_student: bool) -> ReportRow {
    ReportRow {
        report_id: report.id.clone(),
        experiment_name: report.experiment_name.clone(),
        student_name: with_student.then(|| report.student_name.clone()),
        submitted: report.submission_date,
        status: report
            .evaluation
            .marks
            .filter(|_| report.evaluation.marked)
            .map_or(ReportStatus::PendingReview, ReportStatus::Marked),
    }
}

fn sorted_desc(reports: &[Report]) -> Vec<&Report> {
    let mut sorted: Vec<&Report> = reports.iter().collect();
    sorted.sort_by(|a, b| {
        b.submission_date
            .cmp(&a.submission_date)
            .then_with(|| b.id.cmp(&a.id))
    });
    sorted
}

/// All reports as faculty rows, newest submission first.
#[must_use]
pub fn faculty_rows(reports: &[Report]) -> Vec<ReportRow> {
    sorted_desc(reports).into_iter().map(|r| row(r, true)).collect()
}

/// The student's own reports, newest submission first.
#[must_use]
pub fn student_rows(reports: &[Report], student_id: &str) -> Vec<ReportRow> {
    sorted_desc(reports)
        .into_iter()
        .filter(|r| r.student_id == student_id)
        .map(|r| row(r, false))
        .collect()
}

/// Detail view data for one report.
#[must_use]
pub fn report_detail(report: &Report) -> ReportDetail {
    match (report.evaluation.marked, report.evaluation.marks) {
        (true, Some(marks)) => ReportDetail::Evaluated {
            marks,
            feedback: report.evaluation.feedback.clone(),
        },
        _ => ReportDetail::Pending,
    }
}
