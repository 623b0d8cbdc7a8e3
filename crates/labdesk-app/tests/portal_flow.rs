//! End-to-end portal flow: sign-in → submit → live update → evaluate →
//! student sees the result.

use std::sync::Arc;

use chrono::Utc;
use labdesk_app::{
    EditorSignal, EvaluationEditor, FormSignal, PortalSession, ReportDetail, SubmissionForm,
    faculty_summary, report_detail, student_rows,
};
use labdesk_auth::{
    AuthError, AuthState, FacultyTable, IdentityProvider, IdentityResolver, SessionClaims,
};
use labdesk_core::enums::{Role, ViewState};
use labdesk_store::ReportStore;

/// Stub provider: token sign-in yields the faculty user, anonymous sign-in
/// yields a student.
struct StubProvider;

impl IdentityProvider for StubProvider {
    async fn sign_in_with_token(&self, _token: &str) -> Result<SessionClaims, AuthError> {
        Ok(claims("user_prof", Some("Prof. Curie")))
    }

    async fn sign_in_anonymous(&self) -> Result<SessionClaims, AuthError> {
        Ok(claims("user_ada", None))
    }
}

fn claims(user_id: &str, name: Option<&str>) -> SessionClaims {
    SessionClaims {
        raw_jwt: "stub.jwt.token".into(),
        user_id: user_id.into(),
        display_name: name.map(String::from),
        expires_at: Utc::now() + chrono::TimeDelta::hours(1),
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("labdesk=debug")
        .with_test_writer()
        .try_init();
}

async fn shared_store() -> Arc<ReportStore> {
    Arc::new(
        ReportStore::open_local(":memory:", "chem-101")
            .await
            .unwrap(),
    )
}

#[tokio::test]
async fn student_submits_faculty_evaluates_student_sees_result() {
    init_logging();
    let store = shared_store().await;
    let rule = FacultyTable::new(["user_prof".to_string()]);

    // Student signs in anonymously
    let student_resolver = IdentityResolver::new(StubProvider, None);
    let mut student_session = PortalSession::new(
        Arc::clone(&store),
        student_resolver.subscribe(),
        rule.clone(),
    );
    assert!(student_session.is_loading());

    let student = student_resolver.sign_in().await.unwrap();
    assert!(student_session.auth_changed().await);
    assert_eq!(student_session.role(), Role::Student);

    // Faculty signs in with the configured token
    let faculty_resolver = IdentityResolver::new(StubProvider, Some("faculty-token".into()));
    let mut faculty_session = PortalSession::new(
        Arc::clone(&store),
        faculty_resolver.subscribe(),
        rule.clone(),
    );
    faculty_resolver.sign_in().await.unwrap();
    faculty_session.auth_changed().await;
    assert_eq!(faculty_session.role(), Role::Faculty);

    // Drain initial (empty) snapshots
    let initial = faculty_session
        .subscription_mut()
        .unwrap()
        .next()
        .await
        .unwrap();
    assert!(initial.is_empty());
    student_session.subscription_mut().unwrap().next().await.unwrap();

    // Student fills in the form and submits
    student_session.router_mut().go_to_submit();
    assert_eq!(student_session.router().view(), ViewState::Submit);

    let mut form = SubmissionForm::new(&student);
    form.experiment_name = "Calorimetry of unknown metal".into();
    form.data_observations = "m = 12.1 g, delta T = 3.2 K".into();
    let signal = form.submit(store.as_ref()).await;
    assert_eq!(signal, FormSignal::SwitchToDashboard);
    student_session.router_mut().on_submission_success();
    assert_eq!(student_session.router().view(), ViewState::Dashboard);

    // Both live subscriptions advance with the new report
    let faculty_set = faculty_session
        .subscription_mut()
        .unwrap()
        .next()
        .await
        .unwrap();
    assert_eq!(faculty_set.len(), 1);
    let student_set = student_session
        .subscription_mut()
        .unwrap()
        .next()
        .await
        .unwrap();
    assert_eq!(student_set.len(), 1);
    assert_eq!(student_set[0].student_id, "user_ada");

    // Faculty dashboard shows one pending submission
    let summary = faculty_summary(&faculty_set);
    assert_eq!(summary.total_submissions, 1);
    assert_eq!(summary.total_marked, 0);
    assert_eq!(summary.average_score.to_string(), "N/A");

    // Faculty opens the editor from the row and saves an evaluation
    let mut editor = EvaluationEditor::for_report(&faculty_set[0]);
    editor.marks_input = "87".into();
    editor.feedback_input = "Good work".into();
    let signal = editor
        .save(store.as_ref(), &faculty_session.identity().unwrap().user_id)
        .await;
    assert_eq!(signal, EditorSignal::Close);

    // Faculty stats update on the next snapshot
    let faculty_set = faculty_session
        .subscription_mut()
        .unwrap()
        .next()
        .await
        .unwrap();
    let summary = faculty_summary(&faculty_set);
    assert_eq!(summary.total_marked, 1);
    assert_eq!(summary.average_score.to_string(), "87.00");

    // Student sees the evaluation in the detail view
    let student_set = student_session
        .subscription_mut()
        .unwrap()
        .next()
        .await
        .unwrap();
    let rows = student_rows(&student_set, "user_ada");
    assert_eq!(rows.len(), 1);
    match report_detail(&student_set[0]) {
        ReportDetail::Evaluated { marks, feedback } => {
            assert_eq!(marks, 87);
            assert_eq!(feedback, "Good work");
        }
        ReportDetail::Pending => panic!("report should be evaluated"),
    }

    // Explicit teardown
    student_session.close();
    faculty_session.close();
}

#[tokio::test]
async fn disconnect_falls_back_to_student_role() {
    init_logging();
    let store = shared_store().await;
    let rule = FacultyTable::new(["user_prof".to_string()]);

    let resolver = IdentityResolver::new(StubProvider, Some("faculty-token".into()));
    let mut session = PortalSession::new(Arc::clone(&store), resolver.subscribe(), rule);

    resolver.sign_in().await.unwrap();
    session.auth_changed().await;
    assert_eq!(session.role(), Role::Faculty);

    resolver.disconnect();
    session.auth_changed().await;
    assert_eq!(session.role(), Role::Student);
    assert!(session.subscription_mut().is_none());
}

#[tokio::test]
async fn failed_sign_in_leaves_session_loading() {
    init_logging();

    struct FailingProvider;
    impl IdentityProvider for FailingProvider {
        async fn sign_in_with_token(&self, _token: &str) -> Result<SessionClaims, AuthError> {
            Err(AuthError::SignInFailed("HTTP 401: bad token".into()))
        }
        async fn sign_in_anonymous(&self) -> Result<SessionClaims, AuthError> {
            Err(AuthError::ProviderUnreachable("connection refused".into()))
        }
    }

    let store = shared_store().await;
    let resolver = IdentityResolver::new(FailingProvider, None);
    let mut session = PortalSession::new(
        Arc::clone(&store),
        resolver.subscribe(),
        FacultyTable::new(std::iter::empty()),
    );

    assert!(resolver.sign_in().await.is_err());

    // No state change was emitted; the session is stuck loading by design.
    let waited = tokio::time::timeout(
        std::time::Duration::from_millis(100),
        session.auth_changed(),
    )
    .await;
    assert!(waited.is_err(), "no auth change should arrive");
    assert!(session.is_loading());
    assert!(matches!(*resolver.subscribe().borrow(), AuthState::Loading));
}
