use crate::{JobKind, JobRecord, Outcome, OutcomeStatus};

#[test]
fn test_outcome_success_keeps_message_unmodified() {
    let job = JobRecord::new(JobKind::Analyze, "print(1)").unwrap();
    let outcome = Outcome::success(&job, "  - issue one\n");

    assert_eq!(outcome.job_id, job.id());
    assert_eq!(outcome.kind, JobKind::Analyze);
    assert_eq!(outcome.status, OutcomeStatus::Success);
    assert_eq!(outcome.message, "  - issue one\n");
    assert!(outcome.is_success());
}

#[test]
fn test_outcome_failed_keeps_description() {
    let job = JobRecord::new(JobKind::Fix, "print(1)").unwrap();
    let outcome = Outcome::failed(&job, "inference timed out after 30s");

    assert_eq!(outcome.status, OutcomeStatus::Failed);
    assert_eq!(outcome.message, "inference timed out after 30s");
    assert!(!outcome.is_success());
}

#[test]
fn test_outcome_failed_never_has_empty_message() {
    let job = JobRecord::new(JobKind::Fix, "print(1)").unwrap();
    let outcome = Outcome::failed(&job, "");

    assert!(!outcome.message.is_empty());
}
