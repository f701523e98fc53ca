use crate::{CoreError, JobKind, JobRecord};

#[test]
fn test_job_record_new() {
    let job = JobRecord::new(JobKind::Analyze, "def f(): pass").unwrap();

    assert_eq!(job.kind(), JobKind::Analyze);
    assert_eq!(job.payload(), "def f(): pass");
}

#[test]
fn test_job_record_ids_are_unique() {
    let a = JobRecord::new(JobKind::Fix, "x = 1").unwrap();
    let b = JobRecord::new(JobKind::Fix, "x = 1").unwrap();

    assert_ne!(a.id(), b.id());
}

#[test]
fn test_job_record_rejects_empty_payload() {
    let result = JobRecord::new(JobKind::Analyze, "");

    match result {
        Err(CoreError::Validation { field, .. }) => assert_eq!(field.as_deref(), Some("content")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn test_job_record_rejects_whitespace_payload() {
    assert!(JobRecord::new(JobKind::Fix, "   \n\t").is_err());
}

#[test]
fn test_job_record_preview_truncates_long_payload() {
    let job = JobRecord::new(JobKind::Analyze, "abcdefghij").unwrap();

    assert_eq!(job.preview(4), "abcd...");
    assert_eq!(job.preview(50), "abcdefghij");
}

#[test]
fn test_job_record_deserialize_rejects_blank_payload() {
    let job = JobRecord::new(JobKind::Fix, "x = 1").unwrap();
    let mut value = serde_json::to_value(&job).unwrap();
    value["payload"] = serde_json::json!("  ");

    let result = serde_json::from_value::<JobRecord>(value);

    assert!(result.is_err());
}

#[test]
fn test_job_record_deserialize_keeps_identity() {
    let job = JobRecord::new(JobKind::Analyze, "def f(): pass").unwrap();
    let json = serde_json::to_string(&job).unwrap();

    let restored: JobRecord = serde_json::from_str(&json).unwrap();

    assert_eq!(restored, job);
}
