use crate::{EventType, JobKind};

use std::str::FromStr;

#[test]
fn test_job_kind_as_str() {
    assert_eq!(JobKind::Analyze.as_str(), "analyze");
    assert_eq!(JobKind::Fix.as_str(), "fix");
}

#[test]
fn test_job_kind_from_str() {
    assert_eq!(JobKind::from_str("analyze").unwrap(), JobKind::Analyze);
    assert_eq!(JobKind::from_str("fix").unwrap(), JobKind::Fix);
    assert!(JobKind::from_str("Analyze").is_err());
    assert!(JobKind::from_str("").is_err());
}

#[test]
fn test_job_kind_maps_to_event_type() {
    assert_eq!(JobKind::Analyze.event_type(), EventType::AnalysisResult);
    assert_eq!(JobKind::Fix.event_type(), EventType::FixResult);
}

#[test]
fn test_job_kind_deserializes_from_snake_case() {
    let kind: JobKind = serde_json::from_str("\"fix\"").unwrap();
    assert_eq!(kind, JobKind::Fix);
}
