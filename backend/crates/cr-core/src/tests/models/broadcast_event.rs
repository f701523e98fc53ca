use crate::{BroadcastEvent, EventType, JobKind, JobRecord, Outcome};

use serde_json::{Value, json};

#[test]
fn test_analysis_success_serializes_to_wire_format() {
    let job = JobRecord::new(JobKind::Analyze, "def f(): pass").unwrap();
    let event = BroadcastEvent::from_outcome(&Outcome::success(&job, "- a\n- b\n- c"));

    let value: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

    assert_eq!(
        value,
        json!({ "type": "analysis_result", "message": "- a\n- b\n- c" })
    );
}

#[test]
fn test_fix_failure_is_prefixed_and_tagged() {
    let job = JobRecord::new(JobKind::Fix, "def f(): pass").unwrap();
    let event = BroadcastEvent::from_outcome(&Outcome::failed(&job, "upstream returned 502"));

    assert_eq!(event.event_type, EventType::FixResult);
    assert_eq!(event.message, "Error: upstream returned 502");

    let value: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();
    assert_eq!(value["type"], "fix_result");
}

#[test]
fn test_wire_format_has_only_type_and_message() {
    let event = BroadcastEvent::new(EventType::AnalysisResult, "ok");
    let value: Value = serde_json::from_str(&event.to_json().unwrap()).unwrap();

    assert_eq!(value.as_object().unwrap().len(), 2);
}

#[test]
fn test_event_type_strings_match_serde_names() {
    for event_type in [EventType::AnalysisResult, EventType::FixResult] {
        let serialized = serde_json::to_string(&event_type).unwrap();
        assert_eq!(serialized, format!("\"{}\"", event_type.as_str()));
    }
}
