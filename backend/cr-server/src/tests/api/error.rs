use crate::ApiError;

use cr_core::{CoreError, JobKind, JobRecord};
use cr_queue::QueueError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::Validation {
        message: "No content provided".into(),
        field: Some("content".into()),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "No content provided");
    assert_eq!(json["error"]["field"], "content");
}

#[tokio::test]
async fn test_queue_unavailable_returns_503_without_field() {
    let error = ApiError::QueueUnavailable {
        message: "queue is full (8 jobs)".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["error"]["code"], "QUEUE_UNAVAILABLE");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "something broke".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = body_json(error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_blank_payload_converts_to_validation_on_content() {
    let core_error = JobRecord::new(JobKind::Analyze, "   ").unwrap_err();

    let api_error = ApiError::from(core_error);

    match api_error {
        ApiError::Validation { message, field, .. } => {
            assert_eq!(message, "No content provided");
            assert_eq!(field.as_deref(), Some("content"));
        }
        other => panic!("expected Validation, got {other}"),
    }
}

#[test]
fn test_unknown_kind_converts_to_validation_on_kind() {
    let core_error: CoreError = "summarize".parse::<JobKind>().unwrap_err();

    let api_error = ApiError::from(core_error);

    match api_error {
        ApiError::Validation { message, field, .. } => {
            assert!(message.contains("summarize"));
            assert_eq!(field.as_deref(), Some("kind"));
        }
        other => panic!("expected Validation, got {other}"),
    }
}

#[test]
fn test_queue_errors_convert_to_queue_unavailable() {
    let full = ApiError::from(QueueError::unavailable("queue is full (1 jobs)"));
    let closed = ApiError::from(QueueError::closed());

    assert!(matches!(full, ApiError::QueueUnavailable { ref message, .. } if message == "queue is full (1 jobs)"));
    assert!(matches!(closed, ApiError::QueueUnavailable { .. }));
}
