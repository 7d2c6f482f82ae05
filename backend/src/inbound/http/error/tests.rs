//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::test::TestRequest;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::not_found("Record not found"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("Record already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] error: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&error), status);
}

async fn render(error: &Error) -> (StatusCode, Option<String>, Error) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .map(|value| value.to_str().expect("trace id header is ASCII").to_owned());
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON deserialises");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_keep_message_but_drop_details(expected_trace_id: String) {
    let error = Error::internal("record repository error: database error")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({ "secret": "x" }));

    let (status, header, body) = render(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body.message(), "record repository error: database error");
    assert!(body.details().is_none());
}

#[rstest]
#[actix_web::test]
async fn client_errors_keep_details(expected_trace_id: String) {
    let error = Error::conflict("Record already exists")
        .with_trace_id(expected_trace_id)
        .with_details(json!({ "date": "2024-01-01", "drinkType": "soju" }));

    let (status, _, body) = render(&error).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, error);
}

#[rstest]
#[actix_web::test]
async fn responses_without_trace_omit_header() {
    let (_, header, body) = render(&Error::not_found("Record not found")).await;

    assert!(header.is_none());
    assert!(body.trace_id().is_none());
}

#[rstest]
fn actix_errors_are_redacted() {
    let actix_error = actix_web::error::ErrorBadGateway("upstream exploded");
    let error = Error::from(actix_error);

    assert_eq!(error.code(), ErrorCode::InternalError);
    assert_eq!(error.message(), "Internal server error");
}

#[rstest]
fn json_errors_become_bad_requests() {
    let request = TestRequest::default().to_http_request();

    let error = json_error_handler(JsonPayloadError::ContentType, &request);

    assert_eq!(
        error.as_response_error().status_code(),
        StatusCode::BAD_REQUEST
    );
}
