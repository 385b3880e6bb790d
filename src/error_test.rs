use super::*;

// =============================================================================
// server_message
// =============================================================================

#[test]
fn server_message_prefers_message_then_error() {
    assert_eq!(server_message(r#"{"message":"m1","error":"m2"}"#).as_deref(), Some("m1"));
    assert_eq!(server_message(r#"{"error":"m2"}"#).as_deref(), Some("m2"));
}

#[test]
fn server_message_skips_blank_message_field() {
    assert_eq!(server_message(r#"{"message":"  ","error":"Conflict"}"#).as_deref(), Some("Conflict"));
}

#[test]
fn server_message_object_without_known_fields_is_none() {
    assert_eq!(server_message(r#"{"status":409}"#), None);
}

#[test]
fn server_message_plain_text_is_trimmed() {
    assert_eq!(server_message("  user exists \n").as_deref(), Some("user exists"));
}

#[test]
fn server_message_json_string() {
    assert_eq!(server_message(r#""bad credentials""#).as_deref(), Some("bad credentials"));
}

#[test]
fn server_message_empty_body_is_none() {
    assert_eq!(server_message(""), None);
    assert_eq!(server_message("   "), None);
}

// =============================================================================
// ApiError
// =============================================================================

#[test]
fn from_response_uses_fallback_without_payload() {
    let err = ApiError::from_response(500, "", "registration failed");
    assert!(matches!(&err, ApiError::Status { status: 500, message, .. } if message == "registration failed"));
    assert_eq!(err.status(), Some(500));
}

#[test]
fn from_response_keeps_raw_body() {
    let err = ApiError::from_response(409, r#"{"message":"taken"}"#, "x");
    match err {
        ApiError::Status { message, body, .. } => {
            assert_eq!(message, "taken");
            assert_eq!(body, r#"{"message":"taken"}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn error_codes_are_distinct() {
    let errors = [
        ApiError::Validation(String::new()),
        ApiError::InvalidHeader(String::new()),
        ApiError::Transport(String::new()),
        ApiError::from_response(400, "", "x"),
        ApiError::Decode(String::new()),
        ApiError::Storage(StorageError::Encode("x".into())),
        ApiError::HttpClientBuild(String::new()),
    ];
    let mut codes: Vec<_> = errors.iter().map(ApiError::error_code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn status_is_none_for_non_status_errors() {
    assert_eq!(ApiError::Validation("x".into()).status(), None);
}
