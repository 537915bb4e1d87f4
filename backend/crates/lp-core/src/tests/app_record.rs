use crate::{AppRecord, SupervisorError};

use googletest::assert_that;
use googletest::prelude::{anything, contains_substring, eq, err, ok};

fn assert_rejected(record: &AppRecord, field: &'static str) {
    let result = record.validate();
    assert_that!(result, err(anything()));
    match result.unwrap_err() {
        SupervisorError::Validation { field: actual, .. } => {
            assert_eq!(actual, Some(field));
        }
        other => panic!("expected validation error on {field}, got {other}"),
    }
}

#[test]
fn given_complete_record_when_validate_then_ok() {
    let record = AppRecord::new("web", 3000, "sleep 100");

    assert_that!(record.validate(), ok(anything()));
    assert_that!(record.pid, eq(0));
    assert_that!(record.has_log(), eq(false));
}

#[test]
fn given_missing_fields_when_validate_then_rejected_per_field() {
    assert_rejected(&AppRecord::new("  ", 3000, "sleep 1"), "name");
    assert_rejected(&AppRecord::new("web", 0, "sleep 1"), "port");
    assert_rejected(&AppRecord::new("web", 3000, "   "), "command");
}

#[test]
fn given_name_that_escapes_log_dir_when_validate_then_rejected() {
    for name in ["..", ".", "a/b", r"a\b", "nul\0byte"] {
        assert_rejected(&AppRecord::new(name, 3000, "sleep 1"), "name");
    }
}

#[test]
fn given_command_of_only_empty_quotes_when_validate_then_invalid_command() {
    // Given
    let record = AppRecord::new("web", 3000, r#""" ''"#);

    // When
    let result = record.validate();

    // Then
    assert_that!(result, err(anything()));
    let error = result.unwrap_err();
    assert!(error.is_validation());
    let err_msg = format!("{error}");
    assert_that!(err_msg, contains_substring("Invalid command"));
}

#[test]
fn given_stopped_record_when_serialized_then_runtime_fields_omitted() {
    let record = AppRecord::new("web", 3000, "sleep 100");

    let json = serde_json::to_string(&record).unwrap();

    assert_that!(
        json,
        eq(r#"{"name":"web","port":3000,"command":"sleep 100"}"#)
    );
}

#[test]
fn given_json_without_runtime_fields_when_deserialized_then_defaults() {
    let record: AppRecord =
        serde_json::from_str(r#"{"name":"api","port":4000,"command":"./api"}"#).unwrap();

    assert_that!(record, eq(&AppRecord::new("api", 4000, "./api")));
}
