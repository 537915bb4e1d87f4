use crate::BulkResponse;

use lp_core::BulkReport;

#[test]
fn test_complete_report_is_success_with_flattened_lists() {
    let report = BulkReport {
        succeeded: vec!["web".into()],
        skipped: vec!["api".into()],
        failed: vec![],
    };

    let json = serde_json::to_value(BulkResponse::from(report)).unwrap();

    assert_eq!(json["status"], "success");
    assert_eq!(json["succeeded"][0], "web");
    assert_eq!(json["skipped"][0], "api");
    assert_eq!(json["failed"].as_array().unwrap().len(), 0);
}

#[test]
fn test_report_with_failure_is_partial() {
    let mut report = BulkReport::default();
    report.succeeded.push("web".into());
    report.fail("ghost", "Failed to launch app 'ghost'");

    let json = serde_json::to_value(BulkResponse::from(report)).unwrap();

    assert_eq!(json["status"], "partial");
    assert_eq!(json["failed"][0]["name"], "ghost");
    assert_eq!(json["failed"][0]["message"], "Failed to launch app 'ghost'");
}
