use crate::AppDto;

use lp_core::AppRecord;

#[test]
fn test_never_started_app_has_null_log_and_stopped_status() {
    let dto = AppDto::from(AppRecord::new("web", 3000, "sleep 100"));
    let json = serde_json::to_value(&dto).unwrap();

    assert_eq!(json["name"], "web");
    assert_eq!(json["port"], 3000);
    assert_eq!(json["pid"], 0);
    assert!(json["log_file"].is_null());
    assert_eq!(json["status"], "stopped");
}

#[test]
fn test_app_with_pid_is_running() {
    let mut record = AppRecord::new("web", 3000, "sleep 100");
    record.pid = 4242;
    record.log_file = "/tmp/logs/web.log".to_string();

    let json = serde_json::to_value(AppDto::from(record)).unwrap();

    assert_eq!(json["pid"], 4242);
    assert_eq!(json["log_file"], "/tmp/logs/web.log");
    assert_eq!(json["status"], "running");
}
