use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, eq, none, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults_are_used() {
    // Given
    let (temp, _guard) = setup_config_dir();

    // When
    let result = Config::load();

    // Then
    assert_that!(result, ok(anything()));
    let config = result.unwrap();
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
    assert_that!(config.server.host.as_str(), eq(crate::DEFAULT_HOST));
    assert_eq!(config.apps_file_path(), temp.path().join("apps.json"));
    assert_eq!(config.app_logs_dir(), temp.path().join("logs"));
    assert_that!(config.log_file_path(), none());
}

#[test]
#[serial]
fn given_missing_config_dir_when_load_then_dir_is_created() {
    // Given
    let temp = tempfile::TempDir::new().unwrap();
    let nested = temp.path().join("a").join("b");
    let _guard = EnvGuard::set(crate::CONFIG_DIR_ENV, nested.to_str().unwrap());

    // When
    let config = Config::load().unwrap();

    // Then
    assert!(nested.is_dir());
    assert_eq!(config.dir, nested);
}

#[test]
#[serial]
fn given_toml_file_when_load_then_toml_values_are_used() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        r#"
            [server]
            port = 9500

            [apps]
            file = "state/apps.json"
            logs_dir = "app-logs"

            [logging]
            level = "debug"
            file = "lp-server.log"
        "#,
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9500));
    assert_eq!(config.apps_file_path(), temp.path().join("state/apps.json"));
    assert_eq!(config.app_logs_dir(), temp.path().join("app-logs"));
    assert_eq!(*config.logging.level, log::LevelFilter::Debug);
    assert_eq!(
        config.log_file_path(),
        Some(temp.path().join("log").join("lp-server.log"))
    );
}

#[test]
#[serial]
fn given_env_var_and_toml_when_load_then_env_var_wins() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server]\nport = 9500").unwrap();
    let _port = EnvGuard::set("LP_SERVER_PORT", "9600");
    let _host = EnvGuard::set("LP_SERVER_HOST", "0.0.0.0");
    let _colored = EnvGuard::set("LP_LOG_COLORED", "0");
    let _apps = EnvGuard::set("LP_APPS_FILE", "other.json");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9600));
    assert_eq!(config.bind_addr(), "0.0.0.0:9600");
    assert_that!(config.logging.colored, eq(false));
    assert_that!(config.apps.file.as_str(), eq("other.json"));
}

#[test]
#[serial]
fn given_unparseable_port_override_when_load_then_previous_value_kept() {
    // Given
    let (_temp, _guard) = setup_config_dir();
    let _port = EnvGuard::set("LP_SERVER_PORT", "not-a-port");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    std::fs::write(temp.path().join("config.toml"), "[server\nport = ").unwrap();

    // When
    let result = Config::load();

    // Then
    assert!(matches!(result, Err(crate::ConfigError::Toml { .. })));
}
