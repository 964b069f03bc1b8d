use crate::Config;

use serial_test::serial;

fn valid_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = Some("0123456789abcdef0123456789abcdef".to_string());
    config
}

#[test]
fn given_default_config_with_secret_when_validated_then_ok() {
    let config = valid_config();
    assert!(config.validate().is_ok());
}

#[test]
fn given_absolute_database_path_when_validated_then_error() {
    let mut config = valid_config();
    config.database.path = "/etc/loghawk.db".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn given_parent_traversal_database_path_when_validated_then_error() {
    let mut config = valid_config();
    config.database.path = "../escape.db".to_string();
    assert!(config.validate().is_err());
}

#[test]
#[serial]
fn given_config_dir_env_var_when_resolved_then_used() {
    let dir = tempfile::tempdir().unwrap();
    unsafe {
        std::env::set_var("LH_CONFIG_DIR", dir.path());
    }

    let resolved = Config::config_dir().unwrap();
    assert_eq!(resolved, dir.path());

    unsafe {
        std::env::remove_var("LH_CONFIG_DIR");
    }
}

#[test]
#[serial]
fn given_toml_file_when_loaded_then_values_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        r#"
[server]
port = 9100

[websocket]
heartbeat_interval_secs = 25
"#,
    )
    .unwrap();
    unsafe {
        std::env::set_var("LH_CONFIG_DIR", dir.path());
    }

    let config = Config::load().unwrap();
    assert_eq!(config.server.port, 9100);
    assert_eq!(config.websocket.heartbeat_interval_secs, 25);

    unsafe {
        std::env::remove_var("LH_CONFIG_DIR");
    }
}
