use forma_domain::config::LogSettings;
use forma_logger::{Logger, LoggerError};

#[test]
fn loaded_settings_install_one_stderr_subscriber() {
    let settings = LogSettings { level: "warn".to_owned(), ..LogSettings::default() };

    let bad = LogSettings { level: "chatty".to_owned(), ..settings.clone() };
    let err = Logger::from_settings("forma-cli", &bad).expect_err("unknown level is rejected early");
    assert_eq!(err.kind(), "InvalidConfiguration");

    let logger = Logger::from_settings("forma-cli", &settings)
        .expect("valid settings")
        .stderr(true)
        .init()
        .expect("first init installs the subscriber");
    assert!(!logger.writes_files());

    let err = Logger::from_settings("forma-cli-again", &settings)
        .expect("valid settings")
        .init()
        .expect_err("the global subscriber is already set");
    assert!(matches!(err, LoggerError::Subscriber { .. }), "unexpected error: {err}");
}
