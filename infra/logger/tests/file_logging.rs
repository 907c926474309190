use forma_domain::config::LogSettings;
use forma_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn settings_with_directory_create_json_log_file() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let settings = LogSettings {
        console: false,
        json: true,
        directory: Some(log_dir.clone()),
        ..LogSettings::default()
    };

    let logger = Logger::from_settings("integration-file-logging", &settings)?.init()?;
    assert!(logger.writes_files());

    tracing::info!(tag = "Card", "hello from integration test");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let first = contents.lines().next().expect("at least one line");
    assert!(first.starts_with('{'), "file output should be JSON lines, got: {first}");
    assert!(first.contains("\"tag\":\"Card\""));

    Ok(())
}
