use assert_cmd::Command;
use std::io::Write;
use tempfile::NamedTempFile;

pub const DOCUMENT: &str = r#"{"tagName":"Card","version":"1.2.0","data":{"title":"Hello","footer":{"tagName":"Button","data":{"label":"Ok"}}}}"#;

pub const RECORDS: &str = r#"{
    "records": { "site": { "name": "Forma" } },
    "collections": { "user": [{ "name": "Ann", "roles": ["admin"] }] }
}"#;

/// The `forma` binary with logging quietened so stdout only carries command output.
pub fn forma() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_forma"));
    command.args(["--log-level", "error"]);
    command
}

pub fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}
