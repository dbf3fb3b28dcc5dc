// Own test binary: the global tracing subscriber can only be installed once.
use get_serious::logging::init_file_logging;
use tempfile::tempdir;

#[test]
fn file_logging_writes_events() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("get-serious.log");

    init_file_logging(&path, "info").unwrap();
    tracing::info!(answer = 42, "hello from the log test");

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("hello from the log test"));
    assert!(written.contains("answer=42"));

    // a second install is refused rather than silently replacing the first
    assert!(init_file_logging(&path, "info").is_err());
}
