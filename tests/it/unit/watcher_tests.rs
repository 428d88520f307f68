//! Source file watching.

use datadeck::watcher::SourceWatcher;
use std::time::Duration;

#[test]
fn test_poll_is_quiet_without_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let watcher = SourceWatcher::new(path).unwrap();
    assert!(!watcher.poll());
}

#[test]
fn test_wait_timeout_expires() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let watcher = SourceWatcher::new(path).unwrap();
    let start = std::time::Instant::now();
    assert!(!watcher.wait_timeout(Duration::from_millis(50)));
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[test]
fn test_ignores_sibling_files() {
    let dir = tempfile::tempdir().unwrap();
    let watched = dir.path().join("data.csv");
    let sibling = dir.path().join("other.csv");
    std::fs::write(&watched, "a,b\n1,2\n").unwrap();

    let watcher = SourceWatcher::new(watched).unwrap();
    std::fs::write(&sibling, "c,d\n3,4\n").unwrap();
    // Give the backend a moment to deliver events for the sibling
    std::thread::sleep(Duration::from_millis(200));
    assert!(!watcher.poll());
}

// Depends on OS notification latency, so opt-in only.
#[test]
#[ignore]
fn test_detects_file_modification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    std::fs::write(&path, "a,b\n1,2\n").unwrap();

    let watcher = SourceWatcher::new(path.clone()).unwrap();
    std::thread::sleep(Duration::from_millis(100));
    std::fs::write(&path, "a,b\n1,2\n3,4\n").unwrap();

    assert!(watcher.wait_timeout(Duration::from_secs(5)));
}
