//! Preview server request handling.

use datadeck::sample::{self, SampleSpec};
use datadeck::server::PreviewServer;
use datadeck::settings::BuildSettings;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::PathBuf;
use tempfile::TempDir;

fn start_server() -> (TempDir, PreviewServer) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    let spec = SampleSpec {
        rows: 200,
        ..Default::default()
    };
    sample::write_csv(&path, &spec).unwrap();

    // Port 0 picks a free port
    let server = PreviewServer::start(
        PathBuf::from(&path),
        BuildSettings::default(),
        None,
        0,
    )
    .unwrap();
    (dir, server)
}

fn http_get(port: u16, path: &str) -> String {
    let mut stream = TcpStream::connect(("127.0.0.1", port)).unwrap();
    write!(
        stream,
        "GET {path} HTTP/1.1\r\nHost: 127.0.0.1\r\nConnection: close\r\n\r\n"
    )
    .unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

#[test]
fn test_serves_dashboard_html() {
    let (_dir, server) = start_server();

    let response = http_get(server.port(), "/");
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("text/html"));
    assert!(response.contains("window.DATADECK_CONFIG"));
}

#[test]
fn test_serves_config_json() {
    let (_dir, server) = start_server();

    let response = http_get(server.port(), "/config.json");
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("application/json"));
    assert!(response.contains("\"total_rows\": 200"));
}

#[test]
fn test_serves_csv_export() {
    let (_dir, server) = start_server();

    let response = http_get(server.port(), "/data.csv");
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.contains("time,width,height,angle,strength,category,status"));
}

#[test]
fn test_unknown_path_is_404() {
    let (_dir, server) = start_server();

    let response = http_get(server.port(), "/nope");
    assert!(response.starts_with("HTTP/1.1 404"));
}

#[test]
fn test_query_strings_are_ignored() {
    let (_dir, server) = start_server();

    let response = http_get(server.port(), "/?refresh=1");
    assert!(response.starts_with("HTTP/1.1 200"));
}

#[test]
fn test_url_reports_bound_port() {
    let (_dir, server) = start_server();
    assert_eq!(
        server.url(),
        format!("http://127.0.0.1:{}/", server.port())
    );
    assert_ne!(server.port(), 0);
}
