//! Local preview server.
//!
//! Serves the built dashboard over HTTP on localhost and rebuilds it when
//! the source data file changes, so a browser refresh picks up new data.
//!
//! Routes:
//! - `/` - dashboard HTML
//! - `/config.json` - explorer configuration
//! - `/data.csv` - CSV export of the source data
//!
//! The accept loop runs on a dedicated thread and polls with a timeout so
//! the shutdown flag is honored promptly.

use crate::constants::{REBUILD_DEBOUNCE_MS, SERVER_POLL_MS};
use crate::dashboard::build_dashboard;
use crate::data::{DataError, DataResult, Dataset};
use crate::settings::BuildSettings;
use crate::watcher::SourceWatcher;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tiny_http::{Header, Response, Server, StatusCode};

/// Helper to create HTTP headers, returning None if the bytes are invalid
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

/// Everything the server hands out, rebuilt on source change.
struct ServedContent {
    html: String,
    config_json: String,
    csv: String,
}

fn build_content(
    source: &PathBuf,
    settings: &BuildSettings,
    template: Option<&PathBuf>,
) -> DataResult<ServedContent> {
    let dataset = Dataset::from_path(source)?;
    let build = build_dashboard(&dataset, settings, template.map(|p| p.as_path()))?;
    Ok(ServedContent {
        config_json: serde_json::to_string_pretty(&build.config)?,
        csv: dataset.to_csv_string()?,
        html: build.html,
    })
}

/// Local HTTP preview server with rebuild-on-change.
pub struct PreviewServer {
    port: u16,
    shutdown: Arc<AtomicBool>,
    accept_thread: Option<JoinHandle<()>>,
    watch_thread: Option<JoinHandle<()>>,
}

impl PreviewServer {
    /// Build the dashboard and start serving it on `127.0.0.1:port`.
    /// Port 0 picks a free port.
    pub fn start(
        source: PathBuf,
        settings: BuildSettings,
        template: Option<PathBuf>,
        port: u16,
    ) -> DataResult<Self> {
        let content = Arc::new(RwLock::new(build_content(
            &source,
            &settings,
            template.as_ref(),
        )?));

        let addr = format!("127.0.0.1:{}", port);
        let server =
            Server::http(&addr).map_err(|e| DataError::Other(format!("bind {addr}: {e}")))?;
        let bound_port = server
            .server_addr()
            .to_ip()
            .map(|a| a.port())
            .unwrap_or(port);

        let shutdown = Arc::new(AtomicBool::new(false));

        let accept_thread = {
            let content = content.clone();
            let shutdown = shutdown.clone();
            thread::spawn(move || {
                accept_loop(server, content, shutdown);
            })
        };

        let watch_thread = {
            let content = content.clone();
            let shutdown = shutdown.clone();
            let source = source.clone();
            thread::spawn(move || {
                watch_loop(source, settings, template, content, shutdown);
            })
        };

        tracing::info!("Preview server listening on http://127.0.0.1:{}", bound_port);

        Ok(Self {
            port: bound_port,
            shutdown,
            accept_thread: Some(accept_thread),
            watch_thread: Some(watch_thread),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("http://127.0.0.1:{}/", self.port)
    }

    /// Block until the server threads exit (they run until shutdown).
    pub fn join(mut self) {
        if let Some(handle) = self.accept_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.watch_thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for PreviewServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        if let Some(handle) = self.accept_thread.take() {
            let _ = handle.join();
        }
        if let Some(handle) = self.watch_thread.take() {
            let _ = handle.join();
        }
    }
}

fn accept_loop(server: Server, content: Arc<RwLock<ServedContent>>, shutdown: Arc<AtomicBool>) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        match server.recv_timeout(Duration::from_millis(SERVER_POLL_MS)) {
            Ok(Some(request)) => {
                let raw_path = request.url().split('?').next().unwrap_or("/");
                let path = urlencoding::decode(raw_path)
                    .map(|p| p.into_owned())
                    .unwrap_or_else(|_| raw_path.to_string());

                let guard = content.read();
                let (body, mime): (&str, &str) = match path.as_str() {
                    "/" | "/index.html" => (&guard.html, "text/html; charset=utf-8"),
                    "/config.json" => (&guard.config_json, "application/json"),
                    "/data.csv" => (&guard.csv, "text/csv"),
                    _ => {
                        let _ = request.respond(Response::empty(StatusCode(404)));
                        continue;
                    }
                };

                let mut response = Response::from_string(body);
                if let Some(header) = create_header(&b"Content-Type"[..], mime.as_bytes()) {
                    response = response.with_header(header);
                }
                let _ = request.respond(response);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::error!("Accept loop error: {}", e);
                break;
            }
        }
    }
}

fn watch_loop(
    source: PathBuf,
    settings: BuildSettings,
    template: Option<PathBuf>,
    content: Arc<RwLock<ServedContent>>,
    shutdown: Arc<AtomicBool>,
) {
    let watcher = match SourceWatcher::new(source.clone()) {
        Ok(w) => w,
        Err(e) => {
            tracing::warn!("File watching disabled: {}", e);
            return;
        }
    };

    loop {
        if shutdown.load(Ordering::Relaxed) {
            break;
        }

        if watcher.wait_timeout(Duration::from_millis(SERVER_POLL_MS)) {
            // Let the writer finish, then drain bursts of events
            thread::sleep(Duration::from_millis(REBUILD_DEBOUNCE_MS));
            watcher.poll();

            match build_content(&source, &settings, template.as_ref()) {
                Ok(new_content) => {
                    *content.write() = new_content;
                    tracing::info!("Rebuilt dashboard after change to {}", source.display());
                }
                Err(e) => {
                    // Keep serving the last good build
                    tracing::error!("Rebuild failed, keeping previous build: {}", e);
                }
            }
        }
    }
}
