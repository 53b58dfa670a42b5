//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use albums_store::bookkeeping::Bookkeeper;
use albums_store::catalog::{CatalogServer, CatalogServiceConfig};
use albums_store::config::BookkeepingMode;
use albums_store::http::{AppState, HttpServer};
use albums_store::lifecycle::Shutdown;
use albums_store::store::MemoryStore;
use albums_store::upstream::CatalogClient;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// A running albums service backed by an in-memory store.
#[allow(dead_code)]
pub struct AlbumsService {
    pub addr: SocketAddr,
    pub store: MemoryStore,
    pub shutdown: Shutdown,
}

#[allow(dead_code)]
impl AlbumsService {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for AlbumsService {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the albums service against the catalog at `catalog_url`.
pub async fn start_albums(mode: BookkeepingMode, catalog_url: &str) -> AlbumsService {
    let store = MemoryStore::new();
    let state = AppState::new(
        CatalogClient::with_http_client(client(), catalog_url).unwrap(),
        Bookkeeper::new(mode, Arc::new(store.clone())),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = HttpServer::new(state).run(listener, server_shutdown).await;
    });

    AlbumsService {
        addr,
        store,
        shutdown,
    }
}

/// Start the mock catalog with a short latency window. Returns its base URL.
#[allow(dead_code)]
pub async fn start_catalog(shutdown: &Shutdown) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = CatalogServer::new(CatalogServiceConfig {
        latency_min_ms: 150,
        latency_max_ms: 250,
    });
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    format!("http://{}", addr)
}

/// Request heads received by a recording backend, lowercased.
#[allow(dead_code)]
pub type Recorded = Arc<Mutex<Vec<String>>>;

/// Start a raw backend that records each request head and answers with a
/// fixed status and body. Returns its base URL.
#[allow(dead_code)]
pub async fn start_recording_backend(status: &'static str, body: &'static str) -> (String, Recorded) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let recorded: Recorded = Arc::new(Mutex::new(Vec::new()));
    let log = recorded.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let log = log.clone();
                    tokio::spawn(async move {
                        let mut head = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => break,
                                Ok(n) => head.extend_from_slice(&buf[..n]),
                            }
                        }
                        log.lock()
                            .unwrap()
                            .push(String::from_utf8_lossy(&head).to_lowercase());

                        let response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    (format!("http://{}", addr), recorded)
}

/// A base URL nothing listens on.
#[allow(dead_code)]
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Read an unlabeled series from rendered Prometheus text. Missing series
/// read as zero.
#[allow(dead_code)]
pub fn read_counter(rendered: &str, name: &str) -> u64 {
    rendered
        .lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (metric, value) = line.split_once(' ')?;
            if metric == name {
                value.trim().parse::<f64>().ok()
            } else {
                None
            }
        })
        .map_or(0, |v| v as u64)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
