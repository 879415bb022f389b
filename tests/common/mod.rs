//! Shared utilities for integration testing against a mock task API.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// A hardened service: non-root, read-only root filesystem, NoNewPrivs set.
pub const HARDENED_INFO: &str = r#"{"uid": 1000, "readonly": true, "caps": {"NoNewPrivs": "1", "CapEff": "0000000000000000"}, "env": {"HOSTNAME": "api-1"}}"#;

/// A default container: root, writable filesystem, capabilities unknown.
pub const ROOT_INFO: &str = r#"{"uid": 0, "readonly": false, "caps": {"NoNewPrivs": "0", "CapEff": "00000000a80425fb"}, "env": {"HOSTNAME": "api-1"}}"#;

pub const TASKS: &str = r#"[{"id": 1, "title": "rotate keys", "done": false, "created_at": "2024-05-01T10:00:00"}]"#;

/// Responses for the three endpoints; anything else is a 404.
#[derive(Clone)]
pub struct MockRoutes {
    pub health: (u16, String),
    pub info: (u16, String),
    pub tasks: (u16, String),
}

impl MockRoutes {
    pub fn with_info(status: u16, body: &str) -> Self {
        Self {
            health: (200, r#"{"ok": true}"#.to_string()),
            info: (status, body.to_string()),
            tasks: (200, TASKS.to_string()),
        }
    }

    pub fn hardened() -> Self {
        Self::with_info(200, HARDENED_INFO)
    }

    pub fn root() -> Self {
        Self::with_info(200, ROOT_INFO)
    }

    fn respond(&self, path: &str) -> (u16, String) {
        match path {
            "/health" => self.health.clone(),
            "/security/info" => self.info.clone(),
            "/tasks" => self.tasks.clone(),
            _ => (404, r#"{"error": "not found"}"#.to_string()),
        }
    }
}

/// Start a mock API on an ephemeral port and return its address.
pub async fn start_mock_api(routes: MockRoutes) -> SocketAddr {
    start_mock_api_with_delay(routes, Duration::ZERO).await
}

/// Like [`start_mock_api`], but every response is held back by `delay`.
pub async fn start_mock_api_with_delay(routes: MockRoutes, delay: Duration) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let routes = Arc::new(routes);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let routes = routes.clone();
                    tokio::spawn(async move {
                        handle(socket, &routes, delay).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn handle(mut socket: TcpStream, routes: &MockRoutes, delay: Duration) {
    let mut buf = Vec::with_capacity(1024);
    let mut chunk = [0u8; 1024];
    while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
        match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => buf.extend_from_slice(&chunk[..n]),
        }
    }

    let head = String::from_utf8_lossy(&buf);
    let path = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/")
        .to_string();

    let (status, body) = routes.respond(&path);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    let reason = match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Status",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );
    let _ = socket.write_all(response.as_bytes()).await;
    let _ = socket.shutdown().await;
}

pub fn base_url(addr: SocketAddr) -> String {
    format!("http://{}", addr)
}

/// An address nothing is listening on.
pub async fn unused_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
