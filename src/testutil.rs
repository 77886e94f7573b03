// src/testutil.rs
// =============================================================================
// A tiny HTTP/1.1 server for tests, so nothing needs the real internet.
//
// - Serves a fixed set of routes (path -> status, body, optional delay)
// - Unknown paths get a 404
// - Counts how many requests each path received
// - Every response closes its connection
//
// The server runs on the test's tokio runtime and goes away with it.
// =============================================================================

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use url::Url;

use crate::checker::Fetcher;

#[derive(Debug, Clone)]
pub struct Route {
    status: u16,
    body: Vec<u8>,
    delay: Option<Duration>,
}

impl Route {
    pub fn ok(body: &str) -> Self {
        Self {
            status: 200,
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    pub fn bytes(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            delay: None,
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
            delay: None,
        }
    }

    /// Waits this long before sending anything back.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

pub struct TestServer {
    base: Url,
    routes: Arc<RwLock<HashMap<String, Route>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
}

impl TestServer {
    pub async fn start(routes: Vec<(&str, Route)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let port = listener.local_addr().expect("local addr").port();
        let base = Url::parse(&format!("http://127.0.0.1:{}/", port)).expect("base url");

        let routes: Arc<RwLock<HashMap<String, Route>>> = Arc::new(RwLock::new(
            routes
                .into_iter()
                .map(|(path, route)| (path.to_string(), route))
                .collect(),
        ));
        let hits = Arc::new(Mutex::new(HashMap::new()));

        let server_routes = Arc::clone(&routes);
        let server_hits = Arc::clone(&hits);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let routes = Arc::clone(&server_routes);
                let hits = Arc::clone(&server_hits);
                tokio::spawn(async move { handle(stream, &routes, &hits).await });
            }
        });

        Self { base, routes, hits }
    }

    /// Adds or replaces a route after the server has started, for pages
    /// that need to embed the server's own address.
    pub fn add_route(&self, path: &str, route: Route) {
        let mut routes = self.routes.write().expect("routes lock");
        routes.insert(path.to_string(), route);
    }

    pub fn url(&self, path: &str) -> Url {
        self.base.join(path).expect("join test path")
    }

    /// Number of requests received for a path.
    pub fn hits(&self, path: &str) -> usize {
        let hits = self.hits.lock().expect("hits lock");
        hits.get(path).copied().unwrap_or(0)
    }
}

async fn handle(
    mut stream: TcpStream,
    routes: &RwLock<HashMap<String, Route>>,
    hits: &Mutex<HashMap<String, usize>>,
) {
    let mut request = Vec::new();
    let mut buf = [0u8; 4096];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        match stream.read(&mut buf).await {
            Ok(0) | Err(_) => return,
            Ok(n) => request.extend_from_slice(&buf[..n]),
        }
    }

    let request = String::from_utf8_lossy(&request);
    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let path = target.split('?').next().unwrap_or("/").to_string();

    *hits.lock().expect("hits lock").entry(path.clone()).or_insert(0) += 1;

    let route = routes.read().expect("routes lock").get(&path).cloned();
    let route = route.unwrap_or_else(|| Route {
        status: 404,
        body: b"not found".to_vec(),
        delay: None,
    });

    if let Some(delay) = route.delay {
        tokio::time::sleep(delay).await;
    }

    let head = format!(
        concat!(
            "HTTP/1.1 {} {}\r\n",
            "Content-Type: text/html; charset=utf-8\r\n",
            "Content-Length: {}\r\n",
            "Connection: close\r\n\r\n",
        ),
        route.status,
        reason(route.status),
        route.body.len()
    );
    let _ = stream.write_all(head.as_bytes()).await;
    let _ = stream.write_all(&route.body).await;
    let _ = stream.shutdown().await;
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

/// A fetcher that never goes through a proxy, whatever the environment says.
pub fn fetcher() -> Fetcher {
    let client = reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("test client");
    Fetcher::from_client(client)
}

/// A local URL nothing is listening on.
pub async fn unused_local_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    Url::parse(&format!("http://127.0.0.1:{}/gone.png", port)).expect("unused url")
}
