//! Minimal HTTP/1.1 stand-in for the Cloudflare speed test endpoints
//!
//! Serves `/locations`, `/cdn-cgi/trace`, `/__down` and `/__up` on a random
//! local port, one request per connection.

use std::sync::{Arc, Mutex};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

const LOCATIONS: &str = r#"[
    {"iata":"AMS","lat":52.3,"lon":4.76,"cca2":"NL","region":"Europe","city":"Amsterdam"},
    {"iata":"FRA","lat":50.0,"lon":8.5,"cca2":"DE","region":"Europe","city":"Frankfurt"}
]"#;

#[derive(Debug, Clone, Copy)]
pub struct StubOptions {
    /// Colo reported by `/cdn-cgi/trace`
    pub colo: &'static str,
    /// Answer every `/__down` with an empty body
    pub empty_downloads: bool,
}

impl Default for StubOptions {
    fn default() -> Self {
        Self {
            colo: "AMS",
            empty_downloads: false,
        }
    }
}

pub struct StubService {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StubService {
    /// Binds to 127.0.0.1 and serves in the background of the current runtime
    pub async fn start(options: StubOptions) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Stub listener should bind");
        let addr = listener.local_addr().expect("Stub should have an address");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let log = Arc::clone(&log);
                tokio::spawn(async move {
                    let _ = handle(socket, options, log).await;
                });
            }
        });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    /// `METHOD target` of every request served so far, in arrival order
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    mut socket: TcpStream,
    options: StubOptions,
    log: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 16 * 1024];

    let header_end = loop {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next().unwrap_or_default().split_whitespace();
    let method = request_line.next().unwrap_or_default().to_string();
    let target = request_line.next().unwrap_or_default().to_string();
    let content_length: usize = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse().ok())
        .unwrap_or(0);

    // Drain the request body so the client sees a complete exchange
    let mut body_read = buf.len() - header_end;
    while body_read < content_length {
        let n = socket.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        body_read += n;
    }

    log.lock().unwrap().push(format!("{method} {target}"));

    let (status, content_type, body) = route(&method, &target, options);
    let header = format!(
        "HTTP/1.1 {status}\r\nContent-Type: {content_type}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        body.len()
    );
    socket.write_all(header.as_bytes()).await?;
    socket.write_all(&body).await?;
    socket.shutdown().await?;
    Ok(())
}

fn route(method: &str, target: &str, options: StubOptions) -> (&'static str, &'static str, Vec<u8>) {
    let (path, query) = target.split_once('?').unwrap_or((target, ""));

    match (method, path) {
        ("GET", "/locations") => ("200 OK", "application/json", LOCATIONS.as_bytes().to_vec()),
        ("GET", "/cdn-cgi/trace") => (
            "200 OK",
            "text/plain",
            format!("fl=1f1\nh=localhost\nip=127.0.0.1\ncolo={}\nloc=NL\n", options.colo).into_bytes(),
        ),
        ("GET", "/__down") => {
            let size = query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .find(|(key, _)| *key == "bytes")
                .and_then(|(_, value)| value.parse::<usize>().ok())
                .unwrap_or(0);
            let size = if options.empty_downloads { 0 } else { size };
            ("200 OK", "application/octet-stream", vec![0u8; size])
        }
        ("POST", "/__up") => ("200 OK", "text/plain", Vec::new()),
        _ => ("404 Not Found", "text/plain", b"not found".to_vec()),
    }
}
