//! Minimal HTTP/1.1 server for dispatcher integration tests.
//!
//! Serves a scripted sequence of responses, one per request; once the
//! script runs out, the last response repeats. A response can carry an
//! artificial delay to force client-side timeouts. Every request is
//! recorded for assertions.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use typesense::NodeConfig;

#[derive(Debug, Clone)]
pub struct ScriptedResponse {
    pub status: u32,
    pub content_type: String,
    pub body: String,
    /// Sleep this long before answering (simulates a hung server).
    pub delay: Option<Duration>,
}

impl ScriptedResponse {
    pub fn json(status: u32, body: &str) -> Self {
        Self {
            status,
            content_type: "application/json".to_string(),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u32, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain".to_string(),
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn hang(seconds: u64) -> Self {
        Self {
            delay: Some(Duration::from_secs(seconds)),
            ..Self::json(200, "{}")
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Request target as sent: path plus query string.
    pub target: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Default)]
struct ServerState {
    requests: Vec<RecordedRequest>,
}

/// One mock node. Runs until the process exits.
pub struct MockServer {
    port: u16,
    state: Arc<Mutex<ServerState>>,
}

impl MockServer {
    pub fn node_config(&self) -> NodeConfig {
        NodeConfig::new("http", "127.0.0.1", self.port)
    }

    /// Number of requests that reached this node.
    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().requests.len()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }
}

/// Start a node serving `script`, one entry per request in order, with
/// the last entry repeating once the script is exhausted.
pub fn start(script: Vec<ScriptedResponse>) -> MockServer {
    assert!(!script.is_empty(), "script must have at least one response");
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let state = Arc::new(Mutex::new(ServerState::default()));

    let accept_state = Arc::clone(&state);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&accept_state);
            let script = script.clone();
            thread::spawn(move || handle(stream, &state, &script));
        }
    });

    MockServer { port, state }
}

fn handle(mut stream: TcpStream, state: &Mutex<ServerState>, script: &[ScriptedResponse]) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let request = match read_request(&mut stream) {
        Some(r) => r,
        None => return,
    };

    let response = {
        let mut state = state.lock().unwrap();
        let index = state.requests.len().min(script.len() - 1);
        state.requests.push(request);
        script[index].clone()
    };

    if let Some(delay) = response.delay {
        thread::sleep(delay);
    }

    let head = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason(response.status),
        response.content_type,
        response.body.len()
    );
    let _ = stream.write_all(head.as_bytes());
    let _ = stream.write_all(response.body.as_bytes());
}

/// Read one request: header block, then as much body as `Content-Length`
/// announces.
fn read_request(stream: &mut TcpStream) -> Option<RecordedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];
    let header_end = loop {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_header_end(&buf) {
            break pos;
        }
        if buf.len() > 1024 * 1024 {
            return None;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).into_owned();
    let mut lines = head.lines();
    let request_line = lines.next()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let target = parts.next()?.to_string();

    let headers: Vec<(String, String)> = lines
        .filter_map(|line| {
            line.split_once(':')
                .map(|(n, v)| (n.trim().to_string(), v.trim().to_string()))
        })
        .collect();

    let content_length: usize = headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, v)| v.parse().ok())
        .unwrap_or(0);

    let mut body = buf[header_end + 4..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Some(RecordedRequest {
        method,
        target,
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn reason(status: u32) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
