//! Common test utilities for hostparam integration tests.
//!
//! `StubStore` is a minimal in-process HTTP server standing in for the
//! remote parameter store. It serves canned responses and records every
//! request it receives, so tests can assert exactly which writes were
//! issued (or that none were).

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;

use assert_cmd::Command;

/// One recorded HTTP request.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Canned behavior for the stub store.
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Status for `GET /api/v2/hosts/{host}`
    pub host_status: u16,

    /// Body for `GET .../parameters/{name}`; `None` answers 404
    pub param_body: Option<String>,

    /// Status for POST/PUT/DELETE
    pub write_status: u16,

    /// Body for POST/PUT/DELETE
    pub write_body: String,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            host_status: 200,
            param_body: None,
            write_status: 200,
            write_body: "{}".to_string(),
        }
    }
}

/// An in-process parameter store serving one behavior for the test's
/// lifetime. The listener thread exits with the test process.
pub struct StubStore {
    pub url: String,
    requests: Arc<Mutex<Vec<Request>>>,
}

impl StubStore {
    pub fn spawn(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let request = read_request(&mut stream);
                let response = route(&behavior, &request);
                let _ = stream.write_all(response.as_bytes());
                recorded.lock().unwrap().push(request);
            }
        });

        Self { url, requests }
    }

    /// Every request received so far.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Only the write requests (POST/PUT/DELETE).
    pub fn writes(&self) -> Vec<Request> {
        self.requests()
            .into_iter()
            .filter(|r| r.method != "GET")
            .collect()
    }

    /// Get a Command for the hostparam binary pointed at this stub with
    /// test credentials.
    pub fn hostparam(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hostparam"));
        cmd.args(["--url", &self.url, "--user", "admin", "--password", "secret"]);
        cmd
    }
}

/// A parameter sub-resource body for a parameter that exists.
pub fn param_record(value: &str, id: u64) -> Option<String> {
    Some(format!(
        r#"{{"id": {}, "name": "i_like", "value": "{}"}}"#,
        id, value
    ))
}

fn read_request(stream: &mut TcpStream) -> Request {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    // Read until the end of headers
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = find_subslice(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let request_line = head.lines().next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let path = parts.next().unwrap_or_default().to_string();

    let content_length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            if name.eq_ignore_ascii_case("content-length") {
                value.trim().parse::<usize>().ok()
            } else {
                None
            }
        })
        .unwrap_or(0);

    let mut body = buf[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }

    Request {
        method,
        path,
        body: String::from_utf8_lossy(&body).to_string(),
    }
}

fn route(behavior: &Behavior, request: &Request) -> String {
    if request.method == "GET" && !request.path.contains("/parameters/") {
        return respond(behavior.host_status, "{}");
    }

    if request.method == "GET" {
        return match &behavior.param_body {
            Some(body) => respond(200, body),
            None => respond(404, r#"{"error": {"message": "Parameter not found"}}"#),
        };
    }

    respond(behavior.write_status, &behavior.write_body)
}

fn respond(status: u16, body: &str) -> String {
    format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    )
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
