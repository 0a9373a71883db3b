//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a fixed set of paths. Each route has a HEAD status, a GET status
//! and a body; unknown paths answer 404 to everything.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone)]
pub struct Route {
    pub head_status: u16,
    pub get_status: u16,
    pub body: Vec<u8>,
}

impl Route {
    /// HEAD and GET answer 200; GET returns `body`.
    pub fn ok(body: Vec<u8>) -> Self {
        Route {
            head_status: 200,
            get_status: 200,
            body,
        }
    }

    /// HEAD answers 200 but GET answers `status` with an empty body.
    pub fn get_fails(status: u16) -> Self {
        Route {
            head_status: 200,
            get_status: status,
            body: Vec::new(),
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(path, route)| (path.to_string(), route))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// Starts a listener that accepts connections and never answers. Returns the
/// base URL. Accepted sockets are held open until the process exits.
pub fn start_silent() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on a port nothing listens on.
pub fn refused_url(path: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}{}", port, path)
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let path = parts.next().unwrap_or("/");

    let missing = Route {
        head_status: 404,
        get_status: 404,
        body: Vec::new(),
    };
    let route = routes.get(path).unwrap_or(&missing);

    let (status, body): (u16, &[u8]) = if method.eq_ignore_ascii_case("HEAD") {
        (route.head_status, &[])
    } else if method.eq_ignore_ascii_case("GET") {
        let body: &[u8] = if route.get_status == 200 { &route.body } else { &[] };
        (route.get_status, body)
    } else {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nConnection: close\r\n\r\n");
        return;
    };

    // HEAD advertises the length GET would send.
    let length = if route.get_status == 200 { route.body.len() } else { 0 };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n\
Content-Type: application/zip\r\nConnection: close\r\n\r\n",
        status,
        reason(status),
        length
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
