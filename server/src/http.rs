//! Minimal HTTP/1.1 plumbing over any async stream.
//!
//! Intentionally limited surface:
//! - One request per connection (no keep-alive)
//! - No chunked transfer encoding (rejected)
//! - POST requires Content-Length
//! - Header cap: 32 KiB, body cap: 1 MiB

use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum header section size.
const MAX_HEADER_SIZE: usize = 32 * 1024;

/// Maximum request body size.
const MAX_BODY_SIZE: usize = 1_048_576;

/// Parsed HTTP request, independent of transport.
#[derive(Debug)]
pub struct HttpRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Returns a header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP response to write back.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Builds a JSON response.
    pub fn json(status: u16, value: &impl Serialize) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_owned(), "application/json".to_owned())],
            body: serde_json::to_vec(value).unwrap_or_default(),
        }
    }
}

/// Reason phrase for the status codes this crate emits.
fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// Reads and parses one request from `stream`.
///
/// Returns `None` when the connection closed before any bytes arrived.
/// Returns `Some(Err(reason))` for requests that cannot be served; the
/// caller picks the status code to answer with.
pub async fn read_request<S>(stream: &mut S) -> Option<Result<HttpRequest, String>>
where
    S: AsyncRead + Unpin,
{
    // Byte-at-a-time keeps body bytes out of the header read. Callers wrap
    // the stream in a BufReader so this does not hit the socket per byte.
    let mut header_buf = Vec::with_capacity(4096);
    let mut byte = [0u8; 1];

    loop {
        match stream.read(&mut byte).await {
            Ok(0) => {
                if header_buf.is_empty() {
                    return None;
                }
                return Some(Err("connection closed mid-request".to_owned()));
            }
            Ok(_) => {
                header_buf.push(byte[0]);
                if header_buf.len() > MAX_HEADER_SIZE {
                    return Some(Err("headers too large".to_owned()));
                }
                if header_buf.ends_with(b"\r\n\r\n") {
                    break;
                }
            }
            Err(err) => {
                if header_buf.is_empty() {
                    return None;
                }
                return Some(Err(format!("read error: {err}")));
            }
        }
    }

    let mut parsed_headers = [httparse::EMPTY_HEADER; 64];
    let mut parsed = httparse::Request::new(&mut parsed_headers);
    match parsed.parse(&header_buf) {
        Ok(httparse::Status::Complete(_)) => {}
        Ok(httparse::Status::Partial) => {
            return Some(Err("incomplete HTTP request".to_owned()));
        }
        Err(err) => {
            return Some(Err(format!("HTTP parse error: {err}")));
        }
    }

    let method = parsed.method.unwrap_or("").to_owned();
    let path = parsed.path.unwrap_or("/").to_owned();

    let mut headers = Vec::new();
    let mut content_length: Option<usize> = None;
    let mut chunked = false;
    for header in &*parsed.headers {
        let name = header.name.to_owned();
        let value = String::from_utf8_lossy(header.value).into_owned();

        if name.eq_ignore_ascii_case("Content-Length") {
            content_length = value.trim().parse().ok();
        }
        if name.eq_ignore_ascii_case("Transfer-Encoding")
            && value.to_ascii_lowercase().contains("chunked")
        {
            chunked = true;
        }

        headers.push((name, value));
    }

    if chunked {
        return Some(Err("chunked transfer encoding not supported".to_owned()));
    }

    let body = if matches!(method.as_str(), "POST" | "PUT" | "PATCH") {
        match content_length {
            Some(length) if length > MAX_BODY_SIZE => {
                return Some(Err("request body too large".to_owned()));
            }
            Some(length) => {
                let mut body = vec![0u8; length];
                if let Err(err) = stream.read_exact(&mut body).await {
                    return Some(Err(format!("read error: {err}")));
                }
                body
            }
            None => {
                return Some(Err("POST requires Content-Length".to_owned()));
            }
        }
    } else {
        Vec::new()
    };

    Some(Ok(HttpRequest {
        method,
        path,
        headers,
        body,
    }))
}

/// Writes `response` framed with Content-Length and `Connection: close`.
pub async fn write_response<S>(stream: &mut S, response: &HttpResponse)
where
    S: AsyncWrite + Unpin,
{
    let mut head = format!(
        "HTTP/1.1 {} {}\r\n",
        response.status,
        reason(response.status)
    );
    head.push_str(&format!("Content-Length: {}\r\n", response.body.len()));
    head.push_str("Connection: close\r\n");
    for (name, value) in &response.headers {
        head.push_str(&format!("{name}: {value}\r\n"));
    }
    head.push_str("\r\n");

    // The client may have disconnected already; nothing useful to do then.
    let _ = stream.write_all(head.as_bytes()).await;
    if !response.body.is_empty() {
        let _ = stream.write_all(&response.body).await;
    }
    let _ = stream.flush().await;
}
