//! Canned HTTP fixture for LiveDNS exchange tests
//!
//! [`CannedServer`] listens on a loopback port and answers each incoming
//! connection with the next scripted response, recording the raw requests.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

/// One request as seen on the wire
#[derive(Debug, Clone)]
pub struct SeenRequest {
    /// Request line, e.g. `GET /v5/livedns/domains/example.com/records/www HTTP/1.1`
    pub request_line: String,
    /// Header block, lowercased
    pub headers: String,
    pub body: String,
}

impl SeenRequest {
    pub fn has_header(&self, name: &str, value: &str) -> bool {
        let wanted = format!("{}: {}", name, value).to_lowercase();
        self.headers.lines().any(|line| line.trim() == wanted)
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }
}

pub struct CannedServer {
    pub base_url: String,
    handle: JoinHandle<Vec<SeenRequest>>,
}

impl CannedServer {
    /// Serve `responses` in order, one per connection, then stop
    pub async fn start(responses: Vec<(u16, &'static str)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind loopback");
        let base_url = format!("http://{}", listener.local_addr().expect("local addr"));

        let handle = tokio::spawn(async move {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.expect("accept");
                seen.push(read_request(&mut stream).await);

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).await.expect("write response");
                stream.shutdown().await.ok();
            }
            seen
        });

        Self { base_url, handle }
    }

    /// Requests received; waits for every scripted response to be served
    pub async fn requests(self) -> Vec<SeenRequest> {
        self.handle.await.expect("server task")
    }
}

async fn read_request(stream: &mut TcpStream) -> SeenRequest {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 2048];

    let header_end = loop {
        let n = stream.read(&mut chunk).await.expect("read request");
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let mut lines = head.lines();
    let request_line = lines.next().unwrap_or_default().to_string();
    let headers = lines.collect::<Vec<_>>().join("\n").to_lowercase();

    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map(|value| value.trim().parse::<usize>().expect("numeric content-length"))
        .unwrap_or(0);

    let body_start = header_end + 4;
    while buf.len() < body_start + content_length {
        let n = stream.read(&mut chunk).await.expect("read body");
        assert!(n > 0, "client closed before sending body");
        buf.extend_from_slice(&chunk[..n]);
    }

    SeenRequest {
        request_line,
        headers,
        body: String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string(),
    }
}
