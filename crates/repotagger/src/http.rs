//! Transport boundary for outbound HTTP.
//!
//! Everything that talks to the remote API goes through [`HttpTransport`], so
//! the fetcher can be exercised against [`MockTransport`] without sockets.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// HTTP headers represented as key/value pairs.
///
/// Header names are treated case-insensitively by helper functions.
pub type HttpHeaders = Vec<(String, String)>;

/// A GET request for one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: HttpHeaders,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HttpHeaders,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        header_get(&self.headers, name)
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("http transport error: {0}")]
    Transport(String),

    #[error("no mock response registered for {url}")]
    NoMockResponse { url: String },
}

/// Transport boundary for all HTTP I/O.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError>;
}

/// Get the first header value matching `name` (case-insensitive).
#[must_use]
pub fn header_get<'a>(headers: &'a HttpHeaders, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Default per-request timeout for [`ReqwestTransport`].
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A real HTTP transport backed by a single pooled `reqwest::Client`.
///
/// Clone it freely: clones share the same connection pool.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HttpError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let mut builder = self.client.get(&request.url);
        for (k, v) in request.headers {
            builder = builder.header(&k, &v);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        let headers: HttpHeaders = resp
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    value.to_str().unwrap_or_default().to_string(),
                )
            })
            .collect();

        let body = resp
            .bytes()
            .await
            .map_err(|e| HttpError::Transport(e.to_string()))?
            .to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

// ---------- Test-only mock transport ----------

#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransport;

#[cfg(any(test, feature = "test-util"))]
mod mock {
    use std::collections::{HashMap, VecDeque};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::{HttpError, HttpRequest, HttpResponse, HttpTransport};

    /// In-memory mock transport.
    ///
    /// No sockets: responses are registered per URL and handed out in FIFO
    /// order. A URL with nothing registered yields [`HttpError::NoMockResponse`],
    /// which doubles as a convenient way to simulate a failing page.
    #[derive(Clone, Default)]
    pub struct MockTransport {
        inner: Arc<Mutex<MockTransportInner>>,
    }

    #[derive(Default)]
    struct MockTransportInner {
        routes: HashMap<String, VecDeque<HttpResponse>>,
        requests: Vec<HttpRequest>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self::default()
        }

        /// Register a response for a URL.
        pub fn push_response(&self, url: impl Into<String>, response: HttpResponse) {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner
                .routes
                .entry(url.into())
                .or_default()
                .push_back(response);
        }

        /// Register a 200 response with a JSON body and optional extra headers.
        pub fn push_json(
            &self,
            url: impl Into<String>,
            headers: Vec<(&str, &str)>,
            body: &serde_json::Value,
        ) {
            self.push_response(
                url,
                HttpResponse {
                    status: 200,
                    headers: headers
                        .into_iter()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    body: body.to_string().into_bytes(),
                },
            );
        }

        /// Register an empty-bodied response with the given status.
        pub fn push_status(&self, url: impl Into<String>, status: u16) {
            self.push_response(
                url,
                HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: Vec::new(),
                },
            );
        }

        #[must_use]
        pub fn requests(&self) -> Vec<HttpRequest> {
            let inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");
            inner.requests.clone()
        }
    }

    #[async_trait]
    impl HttpTransport for MockTransport {
        async fn get(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
            let mut inner = self
                .inner
                .lock()
                .expect("mock transport lock should not be poisoned");

            let url = request.url.clone();
            inner.requests.push(request);

            match inner.routes.get_mut(&url).and_then(|q| q.pop_front()) {
                Some(resp) => Ok(resp),
                None => Err(HttpError::NoMockResponse { url }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_get_is_case_insensitive_and_returns_first_match() {
        let headers: HttpHeaders = vec![
            ("Link".to_string(), "<a>; rel=\"last\"".to_string()),
            ("link".to_string(), "<b>; rel=\"last\"".to_string()),
        ];
        assert_eq!(header_get(&headers, "link"), Some("<a>; rel=\"last\""));
        assert_eq!(header_get(&headers, "LINK"), Some("<a>; rel=\"last\""));
        assert_eq!(header_get(&headers, "missing"), None);
    }

    #[test]
    fn http_response_success_range() {
        let mut resp = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: Vec::new(),
        };
        assert!(resp.is_success());
        resp.status = 204;
        assert!(resp.is_success());
        resp.status = 404;
        assert!(!resp.is_success());
        resp.status = 302;
        assert!(!resp.is_success());
    }

    #[tokio::test]
    async fn mock_transport_returns_registered_response_and_records_request() {
        let transport = MockTransport::new();
        let url = "https://example.com/api";
        transport.push_json(url, vec![("X-Test", "ok")], &serde_json::json!([]));

        let req = HttpRequest::get(url).header("Accept", "application/json");
        let resp = transport.get(req.clone()).await.expect("mock response");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("x-test"), Some("ok"));
        assert_eq!(resp.body, b"[]".to_vec());

        assert_eq!(transport.requests(), vec![req]);
    }

    #[tokio::test]
    async fn mock_transport_errors_when_no_response_is_registered() {
        let transport = MockTransport::new();
        let err = transport
            .get(HttpRequest::get("https://example.com/missing"))
            .await
            .expect_err("missing mock should error");
        match err {
            HttpError::NoMockResponse { url } => {
                assert_eq!(url, "https://example.com/missing");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn reqwest_transport_reads_status_headers_and_body() {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().expect("accept");
            stream
                .set_read_timeout(Some(Duration::from_secs(2)))
                .expect("set_read_timeout");

            let mut buf = Vec::new();
            let mut tmp = [0u8; 4096];
            loop {
                match stream.read(&mut tmp) {
                    Ok(0) => break,
                    Ok(n) => {
                        buf.extend_from_slice(&tmp[..n]);
                        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            break;
                        }
                    }
                    Err(e)
                        if e.kind() == std::io::ErrorKind::WouldBlock
                            || e.kind() == std::io::ErrorKind::TimedOut =>
                    {
                        break;
                    }
                    Err(e) => panic!("read request: {e}"),
                }
            }

            let req_text = String::from_utf8_lossy(&buf);
            assert!(
                req_text.starts_with("GET /starred?page=1 "),
                "unexpected request line: {req_text:?}"
            );
            assert!(
                req_text.to_lowercase().contains("x-test: 1"),
                "expected x-test header"
            );

            let body = b"[]";
            let response = format!(
                "HTTP/1.1 200 OK\r\nLink: <http://x/starred?page=3>; rel=\"last\"\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            stream
                .write_all(response.as_bytes())
                .expect("write headers");
            stream.write_all(body).expect("write body");
            stream.flush().ok();
        });

        let transport = ReqwestTransport::with_timeout(Duration::from_secs(5))
            .expect("reqwest transport should build");
        let req = HttpRequest::get(format!("http://{addr}/starred?page=1")).header("X-Test", "1");

        let resp = transport.get(req).await.expect("transport should succeed");
        assert_eq!(resp.status, 200);
        assert_eq!(resp.header("link"), Some("<http://x/starred?page=3>; rel=\"last\""));
        assert_eq!(resp.body, b"[]".to_vec());

        handle.join().expect("server thread");
    }

    #[tokio::test]
    async fn reqwest_transport_returns_transport_error_for_invalid_url() {
        let transport = ReqwestTransport::new(reqwest::Client::new());
        let err = transport
            .get(HttpRequest::get("not a url"))
            .await
            .expect_err("expected error");
        assert!(matches!(err, HttpError::Transport(_)));
    }
}
