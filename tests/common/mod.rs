#![allow(dead_code)]

pub mod test_server {
    use review_analyzer::sentiment::{LexiconScorer, SentimentScorer};
    use review_analyzer::server::{HttpServer, ReviewService, ServerHandle};
    use review_analyzer::store::ReviewStore;
    use std::io::Write;
    use std::net::{SocketAddr, TcpListener};
    use std::sync::{Arc, Once};

    /// Ensures May coroutines are configured only once
    static MAY_INIT: Once = Once::new();

    pub fn setup_may_runtime() {
        MAY_INIT.call_once(|| {
            may::config().set_stack_size(0x8000);
        });
    }

    /// Review service on a random local port, stopped on drop.
    pub struct ReviewTestServer {
        handle: Option<ServerHandle>,
        addr: SocketAddr,
        store: Arc<ReviewStore>,
    }

    impl ReviewTestServer {
        /// Empty store, lexicon scorer.
        pub fn new() -> Self {
            Self::start(Arc::new(ReviewStore::new()), Arc::new(LexiconScorer::new()))
        }

        /// Store seeded from CSV text through the real dataset loader.
        pub fn from_csv(csv: &str, scorer: Arc<dyn SentimentScorer>) -> Self {
            let mut file = tempfile::NamedTempFile::new().unwrap();
            file.write_all(csv.as_bytes()).unwrap();
            file.flush().unwrap();
            let store = Arc::new(ReviewStore::load(file.path()));
            Self::start(store, scorer)
        }

        pub fn start(store: Arc<ReviewStore>, scorer: Arc<dyn SentimentScorer>) -> Self {
            setup_may_runtime();
            let service = ReviewService::new(Arc::clone(&store), scorer);

            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let handle = HttpServer(service).start(addr).unwrap();
            handle.wait_ready().unwrap();

            Self {
                handle: Some(handle),
                addr,
                store,
            }
        }

        pub fn addr(&self) -> SocketAddr {
            self.addr
        }

        pub fn store(&self) -> &ReviewStore {
            &self.store
        }
    }

    impl Drop for ReviewTestServer {
        fn drop(&mut self) {
            if let Some(handle) = self.handle.take() {
                handle.stop();
            }
        }
    }
}

pub mod http {
    use serde_json::Value;
    use std::io::{Read, Write};
    use std::net::{SocketAddr, TcpStream};
    use std::time::Duration;

    /// Write a raw request and read until the declared body has arrived
    /// or the connection goes quiet.
    pub fn send_request(addr: &SocketAddr, req: &str) -> String {
        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(req.as_bytes()).unwrap();
        stream.set_read_timeout(Some(Duration::from_millis(500))).unwrap();
        let mut buf = Vec::new();
        loop {
            let mut tmp = [0u8; 4096];
            match stream.read(&mut tmp) {
                Ok(0) => break,
                Ok(n) => {
                    buf.extend_from_slice(&tmp[..n]);
                    if is_complete(&buf) {
                        break;
                    }
                }
                Err(ref e)
                    if e.kind() == std::io::ErrorKind::WouldBlock
                        || e.kind() == std::io::ErrorKind::TimedOut =>
                {
                    break
                }
                Err(e) => panic!("read error: {:?}", e),
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    fn is_complete(buf: &[u8]) -> bool {
        let text = String::from_utf8_lossy(buf);
        let Some((head, body)) = text.split_once("\r\n\r\n") else {
            return false;
        };
        let length = head.lines().find_map(|line| {
            let (name, val) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| val.trim().parse::<usize>().ok())
                .flatten()
        });
        matches!(length, Some(len) if body.len() >= len)
    }

    pub fn get(addr: &SocketAddr, target: &str) -> String {
        send_request(
            addr,
            &format!("GET {target} HTTP/1.1\r\nHost: localhost\r\n\r\n"),
        )
    }

    /// POST an `application/x-www-form-urlencoded` body.
    pub fn post_form(addr: &SocketAddr, form: &str) -> String {
        send_request(
            addr,
            &format!(
                "POST / HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
                form.len(),
                form
            ),
        )
    }

    /// Status, content type and raw body of a response.
    pub fn parse_response_parts(resp: &str) -> (u16, String, String) {
        let (headers, body) = resp.split_once("\r\n\r\n").unwrap_or((resp, ""));
        let mut status = 0;
        let mut content_type = String::new();
        for line in headers.lines() {
            if line.starts_with("HTTP/1.1") {
                status = line
                    .split_whitespace()
                    .nth(1)
                    .unwrap_or("0")
                    .parse()
                    .unwrap();
            } else if let Some((name, val)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-type") {
                    content_type = val.trim().to_string();
                }
            }
        }
        (status, content_type, body.to_string())
    }

    pub fn parse_response(resp: &str) -> (u16, Value) {
        let (status, content_type, body) = parse_response_parts(resp);
        assert!(
            content_type.starts_with("application/json"),
            "unexpected content type {content_type:?}"
        );
        (status, serde_json::from_str(&body).unwrap())
    }
}
