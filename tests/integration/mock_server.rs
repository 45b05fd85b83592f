//! Mock HTTP server setup for integration tests

use docforge_client::TransferClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Test fixture that manages a mock conversion service
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Create a client pointed at the mock server
    pub fn client(&self) -> TransferClient {
        TransferClient::new(&self.base_url).expect("client builds")
    }

    /// Mock a successful binary reply; `body_patterns` must all match the request body
    pub async fn mock_binary(&self, path: &str, body_patterns: &[&str], reply: &[u8]) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_body(body_matcher(body_patterns))
            .with_status(200)
            .with_header("content-type", "application/octet-stream")
            .with_body(reply)
            .create_async()
            .await
    }

    /// Mock a successful JSON reply
    pub async fn mock_json(&self, method: &str, path: &str, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock(method, path)
            .match_query(Matcher::Any)
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock an error reply with an explicit content type
    pub async fn mock_error(
        &self,
        path: &str,
        status: usize,
        content_type: &str,
        body: &str,
    ) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .with_status(status)
            .with_header("content-type", content_type)
            .with_body(body)
            .create_async()
            .await
    }

    /// Mock that must never be hit
    pub async fn mock_unreachable(&self, path: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("POST", path)
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await
    }
}

fn body_matcher(patterns: &[&str]) -> Matcher {
    if patterns.is_empty() {
        return Matcher::Any;
    }
    Matcher::AllOf(
        patterns
            .iter()
            .map(|p| Matcher::Regex(p.to_string()))
            .collect(),
    )
}

/// Regex matching a multipart text field with the given value
pub fn text_field(name: &str, value: &str) -> String {
    format!(
        "name=\"{}\"\r\n\r\n{}\r\n",
        regex_escape(name),
        regex_escape(value)
    )
}

/// Regex matching a multipart file field with the given file name
pub fn file_field(name: &str, file_name: &str) -> String {
    format!(
        "name=\"{}\"; filename=\"{}\"",
        regex_escape(name),
        regex_escape(file_name)
    )
}

fn regex_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if "\\.+*?()|[]{}^$#&-~".contains(c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
