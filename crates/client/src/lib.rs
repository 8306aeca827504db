//! Folio HTTP Client
//!
//! Submits contact-form payloads to the portfolio backend as multipart form
//! data and drives the form through a full submit attempt.
//!
//! # Quick Start
//!
//! ```no_run
//! use folio_client::{ContactSession, FolioClient, SubmitOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), folio_client::Error> {
//!     let client = FolioClient::new("http://localhost:8001");
//!     let mut session = ContactSession::new(client);
//!
//!     let form = session.form_mut();
//!     form.set_name("Ada Lovelace");
//!     form.set_email("ada@example.com");
//!     form.set_subject("Hello");
//!     form.set_message("I enjoyed your dashboard project.");
//!
//!     match session.submit().await {
//!         SubmitOutcome::Sent(note) | SubmitOutcome::Failed(note) => {
//!             println!("{}: {}", note.title, note.description);
//!         }
//!         SubmitOutcome::Rejected(errors) => println!("fix the form: {errors}"),
//!         SubmitOutcome::InFlight => {}
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Configuration
//!
//! The base URL and timeout are read once at startup, either from the
//! environment or from a TOML file:
//!
//! ```no_run
//! use folio_client::{ClientConfig, FolioClientBuilder};
//!
//! let config = ClientConfig::from_env().unwrap();
//! let client = FolioClientBuilder::from_config(&config).build().unwrap();
//! ```

pub mod config;
mod error;
pub mod session;
pub mod transport;

pub use config::ClientConfig;
pub use error::{Error, GENERIC_FAILURE};
pub use session::{ContactSession, SubmitOutcome};
pub use transport::ContactTransport;

// Re-export core form types so callers don't need a direct `folio_core` dependency.
pub use folio_core::{Attachment, ContactForm, ContactSubmission, Notification};

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the portfolio backend.
#[derive(Debug, Clone)]
pub struct FolioClient {
    client: Client,
    base_url: String,
}

/// Builder for configuring a [`FolioClient`].
#[derive(Debug)]
pub struct FolioClientBuilder {
    base_url: String,
    timeout: Duration,
    client: Option<Client>,
}

impl FolioClientBuilder {
    /// Create a new builder with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            client: None,
        }
    }

    /// Create a builder from loaded configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.backend_url.clone()).timeout(config.timeout())
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// The builder's timeout is ignored in that case.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FolioClient, Error> {
        if self.base_url.is_empty() {
            return Err(Error::Configuration("base URL is empty".into()));
        }
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        Ok(FolioClient {
            client,
            base_url: self.base_url,
        })
    }
}

/// Body of a successful submission. Its shape is up to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactReceipt {
    pub body: serde_json::Value,
}

impl ContactReceipt {
    /// The `id` the backend assigned to the message, if it sent one.
    pub fn id(&self) -> Option<&str> {
        self.body.get("id").and_then(serde_json::Value::as_str)
    }
}

/// Error body returned by the backend on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    detail: Option<String>,
}

impl FolioClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use folio_client::FolioClient;
    ///
    /// let client = FolioClient::new("http://localhost:8001");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `base_url` is empty or the HTTP client cannot be built. Use
    /// [`FolioClient::builder`] to handle those as errors.
    pub fn new(base_url: impl Into<String>) -> Self {
        FolioClientBuilder::new(base_url)
            .build()
            .expect("base URL must not be empty")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(base_url: impl Into<String>) -> FolioClientBuilder {
        FolioClientBuilder::new(base_url)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Check if the backend reports itself healthy.
    pub async fn health(&self) -> Result<bool, Error> {
        let url = format!("{}/api/health", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        Ok(response.status().is_success())
    }

    /// Send one contact-form submission.
    ///
    /// The payload is posted once to `{base_url}/api/contact`; nothing is
    /// retried. The submission is not validated here, see
    /// [`folio_core::validate`].
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> Result<(), folio_client::Error> {
    /// use folio_client::{Attachment, ContactSubmission, FolioClient};
    ///
    /// let client = FolioClient::new("http://localhost:8001");
    /// let submission = ContactSubmission::new("Ada", "ada@example.com", "Hi", "Long enough text")
    ///     .with_attachment(Attachment::new("cv.pdf", "application/pdf", b"%PDF".to_vec()));
    ///
    /// let receipt = client.submit(&submission).await?;
    /// println!("stored as {:?}", receipt.id());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self, submission), fields(has_attachment = submission.attachment.is_some()))]
    pub async fn submit(&self, submission: &ContactSubmission) -> Result<ContactReceipt, Error> {
        let url = format!("{}/api/contact", self.base_url);
        let form = build_form(submission)?;

        debug!(url = %url, "posting contact form");

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "contact request failed before a response");
                Error::Connection(e.to_string())
            })?;

        let status = response.status();
        if status.is_success() {
            let body = response
                .json::<serde_json::Value>()
                .await
                .map_err(|e| Error::Deserialization(e.to_string()))?;
            let receipt = ContactReceipt { body };
            info!(status = status.as_u16(), id = ?receipt.id(), "contact form accepted");
            Ok(receipt)
        } else {
            let text = response.text().await.unwrap_or_default();
            let message = error_detail(&text);
            warn!(status = status.as_u16(), %message, "contact form refused");
            Err(Error::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Encode a submission as multipart form data. The attachment, when
/// present, keeps its original filename and MIME type.
fn build_form(submission: &ContactSubmission) -> Result<Form, Error> {
    let mut form = Form::new()
        .text("name", submission.name.clone())
        .text("email", submission.email.clone())
        .text("subject", submission.subject.clone())
        .text("message", submission.message.clone());

    if let Some(attachment) = &submission.attachment {
        let part = Part::bytes(attachment.data.clone())
            .file_name(attachment.filename.clone())
            .mime_str(&attachment.content_type)
            .map_err(|e| {
                Error::InvalidPayload(format!(
                    "invalid content type '{}': {e}",
                    attachment.content_type
                ))
            })?;
        form = form.part("file", part);
    }

    Ok(form)
}

/// Pull the `detail` string out of an error body, falling back to the
/// generic message for empty, non-JSON, or differently shaped bodies.
fn error_detail(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|e| e.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    /// A minimal mock HTTP server built on tokio that returns canned responses.
    struct MockServer {
        listener: tokio::net::TcpListener,
        base_url: String,
    }

    impl MockServer {
        async fn start() -> Self {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                .await
                .expect("failed to bind mock server");
            let port = listener.local_addr().unwrap().port();
            let base_url = format!("http://127.0.0.1:{port}");
            Self { listener, base_url }
        }

        /// Accept one connection, read the full request, and respond with the
        /// given status code and body. Returns the raw request bytes.
        async fn respond_once(self, status_code: u16, body: &str) -> Vec<u8> {
            let body = body.to_owned();
            let (mut stream, _) = self.listener.accept().await.unwrap();

            let mut request = Vec::new();
            let mut chunk = [0u8; 8192];
            loop {
                let n = stream.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 {status_code} Status\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\
                 \r\n\
                 {body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();

            request
        }
    }

    /// `true` once the headers and `Content-Length` bytes of body have arrived.
    fn request_complete(buf: &[u8]) -> bool {
        let Some(header_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);
        buf.len() >= header_end + 4 + content_length
    }

    fn submission() -> ContactSubmission {
        ContactSubmission::new(
            "Ada Lovelace",
            "ada@example.com",
            "Collaboration",
            "I would like to discuss a project.",
        )
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let client = FolioClient::builder("http://localhost:8001/").build().unwrap();
        assert_eq!(client.base_url(), "http://localhost:8001");
    }

    #[test]
    fn builder_rejects_empty_base_url() {
        let err = FolioClientBuilder::new("").build().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    #[should_panic(expected = "base URL must not be empty")]
    fn new_panics_on_empty_base_url() {
        let _ = FolioClient::new("");
    }

    #[test]
    fn builder_from_config() {
        let config = ClientConfig {
            backend_url: "https://api.example.com/".into(),
            timeout_secs: 3,
        };
        let builder = FolioClientBuilder::from_config(&config);
        assert_eq!(builder.timeout, Duration::from_secs(3));
        assert_eq!(builder.build().unwrap().base_url(), "https://api.example.com");
    }

    #[test]
    fn error_detail_extraction() {
        assert_eq!(error_detail(r#"{"detail":"Spam detected"}"#), "Spam detected");
        assert_eq!(error_detail(r#"{"detail":""}"#), GENERIC_FAILURE);
        assert_eq!(error_detail(r#"{"error":"nope"}"#), GENERIC_FAILURE);
        assert_eq!(error_detail(r#"{"detail":[{"msg":"field required"}]}"#), GENERIC_FAILURE);
        assert_eq!(error_detail("<html>502</html>"), GENERIC_FAILURE);
        assert_eq!(error_detail(""), GENERIC_FAILURE);
    }

    #[test]
    fn receipt_id() {
        let receipt = ContactReceipt {
            body: serde_json::json!({"id": "abc", "status": "pending"}),
        };
        assert_eq!(receipt.id(), Some("abc"));

        let receipt = ContactReceipt {
            body: serde_json::json!({"ok": true}),
        };
        assert_eq!(receipt.id(), None);
    }

    #[test]
    fn unparseable_content_type_is_invalid_payload() {
        let submission =
            submission().with_attachment(Attachment::new("x.bin", "not a mime", vec![1, 2]));
        let err = build_form(&submission).unwrap_err();
        assert!(matches!(err, Error::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn submit_success_posts_multipart_fields() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, r#"{"id":"x"}"#).await });

        let receipt = client.submit(&submission()).await.expect("submit should succeed");
        let request = server_handle.await.unwrap();
        let request = String::from_utf8_lossy(&request);

        assert_eq!(receipt.id(), Some("x"));
        assert!(request.starts_with("POST /api/contact "));
        assert!(request.to_lowercase().contains("content-type: multipart/form-data"));
        for field in ["name", "email", "subject", "message"] {
            assert!(
                request.contains(&format!("name=\"{field}\"")),
                "missing part {field}"
            );
        }
        assert!(request.contains("Ada Lovelace"));
        assert!(!request.contains("name=\"file\""));
    }

    #[tokio::test]
    async fn submit_includes_attachment_part() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);
        let submission = submission().with_attachment(Attachment::new(
            "resume.pdf",
            "application/pdf",
            b"%PDF-1.7 fake".to_vec(),
        ));

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, r#"{"id":"y"}"#).await });

        client.submit(&submission).await.expect("submit should succeed");
        let request = server_handle.await.unwrap();
        let request = String::from_utf8_lossy(&request);

        assert!(request.contains("name=\"file\"; filename=\"resume.pdf\""));
        assert!(request.to_lowercase().contains("content-type: application/pdf"));
        assert!(request.contains("%PDF-1.7 fake"));
    }

    #[tokio::test]
    async fn submit_error_uses_detail() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);

        let server_handle = tokio::spawn(async move {
            server
                .respond_once(400, r#"{"detail":"Spam detected"}"#)
                .await
        });

        let err = client.submit(&submission()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(
            &err,
            Error::Http { status: 400, message } if message == "Spam detected"
        ));
    }

    #[tokio::test]
    async fn submit_error_without_detail_is_generic() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);

        let server_handle = tokio::spawn(async move {
            server
                .respond_once(500, r#"{"error":"internal"}"#)
                .await
        });

        let err = client.submit(&submission()).await.unwrap_err();
        server_handle.await.unwrap();

        assert_eq!(err.status(), Some(500));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn submit_success_with_malformed_body() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, "not json").await });

        let err = client.submit(&submission()).await.unwrap_err();
        server_handle.await.unwrap();

        assert!(matches!(err, Error::Deserialization(_)));
        assert_eq!(err.user_message(), GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn submit_without_server_is_connection_error() {
        // Bind and immediately drop to get a port nothing listens on.
        let addr = {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };
        let client = FolioClient::new(format!("http://{addr}"));

        let err = client.submit(&submission()).await.unwrap_err();
        assert!(err.is_connection_error());
        assert!(!err.user_message().is_empty());
    }

    #[tokio::test]
    async fn health_reports_status() {
        let server = MockServer::start().await;
        let client = FolioClient::new(&server.base_url);

        let server_handle = tokio::spawn(async move {
            server
                .respond_once(200, r#"{"status":"healthy"}"#)
                .await
        });

        assert!(client.health().await.unwrap());
        let request = server_handle.await.unwrap();
        assert!(String::from_utf8_lossy(&request).starts_with("GET /api/health "));
    }
}
