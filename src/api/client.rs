//! HTTP client for the form sharing backend
//!
//! Submitted forms are POSTed as JSON and land in the moderation queue.
//! The response body is not used.

use crate::state::CreateFormRequest;
use reqwest::{Client, Url};
use thiserror::Error;

/// Path of the creation endpoint, relative to the base URL
const CREATE_FORM_PATH: &str = "api/forms";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid API URL: {url}")]
    InvalidUrl { url: String },

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {status}")]
    HttpStatus { status: u16 },
}

/// Client for the form creation endpoint
#[derive(Debug, Clone)]
pub struct FormsClient {
    http: Client,
    endpoint: Url,
}

impl FormsClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let endpoint = create_form_url(base_url)?;
        Ok(Self {
            http: Client::new(),
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Submit a form for moderation
    pub async fn create_form(&self, request: &CreateFormRequest) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                status: status.as_u16(),
            });
        }

        tracing::info!(status = status.as_u16(), "form accepted by backend");
        Ok(())
    }
}

/// Resolve the creation endpoint against a base URL.
///
/// A missing trailing slash on the base is tolerated so that
/// `http://host/prefix` keeps its `prefix` segment.
fn create_form_url(base_url: &str) -> Result<Url, ApiError> {
    let invalid = || ApiError::InvalidUrl {
        url: base_url.to_string(),
    };
    let mut base = Url::parse(base_url.trim()).map_err(|_| invalid())?;
    if base.cannot_be_a_base() || !matches!(base.scheme(), "http" | "https") {
        return Err(invalid());
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(CREATE_FORM_PATH).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_endpoint_from_bare_host() {
        let client = FormsClient::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:3000/api/forms");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let url = create_form_url("https://forms.example.com/v1").unwrap();
        assert_eq!(url.as_str(), "https://forms.example.com/v1/api/forms");

        let url = create_form_url("https://forms.example.com/v1/").unwrap();
        assert_eq!(url.as_str(), "https://forms.example.com/v1/api/forms");
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let err = FormsClient::new("not a url").unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl { .. }));
        assert_eq!(err.to_string(), "Invalid API URL: not a url");
    }

    #[test]
    fn test_non_http_scheme_is_rejected() {
        assert!(create_form_url("ftp://example.com").is_err());
        assert!(create_form_url("mailto:someone@example.com").is_err());
    }

    fn sample_request() -> CreateFormRequest {
        CreateFormRequest {
            content: "Dear ${name}$".to_string(),
            email: "kim@example.com".to_string(),
            title: "Greeting".to_string(),
            writer: "kim".to_string(),
            tags: vec!["Greeting".to_string()],
            replacement_tags: vec!["name".to_string()],
            is_email_visible: false,
        }
    }

    /// Serve a single HTTP request with `status_line`, returning the raw request
    async fn serve_once(status_line: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(head_end) = text.find("\r\n\r\n") {
                    let content_length = text[..head_end]
                        .lines()
                        .find_map(|l| {
                            let (name, value) = l.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())?
                        })
                        .unwrap_or(0);
                    if raw.len() >= head_end + 4 + content_length || n == 0 {
                        break;
                    }
                }
                if n == 0 {
                    break;
                }
            }
            let response =
                format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (base, handle)
    }

    /// Client that ignores proxy env vars so requests reach the local server
    fn local_client(base: &str) -> FormsClient {
        FormsClient {
            http: Client::builder().no_proxy().build().unwrap(),
            endpoint: create_form_url(base).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_create_form_posts_json() {
        let (base, server) = serve_once("HTTP/1.1 201 Created").await;
        let client = local_client(&base);

        let result = client.create_form(&sample_request()).await;
        tokio_test::assert_ok!(result);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/forms HTTP/1.1"));
        assert!(raw.contains("\"replacementTags\":[\"name\"]"));
        assert!(raw.contains("\"IsEmailVisible\":false"));
    }

    #[tokio::test]
    async fn test_create_form_maps_error_status() {
        let (base, server) = serve_once("HTTP/1.1 500 Internal Server Error").await;
        let client = local_client(&base);

        let result = client.create_form(&sample_request()).await;
        assert!(matches!(result, Err(ApiError::HttpStatus { status: 500 })));
        server.await.unwrap();
    }
}
