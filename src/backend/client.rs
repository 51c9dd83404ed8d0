//! HTTP client for the employer backend
//!
//! Talks JSON to the `/api/states`, `/api/cities/{id}` and
//! `/api/employers` endpoints.

use super::submission::{MessageBody, SubmitResponse};
use super::traits::EmployerApi;
use crate::config::FormConfig;
use crate::error::FormError;
use crate::state::{FormValues, RemoteOption};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;

/// Client for the employer backend
#[derive(Debug, Clone)]
pub struct HttpEmployerApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpEmployerApi {
    /// Create a client for the configured backend
    pub fn new(config: &FormConfig) -> crate::error::Result<Self> {
        let base_url = Url::parse(&config.backend_url())
            .map_err(|e| FormError::Config(format!("invalid backend url: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(FormError::Config(format!(
                "backend url cannot be a base: {base_url}"
            )));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FormError::Config(format!("failed to build http client: {e}")))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/{segments..}`, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("backend url cannot be a base"))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get_options(&self, url: Url) -> Result<Vec<RemoteOption>> {
        let options = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach {url}: {e}"))?
            .error_for_status()
            .map_err(|e| anyhow!("Backend refused {url}: {e}"))?
            .json::<Vec<RemoteOption>>()
            .await
            .map_err(|e| anyhow!("Invalid option list from {url}: {e}"))?;
        Ok(options)
    }
}

#[async_trait]
impl EmployerApi for HttpEmployerApi {
    async fn list_states(&self) -> Result<Vec<RemoteOption>> {
        let url = self.endpoint(&["states"])?;
        self.get_options(url).await
    }

    async fn list_cities(&self, state_id: &str) -> Result<Vec<RemoteOption>> {
        let url = self.endpoint(&["cities", state_id])?;
        self.get_options(url).await
    }

    async fn submit_employer(&self, payload: &FormValues) -> Result<SubmitResponse> {
        let url = self.endpoint(&["employers"])?;

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to submit employer: {e}"))?;

        let ok = response.status().is_success();
        let body = response
            .text()
            .await
            .map_err(|e| anyhow!("Failed to read submission response: {e}"))?;

        // a body without a message falls back to the generic text later
        let message = serde_json::from_str::<MessageBody>(&body)
            .ok()
            .and_then(|b| b.message);

        Ok(SubmitResponse { ok, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one HTTP response and hand back the raw request
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (base, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn client_for(base: &str) -> HttpEmployerApi {
        let config = FormConfig {
            backend_url: Some(base.to_string()),
            ..Default::default()
        };
        HttpEmployerApi::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_encodes_state_id() {
        let api = client_for("http://127.0.0.1:8000");
        let url = api.endpoint(&["cities", "new york"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/cities/new%20york");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client_for("http://example.test/backend/");
        let url = api.endpoint(&["states"]).unwrap();
        assert_eq!(url.as_str(), "http://example.test/backend/api/states");
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let config = FormConfig {
            backend_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            HttpEmployerApi::new(&config),
            Err(FormError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_list_states_parses_options() {
        let (base, server) =
            serve_once("200 OK", r#"[{"id":1,"name":"Texas"},{"id":2,"name":"Ohio"}]"#).await;

        let states = client_for(&base).list_states().await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/states HTTP/1.1"));
        assert_eq!(
            states,
            vec![RemoteOption::new("1", "Texas"), RemoteOption::new("2", "Ohio")]
        );
    }

    #[tokio::test]
    async fn test_list_cities_requests_state_path() {
        let (base, server) = serve_once("200 OK", r#"[{"id":"aus","name":"Austin"}]"#).await;

        let cities = client_for(&base).list_cities("tx").await.unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("GET /api/cities/tx HTTP/1.1"));
        assert_eq!(cities, vec![RemoteOption::new("aus", "Austin")]);
    }

    #[tokio::test]
    async fn test_list_cities_error_status_is_err() {
        let (base, server) = serve_once("500 Internal Server Error", "{}").await;

        assert!(client_for(&base).list_cities("tx").await.is_err());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_submit_posts_json_payload() {
        let (base, server) =
            serve_once("201 Created", r#"{"message":"Employer created successfully"}"#).await;

        let response = client_for(&base)
            .submit_employer(&FormValues::default())
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert!(request.starts_with("POST /api/employers HTTP/1.1"));
        let body = request.split("\r\n\r\n").nth(1).unwrap();
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(sent["salary_range"], serde_json::json!([30000, 90000]));
        assert_eq!(sent["type"], serde_json::json!(""));
        assert_eq!(
            response,
            SubmitResponse {
                ok: true,
                message: Some("Employer created successfully".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_submit_rejection_keeps_server_message() {
        let (base, server) = serve_once("400 Bad Request", r#"{"message":"Title invalid"}"#).await;

        let response = client_for(&base)
            .submit_employer(&FormValues::default())
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(
            response,
            SubmitResponse {
                ok: false,
                message: Some("Title invalid".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_submit_non_json_body_has_no_message() {
        let (base, server) = serve_once("502 Bad Gateway", "<html>bad gateway</html>").await;

        let response = client_for(&base)
            .submit_employer(&FormValues::default())
            .await
            .unwrap();
        server.await.unwrap();

        assert!(!response.ok);
        assert!(response.message.is_none());
    }

    #[tokio::test]
    async fn test_submit_connection_refused_is_err() {
        // bind then drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let result = client_for(&base)
            .submit_employer(&FormValues::default())
            .await;
        assert!(result.is_err());
    }
}
