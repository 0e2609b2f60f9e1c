use crate::ReverseGeocoder;
use crate::address::flatten_address;
use crate::error::{ErrorKind, Result};
use async_trait::async_trait;
use exn::{OptionExt, ResultExt};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::instrument;

/// Reverse geocoder backed by a Nominatim-compatible HTTP service.
///
/// Sends one `GET` per lookup, identified by a fixed `User-Agent` (the public
/// OpenStreetMap instance refuses anonymous clients), and flattens the
/// `address` object of the JSON response. There is no retry, and no timeout
/// unless one is configured.
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    endpoint: String,
}

impl NominatimGeocoder {
    /// The public OpenStreetMap reverse geocoding endpoint.
    pub const DEFAULT_ENDPOINT: &str = "https://nominatim.openstreetmap.org/reverse";

    pub fn new(endpoint: impl Into<String>, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build().or_raise(|| ErrorKind::Network)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    #[instrument(skip(self), fields(endpoint = %self.endpoint, tags))]
    async fn lookup(&self, latitude: f64, longitude: f64) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("zoom", "18"), ("addressdetails", "1")])
            .query(&[("lat", latitude), ("lon", longitude)])
            .send()
            .await
            .or_raise(|| ErrorKind::Network)?;
        let status = response.status();
        if !status.is_success() {
            exn::bail!(ErrorKind::Status(status.as_u16()));
        }
        let body: Value = response.json().await.or_raise(|| ErrorKind::InvalidBody)?;
        let address = body.get("address").ok_or_raise(|| ErrorKind::InvalidBody)?;
        let tags = flatten_address(address);
        tracing::Span::current().record("tags", tags.len());
        Ok(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve exactly one canned HTTP response, returning the raw request head.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/reverse", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buffer = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let read = socket.read(&mut buffer).await.unwrap();
                if read == 0 {
                    break;
                }
                request.extend_from_slice(&buffer[..read]);
            }
            let response = format!(
                concat!(
                    "HTTP/1.1 {status}\r\n",
                    "Content-Type: application/json\r\n",
                    "Content-Length: {}\r\n",
                    "Connection: close\r\n\r\n{body}",
                ),
                body.len(),
                status = status,
                body = body,
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8(request).unwrap()
        });
        (endpoint, handle)
    }

    #[tokio::test]
    async fn test_lookup() {
        let body = concat!(
            r#"{"place_id":1,"address":"#,
            r#"{"tourism":"Tour Eiffel","city":"Paris","country":"France","country_code":"fr"}}"#,
        );
        let (endpoint, server) = serve_once("200 OK", body).await;
        let geocoder = NominatimGeocoder::new(endpoint, "tagpress-test/1.0", None).unwrap();

        let mut tags = geocoder.lookup(48.8566, 2.3522).await.unwrap();
        tags.sort();
        assert_eq!(tags, vec!["fr", "france", "paris", "tour eiffel"]);

        let request = server.await.unwrap().to_lowercase();
        let request_line = request.lines().next().unwrap();
        assert!(request_line.starts_with("get /reverse?"));
        for param in ["format=json", "zoom=18", "addressdetails=1", "lat=48.8566", "lon=2.3522"] {
            assert!(request_line.contains(param), "missing {param} in {request_line}");
        }
        assert!(request.contains("user-agent: tagpress-test/1.0"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let (endpoint, _server) = serve_once("503 Service Unavailable", "{}").await;
        let geocoder = NominatimGeocoder::new(endpoint, "tagpress-test/1.0", None).unwrap();
        assert_eq!(*geocoder.lookup(48.8566, 2.3522).await.unwrap_err(), ErrorKind::Status(503));
    }

    #[tokio::test]
    async fn test_response_without_address() {
        let (endpoint, _server) = serve_once("200 OK", r#"{"error":"Unable to geocode"}"#).await;
        let geocoder = NominatimGeocoder::new(endpoint, "tagpress-test/1.0", None).unwrap();
        assert!(geocoder.resolve(0.5, 0.5).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (endpoint, _server) = serve_once("200 OK", "<html>").await;
        let geocoder = NominatimGeocoder::new(endpoint, "tagpress-test/1.0", None).unwrap();
        assert_eq!(*geocoder.lookup(48.8566, 2.3522).await.unwrap_err(), ErrorKind::InvalidBody);
    }

    #[tokio::test]
    async fn test_unreachable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}/reverse", listener.local_addr().unwrap());
        drop(listener);
        let geocoder = NominatimGeocoder::new(endpoint, "tagpress-test/1.0", Some(Duration::from_secs(5))).unwrap();
        assert_eq!(*geocoder.lookup(48.8566, 2.3522).await.unwrap_err(), ErrorKind::Network);
        assert!(geocoder.resolve(48.8566, 2.3522).await.is_empty());
    }
}
