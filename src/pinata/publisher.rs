use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;

use crate::entity::TokenCreatorError;
use crate::pinata::config::PinataConfig;
use crate::pinata::models::{PinResponse, PinataMetadata, PinataOptions};
use crate::pinata::uri::ipfs_uri;

/// Publishes token documents to content-addressed storage
#[async_trait]
pub trait MetadataPublisher: Send + Sync {
    /// Pin a JSON document, returning `ipfs://<cid>`
    async fn publish_json(&self, document: &Value) -> Result<String>;

    /// Pin a file, returning its content id
    async fn publish_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String>;
}

/// Pinata pinning API client. Failures are returned as is, there is no retry.
pub struct PinataPublisher {
    http_client: Client,
    config: PinataConfig,
}

impl PinataPublisher {
    pub fn new(config: PinataConfig) -> Self {
        Self {
            http_client: Client::new(),
            config,
        }
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("pinata_api_key", &self.config.api_key)
            .header("pinata_secret_api_key", &self.config.secret_api_key)
    }

    async fn read_pin_response(response: Response) -> Result<PinResponse> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Pinata API error [{}]: {}", status, error_text);
            return Err(TokenCreatorError::PinataApi(format!("{}: {}", status, error_text)).into());
        }

        response.json::<PinResponse>().await.map_err(|e| {
            error!("Failed to parse Pinata response: {}", e);
            TokenCreatorError::PinataApi(format!("Failed to parse response: {}", e)).into()
        })
    }
}

#[async_trait]
impl MetadataPublisher for PinataPublisher {
    async fn publish_json(&self, document: &Value) -> Result<String> {
        let url = format!("{}/pinning/pinJSONToIPFS", self.config.api_url);

        let response = self
            .authorized(self.http_client.post(&url))
            .json(document)
            .send()
            .await
            .map_err(|e| TokenCreatorError::PinataApi(format!("HTTP request failed: {}", e)))?;

        let pin = Self::read_pin_response(response).await?;
        info!("Pinata responded with IpfsHash: {}", pin.ipfs_hash);

        Ok(ipfs_uri(&pin.ipfs_hash))
    }

    async fn publish_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        let url = format!("{}/pinning/pinFileToIPFS", self.config.api_url);

        let metadata = serde_json::to_string(&PinataMetadata {
            name: file_name.to_string(),
        })?;
        let options = serde_json::to_string(&PinataOptions { cid_version: 0 })?;

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("pinataMetadata", metadata)
            .text("pinataOptions", options);

        let response = self
            .authorized(self.http_client.post(&url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| TokenCreatorError::PinataApi(format!("HTTP request failed: {}", e)))?;

        let pin = Self::read_pin_response(response).await?;
        info!("Pinned file {} as {} ({} bytes)", file_name, pin.ipfs_hash, pin.pin_size);

        Ok(pin.ipfs_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::Json;

    /// Start a mock Pinata API on a random port
    async fn start_mock_pinata(app: axum::Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        format!("http://127.0.0.1:{port}")
    }

    fn test_config(api_url: String) -> PinataConfig {
        PinataConfig {
            api_url,
            api_key: "key".to_string(),
            secret_api_key: "secret".to_string(),
            ..PinataConfig::default()
        }
    }

    #[tokio::test]
    async fn test_publish_json_returns_ipfs_uri() {
        let app = axum::Router::new().route(
            "/pinning/pinJSONToIPFS",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                assert_eq!(headers.get("pinata_api_key").unwrap(), "key");
                assert_eq!(headers.get("pinata_secret_api_key").unwrap(), "secret");
                assert_eq!(body["symbol"], "TEST");
                Json(serde_json::json!({
                    "IpfsHash": "QmTestHash",
                    "PinSize": 120,
                    "Timestamp": "2024-01-01T00:00:00Z"
                }))
            }),
        );
        let publisher = PinataPublisher::new(test_config(start_mock_pinata(app).await));

        let uri = publisher
            .publish_json(&serde_json::json!({ "name": "Test", "symbol": "TEST" }))
            .await
            .unwrap();

        assert_eq!(uri, "ipfs://QmTestHash");
    }

    #[tokio::test]
    async fn test_publish_file_returns_cid() {
        let app = axum::Router::new().route(
            "/pinning/pinFileToIPFS",
            post(|body: axum::body::Bytes| async move {
                let text = String::from_utf8_lossy(&body);
                assert!(text.contains("name=\"file\""));
                assert!(text.contains("logo.png"));
                assert!(text.contains("\"cidVersion\":0"));
                Json(serde_json::json!({ "IpfsHash": "QmImage" }))
            }),
        );
        let publisher = PinataPublisher::new(test_config(start_mock_pinata(app).await));

        let cid = publisher
            .publish_file(vec![0x89, 0x50, 0x4e, 0x47], "logo.png")
            .await
            .unwrap();

        assert_eq!(cid, "QmImage");
    }

    #[tokio::test]
    async fn test_publish_json_surfaces_http_errors() {
        let app = axum::Router::new().route(
            "/pinning/pinJSONToIPFS",
            post(|| async { (StatusCode::UNAUTHORIZED, "Invalid API key") }),
        );
        let publisher = PinataPublisher::new(test_config(start_mock_pinata(app).await));

        let err = publisher
            .publish_json(&serde_json::json!({}))
            .await
            .unwrap_err();

        match err.downcast_ref::<TokenCreatorError>() {
            Some(TokenCreatorError::PinataApi(message)) => {
                assert!(message.contains("401"));
                assert!(message.contains("Invalid API key"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
