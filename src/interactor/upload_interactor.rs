use anyhow::Result;
use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::entity::TokenCreatorError;
use crate::pinata::{gateway_url_for, MetadataPublisher};

#[async_trait]
pub trait UploadInteractor: Send + Sync {
    /// Pin an image and return its gateway URL.
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<String>;
}

pub struct UploadInteractorImpl {
    publisher: Arc<dyn MetadataPublisher>,
    gateway_url: String,
}

impl UploadInteractorImpl {
    pub fn new(publisher: Arc<dyn MetadataPublisher>, gateway_url: String) -> Self {
        Self {
            publisher,
            gateway_url,
        }
    }
}

#[async_trait]
impl UploadInteractor for UploadInteractorImpl {
    async fn upload_image(&self, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        if bytes.is_empty() {
            return Err(TokenCreatorError::MissingImage.into());
        }

        info!("Uploading image {} ({} bytes)", file_name, bytes.len());
        let cid = self.publisher.publish_file(bytes, file_name).await?;

        Ok(gateway_url_for(&cid, &self.gateway_url))
    }
}
