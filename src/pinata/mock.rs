//! Publisher double that records what was pinned.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

use super::publisher::MetadataPublisher;
use super::uri::ipfs_uri;

#[derive(Default)]
pub struct MockPublisher {
    pub cid: String,
    pub fail: bool,
    pub documents: Mutex<Vec<Value>>,
    pub files: Mutex<Vec<(String, usize)>>,
}

impl MockPublisher {
    pub fn new(cid: &str) -> Self {
        Self {
            cid: cid.to_string(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl MetadataPublisher for MockPublisher {
    async fn publish_json(&self, document: &Value) -> Result<String> {
        if self.fail {
            return Err(anyhow!("Pinata API error: 503 Service Unavailable"));
        }
        self.documents.lock().unwrap().push(document.clone());
        Ok(ipfs_uri(&self.cid))
    }

    async fn publish_file(&self, bytes: Vec<u8>, file_name: &str) -> Result<String> {
        if self.fail {
            return Err(anyhow!("Pinata API error: 503 Service Unavailable"));
        }
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.len()));
        Ok(self.cid.clone())
    }
}
