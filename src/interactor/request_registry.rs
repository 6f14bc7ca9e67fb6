use chrono::{DateTime, Duration, Utc};
use log::info;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::entity::{MintRecord, TokenCreatorError};

pub const DEFAULT_TTL_SECS: i64 = 3600;

enum RequestStatus {
    InFlight,
    Completed(MintRecord),
}

/// What to do with an incoming issuance.
#[derive(Debug, PartialEq, Eq)]
pub enum Admission {
    Proceed,
    Replay(MintRecord),
}

/// In-memory duplicate detection for issuance requests, keyed by the
/// client request id or the fee transaction signature. Failed requests are
/// released so the client may try again.
pub struct RequestRegistry {
    entries: Mutex<HashMap<String, (RequestStatus, DateTime<Utc>)>>,
    ttl: Duration,
}

impl Default for RequestRegistry {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl RequestRegistry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub fn begin(&self, key: &str) -> Result<Admission, TokenCreatorError> {
        let now = Utc::now();
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.retain(|_, (_, updated_at)| now - *updated_at < self.ttl);

        match entries.get(key) {
            Some((RequestStatus::InFlight, _)) => {
                Err(TokenCreatorError::DuplicateRequest(key.to_string()))
            }
            Some((RequestStatus::Completed(record), _)) => {
                info!("Replaying completed issuance for request {}", key);
                Ok(Admission::Replay(record.clone()))
            }
            None => {
                entries.insert(key.to_string(), (RequestStatus::InFlight, now));
                Ok(Admission::Proceed)
            }
        }
    }

    pub fn complete(&self, key: &str, record: MintRecord) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), (RequestStatus::Completed(record), Utc::now()));
    }

    pub fn release(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> MintRecord {
        MintRecord {
            mint_address: "mint".to_string(),
            token_account: "account".to_string(),
            metadata_uri: "https://gateway.pinata.cloud/ipfs/CID".to_string(),
            transaction_signature: "sig".to_string(),
        }
    }

    #[test]
    fn test_in_flight_request_is_rejected() {
        let registry = RequestRegistry::default();
        assert_eq!(registry.begin("a").unwrap(), Admission::Proceed);
        assert!(matches!(
            registry.begin("a"),
            Err(TokenCreatorError::DuplicateRequest(_))
        ));
    }

    #[test]
    fn test_completed_request_is_replayed() {
        let registry = RequestRegistry::default();
        registry.begin("a").unwrap();
        registry.complete("a", record());
        assert_eq!(registry.begin("a").unwrap(), Admission::Replay(record()));
    }

    #[test]
    fn test_released_and_expired_requests_proceed() {
        let registry = RequestRegistry::default();
        registry.begin("a").unwrap();
        registry.release("a");
        assert_eq!(registry.begin("a").unwrap(), Admission::Proceed);

        let expiring = RequestRegistry::new(Duration::zero());
        expiring.begin("b").unwrap();
        assert_eq!(expiring.begin("b").unwrap(), Admission::Proceed);
    }
}
