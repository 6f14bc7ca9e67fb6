pub mod config;
pub mod models;
pub mod publisher;
pub mod uri;

#[cfg(test)]
pub mod mock;

pub use config::PinataConfig;
pub use publisher::{MetadataPublisher, PinataPublisher};
pub use uri::{gateway_url_for, normalize_ipfs_uri};
