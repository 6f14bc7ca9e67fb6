pub const IPFS_SCHEME: &str = "ipfs://";

/// Rewrite `ipfs://<cid>` to `<gateway><cid>`; other URIs pass through.
pub fn normalize_ipfs_uri(uri: &str, gateway_url: &str) -> String {
    match uri.strip_prefix(IPFS_SCHEME) {
        Some(cid) => gateway_url_for(cid, gateway_url),
        None => uri.to_string(),
    }
}

/// Gateway URL for a content id.
pub fn gateway_url_for(cid: &str, gateway_url: &str) -> String {
    format!("{}/{}", gateway_url.trim_end_matches('/'), cid)
}

pub fn ipfs_uri(cid: &str) -> String {
    format!("{}{}", IPFS_SCHEME, cid)
}
