//! HTTP access for remote player pools

use crate::dfs::types::{parse_player_records, PlayerRecord};
use crate::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use std::time::Duration;

/// Optional bearer token sent with player pool requests.
pub const POOL_TOKEN_ENV: &str = "DFS_LINEUP_POOL_TOKEN";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default headers, plus `Authorization` when `DFS_LINEUP_POOL_TOKEN` is set.
pub fn pool_header_map() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    if let Ok(token) = std::env::var(POOL_TOKEN_ENV) {
        let value = HeaderValue::from_str(&format!("Bearer {}", token.trim())).map_err(|e| {
            crate::DfsError::InvalidConfig {
                key: POOL_TOKEN_ENV.to_string(),
                message: e.to_string(),
            }
        })?;
        h.insert(AUTHORIZATION, value);
    }
    Ok(h)
}

pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .user_agent(concat!("dfs-lineup/", env!("CARGO_PKG_VERSION")))
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

/// True for sources that should be fetched rather than read from disk.
pub fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Download a JSON player payload.
pub async fn fetch_player_records(client: &Client, url: &str) -> Result<Vec<PlayerRecord>> {
    let body = client
        .get(url)
        .headers(pool_header_map()?)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    parse_player_records(&body)
}
