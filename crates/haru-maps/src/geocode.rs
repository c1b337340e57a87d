//! Forward geocoding: convert an address or place name to coordinates.
//! Uses the Kakao Local search API (REST key required).

use reqwest::{header, Client};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::distance::Coordinates;
use crate::error::MapsError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    documents: Vec<SearchDocument>,
}

/// Both address and keyword search return coordinates as decimal strings
#[derive(Debug, Deserialize)]
struct SearchDocument {
    x: String,
    y: String,
}

#[derive(Debug, Clone, Copy)]
enum SearchKind {
    Address,
    Keyword,
}

impl SearchKind {
    fn path(&self) -> &'static str {
        match self {
            Self::Address => "/v2/local/search/address.json",
            Self::Keyword => "/v2/local/search/keyword.json",
        }
    }
}

/// Kakao Local API client
#[derive(Debug, Clone)]
pub struct KakaoGeocoder {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
}

impl KakaoGeocoder {
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self, MapsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve `query` to coordinates.
    ///
    /// Tries address search first and falls back to keyword search, so both
    /// "서울특별시 강남구" and "강남역" work. Failures (including a rejected
    /// key) are logged and read as "not found".
    pub async fn coordinates(&self, query: &str) -> Option<Coordinates> {
        match self.lookup(query).await {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("Geocoding '{}' failed: {}", query, e);
                None
            }
        }
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinates>, MapsError> {
        if let Some(coords) = self.search(SearchKind::Address, query).await? {
            tracing::info!("Address search resolved '{}' -> {}", query, coords);
            return Ok(Some(coords));
        }

        tracing::debug!("Address search missed, trying keyword search: {}", query);
        if let Some(coords) = self.search(SearchKind::Keyword, query).await? {
            tracing::info!("Keyword search resolved '{}' -> {}", query, coords);
            return Ok(Some(coords));
        }

        tracing::info!("No coordinates found for '{}'", query);
        Ok(None)
    }

    async fn search(&self, kind: SearchKind, query: &str) -> Result<Option<Coordinates>, MapsError> {
        let url = format!("{}{}", self.base_url, kind.path());

        let response = self
            .client
            .get(&url)
            .header(header::AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .query(&[("query", query)])
            .send()
            .await?;

        tracing::debug!("{:?} search status: {}", kind, response.status());
        let response = response.error_for_status()?;

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| MapsError::Parse(e.to_string()))?;
        tracing::debug!("{:?} search for '{}': {} documents", kind, query, body.documents.len());

        let Some(doc) = body.documents.into_iter().next() else {
            return Ok(None);
        };

        let longitude = doc
            .x
            .parse::<f64>()
            .map_err(|e| MapsError::Parse(format!("x '{}': {}", doc.x, e)))?;
        let latitude = doc
            .y
            .parse::<f64>()
            .map_err(|e| MapsError::Parse(format!("y '{}': {}", doc.y, e)))?;

        Ok(Some(Coordinates::new(longitude, latitude)))
    }
}
