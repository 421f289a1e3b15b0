use crate::config::CivicConfig;
use crate::error::Result;
use crate::types::{LegislatorFinder, LegislatorLookup};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Fixed message handed to attendees when the lookup cannot produce names.
pub const LOOKUP_FALLBACK: &str =
    "You can find your representatives by visiting www.commoncause.org/take-action/find-elected-officials";

const API_KEY_VAR: &str = "GOOGLE_API_KEY";

/// The subset of the Civic Information v2 representatives payload we read.
#[derive(Debug, Deserialize)]
struct RepresentativesResponse {
    #[serde(default)]
    officials: Vec<Official>,
}

#[derive(Debug, Deserialize)]
struct Official {
    name: String,
}

/// Client for the Google Civic Information representatives endpoint.
pub struct CivicInfoClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl CivicInfoClient {
    pub fn new(config: &CivicConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        let api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            warn!("{} not set, every representative lookup will fall back", API_KEY_VAR);
        }

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key,
        })
    }

    async fn fetch_officials(&self, zipcode: &str, key: &str) -> Result<Vec<String>> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("address", zipcode),
                ("levels", "country"),
                ("roles", "legislatorUpperBody"),
                ("roles", "legislatorLowerBody"),
                ("key", key),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: RepresentativesResponse = response.json().await?;
        Ok(body.officials.into_iter().map(|o| o.name).collect())
    }
}

#[async_trait::async_trait]
impl LegislatorFinder for CivicInfoClient {
    /// Any failure (missing key, network, auth, not-found, decode, empty
    /// result) collapses into the fallback message so one bad lookup never
    /// stalls the record it belongs to.
    #[instrument(skip(self))]
    async fn lookup(&self, zipcode: &str) -> LegislatorLookup {
        let Some(key) = self.api_key.as_deref() else {
            return LegislatorLookup::Fallback(LOOKUP_FALLBACK.to_string());
        };

        match self.fetch_officials(zipcode, key).await {
            Ok(names) if !names.is_empty() => {
                debug!("found {} officials for {}", names.len(), zipcode);
                LegislatorLookup::Officials(names)
            }
            Ok(_) => {
                warn!("no officials returned for {}", zipcode);
                LegislatorLookup::Fallback(LOOKUP_FALLBACK.to_string())
            }
            Err(e) => {
                warn!("representative lookup failed for {}: {}", zipcode, e);
                LegislatorLookup::Fallback(LOOKUP_FALLBACK.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_official_names_from_v2_payload() {
        let payload = r#"{
            "kind": "civicinfo#representativeInfoResponse",
            "officials": [
                {"name": "Maria Cantwell", "party": "Democratic Party"},
                {"name": "Patty Murray", "party": "Democratic Party"}
            ]
        }"#;

        let body: RepresentativesResponse = serde_json::from_str(payload).unwrap();
        let names: Vec<String> = body.officials.into_iter().map(|o| o.name).collect();
        assert_eq!(names, vec!["Maria Cantwell", "Patty Murray"]);
    }

    #[test]
    fn missing_officials_field_decodes_as_empty() {
        let body: RepresentativesResponse =
            serde_json::from_str(r#"{"kind": "civicinfo#representativeInfoResponse"}"#).unwrap();
        assert!(body.officials.is_empty());
    }

    #[tokio::test]
    async fn lookup_without_api_key_falls_back() {
        let client = CivicInfoClient {
            client: reqwest::Client::new(),
            endpoint: "https://example.invalid".to_string(),
            api_key: None,
        };

        let lookup = client.lookup("20010").await;
        assert_eq!(lookup, LegislatorLookup::Fallback(LOOKUP_FALLBACK.to_string()));
    }
}
