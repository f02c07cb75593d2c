//! Google Safe Browsing v4 threat checker.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};
use ureq::Agent;
use url::Url;

use super::query::{ThreatMatchRequest, ThreatMatchResponse};
use crate::domain::entities::ThreatVerdict;
use crate::domain::threat_checker::{CheckError, ThreatChecker};

/// Production `threatMatches:find` endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://safebrowsing.googleapis.com/v4/threatMatches:find";

/// Threat checker backed by the Safe Browsing Lookup API.
///
/// Each call makes exactly one blocking HTTP request, executed on the tokio
/// blocking pool. Without an API key the checker is disabled and every URL
/// is reported safe without touching the network.
pub struct SafeBrowsingChecker {
    api_key: Option<String>,
    endpoint: Url,
    agent: Agent,
}

impl SafeBrowsingChecker {
    /// Creates a checker.
    ///
    /// `api_key` is trimmed; a blank key is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error if `endpoint` is not a valid URL.
    pub fn new(
        api_key: Option<String>,
        endpoint: &str,
        timeout: Duration,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(endpoint)?;
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if api_key.is_none() {
            warn!("GOOGLE_API_KEY is missing, Safe Browsing check disabled");
        } else {
            info!("Safe Browsing check enabled ({})", endpoint);
        }

        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();

        Ok(Self {
            api_key,
            endpoint,
            agent,
        })
    }

    /// Request URL carrying the API key as the `key` query parameter.
    fn request_url(&self, api_key: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("key", api_key);
        url
    }

    /// Performs the lookup synchronously. Runs inside `spawn_blocking`.
    fn lookup_sync(
        agent: Agent,
        url: Url,
        request: ThreatMatchRequest,
    ) -> Result<ThreatMatchResponse, CheckError> {
        let response = agent
            .post(url.as_str())
            .send_json(&request)
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => CheckError::Status(code),
                other => CheckError::Transport(other.to_string()),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CheckError::Status(status.as_u16()));
        }

        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| CheckError::Transport(e.to_string()))?;

        ThreatMatchResponse::parse(&body).map_err(CheckError::Malformed)
    }
}

#[async_trait]
impl ThreatChecker for SafeBrowsingChecker {
    async fn check(&self, url: &str) -> Result<ThreatVerdict, CheckError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Safe Browsing disabled, skipping check");
            return Ok(ThreatVerdict::Safe);
        };

        let agent = self.agent.clone();
        let request_url = self.request_url(api_key);
        let request = ThreatMatchRequest::for_url(url);

        let response =
            tokio::task::spawn_blocking(move || Self::lookup_sync(agent, request_url, request))
                .await
                .map_err(|e| CheckError::Task(e.to_string()))??;

        if response.matches.is_empty() {
            debug!("Safe Browsing: no matches for {}", url);
            Ok(ThreatVerdict::Safe)
        } else {
            info!(
                "Safe Browsing flagged {}: {:?}",
                url,
                response.threat_types()
            );
            Ok(ThreatVerdict::Unsafe)
        }
    }

    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    fn name(&self) -> &'static str {
        "safe-browsing"
    }
}
