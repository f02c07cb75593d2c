//! Wire types for the Safe Browsing v4 `threatMatches:find` call.

use serde::{Deserialize, Serialize};

/// Threat categories every lookup asks about.
pub const THREAT_TYPES: [&str; 4] = [
    "MALWARE",
    "SOCIAL_ENGINEERING",
    "POTENTIALLY_HARMFUL_APPLICATION",
    "UNWANTED_SOFTWARE",
];

pub const PLATFORM_TYPES: [&str; 1] = ["ANY_PLATFORM"];

pub const THREAT_ENTRY_TYPES: [&str; 1] = ["URL"];

/// Request body for `threatMatches:find`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatchRequest {
    pub client: ClientInfo,
    pub threat_info: ThreatInfo,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientInfo {
    pub client_id: String,
    pub client_version: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatInfo {
    pub threat_types: Vec<String>,
    pub platform_types: Vec<String>,
    pub threat_entry_types: Vec<String>,
    pub threat_entries: Vec<ThreatEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThreatEntry {
    pub url: String,
}

impl ThreatMatchRequest {
    /// Builds a single-URL lookup identifying this crate as the client.
    pub fn for_url(url: &str) -> Self {
        Self {
            client: ClientInfo {
                client_id: env!("CARGO_PKG_NAME").to_string(),
                client_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            threat_info: ThreatInfo {
                threat_types: to_owned(&THREAT_TYPES),
                platform_types: to_owned(&PLATFORM_TYPES),
                threat_entry_types: to_owned(&THREAT_ENTRY_TYPES),
                threat_entries: vec![ThreatEntry {
                    url: url.to_string(),
                }],
            },
        }
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Response body of `threatMatches:find`.
///
/// The service answers `{}` when nothing matched, so `matches` defaults to
/// empty.
#[derive(Debug, Deserialize)]
pub struct ThreatMatchResponse {
    #[serde(default)]
    pub matches: Vec<ThreatMatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreatMatch {
    pub threat_type: Option<String>,
    pub platform_type: Option<String>,
    pub threat: Option<ThreatEntry>,
}

impl ThreatMatchResponse {
    /// Parses a response body, which must be a JSON object.
    pub fn parse(body: &str) -> Result<Self, String> {
        let value: serde_json::Value = serde_json::from_str(body).map_err(|e| e.to_string())?;

        if !value.is_object() {
            return Err("expected a JSON object".to_string());
        }

        serde_json::from_value(value).map_err(|e| e.to_string())
    }

    /// Threat types reported in the response, for logging.
    pub fn threat_types(&self) -> Vec<&str> {
        self.matches
            .iter()
            .filter_map(|m| m.threat_type.as_deref())
            .collect()
    }
}
