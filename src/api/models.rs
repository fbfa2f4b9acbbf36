use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub name: String,
    pub status: String,
}

/// A DNS record as the provider represents it.
///
/// `id` is assigned by the server and stays empty until the record has been
/// created; an empty id is left out of request bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub r#type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(default)]
    pub proxied: bool,
}

impl DnsRecord {
    /// TTL value the provider reads as "automatic".
    pub const TTL_AUTO: u32 = 1;
}

#[derive(Debug, Default, Deserialize)]
pub struct TokenStatus {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// Pagination block of list responses. Only the page count steers iteration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ResultInfo {
    #[serde(default)]
    pub total_pages: u32,
}

/// Envelope wrapped around every API response. `result` is kept as raw JSON
/// until the caller names the type it expects.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
    #[serde(default)]
    pub result_info: Option<ResultInfo>,
    #[serde(default)]
    pub result: Option<Box<RawValue>>,
}
