use super::{
    client::DnsApi,
    error::{Error, Result},
    models::*,
};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Method};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::value::RawValue;

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Page size requested from every paginated endpoint.
const PER_PAGE: u32 = 50;

/// Client for the Cloudflare v4 API, authenticated with a bearer token.
///
/// Holds no state between calls besides the token and the pooled HTTP
/// connection, so one instance can be shared by every command.
pub struct CloudflareClient {
    client: reqwest::Client,
    api_token: String,
    base_url: String,
}

#[async_trait]
impl DnsApi for CloudflareClient {
    async fn list_zones(&self) -> Result<Vec<Zone>> {
        self.request_paginated("/zones").await
    }

    async fn get_zone_id(&self, domain: &str) -> Result<String> {
        let zones: Vec<Zone> = self
            .request(Method::GET, "/zones", &[("name", domain.to_string())], None)
            .await?
            .unwrap_or_default();

        // Assumes an exact name query never yields more than one zone.
        zones
            .into_iter()
            .next()
            .map(|zone| zone.id)
            .ok_or_else(|| Error::NotFound {
                domain: domain.to_string(),
            })
    }

    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>> {
        self.request_paginated(&format!("/zones/{}/dns_records", zone_id))
            .await
    }

    async fn create_record(&self, zone_id: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let body = encode(record)?;
        let created = self
            .request(
                Method::POST,
                &format!("/zones/{}/dns_records", zone_id),
                &[],
                Some(body),
            )
            .await?;
        Ok(created.unwrap_or_default())
    }

    async fn edit_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord> {
        let body = encode(record)?;
        let updated = self
            .request(
                Method::PUT,
                &format!("/zones/{}/dns_records/{}", zone_id, record_id),
                &[],
                Some(body),
            )
            .await?;
        Ok(updated.unwrap_or_default())
    }

    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()> {
        self.send(
            Method::DELETE,
            &format!("/zones/{}/dns_records/{}", zone_id, record_id),
            &[],
            None,
        )
        .await?;
        Ok(())
    }

    async fn verify_token(&self) -> Result<()> {
        // No result reads as an empty status.
        let token: TokenStatus = self
            .request(Method::GET, "/user/tokens/verify", &[], None)
            .await?
            .unwrap_or_default();

        if token.status != "active" {
            return Err(Error::TokenInvalid {
                status: token.status,
            });
        }

        Ok(())
    }
}

impl CloudflareClient {
    pub fn new(api_token: impl Into<String>) -> Self {
        Self::with_base_url(api_token, API_BASE_URL)
    }

    pub fn with_base_url(api_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            api_token: api_token.into(),
            base_url,
        }
    }

    /// Sends one request and unwraps the response envelope.
    ///
    /// Fails when the transport fails, when the body is not a valid envelope,
    /// or when the provider reports `success: false` (the first reported error
    /// wins). The HTTP status code is not consulted.
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse> {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.api_token)
            .header(CONTENT_TYPE, "application/json");

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let raw = response.bytes().await?;

        let envelope: ApiResponse = serde_json::from_slice(&raw).map_err(Error::Decoding)?;

        if !envelope.success {
            return Err(match envelope.errors.into_iter().next() {
                Some(detail) => Error::Api {
                    code: Some(detail.code),
                    message: detail.message,
                },
                None => Error::Api {
                    code: None,
                    message: "request failed".to_string(),
                },
            });
        }

        Ok(envelope)
    }

    /// Sends one request and decodes the envelope's `result` as `T`, or
    /// returns `None` when the envelope carries no result.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<Vec<u8>>,
    ) -> Result<Option<T>> {
        let envelope = self.send(method, path, query, body).await?;
        decode(envelope.result.as_deref())
    }

    /// Walks every page of a list endpoint and returns the items in the order
    /// the server produced them. Any failure discards the pages collected so
    /// far.
    async fn request_paginated<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let mut page: u32 = 1;
        let mut items: Vec<Box<RawValue>> = Vec::new();

        loop {
            let query = [("page", page.to_string()), ("per_page", PER_PAGE.to_string())];
            let envelope = self.send(Method::GET, path, &query, None).await?;

            let page_items: Option<Vec<Box<RawValue>>> = decode(envelope.result.as_deref())?;
            items.extend(page_items.unwrap_or_default());

            match envelope.result_info {
                Some(info) if page < info.total_pages => page += 1,
                _ => break,
            }
        }

        items
            .iter()
            .map(|item| serde_json::from_str(item.get()).map_err(Error::Decoding))
            .collect()
    }
}

fn encode<P: Serialize + ?Sized>(payload: &P) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(Error::Encoding)
}

/// Decodes a deferred `result` payload. An absent or `null` payload yields
/// `None` and leaves the target untouched.
fn decode<T: DeserializeOwned>(raw: Option<&RawValue>) -> Result<Option<T>> {
    match raw.map(RawValue::get) {
        None | Some("null") => Ok(None),
        Some(json) => serde_json::from_str(json).map(Some).map_err(Error::Decoding),
    }
}
