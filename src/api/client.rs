use super::error::Result;
use super::models::*;
use async_trait::async_trait;

#[async_trait]
pub trait DnsApi: Send + Sync {
    async fn list_zones(&self) -> Result<Vec<Zone>>;
    async fn get_zone_id(&self, domain: &str) -> Result<String>;
    async fn list_records(&self, zone_id: &str) -> Result<Vec<DnsRecord>>;
    async fn create_record(&self, zone_id: &str, record: &DnsRecord) -> Result<DnsRecord>;
    async fn edit_record(
        &self,
        zone_id: &str,
        record_id: &str,
        record: &DnsRecord,
    ) -> Result<DnsRecord>;
    async fn delete_record(&self, zone_id: &str, record_id: &str) -> Result<()>;
    async fn verify_token(&self) -> Result<()>;
}
