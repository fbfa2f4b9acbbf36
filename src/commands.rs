use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use log::{debug, info};
use std::io::Write;

use crate::api::{models::DnsRecord, DnsApi};
use crate::output;

/// TTL used for new or edited records when `--ttl` is not given.
pub const DEFAULT_TTL: u32 = 600;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Verify API token and connectivity
    Ping,
    /// Manage Cloudflare DNS zones
    #[command(subcommand)]
    Zone(ZoneCommand),
    /// Manage Cloudflare DNS records
    #[command(subcommand)]
    Dns(DnsCommand),
}

#[derive(Debug, Subcommand)]
pub enum ZoneCommand {
    /// List all zones in the account
    List,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// List all DNS records for a zone
    List {
        /// Domain name (e.g. example.com)
        #[arg(long)]
        zone: String,
    },
    /// Create a DNS record
    Create {
        /// Domain name (e.g. example.com)
        #[arg(long)]
        zone: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Replace a DNS record by ID
    Edit {
        /// Domain name (e.g. example.com)
        #[arg(long)]
        zone: String,
        /// Record ID as shown by `dns list`
        #[arg(long)]
        id: String,
        #[command(flatten)]
        record: RecordArgs,
    },
    /// Delete a DNS record by ID
    Delete {
        /// Domain name (e.g. example.com)
        #[arg(long)]
        zone: String,
        /// Record ID as shown by `dns list`
        #[arg(long)]
        id: String,
    },
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Full record name (e.g. test.example.com)
    #[arg(long)]
    pub name: String,
    /// Record type (A, AAAA, CNAME, TXT, MX, etc.)
    #[arg(long = "type")]
    pub record_type: String,
    /// Record content (e.g. IP address or target)
    #[arg(long)]
    pub content: String,
    /// Time to live in seconds (1 = automatic)
    #[arg(long, default_value_t = DEFAULT_TTL)]
    pub ttl: u32,
    /// Route traffic through the Cloudflare proxy
    #[arg(long)]
    pub proxied: bool,
}

impl From<RecordArgs> for DnsRecord {
    fn from(args: RecordArgs) -> Self {
        DnsRecord {
            id: String::new(),
            r#type: args.record_type,
            name: args.name,
            content: args.content,
            ttl: args.ttl,
            proxied: args.proxied,
        }
    }
}

pub async fn run(api: &dyn DnsApi, command: Command, out: &mut dyn Write) -> Result<()> {
    match command {
        Command::Ping => ping(api, out).await,
        Command::Zone(ZoneCommand::List) => list_zones(api, out).await,
        Command::Dns(command) => run_dns(api, command, out).await,
    }
}

async fn ping(api: &dyn DnsApi, out: &mut dyn Write) -> Result<()> {
    api.verify_token().await?;
    writeln!(out, "✓ Token is valid")?;
    Ok(())
}

async fn list_zones(api: &dyn DnsApi, out: &mut dyn Write) -> Result<()> {
    let zones = api.list_zones().await.context("Failed to list zones")?;
    debug!("Fetched {} zone(s)", zones.len());

    if zones.is_empty() {
        writeln!(out, "No zones found")?;
        return Ok(());
    }

    writeln!(out, "{}", output::zones_table(&zones))?;
    Ok(())
}

async fn resolve_zone(api: &dyn DnsApi, zone: &str) -> Result<String> {
    debug!("Resolving zone ID for {}", zone);
    let zone_id = api.get_zone_id(zone).await?;
    debug!("Zone {} has ID {}", zone, zone_id);
    Ok(zone_id)
}

async fn run_dns(api: &dyn DnsApi, command: DnsCommand, out: &mut dyn Write) -> Result<()> {
    match command {
        DnsCommand::List { zone } => {
            let zone_id = resolve_zone(api, &zone).await?;
            let records = api
                .list_records(&zone_id)
                .await
                .with_context(|| format!("Failed to list records for {}", zone))?;
            debug!("Fetched {} record(s) for {}", records.len(), zone);

            if records.is_empty() {
                writeln!(out, "No records found for {}", zone)?;
                return Ok(());
            }

            writeln!(out, "{}", output::records_table(&records))?;
        }
        DnsCommand::Create { zone, record } => {
            let zone_id = resolve_zone(api, &zone).await?;
            let result = api.create_record(&zone_id, &DnsRecord::from(record)).await?;
            info!("Created record {} in zone {}", result.id, zone);

            writeln!(
                out,
                "✓ Created {} record {} → {} (ID: {})",
                result.r#type, result.name, result.content, result.id
            )?;
        }
        DnsCommand::Edit { zone, id, record } => {
            let zone_id = resolve_zone(api, &zone).await?;
            let result = api
                .edit_record(&zone_id, &id, &DnsRecord::from(record))
                .await?;
            info!("Updated record {} in zone {}", result.id, zone);

            writeln!(
                out,
                "✓ Updated {} record {} → {} (ID: {})",
                result.r#type, result.name, result.content, result.id
            )?;
        }
        DnsCommand::Delete { zone, id } => {
            let zone_id = resolve_zone(api, &zone).await?;
            api.delete_record(&zone_id, &id).await?;
            info!("Deleted record {} in zone {}", id, zone);

            writeln!(out, "✓ Deleted record {}", id)?;
        }
    }

    Ok(())
}
