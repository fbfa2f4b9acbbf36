pub mod client;
pub mod cloudflare;
pub mod error;
pub mod models;

pub use client::DnsApi;
pub use cloudflare::CloudflareClient;
pub use error::{Error, Result};
