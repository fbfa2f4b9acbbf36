use comfy_table::{Attribute, Cell, Table};

use crate::api::models::{DnsRecord, Zone};

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|title| Cell::new(title).add_attribute(Attribute::Bold))
        .collect()
}

pub fn zones_table(zones: &[Zone]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "NAME", "STATUS"]));

    for zone in zones {
        table.add_row(vec![&zone.id, &zone.name, &zone.status]);
    }

    table
}

pub fn records_table(records: &[DnsRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(header(&["ID", "TYPE", "NAME", "CONTENT", "TTL", "PROXIED"]));

    for record in records {
        table.add_row(vec![
            record.id.clone(),
            record.r#type.clone(),
            record.name.clone(),
            record.content.clone(),
            format_ttl(record.ttl),
            record.proxied.to_string(),
        ]);
    }

    table
}

pub fn format_ttl(ttl: u32) -> String {
    if ttl == DnsRecord::TTL_AUTO {
        "auto".to_string()
    } else {
        ttl.to_string()
    }
}
