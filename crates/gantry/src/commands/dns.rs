//! DNS command handlers.

use gantry_api::dns::{DnsRecord, RecordType};

use crate::cli::{DnsArgs, DnsCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

fn parse_record_type(raw: &str) -> Result<RecordType, CliError> {
    raw.parse().map_err(|reason: String| CliError::Validation {
        field: "type".into(),
        reason,
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: DnsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        DnsCommand::Upsert {
            name,
            content,
            record_type,
            ttl,
        } => {
            let record = DnsRecord {
                name,
                record_type: parse_record_type(&record_type)?,
                content,
                ttl,
            };

            let client = util::dns_client(global)?;
            let id = client.upsert_record(&record).await?;

            let view = output::View {
                data: &record,
                text: format!(
                    "{} {} -> {} (id {id})",
                    record.name, record.record_type, record.content
                ),
                plain: id.clone(),
            };
            output::print(&output::render(&global.output, view), global.quiet);
            Ok(())
        }

        DnsCommand::Delete { name, record_type } => {
            let record_type = parse_record_type(&record_type)?;

            let client = util::dns_client(global)?;
            let deleted = client.delete_record(&name, record_type).await?;

            if !global.quiet {
                if deleted {
                    eprintln!("Record {name} {record_type} deleted");
                } else {
                    eprintln!("No {record_type} record named {name}");
                }
            }
            Ok(())
        }
    }
}
