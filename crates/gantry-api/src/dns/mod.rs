// Client for the zone-scoped DNS publisher.
//
// Upserts are keyed by (name, type): the client lists existing records
// first and updates in place when one exists, otherwise creates. The
// orchestrator consumes this through a fire-and-forget dispatcher and
// never observes the outcome.

pub mod client;
pub mod types;

pub use client::DnsClient;
pub use types::{DnsRecord, RecordType};
