//! Wire types for the DNS publisher API.

use serde::{Deserialize, Serialize};

/// DNS record type. Only the types the provisioning flow needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    #[serde(rename = "CNAME")]
    Cname,
    A,
    #[serde(rename = "TXT")]
    Txt,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cname => f.write_str("CNAME"),
            Self::A => f.write_str("A"),
            Self::Txt => f.write_str("TXT"),
        }
    }
}

impl std::str::FromStr for RecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CNAME" => Ok(Self::Cname),
            "A" => Ok(Self::A),
            "TXT" => Ok(Self::Txt),
            other => Err(format!("unsupported record type: {other}")),
        }
    }
}

/// A record to publish: `{name} {type} -> {content}` with a TTL.
#[derive(Debug, Clone, Serialize)]
pub struct DnsRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: RecordType,
    pub content: String,
    pub ttl: u32,
}

/// A record as returned by the publisher.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordResponse {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Error detail inside the publisher's envelope.
#[derive(Debug, Deserialize)]
pub struct EnvelopeError {
    #[serde(default)]
    pub message: String,
}

/// The publisher wraps every response in `{success, errors, result}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<EnvelopeError>,
    pub result: Option<T>,
}
