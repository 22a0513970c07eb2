// Hand-crafted async HTTP client for the DNS publisher.
//
// Zone-scoped REST API with a `{success, errors, result}` envelope.
// Base path: /zones/{zone_id}/
// Auth: Authorization: Bearer (injected by TransportConfig)

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::types::{DnsRecord, Envelope, RecordResponse, RecordType};
use crate::error::Error;
use crate::http::{body_preview, normalize_base_url};
use crate::transport::TransportConfig;

/// Async client for the zone-scoped DNS publisher.
pub struct DnsClient {
    http: reqwest::Client,
    base_url: Url,
    zone_id: String,
}

impl DnsClient {
    /// Build from a zone id, service token, and transport config.
    pub fn from_token(
        base_url: &str,
        zone_id: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_token(token)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            zone_id: zone_id.to_owned(),
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, zone_id: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            zone_id: zone_id.to_owned(),
        })
    }

    fn url(&self, path: &str) -> Url {
        self.base_url
            .join(&format!("zones/{}/{path}", self.zone_id))
            .expect("path should be valid relative URL")
    }

    /// Upsert a record keyed by `(name, type)`.
    ///
    /// Lists existing records first: a match is updated in place (PUT),
    /// otherwise a new record is created (POST). Returns the record id.
    pub async fn upsert_record(&self, record: &DnsRecord) -> Result<String, Error> {
        let existing = self.find_record(&record.name, record.record_type).await?;

        let resp = match existing {
            Some(ref found) => {
                let url = self.url(&format!("dns_records/{}", found.id));
                debug!("PUT {url}");
                self.http.put(url).json(record).send().await?
            }
            None => {
                let url = self.url("dns_records");
                debug!("POST {url}");
                self.http.post(url).json(record).send().await?
            }
        };

        let updated: RecordResponse = self.handle_envelope(resp).await?;
        info!(
            name = %record.name,
            record_type = %record.record_type,
            updated = existing.is_some(),
            "dns record published"
        );
        Ok(updated.id)
    }

    /// Delete the record keyed by `(name, type)`, if it exists.
    ///
    /// Returns `true` when a record was found and deleted.
    pub async fn delete_record(&self, name: &str, record_type: RecordType) -> Result<bool, Error> {
        let Some(found) = self.find_record(name, record_type).await? else {
            return Ok(false);
        };

        let url = self.url(&format!("dns_records/{}", found.id));
        debug!("DELETE {url}");
        let resp = self.http.delete(url).send().await?;
        let _: RecordResponse = self.handle_envelope(resp).await?;
        info!(%name, %record_type, "dns record deleted");
        Ok(true)
    }

    /// Look up the record matching `(name, type)`, if any.
    async fn find_record(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<Option<RecordResponse>, Error> {
        let url = self.url("dns_records");
        debug!("GET {url} name={name} type={record_type}");

        let resp = self
            .http
            .get(url)
            .query(&[("name", name), ("type", &record_type.to_string())])
            .send()
            .await?;

        let mut records: Vec<RecordResponse> = self.handle_envelope(resp).await?;
        Ok(if records.is_empty() {
            None
        } else {
            Some(records.swap_remove(0))
        })
    }

    /// Unwrap the publisher's `{success, errors, result}` envelope.
    async fn handle_envelope<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "DNS publisher rejected the token".into(),
            });
        }

        let body = resp.text().await?;
        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })?;

        if !envelope.success {
            let message = envelope
                .errors
                .first()
                .map_or_else(|| status.to_string(), |e| e.message.clone());
            return Err(Error::DnsRejected { message });
        }

        envelope.result.ok_or(Error::Deserialization {
            message: "envelope flagged success but carried no result".into(),
            body,
        })
    }
}
