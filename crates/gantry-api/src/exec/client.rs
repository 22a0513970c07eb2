// Hand-crafted async HTTP client for the command-execution channel.
//
// Base path: /v1/
// Auth: Authorization: Bearer (injected by TransportConfig)

use std::time::Duration;

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::types::{DispatchRequest, DispatchResponse, InvocationResult};
use crate::error::Error;
use crate::http::{self, normalize_base_url};
use crate::transport::TransportConfig;

/// Async client for the host management agent's command channel.
pub struct ExecClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ExecClient {
    /// Build from a service token and transport config.
    pub fn from_token(
        base_url: &str,
        token: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client_with_token(token)?;
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/`, so joining `v1/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Dispatch a shell command to a host. Returns the invocation id.
    ///
    /// One dispatch mutates remote host state; the setup scripts do not
    /// tolerate re-invocation, so there is no retry here.
    pub async fn dispatch(
        &self,
        host_id: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<String, Error> {
        let url = self.url(&format!("v1/hosts/{host_id}/invocations"));
        debug!("POST {url}");

        let body = DispatchRequest {
            command,
            timeout_secs: timeout.as_secs(),
        };
        let resp = self.http.post(url).json(&body).send().await?;
        let dispatched: DispatchResponse = http::handle_json(resp).await?;
        Ok(dispatched.invocation_id)
    }

    /// Poll the status of a previously dispatched invocation.
    pub async fn get_invocation(
        &self,
        host_id: &str,
        invocation_id: &str,
    ) -> Result<InvocationResult, Error> {
        let url = self.url(&format!("v1/hosts/{host_id}/invocations/{invocation_id}"));
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        http::handle_json(resp).await
    }
}
