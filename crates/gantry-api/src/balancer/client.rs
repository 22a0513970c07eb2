// Hand-crafted async HTTP client for the balancer admin API.
//
// Base path: /v1/
// Auth: Authorization: Bearer (injected by TransportConfig)

use secrecy::SecretString;
use tracing::debug;
use url::Url;

use super::types::{
    HealthCheck, MemberRegister, Rule, RuleCreate, RulesPage, TargetGroupCreate,
    TargetGroupResponse,
};
use crate::error::Error;
use crate::http::{self, normalize_base_url};
use crate::transport::TransportConfig;

/// Async client for the load-balancer admin API.
pub struct BalancerClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BalancerClient {
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
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    /// Create a target group. Returns its id.
    ///
    /// A duplicate name is surfaced as [`Error::NameConflict`] so callers
    /// can tell "site already provisioned" apart from other rejections.
    pub async fn create_target_group(
        &self,
        name: &str,
        port: u16,
        health_check: HealthCheck,
    ) -> Result<String, Error> {
        let url = self.url("v1/target-groups");
        debug!("POST {url}");

        let body = TargetGroupCreate {
            name: name.to_owned(),
            port,
            protocol: "HTTP".to_owned(),
            health_check,
        };
        let resp = self.http.post(url).json(&body).send().await?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            // Drain the body but report the conflict by name.
            let _ = resp.text().await;
            return Err(Error::NameConflict {
                name: name.to_owned(),
            });
        }

        let created: TargetGroupResponse = http::handle_json(resp).await?;
        Ok(created.id)
    }

    /// Register a member host with a target group on the given port.
    pub async fn register_member(
        &self,
        target_group_id: &str,
        host_id: &str,
        port: u16,
    ) -> Result<(), Error> {
        let url = self.url(&format!("v1/target-groups/{target_group_id}/members"));
        debug!("POST {url}");

        let body = MemberRegister { host_id, port };
        let resp = self.http.post(url).json(&body).send().await?;
        http::handle_empty(resp).await
    }

    /// List all rules on a listener, including the default rule.
    pub async fn list_rules(&self, listener_id: &str) -> Result<Vec<Rule>, Error> {
        let url = self.url(&format!("v1/listeners/{listener_id}/rules"));
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        let page: RulesPage = http::handle_json(resp).await?;
        Ok(page.data)
    }

    /// Create a host-header forwarding rule at the given priority.
    ///
    /// A priority collision (concurrent writer won the slot) comes back
    /// as [`Error::PriorityConflict`]; the caller re-reads the rule set
    /// and retries with a fresh value.
    pub async fn create_rule(
        &self,
        listener_id: &str,
        priority: u32,
        host_pattern: &str,
        target_group_id: &str,
    ) -> Result<(), Error> {
        let url = self.url(&format!("v1/listeners/{listener_id}/rules"));
        debug!("POST {url} priority={priority}");

        let body = RuleCreate {
            priority,
            host_pattern,
            target_group_id,
        };
        let resp = self.http.post(url).json(&body).send().await?;

        if resp.status() == reqwest::StatusCode::CONFLICT {
            let _ = resp.text().await;
            return Err(Error::PriorityConflict { priority });
        }

        http::handle_empty(resp).await
    }
}
