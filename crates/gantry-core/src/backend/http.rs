// HTTP-backed implementations of the backend seams, delegating to the
// `gantry-api` clients.

use std::time::Duration;

use gantry_api::dns::DnsRecord;
use gantry_api::{BalancerClient, DnsClient, ExecClient};

use super::{CommandChannel, DnsPublisher, RoutingBackend};
use crate::model::{CommandPoll, RuleSummary, TargetSpec};

impl CommandChannel for ExecClient {
    async fn dispatch(
        &self,
        host_id: &str,
        command: &str,
        timeout: Duration,
    ) -> Result<String, gantry_api::Error> {
        ExecClient::dispatch(self, host_id, command, timeout).await
    }

    async fn poll(
        &self,
        host_id: &str,
        invocation_id: &str,
    ) -> Result<CommandPoll, gantry_api::Error> {
        let raw = self.get_invocation(host_id, invocation_id).await?;
        Ok(CommandPoll::from(raw))
    }
}

impl RoutingBackend for BalancerClient {
    async fn create_target(&self, spec: &TargetSpec) -> Result<String, gantry_api::Error> {
        self.create_target_group(&spec.name, spec.port, (&spec.health_check).into())
            .await
    }

    async fn register_host(
        &self,
        target_id: &str,
        host_id: &str,
        port: u16,
    ) -> Result<(), gantry_api::Error> {
        self.register_member(target_id, host_id, port).await
    }

    async fn list_rules(&self, listener_id: &str) -> Result<Vec<RuleSummary>, gantry_api::Error> {
        let raw = BalancerClient::list_rules(self, listener_id).await?;
        Ok(raw.into_iter().map(RuleSummary::from).collect())
    }

    async fn create_rule(
        &self,
        listener_id: &str,
        priority: u32,
        host_pattern: &str,
        target_id: &str,
    ) -> Result<(), gantry_api::Error> {
        BalancerClient::create_rule(self, listener_id, priority, host_pattern, target_id).await
    }
}

impl DnsPublisher for DnsClient {
    async fn publish(&self, record: DnsRecord) -> Result<(), gantry_api::Error> {
        self.upsert_record(&record).await.map(|_| ())
    }
}
