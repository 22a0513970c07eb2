// ── Site provisioning orchestration ──
//
// One `provision()` call drives the whole workflow in order: remote
// setup command, routing target, host registration, listener rule, DNS
// publish. The first failure aborts the remaining steps; nothing rolls
// back what already succeeded.

use std::sync::Arc;

use gantry_api::dns::{DnsRecord, RecordType};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::backend::{CommandChannel, DnsPublisher, RoutingBackend};
use crate::config::ProvisionerConfig;
use crate::error::CoreError;
use crate::model::{CommandPoll, CommandStatus, ProvisionedSite, SiteRequest, TargetSpec};
use crate::priority::next_priority;

/// Orchestrates site provisioning across the three backend seams.
///
/// Generic over the backends so tests can substitute in-process mocks;
/// production wires in the `gantry-api` clients.
pub struct Provisioner<C, R, D> {
    config: ProvisionerConfig,
    commands: C,
    routing: R,
    dns: Arc<D>,
    dns_tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl<C, R, D> Provisioner<C, R, D>
where
    C: CommandChannel,
    R: RoutingBackend,
    D: DnsPublisher + 'static,
{
    pub fn new(config: ProvisionerConfig, commands: C, routing: R, dns: D) -> Self {
        Self {
            config,
            commands,
            routing,
            dns: Arc::new(dns),
            dns_tasks: Mutex::new(Vec::new()),
        }
    }

    /// Wait for in-flight DNS publish tasks to finish.
    ///
    /// Outcomes stay invisible: failures were already logged by the
    /// tasks themselves. Short-lived processes call this before exit so
    /// the spawned publishes are not cut off mid-request.
    pub async fn settle_dns(&self) {
        let handles: Vec<_> = self.dns_tasks.lock().await.drain(..).collect();
        for handle in handles {
            let _ = handle.await;
        }
    }

    pub fn commands(&self) -> &C {
        &self.commands
    }

    pub fn routing(&self) -> &R {
        &self.routing
    }

    /// Provision one site end to end.
    ///
    /// Returns once the listener rule is installed; DNS publication is
    /// handed to a spawned task and its outcome is not part of the
    /// result. On failure, resources created by earlier steps are left
    /// in place for out-of-band cleanup.
    pub async fn provision(&self, request: SiteRequest) -> Result<ProvisionedSite, CoreError> {
        request.validate()?;
        let site_name = request.site_name.clone();
        let port = request.effective_port();
        let fqdn = format!("{site_name}.{}", self.config.domain);

        info!(site_name, port, "provisioning site");

        self.run_setup_command(&site_name, port).await?;
        let target_id = self.create_and_register_target(&site_name, port).await?;
        let priority = self.install_rule(&fqdn, &target_id).await?;
        self.publish_dns(&fqdn).await;

        let url = format!("https://{fqdn}");
        info!(site_name, %url, "site provisioned");
        Ok(ProvisionedSite {
            message: format!("Site {site_name} created successfully at {url}"),
            site_name,
            port,
            url,
            target_id,
            priority,
        })
    }

    // ── Step 1: remote setup command ─────────────────────────────────

    async fn run_setup_command(&self, site_name: &str, port: u16) -> Result<(), CoreError> {
        let command = format!("{} {site_name} {port}", self.config.setup_script);
        let host_id = &self.config.host_id;

        let invocation_id = self
            .commands
            .dispatch(host_id, &command, self.config.command_timeout)
            .await?;
        info!(host_id, invocation_id, "setup command dispatched");

        let result = self.await_invocation(&invocation_id).await?;
        match result.status {
            CommandStatus::Success => {
                debug!(invocation_id, "setup command succeeded");
                Ok(())
            }
            CommandStatus::Failed => Err(CoreError::CommandFailed {
                host_id: host_id.clone(),
                stderr: result.stderr.unwrap_or_else(|| "unknown error".into()),
            }),
            CommandStatus::Pending => Err(CoreError::CommandTimeout {
                attempts: self.config.poll_attempts,
                waited_secs: u64::from(self.config.poll_attempts)
                    * self.config.poll_interval.as_secs(),
            }),
        }
    }

    /// Poll the invocation until it reaches a terminal state or the
    /// poll budget runs out. A still-pending result after the last poll
    /// is returned as-is; the caller maps it to a timeout.
    async fn await_invocation(&self, invocation_id: &str) -> Result<CommandPoll, CoreError> {
        let mut last = CommandPoll::pending();
        for attempt in 1..=self.config.poll_attempts {
            last = self
                .commands
                .poll(&self.config.host_id, invocation_id)
                .await?;
            if last.status.is_terminal() {
                return Ok(last);
            }
            debug!(invocation_id, attempt, "setup command still pending");
            tokio::time::sleep(self.config.poll_interval).await;
        }
        Ok(last)
    }

    // ── Step 2: routing target + host registration ───────────────────

    async fn create_and_register_target(
        &self,
        site_name: &str,
        port: u16,
    ) -> Result<String, CoreError> {
        let spec = TargetSpec::for_site(site_name, port);
        let target_id =
            self.routing
                .create_target(&spec)
                .await
                .map_err(|source| CoreError::TargetCreateFailed {
                    name: spec.name.clone(),
                    source,
                })?;
        info!(target_id, name = %spec.name, "routing target created");

        if let Err(source) = self
            .routing
            .register_host(&target_id, &self.config.host_id, port)
            .await
        {
            warn!(
                target_id,
                "host registration failed; target left in place"
            );
            return Err(CoreError::HostRegisterFailed { target_id, source });
        }
        info!(target_id, port, "host registered with target");
        Ok(target_id)
    }

    // ── Step 3: listener rule with priority allocation ───────────────

    /// Allocate a priority and install the host-header rule, re-reading
    /// the rule set and re-allocating when a concurrent provisioner
    /// takes the same slot first.
    async fn install_rule(&self, host_pattern: &str, target_id: &str) -> Result<u32, CoreError> {
        let listener_id = &self.config.listener_id;
        let attempts = self.config.collision_retries + 1;

        for attempt in 1..=attempts {
            let rules = self.routing.list_rules(listener_id).await?;
            let priority = next_priority(&rules);

            match self
                .routing
                .create_rule(listener_id, priority, host_pattern, target_id)
                .await
            {
                Ok(()) => {
                    info!(listener_id, priority, host_pattern, "listener rule installed");
                    return Ok(priority);
                }
                Err(e) if e.is_priority_conflict() => {
                    warn!(listener_id, priority, attempt, "lost priority race, re-allocating");
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(CoreError::PriorityContention {
            listener_id: listener_id.clone(),
            attempts,
        })
    }

    // ── Step 4: fire-and-forget DNS ──────────────────────────────────

    /// Publish the site's CNAME from a spawned task. The provisioning
    /// result never reflects the outcome; a publish failure is logged
    /// and the record is expected to be fixed up out-of-band.
    async fn publish_dns(&self, fqdn: &str) {
        let record = DnsRecord {
            name: fqdn.to_owned(),
            record_type: RecordType::Cname,
            content: self.config.balancer_dns_name.clone(),
            ttl: self.config.dns_ttl,
        };
        let dns = Arc::clone(&self.dns);
        let handle = tokio::spawn(async move {
            match dns.publish(record).await {
                Ok(()) => debug!("dns record published"),
                Err(e) => warn!(error = %e, "dns publish failed"),
            }
        });
        self.dns_tasks.lock().await.push(handle);
    }
}
