// ── Provisioner configuration ──
//
// Identifies the shared infrastructure one provisioner instance drives:
// the backing host, the listener whose rule set it appends to, and the
// DNS names it publishes under. Resolved once at process start and
// treated as immutable for the process lifetime — core never reads
// config files or the environment.

use std::time::Duration;

/// Interval between invocation status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Maximum number of status polls before the command is declared lost.
pub const DEFAULT_POLL_ATTEMPTS: u32 = 30;

/// Remote-side timeout passed to the command channel on dispatch.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(300);

/// Allocate-and-install retries after a rule priority collision.
pub const DEFAULT_COLLISION_RETRIES: u32 = 3;

/// TTL for published DNS records, in seconds.
pub const DEFAULT_DNS_TTL: u32 = 300;

/// Configuration for a [`Provisioner`](crate::Provisioner).
///
/// Built by the CLI from profile + environment, handed in whole.
#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
    /// Backing host that runs the site setup script.
    pub host_id: String,
    /// Shared listener that receives the host-header rules.
    pub listener_id: String,
    /// DNS name of the load balancer — the CNAME target for every site.
    pub balancer_dns_name: String,
    /// Parent domain; sites are published as `{site_name}.{domain}`.
    pub domain: String,
    /// Absolute path of the setup script on the backing host. Invoked
    /// as `{setup_script} {site_name} {port}`.
    pub setup_script: String,
    /// Remote-side timeout passed on dispatch.
    pub command_timeout: Duration,
    /// Interval between status polls.
    pub poll_interval: Duration,
    /// Poll budget; exceeding it fails the request.
    pub poll_attempts: u32,
    /// Allocate-and-install retries after a priority collision.
    pub collision_retries: u32,
    /// TTL for published DNS records.
    pub dns_ttl: u32,
}

impl ProvisionerConfig {
    /// Config with default tuning for the given infrastructure ids.
    pub fn new(
        host_id: impl Into<String>,
        listener_id: impl Into<String>,
        balancer_dns_name: impl Into<String>,
        domain: impl Into<String>,
        setup_script: impl Into<String>,
    ) -> Self {
        Self {
            host_id: host_id.into(),
            listener_id: listener_id.into(),
            balancer_dns_name: balancer_dns_name.into(),
            domain: domain.into(),
            setup_script: setup_script.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_attempts: DEFAULT_POLL_ATTEMPTS,
            collision_retries: DEFAULT_COLLISION_RETRIES,
            dns_ttl: DEFAULT_DNS_TTL,
        }
    }
}
