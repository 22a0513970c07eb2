// ── Routing resources: targets and listener rules ──

use serde::Serialize;

/// Health-check policy attached to a routing target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthCheckPolicy {
    pub path: String,
    pub interval_secs: u32,
    pub timeout_secs: u32,
    pub healthy_threshold: u32,
    pub unhealthy_threshold: u32,
}

impl Default for HealthCheckPolicy {
    /// The policy every provisioned site gets: `/health` every 30s,
    /// 5s timeout, healthy after 2 passes, unhealthy after 5 misses.
    fn default() -> Self {
        Self {
            path: "/health".into(),
            interval_secs: 30,
            timeout_secs: 5,
            healthy_threshold: 2,
            unhealthy_threshold: 5,
        }
    }
}

/// Specification for a routing target to be created.
///
/// Targets are created once per site and never updated; there is no
/// decommission flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSpec {
    /// Target group name, `{site_name}-tg`.
    pub name: String,
    pub port: u16,
    pub health_check: HealthCheckPolicy,
}

impl TargetSpec {
    /// The conventional target for a site: `{site_name}-tg` on the
    /// site's port with the default health check.
    pub fn for_site(site_name: &str, port: u16) -> Self {
        Self {
            name: format!("{site_name}-tg"),
            port,
            health_check: HealthCheckPolicy::default(),
        }
    }
}

/// A listener rule as seen during priority allocation.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSummary {
    pub priority: u32,
    /// The listener's catch-all rule; never counted for allocation.
    pub is_default: bool,
    pub host_pattern: Option<String>,
    pub target_id: Option<String>,
}

impl From<gantry_api::balancer::Rule> for RuleSummary {
    fn from(raw: gantry_api::balancer::Rule) -> Self {
        Self {
            priority: raw.priority,
            is_default: raw.is_default,
            host_pattern: raw.host_pattern,
            target_id: raw.target_group_id,
        }
    }
}

impl From<&HealthCheckPolicy> for gantry_api::balancer::HealthCheck {
    fn from(policy: &HealthCheckPolicy) -> Self {
        Self {
            path: policy.path.clone(),
            interval_secs: policy.interval_secs,
            timeout_secs: policy.timeout_secs,
            healthy_threshold: policy.healthy_threshold,
            unhealthy_threshold: policy.unhealthy_threshold,
        }
    }
}
