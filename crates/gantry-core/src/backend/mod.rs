// ── Backend seams ──
//
// Trait abstractions over the three downstream systems the orchestrator
// drives. The HTTP-backed implementations in [`http`] bind them to the
// `gantry-api` clients; tests substitute in-process mocks. Methods
// return `impl Future + Send` so generic orchestrator code and spawned
// dispatch tasks work without boxing.

pub mod http;

use std::future::Future;
use std::time::Duration;

use gantry_api::dns::DnsRecord;

use crate::model::{CommandPoll, RuleSummary, TargetSpec};

/// Out-of-band command execution on a managed host.
///
/// `dispatch` mutates remote host state and is NOT idempotent; the
/// orchestrator calls it exactly once per request and never retries it.
pub trait CommandChannel: Send + Sync {
    /// Send a shell command to the host. Returns an invocation id.
    fn dispatch(
        &self,
        host_id: &str,
        command: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, gantry_api::Error>> + Send;

    /// Poll the status of a dispatched invocation.
    fn poll(
        &self,
        host_id: &str,
        invocation_id: &str,
    ) -> impl Future<Output = Result<CommandPoll, gantry_api::Error>> + Send;
}

/// Routing targets and priority-ranked listener rules on the balancer.
///
/// There is deliberately no delete verb: the provisioning flow never
/// compensates, and decommissioning is out of scope.
pub trait RoutingBackend: Send + Sync {
    /// Create a routing target. Returns its id.
    fn create_target(
        &self,
        spec: &TargetSpec,
    ) -> impl Future<Output = Result<String, gantry_api::Error>> + Send;

    /// Register a host with a target on the given port.
    fn register_host(
        &self,
        target_id: &str,
        host_id: &str,
        port: u16,
    ) -> impl Future<Output = Result<(), gantry_api::Error>> + Send;

    /// List all rules on a listener, including the default rule.
    fn list_rules(
        &self,
        listener_id: &str,
    ) -> impl Future<Output = Result<Vec<RuleSummary>, gantry_api::Error>> + Send;

    /// Install a host-header forwarding rule at the given priority.
    ///
    /// Implementations must surface a priority collision as
    /// [`gantry_api::Error::PriorityConflict`].
    fn create_rule(
        &self,
        listener_id: &str,
        priority: u32,
        host_pattern: &str,
        target_id: &str,
    ) -> impl Future<Output = Result<(), gantry_api::Error>> + Send;
}

/// DNS record publication.
///
/// Consumed fire-and-forget: the orchestrator hands the record to a
/// spawned task and never observes the outcome.
pub trait DnsPublisher: Send + Sync {
    /// Upsert a record keyed by `(name, type)`.
    fn publish(
        &self,
        record: DnsRecord,
    ) -> impl Future<Output = Result<(), gantry_api::Error>> + Send;
}
