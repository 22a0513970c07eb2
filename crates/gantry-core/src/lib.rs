//! Provisioning orchestration between `gantry-api` and consumers (CLI).
//!
//! This crate owns the business logic and domain model for the gantry
//! workspace:
//!
//! - **[`Provisioner`]** — The orchestrator. One
//!   [`provision()`](Provisioner::provision) call drives the full site
//!   workflow: remote setup command (dispatch + bounded status polling),
//!   routing target creation and host registration, rule priority
//!   allocation, rule installation, and a fire-and-forget DNS upsert.
//!   First failure aborts the remaining steps; there is no compensation
//!   layer, so partially created resources are left for out-of-band
//!   cleanup.
//!
//! - **Backend seams** ([`backend`]) — `CommandChannel`,
//!   `RoutingBackend`, and `DnsPublisher` traits abstract the three
//!   downstream systems. HTTP-backed implementations bind them to the
//!   `gantry-api` clients; tests substitute in-process mocks.
//!
//! - **Domain model** ([`model`]) — Site requests with derived ports,
//!   command invocation status, routing targets/rules, DNS records.

pub mod backend;
pub mod config;
pub mod error;
pub mod model;
pub mod priority;
pub mod provision;

// ── Primary re-exports ──────────────────────────────────────────────
pub use backend::{CommandChannel, DnsPublisher, RoutingBackend};
pub use config::ProvisionerConfig;
pub use error::CoreError;
pub use model::{
    CommandPoll, CommandStatus, HealthCheckPolicy, ProvisionedSite, RuleSummary, SiteRequest,
    TargetSpec,
};
pub use provision::Provisioner;
