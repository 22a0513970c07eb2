//! Domain model: site requests, command invocations, routing resources.

pub mod command;
pub mod routing;
pub mod site;

pub use command::{CommandPoll, CommandStatus};
pub use routing::{HealthCheckPolicy, RuleSummary, TargetSpec};
pub use site::{ProvisionedSite, SiteRequest};
