// Client for the load-balancer admin API.
//
// Target groups, member registration, and priority-ranked listener
// rules. Priority uniqueness is enforced server-side per listener; the
// client surfaces that rejection as a distinct error.

pub mod client;
pub mod types;

pub use client::BalancerClient;
pub use types::{HealthCheck, Rule, TargetGroupCreate};
