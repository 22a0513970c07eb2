//! Wire types for the balancer admin API.

use serde::{Deserialize, Serialize};

/// Health-check policy attached to a target group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheck {
    pub path: String,
    pub interval_secs: u32,
    pub timeout_secs: u32,
    pub healthy_threshold: u32,
    pub unhealthy_threshold: u32,
}

/// Request body for creating a target group.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetGroupCreate {
    pub name: String,
    pub port: u16,
    pub protocol: String,
    pub health_check: HealthCheck,
}

/// Response body from target group creation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetGroupResponse {
    pub id: String,
    pub name: String,
    pub port: u16,
}

/// Request body for registering a member host with a target group.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRegister<'a> {
    pub host_id: &'a str,
    pub port: u16,
}

/// A listener rule as returned by the rules listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub priority: u32,
    /// The listener's catch-all rule; excluded from priority allocation.
    #[serde(default, rename = "default")]
    pub is_default: bool,
    #[serde(default)]
    pub host_pattern: Option<String>,
    #[serde(default)]
    pub target_group_id: Option<String>,
}

/// Envelope for the rules listing.
#[derive(Debug, Deserialize)]
pub struct RulesPage {
    pub data: Vec<Rule>,
}

/// Request body for creating a listener rule.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleCreate<'a> {
    pub priority: u32,
    pub host_pattern: &'a str,
    pub target_group_id: &'a str,
}
