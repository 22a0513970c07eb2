//! Wire types for the command-execution channel.

use serde::{Deserialize, Serialize};

/// Status of a command invocation as reported by the management agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum InvocationStatus {
    Pending,
    Running,
    Success,
    Failed,
}

impl InvocationStatus {
    /// Terminal states never change once observed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// Request body for dispatching a command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequest<'a> {
    pub command: &'a str,
    pub timeout_secs: u64,
}

/// Response body from a dispatch call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchResponse {
    pub invocation_id: String,
}

/// Invocation state returned by a status poll.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResult {
    pub status: InvocationStatus,
    #[serde(default)]
    pub stdout: Option<String>,
    #[serde(default)]
    pub stderr: Option<String>,
}
