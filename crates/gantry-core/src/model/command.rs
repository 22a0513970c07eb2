// ── Remote command invocation state ──

/// Status of a remote command invocation as seen by the orchestrator.
///
/// Terminal states ([`Success`](Self::Success) / [`Failed`](Self::Failed))
/// never change once observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Dispatched but not yet finished (covers queued and running).
    Pending,
    Success,
    Failed,
}

impl CommandStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// One status poll's view of an invocation.
#[derive(Debug, Clone)]
pub struct CommandPoll {
    pub status: CommandStatus,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl CommandPoll {
    /// The state before the first poll returns.
    pub fn pending() -> Self {
        Self {
            status: CommandStatus::Pending,
            stdout: None,
            stderr: None,
        }
    }
}

impl From<gantry_api::exec::InvocationResult> for CommandPoll {
    fn from(raw: gantry_api::exec::InvocationResult) -> Self {
        use gantry_api::exec::InvocationStatus;

        let status = match raw.status {
            InvocationStatus::Pending | InvocationStatus::Running => CommandStatus::Pending,
            InvocationStatus::Success => CommandStatus::Success,
            InvocationStatus::Failed => CommandStatus::Failed,
        };
        Self {
            status,
            stdout: raw.stdout,
            stderr: raw.stderr,
        }
    }
}
