// Client for the command-execution channel.
//
// Dispatches shell commands to a managed host through the out-of-band
// management agent and polls invocation status. Dispatch is NOT
// idempotent; callers must never re-dispatch the same command.

pub mod client;
pub mod types;

pub use client::ExecClient;
pub use types::{InvocationResult, InvocationStatus};
