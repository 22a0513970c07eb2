// ── Core error types ──
//
// User-facing errors from gantry-core. Each variant names the step that
// failed; consumers never see raw HTTP status codes. The
// `From<gantry_api::Error>` impl covers steps without a dedicated
// variant (rule listing, rule installation on non-conflict failures).

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Input validation (rejected before any remote call) ───────────
    #[error("Invalid site name: {reason}")]
    InvalidSiteName { reason: String },

    #[error("Invalid port: {reason}")]
    InvalidPort { reason: String },

    // ── Remote setup command ─────────────────────────────────────────
    /// The setup command reached a terminal `Failed` state.
    #[error("Site setup command failed on host {host_id}: {stderr}")]
    CommandFailed { host_id: String, stderr: String },

    /// The setup command never reached a terminal state within the poll
    /// budget. The invocation may still complete remotely; the site is
    /// NOT considered created.
    #[error("Site setup command still pending after {attempts} polls ({waited_secs}s)")]
    CommandTimeout { attempts: u32, waited_secs: u64 },

    // ── Routing target ───────────────────────────────────────────────
    #[error("Target creation failed for '{name}'")]
    TargetCreateFailed {
        name: String,
        #[source]
        source: gantry_api::Error,
    },

    /// Registration failed after the target was created. The target is
    /// left in place (no compensating delete) and must be cleaned up
    /// out-of-band.
    #[error("Host registration failed for target {target_id}; target left in place")]
    HostRegisterFailed {
        target_id: String,
        #[source]
        source: gantry_api::Error,
    },

    // ── Listener rule ────────────────────────────────────────────────
    /// Every allocation attempt lost the priority race. Retrying the
    /// whole request computes a fresh priority.
    #[error(
        "Could not install listener rule on {listener_id}: \
         priority contention persisted across {attempts} attempts"
    )]
    PriorityContention { listener_id: String, attempts: u32 },

    // ── Downstream passthrough ───────────────────────────────────────
    #[error("API error: {0}")]
    Api(#[from] gantry_api::Error),
}

impl CoreError {
    /// Returns `true` if retrying the whole request might succeed
    /// (priority contention, transient transport failures).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::PriorityContention { .. } => true,
            Self::Api(e) => e.is_transient(),
            _ => false,
        }
    }
}
