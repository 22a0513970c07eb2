use thiserror::Error;

/// Top-level error type for the `gantry-api` crate.
///
/// Covers every failure mode across the three service clients: transport,
/// authentication, structured API rejections, and the two conflict shapes
/// the orchestrator must be able to tell apart (rule priority, target name).
/// `gantry-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Token rejected by the service.
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Structured API errors ───────────────────────────────────────
    /// Error envelope from a service.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        message: String,
        code: Option<String>,
        status: u16,
    },

    /// Rule creation rejected because the priority is already taken on
    /// the listener. Distinct from [`Error::Api`] so callers can retry
    /// with a fresh priority.
    #[error("Listener rule priority {priority} already in use")]
    PriorityConflict { priority: u32 },

    /// Resource creation rejected because the name already exists
    /// (e.g. a target group for the same site).
    #[error("Name already in use: {name}")]
    NameConflict { name: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// The DNS publisher answered 200 but flagged the request as failed
    /// inside its envelope.
    #[error("DNS API rejected the request: {message}")]
    DnsRejected { message: String },
}

impl Error {
    /// Returns `true` if this is a rule-priority collision.
    pub fn is_priority_conflict(&self) -> bool {
        matches!(self, Self::PriorityConflict { .. })
    }

    /// Returns `true` if this is a transient error worth retrying.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
