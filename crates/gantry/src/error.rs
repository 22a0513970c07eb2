//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use gantry_config::ConfigError;
use gantry_core::CoreError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const SETUP_FAILED: i32 = 4;
    pub const CONFLICT: i32 = 6;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(gantry::auth_failed),
        help(
            "Verify the API token for this profile.\n\
             Set it via GANTRY_TOKEN, the profile's token_env, or the system keyring."
        )
    )]
    AuthFailed { message: String },

    #[error("No API token configured for profile '{profile}'")]
    #[diagnostic(
        code(gantry::no_token),
        help("Set GANTRY_TOKEN, or add token_env / token to the profile.")
    )]
    NoToken { profile: String },

    // ── Provisioning ─────────────────────────────────────────────────
    #[error("Site setup failed on host {host_id}")]
    #[diagnostic(
        code(gantry::setup_failed),
        help("Setup script stderr:\n{stderr}")
    )]
    SetupFailed { host_id: String, stderr: String },

    #[error("Site setup still running after {waited_secs}s")]
    #[diagnostic(
        code(gantry::setup_timeout),
        help(
            "The setup command may still complete on the host; inspect it \
             before retrying, the setup script does not tolerate re-runs."
        )
    )]
    SetupTimeout { waited_secs: u64 },

    #[error("{resource_type} '{identifier}' already exists")]
    #[diagnostic(code(gantry::conflict))]
    Conflict {
        resource_type: String,
        identifier: String,
    },

    #[error("Listener rule could not be installed after {attempts} attempts")]
    #[diagnostic(
        code(gantry::priority_contention),
        help("Another provisioner is racing on the same listener. Retry the command.")
    )]
    PriorityContention { attempts: u32 },

    #[error("Host registration failed; target '{target_id}' was created and left in place")]
    #[diagnostic(
        code(gantry::register_failed),
        help("Remove the orphaned target before retrying: it is not cleaned up automatically.")
    )]
    RegisterFailed {
        target_id: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach a downstream service")]
    #[diagnostic(
        code(gantry::connection_failed),
        help("Check the profile's endpoints and your network. Use -k for self-signed TLS.")
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(gantry::timeout),
        help("Increase timeout with --timeout or check service responsiveness.")
    )]
    Timeout,

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(gantry::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(gantry::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(gantry::profile_not_found),
        help(
            "Add a [profiles.{name}] section to the config file.\n\
             Find it with: gantry config path"
        )
    )]
    ProfileNotFound { name: String },

    #[error(transparent)]
    #[diagnostic(code(gantry::config))]
    Config(Box<figment::Error>),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoToken { .. } => exit_code::AUTH,
            Self::SetupFailed { .. } | Self::RegisterFailed { .. } => exit_code::SETUP_FAILED,
            Self::Conflict { .. } | Self::PriorityContention { .. } => exit_code::CONFLICT,
            Self::SetupTimeout { .. } | Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── Downstream error mapping ─────────────────────────────────────────

impl From<gantry_api::Error> for CliError {
    fn from(err: gantry_api::Error) -> Self {
        match err {
            gantry_api::Error::Authentication { message } => Self::AuthFailed { message },

            gantry_api::Error::Transport(e) => {
                if e.is_timeout() {
                    Self::Timeout
                } else {
                    Self::ConnectionFailed { source: e.into() }
                }
            }

            gantry_api::Error::NameConflict { name } => Self::Conflict {
                resource_type: "target".into(),
                identifier: name,
            },

            gantry_api::Error::PriorityConflict { priority } => Self::Conflict {
                resource_type: "rule priority".into(),
                identifier: priority.to_string(),
            },

            other => Self::ApiError {
                message: other.to_string(),
            },
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidSiteName { reason } => Self::Validation {
                field: "site name".into(),
                reason,
            },

            CoreError::InvalidPort { reason } => Self::Validation {
                field: "port".into(),
                reason,
            },

            CoreError::CommandFailed { host_id, stderr } => Self::SetupFailed { host_id, stderr },

            CoreError::CommandTimeout { waited_secs, .. } => Self::SetupTimeout { waited_secs },

            CoreError::TargetCreateFailed { source, .. }
            | CoreError::HostRegisterFailed { source, .. }
                if matches!(source, gantry_api::Error::Authentication { .. }) =>
            {
                source.into()
            }

            CoreError::TargetCreateFailed { source, .. } => source.into(),

            CoreError::HostRegisterFailed { target_id, source } => Self::RegisterFailed {
                target_id,
                source: source.into(),
            },

            CoreError::PriorityContention { attempts, .. } => {
                Self::PriorityContention { attempts }
            }

            CoreError::Api(e) => e.into(),
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },

            ConfigError::NoSuchProfile { profile } => Self::ProfileNotFound { name: profile },

            ConfigError::NoToken { profile } => Self::NoToken { profile },

            ConfigError::Figment(e) => Self::Config(e),
        }
    }
}
