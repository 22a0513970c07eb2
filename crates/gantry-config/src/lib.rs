//! Configuration for the gantry CLI.
//!
//! TOML profiles, token resolution (env + keyring + plaintext), and
//! translation to `gantry_core::ProvisionerConfig` plus the transport
//! settings the API clients need.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use gantry_api::{TlsMode, TransportConfig};
use gantry_core::ProvisionerConfig;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no such profile: '{profile}'")]
    NoSuchProfile { profile: String },

    #[error("no API token configured for profile '{profile}'")]
    NoToken { profile: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named environment profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named environment profile: one backing host, one listener, one
/// DNS zone, and the service endpoints that manage them.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Base URL of the command execution service.
    pub exec_endpoint: String,

    /// Base URL of the load balancer management service.
    pub balancer_endpoint: String,

    /// Base URL of the DNS publisher.
    pub dns_endpoint: String,

    /// DNS zone the site records are published into.
    pub dns_zone_id: String,

    /// Backing host that runs the site setup script.
    pub host_id: String,

    /// Listener that receives the host-header rules.
    pub listener_id: String,

    /// DNS name of the load balancer (the CNAME target).
    pub balancer_dns_name: String,

    /// Parent domain; sites are published as `{site_name}.{domain}`.
    pub domain: String,

    /// Setup script path on the backing host.
    #[serde(default = "default_setup_script")]
    pub setup_script: String,

    /// API token (plaintext — prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    pub insecure: Option<bool>,

    /// HTTP timeout override, seconds.
    pub timeout: Option<u64>,

    /// Status poll interval override, seconds.
    pub poll_interval_secs: Option<u64>,

    /// Status poll budget override.
    pub poll_attempts: Option<u32>,

    /// Remote-side command timeout override, seconds.
    pub command_timeout_secs: Option<u64>,

    /// TTL override for published DNS records, seconds.
    pub dns_ttl: Option<u32>,
}

fn default_setup_script() -> String {
    "/opt/gantry/site-setup.sh".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("sh", "gantry", "gantry").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gantry");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("GANTRY_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Profile selection ───────────────────────────────────────────────

/// Pick a profile by name, falling back to the config's default.
pub fn select_profile<'a>(
    config: &'a Config,
    name: Option<&str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let name = name
        .or_else(|| config.default_profile.as_deref())
        .unwrap_or("default");
    config
        .profiles
        .get_key_value(name)
        .map(|(k, v)| (k.as_str(), v))
        .ok_or_else(|| ConfigError::NoSuchProfile {
            profile: name.into(),
        })
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token from the credential chain.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(ref env_name) = profile.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    // 2. System keyring
    if let Ok(entry) = keyring::Entry::new("gantry", &format!("{profile_name}/token")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken {
        profile: profile_name.into(),
    })
}

// ── Translation to core / api settings ──────────────────────────────

/// Transport settings for the profile's API clients.
pub fn profile_transport(profile: &Profile) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(false) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
    }
}

/// Build a `ProvisionerConfig` from a profile, applying its tuning
/// overrides over the core defaults.
pub fn profile_to_provisioner_config(profile: &Profile) -> Result<ProvisionerConfig, ConfigError> {
    for (field, value) in [
        ("host_id", &profile.host_id),
        ("listener_id", &profile.listener_id),
        ("balancer_dns_name", &profile.balancer_dns_name),
        ("domain", &profile.domain),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation {
                field: field.into(),
                reason: "must not be empty".into(),
            });
        }
    }

    let mut cfg = ProvisionerConfig::new(
        profile.host_id.clone(),
        profile.listener_id.clone(),
        profile.balancer_dns_name.clone(),
        profile.domain.clone(),
        profile.setup_script.clone(),
    );
    if let Some(secs) = profile.command_timeout_secs {
        cfg.command_timeout = Duration::from_secs(secs);
    }
    if let Some(secs) = profile.poll_interval_secs {
        cfg.poll_interval = Duration::from_secs(secs);
    }
    if let Some(attempts) = profile.poll_attempts {
        cfg.poll_attempts = attempts;
    }
    if let Some(ttl) = profile.dns_ttl {
        cfg.dns_ttl = ttl;
    }
    Ok(cfg)
}
