// ── Site requests and provisioning results ──

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fallback port for sites whose name carries no number.
pub const DEFAULT_PORT: u16 = 8010;

/// Base port for `qa<N>` sites: `qa3` → 8003, `qa42` → 8042.
pub const QA_PORT_BASE: u16 = 8000;

/// A request to provision one site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SiteRequest {
    /// Site identifier; becomes the hostname label `{site_name}.{domain}`
    /// and the target group name `{site_name}-tg`.
    pub site_name: String,
    /// Backend port on the host. Derived from the name when absent.
    #[serde(default)]
    pub port: Option<u16>,
}

impl SiteRequest {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
            port: None,
        }
    }

    pub fn with_port(site_name: impl Into<String>, port: u16) -> Self {
        Self {
            site_name: site_name.into(),
            port: Some(port),
        }
    }

    /// Validate the request before any remote call is made.
    ///
    /// Site names must be usable both as a DNS label and as a resource
    /// name: non-empty, lowercase alphanumeric plus `-`, starting with
    /// an alphanumeric character.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.site_name.is_empty() {
            return Err(CoreError::InvalidSiteName {
                reason: "site_name is required".into(),
            });
        }

        let mut chars = self.site_name.chars();
        let first = chars.next().unwrap_or_default();
        if !first.is_ascii_alphanumeric() || first.is_ascii_uppercase() {
            return Err(CoreError::InvalidSiteName {
                reason: format!("must start with a lowercase letter or digit, got '{first}'"),
            });
        }
        if let Some(bad) = self
            .site_name
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(CoreError::InvalidSiteName {
                reason: format!("invalid character '{bad}' (allowed: a-z, 0-9, '-')"),
            });
        }

        if self.port == Some(0) {
            return Err(CoreError::InvalidPort {
                reason: "port must be positive".into(),
            });
        }

        Ok(())
    }

    /// The port this site will serve on: explicit when given, otherwise
    /// derived from the name.
    pub fn effective_port(&self) -> u16 {
        self.port.unwrap_or_else(|| derive_port(&self.site_name))
    }
}

/// Derive the backend port from a site name.
///
/// `qa<N>` sites map onto a stable port block (`qa5` → 8005) so the
/// host-side scripts and the balancer agree without coordination; any
/// other name (including `qa` followed by non-digits, or a number too
/// large for the block) falls back to [`DEFAULT_PORT`].
pub fn derive_port(site_name: &str) -> u16 {
    site_name
        .strip_prefix("qa")
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|digits| digits.parse::<u16>().ok())
        .and_then(|n| QA_PORT_BASE.checked_add(n))
        .unwrap_or(DEFAULT_PORT)
}

/// Result of a successfully provisioned site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionedSite {
    pub site_name: String,
    pub port: u16,
    /// Public URL: `https://{site_name}.{domain}`.
    pub url: String,
    /// Id of the routing target the listener rule forwards to.
    pub target_id: String,
    /// Priority of the installed listener rule.
    pub priority: u32,
    pub message: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn qa_names_derive_port_from_suffix() {
        assert_eq!(derive_port("qa3"), 8003);
        assert_eq!(derive_port("qa5"), 8005);
        assert_eq!(derive_port("qa42"), 8042);
        assert_eq!(derive_port("qa0"), 8000);
    }

    #[test]
    fn non_qa_names_get_the_default_port() {
        assert_eq!(derive_port("demo"), DEFAULT_PORT);
        assert_eq!(derive_port("staging"), DEFAULT_PORT);
        assert_eq!(derive_port("qanightly"), DEFAULT_PORT);
        assert_eq!(derive_port("qa"), DEFAULT_PORT);
    }

    #[test]
    fn oversized_qa_suffix_falls_back() {
        assert_eq!(derive_port("qa99999"), DEFAULT_PORT);
    }

    #[test]
    fn explicit_port_wins_over_derivation() {
        let req = SiteRequest::with_port("qa5", 9000);
        assert_eq!(req.effective_port(), 9000);
    }

    #[test]
    fn derived_port_used_when_absent() {
        assert_eq!(SiteRequest::new("qa5").effective_port(), 8005);
        assert_eq!(SiteRequest::new("demo").effective_port(), 8010);
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = SiteRequest::new("").validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidSiteName { .. }));
    }

    #[test]
    fn uppercase_and_symbols_are_rejected() {
        assert!(SiteRequest::new("QA5").validate().is_err());
        assert!(SiteRequest::new("qa_5").validate().is_err());
        assert!(SiteRequest::new("-qa5").validate().is_err());
        assert!(SiteRequest::new("qa5.dev").validate().is_err());
    }

    #[test]
    fn valid_names_pass() {
        assert!(SiteRequest::new("qa5").validate().is_ok());
        assert!(SiteRequest::new("demo-2").validate().is_ok());
        assert!(SiteRequest::new("7seas").validate().is_ok());
    }

    #[test]
    fn zero_port_is_rejected() {
        let err = SiteRequest::with_port("qa5", 0).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidPort { .. }));
    }
}
