//! Shared command helpers: profile resolution and client construction.

use std::time::Duration;

use secrecy::SecretString;

use gantry_api::{BalancerClient, DnsClient, ExecClient, TlsMode, TransportConfig};
use gantry_config::{self as config, Profile};
use gantry_core::Provisioner;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// The active profile with its name, resolved against the loaded config.
pub fn load_profile(global: &GlobalOpts) -> Result<(String, Profile), CliError> {
    let cfg = config::load_config()?;
    let (name, profile) = config::select_profile(&cfg, global.profile.as_deref())?;
    Ok((name.to_owned(), profile.clone()))
}

/// Resolve the API token: CLI flag first, then the profile's chain.
pub fn resolve_token(
    global: &GlobalOpts,
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, CliError> {
    if let Some(ref token) = global.token {
        return Ok(SecretString::from(token.clone()));
    }
    Ok(config::resolve_token(profile, profile_name)?)
}

/// Transport settings: profile TLS config with CLI flag overrides.
pub fn transport(global: &GlobalOpts, profile: &Profile) -> TransportConfig {
    let mut transport = config::profile_transport(profile);
    if global.insecure {
        transport.tls = TlsMode::DangerAcceptInvalid;
    }
    transport.timeout = Duration::from_secs(global.timeout);
    transport
}

/// Balancer client for the active profile.
pub fn balancer_client(global: &GlobalOpts) -> Result<(BalancerClient, Profile), CliError> {
    let (name, profile) = load_profile(global)?;
    let token = resolve_token(global, &profile, &name)?;
    let client =
        BalancerClient::from_token(&profile.balancer_endpoint, &token, &transport(global, &profile))?;
    Ok((client, profile))
}

/// DNS client for the active profile.
pub fn dns_client(global: &GlobalOpts) -> Result<DnsClient, CliError> {
    let (name, profile) = load_profile(global)?;
    let token = resolve_token(global, &profile, &name)?;
    let client = DnsClient::from_token(
        &profile.dns_endpoint,
        &profile.dns_zone_id,
        &token,
        &transport(global, &profile),
    )?;
    Ok(client)
}

/// Fully wired provisioner for the active profile.
pub fn build_provisioner(
    global: &GlobalOpts,
) -> Result<Provisioner<ExecClient, BalancerClient, DnsClient>, CliError> {
    let (name, profile) = load_profile(global)?;
    let token = resolve_token(global, &profile, &name)?;
    let transport = transport(global, &profile);

    let exec = ExecClient::from_token(&profile.exec_endpoint, &token, &transport)?;
    let balancer = BalancerClient::from_token(&profile.balancer_endpoint, &token, &transport)?;
    let dns = DnsClient::from_token(
        &profile.dns_endpoint,
        &profile.dns_zone_id,
        &token,
        &transport,
    )?;

    let core_config = config::profile_to_provisioner_config(&profile)?;
    Ok(Provisioner::new(core_config, exec, balancer, dns))
}
