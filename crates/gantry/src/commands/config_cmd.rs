//! Config subcommand handlers.

use gantry_config::{self as config, Config};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "exec_endpoint = \"{}\"", p.exec_endpoint);
        let _ = writeln!(out, "balancer_endpoint = \"{}\"", p.balancer_endpoint);
        let _ = writeln!(out, "dns_endpoint = \"{}\"", p.dns_endpoint);
        let _ = writeln!(out, "dns_zone_id = \"{}\"", p.dns_zone_id);
        let _ = writeln!(out, "host_id = \"{}\"", p.host_id);
        let _ = writeln!(out, "listener_id = \"{}\"", p.listener_id);
        let _ = writeln!(out, "balancer_dns_name = \"{}\"", p.balancer_dns_name);
        let _ = writeln!(out, "domain = \"{}\"", p.domain);
        let _ = writeln!(out, "setup_script = \"{}\"", p.setup_script);
        if p.token.is_some() {
            let _ = writeln!(out, "token = \"****\"");
        }
        if let Some(ref env) = p.token_env {
            let _ = writeln!(out, "token_env = \"{env}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            println!("{}", config::config_path().display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            let view = output::View {
                data: &cfg,
                text: format_config_redacted(&cfg),
                plain: config::config_path().display().to_string(),
            };
            output::print(&output::render(&global.output, view), global.quiet);
            Ok(())
        }
    }
}
