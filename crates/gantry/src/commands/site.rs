//! Site command handlers.

use owo_colors::OwoColorize;

use gantry_core::{ProvisionedSite, SiteRequest};

use crate::cli::{GlobalOpts, SiteArgs, SiteCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Detail view ─────────────────────────────────────────────────────

fn format_site(site: &ProvisionedSite, color: bool) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if color {
        let _ = writeln!(out, "{}", site.message.green());
    } else {
        let _ = writeln!(out, "{}", site.message);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  name:      {}", site.site_name);
    let _ = writeln!(out, "  url:       {}", site.url);
    let _ = writeln!(out, "  port:      {}", site.port);
    let _ = writeln!(out, "  target:    {}", site.target_id);
    let _ = write!(out, "  priority:  {}", site.priority);

    out
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: SiteArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SiteCommand::Create { name, port } => {
            let request = match port {
                Some(port) => SiteRequest::with_port(name, port),
                None => SiteRequest::new(name),
            };

            let provisioner = util::build_provisioner(global)?;
            let site = match provisioner.provision(request).await {
                Ok(site) => site,
                Err(err) => {
                    if err.is_retryable() && !global.quiet {
                        eprintln!("Transient failure; re-running the command may succeed.");
                    }
                    return Err(err.into());
                }
            };
            // Let the background DNS publish finish before the process
            // exits; its outcome stays log-only.
            provisioner.settle_dns().await;

            let color = output::should_color(&global.color);
            let view = output::View {
                data: &site,
                text: format_site(&site, color),
                plain: site.url.clone(),
            };
            output::print(&output::render(&global.output, view), global.quiet);
            Ok(())
        }
    }
}
