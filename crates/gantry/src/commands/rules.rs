//! Listener rule command handlers.

use tabled::Tabled;

use gantry_core::{RoutingBackend, RuleSummary};

use crate::cli::{GlobalOpts, RulesArgs, RulesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Host")]
    host: String,
    #[tabled(rename = "Target")]
    target: String,
}

impl From<&RuleSummary> for RuleRow {
    fn from(r: &RuleSummary) -> Self {
        Self {
            priority: if r.is_default {
                "default".into()
            } else {
                r.priority.to_string()
            },
            host: r.host_pattern.clone().unwrap_or_else(|| "*".into()),
            target: r.target_id.clone().unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: RulesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        RulesCommand::List => {
            let (client, profile) = util::balancer_client(global)?;
            // Through the trait so the rows carry the domain view, not
            // the wire shape.
            let mut rules = RoutingBackend::list_rules(&client, &profile.listener_id).await?;
            rules.sort_by_key(|r| (r.is_default, r.priority));

            let view = output::View {
                data: &rules,
                text: output::table(rules.iter().map(RuleRow::from)),
                plain: rules
                    .iter()
                    .map(|r| r.priority.to_string())
                    .collect::<Vec<_>>()
                    .join("\n"),
            };
            output::print(&output::render(&global.output, view), global.quiet);
            Ok(())
        }
    }
}
