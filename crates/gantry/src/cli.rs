//! Clap derive structures for the `gantry` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gantry -- provision sites behind a shared load balancer
#[derive(Debug, Parser)]
#[command(
    name = "gantry",
    version,
    about = "Provision sites behind a shared load balancer",
    long_about = "Provisions web sites end to end: runs the setup script on the \
        backing host, creates a routing target, installs a host-header listener \
        rule, and publishes the site's DNS record.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Environment profile to use
    #[arg(long, short = 'p', env = "GANTRY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API token for the downstream services
    #[arg(long, env = "GANTRY_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GANTRY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "GANTRY_INSECURE", global = true)]
    pub insecure: bool,

    /// HTTP request timeout in seconds
    #[arg(long, env = "GANTRY_TIMEOUT", default_value = "30", global = true)]
    pub timeout: u64,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision and inspect sites
    #[command(alias = "s")]
    Site(SiteArgs),

    /// Inspect listener rules
    #[command(alias = "r")]
    Rules(RulesArgs),

    /// Manage DNS records in the site zone
    Dns(DnsArgs),

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Site ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SiteArgs {
    #[command(subcommand)]
    pub command: SiteCommand,
}

#[derive(Debug, Subcommand)]
pub enum SiteCommand {
    /// Provision a new site end to end
    Create {
        /// Site name (lowercase alphanumeric and '-'; becomes the
        /// hostname label)
        name: String,

        /// Backend port on the host (derived from the name when omitted)
        #[arg(long)]
        port: Option<u16>,
    },
}

// ── Rules ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct RulesArgs {
    #[command(subcommand)]
    pub command: RulesCommand,
}

#[derive(Debug, Subcommand)]
pub enum RulesCommand {
    /// List the listener's rules with their priorities
    List,
}

// ── DNS ──────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct DnsArgs {
    #[command(subcommand)]
    pub command: DnsCommand,
}

#[derive(Debug, Subcommand)]
pub enum DnsCommand {
    /// Create or update a record keyed by (name, type)
    Upsert {
        /// Fully qualified record name
        name: String,

        /// Record content (e.g. the CNAME target)
        content: String,

        /// Record type
        #[arg(long = "type", default_value = "CNAME")]
        record_type: String,

        /// Record TTL in seconds
        #[arg(long, default_value = "300")]
        ttl: u32,
    },

    /// Delete the record keyed by (name, type), if it exists
    Delete {
        /// Fully qualified record name
        name: String,

        /// Record type
        #[arg(long = "type", default_value = "CNAME")]
        record_type: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the loaded configuration (secrets redacted)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
