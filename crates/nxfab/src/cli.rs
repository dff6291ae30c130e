//! Clap derive structures for the `nxfab` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// nxfab -- VXLAN/EVPN tenant lifecycle for NX-OS leaf fabrics
#[derive(Debug, Parser)]
#[command(
    name = "nxfab",
    version,
    about = "Provision and decommission VXLAN/EVPN tenants on NX-OS leaf switches",
    long_about = "Applies ordered CLI command batches to every leaf switch in a fabric\n\
        through the NX-API management endpoint, and reports every message the\n\
        devices attach to individual commands.",
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
    /// Fabric profile to use
    #[arg(long, short = 'p', env = "NXFAB_PROFILE", global = true)]
    pub profile: Option<String>,

    /// NX-API username (overrides profile)
    #[arg(long, short = 'u', env = "NXFAB_USERNAME", global = true)]
    pub username: Option<String>,

    /// Environment variable holding the NX-API password
    /// (default: NXFAB_PASSWORD, then the profile's password settings)
    #[arg(long, global = true)]
    pub password_env: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "NXFAB_OUTPUT",
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

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Request timeout in seconds
    #[arg(long, env = "NXFAB_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
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
    /// YAML
    Yaml,
    /// Plain text, one entry per line (scripting)
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
    /// Tenant lifecycle operations
    #[command(alias = "t")]
    Tenant(TenantArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  TENANT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TenantArgs {
    #[command(subcommand)]
    pub command: TenantCommand,
}

#[derive(Debug, Subcommand)]
pub enum TenantCommand {
    /// Create a tenant and its initial VLAN on every leaf switch
    #[command(alias = "create")]
    Provision(JobArgs),

    /// Tear a tenant down on every leaf switch (destructive)
    #[command(alias = "delete", alias = "rm")]
    Decommission(JobArgs),
}

/// Shared arguments for the two batch jobs.
#[derive(Debug, Args)]
pub struct JobArgs {
    /// Tenant parameter file (header line + one data row:
    /// TENANT_NAME,VLAN_ID,L2_VNID,L3_VNI_VLAN,L3_VNID,IP_ADDR,BGP_AS)
    #[arg(long, short = 't', default_value = "tenant.csv")]
    pub tenant_file: PathBuf,

    /// Device list file, one leaf address per line
    /// (default: the profile's devices_file, then leaf.csv)
    #[arg(long, short = 'd')]
    pub devices: Option<PathBuf>,

    /// Render the command batch without contacting any device.
    /// Decommission dry runs show only the fixed base teardown --
    /// the per-VLAN steps depend on on-fabric discovery.
    #[arg(long)]
    pub dry_run: bool,

    /// Partial-failure policy for a device's remaining commands
    #[arg(long, default_value = "best-effort", value_enum)]
    pub on_error: OnError,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OnError {
    /// Attempt every command regardless of earlier failures
    BestEffort,
    /// Skip a device's remaining commands after the first failure
    Abort,
}

impl From<OnError> for nxfab_core::FailurePolicy {
    fn from(value: OnError) -> Self {
        match value {
            OnError::BestEffort => Self::BestEffort,
            OnError::Abort => Self::Abort,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create an initial config file with a profile skeleton
    Init,

    /// Display the current configuration (passwords redacted)
    Show,

    /// Store a password in a profile (written to the config file)
    SetPassword {
        /// Profile name (default: the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
