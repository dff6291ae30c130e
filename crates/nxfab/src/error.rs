//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` / `ConfigError` variants into user-facing errors
//! with actionable help text and distinct process exit codes.

use miette::Diagnostic;
use thiserror::Error;

use nxfab_core::CoreError;

/// Exit codes for scripted callers.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const CONNECTION: i32 = 7;
    /// At least one device rejected at least one command.
    pub const PARTIAL: i32 = 10;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Input files ──────────────────────────────────────────────────

    #[error("Could not use input file {path}")]
    #[diagnostic(
        code(nxfab::input_file),
        help(
            "{reason}\n\
             Tenant file format: one header line, then one data row:\n\
             TENANT_NAME,VLAN_ID,L2_VNID,L3_VNI_VLAN,L3_VNID,IP_ADDR,BGP_AS\n\
             Device file format: one leaf address per line."
        )
    )]
    InputFile { path: String, reason: String },

    // ── Credentials ──────────────────────────────────────────────────

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(nxfab::no_credentials),
        help(
            "Set NXFAB_USERNAME and NXFAB_PASSWORD, pass --username/--password-env,\n\
             or configure the profile with: nxfab config init"
        )
    )]
    NoCredentials { profile: String },

    #[error("Authentication rejected by {device}")]
    #[diagnostic(
        code(nxfab::auth_failed),
        help(
            "Check the NX-API credentials and make sure the account has the\n\
             network-admin role on the switch."
        )
    )]
    AuthFailed { device: String },

    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not complete discovery on {device}")]
    #[diagnostic(
        code(nxfab::discovery_failed),
        help(
            "The decommission batch cannot be assembled without the discovered\n\
             VLAN state. Ensure the switch is reachable and NX-API is enabled\n\
             (feature nxapi), then re-run."
        )
    )]
    DiscoveryFailed {
        device: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Transport setup failed: {message}")]
    #[diagnostic(code(nxfab::transport))]
    Transport { message: String },

    // ── Run outcome ──────────────────────────────────────────────────

    #[error("{failures} command(s) failed across {devices} device(s)")]
    #[diagnostic(
        code(nxfab::partial_failure),
        help(
            "The run continued past the failures; the fabric may be partially\n\
             configured. Review the report above for the exact commands and\n\
             device messages."
        )
    )]
    CommandsFailed { failures: usize, devices: usize },

    // ── Interactive ──────────────────────────────────────────────────

    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(nxfab::confirmation_required),
        help("Re-run with --yes (-y) to confirm, or use --dry-run to preview.")
    )]
    ConfirmationRequired { action: String },

    // ── Validation / configuration ───────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(nxfab::validation))]
    Validation { field: String, reason: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(nxfab::config_exists),
        help("Edit the file directly, or remove it and re-run: nxfab config init")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(nxfab::config))]
    Config(Box<nxfab_config::ConfigError>),

    // ── IO ───────────────────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InputFile { .. }
            | Self::Validation { .. }
            | Self::ConfirmationRequired { .. } => exit_code::USAGE,
            Self::NoCredentials { .. } | Self::AuthFailed { .. } => exit_code::AUTH,
            Self::DiscoveryFailed { .. } | Self::Transport { .. } => exit_code::CONNECTION,
            Self::CommandsFailed { .. } => exit_code::PARTIAL,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Io { path, source } => Self::InputFile {
                path,
                reason: source.to_string(),
            },

            CoreError::TenantParse { path, reason } => Self::InputFile { path, reason },

            CoreError::EmptyDeviceList { path } => Self::InputFile {
                path,
                reason: "no device addresses found".into(),
            },

            CoreError::Discovery { device, source } => match source {
                nxfab_core::ApiError::Authentication { device } => Self::AuthFailed { device },
                source => Self::DiscoveryFailed {
                    device,
                    source: source.into(),
                },
            },

            CoreError::Api(source) => Self::Transport {
                message: source.to_string(),
            },
        }
    }
}

impl From<nxfab_config::ConfigError> for CliError {
    fn from(err: nxfab_config::ConfigError) -> Self {
        match err {
            nxfab_config::ConfigError::NoCredentials { profile } => {
                Self::NoCredentials { profile }
            }
            other => Self::Config(Box::new(other)),
        }
    }
}
