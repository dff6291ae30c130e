//! CLI configuration — thin wrapper around `nxfab_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--username, --password-env, --timeout).

use std::path::PathBuf;
use std::time::Duration;

use nxfab_core::TransportConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use nxfab_config::{
    Config, Profile, config_path, load_config_or_default, resolve_credentials, save_config,
};

/// Fallback password environment variable when neither a flag nor a
/// profile names one.
pub const DEFAULT_PASSWORD_ENV: &str = "NXFAB_PASSWORD";

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Everything a job needs from configuration: the transport and the
/// profile's default device file, if any.
pub struct ResolvedRun {
    pub transport: TransportConfig,
    pub devices_file: Option<PathBuf>,
}

/// Merge config file, profile, and CLI flags into a transport config.
///
/// Precedence: CLI flag > `NXFAB_*` environment > profile > defaults.
/// The password itself comes from the environment variable named by
/// `--password-env` (falling back to `NXFAB_PASSWORD`, then the
/// profile's `password_env`/`password`).
pub fn resolve_run(global: &GlobalOpts) -> Result<ResolvedRun, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);
    let profile = cfg.profiles.get(&profile_name);

    let merged = Profile {
        username: global
            .username
            .clone()
            .or_else(|| profile.and_then(|p| p.username.clone())),
        password: profile.and_then(|p| p.password.clone()),
        password_env: global
            .password_env
            .clone()
            .or_else(|| default_password_env_if_set())
            .or_else(|| profile.and_then(|p| p.password_env.clone())),
        devices_file: profile.and_then(|p| p.devices_file.clone()),
        timeout: profile.and_then(|p| p.timeout),
    };

    let (username, password) = resolve_credentials(&merged, &profile_name)?;

    let timeout = global
        .timeout
        .or(merged.timeout)
        .unwrap_or(cfg.defaults.timeout);

    Ok(ResolvedRun {
        transport: TransportConfig::new(username, password)
            .with_timeout(Duration::from_secs(timeout)),
        devices_file: merged.devices_file,
    })
}

fn default_password_env_if_set() -> Option<String> {
    std::env::var(DEFAULT_PASSWORD_ENV)
        .is_ok()
        .then(|| DEFAULT_PASSWORD_ENV.to_owned())
}
