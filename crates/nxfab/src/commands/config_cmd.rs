//! Config command handlers: init, show, set-password.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(global),
        ConfigCommand::Show => show(global),
        ConfigCommand::SetPassword { profile } => set_password(profile, global),
    }
}

fn init(global: &GlobalOpts) -> Result<(), CliError> {
    let path = config::config_path();
    if path.exists() {
        return Err(CliError::ConfigExists {
            path: path.display().to_string(),
        });
    }

    let mut cfg = config::Config::default();
    cfg.profiles.insert(
        "default".into(),
        config::Profile {
            username: global.username.clone(),
            password_env: Some(config::DEFAULT_PASSWORD_ENV.to_owned()),
            ..config::Profile::default()
        },
    );

    let written = config::save_config(&cfg)?;
    output::print_output(
        &format!("Wrote config skeleton to {}", written.display()),
        global.quiet,
    );
    Ok(())
}

fn show(global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    // Never echo stored passwords.
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some("<redacted>".into());
        }
    }

    let rendered = toml::to_string_pretty(&cfg)
        .map_err(|e| CliError::Config(Box::new(nxfab_config::ConfigError::Serialization(e))))?;
    output::print_output(rendered.trim_end(), global.quiet);
    Ok(())
}

fn set_password(profile: Option<String>, global: &GlobalOpts) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();
    let name = profile.unwrap_or_else(|| config::active_profile_name(global, &cfg));

    let password = rpassword::prompt_password(format!("NX-API password for '{name}': "))?;
    if password.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "must not be empty".into(),
        });
    }

    cfg.profiles.entry(name).or_default().password = Some(password);
    let written = config::save_config(&cfg)?;

    output::print_output(
        &format!(
            "Stored password (plaintext) in {}. Prefer password_env for shared machines.",
            written.display()
        ),
        global.quiet,
    );
    Ok(())
}
