//! CLI-side config glue. File format, loading, and token storage live in
//! `enoman-config`; this module layers the global flags on top.

use secrecy::SecretString;

use enoman_config::{Config, Profile};
use enoman_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use enoman_config::{config_path, load_config_or_default, save_config};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Apply `--url`, `--insecure` and `--timeout` on top of a profile.
fn with_overrides(profile: &Profile, global: &GlobalOpts) -> Profile {
    let mut effective = profile.clone();
    if let Some(ref url) = global.url {
        effective.url.clone_from(url);
    }
    if global.insecure {
        effective.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        effective.timeout = Some(timeout);
    }
    effective
}

/// Build the runtime connection settings for the active profile.
///
/// Without a matching profile the add-on URL must come from `--url` /
/// `ENOMAN_URL`, and the token only from `--token` / `ENOMAN_TOKEN`.
pub fn resolve_client_config(global: &GlobalOpts, cfg: &Config) -> Result<ClientConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);
    let flag_token = global.token.clone().map(SecretString::from);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        let token =
            flag_token.or_else(|| enoman_config::resolve_token(profile, &profile_name));
        let effective = with_overrides(profile, global);
        tracing::debug!(profile = %profile_name, url = %effective.url, "using profile");
        return Ok(enoman_config::build_client_config(
            &effective,
            &cfg.defaults,
            token,
        )?);
    }

    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(cfg),
        });
    }

    let url = global.url.clone().ok_or_else(|| CliError::NoConfig {
        path: config_path().display().to_string(),
    })?;
    let adhoc = with_overrides(
        &Profile {
            url,
            ..Profile::default()
        },
        global,
    );
    Ok(enoman_config::build_client_config(
        &adhoc,
        &cfg.defaults,
        flag_token,
    )?)
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
