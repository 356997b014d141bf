//! Flag-aware session settings: the active profile from `wakedeck-config`,
//! then `--url`, `--interval` and `--timeout` on top.

use std::time::Duration;

use tracing::debug;

use wakedeck_config::{self as config, Config, ConfigError, DEFAULT_URL};
use wakedeck_core::SessionConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `SessionConfig` from the loaded config, profile, and CLI overrides.
pub fn build_session_config(cfg: &Config, global: &GlobalOpts) -> Result<SessionConfig, CliError> {
    let mut session = profile_session_config(cfg, global.profile.as_deref())?;

    // flag > env > profile > defaults
    if let Some(ref url) = global.url {
        session.base_url = config::parse_url(url)?;
    }
    if let Some(secs) = global.interval {
        session.refresh_interval = Duration::from_secs(secs);
    }
    if let Some(secs) = global.timeout {
        session.timeout = Some(Duration::from_secs(secs));
    }

    debug!(url = %session.base_url, "resolved backend");
    Ok(session)
}

fn profile_session_config(cfg: &Config, requested: Option<&str>) -> Result<SessionConfig, CliError> {
    match cfg.profile(requested) {
        Ok(Some((name, profile))) => {
            debug!(profile = name, "using profile");
            Ok(config::profile_to_session_config(profile, &cfg.defaults)?)
        }
        // No profile configured: the backend's default local address.
        Ok(None) => Ok(SessionConfig {
            base_url: config::parse_url(DEFAULT_URL)?,
            refresh_interval: Duration::from_secs(cfg.defaults.refresh_interval),
            timeout: cfg.defaults.timeout.map(Duration::from_secs),
        }),
        Err(ConfigError::UnknownProfile { name }) => Err(CliError::ProfileNotFound {
            name,
            available: available_profiles(cfg),
        }),
        Err(e) => Err(e.into()),
    }
}

pub fn available_profiles(cfg: &Config) -> String {
    if cfg.profiles.is_empty() {
        "(none)".into()
    } else {
        cfg.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}
