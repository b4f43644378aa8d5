use rpncalc::{Config, Session};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// The config file in use: `--config` if given, else ~/.rpncalc.toml
pub(crate) fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => dirs_home().map(|h| h.join(".rpncalc.toml")),
    }
}

pub(crate) fn history_path() -> Option<PathBuf> {
    dirs_home().map(|h| h.join(".rpncalc_history"))
}

/// Load the config file. A missing file gives the defaults; a broken one
/// is reported and ignored.
pub(crate) fn load_config(explicit: Option<&Path>) -> Config {
    let path = match config_path(explicit) {
        Some(p) => p,
        None => return Config::default(),
    };

    if !path.exists() {
        debug!(path = %path.display(), "no config file");
        return Config::default();
    }

    match Config::load(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring config file");
            Config::default()
        }
    }
}

/// Write the session's base, notation and width back to the config file.
/// The default file is only rewritten if it already exists.
pub(crate) fn save_preferences(session: &Session, explicit: Option<&Path>) {
    let Some(path) = config_path(explicit) else {
        return;
    };
    if explicit.is_none() && !path.exists() {
        return;
    }
    if let Err(e) = session.preferences().save(&path) {
        warn!(path = %path.display(), error = %e, "could not save preferences");
    }
}
