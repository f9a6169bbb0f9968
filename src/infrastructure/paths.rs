//! Sandbox path helpers.
//!
//! Inside the Zellij plugin sandbox the host filesystem is reachable under
//! `/host`, which usually maps to the directory Zellij was started from
//! (typically the user's home).

use std::path::PathBuf;

/// File name of the plugin's JSON log.
pub const LOG_FILE_NAME: &str = "zcatalog.log";

/// Returns the plugin's data directory, `/host/.local/share/zellij/zcatalog`.
///
/// # Examples
///
/// ```
/// use zcatalog::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with(".local/share/zellij/zcatalog"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zcatalog")
}

/// Location of the rotating log file inside [`get_data_dir`].
#[must_use]
pub fn log_file_path() -> PathBuf {
    get_data_dir().join(LOG_FILE_NAME)
}

/// Maps `~` to the sandbox's `/host` prefix, so a configured
/// `theme_file "~/themes/dark.toml"` resolves inside the sandbox.
///
/// # Examples
///
/// ```
/// use zcatalog::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/zcatalog.toml"), "/etc/zcatalog.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => "/host".to_string(),
        Some(rest) if rest.starts_with('/') => format!("/host{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_at_path_start() {
        assert_eq!(expand_tilde("~user/file"), "~user/file");
        assert_eq!(expand_tilde("themes/~/x"), "themes/~/x");
    }

    #[test]
    fn log_file_lives_in_data_dir() {
        assert_eq!(log_file_path().parent(), Some(get_data_dir().as_path()));
    }
}
