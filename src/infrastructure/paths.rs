//! Path helpers for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually maps to the directory Zellij was started from (typically `$HOME`).

use std::path::PathBuf;

/// Sandbox mount point of the host filesystem.
pub const HOST_ROOT: &str = "/host";

/// Directory holding the plugin's trace files:
/// `/host/.local/share/zellij/bookshelf`.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join(env!("CARGO_PKG_NAME"))
}

/// Maps `~` and `~/...` onto the sandbox host mount. Other paths pass through.
///
/// ```
/// use bookshelf::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/paper.toml"), "/host/themes/paper.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_is_under_host() {
        assert_eq!(get_data_dir(), PathBuf::from("/host/.local/share/zellij/bookshelf"));
    }

    #[test]
    fn tilde_user_paths_are_left_alone() {
        assert_eq!(expand_tilde("~alice/theme.toml"), "~alice/theme.toml");
        assert_eq!(expand_tilde("relative/theme.toml"), "relative/theme.toml");
    }
}
