//! Paths inside the Zellij plugin sandbox.
//!
//! Zellij mounts the host filesystem under `/host`. Everything the plugin
//! reads or writes on disk goes through these helpers.

use std::path::PathBuf;

/// Directory holding the trace file.
///
/// Resolves to `/host/.local/share/zellij/marquee`, which is
/// `~/.local/share/zellij/marquee` when Zellij was started from the home
/// directory.
///
/// # Examples
///
/// ```
/// use marquee::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("zellij/marquee"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("marquee")
}

/// Maps `~` to the sandbox's `/host` mount.
///
/// # Examples
///
/// ```
/// use marquee::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dune.toml"), "/host/themes/dune.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/marquee.toml"), "/etc/marquee.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        format!("/host/{rest}")
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
        assert_eq!(expand_tilde("~user/x.toml"), "~user/x.toml");
    }
}
