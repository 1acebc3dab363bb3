//! Path handling for the Zellij plugin sandbox.

use std::path::PathBuf;

/// Sandbox view of the user's home directory.
const HOST_ROOT: &str = "/host";

/// Directory for plugin-owned files such as the trace log.
///
/// `/host` is the cwd of the last focused terminal, usually the home
/// directory, so this normally resolves to `~/.local/share/zellij/metastream`.
///
/// # Examples
///
/// ```
/// use metastream::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/metastream"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij").join(env!("CARGO_PKG_NAME"))
}

/// Rewrites a leading `~` to the sandbox's host mount.
///
/// Only `~` and `~/…` are expanded; `~user` forms are left alone.
///
/// # Examples
///
/// ```
/// use metastream::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dark.toml"), "/host/themes/dark.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("~alice/x"), "~alice/x");
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
