//! File utility functions

use std::path::PathBuf;

/// Expand a leading `~` in a config path to the home directory
///
/// Relative paths are resolved against the current directory when the
/// file is opened, so only tilde handling is needed here.
pub fn expand_home(path: &str) -> PathBuf {
    let path = path.trim();

    if path == "~" {
        return dirs::home_dir().unwrap_or_else(|| PathBuf::from(path));
    }

    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_home_absolute_unchanged() {
        assert_eq!(expand_home("/etc/vespa-filters.json"), PathBuf::from("/etc/vespa-filters.json"));
    }

    #[test]
    fn test_expand_home_relative_unchanged() {
        assert_eq!(expand_home("./conf.json"), PathBuf::from("./conf.json"));
    }

    #[test]
    fn test_expand_home_tilde() {
        let result = expand_home("~/.vespa-filters/vespa-filters.json");
        assert!(!result.to_string_lossy().starts_with('~'));
        assert!(result.ends_with(".vespa-filters/vespa-filters.json"));
    }

    #[test]
    fn test_expand_home_tilde_only() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~"), home);
        }
    }

    #[test]
    fn test_expand_home_trims_whitespace() {
        assert_eq!(expand_home("  /tmp/x.json  "), PathBuf::from("/tmp/x.json"));
    }
}
