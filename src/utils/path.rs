//! Path utilities

use std::path::{Path, PathBuf};

/// Expand tilde (~) in path to home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    match dirs::home_dir() {
        Some(home) => expand_tilde_with(path, &home),
        None => PathBuf::from(path),
    }
}

/// Expand a leading `~`, `$HOME` or `${HOME}` against an explicit home directory.
///
/// `~user/...` forms are left alone.
pub fn expand_tilde_with(path: &str, home: &Path) -> PathBuf {
    for prefix in ["~", "${HOME}", "$HOME"] {
        if let Some(rest) = path.strip_prefix(prefix) {
            if rest.is_empty() {
                return home.to_path_buf();
            }
            if let Some(rest) = rest.strip_prefix('/') {
                return home.join(rest);
            }
        }
    }
    PathBuf::from(path)
}

/// Replace the home directory prefix with `~`.
///
/// This is the display key used for every file the parser visits, so that
/// `~/.zshrc` and a sourced `/Users/me/.aliases` are named consistently.
pub fn contract_tilde(path: &Path) -> String {
    match dirs::home_dir() {
        Some(home) => contract_tilde_with(path, &home),
        None => path.display().to_string(),
    }
}

pub fn contract_tilde_with(path: &Path, home: &Path) -> String {
    if path == home {
        return "~".to_string();
    }
    match path.strip_prefix(home) {
        Ok(rest) => format!("~/{}", rest.display()),
        Err(_) => path.display().to_string(),
    }
}

/// Key under which a file is tracked in a parse result: tilde expanded, then contracted.
///
/// `$HOME/.zshrc`, `~/.zshrc` and `/Users/me/.zshrc` all map to `~/.zshrc`.
pub fn file_key(path: &str) -> String {
    contract_tilde(&expand_tilde(path))
}

/// Resolve the target of a `source`/`.` directive.
///
/// Relative targets are taken relative to the directory of the file that
/// contains the directive.
pub fn resolve_source_target(target: &str, sourcing_file: &Path) -> PathBuf {
    let expanded = expand_tilde(target);
    if expanded.is_absolute() {
        return expanded;
    }
    match sourcing_file.parent() {
        Some(dir) => dir.join(expanded),
        None => expanded,
    }
}

/// Fully resolved identity of a file, used to detect `source` cycles.
pub fn canonical_key(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_tilde() {
        let path = expand_tilde("~/.bashrc");
        if dirs::home_dir().is_some() {
            assert!(!path.to_string_lossy().starts_with('~'));
        }
    }

    #[test]
    fn test_expand_tilde_with_variants() {
        let home = Path::new("/Users/me");
        assert_eq!(
            expand_tilde_with("~/.zshrc", home),
            PathBuf::from("/Users/me/.zshrc")
        );
        assert_eq!(
            expand_tilde_with("$HOME/.aliases", home),
            PathBuf::from("/Users/me/.aliases")
        );
        assert_eq!(
            expand_tilde_with("${HOME}/.env", home),
            PathBuf::from("/Users/me/.env")
        );
        assert_eq!(expand_tilde_with("~", home), PathBuf::from("/Users/me"));
        assert_eq!(
            expand_tilde_with("~other/x", home),
            PathBuf::from("~other/x")
        );
        assert_eq!(
            expand_tilde_with("/etc/zshrc", home),
            PathBuf::from("/etc/zshrc")
        );
    }

    #[test]
    fn test_contract_tilde_with() {
        let home = Path::new("/Users/me");
        assert_eq!(
            contract_tilde_with(Path::new("/Users/me/.zshrc"), home),
            "~/.zshrc"
        );
        assert_eq!(contract_tilde_with(Path::new("/Users/me"), home), "~");
        assert_eq!(
            contract_tilde_with(Path::new("/etc/zprofile"), home),
            "/etc/zprofile"
        );
        // Prefix match must respect path components
        assert_eq!(
            contract_tilde_with(Path::new("/Users/meow/.zshrc"), home),
            "/Users/meow/.zshrc"
        );
    }

    #[test]
    fn test_file_key_is_stable() {
        assert_eq!(file_key("/etc/zprofile"), "/etc/zprofile");
        if dirs::home_dir().is_some() {
            assert_eq!(file_key("$HOME/.zshrc"), "~/.zshrc");
            assert_eq!(file_key("~/.zshrc"), file_key("${HOME}/.zshrc"));
        }
    }

    #[test]
    fn test_resolve_source_target_relative() {
        let resolved = resolve_source_target("aliases.zsh", Path::new("/opt/dots/zshrc"));
        assert_eq!(resolved, PathBuf::from("/opt/dots/aliases.zsh"));

        let resolved = resolve_source_target("/etc/zsh/extra", Path::new("/opt/dots/zshrc"));
        assert_eq!(resolved, PathBuf::from("/etc/zsh/extra"));
    }
}
