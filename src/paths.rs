//! Mapping between project paths and absolute filesystem paths.
//!
//! A project path is a module identifier relative to the configured base path,
//! without file extension, optionally prefixed with `plugin!`. The two
//! mappings are inverses: `to_project_path(resolve_project_path(p)) == p` for
//! any path with a resolvable plugin or extension.

use std::path::{Component, Path, PathBuf};

use crate::config::ProjectConfig;
use crate::errors::Result;

pub const DEFAULT_EXTENSION: &str = ".js";

/// Resolves a project path to an absolute filesystem path.
///
/// The identifier is split on `!`; a prefix naming a configured plugin selects
/// that plugin's extension, any other prefix is kept as part of the path and
/// the default `.js` extension applies.
pub fn resolve_project_path(config: &ProjectConfig, module_id: &str) -> Result<PathBuf> {
    config.assert_ready()?;

    let mut ext = DEFAULT_EXTENSION;
    let mut rest = module_id;
    if let Some((plugin, tail)) = module_id.split_once('!')
        && let Some(plugin_ext) = config.plugin_extension(plugin)
    {
        ext = plugin_ext;
        rest = tail;
    }

    Ok(normalize_path(&config.base_path.join(format!("{rest}{ext}"))))
}

/// Inverse of [`resolve_project_path`]: derives the project path for an
/// absolute path inside the project. The first configured plugin (in
/// declaration order) whose extension suffixes the path wins and re-prepends
/// its `plugin!` prefix; otherwise the default `.js` extension is stripped.
pub fn to_project_path(config: &ProjectConfig, absolute: &Path) -> Result<String> {
    config.assert_ready()?;

    let absolute = absolute.to_string_lossy();
    let (prefix, ext) = config
        .plugins
        .iter()
        .find(|(_, ext)| absolute.ends_with(ext.as_str()))
        .map(|(name, ext)| (format!("{name}!"), ext.as_str()))
        .unwrap_or_else(|| (String::new(), DEFAULT_EXTENSION));

    let extensionless = absolute.strip_suffix(ext).unwrap_or(&absolute);
    let base = format!("{}/", config.base_path.to_string_lossy());
    let relative = extensionless.strip_prefix(&base).unwrap_or(extensionless);

    Ok(format!("{prefix}{relative}"))
}

/// Lexical path normalization: collapses `.` and `..` components without
/// touching the filesystem, the way `path.resolve` does.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Makes `path` absolute against the current directory, then normalizes it.
pub fn absolutize(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };
    normalize_path(&absolute)
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{normalize_path, resolve_project_path, to_project_path};
    use crate::config::ProjectConfig;
    use crate::errors::Error;

    fn config() -> ProjectConfig {
        ProjectConfig {
            requirejs_config: None,
            base_path: PathBuf::from("/project/src"),
            exclude_dirs: Vec::new(),
            plugins: vec![("hbs".to_string(), ".html".to_string())],
        }
    }

    #[test]
    fn resolves_plain_paths_with_default_extension() {
        let resolved = resolve_project_path(&config(), "app/views/Login").unwrap();
        assert_eq!(resolved, PathBuf::from("/project/src/app/views/Login.js"));
    }

    #[test]
    fn resolves_plugin_paths_with_plugin_extension() {
        let resolved = resolve_project_path(&config(), "hbs!templates/login").unwrap();
        assert_eq!(resolved, PathBuf::from("/project/src/templates/login.html"));
    }

    #[test]
    fn unknown_plugin_prefix_stays_in_the_path() {
        let resolved = resolve_project_path(&config(), "text!data/blob").unwrap();
        assert_eq!(resolved, PathBuf::from("/project/src/text!data/blob.js"));
    }

    #[test]
    fn maps_absolute_paths_back_to_project_paths() {
        let config = config();
        let id = to_project_path(&config, Path::new("/project/src/app/views/Login.js")).unwrap();
        assert_eq!(id, "app/views/Login");

        let id = to_project_path(&config, Path::new("/project/src/templates/login.html")).unwrap();
        assert_eq!(id, "hbs!templates/login");
    }

    #[test]
    fn round_trips_project_paths() {
        let config = config();
        for id in ["app/views/Login", "hbs!templates/login", "toplevel"] {
            let resolved = resolve_project_path(&config, id).unwrap();
            assert_eq!(to_project_path(&config, &resolved).unwrap(), id);
        }
    }

    #[test]
    fn missing_base_path_is_a_config_error() {
        let config = ProjectConfig::default();
        let err = resolve_project_path(&config, "anything").unwrap_err();
        assert!(matches!(err, Error::MissingConfig(_)));
    }

    #[test]
    fn normalizes_relative_components() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d.js")),
            PathBuf::from("/a/c/d.js")
        );
    }

    #[test]
    fn resolves_paths_above_the_base() {
        let resolved = resolve_project_path(&config(), "../js-libs/jquery/jquery").unwrap();
        assert_eq!(resolved, PathBuf::from("/project/js-libs/jquery/jquery.js"));
    }
}
