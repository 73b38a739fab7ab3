//! Project configuration: discovery and parsing of `jsimports.json`.
//!
//! The config file is looked up from the target upwards to the filesystem
//! root, the same way node resolves `package.json`. Relative paths inside the
//! file are resolved against the directory containing it.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::errors::{Error, Result};
use crate::paths::normalize_path;

pub const CONFIG_FILENAME: &str = "jsimports.json";

/// Parsed `jsimports.json`.
///
/// `plugins` maps loader plugin names to file extensions and keeps the JSON
/// declaration order: when several plugins share an extension, the first
/// declared one wins the reverse mapping.
#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// Absolute path to the RequireJS loader config file, when configured.
    pub requirejs_config: Option<PathBuf>,
    /// Absolute path all module identifiers resolve against.
    pub base_path: PathBuf,
    /// Directory prefixes (relative to the base path) skipped during scans.
    pub exclude_dirs: Vec<String>,
    /// Plugin name -> file extension, in declaration order.
    pub plugins: Vec<(String, String)>,
}

impl ProjectConfig {
    /// Finds and loads the config governing `start` (a file or directory).
    pub fn discover(start: &Path) -> Result<Self> {
        let config_path = find_config_path(start)?;
        Self::load_from_path(&config_path)
    }

    /// Loads the config file at `path`, resolving relative paths inside it
    /// against the file's directory.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        let raw: RawConfig = serde_json::from_str(&text).map_err(|err| Error::InvalidConfig {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;

        let config_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let resolve = |p: &str| normalize_path(&config_dir.join(p));

        Ok(ProjectConfig {
            requirejs_config: raw.require_js_config.as_deref().map(resolve),
            base_path: raw.base_path.as_deref().map(resolve).unwrap_or_default(),
            exclude_dirs: raw.exclude_dirs,
            plugins: raw.plugins.0,
        })
    }

    /// Fails with [`Error::MissingConfig`] when a field required for path
    /// resolution was absent from the config file.
    pub fn assert_ready(&self) -> Result<()> {
        if self.base_path.as_os_str().is_empty() {
            return Err(Error::MissingConfig("basePath".to_string()));
        }
        Ok(())
    }

    /// Extension configured for the given loader plugin, if any.
    pub fn plugin_extension(&self, name: &str) -> Option<&str> {
        self.plugins
            .iter()
            .find(|(plugin, _)| plugin == name)
            .map(|(_, ext)| ext.as_str())
    }

    /// True when the extension belongs to one of the configured plugins.
    pub fn is_plugin_extension(&self, ext: &str) -> bool {
        self.plugins.iter().any(|(_, plugin_ext)| plugin_ext == ext)
    }
}

/// Walks from `start` (file or directory) up to the filesystem root looking
/// for [`CONFIG_FILENAME`].
pub fn find_config_path(start: &Path) -> Result<PathBuf> {
    let start_dir = if start.is_dir() {
        start
    } else {
        start.parent().unwrap_or_else(|| Path::new("/"))
    };

    let mut dir = start_dir;
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => {
                return Err(Error::ConfigNotFound {
                    start: start.to_path_buf(),
                });
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawConfig {
    #[serde(default, rename = "requirejsConfig")]
    require_js_config: Option<String>,
    #[serde(default)]
    base_path: Option<String>,
    #[serde(default)]
    exclude_dirs: Vec<String>,
    #[serde(default)]
    plugins: PluginMap,
}

/// JSON object deserialized into a vector so declaration order survives.
#[derive(Debug, Default)]
struct PluginMap(Vec<(String, String)>);

impl<'de> Deserialize<'de> for PluginMap {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PluginMapVisitor;

        impl<'de> Visitor<'de> for PluginMapVisitor {
            type Value = PluginMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of plugin names to file extensions")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, ext)) = access.next_entry::<String, String>()? {
                    entries.push((name, ext));
                }
                Ok(PluginMap(entries))
            }
        }

        deserializer.deserialize_map(PluginMapVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{CONFIG_FILENAME, ProjectConfig, find_config_path};
    use crate::errors::Error;

    const CONFIG: &str = r#"{
        "requirejsConfig": "src/config.js",
        "basePath": "src",
        "excludeDirs": ["vendor", "test/fixtures"],
        "plugins": {
            "hbs": ".html",
            "tpl": ".tpl"
        }
    }"#;

    fn write_config(dir: &std::path::Path, text: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        fs::write(&path, text).expect("write config");
        path
    }

    #[test]
    fn loads_and_resolves_relative_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), CONFIG);

        let config = ProjectConfig::load_from_path(&path).expect("valid config");
        assert_eq!(config.base_path, dir.path().join("src"));
        assert_eq!(config.requirejs_config, Some(dir.path().join("src/config.js")));
        assert_eq!(config.exclude_dirs, vec!["vendor", "test/fixtures"]);
    }

    #[test]
    fn plugins_keep_declaration_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), CONFIG);

        let config = ProjectConfig::load_from_path(&path).expect("valid config");
        assert_eq!(
            config.plugins,
            vec![
                ("hbs".to_string(), ".html".to_string()),
                ("tpl".to_string(), ".tpl".to_string())
            ]
        );
        assert_eq!(config.plugin_extension("hbs"), Some(".html"));
        assert_eq!(config.plugin_extension("text"), None);
        assert!(config.is_plugin_extension(".tpl"));
        assert!(!config.is_plugin_extension(".js"));
    }

    #[test]
    fn finds_config_upwards_from_nested_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = write_config(dir.path(), CONFIG);
        let nested = dir.path().join("src/app/views");
        fs::create_dir_all(&nested).expect("mkdir");

        let found = find_config_path(&nested.join("Login.js")).expect("config found");
        assert_eq!(found, config_path);
    }

    #[test]
    fn missing_config_is_typed() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = find_config_path(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn broken_json_is_invalid_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), "{ basePath: ");
        let err = ProjectConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn loader_config_key_uses_the_lowercase_js_spelling() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            dir.path(),
            r#"{ "requirejsConfig": "config.js", "basePath": "." }"#,
        );
        let config = ProjectConfig::load_from_path(&path).expect("valid config");
        assert_eq!(config.requirejs_config, Some(dir.path().join("config.js")));

        // The camelCased near-miss must fail loudly, not vanish into None.
        let path = write_config(
            dir.path(),
            r#"{ "requireJsConfig": "config.js", "basePath": "." }"#,
        );
        let err = ProjectConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), r#"{ "basepath": "src" }"#);
        let err = ProjectConfig::load_from_path(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    fn absent_base_path_fails_assert_ready() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(dir.path(), "{}");
        let config = ProjectConfig::load_from_path(&path).expect("valid config");
        let err = config.assert_ready().unwrap_err();
        assert!(matches!(err, Error::MissingConfig(_)));
    }
}
