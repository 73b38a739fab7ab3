//! Project-wide module index and file cache.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::WalkDir;

use crate::analyzer::{ShimIndex, read_loader_config, source_is_module};
use crate::config::ProjectConfig;
use crate::errors::Result;
use crate::module_file::ModuleFile;
use crate::paths::{normalize_path, resolve_project_path, to_project_path};

/// One analyzed source tree: the configuration governing it, the module
/// name -> project path index (discovered files merged with loader-config
/// entries), and a cache of constructed [`ModuleFile`]s keyed by absolute
/// path. Single-threaded by design; the cache is interior-mutable so lookups
/// can run during traversal.
pub struct Project {
    config: ProjectConfig,
    modules: BTreeMap<String, String>,
    shims: ShimIndex,
    files: RefCell<HashMap<PathBuf, Rc<ModuleFile>>>,
}

impl Project {
    /// Discovers the config governing `target` and indexes the project.
    pub fn open(target: &Path) -> Result<Self> {
        let config = ProjectConfig::discover(target)?;
        Self::with_config(config)
    }

    pub fn with_config(config: ProjectConfig) -> Result<Self> {
        config.assert_ready()?;

        let mut modules = discover_modules(&config)?;
        let shims = match &config.requirejs_config {
            Some(path) => read_loader_config(path)?,
            None => ShimIndex::default(),
        };
        // Loader-config entries win name collisions against discovered files.
        for (name, path) in shims.modules() {
            modules.insert(name.clone(), path.clone());
        }

        Ok(Project {
            config,
            modules,
            shims,
            files: RefCell::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    /// Module name -> project path, discovered files and loader-config
    /// entries merged.
    pub fn modules(&self) -> &BTreeMap<String, String> {
        &self.modules
    }

    pub fn shims(&self) -> &ShimIndex {
        &self.shims
    }

    /// Resolves a project path to a cached [`ModuleFile`]. Returns `None`
    /// for unresolvable, unreadable or non-module files so graph walks stay
    /// total; only valid modules and plugin files enter the cache.
    pub fn get_file(&self, module_id: &str) -> Option<Rc<ModuleFile>> {
        // An id that already carries a recognized extension is a file path.
        let has_extension = module_id.ends_with(".js")
            || self
                .config
                .plugins
                .iter()
                .any(|(_, ext)| module_id.ends_with(ext.as_str()));
        let path = if has_extension {
            normalize_path(&self.config.base_path.join(module_id))
        } else {
            resolve_project_path(&self.config, module_id).ok()?
        };
        self.get_file_at(&path)
    }

    /// Same as [`Project::get_file`], starting from an absolute path.
    pub fn get_file_at(&self, path: &Path) -> Option<Rc<ModuleFile>> {
        if let Some(file) = self.files.borrow().get(path) {
            return Some(file.clone());
        }

        let file = ModuleFile::read(path).ok()?;
        if !file.is_module() && file.is_plugin(self).is_none() {
            return None;
        }
        let file = Rc::new(file);
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), file.clone());
        Some(file)
    }
}

/// Walks the base path and indexes every AMD module and plugin file found.
/// The module name is the bare file name without its extension; when two
/// files reduce to the same name the later one wins, with a warning.
fn discover_modules(config: &ProjectConfig) -> Result<BTreeMap<String, String>> {
    let mut modules = BTreeMap::new();

    let walker = WalkDir::new(&config.base_path).sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                if std::env::var("JSIMPORTS_VERBOSE").is_ok() {
                    eprintln!("[jsimports][debug] walk error: {err}");
                }
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let relative = match path.strip_prefix(&config.base_path) {
            Ok(relative) => relative.to_string_lossy().into_owned(),
            Err(_) => continue,
        };
        if config
            .exclude_dirs
            .iter()
            .any(|dir| relative.starts_with(dir.as_str()))
        {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy();
        let extension = if file_name.ends_with(".js") {
            ".js"
        } else {
            match config
                .plugins
                .iter()
                .map(|(_, ext)| ext.as_str())
                .find(|ext| file_name.ends_with(ext))
            {
                Some(ext) => ext,
                None => continue,
            }
        };

        // Plugin files are always indexed; .js files only when they are
        // actually AMD modules.
        if extension == ".js" {
            let is_module = std::fs::read_to_string(path)
                .map(|src| source_is_module(&src))
                .unwrap_or(false);
            if !is_module {
                continue;
            }
        }

        let name = file_name
            .strip_suffix(extension)
            .unwrap_or(&file_name)
            .to_string();
        let project_path = to_project_path(config, path)?;

        if let Some(previous) = modules.insert(name.clone(), project_path) {
            eprintln!(
                "[jsimports][warn] duplicate module name {name}: {previous} shadowed by {}",
                modules[&name]
            );
        }
    }

    Ok(modules)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::Project;

    const CONFIG: &str = r#"{
        "requirejsConfig": "src/config.js",
        "basePath": "src",
        "excludeDirs": ["vendor"],
        "plugins": { "hbs": ".html" }
    }"#;

    const LOADER_CONFIG: &str = r#"
require.config({
    paths: { jquery: '../libs/jquery' },
    shim: { underscore: { exports: '_' } }
});
"#;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        fs::write(path, contents).expect("write");
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write(root, "jsimports.json", CONFIG);
        write(root, "src/config.js", LOADER_CONFIG);
        write(root, "src/app/Router.js", "define([], function() {});");
        write(
            root,
            "src/app/views/Login.js",
            "define(['app/Router'], function(Router) { Router; });",
        );
        write(root, "src/app/helpers.js", "var notAModule = 1;");
        write(root, "src/vendor/Excluded.js", "define([], function() {});");
        write(root, "src/templates/login.html", "<div></div>");
        dir
    }

    #[test]
    fn indexes_modules_plugins_and_loader_entries() {
        let dir = fixture();
        let project = Project::open(&dir.path().join("src/app/Router.js")).expect("project");

        let modules = project.modules();
        assert_eq!(modules.get("Router").map(String::as_str), Some("app/Router"));
        assert_eq!(
            modules.get("Login").map(String::as_str),
            Some("app/views/Login")
        );
        assert_eq!(
            modules.get("login").map(String::as_str),
            Some("hbs!templates/login")
        );
        assert_eq!(modules.get("jquery").map(String::as_str), Some("jquery"));
        assert_eq!(modules.get("_").map(String::as_str), Some("underscore"));
    }

    #[test]
    fn non_modules_and_excluded_dirs_are_skipped() {
        let dir = fixture();
        let project = Project::open(&dir.path().join("src/app/Router.js")).expect("project");

        assert!(!project.modules().contains_key("helpers"));
        assert!(!project.modules().contains_key("Excluded"));
    }

    #[test]
    fn plugin_files_report_their_plugin_name() {
        let dir = fixture();
        let project = Project::open(&dir.path().join("src/app/Router.js")).expect("project");

        let file = project.get_file("hbs!templates/login").expect("plugin file");
        let plugin = file.is_plugin(&project);
        drop(file);
        assert_eq!(plugin, Some("hbs"));
    }

    #[test]
    fn duplicate_bare_names_resolve_to_the_later_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write(root, "jsimports.json", r#"{ "basePath": "src" }"#);
        write(root, "src/app/Dup.js", "define([], function() {});");
        write(root, "src/widgets/Dup.js", "define([], function() {});");

        let project = Project::open(&root.join("src")).expect("project");
        assert_eq!(
            project.modules().get("Dup").map(String::as_str),
            Some("widgets/Dup")
        );
    }

    #[test]
    fn get_file_caches_modules_and_rejects_non_modules() {
        let dir = fixture();
        let project = Project::open(&dir.path().join("src/app/Router.js")).expect("project");

        let first = project.get_file("app/Router").expect("module file");
        let second = project.get_file("app/Router").expect("module file");
        assert!(std::rc::Rc::ptr_eq(&first, &second));

        assert!(project.get_file("app/helpers").is_none());
        assert!(project.get_file("app/DoesNotExist").is_none());
        assert!(project.get_file("hbs!templates/login").is_some());
    }
}
