//! One analyzable unit: a single AMD module file.
//!
//! A [`ModuleFile`] owns its source text and a memoized parse result. All
//! derived data (specified, real and resolved dependencies, the regenerated
//! header) is computed from that one analysis; lookups against the rest of
//! the project go through a borrowed [`Project`], never an owning edge.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyzer::{ModuleAnalysis, analyze_module};
use crate::errors::{Error, Result};
use crate::order::{sort_key, top_level_dir};
use crate::project::Project;

const CIRCULAR_WARNING: &str = "WARNING: CIRCULAR DEPENDENCY";

const PATHS_SEPARATOR: &str = ",\n\t";
const PATHS_GROUP_SEPARATOR: &str = ",\n\n\t";
const NAMES_SEPARATOR: &str = ",\n            ";
const NAMES_GROUP_SEPARATOR: &str = ",\n\n            ";
const ANONYMOUS_MARKER: &str = "\n\t// anonymous dependencies:\n\t";

/// Declared dependencies, split by whether a factory parameter names them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecifiedDeps {
    /// Parameter name -> dependency path, in declaration order.
    pub named: Vec<(String, String)>,
    /// Paths with no corresponding parameter (positional surplus). These are
    /// kept: dropping them would silently drop side-effecting module loads.
    pub anonymous: Vec<String>,
}

impl SpecifiedDeps {
    pub fn path_for(&self, name: &str) -> Option<&str> {
        self.named
            .iter()
            .find(|(param, _)| param == name)
            .map(|(_, path)| path.as_str())
    }
}

/// One line of the regenerated dependency declaration. `plugin` names the
/// loader plugin when the resolved path carries a configured `plugin!`
/// prefix; the prefix itself stays part of `path`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedDep {
    pub name: String,
    pub path: String,
    pub comment: Option<String>,
    pub plugin: Option<String>,
}

pub struct ModuleFile {
    path: PathBuf,
    src: String,
    analysis: OnceCell<Result<ModuleAnalysis>>,
}

impl ModuleFile {
    /// Reads the file at `path`. Parsing happens lazily on first use.
    pub fn read(path: &Path) -> Result<Self> {
        let src = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
        Ok(ModuleFile {
            path: path.to_path_buf(),
            src,
            analysis: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.src
    }

    /// Parses and analyzes the source, at most once per instance. A parse
    /// failure is memoized and re-raised on every later call.
    pub fn analysis(&self) -> Result<&ModuleAnalysis> {
        self.analysis
            .get_or_init(|| analyze_module(&self.path, &self.src))
            .as_ref()
            .map_err(Error::clone)
    }

    /// True iff the file parses and its first statement is a `define` call.
    /// Parse errors are swallowed so bulk scans stay total.
    pub fn is_module(&self) -> bool {
        self.analysis().map(|a| a.is_module).unwrap_or(false)
    }

    /// Name of the plugin whose configured extension suffixes this path, if
    /// any. Checked in declaration order, first match wins.
    pub fn is_plugin<'a>(&self, project: &'a Project) -> Option<&'a str> {
        let path = self.path.to_string_lossy();
        project
            .config()
            .plugins
            .iter()
            .find(|(_, ext)| path.ends_with(ext.as_str()))
            .map(|(name, _)| name.as_str())
    }

    /// Pairs the declared dependency-path array positionally with the factory
    /// parameter names. Surplus paths become anonymous dependencies.
    pub fn specified_dependencies(&self) -> Result<SpecifiedDeps> {
        let analysis = self.analysis()?;
        if !analysis.is_module || !analysis.has_dependency_array || !analysis.has_factory {
            return Err(Error::InvalidModule {
                path: self.path.clone(),
                reason: "expected define([...], function(...) {...})".to_string(),
            });
        }

        let named = analysis
            .params
            .iter()
            .zip(&analysis.paths)
            .map(|(param, path)| (param.clone(), path.clone()))
            .collect();
        let anonymous = analysis
            .paths
            .get(analysis.params.len()..)
            .unwrap_or_default()
            .to_vec();

        Ok(SpecifiedDeps { named, anonymous })
    }

    /// The dependencies the module body actually uses: every free identifier
    /// (browser globals already filtered out) plus every declared parameter
    /// with at least one reference inside the factory. Each entry carries its
    /// declared path, or an empty string when nothing was declared for it.
    pub fn real_dependencies(&self) -> Result<Vec<(String, String)>> {
        let analysis = self.analysis()?;
        let specified = self.specified_dependencies()?;

        let mut deps: Vec<(String, String)> = Vec::new();
        for ident in &analysis.free_identifiers {
            let path = specified.path_for(ident).unwrap_or("").to_string();
            deps.push((ident.clone(), path));
        }
        for (param, path) in &specified.named {
            let referenced = analysis.param_refs.get(param).copied().unwrap_or(0) > 0;
            if referenced && !deps.iter().any(|(name, _)| name == param) {
                deps.push((param.clone(), path.clone()));
            }
        }
        Ok(deps)
    }

    /// Declared parameters never referenced inside the factory body.
    pub fn unused_dependencies(&self) -> Result<Vec<String>> {
        let analysis = self.analysis()?;
        let specified = self.specified_dependencies()?;
        Ok(specified
            .named
            .iter()
            .filter(|(param, _)| analysis.param_refs.get(param).copied().unwrap_or(0) == 0)
            .map(|(param, _)| param.clone())
            .collect())
    }

    /// Resolves every real dependency to a concrete path, in priority order:
    /// the author's declared path, then the project module map, then an empty
    /// path with a manual-insertion comment. Entries on a circular chain get
    /// a warning comment appended. The result is sorted for rendering.
    pub fn resolved_dependencies(&self, project: &Project) -> Result<Vec<ResolvedDep>> {
        let mut resolved = Vec::new();
        for (name, declared) in self.real_dependencies()? {
            let (path, mut comment) = if !declared.is_empty() {
                (declared, None)
            } else if let Some(path) = project.modules().get(&name) {
                (path.clone(), None)
            } else {
                (
                    String::new(),
                    Some(format!("<-- manually insert path for {name}")),
                )
            };

            if !path.is_empty() && self.is_circular(project, &path) {
                comment = Some(match comment {
                    Some(existing) => format!("{existing} {CIRCULAR_WARNING}"),
                    None => CIRCULAR_WARNING.to_string(),
                });
            }

            let plugin = path
                .split_once('!')
                .filter(|(prefix, _)| project.config().plugin_extension(prefix).is_some())
                .map(|(prefix, _)| prefix.to_string());

            resolved.push(ResolvedDep {
                name,
                path,
                comment,
                plugin,
            });
        }

        resolved.sort_by_key(|dep| sort_key(&dep.path));
        Ok(resolved)
    }

    /// True iff following `dependency_path` from this file eventually leads
    /// back to a file already on the chain. Re-walked from scratch on every
    /// call; the graphs this runs on are small.
    pub fn is_circular(&self, project: &Project, dependency_path: &str) -> bool {
        let mut chain = vec![self.path.clone()];
        walk_circular(project, dependency_path, &mut chain)
    }

    /// Renders the canonical `define([...], function(...) {` header.
    pub fn new_define_section(&self, project: &Project) -> Result<String> {
        let resolved = self.resolved_dependencies(project)?;
        let anonymous = self.specified_dependencies()?.anonymous;
        Ok(render_define_section(&resolved, &anonymous))
    }

    /// The current header: everything up to and including the first `{`.
    pub fn current_define_section(&self) -> Option<&str> {
        let brace = self.src.find('{')?;
        Some(&self.src[..=brace])
    }

    /// Full regenerated source: the new header spliced onto the body after
    /// the first `{` of the original.
    pub fn regenerated_source(&self, project: &Project) -> Result<String> {
        let header = self.new_define_section(project)?;
        let body = match self.src.split_once('{') {
            Some((_, rest)) => rest,
            None => "",
        };
        Ok(format!("{header}{body}"))
    }
}

fn walk_circular(project: &Project, dependency_path: &str, chain: &mut Vec<PathBuf>) -> bool {
    let Some(file) = project.get_file(dependency_path) else {
        return false;
    };
    if chain.contains(&file.path) {
        return true;
    }
    let Ok(specified) = file.specified_dependencies() else {
        return false;
    };

    chain.push(file.path.clone());
    let deps = specified
        .named
        .iter()
        .map(|(_, path)| path.as_str())
        .chain(specified.anonymous.iter().map(String::as_str));
    for dep in deps {
        if walk_circular(project, dep, chain) {
            chain.pop();
            return true;
        }
    }
    chain.pop();
    false
}

/// Byte-exact rendering of the declaration block. Trailing separators are
/// written after every entry and the last one is trimmed off at the end; a
/// group break upgrades the previous entry's separator to its double-newline
/// variant.
fn render_define_section(resolved: &[ResolvedDep], anonymous: &[String]) -> String {
    if resolved.is_empty() && anonymous.is_empty() {
        return "define([], function() {".to_string();
    }

    let mut paths = String::from("define([\n\t");
    let mut names = String::from("], function(");

    let mut prev_group: Option<&str> = None;
    for dep in resolved {
        let group = top_level_dir(&dep.path);
        if let Some(prev) = prev_group
            && prev != group
        {
            replace_last_separator(&mut paths, PATHS_SEPARATOR, PATHS_GROUP_SEPARATOR);
            replace_last_separator(&mut names, NAMES_SEPARATOR, NAMES_GROUP_SEPARATOR);
        }
        prev_group = Some(group);

        paths.push('\'');
        paths.push_str(&dep.path);
        paths.push('\'');
        if let Some(comment) = &dep.comment {
            paths.push_str(" /* ");
            paths.push_str(comment);
            paths.push_str(" */");
        }
        paths.push_str(PATHS_SEPARATOR);

        names.push_str(&dep.name);
        names.push_str(NAMES_SEPARATOR);
    }

    if !anonymous.is_empty() {
        paths.push_str(ANONYMOUS_MARKER);
        for path in anonymous {
            paths.push('\'');
            paths.push_str(path);
            paths.push('\'');
            paths.push_str(PATHS_SEPARATOR);
        }
    }

    // Drop the trailing separator after the last path line.
    paths.truncate(paths.len() - PATHS_SEPARATOR.len());
    paths.push('\n');

    if resolved.is_empty() {
        names.push_str(") {");
    } else {
        names.truncate(names.len() - NAMES_SEPARATOR.len());
        names.push_str(") {");
    }

    paths.push_str(&names);
    paths
}

fn replace_last_separator(out: &mut String, separator: &str, group_separator: &str) {
    if out.ends_with(separator) {
        out.truncate(out.len() - separator.len());
        out.push_str(group_separator);
    }
}
