//! Static analysis and header regeneration for AMD/RequireJS modules.
//!
//! A module's *true* dependency set is computed by combining the declared
//! dependency array with free-identifier scope analysis, resolving every name
//! against the project's module index and the RequireJS loader configuration,
//! flagging circular chains, and rendering a canonical, deterministically
//! formatted `define([...], function(...) {` header.

pub mod analyzer;
pub mod args;
pub mod config;
pub mod errors;
pub mod module_file;
pub mod order;
pub mod paths;
pub mod project;

pub use config::{CONFIG_FILENAME, ProjectConfig};
pub use errors::{Error, Result};
pub use module_file::{ModuleFile, ResolvedDep, SpecifiedDeps};
pub use project::Project;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
