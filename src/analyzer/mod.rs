pub mod ast;
pub mod globals;
pub mod loader_config;

pub use ast::{ModuleAnalysis, analyze_module, source_is_module};
pub use loader_config::{ShimIndex, parse_loader_config, read_loader_config};
