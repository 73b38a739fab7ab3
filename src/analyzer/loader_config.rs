//! Structural parse of a RequireJS loader configuration file.
//!
//! The loader config is a script invoking `require.config({...})` (or
//! `requirejs.config` / a bare `configure` call). Only the declarative shape
//! of its `paths` and `shim` object literals matters here, so the file is
//! parsed with OXC and the argument object is read straight off the AST.
//! Nothing is ever executed.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::{Visit, walk::walk_call_expression};
use oxc_parser::Parser;
use oxc_span::SourceType;

use crate::errors::{Error, Result};

/// Lookup table derived from the loader configuration: identifier seen in
/// code -> module name to declare. Every `paths` key maps to itself; every
/// shim with an `exports` global maps that global to the shim's name.
#[derive(Debug, Clone, Default)]
pub struct ShimIndex {
    modules: BTreeMap<String, String>,
    shim_deps: BTreeMap<String, Vec<String>>,
}

impl ShimIndex {
    /// Identifier -> module name mapping, merged into the project module map.
    pub fn modules(&self) -> &BTreeMap<String, String> {
        &self.modules
    }

    /// Inter-shim dependencies, as declared. Parsed but not chased.
    pub fn shim_deps(&self, name: &str) -> Option<&[String]> {
        self.shim_deps.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Reads and structurally parses the loader configuration at `path`.
pub fn read_loader_config(path: &Path) -> Result<ShimIndex> {
    let source = fs::read_to_string(path).map_err(|err| Error::io(path, err))?;
    parse_loader_config(path, &source)
}

/// Parses loader configuration source text. A file without any recognizable
/// configure call yields an empty index.
pub fn parse_loader_config(path: &Path, source: &str) -> Result<ShimIndex> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        let reason = ret
            .errors
            .first()
            .map(|err| err.to_string())
            .unwrap_or_else(|| "not parseable".to_string());
        return Err(Error::Parse {
            path: path.to_path_buf(),
            reason,
        });
    }

    let mut visitor = ConfigVisitor::default();
    visitor.visit_program(&ret.program);

    let mut index = ShimIndex::default();
    for lib in visitor.paths {
        index.modules.insert(lib.clone(), lib);
    }
    for (name, exports, deps) in visitor.shims {
        if let Some(exports) = exports {
            index.modules.insert(exports, name.clone());
        }
        if !deps.is_empty() {
            index.shim_deps.insert(name, deps);
        }
    }
    Ok(index)
}

#[derive(Default)]
struct ConfigVisitor {
    paths: Vec<String>,
    shims: Vec<(String, Option<String>, Vec<String>)>,
    seen: bool,
}

impl<'a> Visit<'a> for ConfigVisitor {
    fn visit_call_expression(&mut self, call: &CallExpression<'a>) {
        if !self.seen
            && is_configure_call(call)
            && let Some(Argument::ObjectExpression(options)) = call.arguments.first()
        {
            self.seen = true;
            self.collect(options);
            return;
        }
        walk_call_expression(self, call);
    }
}

impl ConfigVisitor {
    fn collect(&mut self, options: &ObjectExpression<'_>) {
        for prop in &options.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            match property_key_name(&prop.key).as_deref() {
                Some("paths") => {
                    if let Expression::ObjectExpression(paths) = &prop.value {
                        self.collect_paths(paths);
                    }
                }
                Some("shim") => {
                    if let Expression::ObjectExpression(shims) = &prop.value {
                        self.collect_shims(shims);
                    }
                }
                _ => {}
            }
        }
    }

    fn collect_paths(&mut self, paths: &ObjectExpression<'_>) {
        for prop in &paths.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            if let Some(name) = property_key_name(&prop.key) {
                self.paths.push(name);
            }
        }
    }

    fn collect_shims(&mut self, shims: &ObjectExpression<'_>) {
        for prop in &shims.properties {
            let ObjectPropertyKind::ObjectProperty(prop) = prop else {
                continue;
            };
            let Some(name) = property_key_name(&prop.key) else {
                continue;
            };
            // shim value is either a bare deps array or { deps, exports }
            let (exports, deps) = match &prop.value {
                Expression::ArrayExpression(array) => (None, string_elements(array)),
                Expression::ObjectExpression(object) => {
                    let mut exports = None;
                    let mut deps = Vec::new();
                    for field in &object.properties {
                        let ObjectPropertyKind::ObjectProperty(field) = field else {
                            continue;
                        };
                        match property_key_name(&field.key).as_deref() {
                            Some("exports") => {
                                if let Expression::StringLiteral(lit) = &field.value {
                                    exports = Some(lit.value.to_string());
                                }
                            }
                            Some("deps") => {
                                if let Expression::ArrayExpression(array) = &field.value {
                                    deps = string_elements(array);
                                }
                            }
                            _ => {}
                        }
                    }
                    (exports, deps)
                }
                _ => continue,
            };
            self.shims.push((name, exports, deps));
        }
    }
}

fn is_configure_call(call: &CallExpression<'_>) -> bool {
    match &call.callee {
        // require.config({...}) / requirejs.config({...})
        Expression::StaticMemberExpression(member) => member.property.name == "config",
        // configure({...})
        Expression::Identifier(ident) => ident.name == "configure",
        _ => false,
    }
}

fn property_key_name(key: &PropertyKey<'_>) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(ident) => Some(ident.name.to_string()),
        PropertyKey::StringLiteral(lit) => Some(lit.value.to_string()),
        _ => None,
    }
}

fn string_elements(array: &ArrayExpression<'_>) -> Vec<String> {
    array
        .elements
        .iter()
        .filter_map(|element| match element {
            ArrayExpressionElement::StringLiteral(lit) => Some(lit.value.to_string()),
            _ => None,
        })
        .collect()
}
