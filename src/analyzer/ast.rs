//! Syntax adapter over the OXC parser and semantic analyzer.
//!
//! Parses one AMD module source, extracts the `define` call shape (declared
//! dependency paths + factory parameters) and the scope facts the dependency
//! engine needs: free identifiers leaving the program scope and reference
//! counts for the factory parameters. Everything is copied into owned data so
//! callers never hold arena lifetimes.

use std::collections::HashMap;
use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::*;
use oxc_ast_visit::Visit;
use oxc_parser::Parser;
use oxc_semantic::SemanticBuilder;
use oxc_span::SourceType;

use super::globals::is_browser_global;
use crate::errors::{Error, Result};

/// Owned summary of one parsed source file.
#[derive(Debug, Clone, Default)]
pub struct ModuleAnalysis {
    /// First top-level statement is an expression statement calling `define`.
    pub is_module: bool,
    /// The `define` call carries a dependency array as its first argument.
    pub has_dependency_array: bool,
    /// The `define` call carries a function expression as its second argument.
    pub has_factory: bool,
    /// Declared dependency paths, in declaration order.
    pub paths: Vec<String>,
    /// Factory parameter names, in declaration order.
    pub params: Vec<String>,
    /// Unresolved identifiers leaving the program scope, browser globals and
    /// `define` filtered out, deduplicated and sorted.
    pub free_identifiers: Vec<String>,
    /// Reference count per factory parameter inside the factory body.
    pub param_refs: HashMap<String, usize>,
}

/// Parses `source` and computes the full [`ModuleAnalysis`].
///
/// Fails with [`Error::Parse`] on any parser error; parsing never partially
/// succeeds. A syntactically valid non-module yields `is_module: false`.
pub fn analyze_module(path: &Path, source: &str) -> Result<ModuleAnalysis> {
    let allocator = Allocator::default();
    // AMD modules are plain scripts, not ES modules
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();

    if ret.panicked || !ret.errors.is_empty() {
        if std::env::var("JSIMPORTS_VERBOSE").is_ok() {
            for err in &ret.errors {
                eprintln!("[jsimports][debug] parse error in {}: {err}", path.display());
            }
        }
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

    let mut analysis = ModuleAnalysis::default();

    let Some(call) = define_call(&ret.program) else {
        return Ok(analysis);
    };
    analysis.is_module = true;

    // First argument: the declared dependency-path array.
    if let Some(Argument::ArrayExpression(array)) = call.arguments.first() {
        analysis.has_dependency_array = true;
        for element in &array.elements {
            if let ArrayExpressionElement::StringLiteral(lit) = element {
                analysis.paths.push(lit.value.to_string());
            }
        }
    }

    // Second argument: the factory function.
    let factory = match call.arguments.get(1) {
        Some(Argument::FunctionExpression(func)) => Some(&**func),
        _ => None,
    };
    if let Some(func) = factory {
        analysis.has_factory = true;
        for param in &func.params.items {
            if let BindingPattern::BindingIdentifier(ident) = &param.pattern {
                analysis.params.push(ident.name.to_string());
            }
        }
    }

    // Scope analysis: identifiers that resolve to nothing inside the file.
    let semantic_ret = SemanticBuilder::new().build(&ret.program);
    if semantic_ret.errors.is_empty() {
        let semantic = semantic_ret.semantic;
        let mut free: Vec<String> = semantic
            .scoping()
            .root_unresolved_references()
            .keys()
            .map(|name| name.to_string())
            .filter(|name| !is_browser_global(name))
            .collect();
        free.sort();
        analysis.free_identifiers = free;
    } else if std::env::var("JSIMPORTS_VERBOSE").is_ok() {
        eprintln!(
            "[jsimports][debug] semantic errors in {}: {} errors",
            path.display(),
            semantic_ret.errors.len()
        );
    }

    // Reference counts for the factory parameters.
    if let Some(func) = factory
        && let Some(body) = &func.body
    {
        let mut counter = ParamRefCounter {
            counts: analysis
                .params
                .iter()
                .map(|param| (param.clone(), 0usize))
                .collect(),
        };
        counter.visit_function_body(body);
        analysis.param_refs = counter.counts;
    }

    Ok(analysis)
}

/// Returns true iff the program's first top-level statement is an expression
/// statement whose call target is the identifier `define`. Parse failures and
/// structural mismatches yield `false`, never an error.
pub fn source_is_module(source: &str) -> bool {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if ret.panicked || !ret.errors.is_empty() {
        return false;
    }
    define_call(&ret.program).is_some()
}

fn define_call<'a>(program: &'a Program<'a>) -> Option<&'a CallExpression<'a>> {
    let Some(Statement::ExpressionStatement(stmt)) = program.body.first() else {
        return None;
    };
    let Expression::CallExpression(call) = &stmt.expression else {
        return None;
    };
    let Expression::Identifier(ident) = &call.callee else {
        return None;
    };
    (ident.name == "define").then(|| &**call)
}

/// Counts identifier references against a fixed set of parameter names.
/// Binding positions are not identifier references, so declarations and the
/// parameters themselves never count.
struct ParamRefCounter {
    counts: HashMap<String, usize>,
}

impl<'a> Visit<'a> for ParamRefCounter {
    fn visit_identifier_reference(&mut self, ident: &IdentifierReference<'a>) {
        if let Some(count) = self.counts.get_mut(ident.name.as_str()) {
            *count += 1;
        }
    }
}
