//! Wisp: a small dynamically-typed expression/statement language.
//!
//! The public surface is the full pipeline (lexer, parser, interpreter) plus
//! the pieces an embedder needs to drive it directly — [`Environment`] to
//! share or isolate global state across calls, [`Value`] to inspect results,
//! [`Diagnostic`] to render failures.

pub mod ast;
pub mod builtins;
pub mod config;
pub mod context;
pub mod diagnostic;
pub mod environment;
pub mod globals;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod position;
pub mod token;
pub mod value;

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::Config;
use crate::context::Context;
use crate::diagnostic::Diagnostic;
use crate::environment::Environment;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::value::Value;

/// Run a complete program against a fresh global environment (spec §6).
///
/// Returns `(Some(value), None)` on success, where `value` is the result of
/// the last top-level statement, or `(None, Some(diagnostic))` if lexing,
/// parsing, or execution failed.
pub fn run(file_name: &str, text: &str) -> (Option<Value>, Option<Diagnostic>) {
    run_with_config(file_name, text, &Rc::new(Config::default()))
}

/// Like [`run`], but threading a `.wisp.toml` [`Config`] through so the `RUN`
/// builtin resolves nested scripts against the same search path as the
/// top-level invocation (SPEC_FULL §2/§3).
pub fn run_with_config(
    file_name: &str,
    text: &str,
    config: &Rc<Config>,
) -> (Option<Value>, Option<Diagnostic>) {
    let global_env = globals::new_global_environment();
    run_in_with_config(file_name, text, &global_env, config)
}

/// Like [`run`], but against a caller-supplied global environment — lets an
/// embedder share state (e.g. a REPL's accumulated bindings) across calls.
pub fn run_in(
    file_name: &str,
    text: &str,
    global_env: &Rc<RefCell<Environment>>,
) -> (Option<Value>, Option<Diagnostic>) {
    run_in_with_config(file_name, text, global_env, &Rc::new(Config::default()))
}

/// Combines [`run_in`]'s caller-supplied environment with
/// [`run_with_config`]'s caller-supplied config.
pub fn run_in_with_config(
    file_name: &str,
    text: &str,
    global_env: &Rc<RefCell<Environment>>,
    config: &Rc<Config>,
) -> (Option<Value>, Option<Diagnostic>) {
    let tokens = match Lexer::new(file_name, text).make_tokens() {
        Ok(tokens) => tokens,
        Err(err) => return (None, Some(err)),
    };

    let ast = Parser::new(tokens).parse();
    let Some(node) = ast.node else {
        return (None, ast.error);
    };

    let context = Rc::new(Context::root("<program>"));
    let mut interpreter = Interpreter::with_config(config.clone());
    let result = interpreter.visit(&node, global_env, &context);

    match result.error {
        Some(err) => (None, Some(err)),
        None => (result.value, None),
    }
}
