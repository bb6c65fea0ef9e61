//! `monkey` is the library that powers the monkey interpreter.
//!
//! Source text goes through three stages:
//! - a `Lexer` turns characters into `Token`s,
//! - a Pratt `Parser` turns tokens into an `ast::Program`, collecting every
//!   `ParseError` it runs into instead of stopping at the first one,
//! - an `Evaluator` walks the tree and produces an `Object`.
//!
//! Runtime errors and `return` are ordinary values (`Object::Error` and
//! `Object::ReturnValue`) rather than `Result`s or panics. Scopes live in an
//! arena owned by `Environment` and are referred to by `ScopeId`, so closures
//! never form reference cycles with the scopes they capture.
//!
//! `run` strings the stages together and is what the `monkey` binary calls
//! for every line it reads.
#![warn(clippy::pedantic)]

pub mod core;

pub use crate::core::{run, tokenize, Environment, Object, ParseError, RuntimeError};
