//! tpclint-kernel: the core of the TPC plugin linter.
//!
//! This crate provides:
//!
//! - **Lexer**: one token per non-blank line, from a fixed-priority
//!   line grammar
//! - **Parser**: groups the token stream into named sections
//! - **Validator**: rule sets that cross-check the process and prompts
//!   documents and report typed, severity-graded violations
//!
//! The kernel never touches the filesystem; callers hand it the two
//! documents as strings and render the violation list however they like.

pub mod lexer;
pub mod parser;
pub mod validator;

pub use parser::Document;
pub use validator::{Severity, ValidatorConfig, Violation};
