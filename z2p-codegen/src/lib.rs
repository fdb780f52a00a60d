//! Language-agnostic code generation utilities for zod2py.
//!
//! - [`CodeBuilder`] - Builder for indented code
//! - [`CodeFragment`] / [`Renderable`] - Intermediate representation for code pieces
//! - [`Diagnostic`] - Errors and warnings collected while generating

mod code_builder;
mod diagnostic;
mod renderable;

pub use code_builder::CodeBuilder;
pub use diagnostic::{Diagnostic, Severity};
pub use renderable::{CodeFragment, Renderable};
