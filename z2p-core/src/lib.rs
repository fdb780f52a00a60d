//! Core utilities and types for zod2py.
//!
//! This crate provides the naming rules and file operations shared by the
//! schema loader, the Python generator, and the CLI.

mod file;
mod naming;

// File operations
pub use file::{File, Overwrite, WriteResult, remove_file};
// Naming
pub use naming::{PATH_SEPARATOR, class_name, format_name, join_path, letter_suffix};
