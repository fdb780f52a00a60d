//! Core operations.
//!
//! This module contains the business logic for zod2py commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod clean;
pub mod generate;
pub mod init;
pub mod watch;

use std::path::Path;

pub use check::check;
pub use clean::clean;
pub use generate::{generate, generate_module, remove_output};
pub use init::init;
pub use watch::watch;

/// A path for display, relative to the project root when possible.
pub(crate) fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Render a schema error the way miette prints it on the terminal.
pub(crate) fn render_error(error: Box<zod2py_schema::Error>) -> String {
    format!("{:?}", miette::Report::new(*error))
}
