// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Schema descriptors and project configuration for zod2py.
//!
//! A schema module is a JSON document mapping export names to schema nodes
//! (see [`SchemaModule`]). Nodes load into the closed [`SchemaNode`] enum.
//! Project settings live in `zod2py.toml` (or the JSON config names) and load
//! into [`Config`].

mod config;
mod error;
mod module;
mod node;
mod parse;

pub use config::{CONFIG_FILES, Config, ConfigFile, DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TOML};
pub use error::{Error, Result};
pub use module::{SchemaModule, SchemaRoot, module_stem};
pub use node::{Primitive, SchemaNode};
