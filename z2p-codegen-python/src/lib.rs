//! Python code generator for zod2py.
//!
//! Schema trees are translated bottom-up by a [`Translator`]: every node
//! yields a Python type expression, the imports it needs and the named
//! declarations (dataclasses and enums) it depends on. A [`PyFile`] renders
//! those into one module.
//!
//! ```ignore
//! use zod2py_codegen_python::Generator;
//! use zod2py_schema::SchemaModule;
//!
//! let module = SchemaModule::from_file("src/team.z2p.json")?;
//! let unit = Generator::new().generate(&module);
//! if let Some(code) = unit.code() {
//!     println!("{code}");
//! }
//! ```

mod code_file;
mod discriminator;
mod encode;
mod generator;
mod imports;
mod structure;
mod translate;

pub use code_file::{PyFile, TypeAlias};
pub use discriminator::resolve_discriminator;
pub use encode::{Encoded, encode, naming_fragment, string_literal};
pub use generator::{GeneratedUnit, Generator, Output};
pub use imports::{ImportKey, ImportSet};
pub use structure::{DataStructure, StructureKind};
pub use translate::{TranslateContext, TranslateResult, Translation, Translator};
