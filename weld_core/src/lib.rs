//! `weld_core` is the engine behind the `weld` JavaScript preprocessor. It
//! parses a source into an ESTree shaped tree, finds inclusion directives in
//! comments and string literals, and splices the trees of the included files
//! in their place, recursively. The result is generated back to code, with an
//! optional source map that points into every contributing file.
//!
//! ## Directives
//!
//! ```js
//! /* borschik:include:lib/a.js */ // statements of lib/a.js go before this one
//! var config = /* borschik:include:config.json */ {};
//! var text = 'borschik:include:readme.txt';
//! ```
//!
//! A directive in the comments before a statement inserts the included
//! statements before it, one after a statement inserts them after it, and one
//! inside an empty block, array or object fills it. A directive standing in
//! for an object, array or literal replaces that value.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Input (code, file or ESTree JSON)
//!   → js tech (tokens, comments, tree)
//!   → transforms (`include` resolves directives depth first)
//!   → js tech (code and source map)
//! ```
//!
//! ## Modules
//!
//! - [`tech`]: the pluggable parse and generate capabilities, picked by file
//!   suffix.
//! - [`config`]: configuration loaded from `weld.toml`.
//! - [`file`]: the file system the engine reads includes from.
//!
//! ## Quick Start
//!
//! ```rust
//! use weld_core::CompileOptions;
//! use weld_core::Compiler;
//! use weld_core::Input;
//! use weld_core::MemoryFileSystem;
//!
//! let fs = MemoryFileSystem::new().with_file("a.js", "var x = 1;");
//! let compiler = Compiler::with_file_system(fs);
//! let output = compiler
//! 	.compile(
//! 		Input::Code("var a = /*borschik:include:a.js*/ 1;".into()),
//! 		&CompileOptions::default(),
//! 	)
//! 	.unwrap();
//!
//! assert_eq!(output.compiled_source.as_deref(), Some("var x=1;var a=1;"));
//! ```

pub use ast::*;
pub use compile::*;
pub use config::*;
pub use directive::*;
pub use error::*;
pub use file::FileSystem;
pub use file::MemoryFileSystem;
pub use file::OsFileSystem;
pub use position::*;
pub use resolve::*;
pub use splice::Placement;
pub use tech::*;
pub use transform::*;
pub use walk::*;

mod ast;
mod compile;
pub mod config;
mod directive;
#[allow(unused_assignments)]
mod error;
pub mod file;
mod position;
mod resolve;
pub(crate) mod splice;
pub mod tech;
mod transform;
mod walk;

#[cfg(test)]
mod __fixtures;
#[cfg(test)]
mod __tests;
