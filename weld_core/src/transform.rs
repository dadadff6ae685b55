use std::fmt::Debug;

use indexmap::IndexMap;

use crate::Ast;
use crate::DirectivePattern;
use crate::FileSystem;
use crate::ResolutionContext;
use crate::SharedOptions;
use crate::TechRegistry;
use crate::WeldError;
use crate::WeldResult;
use crate::resolve;

/// The name of the built-in inclusion transform.
pub const INCLUDE_TRANSFORM: &str = "include";

/// Everything a transform may need about the compile it runs in.
#[derive(Debug, Clone, Copy)]
pub struct TransformOptions<'a> {
	/// The path recorded for the input, if any.
	pub source_path: Option<&'a str>,
	/// The input file with symlinks resolved. Includes are looked up next to
	/// it when present.
	pub real_path: Option<&'a str>,
	pub techs: &'a TechRegistry,
	pub default_tech: Option<&'a str>,
	pub pattern: &'a DirectivePattern,
	pub fs: &'a dyn FileSystem,
	pub shared: &'a SharedOptions,
}

/// One step of the compile chain, run between parsing and generation.
pub trait Transform: Debug {
	fn transform(&self, ast: Ast, options: &TransformOptions<'_>) -> WeldResult<Ast>;
}

/// Resolves inclusion directives.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncludeTransform;

impl Transform for IncludeTransform {
	fn transform(&self, ast: Ast, options: &TransformOptions<'_>) -> WeldResult<Ast> {
		resolve(ast, &ResolutionContext::new(options))
	}
}

#[derive(Debug, Default)]
pub struct TransformRegistry {
	transforms: IndexMap<String, Box<dyn Transform>>,
}

impl TransformRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry holding the `include` transform.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register(INCLUDE_TRANSFORM, IncludeTransform);
		registry
	}

	pub fn register(&mut self, name: impl Into<String>, transform: impl Transform + 'static) {
		self.transforms.insert(name.into(), Box::new(transform));
	}

	pub fn get(&self, name: &str) -> Option<&dyn Transform> {
		self.transforms.get(name).map(Box::as_ref)
	}

	/// Look up every name of `names` in order.
	pub fn chain<S: AsRef<str>>(&self, names: &[S]) -> WeldResult<Vec<&dyn Transform>> {
		names
			.iter()
			.map(|name| {
				let name = name.as_ref();
				self.get(name)
					.ok_or_else(|| WeldError::UnknownTransform(name.to_string()))
			})
			.collect()
	}
}
