//! Techs turn the text of one kind of file into an [`Ast`] and, for code
//! techs, back into text.

use std::fmt::Debug;
use std::path::Path;

use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value as Json;

pub use self::js::*;
pub use self::json::*;
pub use self::txt::*;
use crate::Ast;
use crate::WeldError;
use crate::WeldResult;

mod js;
mod json;
mod txt;

pub const JS_TECH: &str = "js";
pub const JSON_TECH: &str = "json";
/// The plain text tech. It is used for string literal directives and is the
/// default for files no other tech claims.
pub const TXT_TECH: &str = "txt";

/// Options passed untouched to every tech and transform of a compile.
pub type SharedOptions = Map<String, Json>;

#[derive(Debug, Clone, Copy)]
pub struct ParseOptions<'a> {
	/// Recorded as `loc.source` on every produced node. For included files this
	/// is the include path as written in the directive.
	pub source_path: Option<&'a str>,
	pub shared: &'a SharedOptions,
}

#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions<'a> {
	pub pretty_print: bool,
	/// When set, generated code ends with a `sourceMappingURL` comment.
	pub source_map_url: Option<&'a str>,
	pub shared: &'a SharedOptions,
}

/// Code generated together with its source map document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeWithMap {
	pub code: String,
	pub map: String,
}

/// A parse (and optionally generate) capability bound to file suffixes.
pub trait Tech: Debug {
	fn parse(&self, source: &str, options: &ParseOptions<'_>) -> WeldResult<Ast>;

	fn generate(&self, _ast: &Ast, _options: &GenerateOptions<'_>) -> WeldResult<String> {
		Err(cannot_generate())
	}

	fn generate_source_map(&self, _ast: &Ast, _options: &GenerateOptions<'_>) -> WeldResult<String> {
		Err(cannot_generate())
	}

	fn generate_with_source_map(
		&self,
		_ast: &Ast,
		_options: &GenerateOptions<'_>,
	) -> WeldResult<CodeWithMap> {
		Err(cannot_generate())
	}
}

fn cannot_generate() -> WeldError {
	WeldError::Generate {
		description: "this tech can only parse".to_string(),
	}
}

/// Append the `sourceMappingURL` trailer when a map url is configured.
pub fn with_source_map_url(mut code: String, url: Option<&str>) -> String {
	if let Some(url) = url {
		code.push_str("\n//# sourceMappingURL=");
		code.push_str(url);
	}
	code
}

/// Techs by name, plus suffix aliases.
#[derive(Debug, Default)]
pub struct TechRegistry {
	techs: IndexMap<String, Box<dyn Tech>>,
	aliases: IndexMap<String, String>,
}

impl TechRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry with the `js`, `json` and `txt` techs.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		registry.register(JS_TECH, JsTech);
		registry.register(JSON_TECH, JsonTech);
		registry.register(TXT_TECH, TxtTech);
		registry
	}

	/// Register `tech` under `name`, replacing any tech of the same name.
	pub fn register(&mut self, name: impl Into<String>, tech: impl Tech + 'static) {
		self.techs.insert(name.into(), Box::new(tech));
	}

	/// Let files ending in `suffix` use the tech registered as `target`.
	pub fn alias(&mut self, suffix: impl Into<String>, target: impl Into<String>) -> WeldResult<()> {
		let target = target.into();
		if !self.techs.contains_key(&target) {
			return Err(WeldError::MissingTech(target));
		}
		self.aliases.insert(suffix.into(), target);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&dyn Tech> {
		let name = self.aliases.get(name).map_or(name, String::as_str);
		self.techs.get(name).map(Box::as_ref)
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.techs.keys().map(String::as_str)
	}

	/// Find the tech for `file_name` by trying its suffixes longest first:
	/// `a.complex.custom.js` tries `complex.custom.js`, `custom.js` and `js`.
	/// Falls back to the tech named `default` when no suffix matches.
	pub fn lookup(&self, file_name: &str, default: Option<&str>) -> Option<&dyn Tech> {
		self.lookup_name(file_name, default)
			.and_then(|name| self.get(name))
	}

	/// The registered name [`TechRegistry::lookup`] would pick.
	pub fn lookup_name<'a>(&'a self, file_name: &'a str, default: Option<&'a str>) -> Option<&'a str> {
		let base = Path::new(file_name)
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or(file_name);

		let mut suffix = base.split_once('.').map(|(_, suffix)| suffix);
		while let Some(candidate) = suffix {
			if self.get(candidate).is_some() {
				return Some(candidate);
			}
			suffix = candidate.split_once('.').map(|(_, rest)| rest);
		}

		default.filter(|name| self.get(name).is_some())
	}
}
