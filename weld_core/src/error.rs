use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum WeldError {
	#[error("couldn't read file `{path}`: {reason}")]
	#[diagnostic(code(weld::read), help("check that the include path is relative to the including file"))]
	Read { path: String, reason: String },

	#[error(
		"couldn't parse {}: {description} (line {line}, column {column})",
		display_source(.file.as_deref())
	)]
	#[diagnostic(code(weld::parse))]
	Parse {
		file: Option<String>,
		index: usize,
		line: usize,
		column: usize,
		description: String,
	},

	#[error(
		"source validity threat at {} line: {line} column: {column}",
		display_source(.file.as_deref())
	)]
	#[diagnostic(
		code(weld::validity),
		help(
			"statements may only be included into a `body`, and objects, arrays or literals may \
			 only replace objects, arrays or literals"
		)
	)]
	Validity {
		file: Option<String>,
		index: usize,
		line: usize,
		column: usize,
	},

	#[error("couldn't generate source from AST: {description}")]
	#[diagnostic(code(weld::generate))]
	Generate { description: String },

	#[error("couldn't write file `{path}`: {reason}")]
	#[diagnostic(code(weld::write))]
	Write { path: String, reason: String },

	#[error("unknown {kind} format `{name}`")]
	#[diagnostic(code(weld::unknown_format), help("supported formats: code, ast"))]
	UnknownFormat { kind: &'static str, name: String },

	#[error("couldn't find `{0}` transform")]
	#[diagnostic(
		code(weld::unknown_transform),
		help("register the transform with the compiler before naming it")
	)]
	UnknownTransform(String),

	#[error("no tech can handle `{0}`")]
	#[diagnostic(
		code(weld::missing_tech),
		help("register a tech for this file suffix or configure a `default_tech`")
	)]
	MissingTech(String),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(weld::config_parse),
		help("check that weld.toml is valid TOML with optional [techs] and [shared] tables")
	)]
	ConfigParse(String),

	#[error("invalid AST document: {0}")]
	#[diagnostic(code(weld::ast_document))]
	AstDocument(String),
}

fn display_source(file: Option<&str>) -> String {
	file.map_or_else(|| "<input>".to_string(), |file| format!("`{file}`"))
}

pub type WeldResult<T> = Result<T, WeldError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
