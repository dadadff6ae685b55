use std::fmt::Display;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tracing::debug;
use tracing::instrument;

use crate::Ast;
use crate::CodeWithMap;
use crate::DEFAULT_MARKER;
use crate::DirectivePattern;
use crate::FileSystem;
use crate::GenerateOptions;
use crate::INCLUDE_TRANSFORM;
use crate::JS_TECH;
use crate::OsFileSystem;
use crate::ParseOptions;
use crate::SharedOptions;
use crate::TXT_TECH;
use crate::Tech;
use crate::TechRegistry;
use crate::TransformOptions;
use crate::TransformRegistry;
use crate::WeldError;
use crate::WeldResult;

/// What a compile starts from.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
	/// JavaScript source text.
	Code(String),
	/// Path of a JavaScript file.
	File(String),
	/// An already parsed tree.
	Ast(Ast),
	/// Path of an ESTree JSON document.
	AstFile(String),
}

/// What a compile produces.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum OutputFormat {
	/// Generated code, returned in [`CompileOutput::compiled_source`].
	#[default]
	Code,
	/// The transformed tree, returned in [`CompileOutput::ast`].
	Ast,
	/// Generated code written to the path.
	CodeFile(String),
	/// The transformed tree written to the path as JSON.
	AstFile(String),
}

impl OutputFormat {
	fn wants_code(&self) -> bool {
		matches!(self, OutputFormat::Code | OutputFormat::CodeFile(_))
	}
}

/// The representation named on the command line or in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
	#[default]
	Code,
	Ast,
}

impl Format {
	/// Parse a format name, reporting `kind` (`input` or `output`) on failure.
	pub fn parse(kind: &'static str, name: &str) -> WeldResult<Self> {
		match name {
			"code" => Ok(Format::Code),
			"ast" => Ok(Format::Ast),
			_ => {
				Err(WeldError::UnknownFormat {
					kind,
					name: name.to_string(),
				})
			}
		}
	}

	pub fn input(self, path: impl Into<String>) -> Input {
		match self {
			Format::Code => Input::File(path.into()),
			Format::Ast => Input::AstFile(path.into()),
		}
	}

	pub fn output(self, path: Option<String>) -> OutputFormat {
		match (self, path) {
			(Format::Code, Some(path)) => OutputFormat::CodeFile(path),
			(Format::Ast, Some(path)) => OutputFormat::AstFile(path),
			(Format::Code, None) => OutputFormat::Code,
			(Format::Ast, None) => OutputFormat::Ast,
		}
	}
}

impl Display for Format {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Format::Code => write!(f, "code"),
			Format::Ast => write!(f, "ast"),
		}
	}
}

/// Whether and where a source map is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMap {
	/// Produce the map without referencing it from the code.
	Unnamed,
	/// Reference the map from the code as this url and, for file outputs,
	/// write it there.
	Named(String),
}

impl SourceMap {
	pub fn url(&self) -> Option<&str> {
		match self {
			SourceMap::Unnamed => None,
			SourceMap::Named(url) => Some(url),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CompileOptions {
	/// The path recorded as `loc.source` of the input. Defaults to the input
	/// path for file inputs.
	pub source_path: Option<String>,
	pub output: OutputFormat,
	pub source_map: Option<SourceMap>,
	pub pretty_print: bool,
	/// Transform names, run in order.
	pub transforms: Vec<String>,
	pub marker: String,
	/// The tech for includes whose suffix has no tech. `None` makes them fail.
	pub default_tech: Option<String>,
	/// Passed to every tech and transform.
	pub shared: SharedOptions,
}

impl Default for CompileOptions {
	fn default() -> Self {
		Self {
			source_path: None,
			output: OutputFormat::default(),
			source_map: None,
			pretty_print: false,
			transforms: vec![INCLUDE_TRANSFORM.to_string()],
			marker: DEFAULT_MARKER.to_string(),
			default_tech: Some(TXT_TECH.to_string()),
			shared: SharedOptions::new(),
		}
	}
}

/// The artifacts of a compile, filled in as they become available.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompileOutput {
	/// The raw input text, for code and file inputs.
	pub source: Option<String>,
	pub ast: Option<Ast>,
	pub compiled_source: Option<String>,
	pub source_map: Option<String>,
}

/// Serialize `ast` as an ESTree JSON document, indented by four spaces when
/// `pretty` is set.
pub fn ast_document(ast: &Ast, pretty: bool) -> WeldResult<String> {
	let to_error = |e: serde_json::Error| WeldError::AstDocument(e.to_string());

	if !pretty {
		return serde_json::to_string(ast).map_err(to_error);
	}

	let mut buffer = vec![];
	let mut serializer =
		serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
	ast.serialize(&mut serializer).map_err(to_error)?;
	String::from_utf8(buffer).map_err(|e| WeldError::AstDocument(e.to_string()))
}

/// Parses input, runs the transform chain and generates the output. Holds the
/// techs, transforms and file system a compile uses.
#[derive(Debug)]
pub struct Compiler {
	techs: TechRegistry,
	transforms: TransformRegistry,
	fs: Box<dyn FileSystem>,
}

impl Default for Compiler {
	fn default() -> Self {
		Self::new()
	}
}

impl Compiler {
	/// A compiler with the built-in techs and transforms on the real file
	/// system.
	pub fn new() -> Self {
		Self::with_file_system(OsFileSystem)
	}

	pub fn with_file_system(fs: impl FileSystem + 'static) -> Self {
		Self {
			techs: TechRegistry::with_builtins(),
			transforms: TransformRegistry::with_builtins(),
			fs: Box::new(fs),
		}
	}

	pub fn techs(&self) -> &TechRegistry {
		&self.techs
	}

	/// Register custom techs or override the built-in ones. The `js` tech parses
	/// code input and generates output.
	pub fn techs_mut(&mut self) -> &mut TechRegistry {
		&mut self.techs
	}

	pub fn transforms_mut(&mut self) -> &mut TransformRegistry {
		&mut self.transforms
	}

	pub fn file_system(&self) -> &dyn FileSystem {
		self.fs.as_ref()
	}

	pub fn compile(&self, input: Input, options: &CompileOptions) -> WeldResult<CompileOutput> {
		let mut output = CompileOutput::default();
		self.compile_into(input, options, &mut output)?;
		Ok(output)
	}

	/// Like [`Compiler::compile`], but artifacts produced before a failure stay
	/// in `output`.
	#[instrument(skip_all)]
	pub fn compile_into(
		&self,
		input: Input,
		options: &CompileOptions,
		output: &mut CompileOutput,
	) -> WeldResult<()> {
		let js = self
			.techs
			.get(JS_TECH)
			.ok_or_else(|| WeldError::MissingTech(JS_TECH.to_string()))?;
		let pattern = DirectivePattern::new(&options.marker)?;
		let transforms = self.transforms.chain(&options.transforms)?;

		let mut source_path = options.source_path.clone();
		let mut real_path = None;

		let ast = match input {
			Input::Code(code) => {
				let code: &str = output.source.insert(code);
				self.parse_code(js, code, source_path.as_deref(), options)?
			}
			Input::File(path) => {
				let code = self.fs.read(&path)?;
				real_path = self.fs.realpath(&path);
				let source_path = source_path.get_or_insert(path);
				let code: &str = output.source.insert(code);
				self.parse_code(js, code, Some(source_path.as_str()), options)?
			}
			Input::Ast(ast) => ast,
			Input::AstFile(path) => Ast::parse_document(&self.fs.read(&path)?)?,
		};

		let transform_options = TransformOptions {
			source_path: source_path.as_deref(),
			real_path: real_path.as_deref(),
			techs: &self.techs,
			default_tech: options.default_tech.as_deref(),
			pattern: &pattern,
			fs: self.fs.as_ref(),
			shared: &options.shared,
		};

		let mut ast = ast;
		for transform in transforms {
			ast = transform.transform(ast, &transform_options)?;
		}

		let ast: &Ast = output.ast.insert(ast);
		let generate_options = GenerateOptions {
			pretty_print: options.pretty_print,
			source_map_url: options.source_map.as_ref().and_then(SourceMap::url),
			shared: &options.shared,
		};

		let (code, map) = match (&options.source_map, options.output.wants_code()) {
			(Some(_), true) => {
				let CodeWithMap { code, map } = js.generate_with_source_map(ast, &generate_options)?;
				(Some(code), Some(map))
			}
			(Some(_), false) => (None, Some(js.generate_source_map(ast, &generate_options)?)),
			(None, true) => (Some(js.generate(ast, &generate_options)?), None),
			(None, false) => (None, None),
		};

		let document = match &options.output {
			OutputFormat::AstFile(_) => Some(ast_document(ast, options.pretty_print)?),
			_ => None,
		};

		if let Some(map) = map {
			let is_file = matches!(
				options.output,
				OutputFormat::CodeFile(_) | OutputFormat::AstFile(_)
			);
			if let (true, Some(SourceMap::Named(path))) = (is_file, &options.source_map) {
				self.fs.write(path, &map)?;
				debug!(path, "wrote source map");
			}
			output.source_map = Some(map);
		}

		output.compiled_source.clone_from(&code);

		match &options.output {
			OutputFormat::CodeFile(path) => {
				self.fs.write(path, code.as_deref().unwrap_or_default())?;
				debug!(path, "wrote code");
			}
			OutputFormat::AstFile(path) => {
				self.fs.write(path, document.as_deref().unwrap_or_default())?;
				debug!(path, "wrote ast");
			}
			OutputFormat::Code | OutputFormat::Ast => {}
		}

		Ok(())
	}

	fn parse_code(
		&self,
		js: &dyn Tech,
		code: &str,
		source_path: Option<&str>,
		options: &CompileOptions,
	) -> WeldResult<Ast> {
		js.parse(
			code,
			&ParseOptions {
				source_path,
				shared: &options.shared,
			},
		)
	}
}
