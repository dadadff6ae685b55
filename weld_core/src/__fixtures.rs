use std::cell::Cell;
use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value as Json;

use crate::Ast;
use crate::CompileOptions;
use crate::CompileOutput;
use crate::Compiler;
use crate::GenerateOptions;
use crate::Input;
use crate::JsTech;
use crate::MemoryFileSystem;
use crate::ParseOptions;
use crate::SharedOptions;
use crate::Tech;
use crate::Transform;
use crate::TransformOptions;
use crate::WeldResult;

/// An in-memory tree of files, keyed by the paths given.
pub fn memory_fs(files: &[(&str, &str)]) -> MemoryFileSystem {
	files
		.iter()
		.fold(MemoryFileSystem::new(), |fs, (path, content)| fs.with_file(path, content))
}

/// Compile `code` with default options against `files`.
pub fn compile_code(files: &[(&str, &str)], code: &str) -> WeldResult<CompileOutput> {
	Compiler::with_file_system(memory_fs(files)).compile(Input::Code(code.into()), &CompileOptions::default())
}

/// Compile `code` and return the generated code.
pub fn compiled(files: &[(&str, &str)], code: &str) -> WeldResult<String> {
	Ok(compile_code(files, code)?.compiled_source.unwrap_or_default())
}

/// Parse `code` with the `js` tech.
pub fn parse_js(code: &str, source_path: Option<&str>) -> WeldResult<Ast> {
	JsTech.parse(code, &ParseOptions {
		source_path,
		shared: &SharedOptions::new(),
	})
}

/// The generated code of `ast`, minified.
pub fn generate(ast: &Ast) -> WeldResult<String> {
	JsTech.generate(ast, &GenerateOptions {
		pretty_print: false,
		source_map_url: None,
		shared: &SharedOptions::new(),
	})
}

pub fn shared(key: &str, value: impl Into<Json>) -> SharedOptions {
	let mut shared = SharedOptions::new();
	shared.insert(key.to_string(), value.into());
	shared
}

/// Parses like the `js` tech while counting calls and recording the shared
/// options it receives.
#[derive(Debug, Default, Clone)]
pub struct RecordingTech {
	pub calls: Rc<Cell<usize>>,
	pub seen: Rc<RefCell<Vec<SharedOptions>>>,
}

impl Tech for RecordingTech {
	fn parse(&self, source: &str, options: &ParseOptions<'_>) -> WeldResult<Ast> {
		self.calls.set(self.calls.get() + 1);
		self.seen.borrow_mut().push(options.shared.clone());
		JsTech.parse(source, options)
	}
}

/// Appends `marker();` to the program and records the shared options.
#[derive(Debug, Default, Clone)]
pub struct MarkerTransform {
	pub seen: Rc<RefCell<Vec<SharedOptions>>>,
}

impl Transform for MarkerTransform {
	fn transform(&self, mut ast: Ast, options: &TransformOptions<'_>) -> WeldResult<Ast> {
		self.seen.borrow_mut().push(options.shared.clone());
		let marker = JsTech.parse("marker();", &ParseOptions {
			source_path: None,
			shared: options.shared,
		})?;

		if let Some(body) = ast.program.nodes_mut("body") {
			body.extend(marker.into_body());
		}

		Ok(ast)
	}
}
