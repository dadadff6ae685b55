use std::iter::once;

use tracing::debug;
use tracing::instrument;
use tracing::trace;

use crate::Ast;
use crate::Directive;
use crate::DirectivePattern;
use crate::FileSystem;
use crate::LENDABLE_KEYS;
use crate::Node;
use crate::ParseOptions;
use crate::SharedOptions;
use crate::TechRegistry;
use crate::TransformOptions;
use crate::WeldError;
use crate::WeldResult;
use crate::file;
use crate::find_directives;
use crate::literal_directive;
use crate::splice::Origin;
use crate::splice::Placement;
use crate::splice::splice;
use crate::walk::NodePath;
use crate::walk::Visitor;
use crate::walk::walk;

/// What the resolver knows at one level of inclusion.
///
/// Created from the [`TransformOptions`] of a compile and extended with
/// [`ResolutionContext::descend`] for every included file, so relative include
/// paths are always read against the directory of the file that wrote them.
#[derive(Debug, Clone)]
pub struct ResolutionContext<'a> {
	/// The file whose tree is being resolved: the compile input at the top,
	/// the include path as written below it.
	pub source_path: Option<String>,
	/// Directories of the including files, outermost first.
	pub source_chain: Vec<String>,
	/// Like `source_chain` but starting at the real path of the input.
	pub real_chain: Option<Vec<String>>,
	pub techs: &'a TechRegistry,
	pub default_tech: Option<&'a str>,
	pub pattern: &'a DirectivePattern,
	pub fs: &'a dyn FileSystem,
	pub shared: &'a SharedOptions,
}

impl<'a> ResolutionContext<'a> {
	pub fn new(options: &TransformOptions<'a>) -> Self {
		Self {
			source_path: options.source_path.map(ToString::to_string),
			source_chain: vec![file::dirname(options.source_path.unwrap_or_default())],
			real_chain: options.real_path.map(|path| vec![file::dirname(path)]),
			techs: options.techs,
			default_tech: options.default_tech,
			pattern: options.pattern,
			fs: options.fs,
			shared: options.shared,
		}
	}

	/// The context for the file included as `include_path`.
	#[must_use]
	pub fn descend(&self, include_path: &str) -> Self {
		let directory = file::dirname(include_path);
		let extend = |chain: &Vec<String>| {
			chain
				.iter()
				.cloned()
				.chain(once(directory.clone()))
				.collect::<Vec<_>>()
		};

		Self {
			source_path: Some(include_path.to_string()),
			source_chain: extend(&self.source_chain),
			real_chain: self.real_chain.as_ref().map(extend),
			..self.clone()
		}
	}

	/// The absolute location of `include_path`.
	pub fn locate(&self, include_path: &str) -> String {
		let chain = self.real_chain.as_ref().unwrap_or(&self.source_chain);
		file::resolve(chain.iter().map(String::as_str).chain(once(include_path)))
	}
}

/// Resolve every inclusion directive of `ast`, recursively.
#[instrument(skip_all, fields(source = ctx.source_path.as_deref().unwrap_or("<input>")))]
pub fn resolve(mut ast: Ast, ctx: &ResolutionContext<'_>) -> WeldResult<Ast> {
	walk(&mut ast, &mut Resolver { ctx })?;
	Ok(ast)
}

struct Resolver<'c, 'a> {
	ctx: &'c ResolutionContext<'a>,
}

impl Resolver<'_, '_> {
	/// Read, parse and resolve the file named by `directive`, then splice its
	/// top level nodes at `path` and consume the directive's comment.
	#[instrument(level = "debug", skip_all, fields(include = %directive.path))]
	fn include(
		&self,
		ast: &mut Ast,
		path: &mut NodePath,
		directive: &Directive,
		placement: &Placement,
	) -> WeldResult<()> {
		let ctx = self.ctx;
		let tech = directive
			.tech
			.as_deref()
			.and_then(|name| ctx.techs.get(name))
			.or_else(|| ctx.techs.lookup(&directive.path, ctx.default_tech))
			.ok_or_else(|| WeldError::MissingTech(directive.path.clone()))?;

		let location = ctx.locate(&directive.path);
		let content = ctx.fs.read(&location)?;
		let child = tech.parse(
			&content,
			&ParseOptions {
				source_path: Some(&directive.path),
				shared: ctx.shared,
			},
		)?;
		let child = resolve(child, &ctx.descend(&directive.path))?;

		let origin = Origin::new(directive, ctx.source_path.as_deref());
		let insertion = splice(ast, path, child.into_body(), placement, &origin)?;
		debug!(%location, %placement, ?insertion, "included");

		if let Some(comment) = directive.comment.as_ref() {
			let removed = ast.remove_comment(comment);
			trace!(removed, "consumed directive comment");
		}

		Ok(())
	}

	fn include_all(
		&self,
		ast: &mut Ast,
		path: &mut NodePath,
		directives: &[Directive],
		placement: &Placement,
	) -> WeldResult<()> {
		for directive in directives {
			self.include(ast, path, directive, placement)?;
		}
		Ok(())
	}
}

impl Visitor for Resolver<'_, '_> {
	type Error = WeldError;

	fn enter(&mut self, ast: &mut Ast, path: &mut NodePath) -> WeldResult<()> {
		let pattern = self.ctx.pattern;
		let host = ast.program.source().map(ToString::to_string);

		// `'marker:include:file.txt'` becomes the text of the file.
		let directive = ast
			.program
			.at(path)
			.and_then(|node| literal_directive(pattern, node));
		if let Some(directive) = directive {
			self.include(ast, path, &directive, &Placement::Replace)?;
		}

		// Directives inside an empty block, array or object. Only nodes of the
		// host file share its comment offsets.
		for key in LENDABLE_KEYS {
			let Some(node) = ast.program.at(path) else {
				break;
			};
			if node.source() != host.as_deref() {
				break;
			}
			let Some(range) = node.range else {
				break;
			};
			if !node.nodes(key).is_some_and(<[Node]>::is_empty) {
				continue;
			}

			let placement = if node.kind.is_atomic() {
				Placement::Replace
			} else {
				Placement::Into(key.to_string())
			};
			let directives = find_directives(pattern, &ast.comments, Some(range));
			self.include_all(ast, path, &directives, &placement)?;
		}

		let leading = ast
			.program
			.at(path)
			.map(|node| find_directives(pattern, &node.leading_comments, None))
			.unwrap_or_default();
		self.include_all(ast, path, &leading, &Placement::Before("body".to_string()))?;

		// Every trailing include lands right after the node, so the last one is
		// placed first to keep document order.
		let mut trailing = ast
			.program
			.at(path)
			.map(|node| find_directives(pattern, &node.trailing_comments, None))
			.unwrap_or_default();
		trailing.reverse();
		self.include_all(ast, path, &trailing, &Placement::After("body".to_string()))?;

		Ok(())
	}
}
