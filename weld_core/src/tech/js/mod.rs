//! The JavaScript tech: ES5 scripts (plus `let` and `const`) parsed into an
//! ESTree shaped [`Ast`] and generated back, optionally with a source map.

use tracing::error;

use self::codegen::Generator;
use self::comments::attach_comments;
use self::lexer::TokenKind;
use self::lexer::Tokens;
use self::lexer::tokenize;
use self::parser::Parser;
use super::CodeWithMap;
use super::GenerateOptions;
use super::ParseOptions;
use super::Tech;
use super::with_source_map_url;
use crate::Ast;
use crate::LineTable;
use crate::Node;
use crate::NodeKind;
use crate::Span;
use crate::WeldResult;

mod codegen;
mod comments;
mod lexer;
mod parser;
mod source_map;

#[derive(Debug, Clone, Copy, Default)]
pub struct JsTech;

impl JsTech {
	fn render(ast: &Ast, options: &GenerateOptions<'_>, with_map: bool) -> WeldResult<(String, Option<String>)> {
		let mut generator = Generator::new(options.pretty_print, with_map);
		if let Err(e) = generator.program(&ast.program) {
			error!(ast = ?ast, "couldn't generate source, AST dump follows");
			return Err(e);
		}
		Ok(generator.finish())
	}
}

impl Tech for JsTech {
	fn parse(&self, source: &str, options: &ParseOptions<'_>) -> WeldResult<Ast> {
		parse_script(source, options.source_path)
	}

	fn generate(&self, ast: &Ast, options: &GenerateOptions<'_>) -> WeldResult<String> {
		let (code, _) = Self::render(ast, options, false)?;
		Ok(with_source_map_url(code, options.source_map_url))
	}

	fn generate_source_map(&self, ast: &Ast, options: &GenerateOptions<'_>) -> WeldResult<String> {
		let (_, map) = Self::render(ast, options, true)?;
		Ok(map.unwrap_or_default())
	}

	fn generate_with_source_map(
		&self,
		ast: &Ast,
		options: &GenerateOptions<'_>,
	) -> WeldResult<CodeWithMap> {
		let (code, map) = Self::render(ast, options, true)?;
		Ok(CodeWithMap {
			code: with_source_map_url(code, options.source_map_url),
			map: map.unwrap_or_default(),
		})
	}
}

/// Parse a whole script. The program spans the entire source so directives in
/// an otherwise empty file still fall inside it.
pub(crate) fn parse_script(source: &str, source_path: Option<&str>) -> WeldResult<Ast> {
	parse_with(source, source_path, |parser| parser.program())
}

/// Parse a source holding a single expression into a program whose body is
/// that expression.
pub(crate) fn parse_expression(source: &str, source_path: Option<&str>) -> WeldResult<Ast> {
	parse_with(source, source_path, |parser| {
		parser.expression_document().map(|expression| vec![expression])
	})
}

fn parse_with(
	source: &str,
	source_path: Option<&str>,
	parse: impl FnOnce(&mut Parser<'_>) -> WeldResult<Vec<Node>>,
) -> WeldResult<Ast> {
	let lines = LineTable::new(source);
	let Tokens { tokens, comments } = tokenize(source, &lines, source_path)?;
	let spans: Vec<Span> = tokens
		.iter()
		.filter(|token| token.kind != TokenKind::Eof)
		.map(|token| token.span)
		.collect();

	let body = parse(&mut Parser::new(tokens, &lines, source_path))?;

	let span = Span(0, source.len());
	let mut program = Node::new(NodeKind::Program).with("body", body);
	program.range = Some(span);
	program.loc = Some(lines.location(span, source_path));

	attach_comments(&mut program, &comments, &spans);

	Ok(Ast { program, comments })
}
