use serde_json::Value as Json;

use super::ParseOptions;
use super::Tech;
use crate::Ast;
use crate::LineTable;
use crate::Node;
use crate::NodeKind;
use crate::Span;
use crate::WeldResult;

/// Includes a file verbatim as a single string literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxtTech;

impl Tech for TxtTech {
	fn parse(&self, source: &str, options: &ParseOptions<'_>) -> WeldResult<Ast> {
		let span = Span(0, source.len());
		let lines = LineTable::new(source);

		let mut literal = Node::new(NodeKind::Literal).with("value", Json::String(source.to_string()));
		literal.range = Some(span);
		literal.loc = Some(lines.location(span, options.source_path));

		let mut program = Node::new(NodeKind::Program).with("body", vec![literal]);
		program.range = Some(span);
		program.loc = Some(lines.location(span, options.source_path));

		Ok(Ast::new(program))
	}
}
