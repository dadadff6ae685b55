use super::ParseOptions;
use super::Tech;
use super::js::parse_expression;
use crate::Ast;
use crate::WeldResult;

/// Parses a file holding one expression, usually a JSON document. The
/// expression itself (not an expression statement) becomes the single item of
/// the program body, so it can replace objects, arrays and literals.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonTech;

impl Tech for JsonTech {
	fn parse(&self, source: &str, options: &ParseOptions<'_>) -> WeldResult<Ast> {
		parse_expression(source, options.source_path)
	}
}
