use serde_json::Value as Json;

use super::source_map::SourceMapBuilder;
use crate::Node;
use crate::NodeKind;
use crate::WeldError;
use crate::WeldResult;

/// Operator precedence levels, loosest first.
mod precedence {
	pub const SEQUENCE: u8 = 0;
	pub const ASSIGNMENT: u8 = 1;
	pub const CONDITIONAL: u8 = 2;
	pub const LOGICAL_OR: u8 = 3;
	pub const LOGICAL_AND: u8 = 4;
	pub const BITWISE_OR: u8 = 5;
	pub const BITWISE_XOR: u8 = 6;
	pub const BITWISE_AND: u8 = 7;
	pub const EQUALITY: u8 = 8;
	pub const RELATIONAL: u8 = 9;
	pub const SHIFT: u8 = 10;
	pub const ADDITIVE: u8 = 11;
	pub const MULTIPLICATIVE: u8 = 12;
	pub const UNARY: u8 = 13;
	pub const POSTFIX: u8 = 14;
	pub const CALL: u8 = 15;
	pub const NEW: u8 = 16;
	pub const MEMBER: u8 = 17;
	pub const PRIMARY: u8 = 18;
}

fn binary_precedence(operator: &str) -> u8 {
	match operator {
		"||" => precedence::LOGICAL_OR,
		"&&" => precedence::LOGICAL_AND,
		"|" => precedence::BITWISE_OR,
		"^" => precedence::BITWISE_XOR,
		"&" => precedence::BITWISE_AND,
		"==" | "!=" | "===" | "!==" => precedence::EQUALITY,
		"<" | ">" | "<=" | ">=" | "in" | "instanceof" => precedence::RELATIONAL,
		"<<" | ">>" | ">>>" => precedence::SHIFT,
		"+" | "-" => precedence::ADDITIVE,
		_ => precedence::MULTIPLICATIVE,
	}
}

fn expression_precedence(node: &Node) -> u8 {
	match node.kind {
		NodeKind::SequenceExpression => precedence::SEQUENCE,
		NodeKind::AssignmentExpression => precedence::ASSIGNMENT,
		NodeKind::ConditionalExpression => precedence::CONDITIONAL,
		NodeKind::LogicalExpression | NodeKind::BinaryExpression => {
			binary_precedence(node.str("operator").unwrap_or_default())
		}
		NodeKind::UnaryExpression => precedence::UNARY,
		NodeKind::UpdateExpression if node.bool("prefix") => precedence::UNARY,
		NodeKind::UpdateExpression => precedence::POSTFIX,
		NodeKind::CallExpression => precedence::CALL,
		NodeKind::NewExpression => precedence::NEW,
		NodeKind::MemberExpression => precedence::MEMBER,
		_ => precedence::PRIMARY,
	}
}

fn is_identifier_part(ch: char) -> bool {
	ch.is_alphanumeric() || ch == '_' || ch == '$' || !ch.is_ascii()
}

/// Whether two pieces of code would merge into one token without a space.
fn needs_space(last: char, first: char) -> bool {
	(is_identifier_part(last) && is_identifier_part(first))
		|| (last == '+' && first == '+')
		|| (last == '-' && first == '-')
		|| (last == '/' && matches!(first, '/' | '*'))
}

/// The node an expression statement's code starts with.
fn leftmost(node: &Node) -> &Node {
	let next = match node.kind {
		NodeKind::CallExpression => node.node("callee"),
		NodeKind::MemberExpression => node.node("object"),
		NodeKind::BinaryExpression | NodeKind::LogicalExpression | NodeKind::AssignmentExpression => {
			node.node("left")
		}
		NodeKind::ConditionalExpression => node.node("test"),
		NodeKind::SequenceExpression => node.nodes("expressions").and_then(<[Node]>::first),
		NodeKind::UpdateExpression if !node.bool("prefix") => node.node("argument"),
		_ => None,
	};
	next.map_or(node, leftmost)
}

/// Whether a `new` callee contains a call that would otherwise take the
/// argument list.
fn has_call(node: &Node) -> bool {
	match node.kind {
		NodeKind::CallExpression => true,
		NodeKind::MemberExpression => node.node("object").is_some_and(has_call),
		_ => false,
	}
}

fn is_number_literal(node: &Node) -> bool {
	node.kind == NodeKind::Literal && node.data("value").is_some_and(Json::is_number)
}

fn format_number(value: f64) -> WeldResult<String> {
	if !value.is_finite() {
		return Err(WeldError::Generate {
			description: format!("can't represent the number `{value}`"),
		});
	}
	let plain = if value.fract() == 0.0 && value.abs() < 1e21 {
		format!("{}", value as i128)
	} else {
		format!("{value}")
	};

	// `1e21`, `1e-7` and `1e6` beat their expanded forms.
	let exponent = format!("{value:e}");
	Ok(if exponent.len() < plain.len() {
		exponent
	} else {
		plain
	})
}

fn quote(value: &str, prefer_single: bool) -> String {
	let singles = value.matches('\'').count();
	let doubles = value.matches('"').count();
	let quote = if prefer_single || singles <= doubles {
		'\''
	} else {
		'"'
	};

	let mut out = String::with_capacity(value.len() + 2);
	out.push(quote);
	for ch in value.chars() {
		match ch {
			'\\' => out.push_str("\\\\"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			'\u{8}' => out.push_str("\\b"),
			'\u{c}' => out.push_str("\\f"),
			'\u{b}' => out.push_str("\\v"),
			'\u{2028}' => out.push_str("\\u2028"),
			'\u{2029}' => out.push_str("\\u2029"),
			ch if ch == quote => {
				out.push('\\');
				out.push(ch);
			}
			ch if ch < ' ' => out.push_str(&format!("\\x{:02X}", ch as u32)),
			ch => out.push(ch),
		}
	}
	out.push(quote);
	out
}

fn missing(node: &Node, key: &str) -> WeldError {
	WeldError::Generate {
		description: format!("`{}` is missing `{key}`", node.kind),
	}
}

fn child<'n>(node: &'n Node, key: &str) -> WeldResult<&'n Node> {
	node.node(key).ok_or_else(|| missing(node, key))
}

fn children<'n>(node: &'n Node, key: &str) -> WeldResult<&'n [Node]> {
	node.nodes(key).ok_or_else(|| missing(node, key))
}

/// A source location waiting for the next emitted token.
struct Mark {
	source: String,
	line: usize,
	column: usize,
	name: Option<String>,
}

/// Writes JavaScript for a tree, either minified or indented with four
/// spaces, optionally recording a source map on the way.
pub(crate) struct Generator {
	out: String,
	/// 0-indexed position of the end of `out`. Columns count UTF-16 units.
	line: usize,
	column: usize,
	pretty: bool,
	depth: usize,
	allow_in: bool,
	map: Option<SourceMapBuilder>,
	pending: Vec<Mark>,
}

impl Generator {
	pub fn new(pretty: bool, with_map: bool) -> Self {
		Self {
			out: String::new(),
			line: 0,
			column: 0,
			pretty,
			depth: 0,
			allow_in: true,
			map: with_map.then(SourceMapBuilder::default),
			pending: vec![],
		}
	}

	/// The code and, when requested, the source map document.
	pub fn finish(self) -> (String, Option<String>) {
		let map = self.map.map(|map| map.to_json_string());
		(self.out, map)
	}

	fn push(&mut self, text: &str) {
		for ch in text.chars() {
			if ch == '\n' {
				self.line += 1;
				self.column = 0;
			} else {
				self.column += ch.len_utf16();
			}
		}
		self.out.push_str(text);
	}

	fn emit(&mut self, text: &str) {
		if let (Some(last), Some(first)) = (self.out.chars().next_back(), text.chars().next()) {
			if needs_space(last, first) {
				self.push(" ");
			}
		}

		if let Some(map) = self.map.as_mut() {
			for mark in self.pending.drain(..) {
				map.add(
					(self.line, self.column),
					&mark.source,
					mark.line,
					mark.column,
					mark.name.as_deref(),
				);
			}
		}

		self.push(text);
	}

	fn space(&mut self) {
		if self.pretty {
			self.push(" ");
		}
	}

	fn newline(&mut self) {
		if self.pretty {
			self.push("\n");
			self.push(&"    ".repeat(self.depth));
		}
	}

	/// Map the next emitted token to the start of `node`.
	fn mark(&mut self, node: &Node) {
		if self.map.is_none() {
			return;
		}
		let Some(loc) = node.loc.as_ref() else {
			return;
		};
		let Some(source) = loc.source.as_ref() else {
			return;
		};

		self.pending.push(Mark {
			source: source.clone(),
			line: loc.start.line,
			column: loc.start.column,
			name: (node.kind == NodeKind::Identifier)
				.then(|| node.str("name").map(ToString::to_string))
				.flatten(),
		});
	}

	pub fn program(&mut self, program: &Node) -> WeldResult<()> {
		self.mark(program);
		for (index, statement) in children(program, "body")?.iter().enumerate() {
			if index > 0 {
				self.newline();
			}
			self.statement(statement)?;
		}
		Ok(())
	}

	fn statement(&mut self, node: &Node) -> WeldResult<()> {
		self.mark(node);

		match &node.kind {
			NodeKind::Program => self.program(node)?,
			NodeKind::BlockStatement => self.block(node)?,
			NodeKind::EmptyStatement => self.emit(";"),
			NodeKind::DebuggerStatement => self.emit("debugger;"),
			NodeKind::ExpressionStatement => {
				let expression = child(node, "expression")?;
				let wrap = matches!(
					leftmost(expression).kind,
					NodeKind::ObjectExpression | NodeKind::FunctionExpression
				);
				if wrap {
					self.emit("(");
				}
				self.expression(expression, precedence::SEQUENCE)?;
				if wrap {
					self.emit(")");
				}
				self.emit(";");
			}
			NodeKind::VariableDeclaration => {
				self.variable_declaration(node)?;
				self.emit(";");
			}
			NodeKind::FunctionDeclaration => self.function(node)?,
			NodeKind::ReturnStatement | NodeKind::ThrowStatement => {
				let keyword = if node.kind == NodeKind::ReturnStatement {
					"return"
				} else {
					"throw"
				};
				self.emit(keyword);
				if let Some(argument) = node.node("argument") {
					self.space();
					self.expression(argument, precedence::SEQUENCE)?;
				}
				self.emit(";");
			}
			NodeKind::BreakStatement | NodeKind::ContinueStatement => {
				let keyword = if node.kind == NodeKind::BreakStatement {
					"break"
				} else {
					"continue"
				};
				self.emit(keyword);
				if let Some(label) = node.node("label") {
					self.expression(label, precedence::PRIMARY)?;
				}
				self.emit(";");
			}
			NodeKind::LabeledStatement => {
				self.expression(child(node, "label")?, precedence::PRIMARY)?;
				self.emit(":");
				self.space();
				self.statement(child(node, "body")?)?;
			}
			NodeKind::WithStatement => {
				self.emit("with");
				self.space();
				self.emit("(");
				self.expression(child(node, "object")?, precedence::SEQUENCE)?;
				self.emit(")");
				self.substatement(child(node, "body")?)?;
			}
			NodeKind::IfStatement => {
				self.emit("if");
				self.space();
				self.emit("(");
				self.expression(child(node, "test")?, precedence::SEQUENCE)?;
				self.emit(")");
				let consequent = child(node, "consequent")?;
				self.substatement(consequent)?;

				if let Some(alternate) = node.node("alternate") {
					if consequent.kind == NodeKind::BlockStatement {
						self.space();
					} else {
						self.newline();
					}
					self.emit("else");
					if alternate.kind == NodeKind::IfStatement {
						self.space();
						self.statement(alternate)?;
					} else {
						self.substatement(alternate)?;
					}
				}
			}
			NodeKind::ForStatement => {
				self.emit("for");
				self.space();
				self.emit("(");
				if let Some(init) = node.node("init") {
					self.for_left(init)?;
				}
				self.emit(";");
				if let Some(test) = node.node("test") {
					self.space();
					self.expression(test, precedence::SEQUENCE)?;
				}
				self.emit(";");
				if let Some(update) = node.node("update") {
					self.space();
					self.expression(update, precedence::SEQUENCE)?;
				}
				self.emit(")");
				self.substatement(child(node, "body")?)?;
			}
			NodeKind::ForInStatement => {
				self.emit("for");
				self.space();
				self.emit("(");
				self.for_left(child(node, "left")?)?;
				self.space();
				self.emit("in");
				self.space();
				self.expression(child(node, "right")?, precedence::SEQUENCE)?;
				self.emit(")");
				self.substatement(child(node, "body")?)?;
			}
			NodeKind::WhileStatement => {
				self.emit("while");
				self.space();
				self.emit("(");
				self.expression(child(node, "test")?, precedence::SEQUENCE)?;
				self.emit(")");
				self.substatement(child(node, "body")?)?;
			}
			NodeKind::DoWhileStatement => {
				self.emit("do");
				let body = child(node, "body")?;
				self.substatement(body)?;
				if body.kind == NodeKind::BlockStatement {
					self.space();
				} else {
					self.newline();
				}
				self.emit("while");
				self.space();
				self.emit("(");
				self.expression(child(node, "test")?, precedence::SEQUENCE)?;
				self.emit(");");
			}
			NodeKind::TryStatement => {
				self.emit("try");
				self.space();
				self.block(child(node, "block")?)?;
				if let Some(handler) = node.node("handler") {
					self.space();
					self.mark(handler);
					self.emit("catch");
					self.space();
					self.emit("(");
					self.expression(child(handler, "param")?, precedence::SEQUENCE)?;
					self.emit(")");
					self.space();
					self.block(child(handler, "body")?)?;
				}
				if let Some(finalizer) = node.node("finalizer") {
					self.space();
					self.emit("finally");
					self.space();
					self.block(finalizer)?;
				}
			}
			NodeKind::SwitchStatement => {
				self.emit("switch");
				self.space();
				self.emit("(");
				self.expression(child(node, "discriminant")?, precedence::SEQUENCE)?;
				self.emit(")");
				self.space();
				self.emit("{");
				self.depth += 1;
				for case in children(node, "cases")? {
					self.newline();
					self.mark(case);
					if let Some(test) = case.node("test") {
						self.emit("case");
						self.space();
						self.expression(test, precedence::SEQUENCE)?;
						self.emit(":");
					} else {
						self.emit("default:");
					}
					self.depth += 1;
					for statement in children(case, "consequent")? {
						self.newline();
						self.statement(statement)?;
					}
					self.depth -= 1;
				}
				self.depth -= 1;
				self.newline();
				self.emit("}");
			}
			// A bare expression, as produced by the json tech.
			_ if is_expression(&node.kind) => self.expression(node, precedence::SEQUENCE)?,
			kind => {
				return Err(WeldError::Generate {
					description: format!("unknown statement type `{kind}`"),
				});
			}
		}

		Ok(())
	}

	/// The body of `if`, `for`, `while` and `do`.
	fn substatement(&mut self, node: &Node) -> WeldResult<()> {
		match node.kind {
			NodeKind::BlockStatement => {
				self.space();
				self.block(node)
			}
			NodeKind::EmptyStatement => {
				self.mark(node);
				self.emit(";");
				Ok(())
			}
			_ => {
				self.depth += 1;
				self.newline();
				let result = self.statement(node);
				self.depth -= 1;
				result
			}
		}
	}

	fn block(&mut self, node: &Node) -> WeldResult<()> {
		self.mark(node);
		self.emit("{");
		let body = children(node, "body")?;
		if body.is_empty() {
			self.emit("}");
			return Ok(());
		}

		self.depth += 1;
		for statement in body {
			self.newline();
			self.statement(statement)?;
		}
		self.depth -= 1;
		self.newline();
		self.emit("}");
		Ok(())
	}

	/// The initialiser of a `for` or the left side of a `for-in`, where a bare
	/// `in` would end the clause.
	fn for_left(&mut self, node: &Node) -> WeldResult<()> {
		let saved = self.allow_in;
		self.allow_in = false;
		let result = if node.kind == NodeKind::VariableDeclaration {
			self.mark(node);
			self.variable_declaration(node)
		} else {
			self.expression(node, precedence::SEQUENCE)
		};
		self.allow_in = saved;
		result
	}

	fn variable_declaration(&mut self, node: &Node) -> WeldResult<()> {
		self.emit(node.str("kind").unwrap_or("var"));
		for (index, declarator) in children(node, "declarations")?.iter().enumerate() {
			if index > 0 {
				self.emit(",");
			}
			self.space();
			self.mark(declarator);
			self.expression(child(declarator, "id")?, precedence::ASSIGNMENT)?;
			if let Some(init) = declarator.node("init") {
				self.space();
				self.emit("=");
				self.space();
				self.expression(init, precedence::ASSIGNMENT)?;
			}
		}
		Ok(())
	}

	fn function(&mut self, node: &Node) -> WeldResult<()> {
		self.emit("function");
		if let Some(id) = node.node("id") {
			self.space();
			self.expression(id, precedence::PRIMARY)?;
		} else {
			self.space();
		}

		self.function_rest(node)
	}

	/// Parameters and body, shared by functions and property accessors.
	fn function_rest(&mut self, node: &Node) -> WeldResult<()> {
		self.emit("(");
		for (index, param) in children(node, "params")?.iter().enumerate() {
			if index > 0 {
				self.emit(",");
				self.space();
			}
			self.expression(param, precedence::ASSIGNMENT)?;
		}
		self.emit(")");
		self.space();

		let saved = self.allow_in;
		self.allow_in = true;
		let result = self.block(child(node, "body")?);
		self.allow_in = saved;
		result
	}

	fn list(&mut self, nodes: &[Node]) -> WeldResult<()> {
		for (index, node) in nodes.iter().enumerate() {
			if index > 0 {
				self.emit(",");
				self.space();
			}
			self.expression(node, precedence::ASSIGNMENT)?;
		}
		Ok(())
	}

	fn expression(&mut self, node: &Node, required: u8) -> WeldResult<()> {
		let is_in = node.kind == NodeKind::BinaryExpression && node.str("operator") == Some("in");
		let wrap = expression_precedence(node) < required || (is_in && !self.allow_in);

		let saved = self.allow_in;
		if wrap {
			self.emit("(");
			self.allow_in = true;
		}
		self.mark(node);

		let result = self.expression_body(node);

		self.allow_in = saved;
		if wrap {
			self.emit(")");
		}
		result
	}

	fn expression_body(&mut self, node: &Node) -> WeldResult<()> {
		match &node.kind {
			NodeKind::SequenceExpression => {
				for (index, expression) in children(node, "expressions")?.iter().enumerate() {
					if index > 0 {
						self.emit(",");
						self.space();
					}
					self.expression(expression, precedence::ASSIGNMENT)?;
				}
			}
			NodeKind::AssignmentExpression => {
				self.expression(child(node, "left")?, precedence::CALL)?;
				self.space();
				self.emit(node.str("operator").unwrap_or("="));
				self.space();
				self.expression(child(node, "right")?, precedence::ASSIGNMENT)?;
			}
			NodeKind::ConditionalExpression => {
				self.expression(child(node, "test")?, precedence::LOGICAL_OR)?;
				self.space();
				self.emit("?");
				self.space();
				self.expression(child(node, "consequent")?, precedence::ASSIGNMENT)?;
				self.space();
				self.emit(":");
				self.space();
				self.expression(child(node, "alternate")?, precedence::ASSIGNMENT)?;
			}
			NodeKind::LogicalExpression | NodeKind::BinaryExpression => {
				let operator = node.str("operator").ok_or_else(|| missing(node, "operator"))?;
				let precedence = binary_precedence(operator);
				self.expression(child(node, "left")?, precedence)?;
				self.space();
				self.emit(operator);
				self.space();
				self.expression(child(node, "right")?, precedence + 1)?;
			}
			NodeKind::UnaryExpression => {
				let operator = node.str("operator").ok_or_else(|| missing(node, "operator"))?;
				self.emit(operator);
				self.expression(child(node, "argument")?, precedence::UNARY)?;
			}
			NodeKind::UpdateExpression => {
				let operator = node.str("operator").ok_or_else(|| missing(node, "operator"))?;
				if node.bool("prefix") {
					self.emit(operator);
					self.expression(child(node, "argument")?, precedence::UNARY)?;
				} else {
					self.expression(child(node, "argument")?, precedence::CALL)?;
					self.emit(operator);
				}
			}
			NodeKind::CallExpression => {
				self.expression(child(node, "callee")?, precedence::CALL)?;
				self.emit("(");
				self.list(children(node, "arguments")?)?;
				self.emit(")");
			}
			NodeKind::NewExpression => {
				self.emit("new");
				let callee = child(node, "callee")?;
				if has_call(callee) {
					self.emit("(");
					self.expression(callee, precedence::SEQUENCE)?;
					self.emit(")");
				} else {
					self.expression(callee, precedence::NEW)?;
				}
				self.emit("(");
				self.list(children(node, "arguments")?)?;
				self.emit(")");
			}
			NodeKind::MemberExpression => {
				let object = child(node, "object")?;
				let property = child(node, "property")?;
				let computed = node.bool("computed");

				if !computed && is_number_literal(object) {
					// `1.toString` would read as a malformed number.
					self.emit("(");
					self.expression(object, precedence::SEQUENCE)?;
					self.emit(")");
				} else {
					self.expression(object, precedence::CALL)?;
				}

				if computed {
					self.emit("[");
					self.expression(property, precedence::SEQUENCE)?;
					self.emit("]");
				} else {
					self.emit(".");
					self.expression(property, precedence::PRIMARY)?;
				}
			}
			NodeKind::FunctionExpression => self.function(node)?,
			NodeKind::ArrayExpression => {
				let elements = children(node, "elements")?;
				self.emit("[");
				for (index, element) in elements.iter().enumerate() {
					let is_hole = element.kind == NodeKind::Elision;
					if index > 0 {
						self.emit(",");
						if !is_hole {
							self.space();
						}
					}
					if !is_hole {
						self.expression(element, precedence::ASSIGNMENT)?;
					}
				}
				// `[1,,]` has two elements, the last one a hole.
				if elements.last().is_some_and(|element| element.kind == NodeKind::Elision) {
					self.emit(",");
				}
				self.emit("]");
			}
			NodeKind::ObjectExpression => {
				let properties = children(node, "properties")?;
				self.emit("{");
				if properties.is_empty() {
					self.emit("}");
					return Ok(());
				}

				self.depth += 1;
				for (index, property) in properties.iter().enumerate() {
					if index > 0 {
						self.emit(",");
					}
					self.newline();
					self.property(property)?;
				}
				self.depth -= 1;
				self.newline();
				self.emit("}");
			}
			NodeKind::Identifier => {
				let name = node.str("name").ok_or_else(|| missing(node, "name"))?;
				self.emit(name);
			}
			NodeKind::Literal => self.literal(node)?,
			NodeKind::ThisExpression => self.emit("this"),
			kind => {
				return Err(WeldError::Generate {
					description: format!("unknown expression type `{kind}`"),
				});
			}
		}

		Ok(())
	}

	fn property(&mut self, node: &Node) -> WeldResult<()> {
		self.mark(node);
		let key = child(node, "key")?;
		let kind = node.str("kind").unwrap_or("init");

		if matches!(kind, "get" | "set") {
			self.emit(kind);
			self.expression(key, precedence::PRIMARY)?;
			return self.function_rest(child(node, "value")?);
		}

		match key.kind {
			NodeKind::Identifier | NodeKind::Literal => self.expression(key, precedence::PRIMARY)?,
			_ => {
				self.emit("[");
				self.expression(key, precedence::ASSIGNMENT)?;
				self.emit("]");
			}
		}
		self.emit(":");
		self.space();
		self.expression(child(node, "value")?, precedence::ASSIGNMENT)
	}

	fn literal(&mut self, node: &Node) -> WeldResult<()> {
		if let Some(regex) = node.data("regex") {
			let pattern = regex.get("pattern").and_then(Json::as_str).unwrap_or_default();
			let flags = regex.get("flags").and_then(Json::as_str).unwrap_or_default();
			self.emit(&format!("/{pattern}/{flags}"));
			return Ok(());
		}

		match node.data("value") {
			Some(Json::String(value)) => {
				let quoted = quote(value, self.pretty);
				self.emit(&quoted);
			}
			Some(Json::Number(number)) => {
				let value = number.as_f64().ok_or_else(|| missing(node, "value"))?;
				let text = format_number(value)?;
				self.emit(&text);
			}
			Some(Json::Bool(value)) => self.emit(if *value { "true" } else { "false" }),
			Some(Json::Null) | None => self.emit("null"),
			Some(other) => {
				return Err(WeldError::Generate {
					description: format!("unsupported literal value `{other}`"),
				});
			}
		}
		Ok(())
	}
}

fn is_expression(kind: &NodeKind) -> bool {
	matches!(
		kind,
		NodeKind::Identifier
			| NodeKind::Literal
			| NodeKind::ThisExpression
			| NodeKind::ArrayExpression
			| NodeKind::ObjectExpression
			| NodeKind::FunctionExpression
			| NodeKind::UnaryExpression
			| NodeKind::UpdateExpression
			| NodeKind::BinaryExpression
			| NodeKind::LogicalExpression
			| NodeKind::AssignmentExpression
			| NodeKind::ConditionalExpression
			| NodeKind::CallExpression
			| NodeKind::NewExpression
			| NodeKind::MemberExpression
			| NodeKind::SequenceExpression
	)
}
