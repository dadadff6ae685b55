use serde_json::Map;
use serde_json::Number;
use serde_json::Value as Json;
use serde_json::json;

use super::lexer::Token;
use super::lexer::TokenKind;
use super::lexer::number_value;
use super::lexer::unquote;
use crate::LineTable;
use crate::Node;
use crate::NodeKind;
use crate::Span;
use crate::WeldError;
use crate::WeldResult;

const RESERVED_WORDS: &[&str] = &[
	"break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
	"else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
	"instanceof", "let", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
	"typeof", "var", "void", "while", "with",
];

const ASSIGNMENT_OPERATORS: &[&str] = &[
	"=", "+=", "-=", "*=", "/=", "%=", "<<=", ">>=", ">>>=", "&=", "|=", "^=",
];

pub(crate) fn is_reserved(word: &str) -> bool {
	RESERVED_WORDS.contains(&word)
}

/// Binding power of a binary operator. Higher binds tighter.
fn binary_precedence(operator: &str, allow_in: bool) -> Option<u8> {
	let precedence = match operator {
		"||" => 1,
		"&&" => 2,
		"|" => 3,
		"^" => 4,
		"&" => 5,
		"==" | "!=" | "===" | "!==" => 6,
		"in" if allow_in => 7,
		"<" | ">" | "<=" | ">=" | "instanceof" => 7,
		"<<" | ">>" | ">>>" => 8,
		"+" | "-" => 9,
		"*" | "/" | "%" => 10,
		_ => return None,
	};
	Some(precedence)
}

/// The JSON value of a number literal. Whole numbers stay integers.
fn number_json(value: f64) -> Json {
	if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
		return Json::from(value as i64);
	}
	Number::from_f64(value).map_or(Json::Null, Json::Number)
}

/// Recursive descent parser over the token list produced by the lexer.
pub(crate) struct Parser<'a> {
	tokens: Vec<Token<'a>>,
	position: usize,
	lines: &'a LineTable<'a>,
	source_path: Option<&'a str>,
	/// End offset of the last consumed token.
	last_end: usize,
	/// Whether `in` is a binary operator here. Off in `for` initialisers.
	allow_in: bool,
	/// Inside a function body, where `return` is allowed.
	in_function: bool,
	/// Labels of the enclosing labelled statements, reset at function
	/// boundaries.
	labels: Vec<&'a str>,
}

impl<'a> Parser<'a> {
	pub fn new(tokens: Vec<Token<'a>>, lines: &'a LineTable<'a>, source_path: Option<&'a str>) -> Self {
		Self {
			tokens,
			position: 0,
			lines,
			source_path,
			last_end: 0,
			allow_in: true,
			in_function: false,
			labels: vec![],
		}
	}

	/// The statements of a whole file.
	pub fn program(&mut self) -> WeldResult<Vec<Node>> {
		let mut body = vec![];
		while self.peek().kind != TokenKind::Eof {
			body.push(self.statement()?);
		}
		Ok(body)
	}

	/// A file holding exactly one expression.
	pub fn expression_document(&mut self) -> WeldResult<Node> {
		let expression = self.expression()?;
		let token = self.peek();
		if token.kind != TokenKind::Eof {
			return Err(self.unexpected(token));
		}
		Ok(expression)
	}

	fn peek(&self) -> Token<'a> {
		self.peek_at(0)
	}

	fn peek_at(&self, offset: usize) -> Token<'a> {
		let index = (self.position + offset).min(self.tokens.len().saturating_sub(1));
		self.tokens[index]
	}

	fn next(&mut self) -> Token<'a> {
		let token = self.peek();
		if token.kind != TokenKind::Eof {
			self.position += 1;
			self.last_end = token.span.end();
		}
		token
	}

	fn eat(&mut self, punct: &str) -> bool {
		if self.peek().is(punct) {
			self.next();
			true
		} else {
			false
		}
	}

	fn expect(&mut self, punct: &str) -> WeldResult<Token<'a>> {
		let token = self.peek();
		if token.is(punct) {
			Ok(self.next())
		} else {
			Err(self.unexpected(token))
		}
	}

	fn error_at(&self, index: usize, description: impl Into<String>) -> WeldError {
		let point = self.lines.point(index);
		WeldError::Parse {
			file: self.source_path.map(ToString::to_string),
			index,
			line: point.line,
			column: point.column + 1,
			description: description.into(),
		}
	}

	fn unexpected(&self, token: Token<'_>) -> WeldError {
		let description = match token.kind {
			TokenKind::Eof => "Unexpected end of input".to_string(),
			TokenKind::Number => "Unexpected number".to_string(),
			TokenKind::String => "Unexpected string".to_string(),
			TokenKind::Regex => format!("Unexpected regular expression {}", token.text),
			TokenKind::Word if !is_reserved(token.text) => "Unexpected identifier".to_string(),
			TokenKind::Word | TokenKind::Punct => format!("Unexpected token {}", token.text),
		};
		self.error_at(token.span.start(), description)
	}

	/// Give `node` the range from `start` to the end of the last consumed
	/// token.
	fn finish(&self, mut node: Node, start: usize) -> Node {
		let span = Span(start, self.last_end);
		node.range = Some(span);
		node.loc = Some(self.lines.location(span, self.source_path));
		node
	}

	fn with_in<T>(&mut self, allow: bool, parse: impl FnOnce(&mut Self) -> WeldResult<T>) -> WeldResult<T> {
		let saved = self.allow_in;
		self.allow_in = allow;
		let result = parse(self);
		self.allow_in = saved;
		result
	}

	/// Automatic semicolon insertion: a missing `;` is fine before `}`, at the
	/// end of input or after a line break.
	fn consume_semicolon(&mut self) -> WeldResult<()> {
		let token = self.peek();
		if token.is(";") {
			self.next();
			return Ok(());
		}
		if token.is("}") || token.kind == TokenKind::Eof || token.newline_before {
			return Ok(());
		}
		Err(self.unexpected(token))
	}

	fn statement(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		let start = token.span.start();

		if token.kind == TokenKind::Punct {
			match token.text {
				"{" => return self.block(),
				";" => {
					self.next();
					return Ok(self.finish(Node::new(NodeKind::EmptyStatement), start));
				}
				_ => {}
			}
		}

		if token.kind == TokenKind::Word {
			match token.text {
				"var" | "let" | "const" => {
					let declaration = self.variable_declaration()?;
					self.consume_semicolon()?;
					return Ok(self.finish(declaration, start));
				}
				"function" => return self.function(NodeKind::FunctionDeclaration),
				"if" => return self.if_statement(),
				"for" => return self.for_statement(),
				"while" => return self.while_statement(),
				"do" => return self.do_while_statement(),
				"return" if !self.in_function => {
					return Err(self.error_at(start, "Illegal return statement"));
				}
				"return" => return self.argument_statement(NodeKind::ReturnStatement, true),
				"throw" => return self.argument_statement(NodeKind::ThrowStatement, false),
				"break" => return self.jump_statement(NodeKind::BreakStatement),
				"continue" => return self.jump_statement(NodeKind::ContinueStatement),
				"try" => return self.try_statement(),
				"switch" => return self.switch_statement(),
				"with" => return self.with_statement(),
				"debugger" => {
					self.next();
					self.consume_semicolon()?;
					return Ok(self.finish(Node::new(NodeKind::DebuggerStatement), start));
				}
				word if !is_reserved(word) && self.peek_at(1).is(":") => {
					return self.labeled_statement();
				}
				_ => {}
			}
		}

		let expression = self.expression()?;
		self.consume_semicolon()?;
		Ok(self.finish(
			Node::new(NodeKind::ExpressionStatement).with("expression", expression),
			start,
		))
	}

	fn block(&mut self) -> WeldResult<Node> {
		let start = self.expect("{")?.span.start();
		let mut body = vec![];
		while !self.peek().is("}") {
			if self.peek().kind == TokenKind::Eof {
				return Err(self.unexpected(self.peek()));
			}
			body.push(self.statement()?);
		}
		self.next();
		Ok(self.finish(Node::new(NodeKind::BlockStatement).with("body", body), start))
	}

	/// `var a = 1, b` without the trailing semicolon.
	fn variable_declaration(&mut self) -> WeldResult<Node> {
		let keyword = self.next();
		let start = keyword.span.start();
		let mut declarations = vec![];

		loop {
			let declarator_start = self.peek().span.start();
			let id = self.identifier()?;
			let init = if self.eat("=") {
				Some(self.assignment()?)
			} else {
				None
			};
			declarations.push(self.finish(
				Node::new(NodeKind::VariableDeclarator)
					.with("id", id)
					.with("init", init),
				declarator_start,
			));

			if !self.eat(",") {
				break;
			}
		}

		Ok(self.finish(
			Node::new(NodeKind::VariableDeclaration)
				.with("declarations", declarations)
				.with("kind", keyword.text),
			start,
		))
	}

	fn function(&mut self, kind: NodeKind) -> WeldResult<Node> {
		let start = self.expect("function")?.span.start();
		let id = if self.peek().is("(") && kind == NodeKind::FunctionExpression {
			None
		} else {
			Some(self.identifier()?)
		};

		self.function_rest(kind, id, start)
	}

	/// Parameters and body of a function whose `function` keyword and name
	/// (if any) were already consumed.
	fn function_rest(&mut self, kind: NodeKind, id: Option<Node>, start: usize) -> WeldResult<Node> {
		self.expect("(")?;
		let mut params = vec![];
		while !self.peek().is(")") {
			params.push(self.identifier()?);
			if !self.peek().is(")") {
				self.expect(",")?;
			}
		}
		self.next();

		let in_function = std::mem::replace(&mut self.in_function, true);
		let labels = std::mem::take(&mut self.labels);
		let body = self.with_in(true, Self::block);
		self.in_function = in_function;
		self.labels = labels;
		let body = body?;

		Ok(self.finish(
			Node::new(kind)
				.with("id", id)
				.with("params", params)
				.with("body", body),
			start,
		))
	}

	fn parenthesized(&mut self) -> WeldResult<Node> {
		self.expect("(")?;
		let expression = self.with_in(true, Self::expression)?;
		self.expect(")")?;
		Ok(expression)
	}

	fn if_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let test = self.parenthesized()?;
		let consequent = self.statement()?;
		let alternate = if self.eat("else") {
			Some(self.statement()?)
		} else {
			None
		};

		Ok(self.finish(
			Node::new(NodeKind::IfStatement)
				.with("test", test)
				.with("consequent", consequent)
				.with("alternate", alternate),
			start,
		))
	}

	fn for_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		self.expect("(")?;

		let init = if self.peek().is(";") {
			None
		} else if matches!(self.peek().text, "var" | "let" | "const") {
			Some(self.with_in(false, Self::variable_declaration)?)
		} else {
			Some(self.with_in(false, Self::expression)?)
		};

		if let Some(left) = init.as_ref().filter(|_| self.peek().is("in")) {
			let single_declaration = left
				.nodes("declarations")
				.is_none_or(|declarations| declarations.len() == 1);
			let assignable = matches!(
				left.kind,
				NodeKind::VariableDeclaration | NodeKind::Identifier | NodeKind::MemberExpression
			);
			if !single_declaration || !assignable {
				return Err(self.error_at(self.peek().span.start(), "Invalid left-hand side in for-in"));
			}

			self.next();
			let right = self.with_in(true, Self::expression)?;
			self.expect(")")?;
			let body = self.statement()?;

			return Ok(self.finish(
				Node::new(NodeKind::ForInStatement)
					.with("left", init)
					.with("right", right)
					.with("body", body)
					.with("each", false),
				start,
			));
		}

		self.expect(";")?;
		let test = if self.peek().is(";") {
			None
		} else {
			Some(self.with_in(true, Self::expression)?)
		};
		self.expect(";")?;
		let update = if self.peek().is(")") {
			None
		} else {
			Some(self.with_in(true, Self::expression)?)
		};
		self.expect(")")?;
		let body = self.statement()?;

		Ok(self.finish(
			Node::new(NodeKind::ForStatement)
				.with("init", init)
				.with("test", test)
				.with("update", update)
				.with("body", body),
			start,
		))
	}

	fn while_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let test = self.parenthesized()?;
		let body = self.statement()?;

		Ok(self.finish(
			Node::new(NodeKind::WhileStatement)
				.with("test", test)
				.with("body", body),
			start,
		))
	}

	fn do_while_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let body = self.statement()?;
		self.expect("while")?;
		let test = self.parenthesized()?;
		self.eat(";");

		Ok(self.finish(
			Node::new(NodeKind::DoWhileStatement)
				.with("body", body)
				.with("test", test),
			start,
		))
	}

	/// `return` and `throw`. Only `return` may omit its argument.
	fn argument_statement(&mut self, kind: NodeKind, optional: bool) -> WeldResult<Node> {
		let start = self.next().span.start();
		let token = self.peek();
		let ends_here =
			token.is(";") || token.is("}") || token.kind == TokenKind::Eof || token.newline_before;

		let argument = if ends_here && optional {
			None
		} else if ends_here {
			return Err(self.error_at(token.span.start(), "Illegal newline after throw"));
		} else {
			Some(self.expression()?)
		};
		self.consume_semicolon()?;

		Ok(self.finish(Node::new(kind).with("argument", argument), start))
	}

	/// `break` and `continue`, with an optional label on the same line.
	fn jump_statement(&mut self, kind: NodeKind) -> WeldResult<Node> {
		let start = self.next().span.start();
		let token = self.peek();

		let label = if token.kind == TokenKind::Word && !token.newline_before && !is_reserved(token.text) {
			if !self.labels.contains(&token.text) {
				return Err(self.error_at(token.span.start(), format!("Undefined label '{}'", token.text)));
			}
			Some(self.identifier()?)
		} else {
			None
		};
		self.consume_semicolon()?;

		Ok(self.finish(Node::new(kind).with("label", label), start))
	}

	fn labeled_statement(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		let start = token.span.start();
		if self.labels.contains(&token.text) {
			return Err(self.error_at(start, format!("Label '{}' has already been declared", token.text)));
		}

		let label = self.identifier()?;
		self.expect(":")?;

		self.labels.push(token.text);
		let body = self.statement();
		self.labels.pop();

		Ok(self.finish(
			Node::new(NodeKind::LabeledStatement)
				.with("label", label)
				.with("body", body?),
			start,
		))
	}

	fn with_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let object = self.parenthesized()?;
		let body = self.statement()?;

		Ok(self.finish(
			Node::new(NodeKind::WithStatement)
				.with("object", object)
				.with("body", body),
			start,
		))
	}

	fn try_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let block = self.block()?;

		let handler = if self.peek().is("catch") {
			let catch_start = self.next().span.start();
			self.expect("(")?;
			let param = self.identifier()?;
			self.expect(")")?;
			let body = self.block()?;
			Some(self.finish(
				Node::new(NodeKind::CatchClause)
					.with("param", param)
					.with("body", body),
				catch_start,
			))
		} else {
			None
		};

		let finalizer = if self.eat("finally") {
			Some(self.block()?)
		} else {
			None
		};

		if handler.is_none() && finalizer.is_none() {
			return Err(self.error_at(self.peek().span.start(), "Missing catch or finally after try"));
		}

		Ok(self.finish(
			Node::new(NodeKind::TryStatement)
				.with("block", block)
				.with("handler", handler)
				.with("finalizer", finalizer),
			start,
		))
	}

	fn switch_statement(&mut self) -> WeldResult<Node> {
		let start = self.next().span.start();
		let discriminant = self.parenthesized()?;
		self.expect("{")?;

		let mut cases = vec![];
		while !self.eat("}") {
			let case_start = self.peek().span.start();
			let test = if self.eat("default") {
				None
			} else {
				self.expect("case")?;
				Some(self.expression()?)
			};
			self.expect(":")?;

			let mut consequent = vec![];
			loop {
				let token = self.peek();
				if token.is("case") || token.is("default") || token.is("}") {
					break;
				}
				if token.kind == TokenKind::Eof {
					return Err(self.unexpected(token));
				}
				consequent.push(self.statement()?);
			}

			cases.push(self.finish(
				Node::new(NodeKind::SwitchCase)
					.with("test", test)
					.with("consequent", consequent),
				case_start,
			));
		}

		Ok(self.finish(
			Node::new(NodeKind::SwitchStatement)
				.with("discriminant", discriminant)
				.with("cases", cases),
			start,
		))
	}

	fn expression(&mut self) -> WeldResult<Node> {
		let start = self.peek().span.start();
		let first = self.assignment()?;
		if !self.peek().is(",") {
			return Ok(first);
		}

		let mut expressions = vec![first];
		while self.eat(",") {
			expressions.push(self.assignment()?);
		}

		Ok(self.finish(
			Node::new(NodeKind::SequenceExpression).with("expressions", expressions),
			start,
		))
	}

	fn assignment(&mut self) -> WeldResult<Node> {
		let start = self.peek().span.start();
		let left = self.conditional()?;

		let token = self.peek();
		if token.kind != TokenKind::Punct || !ASSIGNMENT_OPERATORS.contains(&token.text) {
			return Ok(left);
		}

		if !matches!(left.kind, NodeKind::Identifier | NodeKind::MemberExpression) {
			return Err(self.error_at(token.span.start(), "Invalid left-hand side in assignment"));
		}

		self.next();
		let right = self.assignment()?;

		Ok(self.finish(
			Node::new(NodeKind::AssignmentExpression)
				.with("operator", token.text)
				.with("left", left)
				.with("right", right),
			start,
		))
	}

	fn conditional(&mut self) -> WeldResult<Node> {
		let start = self.peek().span.start();
		let test = self.binary(1)?;
		if !self.eat("?") {
			return Ok(test);
		}

		let consequent = self.with_in(true, Self::assignment)?;
		self.expect(":")?;
		let alternate = self.assignment()?;

		Ok(self.finish(
			Node::new(NodeKind::ConditionalExpression)
				.with("test", test)
				.with("consequent", consequent)
				.with("alternate", alternate),
			start,
		))
	}

	/// Precedence climbing over left associative binary operators.
	fn binary(&mut self, min_precedence: u8) -> WeldResult<Node> {
		let start = self.peek().span.start();
		let mut left = self.unary()?;

		loop {
			let token = self.peek();
			if !matches!(token.kind, TokenKind::Punct | TokenKind::Word) {
				break;
			}
			let Some(precedence) = binary_precedence(token.text, self.allow_in) else {
				break;
			};
			if precedence < min_precedence {
				break;
			}

			self.next();
			let right = self.binary(precedence + 1)?;
			let kind = if matches!(token.text, "||" | "&&") {
				NodeKind::LogicalExpression
			} else {
				NodeKind::BinaryExpression
			};

			left = self.finish(
				Node::new(kind)
					.with("operator", token.text)
					.with("left", left)
					.with("right", right),
				start,
			);
		}

		Ok(left)
	}

	fn unary(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		let start = token.span.start();

		let is_unary = match token.kind {
			TokenKind::Punct => matches!(token.text, "!" | "~" | "+" | "-"),
			TokenKind::Word => matches!(token.text, "typeof" | "void" | "delete"),
			_ => false,
		};

		if is_unary {
			self.next();
			let argument = self.unary()?;
			return Ok(self.finish(
				Node::new(NodeKind::UnaryExpression)
					.with("operator", token.text)
					.with("argument", argument)
					.with("prefix", true),
				start,
			));
		}

		if token.is("++") || token.is("--") {
			self.next();
			let argument = self.unary()?;
			self.assert_assignable(&argument, start)?;
			return Ok(self.finish(
				Node::new(NodeKind::UpdateExpression)
					.with("operator", token.text)
					.with("argument", argument)
					.with("prefix", true),
				start,
			));
		}

		let expression = self.call_member()?;
		let next = self.peek();
		if (next.is("++") || next.is("--")) && !next.newline_before {
			self.assert_assignable(&expression, next.span.start())?;
			self.next();
			return Ok(self.finish(
				Node::new(NodeKind::UpdateExpression)
					.with("operator", next.text)
					.with("argument", expression)
					.with("prefix", false),
				start,
			));
		}

		Ok(expression)
	}

	fn assert_assignable(&self, node: &Node, index: usize) -> WeldResult<()> {
		if matches!(node.kind, NodeKind::Identifier | NodeKind::MemberExpression) {
			Ok(())
		} else {
			Err(self.error_at(index, "Invalid left-hand side in update expression"))
		}
	}

	fn call_member(&mut self) -> WeldResult<Node> {
		let start = self.peek().span.start();
		let mut expression = if self.peek().is("new") {
			self.new_expression()?
		} else {
			self.primary()?
		};

		loop {
			let token = self.peek();
			if token.is("(") {
				let arguments = self.arguments()?;
				expression = self.finish(
					Node::new(NodeKind::CallExpression)
						.with("callee", expression)
						.with("arguments", arguments),
					start,
				);
			} else if token.is(".") || token.is("[") {
				expression = self.member(expression, start)?;
			} else {
				break;
			}
		}

		Ok(expression)
	}

	/// `.name` or `[expression]` after `object`.
	fn member(&mut self, object: Node, start: usize) -> WeldResult<Node> {
		let (computed, property) = if self.eat(".") {
			(false, self.identifier_name()?)
		} else {
			self.expect("[")?;
			let property = self.with_in(true, Self::expression)?;
			self.expect("]")?;
			(true, property)
		};

		Ok(self.finish(
			Node::new(NodeKind::MemberExpression)
				.with("computed", computed)
				.with("object", object)
				.with("property", property),
			start,
		))
	}

	fn new_expression(&mut self) -> WeldResult<Node> {
		let start = self.expect("new")?.span.start();
		let mut callee = if self.peek().is("new") {
			self.new_expression()?
		} else {
			self.primary()?
		};

		let callee_start = callee.range.map_or(start, |range| range.start());
		while self.peek().is(".") || self.peek().is("[") {
			callee = self.member(callee, callee_start)?;
		}

		let arguments = if self.peek().is("(") {
			self.arguments()?
		} else {
			vec![]
		};

		Ok(self.finish(
			Node::new(NodeKind::NewExpression)
				.with("callee", callee)
				.with("arguments", arguments),
			start,
		))
	}

	fn arguments(&mut self) -> WeldResult<Vec<Node>> {
		self.expect("(")?;
		self.with_in(true, |parser| {
			let mut arguments = vec![];
			while !parser.peek().is(")") {
				arguments.push(parser.assignment()?);
				if !parser.peek().is(")") {
					parser.expect(",")?;
				}
			}
			parser.next();
			Ok(arguments)
		})
	}

	fn primary(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		let start = token.span.start();

		match token.kind {
			TokenKind::Word => {
				match token.text {
					"function" => return self.function(NodeKind::FunctionExpression),
					"this" => {
						self.next();
						return Ok(self.finish(Node::new(NodeKind::ThisExpression), start));
					}
					"null" => {
						self.next();
						return Ok(self.literal(Json::Null, token.text, start));
					}
					"true" | "false" => {
						self.next();
						return Ok(self.literal(Json::Bool(token.text == "true"), token.text, start));
					}
					_ => {}
				}
				self.identifier()
			}
			TokenKind::Number => {
				self.next();
				let value = number_value(token.text)
					.ok_or_else(|| self.error_at(start, "Unexpected token ILLEGAL"))?;
				Ok(self.literal(number_json(value), token.text, start))
			}
			TokenKind::String => {
				self.next();
				let value = unquote(token.text)
					.ok_or_else(|| self.error_at(start, "Invalid escape sequence"))?;
				Ok(self.literal(Json::String(value), token.text, start))
			}
			TokenKind::Regex => {
				self.next();
				Ok(self.regex_literal(token.text, start))
			}
			TokenKind::Punct if token.text == "(" => self.parenthesized(),
			TokenKind::Punct if token.text == "[" => self.array(),
			TokenKind::Punct if token.text == "{" => self.object(),
			_ => Err(self.unexpected(token)),
		}
	}

	fn literal(&self, value: Json, raw: &str, start: usize) -> Node {
		self.finish(
			Node::new(NodeKind::Literal)
				.with("value", value)
				.with("raw", raw),
			start,
		)
	}

	/// `/pattern/flags`, with the pattern and flags split out as ESTree does.
	fn regex_literal(&self, raw: &str, start: usize) -> Node {
		let (pattern, flags) = raw
			.rfind('/')
			.map_or((raw, ""), |end| (raw.get(1..end).unwrap_or_default(), &raw[end + 1..]));
		let regex = json!({ "pattern": pattern, "flags": flags });

		self.finish(
			Node::new(NodeKind::Literal)
				.with("value", Json::Object(Map::new()))
				.with("raw", raw)
				.with("regex", regex),
			start,
		)
	}

	fn array(&mut self) -> WeldResult<Node> {
		let start = self.expect("[")?.span.start();
		let elements = self.with_in(true, |parser| {
			let mut elements = vec![];
			while !parser.peek().is("]") {
				if parser.eat(",") {
					elements.push(Node::new(NodeKind::Elision));
					continue;
				}
				elements.push(parser.assignment()?);
				if !parser.peek().is("]") {
					parser.expect(",")?;
				}
			}
			parser.next();
			Ok(elements)
		})?;

		Ok(self.finish(
			Node::new(NodeKind::ArrayExpression).with("elements", elements),
			start,
		))
	}

	fn object(&mut self) -> WeldResult<Node> {
		let start = self.expect("{")?.span.start();
		let properties = self.with_in(true, |parser| {
			let mut properties = vec![];
			while !parser.peek().is("}") {
				properties.push(parser.property()?);
				if !parser.peek().is("}") {
					parser.expect(",")?;
				}
			}
			parser.next();
			Ok(properties)
		})?;

		Ok(self.finish(
			Node::new(NodeKind::ObjectExpression).with("properties", properties),
			start,
		))
	}

	fn property(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		let start = token.span.start();

		let is_accessor = token.kind == TokenKind::Word
			&& matches!(token.text, "get" | "set")
			&& !self.peek_at(1).is(":");
		let kind = if is_accessor {
			self.next();
			token.text
		} else {
			"init"
		};

		let key = self.property_key()?;
		let value = if is_accessor {
			let function_start = self.peek().span.start();
			self.function_rest(NodeKind::FunctionExpression, None, function_start)?
		} else {
			self.expect(":")?;
			self.assignment()?
		};

		Ok(self.finish(
			Node::new(NodeKind::Property)
				.with("key", key)
				.with("value", value)
				.with("kind", kind),
			start,
		))
	}

	fn property_key(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		match token.kind {
			TokenKind::String | TokenKind::Number => self.primary(),
			TokenKind::Word => self.identifier_name(),
			_ => Err(self.unexpected(token)),
		}
	}

	/// An identifier that is not a reserved word.
	fn identifier(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		if token.kind != TokenKind::Word || is_reserved(token.text) {
			return Err(self.unexpected(token));
		}
		self.identifier_name()
	}

	/// Any word, as allowed after `.` and as an object key.
	fn identifier_name(&mut self) -> WeldResult<Node> {
		let token = self.peek();
		if token.kind != TokenKind::Word {
			return Err(self.unexpected(token));
		}
		self.next();
		Ok(self.finish(
			Node::new(NodeKind::Identifier).with("name", token.text),
			token.span.start(),
		))
	}
}
