use logos::Lexer;
use logos::Logos;

use super::parser::is_reserved;
use crate::Comment;
use crate::CommentKind;
use crate::LineTable;
use crate::Span;
use crate::WeldError;
use crate::WeldResult;

/// Raw tokens produced by logos. Comments and line breaks are tokens here and
/// are split off by [`tokenize`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\x0B\x0C\u{A0}\u{FEFF}]+")]
enum RawToken {
	#[regex(r"\r\n|\n|\r|\u{2028}|\u{2029}")]
	Newline,
	#[token("/*", block_comment)]
	BlockComment,
	#[regex(r"//[^\r\n\u{2028}\u{2029}]*")]
	LineComment,
	#[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
	Word,
	#[regex(r"0[xX][0-9a-fA-F]+")]
	#[regex(r"([0-9]+\.?[0-9]*|\.[0-9]+)([eE][+-]?[0-9]+)?")]
	Number,
	#[token("\"", |lex| string_body(lex, '"'))]
	#[token("'", |lex| string_body(lex, '\''))]
	String,
	#[regex(r">>>=|===|!==|>>>|<<=|>>=|&&|\|\||==|!=|<=|>=|\+\+|--|\+=|-=|\*=|/=|%=|&=|\|=|\^=|<<|>>")]
	#[regex(r"[{}()\[\];,<>+\-*/%&|^!~?:=.]")]
	Punct,
}

fn block_comment(lex: &mut Lexer<'_, RawToken>) -> bool {
	let Some(end) = lex.remainder().find("*/") else {
		return false;
	};
	lex.bump(end + 2);
	true
}

fn string_body(lex: &mut Lexer<'_, RawToken>, quote: char) -> bool {
	let mut chars = lex.remainder().char_indices();
	while let Some((index, ch)) = chars.next() {
		match ch {
			'\\' => {
				// Line continuations and escaped quotes are both a single char.
				chars.next();
			}
			'\n' | '\r' => return false,
			ch if ch == quote => {
				lex.bump(index + 1);
				return true;
			}
			_ => {}
		}
	}
	false
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TokenKind {
	Word,
	Number,
	String,
	Regex,
	Punct,
	Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token<'a> {
	pub kind: TokenKind,
	pub text: &'a str,
	pub span: Span,
	/// A line terminator separates this token from the previous one. Drives
	/// automatic semicolon insertion.
	pub newline_before: bool,
}

impl Token<'_> {
	pub fn is(&self, punct: &str) -> bool {
		matches!(self.kind, TokenKind::Punct | TokenKind::Word) && self.text == punct
	}
}

/// Words after which a `/` still divides.
const OPERAND_WORDS: &[&str] = &["this", "null", "true", "false"];

/// Whether a `/` after `previous` starts a regular expression rather than a
/// division.
fn regex_allowed(previous: Option<&Token<'_>>) -> bool {
	let Some(previous) = previous else {
		return true;
	};

	match previous.kind {
		TokenKind::Number | TokenKind::String | TokenKind::Regex => false,
		TokenKind::Word => is_reserved(previous.text) && !OPERAND_WORDS.contains(&previous.text),
		TokenKind::Punct => !matches!(previous.text, ")" | "]" | "}" | "++" | "--"),
		TokenKind::Eof => true,
	}
}

/// Byte length of the regular expression literal at the start of `text`,
/// flags included. `None` when it is not terminated on its line.
fn regex_length(text: &str) -> Option<usize> {
	let mut chars = text.char_indices().skip(1);
	let mut in_class = false;

	let body_end = loop {
		let (index, ch) = chars.next()?;
		match ch {
			'\\' => {
				let (_, escaped) = chars.next()?;
				if matches!(escaped, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
					return None;
				}
			}
			'\n' | '\r' | '\u{2028}' | '\u{2029}' => return None,
			'[' => in_class = true,
			']' => in_class = false,
			'/' if !in_class => break index + 1,
			_ => {}
		}
	};

	let flags = text[body_end..]
		.find(|ch: char| !(ch.is_alphanumeric() || ch == '_' || ch == '$'))
		.unwrap_or(text.len() - body_end);

	Some(body_end + flags)
}

pub(crate) struct Tokens<'a> {
	pub tokens: Vec<Token<'a>>,
	pub comments: Vec<Comment>,
}

/// Split `source` into significant tokens and comments. The token list always
/// ends with an [`TokenKind::Eof`] token.
pub(crate) fn tokenize<'a>(
	source: &'a str,
	lines: &LineTable<'_>,
	source_path: Option<&str>,
) -> WeldResult<Tokens<'a>> {
	let mut tokens = vec![];
	let mut comments = vec![];
	let mut newline_before = false;

	let error = |index: usize, description: &str| {
		let point = lines.point(index);
		WeldError::Parse {
			file: source_path.map(ToString::to_string),
			index,
			line: point.line,
			column: point.column + 1,
			description: description.to_string(),
		}
	};

	let mut lexer = RawToken::lexer(source);
	while let Some(result) = lexer.next() {
		let range = lexer.span();
		let mut span = Span(range.start, range.end);
		let mut text = &source[range];

		let Ok(raw) = result else {
			let description = match text.chars().next() {
				Some('"' | '\'') => "Unterminated string",
				Some('/') => "Unterminated comment",
				_ => "Unexpected token ILLEGAL",
			};
			return Err(error(span.start(), description));
		};

		// `/` in operand position starts a regular expression, which logos
		// can't tell apart from a division.
		let is_regex =
			raw == RawToken::Punct && matches!(text, "/" | "/=") && regex_allowed(tokens.last());
		if is_regex {
			let length = regex_length(&source[span.start()..])
				.ok_or_else(|| error(span.start(), "Invalid regular expression: missing /"))?;
			lexer.bump(span.start() + length - span.end());
			span = Span(span.start(), span.start() + length);
			text = &source[span.start()..span.end()];
		}

		let kind = match raw {
			_ if is_regex => TokenKind::Regex,
			RawToken::Newline => {
				newline_before = true;
				continue;
			}
			RawToken::BlockComment => {
				if text.contains(['\n', '\r']) {
					newline_before = true;
				}
				comments.push(Comment {
					kind: CommentKind::Block,
					value: text[2..text.len() - 2].to_string(),
					range: Some(span),
					loc: Some(lines.location(span, source_path)),
				});
				continue;
			}
			RawToken::LineComment => {
				comments.push(Comment {
					kind: CommentKind::Line,
					value: text[2..].to_string(),
					range: Some(span),
					loc: Some(lines.location(span, source_path)),
				});
				continue;
			}
			RawToken::Word => TokenKind::Word,
			RawToken::Number => TokenKind::Number,
			RawToken::String => TokenKind::String,
			RawToken::Punct => TokenKind::Punct,
		};

		tokens.push(Token {
			kind,
			text,
			span,
			newline_before,
		});
		newline_before = false;
	}

	tokens.push(Token {
		kind: TokenKind::Eof,
		text: "",
		span: Span(source.len(), source.len()),
		newline_before,
	});

	Ok(Tokens { tokens, comments })
}

/// Decode the body of a quoted string token.
pub(crate) fn unquote(raw: &str) -> Option<String> {
	let body = raw.get(1..raw.len().checked_sub(1)?)?;
	let mut value = String::with_capacity(body.len());
	let mut chars = body.chars().peekable();

	while let Some(ch) = chars.next() {
		if ch != '\\' {
			value.push(ch);
			continue;
		}

		match chars.next()? {
			'n' => value.push('\n'),
			't' => value.push('\t'),
			'r' => value.push('\r'),
			'b' => value.push('\u{8}'),
			'f' => value.push('\u{c}'),
			'v' => value.push('\u{b}'),
			'0' if !chars.peek().is_some_and(char::is_ascii_digit) => value.push('\0'),
			'x' => {
				let hex: String = [chars.next()?, chars.next()?].iter().collect();
				value.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
			}
			'u' => {
				let hex: String = (0..4).map(|_| chars.next()).collect::<Option<_>>()?;
				let code = u32::from_str_radix(&hex, 16).ok()?;
				value.push(decode_utf16_escape(code, &mut chars)?);
			}
			// Line continuation.
			'\r' => {
				if chars.peek() == Some(&'\n') {
					chars.next();
				}
			}
			'\n' | '\u{2028}' | '\u{2029}' => {}
			other => value.push(other),
		}
	}

	Some(value)
}

/// Combine a `\uD8xx\uDCxx` surrogate pair into one char.
fn decode_utf16_escape(
	code: u32,
	chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Option<char> {
	if !(0xD800..0xDC00).contains(&code) {
		return Some(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
	}

	let mut lookahead = chars.clone();
	if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
		let hex: String = (0..4).map(|_| lookahead.next()).collect::<Option<_>>()?;
		let low = u32::from_str_radix(&hex, 16).ok()?;
		if (0xDC00..0xE000).contains(&low) {
			*chars = lookahead;
			return char::from_u32(0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
		}
	}

	Some(char::REPLACEMENT_CHARACTER)
}

/// The numeric value of a number token.
pub(crate) fn number_value(raw: &str) -> Option<f64> {
	if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
		return u64::from_str_radix(hex, 16).ok().map(|value| value as f64);
	}
	raw.parse().ok()
}
