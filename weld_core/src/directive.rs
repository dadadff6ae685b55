use regex::Regex;

use crate::Comment;
use crate::CommentKind;
use crate::Node;
use crate::Point;
use crate::Span;
use crate::WeldError;
use crate::WeldResult;
use crate::tech::TXT_TECH;

/// Marker used when none is configured: `/* borschik:include:path */`.
pub const DEFAULT_MARKER: &str = "borschik";

/// Matches the text of an inclusion directive, `<marker>:include:<path>`,
/// surrounded by optional whitespace.
#[derive(Debug, Clone)]
pub struct DirectivePattern {
	marker: String,
	regex: Regex,
}

impl DirectivePattern {
	pub fn new(marker: &str) -> WeldResult<Self> {
		let source = format!(r"^\s*{}:include:(.*?)\s*$", regex::escape(marker));
		let regex = Regex::new(&source)
			.map_err(|e| WeldError::ConfigParse(format!("invalid marker `{marker}`: {e}")))?;

		Ok(Self {
			marker: marker.to_string(),
			regex,
		})
	}

	pub fn marker(&self) -> &str {
		&self.marker
	}

	/// Extract the include path from `text` if it is a directive.
	pub fn match_path<'a>(&self, text: &'a str) -> Option<&'a str> {
		self.regex
			.captures(text)
			.and_then(|captures| captures.get(1))
			.map(|path| path.as_str())
	}
}

/// An inclusion request found in a comment or a string literal.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
	/// The path as written, relative to the including file.
	pub path: String,
	/// A tech forced by the directive's form. `None` selects the tech from the
	/// file name.
	pub tech: Option<String>,
	/// The comment the directive was read from. It is consumed once the
	/// directive is resolved.
	pub comment: Option<Comment>,
	pub range: Option<Span>,
	pub start: Option<Point>,
}

/// Collect the directives among `comments`, in order. Only block comments
/// count. When `within` is given, comments outside of it (or without a range)
/// are skipped.
pub fn find_directives(
	pattern: &DirectivePattern,
	comments: &[Comment],
	within: Option<Span>,
) -> Vec<Directive> {
	comments
		.iter()
		.filter(|comment| {
			let Some(within) = within else {
				return true;
			};
			comment.range.is_some_and(|range| within.contains(&range))
		})
		.filter(|comment| comment.kind == CommentKind::Block)
		.filter_map(|comment| {
			let path = pattern.match_path(&comment.value)?;
			Some(Directive {
				path: path.to_string(),
				tech: None,
				comment: Some(comment.clone()),
				range: comment.range,
				start: comment.loc.as_ref().map(|loc| loc.start),
			})
		})
		.collect()
}

/// A string literal whose value is a directive, e.g. `'borschik:include:a.txt'`.
/// Its content is always included as plain text.
pub fn literal_directive(pattern: &DirectivePattern, node: &Node) -> Option<Directive> {
	let value = node.string_value()?;
	let path = pattern.match_path(value)?;

	Some(Directive {
		path: path.to_string(),
		tech: Some(TXT_TECH.to_string()),
		comment: None,
		range: node.range,
		start: node.start(),
	})
}
