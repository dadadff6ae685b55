use serde::Deserialize;
use serde::Serialize;

/// A line/column pair in ESTree convention: `line` is 1-indexed, `column` is
/// the 0-indexed count of UTF-16 code units from the start of the line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
	pub line: usize,
	pub column: usize,
}

impl Point {
	pub fn new(line: usize, column: usize) -> Self {
		Self { line, column }
	}
}

/// Byte offsets `[start, end)` of a node or comment in its source file.
/// Serialized as a two element array to stay compatible with ESTree tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span(pub usize, pub usize);

impl Span {
	pub fn start(&self) -> usize {
		self.0
	}

	pub fn end(&self) -> usize {
		self.1
	}

	/// Whether `other` lies fully inside this span.
	pub fn contains(&self, other: &Span) -> bool {
		other.0 >= self.0 && other.1 <= self.1
	}
}

/// The `loc` record of a node or comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
	pub start: Point,
	pub end: Point,
	/// The path of the file this node was parsed from. Included content keeps
	/// the path of its own file so diagnostics and source maps point at it.
	#[serde(default)]
	pub source: Option<String>,
}

/// Pre-computed table of line-start byte offsets for offset-to-point
/// conversion. Built once per source in O(n), each lookup is a binary search.
pub struct LineTable<'a> {
	content: &'a str,
	/// Byte offsets of the start of each line. `line_starts[0]` is always 0.
	line_starts: Vec<usize>,
}

impl<'a> LineTable<'a> {
	pub fn new(content: &'a str) -> Self {
		let bytes = content.as_bytes();
		let mut line_starts = vec![0];
		for (i, byte) in bytes.iter().enumerate() {
			match byte {
				b'\n' => line_starts.push(i + 1),
				// A lone `\r` also terminates a line.
				b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push(i + 1),
				_ => {}
			}
		}
		Self {
			content,
			line_starts,
		}
	}

	/// Convert a byte offset into a [`Point`].
	pub fn point(&self, offset: usize) -> Point {
		let line_idx = match self.line_starts.binary_search(&offset) {
			Ok(exact) => exact,
			Err(insert) => insert.saturating_sub(1),
		};

		let line_start = self.line_starts[line_idx];
		let column = self
			.content
			.get(line_start..offset)
			.map_or(offset - line_start, |text| text.encode_utf16().count());

		Point {
			line: line_idx + 1,
			column,
		}
	}

	pub fn location(&self, span: Span, source: Option<&str>) -> SourceLocation {
		SourceLocation {
			start: self.point(span.0),
			end: self.point(span.1),
			source: source.map(ToString::to_string),
		}
	}

	pub fn line_count(&self) -> usize {
		self.line_starts.len()
	}
}
