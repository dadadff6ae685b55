use indexmap::IndexSet;
use serde_json::json;

const BASE64: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Append `value` to `out` as a base64 VLQ.
fn encode_vlq(value: i64, out: &mut String) {
	let mut rest = if value < 0 {
		((-value) << 1) | 1
	} else {
		value << 1
	};

	loop {
		let mut digit = rest & 0b1_1111;
		rest >>= 5;
		if rest > 0 {
			digit |= 0b10_0000;
		}
		out.push(char::from(BASE64[digit as usize]));
		if rest == 0 {
			break;
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Mapping {
	/// 0-indexed.
	generated_line: usize,
	generated_column: usize,
	source: usize,
	/// 0-indexed.
	original_line: usize,
	original_column: usize,
	name: Option<usize>,
}

/// Collects mappings while code is generated and renders a version 3 source
/// map.
#[derive(Debug, Default)]
pub(crate) struct SourceMapBuilder {
	sources: IndexSet<String>,
	names: IndexSet<String>,
	mappings: Vec<Mapping>,
}

impl SourceMapBuilder {
	/// Map the generated position to `original_line` (1-indexed) and
	/// `original_column` of `source`. A later mapping for the same generated
	/// position replaces the earlier one so the innermost node wins.
	pub fn add(
		&mut self,
		generated: (usize, usize),
		source: &str,
		original_line: usize,
		original_column: usize,
		name: Option<&str>,
	) {
		let (source, _) = self.sources.insert_full(source.to_string());
		let name = name.map(|name| self.names.insert_full(name.to_string()).0);
		let mapping = Mapping {
			generated_line: generated.0,
			generated_column: generated.1,
			source,
			original_line: original_line.saturating_sub(1),
			original_column,
			name,
		};

		match self.mappings.last_mut() {
			Some(last)
				if last.generated_line == mapping.generated_line
					&& last.generated_column == mapping.generated_column =>
			{
				*last = mapping;
			}
			_ => self.mappings.push(mapping),
		}
	}

	fn encode_mappings(&self) -> String {
		let mut out = String::new();
		let mut line = 0;
		let mut previous_column = 0i64;
		let mut previous_source = 0i64;
		let mut previous_original_line = 0i64;
		let mut previous_original_column = 0i64;
		let mut previous_name = 0i64;
		let mut first_in_line = true;

		for mapping in &self.mappings {
			while line < mapping.generated_line {
				out.push(';');
				line += 1;
				previous_column = 0;
				first_in_line = true;
			}
			if !first_in_line {
				out.push(',');
			}
			first_in_line = false;

			let column = mapping.generated_column as i64;
			encode_vlq(column - previous_column, &mut out);
			previous_column = column;

			let source = mapping.source as i64;
			encode_vlq(source - previous_source, &mut out);
			previous_source = source;

			let original_line = mapping.original_line as i64;
			encode_vlq(original_line - previous_original_line, &mut out);
			previous_original_line = original_line;

			let original_column = mapping.original_column as i64;
			encode_vlq(original_column - previous_original_column, &mut out);
			previous_original_column = original_column;

			if let Some(name) = mapping.name {
				let name = name as i64;
				encode_vlq(name - previous_name, &mut out);
				previous_name = name;
			}
		}

		out
	}

	/// The source map as a JSON document.
	pub fn to_json_string(&self) -> String {
		json!({
			"version": 3,
			"sources": self.sources.iter().collect::<Vec<_>>(),
			"names": self.names.iter().collect::<Vec<_>>(),
			"mappings": self.encode_mappings(),
		})
		.to_string()
	}
}
