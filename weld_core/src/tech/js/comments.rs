use std::collections::HashMap;

use crate::Comment;
use crate::Node;
use crate::Span;
use crate::Step;
use crate::Value;

/// Outermost non-root nodes by start and end offset.
#[derive(Default)]
struct Boundaries {
	starts: HashMap<usize, Vec<Step>>,
	ends: HashMap<usize, Vec<Step>>,
}

impl Boundaries {
	fn collect(node: &Node, path: &mut Vec<Step>, boundaries: &mut Self) {
		if let Some(range) = node.range.filter(|_| !path.is_empty()) {
			// Pre-order, so the first node seen at an offset is the outermost.
			boundaries
				.starts
				.entry(range.start())
				.or_insert_with(|| path.clone());
			boundaries
				.ends
				.entry(range.end())
				.or_insert_with(|| path.clone());
		}

		for (key, value) in &node.props {
			match value {
				Value::Node(child) => {
					path.push(Step::field(key.clone()));
					Self::collect(child, path, boundaries);
					path.pop();
				}
				Value::Nodes(children) => {
					for (index, child) in children.iter().enumerate() {
						path.push(Step::item(key.clone(), index));
						Self::collect(child, path, boundaries);
						path.pop();
					}
				}
				Value::Data(_) => {}
			}
		}
	}
}

/// Attach each comment to a neighbouring node.
///
/// A comment leads the outermost node starting at the first token after it.
/// Failing that it trails the outermost node ending at the last token before
/// it. Comments with neither (the only content of an empty block, array or
/// object) stay in the flat comment list alone.
pub(crate) fn attach_comments(program: &mut Node, comments: &[Comment], tokens: &[Span]) {
	let mut boundaries = Boundaries::default();
	Boundaries::collect(program, &mut vec![], &mut boundaries);

	for comment in comments {
		let Some(range) = comment.range else {
			continue;
		};

		let after = tokens.partition_point(|token| token.start() < range.end());
		let leading = tokens
			.get(after)
			.and_then(|token| boundaries.starts.get(&token.start()));

		if let Some(node) = leading.and_then(|path| program.at_mut(path)) {
			node.leading_comments.push(comment.clone());
			continue;
		}

		let before = tokens.partition_point(|token| token.end() <= range.start());
		let trailing = before
			.checked_sub(1)
			.and_then(|index| tokens.get(index))
			.and_then(|token| boundaries.ends.get(&token.end()));

		if let Some(node) = trailing.and_then(|path| program.at_mut(path)) {
			node.trailing_comments.push(comment.clone());
		}
	}
}
