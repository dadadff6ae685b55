//! Depth-first walker over a tree that may be mutated while it is walked.
//!
//! The walker never holds a borrow of the tree between callbacks. Its state is
//! the ancestor path (a list of [`Step`]s from the root to the current node)
//! and one cursor per level recording which child comes next. A visitor may
//! mutate anything reachable from the root as long as it reports list
//! insertions on the ancestor path through [`NodePath::shift`]:
//!
//! - nodes inserted ahead of the cursor are visited later in the same walk,
//! - nodes inserted behind the cursor are never visited,
//! - the current node is never entered twice.

use derive_more::Deref;
use derive_more::DerefMut;

use crate::Ast;
use crate::Node;
use crate::Step;
use crate::Value;

/// The route from the root to the node currently being visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct NodePath(Vec<Step>);

impl NodePath {
	/// Adjust the path after `insertion` added nodes to a list that the path
	/// runs through.
	pub fn shift(&mut self, insertion: &Insertion) {
		let Some(step) = self.0.get_mut(insertion.depth) else {
			return;
		};

		if step.key != insertion.key {
			return;
		}

		if let Some(index) = step.index.as_mut() {
			if *index >= insertion.at {
				*index += insertion.count;
			}
		}
	}
}

/// `count` nodes were inserted at position `at` of the `key` list owned by
/// the node `depth` steps below the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion {
	pub depth: usize,
	pub key: String,
	pub at: usize,
	pub count: usize,
}

pub trait Visitor {
	type Error;

	/// Called before the children of the node at `path` are visited. The
	/// children are read after this returns, so nodes added to them here are
	/// visited.
	fn enter(&mut self, ast: &mut Ast, path: &mut NodePath) -> Result<(), Self::Error>;

	fn leave(&mut self, _ast: &mut Ast, _path: &mut NodePath) -> Result<(), Self::Error> {
		Ok(())
	}
}

#[derive(Debug, Default)]
struct Cursor {
	/// Index into the node's properties.
	prop: usize,
	/// Next element of a list property, or `1` once a single child was
	/// visited.
	next: usize,
}

impl Cursor {
	fn next_child(&mut self, node: &Node) -> Option<Step> {
		while let Some((key, value)) = node.props.get_index(self.prop) {
			match value {
				Value::Node(_) if self.next == 0 => return Some(Step::field(key.clone())),
				Value::Nodes(nodes) if self.next < nodes.len() => {
					return Some(Step::item(key.clone(), self.next));
				}
				_ => {}
			}

			self.prop += 1;
			self.next = 0;
		}

		None
	}

	/// Continue after the child reached through `step`. The step carries the
	/// child's current index, which may have moved while it was visited.
	fn resume_after(&mut self, step: &Step) {
		self.next = step.index.map_or(1, |index| index + 1);
	}
}

/// Walk `ast` depth first, entering each node before its children and
/// leaving it after them.
pub fn walk<V: Visitor>(ast: &mut Ast, visitor: &mut V) -> Result<(), V::Error> {
	let mut path = NodePath::default();
	let mut cursors = vec![Cursor::default()];

	visitor.enter(ast, &mut path)?;

	loop {
		let Some(cursor) = cursors.last_mut() else {
			break;
		};

		let next = ast
			.program
			.at(&path)
			.and_then(|node| cursor.next_child(node));

		if let Some(step) = next {
			path.push(step);
			cursors.push(Cursor::default());
			visitor.enter(ast, &mut path)?;
			continue;
		}

		visitor.leave(ast, &mut path)?;
		cursors.pop();

		if let Some(step) = path.pop() {
			if let Some(parent) = cursors.last_mut() {
				parent.resume_after(&step);
			}
		}
	}

	Ok(())
}
