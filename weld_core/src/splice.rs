use std::fmt::Display;

use crate::Ast;
use crate::Directive;
use crate::Node;
use crate::NodeKind;
use crate::WeldError;
use crate::WeldResult;
use crate::walk::Insertion;
use crate::walk::NodePath;

/// How included nodes are placed relative to the node a directive belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
	/// Overwrite the (atomic) node with the single included node.
	Replace,
	/// Append to the named list of the node, which was empty when its
	/// directives were found.
	Into(String),
	/// Insert into the nearest ancestor list with this name, before the
	/// element that leads to the node.
	Before(String),
	/// Like `Before`, but after that element.
	After(String),
}

impl Display for Placement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Placement::Replace => write!(f, "replace"),
			Placement::Into(key) => write!(f, "into `{key}`"),
			Placement::Before(key) => write!(f, "before, in `{key}`"),
			Placement::After(key) => write!(f, "after, in `{key}`"),
		}
	}
}

/// The location of the comment or literal that requested an inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Origin {
	/// The file containing the directive.
	pub file: Option<String>,
	pub index: usize,
	/// 1-indexed.
	pub line: usize,
	/// 1-indexed.
	pub column: usize,
}

impl Origin {
	pub fn new(directive: &Directive, file: Option<&str>) -> Self {
		let start = directive.start.unwrap_or_default();

		Self {
			file: file.map(ToString::to_string),
			index: directive.range.map_or(0, |range| range.start()),
			line: start.line,
			column: start.column + 1,
		}
	}

	pub fn validity_error(&self) -> WeldError {
		WeldError::Validity {
			file: self.file.clone(),
			index: self.index,
			line: self.line,
			column: self.column,
		}
	}
}

/// Place `produced` into the tree of `ast` relative to the node at `path`.
///
/// Insertions into a list the path runs through are applied to `path` so
/// the walker keeps pointing at the same node; the insertion is returned.
pub fn splice(
	ast: &mut Ast,
	path: &mut NodePath,
	produced: Vec<Node>,
	placement: &Placement,
	origin: &Origin,
) -> WeldResult<Option<Insertion>> {
	match placement {
		Placement::Replace => {
			replace(ast, path, produced, origin)?;
			Ok(None)
		}
		Placement::Into(key) => {
			append(ast, path, produced, key, origin)?;
			Ok(None)
		}
		Placement::Before(key) => insert(ast, path, produced, key, false, origin).map(Some),
		Placement::After(key) => insert(ast, path, produced, key, true, origin).map(Some),
	}
}

fn replace(ast: &mut Ast, path: &NodePath, produced: Vec<Node>, origin: &Origin) -> WeldResult<()> {
	let target = ast
		.program
		.at_mut(path)
		.ok_or_else(|| origin.validity_error())?;

	let [replacement] = <[Node; 1]>::try_from(produced).map_err(|_| origin.validity_error())?;

	// Objects, arrays and literals may only stand in for each other.
	if !target.kind.is_atomic() || !replacement.kind.is_atomic() {
		return Err(origin.validity_error());
	}

	*target = replacement;

	Ok(())
}

fn append(
	ast: &mut Ast,
	path: &NodePath,
	produced: Vec<Node>,
	key: &str,
	origin: &Origin,
) -> WeldResult<()> {
	let target = ast
		.program
		.at_mut(path)
		.ok_or_else(|| origin.validity_error())?;

	if target.kind.is_atomic() {
		return Err(origin.validity_error());
	}

	assert_lendable(&target.kind, key, &produced, origin)?;

	// Emptiness is checked once, when the directives of an empty list are
	// collected, so each directive of the batch appends in turn.
	let list = target.nodes_mut(key).ok_or_else(|| origin.validity_error())?;

	list.extend(produced);

	Ok(())
}

fn insert(
	ast: &mut Ast,
	path: &mut NodePath,
	produced: Vec<Node>,
	key: &str,
	after: bool,
	origin: &Origin,
) -> WeldResult<Insertion> {
	// The nearest strict ancestor that owns a `key` list.
	let depth = (0..path.len())
		.rev()
		.find(|&depth| {
			ast.program
				.at(&path[..depth])
				.is_some_and(|node| node.nodes(key).is_some())
		})
		.ok_or_else(|| origin.validity_error())?;

	// The element of the owner's list that leads down to the node.
	let crossroad = &path[depth];
	let index = match crossroad.index {
		Some(index) if crossroad.key == key => index,
		_ => return Err(origin.validity_error()),
	};

	let owner = ast
		.program
		.at_mut(&path[..depth])
		.ok_or_else(|| origin.validity_error())?;

	assert_lendable(&owner.kind, key, &produced, origin)?;

	let at = if after { index + 1 } else { index };
	let count = produced.len();
	let list = owner.nodes_mut(key).ok_or_else(|| origin.validity_error())?;
	list.splice(at..at, produced);

	let insertion = Insertion {
		depth,
		key: key.to_string(),
		at,
		count,
	};
	path.shift(&insertion);

	Ok(insertion)
}

/// Programs and blocks only accept statements, and only in their `body`.
fn assert_lendable(kind: &NodeKind, key: &str, produced: &[Node], origin: &Origin) -> WeldResult<()> {
	if !kind.is_container() {
		return Ok(());
	}

	if key != "body" || produced.iter().any(|node| node.kind.is_atomic()) {
		return Err(origin.validity_error());
	}

	Ok(())
}
