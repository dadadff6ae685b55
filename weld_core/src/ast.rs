use std::fmt::Display;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error as _;
use serde_json::Map;
use serde_json::Value as Json;

use crate::Point;
use crate::SourceLocation;
use crate::Span;
use crate::WeldError;
use crate::WeldResult;

macro_rules! node_kinds {
	($($kind:ident),* $(,)?) => {
		/// The `type` discriminator of an AST node.
		///
		/// Covers the ESTree node types the bundled JavaScript tech produces.
		/// Anything else (for example nodes loaded from an AST document written
		/// by another tool) is carried as [`NodeKind::Other`] and passed through
		/// without interpretation.
		#[derive(Debug, Clone, PartialEq, Eq, Hash)]
		pub enum NodeKind {
			$($kind,)*
			Other(String),
		}

		impl NodeKind {
			pub fn as_str(&self) -> &str {
				match self {
					$(NodeKind::$kind => stringify!($kind),)*
					NodeKind::Other(name) => name.as_str(),
				}
			}

			pub fn from_name(name: &str) -> Self {
				match name {
					$(stringify!($kind) => NodeKind::$kind,)*
					other => NodeKind::Other(other.to_string()),
				}
			}
		}
	};
}

node_kinds! {
	Program,
	BlockStatement,
	EmptyStatement,
	ExpressionStatement,
	VariableDeclaration,
	VariableDeclarator,
	FunctionDeclaration,
	FunctionExpression,
	ReturnStatement,
	IfStatement,
	ForStatement,
	ForInStatement,
	WhileStatement,
	DoWhileStatement,
	BreakStatement,
	ContinueStatement,
	ThrowStatement,
	TryStatement,
	CatchClause,
	SwitchStatement,
	SwitchCase,
	DebuggerStatement,
	Identifier,
	Literal,
	ThisExpression,
	ArrayExpression,
	ObjectExpression,
	Property,
	UnaryExpression,
	UpdateExpression,
	BinaryExpression,
	LogicalExpression,
	AssignmentExpression,
	ConditionalExpression,
	CallExpression,
	NewExpression,
	MemberExpression,
	SequenceExpression,
	LabeledStatement,
	WithStatement,
	// A hole in an array literal, `null` in ESTree documents.
	Elision,
}

impl NodeKind {
	/// Objects, arrays and literals. They can only be replaced by other atomic
	/// nodes and never lent into a statement list.
	pub fn is_atomic(&self) -> bool {
		matches!(
			self,
			NodeKind::ObjectExpression | NodeKind::ArrayExpression | NodeKind::Literal
		)
	}

	/// Node types whose `body` holds statements.
	pub fn is_container(&self) -> bool {
		matches!(self, NodeKind::Program | NodeKind::BlockStatement)
	}

	/// The property that must hold a list of nodes for this node to be valid.
	pub fn list_key(&self) -> Option<&'static str> {
		match self {
			NodeKind::Program | NodeKind::BlockStatement => Some("body"),
			NodeKind::ArrayExpression => Some("elements"),
			NodeKind::ObjectExpression => Some("properties"),
			_ => None,
		}
	}
}

impl Display for NodeKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

/// Properties that may receive included nodes.
pub const LENDABLE_KEYS: [&str; 3] = ["body", "elements", "properties"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommentKind {
	Block,
	Line,
}

/// A comment as recorded by the parser. Equality is structural and includes
/// the source path, which makes a comment unique across all included files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
	#[serde(rename = "type")]
	pub kind: CommentKind,
	pub value: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub range: Option<Span>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub loc: Option<SourceLocation>,
}

/// The value of a node property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Node(Box<Node>),
	Nodes(Vec<Node>),
	/// Scalars, operators and anything else that is not a child node.
	Data(Json),
}

impl Value {
	pub fn null() -> Self {
		Value::Data(Json::Null)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Value::Data(Json::Null))
	}

	fn to_json(&self) -> Json {
		match self {
			Value::Node(node) => node.to_json(),
			Value::Nodes(nodes) => Json::Array(nodes.iter().map(Node::to_json).collect()),
			Value::Data(data) => data.clone(),
		}
	}

	fn from_json(key: &str, value: Json) -> WeldResult<Self> {
		if is_node_json(&value) {
			return Ok(Value::Node(Box::new(Node::try_from(value)?)));
		}

		// Only array elements may have holes.
		let allow_holes = key == "elements";
		match value {
			Json::Array(items)
				if items
					.iter()
					.all(|item| is_node_json(item) || (allow_holes && item.is_null())) =>
			{
				let nodes = items
					.into_iter()
					.map(|item| {
						if item.is_null() {
							Ok(Node::new(NodeKind::Elision))
						} else {
							Node::try_from(item)
						}
					})
					.collect::<WeldResult<Vec<_>>>()?;
				Ok(Value::Nodes(nodes))
			}
			other => Ok(Value::Data(other)),
		}
	}
}

fn is_node_json(value: &Json) -> bool {
	value
		.as_object()
		.is_some_and(|object| object.get("type").is_some_and(Json::is_string))
}

impl From<Node> for Value {
	fn from(node: Node) -> Self {
		Value::Node(Box::new(node))
	}
}

impl From<Vec<Node>> for Value {
	fn from(nodes: Vec<Node>) -> Self {
		Value::Nodes(nodes)
	}
}

impl From<Option<Node>> for Value {
	fn from(node: Option<Node>) -> Self {
		node.map_or_else(Value::null, Value::from)
	}
}

impl From<Json> for Value {
	fn from(data: Json) -> Self {
		Value::Data(data)
	}
}

impl From<&str> for Value {
	fn from(data: &str) -> Self {
		Value::Data(Json::String(data.to_string()))
	}
}

impl From<bool> for Value {
	fn from(data: bool) -> Self {
		Value::Data(Json::Bool(data))
	}
}

/// One step from a node to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
	pub key: String,
	/// Position inside a list property, `None` for a single child node.
	pub index: Option<usize>,
}

impl Step {
	pub fn field(key: impl Into<String>) -> Self {
		Self {
			key: key.into(),
			index: None,
		}
	}

	pub fn item(key: impl Into<String>, index: usize) -> Self {
		Self {
			key: key.into(),
			index: Some(index),
		}
	}
}

/// A node of the syntax tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
	pub kind: NodeKind,
	/// Properties in traversal order.
	pub props: IndexMap<String, Value>,
	pub range: Option<Span>,
	pub loc: Option<SourceLocation>,
	pub leading_comments: Vec<Comment>,
	pub trailing_comments: Vec<Comment>,
}

impl Node {
	pub fn new(kind: NodeKind) -> Self {
		Self {
			kind,
			props: IndexMap::new(),
			range: None,
			loc: None,
			leading_comments: vec![],
			trailing_comments: vec![],
		}
	}

	/// Builder style property setter.
	#[must_use]
	pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
		self.props.insert(key.to_string(), value.into());
		self
	}

	pub fn set(&mut self, key: &str, value: impl Into<Value>) {
		self.props.insert(key.to_string(), value.into());
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.props.get(key)
	}

	pub fn node(&self, key: &str) -> Option<&Node> {
		match self.props.get(key) {
			Some(Value::Node(node)) => Some(node),
			_ => None,
		}
	}

	pub fn nodes(&self, key: &str) -> Option<&[Node]> {
		match self.props.get(key) {
			Some(Value::Nodes(nodes)) => Some(nodes),
			_ => None,
		}
	}

	pub fn nodes_mut(&mut self, key: &str) -> Option<&mut Vec<Node>> {
		match self.props.get_mut(key) {
			Some(Value::Nodes(nodes)) => Some(nodes),
			_ => None,
		}
	}

	pub fn data(&self, key: &str) -> Option<&Json> {
		match self.props.get(key) {
			Some(Value::Data(data)) => Some(data),
			_ => None,
		}
	}

	pub fn str(&self, key: &str) -> Option<&str> {
		self.data(key).and_then(Json::as_str)
	}

	pub fn bool(&self, key: &str) -> bool {
		self.data(key).and_then(Json::as_bool).unwrap_or(false)
	}

	/// The string value of a string `Literal`.
	pub fn string_value(&self) -> Option<&str> {
		if self.kind == NodeKind::Literal {
			self.str("value")
		} else {
			None
		}
	}

	/// The file this node was parsed from.
	pub fn source(&self) -> Option<&str> {
		self.loc.as_ref().and_then(|loc| loc.source.as_deref())
	}

	pub fn start(&self) -> Option<Point> {
		self.loc.as_ref().map(|loc| loc.start)
	}

	pub fn child(&self, step: &Step) -> Option<&Node> {
		match (self.props.get(&step.key)?, step.index) {
			(Value::Node(node), None) => Some(node),
			(Value::Nodes(nodes), Some(index)) => nodes.get(index),
			_ => None,
		}
	}

	pub fn child_mut(&mut self, step: &Step) -> Option<&mut Node> {
		match (self.props.get_mut(&step.key)?, step.index) {
			(Value::Node(node), None) => Some(node),
			(Value::Nodes(nodes), Some(index)) => nodes.get_mut(index),
			_ => None,
		}
	}

	/// Follow `path` down from this node.
	pub fn at(&self, path: &[Step]) -> Option<&Node> {
		path.iter().try_fold(self, |node, step| node.child(step))
	}

	pub fn at_mut(&mut self, path: &[Step]) -> Option<&mut Node> {
		path.iter().try_fold(self, |node, step| node.child_mut(step))
	}

	/// Pre-order visit of this node and every descendant.
	pub fn for_each(&self, f: &mut impl FnMut(&Node)) {
		f(self);
		for value in self.props.values() {
			match value {
				Value::Node(node) => node.for_each(f),
				Value::Nodes(nodes) => {
					for node in nodes {
						node.for_each(f);
					}
				}
				Value::Data(_) => {}
			}
		}
	}

	pub fn for_each_mut(&mut self, f: &mut impl FnMut(&mut Node)) {
		f(self);
		for value in self.props.values_mut() {
			match value {
				Value::Node(node) => node.for_each_mut(f),
				Value::Nodes(nodes) => {
					for node in nodes {
						node.for_each_mut(f);
					}
				}
				Value::Data(_) => {}
			}
		}
	}

	pub fn to_json(&self) -> Json {
		if self.kind == NodeKind::Elision {
			return Json::Null;
		}

		let mut object = Map::new();
		object.insert("type".into(), Json::String(self.kind.as_str().to_string()));

		for (key, value) in &self.props {
			object.insert(key.clone(), value.to_json());
		}

		if let Some(range) = self.range {
			object.insert("range".into(), serde_json::json!([range.0, range.1]));
		}

		if let Some(loc) = &self.loc {
			object.insert("loc".into(), serde_json::to_value(loc).unwrap_or(Json::Null));
		}

		if !self.leading_comments.is_empty() {
			object.insert(
				"leadingComments".into(),
				serde_json::to_value(&self.leading_comments).unwrap_or(Json::Null),
			);
		}

		if !self.trailing_comments.is_empty() {
			object.insert(
				"trailingComments".into(),
				serde_json::to_value(&self.trailing_comments).unwrap_or(Json::Null),
			);
		}

		Json::Object(object)
	}
}

fn invalid(message: impl Display) -> WeldError {
	WeldError::AstDocument(message.to_string())
}

fn take_typed<T: serde::de::DeserializeOwned>(
	object: &mut Map<String, Json>,
	key: &str,
) -> WeldResult<Option<T>> {
	match object.shift_remove(key) {
		None | Some(Json::Null) => Ok(None),
		Some(value) => serde_json::from_value(value)
			.map(Some)
			.map_err(|e| invalid(format!("`{key}`: {e}"))),
	}
}

impl TryFrom<Json> for Node {
	type Error = WeldError;

	fn try_from(value: Json) -> WeldResult<Self> {
		let Json::Object(mut object) = value else {
			return Err(invalid("expected an object node"));
		};

		let kind = match object.shift_remove("type") {
			Some(Json::String(name)) => NodeKind::from_name(&name),
			_ => return Err(invalid("node without a string `type`")),
		};

		let mut node = Node::new(kind);
		node.range = take_typed(&mut object, "range")?;
		node.loc = take_typed(&mut object, "loc")?;
		node.leading_comments = take_typed(&mut object, "leadingComments")?.unwrap_or_default();
		node.trailing_comments = take_typed(&mut object, "trailingComments")?.unwrap_or_default();

		for (key, value) in object {
			let value = Value::from_json(&key, value)?;
			node.props.insert(key, value);
		}

		if let Some(key) = node.kind.list_key() {
			if node.nodes(key).is_none() {
				return Err(invalid(format!("`{}.{key}` must be a list of nodes", node.kind)));
			}
		}

		Ok(node)
	}
}

impl Serialize for Node {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Node {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = Json::deserialize(deserializer)?;
		Node::try_from(value).map_err(D::Error::custom)
	}
}

/// A parsed file: the root node plus the flat store of every comment found
/// in it. The store is the authoritative list of pending comment directives.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast {
	pub program: Node,
	pub comments: Vec<Comment>,
}

impl Ast {
	pub fn new(program: Node) -> Self {
		Self {
			program,
			comments: vec![],
		}
	}

	pub fn body(&self) -> &[Node] {
		self.program.nodes("body").unwrap_or_default()
	}

	/// Take the top level nodes, discarding the root.
	pub fn into_body(mut self) -> Vec<Node> {
		self.program.nodes_mut("body").map(std::mem::take).unwrap_or_default()
	}

	/// Remove `comment` from the flat store and from the leading and trailing
	/// comments of every node. Returns how many references were dropped.
	pub fn remove_comment(&mut self, comment: &Comment) -> usize {
		let mut removed = remove_from(&mut self.comments, comment);
		self.program.for_each_mut(&mut |node| {
			removed += remove_from(&mut node.leading_comments, comment);
			removed += remove_from(&mut node.trailing_comments, comment);
		});
		removed
	}

	pub fn to_json(&self) -> Json {
		let mut json = self.program.to_json();
		if let Json::Object(object) = &mut json {
			object.insert(
				"comments".into(),
				serde_json::to_value(&self.comments).unwrap_or(Json::Null),
			);
		}
		json
	}

	pub fn from_json(value: Json) -> WeldResult<Self> {
		let Json::Object(mut object) = value else {
			return Err(invalid("expected an object at the document root"));
		};

		let comments = take_typed(&mut object, "comments")?.unwrap_or_default();
		let program = Node::try_from(Json::Object(object))?;

		Ok(Self { program, comments })
	}

	pub fn parse_document(document: &str) -> WeldResult<Self> {
		let value: Json = serde_json::from_str(document).map_err(invalid)?;
		Self::from_json(value)
	}
}

fn remove_from(comments: &mut Vec<Comment>, comment: &Comment) -> usize {
	let Some(index) = comments.iter().position(|candidate| candidate == comment) else {
		return 0;
	};
	comments.remove(index);
	1
}

impl Serialize for Ast {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.to_json().serialize(serializer)
	}
}

impl<'de> Deserialize<'de> for Ast {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let value = Json::deserialize(deserializer)?;
		Ast::from_json(value).map_err(D::Error::custom)
	}
}
