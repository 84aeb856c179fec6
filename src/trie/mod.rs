//! Prefix trie over literal strings, compilable into a single regex.
//!
//! This module handles:
//! - Insertion and removal of literal strings with shared prefixes
//! - Pruning of dead nodes on removal
//! - Compilation of the trie into a compact non-capturing regex group

pub mod pattern;

pub use pattern::NEVER_MATCHES;

use std::collections::HashMap;
use std::fmt;

/// One character position along some inserted string(s).
///
/// Drop, clone and comparison walk an explicit stack, so a member of any
/// length is safe to hold.
#[derive(Default)]
pub(crate) struct Node {
	/// The character this node was reached by. `None` for the root.
	pub(crate) character: Option<char>,

	/// Child nodes keyed by their character.
	pub(crate) children: HashMap<char, Node>,

	/// Whether an inserted string ends exactly here.
	pub(crate) terminal: bool,
}

impl Node {
	fn new(character: char) -> Self {
		Node {
			character: Some(character),
			children: HashMap::new(),
			terminal: false,
		}
	}

	/// Children in ascending character order.
	pub(crate) fn sorted_children(&self) -> Vec<&Node> {
		let mut children: Vec<&Node> = self.children.values().collect();
		children.sort_by_key(|child| child.character);
		children
	}

	fn descend(&self, path: &[char]) -> Option<&Node> {
		let mut node = self;
		for c in path {
			node = node.children.get(c)?;
		}
		Some(node)
	}

	fn descend_mut(&mut self, path: &[char]) -> Option<&mut Node> {
		let mut node = self;
		for c in path {
			node = node.children.get_mut(c)?;
		}
		Some(node)
	}
}

impl Drop for Node {
	fn drop(&mut self) {
		let mut stack: Vec<Node> = self.children.drain().map(|(_, child)| child).collect();
		while let Some(mut node) = stack.pop() {
			stack.extend(node.children.drain().map(|(_, child)| child));
		}
	}
}

/// A node being copied, with the children still to visit.
struct CloneFrame<'a> {
	source: &'a Node,
	pending: Vec<(char, &'a Node)>,
	built: HashMap<char, Node>,
}

impl<'a> CloneFrame<'a> {
	fn new(source: &'a Node) -> Self {
		CloneFrame {
			source,
			pending: source.children.iter().map(|(c, child)| (*c, child)).collect(),
			built: HashMap::with_capacity(source.children.len()),
		}
	}

	fn finish(self) -> Node {
		Node {
			character: self.source.character,
			children: self.built,
			terminal: self.source.terminal,
		}
	}
}

impl Clone for Node {
	fn clone(&self) -> Self {
		// Post-order: a node is built once all of its children are.
		let mut stack = vec![(None, CloneFrame::new(self))];
		let mut finished = None;

		while let Some((_, frame)) = stack.last_mut() {
			if let Some((c, child)) = frame.pending.pop() {
				stack.push((Some(c), CloneFrame::new(child)));
				continue;
			}

			let Some((key, frame)) = stack.pop() else {
				break;
			};
			let node = frame.finish();
			match (key, stack.last_mut()) {
				(Some(c), Some((_, parent))) => {
					parent.built.insert(c, node);
				}
				_ => finished = Some(node),
			}
		}

		finished.unwrap_or_default()
	}
}

impl PartialEq for Node {
	fn eq(&self, other: &Self) -> bool {
		let mut stack = vec![(self, other)];
		while let Some((a, b)) = stack.pop() {
			if a.character != b.character
				|| a.terminal != b.terminal
				|| a.children.len() != b.children.len()
			{
				return false;
			}
			for (c, child) in &a.children {
				match b.children.get(c) {
					Some(other_child) => stack.push((child, other_child)),
					None => return false,
				}
			}
		}
		true
	}
}

impl Eq for Node {}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Node")
			.field("character", &self.character)
			.field("children", &self.children.len())
			.field("terminal", &self.terminal)
			.finish()
	}
}

/// A set of literal strings stored as a prefix trie.
///
/// The trie compiles to a regex matching exactly its members. See
/// [`Trie::to_regex`].
///
/// ```
/// use demap_cli::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("func_123456");
/// trie.insert("func_654321");
/// assert_eq!(trie.to_regex(), "(?:func_(?:123456|654321))");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Trie {
	root: Node,
	len: usize,
}

impl Trie {
	/// Create an empty trie.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of strings currently in the trie.
	pub fn len(&self) -> usize {
		self.len
	}

	/// Whether the trie holds no strings, not even the empty string.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Insert a string. Returns `false` if it was already present.
	pub fn insert(&mut self, value: &str) -> bool {
		let mut node = &mut self.root;
		for c in value.chars() {
			node = node.children.entry(c).or_insert_with(|| Node::new(c));
		}

		if node.terminal {
			return false;
		}

		node.terminal = true;
		self.len += 1;
		true
	}

	/// Whether `value` was inserted and not since removed.
	pub fn contains(&self, value: &str) -> bool {
		let path: Vec<char> = value.chars().collect();
		self.root.descend(&path).is_some_and(|node| node.terminal)
	}

	/// Remove a string. Returns `false` if it was not a member.
	///
	/// Nodes left without children or a terminal flag are pruned before
	/// returning, up to the nearest ancestor still in use.
	pub fn remove(&mut self, value: &str) -> bool {
		let path: Vec<char> = value.chars().collect();

		// Depth of the deepest ancestor that must survive pruning.
		let mut anchor = 0;
		let mut node = &self.root;
		for (depth, c) in path.iter().enumerate() {
			if node.terminal || node.children.len() > 1 {
				anchor = depth;
			}
			match node.children.get(c) {
				Some(child) => node = child,
				None => return false,
			}
		}

		if !node.terminal {
			return false;
		}

		let removed = if node.children.is_empty() && !path.is_empty() {
			self.root
				.descend_mut(&path[..anchor])
				.and_then(|parent| parent.children.remove(&path[anchor]))
				.is_some()
		} else if let Some(node) = self.root.descend_mut(&path) {
			node.terminal = false;
			true
		} else {
			false
		};

		if removed {
			self.len -= 1;
		}
		removed
	}
}

impl fmt::Debug for Trie {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Trie")
			.field("len", &self.len)
			.field("root", &self.root)
			.finish()
	}
}

impl<S: AsRef<str>> Extend<S> for Trie {
	fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
		for value in iter {
			self.insert(value.as_ref());
		}
	}
}

impl<S: AsRef<str>> FromIterator<S> for Trie {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		let mut trie = Trie::new();
		trie.extend(iter);
		trie
	}
}
