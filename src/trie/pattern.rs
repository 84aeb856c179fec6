use crate::trie::{Node, Trie};
use std::fmt;

/// Pattern produced for a trie with no members. It never matches, not even
/// the empty string.
pub const NEVER_MATCHES: &str = r"(?:[^\s\S])";

impl Trie {
	/// Compile the trie into a single non-capturing regex group.
	///
	/// Unbranching runs of characters collapse into one escaped literal,
	/// branches become alternations ordered by character, and a branch point
	/// that is also the end of a member makes its alternation optional.
	/// Output depends only on the set of members.
	///
	/// The pattern is not anchored. An empty trie compiles to
	/// [`NEVER_MATCHES`]; a trie containing the empty string can match zero
	/// characters.
	///
	/// Generation does not recurse, but each member ending inside another
	/// member's path adds one level of group nesting, and the `regex` crate
	/// rejects patterns nested deeper than its parser's nest limit.
	pub fn to_regex(&self) -> String {
		if self.is_empty() {
			return NEVER_MATCHES.to_string();
		}

		let mut out = String::from("(?:");
		write_node(&mut out, &self.root);
		out.push(')');
		out
	}

	/// Render an indented view of the trie, one compressed branch per line.
	///
	/// Lines ending in `$` mark the end of a member. A lone `$` on the first
	/// line means the empty string is a member.
	pub fn to_debug_tree(&self) -> String {
		let mut lines = Vec::new();
		if self.root.terminal {
			lines.push("$".to_string());
		}
		let mut stack: Vec<(usize, &Node)> = self
			.root
			.sorted_children()
			.into_iter()
			.rev()
			.map(|child| (0, child))
			.collect();

		while let Some((depth, mut node)) = stack.pop() {
			let mut line = "  ".repeat(depth);
			line.extend(node.character);
			while let Some(next) = single_child(node) {
				node = next;
				line.extend(node.character);
			}
			if node.terminal {
				line.push('$');
			}
			lines.push(line);

			for child in node.sorted_children().into_iter().rev() {
				stack.push((depth + 1, child));
			}
		}

		lines.join("\n")
	}
}

impl fmt::Display for Trie {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_regex())
	}
}

/// The only child of a non-terminal node, if it has exactly one.
fn single_child(node: &Node) -> Option<&Node> {
	if node.terminal || node.children.len() != 1 {
		return None;
	}
	node.children.values().next()
}

/// Pending output while walking the trie.
enum Step<'a> {
	Node(&'a Node),
	Text(&'static str),
}

fn write_node(out: &mut String, root: &Node) {
	let mut stack = vec![Step::Node(root)];

	while let Some(step) = stack.pop() {
		let mut node = match step {
			Step::Node(node) => node,
			Step::Text(text) => {
				out.push_str(text);
				continue;
			}
		};

		let mut span = String::new();
		span.extend(node.character);
		while let Some(next) = single_child(node) {
			node = next;
			span.extend(node.character);
		}
		out.push_str(&regex::escape(&span));

		if node.children.is_empty() {
			continue;
		}

		out.push_str("(?:");
		stack.push(Step::Text(if node.terminal { ")?" } else { ")" }));
		for (i, child) in node.sorted_children().into_iter().enumerate().rev() {
			stack.push(Step::Node(child));
			if i > 0 {
				stack.push(Step::Text("|"));
			}
		}
	}
}
