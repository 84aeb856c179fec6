use crate::decode::matcher::CompiledMapping;
use regex::Captures;
use std::borrow::Cow;
use std::ops::AddAssign;

/// Counts of what a rewrite did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
	/// Tokens replaced by their mapped name.
	pub replaced: usize,

	/// Tokens left alone because they follow a double quote.
	pub skipped_quoted: usize,
}

impl AddAssign for DecodeStats {
	fn add_assign(&mut self, other: Self) {
		self.replaced += other.replaced;
		self.skipped_quoted += other.skipped_quoted;
	}
}

impl CompiledMapping {
	/// Replace every mapped token in `text`.
	pub fn rewrite<'t>(&self, text: &'t str, stats: &mut DecodeStats) -> Cow<'t, str> {
		self.regex.replace_all(text, |caps: &Captures| {
			let token = &caps[0];
			let start = caps.get(0).map_or(0, |m| m.start());

			if self.skip_quoted && text[..start].ends_with('"') {
				stats.skipped_quoted += 1;
				return token.to_string();
			}

			match self.replacements.get(token) {
				Some(name) => {
					stats.replaced += 1;
					name.clone()
				}
				None => token.to_string(),
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	fn mapping(skip_quoted: bool) -> CompiledMapping {
		let replacements: HashMap<String, String> = [
			("func_1_a", "tick"),
			("func_1_ab", "update"),
			("func_2_b", "render"),
		]
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect();
		CompiledMapping::new("methods", replacements, skip_quoted).unwrap()
	}

	#[test]
	fn test_rewrite_replaces_all_tokens() {
		let mut stats = DecodeStats::default();
		let out = mapping(true).rewrite("a.func_1_a(); b.func_2_b(func_1_a);", &mut stats);

		assert_eq!(out, "a.tick(); b.render(tick);");
		assert_eq!(stats.replaced, 3);
		assert_eq!(stats.skipped_quoted, 0);
	}

	#[test]
	fn test_rewrite_prefers_longest_whole_token() {
		let mut stats = DecodeStats::default();
		let out = mapping(true).rewrite("func_1_ab func_1_a", &mut stats);
		assert_eq!(out, "update tick");
	}

	#[test]
	fn test_rewrite_leaves_unknown_tokens() {
		let mut stats = DecodeStats::default();
		let out = mapping(true).rewrite("func_3_c func_1_abc", &mut stats);

		assert!(matches!(out, Cow::Borrowed(_)));
		assert_eq!(out, "func_3_c func_1_abc");
		assert_eq!(stats, DecodeStats::default());
	}

	#[test]
	fn test_rewrite_skips_quoted_tokens() {
		let mut stats = DecodeStats::default();
		let out = mapping(true).rewrite(r#"call("func_1_a", func_1_a)"#, &mut stats);

		assert_eq!(out, r#"call("func_1_a", tick)"#);
		assert_eq!(stats.replaced, 1);
		assert_eq!(stats.skipped_quoted, 1);
	}

	#[test]
	fn test_rewrite_quoted_when_guard_disabled() {
		let mut stats = DecodeStats::default();
		let out = mapping(false).rewrite(r#"call("func_1_a")"#, &mut stats);
		assert_eq!(out, r#"call("tick")"#);
	}

	#[test]
	fn test_stats_add_assign() {
		let mut total = DecodeStats {
			replaced: 1,
			skipped_quoted: 2,
		};
		total += DecodeStats {
			replaced: 3,
			skipped_quoted: 4,
		};
		assert_eq!(
			total,
			DecodeStats {
				replaced: 4,
				skipped_quoted: 6
			}
		);
	}
}
