use crate::error::{DemapError, Result};
use crate::mappings::MappingTable;
use crate::trie::Trie;
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;

/// Upper bound on the compiled size of one mapping's regex.
///
/// The `regex` default of 10 MiB is exceeded by tables of a few tens of
/// thousands of keys.
pub const REGEX_SIZE_LIMIT: usize = 256 * (1 << 20);

/// A mapping category compiled into a single word-bounded regex.
#[derive(Debug)]
pub struct CompiledMapping {
	/// Category name, e.g. `fields` or `methods`.
	pub category: String,

	/// Matches every key with a replacement, as a whole word.
	pub regex: Regex,

	/// Key to replacement value.
	pub replacements: HashMap<String, String>,

	/// Leave matches directly preceded by `"` untouched.
	pub skip_quoted: bool,
}

impl CompiledMapping {
	/// Compile a mapping from replacement pairs.
	///
	/// Pairs with an empty replacement are dropped.
	pub fn new(
		category: &str,
		replacements: HashMap<String, String>,
		skip_quoted: bool,
	) -> Result<Self> {
		let replacements: HashMap<String, String> = replacements
			.into_iter()
			.filter(|(_, value)| !value.is_empty())
			.collect();

		let trie: Trie = replacements.keys().collect();
		let pattern = format!(r"\b{}\b", trie.to_regex());
		tracing::debug!(
			"Compiled {} {} keys into a {} byte pattern",
			trie.len(),
			category,
			pattern.len()
		);

		let regex = compile_regex(category, &pattern)?;

		Ok(CompiledMapping {
			category: category.to_string(),
			regex,
			replacements,
			skip_quoted,
		})
	}

	/// Compile a mapping from one column of a table.
	pub fn from_table(
		category: &str,
		table: &MappingTable,
		column: &str,
		skip_quoted: bool,
	) -> Result<Self> {
		if !table.is_empty() && !table.has_column(column) {
			return Err(DemapError::MissingColumn {
				category: category.to_string(),
				column: column.to_string(),
			});
		}

		Self::new(category, table.column_values(column), skip_quoted)
	}
}

/// Compile a regex pattern string, allowing up to [`REGEX_SIZE_LIMIT`].
fn compile_regex(category: &str, pattern: &str) -> Result<Regex> {
	RegexBuilder::new(pattern)
		.size_limit(REGEX_SIZE_LIMIT)
		.build()
		.map_err(|source| DemapError::InvalidRegex {
			category: category.to_string(),
			source,
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn pairs(items: &[(&str, &str)]) -> HashMap<String, String> {
		items
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[test]
	fn test_matches_whole_words_only() {
		let mapping = CompiledMapping::new(
			"methods",
			pairs(&[("func_1_a", "tick"), ("func_12_b", "render")]),
			true,
		)
		.unwrap();

		assert!(mapping.regex.is_match("this.func_1_a();"));
		assert!(mapping.regex.is_match("func_12_b"));
		assert!(!mapping.regex.is_match("func_1_ab"));
		assert!(!mapping.regex.is_match("xfunc_1_a"));
		assert!(!mapping.regex.is_match("func_1"));
	}

	#[test]
	fn test_empty_mapping_never_matches() {
		let mapping = CompiledMapping::new("fields", HashMap::new(), true).unwrap();
		assert!(!mapping.regex.is_match(""));
		assert!(!mapping.regex.is_match("field_1_a"));
	}

	#[test]
	fn test_empty_replacements_are_dropped() {
		let mapping =
			CompiledMapping::new("fields", pairs(&[("field_1_a", ""), ("field_2_b", "x")]), true)
				.unwrap();

		assert!(!mapping.regex.is_match("field_1_a"));
		assert!(mapping.regex.is_match("field_2_b"));
		assert_eq!(mapping.replacements.len(), 1);
	}

	#[test]
	fn test_from_table_missing_column() {
		let mut table = MappingTable::new(vec!["searge".to_string(), "name".to_string()]);
		table.insert_row("func_1_a", pairs(&[("name", "tick")]));

		let result = CompiledMapping::from_table("methods", &table, "desc", true);
		match result.unwrap_err() {
			DemapError::MissingColumn { category, column } => {
				assert_eq!(category, "methods");
				assert_eq!(column, "desc");
			}
			other => panic!("Expected MissingColumn error, got {other:?}"),
		}
	}

	#[test]
	fn test_from_empty_table_ignores_column() {
		let table = MappingTable::default();
		let mapping = CompiledMapping::from_table("fields", &table, "name", true).unwrap();
		assert!(mapping.replacements.is_empty());
	}

	#[test]
	fn test_large_table_compiles() {
		let replacements: HashMap<String, String> = (0..80_000)
			.map(|i| (format!("func_{i}_a"), format!("method{i}")))
			.collect();
		let mapping = CompiledMapping::new("methods", replacements, true).unwrap();

		assert_eq!(mapping.replacements.len(), 80_000);
		assert!(mapping.regex.is_match("x.func_79999_a();"));
		assert!(!mapping.regex.is_match("x.func_80000_a();"));
	}
}
