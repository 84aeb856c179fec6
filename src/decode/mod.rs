//! Identifier decoding for demap.
//!
//! This module handles:
//! - Compiling each mapping category into one trie-built regex
//! - Replacing mapped identifiers while leaving quoted ones alone
//! - Loading the field and method mappings named by the config

pub mod matcher;
pub mod rewriter;

pub use matcher::CompiledMapping;
pub use rewriter::DecodeStats;

use crate::config::MergedConfig;
use crate::error::Result;
use crate::mappings::load_table;
use std::borrow::Cow;

/// Category name for the field mapping table.
pub const FIELDS: &str = "fields";

/// Category name for the method mapping table.
pub const METHODS: &str = "methods";

/// An ordered set of compiled mappings applied one after another.
#[derive(Debug, Default)]
pub struct Decoder {
	mappings: Vec<CompiledMapping>,
}

impl Decoder {
	pub fn new(mappings: Vec<CompiledMapping>) -> Self {
		Decoder { mappings }
	}

	pub fn mappings(&self) -> &[CompiledMapping] {
		&self.mappings
	}

	/// Apply every mapping in order, returning the decoded text.
	pub fn decode(&self, text: &str) -> (String, DecodeStats) {
		let mut stats = DecodeStats::default();
		let mut output = text.to_string();

		for mapping in &self.mappings {
			let rewritten = match mapping.rewrite(&output, &mut stats) {
				Cow::Owned(rewritten) => Some(rewritten),
				Cow::Borrowed(_) => None,
			};
			if let Some(rewritten) = rewritten {
				output = rewritten;
			}
		}

		(output, stats)
	}
}

/// Load the field and method tables named by `config` and compile them.
pub fn load_decoder(config: &MergedConfig) -> Result<Decoder> {
	let mut mappings = Vec::new();

	for (category, path) in [(FIELDS, &config.fields), (METHODS, &config.methods)] {
		let table = load_table(path)?;
		let mapping =
			CompiledMapping::from_table(category, &table, &config.column, config.skip_quoted)?;
		tracing::info!(
			"{}: {} replacements from {}",
			category,
			mapping.replacements.len(),
			path.display()
		);
		mappings.push(mapping);
	}

	Ok(Decoder::new(mappings))
}
