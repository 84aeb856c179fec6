use crate::error::{DemapError, Result};
use crate::mappings::table::MappingTable;
use std::collections::HashMap;
use std::path::Path;

/// Split one delimited line into fields.
///
/// Commas separate fields, double quotes toggle quoted mode and are dropped,
/// and inside quotes a backslash takes the next character literally. Returns
/// `None` when a quote is left open.
pub fn split_line(line: &str) -> Option<Vec<String>> {
	if line.is_empty() {
		return Some(Vec::new());
	}

	let mut fields = Vec::new();
	let mut current = String::new();
	let mut quoted = false;
	let mut escape_next = false;

	for c in line.chars() {
		if escape_next {
			current.push(c);
			escape_next = false;
		} else if quoted {
			match c {
				'"' => quoted = false,
				'\\' => escape_next = true,
				_ => current.push(c),
			}
		} else {
			match c {
				'"' => quoted = true,
				',' => fields.push(std::mem::take(&mut current)),
				_ => current.push(c),
			}
		}
	}

	if quoted {
		return None;
	}

	fields.push(current);
	Some(fields)
}

/// Parse a mapping table from text.
///
/// The first non-empty line is the header. Malformed rows and rows whose
/// field count differs from the header are skipped.
pub fn parse_table_str(content: &str, source: &Path) -> MappingTable {
	let mut table: Option<MappingTable> = None;

	for (index, line) in content.lines().enumerate() {
		let line_no = index + 1;
		let Some(fields) = split_line(line) else {
			tracing::warn!(
				"{}:{}: closing quote missing, skipping line",
				source.display(),
				line_no
			);
			continue;
		};

		if fields.is_empty() {
			continue;
		}

		let Some(table) = table.as_mut() else {
			table = Some(MappingTable::new(fields));
			continue;
		};

		if fields.len() != table.columns().len() {
			tracing::warn!(
				"{}:{}: expected {} fields, found {}, skipping line",
				source.display(),
				line_no,
				table.columns().len(),
				fields.len()
			);
			continue;
		}

		let mut fields = fields.into_iter();
		let key = fields.next().unwrap_or_default();
		let values: HashMap<String, String> = table
			.columns()
			.iter()
			.skip(1)
			.cloned()
			.zip(fields)
			.collect();

		let stored = table.insert_row(&key, values);
		if stored != key {
			tracing::debug!("{}: duplicate key {} stored as {}", source.display(), key, stored);
		}
	}

	table.unwrap_or_default()
}

/// Load a mapping table from a file.
pub fn load_table(path: &Path) -> Result<MappingTable> {
	if !path.exists() {
		return Err(DemapError::MappingNotFound {
			path: path.to_path_buf(),
		});
	}

	let content = std::fs::read_to_string(path).map_err(|source| DemapError::MappingRead {
		path: path.to_path_buf(),
		source,
	})?;

	let table = parse_table_str(&content, path);
	tracing::debug!("Loaded {} rows from {}", table.len(), path.display());
	Ok(table)
}
