use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

/// A delimited mapping table keyed by its first column.
///
/// Every row stores its remaining fields by header column name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
	/// Header columns, including the key column.
	columns: Vec<String>,

	/// Rows keyed by first field.
	rows: HashMap<String, HashMap<String, String>>,
}

impl MappingTable {
	/// Create an empty table with the given header.
	pub fn new(columns: Vec<String>) -> Self {
		MappingTable {
			columns,
			rows: HashMap::new(),
		}
	}

	/// Header columns, including the key column.
	pub fn columns(&self) -> &[String] {
		&self.columns
	}

	/// Whether any value column has the given name.
	pub fn has_column(&self, column: &str) -> bool {
		self.columns.iter().skip(1).any(|c| c == column)
	}

	/// Insert a row, appending `_` to the key until it is unique.
	///
	/// Returns the key the row was stored under.
	pub fn insert_row(&mut self, key: &str, values: HashMap<String, String>) -> String {
		let mut key = key.to_string();
		while self.rows.contains_key(&key) {
			key.push('_');
		}
		self.rows.insert(key.clone(), values);
		key
	}

	/// Look up a single value.
	pub fn get(&self, key: &str, column: &str) -> Option<&str> {
		self.rows
			.get(key)
			.and_then(|row| row.get(column))
			.map(String::as_str)
	}

	/// All keys, in no particular order.
	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.rows.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// Key to value for one column, skipping rows without it.
	pub fn column_values(&self, column: &str) -> HashMap<String, String> {
		self.rows
			.iter()
			.filter_map(|(key, row)| row.get(column).map(|value| (key.clone(), value.clone())))
			.collect()
	}
}

/// Write an indented dump of the table, keys sorted.
///
/// Each key sits at one tab, each column name and value at two.
pub fn write_dump<W: Write>(writer: &mut W, table: &MappingTable) -> io::Result<()> {
	let sorted: BTreeMap<&String, &HashMap<String, String>> = table.rows.iter().collect();

	for (key, row) in sorted {
		writeln!(writer, "\t{key}")?;
		for column in table.columns.iter().skip(1) {
			if let Some(value) = row.get(column) {
				writeln!(writer, "\t\t{column}")?;
				writeln!(writer, "\t\t{value}")?;
			}
		}
	}

	Ok(())
}
