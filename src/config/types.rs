use crate::error::DemapError;
use serde::Deserialize;
use std::path::PathBuf;

/// Name of the config file looked up in each directory.
pub const CONFIG_FILE_NAME: &str = ".demap.toml";

/// Column holding the replacement name when no config sets one.
pub const DEFAULT_COLUMN: &str = "name";

/// Source file extension processed when no config sets any.
pub const DEFAULT_EXTENSION: &str = "java";

pub const DEFAULT_FIELDS_FILE: &str = "fields.csv";
pub const DEFAULT_METHODS_FILE: &str = "methods.csv";

/// Top-level configuration from a `.demap.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop walking up parent directories after this file.
	#[serde(default)]
	pub root: bool,

	/// Field mapping table, relative to the config file.
	pub fields: Option<PathBuf>,

	/// Method mapping table, relative to the config file.
	pub methods: Option<PathBuf>,

	/// Mapping column used as the replacement value.
	pub column: Option<String>,

	/// Source file extensions to process, without the leading dot.
	pub extensions: Option<Vec<String>>,

	/// Leave tokens directly preceded by `"` untouched.
	pub skip_quoted: Option<bool>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Effective settings after merging the cascade and applying defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfig {
	pub fields: PathBuf,
	pub methods: PathBuf,
	pub column: String,
	pub extensions: Vec<String>,
	pub skip_quoted: bool,

	/// Config files that contributed, most specific first.
	pub sources: Vec<PathBuf>,
}

impl MergedConfig {
	/// Defaults for a run started in `start_dir` with no config files.
	pub fn defaults(start_dir: &std::path::Path) -> Self {
		MergedConfig {
			fields: start_dir.join(DEFAULT_FIELDS_FILE),
			methods: start_dir.join(DEFAULT_METHODS_FILE),
			column: DEFAULT_COLUMN.to_string(),
			extensions: vec![DEFAULT_EXTENSION.to_string()],
			skip_quoted: true,
			sources: Vec::new(),
		}
	}
}

impl Config {
	/// Reject values that would make every run a no-op.
	pub fn validate(&self) -> Result<(), DemapError> {
		if let Some(ref column) = self.column
			&& column.trim().is_empty()
		{
			return Err(DemapError::InvalidConfig {
				key: "column".to_string(),
				reason: "must not be empty".to_string(),
			});
		}

		if let Some(ref extensions) = self.extensions
			&& extensions.iter().any(|ext| ext.trim_start_matches('.').is_empty())
		{
			return Err(DemapError::InvalidConfig {
				key: "extensions".to_string(),
				reason: "entries must not be empty".to_string(),
			});
		}

		Ok(())
	}
}
