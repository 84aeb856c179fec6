use std::path::PathBuf;

/// Library-level structured errors for demap.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum DemapError {
	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Invalid config value for {key}: {reason}")]
	InvalidConfig { key: String, reason: String },

	#[error("Mapping file not found: {path}")]
	MappingNotFound { path: PathBuf },

	#[error("Failed to read mapping file: {path}")]
	MappingRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Mapping {category} has no column named {column}")]
	MissingColumn { category: String, column: String },

	#[error("Invalid regex pattern for {category}")]
	InvalidRegex {
		category: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to read source file: {path}")]
	SourceRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output file: {path}")]
	SourceWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Clipboard unavailable")]
	Clipboard {
		#[source]
		source: Box<dyn std::error::Error + Send + Sync>,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using DemapError.
pub type Result<T> = std::result::Result<T, DemapError>;
