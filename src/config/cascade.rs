use crate::config::parser::parse_config_file;
use crate::config::types::{CONFIG_FILE_NAME, LoadedConfig, MergedConfig};
use crate::error::{DemapError, Result};
use std::path::{Path, PathBuf};

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.demap.toml`
/// 2. Continue up the directory tree until a config with `root = true`
/// 3. Finally, check ~/.demap.toml
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.exists() {
			let config = parse_config_file(&config_path)?;
			let stop = config.root;
			tracing::debug!("Loaded config {}", config_path.display());

			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if stop {
				break;
			}
		}

		current_dir = dir.parent();
	}

	if let Some(home_dir) = dirs::home_dir() {
		let user_path = home_dir.join(CONFIG_FILE_NAME);
		let already_loaded = configs.iter().any(|loaded| loaded.path == user_path);
		if user_path.exists() && !already_loaded {
			let config = parse_config_file(&user_path)?;
			tracing::debug!("Loaded user config {}", user_path.display());
			configs.push(LoadedConfig {
				config,
				path: user_path,
			});
		}
	}

	Ok(configs)
}

/// Merge configs into effective settings.
///
/// For every setting the most specific config that sets it wins. Mapping
/// paths are resolved against the directory of the config that set them.
pub fn merge_configs(configs: &[LoadedConfig], start_dir: &Path) -> MergedConfig {
	let mut merged = MergedConfig::defaults(start_dir);
	let mut fields = None;
	let mut methods = None;
	let mut column = None;
	let mut extensions = None;
	let mut skip_quoted = None;

	for loaded in configs {
		let base = loaded.path.parent().unwrap_or(start_dir);
		let config = &loaded.config;

		if fields.is_none() {
			fields = config.fields.as_ref().map(|p| base.join(p));
		}
		if methods.is_none() {
			methods = config.methods.as_ref().map(|p| base.join(p));
		}
		if column.is_none() {
			column = config.column.clone();
		}
		if extensions.is_none() {
			extensions = config.extensions.clone();
		}
		if skip_quoted.is_none() {
			skip_quoted = config.skip_quoted;
		}

		merged.sources.push(loaded.path.clone());
	}

	if let Some(fields) = fields {
		merged.fields = fields;
	}
	if let Some(methods) = methods {
		merged.methods = methods;
	}
	if let Some(column) = column {
		merged.column = column;
	}
	if let Some(extensions) = extensions {
		merged.extensions = extensions
			.into_iter()
			.map(|ext| ext.trim_start_matches('.').to_string())
			.collect();
	}
	if let Some(skip_quoted) = skip_quoted {
		merged.skip_quoted = skip_quoted;
	}

	merged
}

/// Convenience function to discover, load, and merge configs from a directory.
pub fn load_merged_config(start_dir: &Path) -> Result<MergedConfig> {
	let configs = discover_configs(start_dir)?;
	Ok(merge_configs(&configs, start_dir))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(DemapError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::Config;
	use std::fs;

	fn loaded(path: &str, config: Config) -> LoadedConfig {
		LoadedConfig {
			config,
			path: PathBuf::from(path),
		}
	}

	#[test]
	fn test_merge_no_configs_uses_defaults() {
		let merged = merge_configs(&[], Path::new("/work"));
		assert_eq!(merged, MergedConfig::defaults(Path::new("/work")));
		assert_eq!(merged.fields, PathBuf::from("/work/fields.csv"));
		assert_eq!(merged.column, "name");
		assert_eq!(merged.extensions, vec!["java"]);
		assert!(merged.skip_quoted);
	}

	#[test]
	fn test_merge_most_specific_wins() {
		let configs = vec![
			loaded(
				"/work/project/.demap.toml",
				Config {
					column: Some("desc".to_string()),
					..Default::default()
				},
			),
			loaded(
				"/work/.demap.toml",
				Config {
					column: Some("name".to_string()),
					fields: Some(PathBuf::from("maps/fields.csv")),
					skip_quoted: Some(false),
					..Default::default()
				},
			),
		];

		let merged = merge_configs(&configs, Path::new("/work/project"));
		assert_eq!(merged.column, "desc");
		assert_eq!(merged.fields, PathBuf::from("/work/maps/fields.csv"));
		assert_eq!(merged.methods, PathBuf::from("/work/project/methods.csv"));
		assert!(!merged.skip_quoted);
		assert_eq!(merged.sources.len(), 2);
	}

	#[test]
	fn test_merge_strips_extension_dots() {
		let configs = vec![loaded(
			"/work/.demap.toml",
			Config {
				extensions: Some(vec![".java".to_string(), "kt".to_string()]),
				..Default::default()
			},
		)];

		let merged = merge_configs(&configs, Path::new("/work"));
		assert_eq!(merged.extensions, vec!["java", "kt"]);
	}

	#[test]
	fn test_discover_stops_at_root() {
		let temp_dir = tempfile::tempdir().unwrap();
		let nested = temp_dir.path().join("a").join("b");
		fs::create_dir_all(&nested).unwrap();

		fs::write(temp_dir.path().join(CONFIG_FILE_NAME), "column = \"outer\"").unwrap();
		fs::write(
			temp_dir.path().join("a").join(CONFIG_FILE_NAME),
			"root = true\ncolumn = \"inner\"",
		)
		.unwrap();

		let configs = discover_configs(&nested).unwrap();
		let project: Vec<_> = configs
			.iter()
			.filter(|loaded| loaded.path.starts_with(temp_dir.path()))
			.collect();
		assert_eq!(project.len(), 1);
		assert_eq!(project[0].config.column, Some("inner".to_string()));
	}

	#[test]
	fn test_user_config_path() {
		let path = user_config_path();
		assert!(path.is_ok());
		let path = path.unwrap();
		assert!(path.ends_with(".demap.toml"));
	}
}
