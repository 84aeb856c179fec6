//! Source file processing for demap.
//!
//! This module handles:
//! - Walking directories in a stable order without following symlinks
//! - Decoding files with a configured extension
//! - Choosing where decoded output is written

use crate::decode::{DecodeStats, Decoder};
use crate::error::{DemapError, Result};
use ignore::WalkBuilder;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// How files are selected and written.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
	/// Extensions to decode, without the leading dot.
	pub extensions: Vec<String>,

	/// Overwrite sources instead of writing next to them.
	pub in_place: bool,
}

/// Outcome of processing one or more paths.
#[derive(Debug, Clone, Default)]
pub struct ProcessReport {
	/// Files decoded.
	pub processed: usize,

	/// Paths skipped because they are not matching files.
	pub skipped: usize,

	/// Files written, in processing order.
	pub written: Vec<PathBuf>,

	/// Replacement counts across all files.
	pub stats: DecodeStats,
}

/// Decode a file, or every matching file below a directory.
///
/// Directories are walked in path order. Symlinks are never followed and
/// count as skipped, as does anything without a configured extension.
/// Every entry is listed before the first output is written, so decoded
/// copies are not picked up by the same walk.
pub fn process_path(
	path: &Path,
	decoder: &Decoder,
	options: &ProcessOptions,
	report: &mut ProcessReport,
) -> Result<()> {
	for file in collect_files(path, options, report) {
		decode_file(&file, decoder, options, report)?;
	}
	Ok(())
}

/// Files below `path` that should be decoded, in walk order.
fn collect_files(
	path: &Path,
	options: &ProcessOptions,
	report: &mut ProcessReport,
) -> Vec<PathBuf> {
	if path.symlink_metadata().is_err() {
		tracing::warn!("Skipping {}", path.display());
		report.skipped += 1;
		return Vec::new();
	}

	let walker = WalkBuilder::new(path)
		.standard_filters(false)
		.follow_links(false)
		.sort_by_file_path(|a, b| a.cmp(b))
		.build();

	let mut files = Vec::new();
	for result in walker {
		let entry = match result {
			Ok(entry) => entry,
			Err(err) => {
				tracing::warn!("Walk error: {}", err);
				report.skipped += 1;
				continue;
			}
		};

		let file_type = entry.file_type();
		if file_type.is_some_and(|ft| ft.is_dir()) {
			tracing::info!("Recursing into {}", entry.path().display());
		} else if file_type.is_some_and(|ft| ft.is_file())
			&& has_extension(entry.path(), &options.extensions)
		{
			files.push(entry.into_path());
		} else {
			tracing::warn!("Skipping {}", entry.path().display());
			report.skipped += 1;
		}
	}
	files
}

fn decode_file(
	path: &Path,
	decoder: &Decoder,
	options: &ProcessOptions,
	report: &mut ProcessReport,
) -> Result<()> {
	tracing::info!("Processing {}", path.display());
	let document = std::fs::read_to_string(path).map_err(|source| DemapError::SourceRead {
		path: path.to_path_buf(),
		source,
	})?;

	let (decoded, stats) = decoder.decode(&document);
	let target = if options.in_place {
		path.to_path_buf()
	} else {
		sibling_output_path(path)
	};

	std::fs::write(&target, decoded).map_err(|source| DemapError::SourceWrite {
		path: target.clone(),
		source,
	})?;

	tracing::debug!(
		"{}: {} replaced, {} quoted skipped",
		target.display(),
		stats.replaced,
		stats.skipped_quoted
	);
	report.processed += 1;
	report.stats += stats;
	report.written.push(target);
	Ok(())
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
	path.extension()
		.and_then(|ext| ext.to_str())
		.is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// First free path made by adding dots before the extension.
///
/// `Foo.java` becomes `Foo..java`, then `Foo...java`, and so on.
pub fn sibling_output_path(path: &Path) -> PathBuf {
	let mut target = path.to_path_buf();
	while target.exists() {
		target = add_dot(&target);
	}
	target
}

fn add_dot(path: &Path) -> PathBuf {
	let mut name = OsString::new();
	match (path.file_stem(), path.extension()) {
		(Some(stem), Some(ext)) => {
			name.push(stem);
			name.push("..");
			name.push(ext);
		}
		_ => {
			name.push(path.file_name().unwrap_or_default());
			name.push(".");
		}
	}
	path.with_file_name(name)
}
