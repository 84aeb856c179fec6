//! Demap - CLI tool for decoding obfuscated identifiers with mapping tables.
//!
//! This library provides the core functionality for demap, including:
//! - A prefix trie that compiles a set of literals into one compact regex
//! - Mapping table parsing from comma-delimited files
//! - Configuration file parsing and cascade discovery
//! - Identifier replacement over text, files, directory trees and the clipboard
//!
//! # Example
//!
//! ```no_run
//! use demap_cli::config::load_merged_config;
//! use demap_cli::decode::load_decoder;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let config = load_merged_config(&cwd).unwrap();
//! let decoder = load_decoder(&config).unwrap();
//!
//! let (decoded, stats) = decoder.decode("this.field_1234_a.func_5678_b();");
//! println!("{decoded} ({} replaced)", stats.replaced);
//! ```

pub mod clipboard;
pub mod config;
pub mod decode;
pub mod error;
pub mod files;
pub mod mappings;
pub mod trie;

pub use error::{DemapError, Result};
pub use trie::Trie;
