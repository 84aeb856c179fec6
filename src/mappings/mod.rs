//! Mapping table loading for demap.
//!
//! This module handles:
//! - Tokenizing comma-delimited lines with quoted fields
//! - Building key-to-columns tables from a header row
//! - Dumping tables in an indented text form

pub mod parser;
pub mod table;

pub use parser::{load_table, parse_table_str, split_line};
pub use table::{MappingTable, write_dump};
