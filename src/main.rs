use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt};

use demap_cli::Trie;
use demap_cli::config::{
	CONFIG_FILE_NAME, MergedConfig, discover_configs, generate_init_template, load_merged_config,
	user_config_path,
};
use demap_cli::decode::{Decoder, load_decoder};
use demap_cli::files::{ProcessOptions, ProcessReport, process_path};
use demap_cli::mappings::{load_table, write_dump};

#[derive(Parser)]
#[command(name = "demap")]
#[command(
	author,
	version,
	about = "CLI tool for decoding obfuscated identifiers with trie-compiled mapping tables"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .demap.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .demap.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Overwrite source files instead of writing decoded copies next to them
	#[arg(short = 'r', long)]
	in_place: bool,

	/// Decode the clipboard text and write it back
	#[arg(short = 'c', long, conflicts_with_all = ["paths", "in_place"])]
	clipboard: bool,

	/// Files or directories to decode. Reads stdin and writes stdout when omitted.
	paths: Vec<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Write an indented dump of each mapping table to <table>.log
	Print {
		/// Directory the dumps are written to
		#[arg(long, value_name = "DIR", default_value = ".")]
		out_dir: PathBuf,
	},
	/// Print the regex compiled from a set of literal strings
	Pattern {
		/// Literal strings to compile
		strings: Vec<String>,

		/// Compile the keys of a mapping table instead
		#[arg(long, value_enum, conflicts_with = "strings")]
		from: Option<Category>,

		/// Print the trie as an indented tree instead of a regex
		#[arg(long)]
		tree: bool,
	},
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display merged effective configuration with its sources
	Show,
	/// Check all config files for errors without decoding anything
	Validate,
}

#[derive(Clone, Copy, ValueEnum)]
enum Category {
	Fields,
	Methods,
}

fn init_logging() {
	let filter = EnvFilter::try_from_env("DEMAP_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

	fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn main() -> ExitCode {
	init_logging();

	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Print { out_dir } => handle_print(&out_dir),
			Commands::Pattern {
				strings,
				from,
				tree,
			} => handle_pattern(&strings, from, tree),
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(),
				ConfigAction::Validate => handle_config_validate(),
			},
		};
	}

	handle_decode(&cli.paths, cli.in_place, cli.clipboard)
}

fn current_config() -> Result<MergedConfig> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	load_merged_config(&cwd).context("Failed to load configuration")
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_decode(paths: &[PathBuf], in_place: bool, clipboard: bool) -> Result<ExitCode> {
	let config = current_config()?;
	let decoder = load_decoder(&config).context("Failed to load mapping tables")?;

	if clipboard {
		return handle_clipboard(&decoder);
	}

	if paths.is_empty() {
		let mut input = String::new();
		std::io::stdin()
			.read_to_string(&mut input)
			.context("Failed to read stdin")?;

		let (decoded, stats) = decoder.decode(&input);
		tracing::info!("stdin: {} replaced", stats.replaced);

		let mut stdout = std::io::stdout().lock();
		stdout
			.write_all(decoded.as_bytes())
			.and_then(|()| stdout.flush())
			.context("Failed to write stdout")?;
		return Ok(ExitCode::SUCCESS);
	}

	let options = ProcessOptions {
		extensions: config.extensions.clone(),
		in_place,
	};
	let mut report = ProcessReport::default();

	for path in paths {
		process_path(path, &decoder, &options, &mut report)
			.with_context(|| format!("Failed to process {}", path.display()))?;
	}

	for written in &report.written {
		println!("Wrote {}", written.display());
	}
	println!(
		"Decoded {} files ({} identifiers replaced, {} quoted left alone, {} paths skipped)",
		report.processed, report.stats.replaced, report.stats.skipped_quoted, report.skipped
	);

	Ok(ExitCode::SUCCESS)
}

#[cfg(feature = "clipboard")]
fn handle_clipboard(decoder: &Decoder) -> Result<ExitCode> {
	use demap_cli::clipboard::{SystemClipboard, decode_clipboard};

	let mut clipboard = SystemClipboard::new().context("Failed to open clipboard")?;
	let stats =
		decode_clipboard(&mut clipboard, decoder).context("Failed to decode clipboard")?;

	println!(
		"Processed clipboard ({} identifiers replaced, {} quoted left alone)",
		stats.replaced, stats.skipped_quoted
	);
	Ok(ExitCode::SUCCESS)
}

#[cfg(not(feature = "clipboard"))]
fn handle_clipboard(_decoder: &Decoder) -> Result<ExitCode> {
	anyhow::bail!("demap was built without the clipboard feature");
}

fn handle_print(out_dir: &Path) -> Result<ExitCode> {
	let config = current_config()?;

	for table_path in [&config.fields, &config.methods] {
		let table = load_table(table_path)?;

		let mut log_name = table_path.file_name().unwrap_or_default().to_os_string();
		log_name.push(".log");
		let log_path = out_dir.join(log_name);

		let file = std::fs::File::create(&log_path)
			.with_context(|| format!("Failed to create {}", log_path.display()))?;
		let mut writer = BufWriter::new(file);
		write_dump(&mut writer, &table)
			.and_then(|()| writer.flush())
			.with_context(|| format!("Failed to write {}", log_path.display()))?;

		println!("Written {}", log_path.display());
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_pattern(strings: &[String], from: Option<Category>, tree: bool) -> Result<ExitCode> {
	let trie: Trie = match from {
		Some(category) => {
			let config = current_config()?;
			let table_path = match category {
				Category::Fields => &config.fields,
				Category::Methods => &config.methods,
			};
			let table = load_table(table_path)?;
			table.keys().collect()
		}
		None => strings.iter().collect(),
	};

	if tree {
		println!("{}", trie.to_debug_tree());
	} else {
		println!("{trie}");
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show() -> Result<ExitCode> {
	let config = current_config()?;

	if config.sources.is_empty() {
		println!("No configuration files found, using defaults.\n");
	} else {
		println!("Configuration files (in cascade order):\n");
		for source in &config.sources {
			println!("# Source: {}", source.display());
		}
		println!();
	}

	println!("fields: {}", config.fields.display());
	println!("methods: {}", config.methods.display());
	println!("column: {}", config.column);
	println!("extensions: {}", config.extensions.join(", "));
	println!("skip-quoted: {}", config.skip_quoted);
	println!();

	if let Ok(user_path) = user_config_path() {
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate() -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match discover_configs(&cwd) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!("  {}", loaded.path.display());
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e}");
			Ok(ExitCode::FAILURE)
		}
	}
}
