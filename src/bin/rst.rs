//! Command-line interface for rst-nano
//! This binary lexes or parses reStructuredText files and prints the result in one of
//! the processor's output formats.
//!
//! Usage:
//!   rst process `<path>` [--format `<format>`]  - Process a file and output to stdout
//!   rst `<path>` [--format `<format>`]          - Same as process (default command)
//!   rst formats                               - List all available formats
//!
//! Log output is controlled with `RUST_LOG` (e.g. `RUST_LOG=debug`).

use clap::{Arg, ArgMatches, Command};
use rst_nano::rst::processor::{available_formats, process_file, ProcessingError, ProcessingSpec};

const DEFAULT_FORMAT: &str = "ast-treeviz";

fn path_arg() -> Arg {
    Arg::new("path")
        .help("Path to the rst file to process")
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .long("format")
        .short('f')
        .help("Output format (e.g., token-simple, ast-json, ast-treeviz)")
        .default_value(DEFAULT_FORMAT)
}

fn main() {
    env_logger::init();

    let matches = Command::new("rst")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for inspecting reStructuredText files")
        .subcommand_required(false)
        .arg_required_else_help(true)
        // Default command args
        .arg(path_arg())
        .arg(format_arg())
        .subcommand(
            Command::new("process")
                .about("Process a file and output to stdout (default command)")
                .arg(path_arg().required(true))
                .arg(format_arg()),
        )
        .subcommand(Command::new("formats").about("List all available output formats"))
        .get_matches();

    match matches.subcommand() {
        Some(("process", process_matches)) => handle_process_command(process_matches),
        Some(("formats", _)) => handle_formats_command(),
        _ => handle_process_command(&matches),
    }
}

/// Handle the process command
fn handle_process_command(matches: &ArgMatches) {
    let Some(path) = matches.get_one::<String>("path") else {
        eprintln!("Error: a path is required");
        std::process::exit(2);
    };
    let format = matches
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or(DEFAULT_FORMAT);

    match process(path, format) {
        Ok(output) => print!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            if matches!(
                e,
                ProcessingError::InvalidFormat(_)
                    | ProcessingError::InvalidStage(_)
                    | ProcessingError::InvalidFormatType(_)
            ) {
                eprintln!("\nAvailable formats:");
                for format in available_formats() {
                    eprintln!("  {}", format);
                }
            }
            std::process::exit(1);
        }
    }
}

fn process(path: &str, format: &str) -> Result<String, ProcessingError> {
    let spec = ProcessingSpec::from_string(format)?;
    process_file(path, &spec)
}

/// Handle the formats command
fn handle_formats_command() {
    println!("Available formats:");
    for format in available_formats() {
        println!("  {}", format);
    }
}
