//! Command-line interface for pipe2xml
//!
//! Usage:
//!   pipe2xml                          - Convert the built-in sample data to stdout
//!   pipe2xml `<input>`                  - Convert a file to stdout (`-` reads stdin)
//!   pipe2xml `<input>` `<output>`         - Convert a file into another file
//!
//! Options: --allow-duplicates, --charset, --indent, --root, --declaration,
//! --config `<json>`, -v (repeatable).

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pipe2xml::{convert, ConvertOptions, Summary, SAMPLE_INPUT};
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convert pipe-delimited person records to XML",
    long_about = None
)]
struct Cli {
    /// Input file; `-` for stdin. Without it the built-in sample data is used
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output file; `-` or nothing for stdout
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Let a later address or phone row replace an earlier one instead of failing
    #[arg(long, short = 'd')]
    allow_duplicates: bool,

    /// Charset of input and output (e.g. utf-8, iso-8859-1, windows-1252)
    #[arg(long, value_name = "LABEL")]
    charset: Option<String>,

    /// Spaces per indentation level
    #[arg(long, value_name = "N")]
    indent: Option<usize>,

    /// Name of the root element
    #[arg(long, value_name = "NAME")]
    root: Option<String>,

    /// Write an XML declaration before the root element
    #[arg(long)]
    declaration: bool,

    /// JSON options file; flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            log::info!(
                "Converted {} lines into {} persons",
                summary.lines,
                summary.persons
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<pipe2xml::Error>() {
                Some(conversion_error) => eprintln!("{}", conversion_error),
                None => eprintln!("Error: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> Result<Summary> {
    let options = build_options(cli)?;
    log::debug!("Options: {:?}", options);

    let input: Box<dyn Read> = match &cli.input {
        Some(path) if is_stdio(path) => Box::new(io::stdin().lock()),
        Some(path) => Box::new(
            File::open(path)
                .with_context(|| format!("Input file not found: {}", path.display()))?,
        ),
        None => {
            eprintln!("Using test data as input:\n{}\n", SAMPLE_INPUT);
            Box::new(Cursor::new(SAMPLE_INPUT))
        }
    };

    let output: Box<dyn Write> = match &cli.output {
        Some(path) if !is_stdio(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Cannot create output file: {}", path.display()))?,
        )),
        _ => Box::new(BufWriter::new(io::stdout().lock())),
    };

    Ok(convert(input, output, &options)?)
}

fn build_options(cli: &Cli) -> Result<ConvertOptions> {
    let mut options = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Cannot read config file: {}", path.display()))?;
            ConvertOptions::from_json(&json)?
        }
        None => ConvertOptions::default(),
    };

    if cli.allow_duplicates {
        options = options.with_allow_duplicate_info(true);
    }
    if let Some(label) = &cli.charset {
        options = options.with_charset(label)?;
    }
    if let Some(indent) = cli.indent {
        options = options.with_indent(indent);
    }
    if let Some(root) = &cli.root {
        options = options.with_root(root.as_str());
    }
    if cli.declaration {
        options = options.with_declaration(true);
    }

    options.validate()?;
    Ok(options)
}

fn is_stdio(path: &Path) -> bool {
    path.as_os_str() == "-"
}
