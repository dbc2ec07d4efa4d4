//! JSHAPE command-line interface.
//!
//! Wires the library modules together behind clap subcommands: flat and
//! hierarchical diffs of two documents, structural inspection and schema
//! graphs of one document, and a string-literal converter.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use jshape::{
    build_container_graph, build_inspect_tree, compute_diff_tree, compute_differences,
    filter_diffs, format_diff_tree, format_flat_diff, format_graph, format_inspect_tree,
    parse_file, parse_stdin, to_string_literal, FilterConfig, GraphOptions, JsonValue,
    OutputFormat, OutputOptions,
};
use std::path::{Path, PathBuf};
use std::process;

/// JSHAPE - Structural diff, inspection, and schema graphs for JSON
///
/// Compares, inspects, and summarizes JSON documents (YAML and TOML input
/// is accepted too). Diff commands exit 0 when the inputs match and 1 when
/// they differ.
#[derive(Parser)]
#[command(name = "jshape")]
#[command(version)]
#[command(about = "Structural diff, inspection, and schema graphs for JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "terminal", global = true)]
    format: OutputFormatArg,

    /// Maximum length for displayed values
    #[arg(long, default_value = "80", global = true)]
    max_value_length: usize,

    /// Verbose output (show parsing progress)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Flat per-path diff of two documents
    Diff {
        /// First document to compare ("-" for stdin)
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Second document to compare ("-" for stdin)
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Show only differing paths (hide same entries)
        #[arg(short, long, default_value = "true")]
        compact: bool,

        /// Ignore paths matching this glob pattern (repeatable)
        #[arg(long, value_name = "PATTERN")]
        ignore: Vec<String>,

        /// Show only paths matching this glob pattern (repeatable)
        #[arg(long, value_name = "PATTERN")]
        only: Vec<String>,
    },

    /// Hierarchical diff tree of two documents
    Tree {
        /// First document to compare ("-" for stdin)
        #[arg(value_name = "LEFT")]
        left: PathBuf,

        /// Second document to compare ("-" for stdin)
        #[arg(value_name = "RIGHT")]
        right: PathBuf,

        /// Show only differing subtrees (hide same entries)
        #[arg(short, long, default_value = "true")]
        compact: bool,
    },

    /// Inspect the structure of one document
    Inspect {
        /// Document to inspect ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Schema-level container graph of one document
    Graph {
        /// Document to summarize ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Maximum array elements sampled for schema inference
        #[arg(long, default_value = "100")]
        page_size: usize,
    },

    /// Emit the document's compact form as an escaped source string literal
    Literal {
        /// Document to convert ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormatArg {
    /// Colored terminal output
    Terminal,
    /// JSON representation
    Json,
    /// Plain text (no colors)
    Plain,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Terminal => OutputFormat::Terminal,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Plain => OutputFormat::Plain,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    let format: OutputFormat = cli.format.into();
    let verbose = cli.verbose;

    match cli.command {
        Command::Diff {
            left,
            right,
            compact,
            ignore,
            only,
        } => {
            let (a, b) = load_pair(&left, &right, verbose)?;
            let diffs = compute_differences(&a, &b);

            let mut filters = FilterConfig::new();
            for pattern in &ignore {
                filters = filters.ignore(pattern);
            }
            for pattern in &only {
                filters = filters.only(pattern);
            }
            let diffs = filter_diffs(&diffs, &filters);

            let options = OutputOptions {
                compact,
                max_value_length: cli.max_value_length,
            };
            let output = format_flat_diff(&diffs, &format, &options)
                .context("Failed to format diff output")?;
            println!("{}", output);

            Ok(exit_code_for(diffs.iter().any(|d| !d.same)))
        }

        Command::Tree {
            left,
            right,
            compact,
        } => {
            let (a, b) = load_pair(&left, &right, verbose)?;
            let root = compute_diff_tree(Some(&a), Some(&b));

            let options = OutputOptions {
                compact,
                max_value_length: cli.max_value_length,
            };
            let output = format_diff_tree(&root, &format, &options)
                .context("Failed to format diff tree output")?;
            println!("{}", output);

            Ok(exit_code_for(!root.is_clean()))
        }

        Command::Inspect { input } => {
            let value = load(&input, verbose)?;
            if verbose {
                eprintln!("Approximate size: {} bytes", value.size());
            }
            let root = build_inspect_tree(&value);

            let options = OutputOptions {
                compact: false,
                max_value_length: cli.max_value_length,
            };
            let output = format_inspect_tree(&root, &format, &options)
                .context("Failed to format inspection output")?;
            println!("{}", output);
            Ok(0)
        }

        Command::Graph { input, page_size } => {
            let value = load(&input, verbose)?;
            let graph = build_container_graph(&value, &GraphOptions { page_size });

            let output =
                format_graph(&graph, &format).context("Failed to format graph output")?;
            println!("{}", output);
            Ok(0)
        }

        Command::Literal { input } => {
            let value = load(&input, verbose)?;
            println!("{}", to_string_literal(&value));
            Ok(0)
        }
    }
}

fn load_pair(left: &Path, right: &Path, verbose: bool) -> Result<(JsonValue, JsonValue)> {
    let a = load(left, verbose)
        .with_context(|| format!("Failed to parse first input: {}", left.display()))?;
    let b = load(right, verbose)
        .with_context(|| format!("Failed to parse second input: {}", right.display()))?;
    Ok((a, b))
}

fn load(path: &Path, verbose: bool) -> Result<JsonValue> {
    if verbose {
        eprintln!("Parsing {}...", path.display());
    }
    let value = if path.as_os_str() == "-" {
        parse_stdin()?
    } else {
        parse_file(path)?
    };
    Ok(value)
}

fn exit_code_for(has_differences: bool) -> i32 {
    if has_differences {
        1
    } else {
        0
    }
}
