//! CLI tool to validate, format and inspect placeholder JSON documents.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use placeholder_json::{Error, Identifier, Node, Value};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Treat `$` as ordinary text instead of a placeholder
    #[arg(long, global = true)]
    no_placeholders: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Check if document(s) are valid
    Validate(Files),

    /// Print document(s) back to stdout
    Fmt(FmtArgs),

    /// Check if document(s) are already formatted
    Check(CheckArgs),

    /// List the placeholder names referenced by document(s)
    Placeholders(Files),

    /// Convert document(s) to plain JSON
    Json(Files),
}

#[derive(Args)]
struct Files {
    /// Input files
    #[arg(required = true)]
    files: Vec<String>,
}

#[derive(Args)]
struct FmtArgs {
    /// Indent nested values
    #[arg(long)]
    pretty: bool,

    /// Resolve placeholder NAME to VALUE
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(Identifier, String)>,

    #[command(flatten)]
    input: Files,
}

#[derive(Args)]
struct CheckArgs {
    /// Compare against pretty output
    #[arg(long)]
    pretty: bool,

    #[command(flatten)]
    input: Files,
}

fn parse_binding(arg: &str) -> Result<(Identifier, String), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{arg}'"))?;
    let name = Identifier::new(name).map_err(|e| e.to_string())?;
    Ok((name, value.to_string()))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let placeholders = !cli.no_placeholders;

    let files = match &cli.command {
        Commands::Validate(input) | Commands::Placeholders(input) | Commands::Json(input) => {
            &input.files
        }
        Commands::Fmt(args) => &args.input.files,
        Commands::Check(args) => &args.input.files,
    };

    let mut had_error = false;

    for path in files {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };
        debug!(path = %path, chars = content.chars().count(), "read input");

        let node = match placeholder_json::parse_with(&content, placeholders) {
            Ok(node) => node,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let result = match &cli.command {
            Commands::Validate(_) => {
                eprintln!("{path}: valid ({} member(s))", node.child_count());
                Ok(true)
            }
            Commands::Fmt(args) => format_node(&node, args),
            Commands::Check(args) => check_node(path, &content, &node, args.pretty),
            Commands::Placeholders(_) => list_placeholders(&node),
            Commands::Json(_) => print_json(&node),
        };

        match result {
            Ok(true) => {}
            Ok(false) => had_error = true,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn format_node(node: &Node, args: &FmtArgs) -> Result<bool, Error> {
    let bindings: HashMap<&Identifier, &str> = args
        .bindings
        .iter()
        .map(|(name, value)| (name, value.as_str()))
        .collect();
    let output = placeholder_json::print(node, args.pretty, |name| {
        bindings.get(name).map(|value| (*value).to_string())
    })?;
    println!("{output}");
    Ok(true)
}

fn check_node(path: &str, content: &str, node: &Node, pretty: bool) -> Result<bool, Error> {
    let formatted = placeholder_json::print(node, pretty, |_| None)?;
    let original = content.strip_suffix('\n').unwrap_or(content);
    if formatted == original {
        eprintln!("{path}: formatted");
        Ok(true)
    } else {
        eprintln!("{path}: not formatted");
        Ok(false)
    }
}

fn list_placeholders(node: &Node) -> Result<bool, Error> {
    let names: BTreeSet<Identifier> = node.placeholder_names()?;
    for name in names {
        println!("{name}");
    }
    Ok(true)
}

fn print_json(node: &Node) -> Result<bool, Error> {
    let value: Value = placeholder_json::to_value(node)?;
    let json = serde_json::Value::from(value);
    match serde_json::to_string_pretty(&json) {
        Ok(text) => {
            println!("{text}");
            Ok(true)
        }
        Err(e) => {
            warn!(error = %e, "serialization failed");
            Ok(false)
        }
    }
}
