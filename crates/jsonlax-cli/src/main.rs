use std::fs::File;
use std::io::{stdin, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use jsonlax::ParseFlags;

#[derive(Parser, Debug)]
#[command(
    name = "jsonlax-cli",
    about = "Check tolerant JSON documents and convert them to standard JSON",
    version
)]
struct Args {
    /// Treat every extension as an error (default is tolerant parsing)
    #[arg(long)]
    strict: bool,

    /// Attach comments to the values they refer to
    #[arg(long)]
    store_comments: bool,

    /// Accept single-quoted hex byte buffers
    #[arg(long)]
    memory_buff: bool,

    /// Maximum number of reported errors and warnings
    #[arg(long, default_value_t = jsonlax::DEFAULT_MAX_ERRORS)]
    max_errors: usize,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Only check the document, do not print the parsed tree
    #[arg(long)]
    check: bool,

    /// Input file (defaults to stdin)
    input: Option<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut buf = String::new();
    match &args.input {
        Some(path) => {
            File::open(path)?.read_to_string(&mut buf)?;
        }
        None => {
            stdin().read_to_string(&mut buf)?;
        }
    }

    let mut flags = if args.strict {
        ParseFlags::STRICT
    } else {
        ParseFlags::TOLERANT
    };
    if args.store_comments {
        flags |= ParseFlags::ALLOW_COMMENTS | ParseFlags::STORE_COMMENTS;
    }
    if args.memory_buff {
        flags |= ParseFlags::MEMORYBUFF;
    }

    let mut parser = jsonlax::Parser::with_max_errors(flags, args.max_errors);
    let mut root = jsonlax::Value::new();
    let errors = parser.parse_str(&buf, &mut root);

    for warning in parser.warnings() {
        eprintln!("{warning}");
    }
    for error in parser.errors() {
        eprintln!("{error}");
    }

    if !args.check && root.is_valid() {
        let value = root.to_json();
        if args.pretty {
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!("{}", serde_json::to_string(&value)?);
        }
    }

    Ok(if errors > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
