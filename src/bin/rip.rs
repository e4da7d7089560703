//! CLI tool to extract records from a delimited, fixed-width or XML file.
//!
//! Usage:
//!   rip delimited people.csv --delimiter , --header -f name:0 -f age:1
//!   rip fixed-width people.dat -f name:0:10 -f age:10:3 -o out.jsonl
//!   rip xml people.xml --record person -f name=personName
//!
//! Each record is written as one JSON object per line.

use clap::Parser;
use file_ripper::cli::{Cli, render_json_lines};
use file_ripper::rip_file;
use std::fs;
use std::io::{self, Write};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let schema = match cli.schema() {
        Ok(schema) => schema,
        Err(e) => {
            eprintln!("Error building schema: {e}");
            process::exit(1);
        }
    };

    let ripped = match rip_file(cli.input(), &schema) {
        Ok(ripped) => ripped,
        Err(e) => {
            eprintln!("Error ripping '{}': {e}", cli.input().display());
            process::exit(1);
        }
    };

    let output = match render_json_lines(&ripped) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("Error rendering output: {e}");
            process::exit(1);
        }
    };

    if let Some(out_path) = &cli.output {
        if let Some(parent) = out_path.parent()
            && !parent.as_os_str().is_empty()
            && fs::create_dir_all(parent).is_err()
        {
            eprintln!("Error creating output directory for '{}'", out_path.display());
            process::exit(1);
        }
        if let Err(e) = fs::write(out_path, format!("{output}\n")) {
            eprintln!("Error writing output file '{}': {e}", out_path.display());
            process::exit(1);
        }
    } else {
        if let Err(e) = io::stdout().write_all(output.as_bytes()) {
            eprintln!("Error writing output: {e}");
            process::exit(1);
        }
        if !output.is_empty() {
            println!();
        }
    }

    if cli.verbose {
        eprintln!("Records:  {} from {}", ripped.len(), ripped.source);
    }
}
