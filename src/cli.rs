//! Command-line arguments for the `rip` binary.
//!
//! Schemas are never read from disk; they are built from `--field`
//! arguments on each invocation.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::{Result, RipError};
use crate::field::FieldSchema;
use crate::ripper::RippedFile;
use crate::schema::FileSchema;

/// Extract records from a flat file and print them as JSON lines.
#[derive(Debug, Parser)]
#[command(name = "rip")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub layout: Layout,

    /// Write output to file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<PathBuf>,

    /// Log extraction details on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// File layouts.
#[derive(Debug, Subcommand)]
pub enum Layout {
    /// Delimiter-separated lines, fields as NAME:POSITION
    Delimited {
        /// Input file
        input: PathBuf,

        /// Field delimiter (`\t` for tab)
        #[arg(short, long)]
        delimiter: String,

        /// First line is a header
        #[arg(long)]
        header: bool,

        /// Field specification, repeatable
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,
    },

    /// Fixed-width lines, fields as NAME:START:LENGTH
    FixedWidth {
        /// Input file
        input: PathBuf,

        /// First line is a header
        #[arg(long)]
        header: bool,

        /// Field specification, repeatable
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,
    },

    /// XML document, fields as NAME or NAME=NODE
    Xml {
        /// Input file
        input: PathBuf,

        /// Name of the record element
        #[arg(short, long)]
        record: String,

        /// Field specification, repeatable
        #[arg(short, long = "field", required = true)]
        fields: Vec<String>,
    },
}

impl Cli {
    pub fn input(&self) -> &Path {
        match &self.layout {
            Layout::Delimited { input, .. }
            | Layout::FixedWidth { input, .. }
            | Layout::Xml { input, .. } => input,
        }
    }

    /// Build the schema described by the arguments.
    pub fn schema(&self) -> Result<FileSchema> {
        match &self.layout {
            Layout::Delimited {
                delimiter,
                header,
                fields,
                ..
            } => {
                let delimiter = match delimiter.as_str() {
                    "\\t" => "\t",
                    other => other,
                };
                let mut schema = FileSchema::delimited(delimiter, *header)?;
                for spec in fields {
                    schema.add_field(parse_delimited_field(spec)?)?;
                }
                Ok(schema)
            }
            Layout::FixedWidth { header, fields, .. } => {
                let mut schema = FileSchema::fixed_width(*header);
                for spec in fields {
                    schema.add_field(parse_fixed_width_field(spec)?)?;
                }
                Ok(schema)
            }
            Layout::Xml { record, fields, .. } => {
                let mut schema = FileSchema::xml(record.as_str())?;
                for spec in fields {
                    schema.add_field(parse_xml_field(spec)?)?;
                }
                Ok(schema)
            }
        }
    }
}

fn bad_spec(spec: &str, expected: &str) -> RipError {
    RipError::Config(format!("invalid field '{spec}', expected {expected}"))
}

fn parse_number(value: &str, spec: &str, expected: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| bad_spec(spec, expected))
}

/// Parse `NAME:POSITION`.
pub fn parse_delimited_field(spec: &str) -> Result<FieldSchema> {
    const EXPECTED: &str = "NAME:POSITION";
    let (name, position) = spec.rsplit_once(':').ok_or_else(|| bad_spec(spec, EXPECTED))?;
    if name.is_empty() {
        return Err(bad_spec(spec, EXPECTED));
    }
    Ok(FieldSchema::delimited(
        name,
        parse_number(position, spec, EXPECTED)?,
    ))
}

/// Parse `NAME:START:LENGTH`.
pub fn parse_fixed_width_field(spec: &str) -> Result<FieldSchema> {
    const EXPECTED: &str = "NAME:START:LENGTH";
    let (rest, length) = spec.rsplit_once(':').ok_or_else(|| bad_spec(spec, EXPECTED))?;
    let (name, start) = rest.rsplit_once(':').ok_or_else(|| bad_spec(spec, EXPECTED))?;
    if name.is_empty() {
        return Err(bad_spec(spec, EXPECTED));
    }
    Ok(FieldSchema::fixed_width(
        name,
        parse_number(start, spec, EXPECTED)?,
        parse_number(length, spec, EXPECTED)?,
    ))
}

/// Parse `NAME` or `NAME=NODE`.
pub fn parse_xml_field(spec: &str) -> Result<FieldSchema> {
    let (name, node) = match spec.split_once('=') {
        Some((name, node)) => (name, Some(node)),
        None => (spec, None),
    };
    if name.is_empty() {
        return Err(bad_spec(spec, "NAME or NAME=NODE"));
    }
    Ok(FieldSchema::xml(name, node))
}

/// Render rows as newline-separated JSON objects.
pub fn render_json_lines(ripped: &RippedFile) -> Result<String> {
    let lines = ripped
        .iter()
        .map(serde_json::to_string)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(lines.join("\n"))
}
