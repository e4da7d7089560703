//! # file-ripper
//!
//! Schema-driven record extraction for flat files.
//!
//! A [`FileSchema`] describes one file layout (delimited text, fixed-width
//! text or XML) as an ordered list of [`FieldSchema`] entries. Ripping a
//! file turns each record into a [`Row`] mapping field names to the
//! extracted strings.
//!
//! ## Overview
//!
//! - **Delimited**: each line is split on a literal delimiter and fields
//!   are picked by token position
//! - **Fixed-width**: each line is sliced by character offset and trimmed
//! - **XML**: every record element below the document element becomes a
//!   row, with fields read from its child elements
//!
//! ## Example
//!
//! ```
//! use file_ripper::{FieldSchema, FileSchema, rip};
//!
//! let mut schema = FileSchema::delimited(",", true)?;
//! schema.add_fields(vec![
//!     FieldSchema::delimited("name", 0),
//!     FieldSchema::delimited("age", 1),
//!     FieldSchema::delimited("dob", 2),
//! ])?;
//!
//! let ripped = rip("people.csv", "name,age,dob\nAaron,43,09/04/1980", &schema)?;
//!
//! assert_eq!(ripped.source, "people.csv");
//! assert_eq!(ripped.rows[0].value("age"), Some("43"));
//! # Ok::<(), file_ripper::RipError>(())
//! ```

pub mod cli;
pub mod error;
pub mod extractor;
pub mod field;
pub mod ripper;
pub mod row;
pub mod schema;
pub mod xml;

pub use error::{Result, RipError};
pub use extractor::{
    DelimitedExtractor, FixedWidthExtractor, LineExtractor, RecordExtractor, extract_lines,
    extractor_for,
};
pub use field::{FieldSchema, FileKind};
pub use ripper::{RippedFile, process, rip, rip_file, rip_reader, rip_with};
pub use row::Row;
pub use schema::FileSchema;
pub use xml::XmlExtractor;
