//! Record extractors and the dispatch from file kind to extractor.
//!
//! Every extractor reads one [`FileSchema`] by reference and turns raw
//! content into one [`Row`] per record. The flat kinds (delimited and
//! fixed-width) share the line splitting in [`extract_lines`]; XML works on
//! the whole document, see [`crate::xml`].

use tracing::{debug, warn};

use crate::error::{Result, RipError};
use crate::field::{FieldSchema, FileKind};
use crate::row::Row;
use crate::schema::FileSchema;
use crate::xml::XmlExtractor;

/// Turns raw file content into rows.
pub trait RecordExtractor {
    /// Extract every record in `content`, in source order.
    fn extract_all(&self, content: &str) -> Result<Vec<Row>>;

    /// The display name of this extractor.
    fn name(&self) -> &str;
}

/// An extractor for line-oriented files, where each line is one record.
pub trait LineExtractor {
    /// Extract a single line.
    fn extract_line(&self, line: &str) -> Result<Row>;
}

/// Split `content` into lines, drop the header line if there is one, and
/// extract the rest in order.
///
/// Data errors are prefixed with the 1-based line number.
pub fn extract_lines<E>(extractor: &E, content: &str, has_header: bool) -> Result<Vec<Row>>
where
    E: LineExtractor + ?Sized,
{
    if has_header {
        debug!("discarding header line");
    }

    content
        .lines()
        .enumerate()
        .skip(usize::from(has_header))
        .map(|(idx, line)| {
            extractor.extract_line(line).map_err(|e| match e {
                RipError::Data(msg) => RipError::data(format!("line {}: {msg}", idx + 1)),
                other => other,
            })
        })
        .collect()
}

/// Pick the extractor matching the schema's kind.
pub fn extractor_for(schema: &FileSchema) -> Result<Box<dyn RecordExtractor + '_>> {
    debug!(kind = %schema.kind(), fields = schema.fields().len(), "selecting extractor");
    if schema.fields().is_empty() {
        warn!(kind = %schema.kind(), "schema has no fields, every row will be empty");
    }
    let extractor: Box<dyn RecordExtractor + '_> = match schema.kind() {
        FileKind::Delimited => Box::new(DelimitedExtractor::new(schema)?),
        FileKind::FixedWidth => Box::new(FixedWidthExtractor::new(schema)?),
        FileKind::Xml => Box::new(XmlExtractor::new(schema)?),
    };
    Ok(extractor)
}

pub(crate) fn wrong_kind(extractor: &str, schema: &FileSchema) -> RipError {
    RipError::Config(format!(
        "{extractor} extractor cannot read a {} schema",
        schema.kind()
    ))
}

// ---------------------------------------------------------------------------
// Extractor implementations
// ---------------------------------------------------------------------------

/// Splits each line on a literal delimiter and picks tokens by position.
#[derive(Debug)]
pub struct DelimitedExtractor<'a> {
    schema: &'a FileSchema,
    delimiter: &'a str,
}

impl<'a> DelimitedExtractor<'a> {
    pub fn new(schema: &'a FileSchema) -> Result<Self> {
        match schema.delimiter() {
            Some(delimiter) => Ok(Self { schema, delimiter }),
            None => Err(wrong_kind("delimited", schema)),
        }
    }
}

impl LineExtractor for DelimitedExtractor<'_> {
    fn extract_line(&self, line: &str) -> Result<Row> {
        let tokens: Vec<&str> = line.split(self.delimiter).collect();
        let mut row = Row::with_capacity(self.schema.fields().len());

        for field in self.schema.fields() {
            if let FieldSchema::Delimited {
                field_name,
                position,
            } = field
            {
                let token = tokens.get(*position).ok_or_else(|| {
                    RipError::data(format!(
                        "field '{field_name}' is at position {position} but the record has {} tokens",
                        tokens.len()
                    ))
                })?;
                row.insert(field_name.as_str(), Some(token.to_string()));
            }
        }

        Ok(row)
    }
}

impl RecordExtractor for DelimitedExtractor<'_> {
    fn extract_all(&self, content: &str) -> Result<Vec<Row>> {
        extract_lines(self, content, self.schema.has_header())
    }

    fn name(&self) -> &str {
        "delimited"
    }
}

/// Slices each line by character offsets and trims the result.
#[derive(Debug)]
pub struct FixedWidthExtractor<'a> {
    schema: &'a FileSchema,
}

impl<'a> FixedWidthExtractor<'a> {
    pub fn new(schema: &'a FileSchema) -> Result<Self> {
        if schema.kind() != FileKind::FixedWidth {
            return Err(wrong_kind("fixed-width", schema));
        }
        Ok(Self { schema })
    }
}

/// The `length` characters of `line` starting at character `start`, or
/// `None` if that range runs past the end.
fn char_slice(line: &str, start: usize, length: usize) -> Option<&str> {
    let mut offsets = line
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(line.len()));
    let begin = offsets.nth(start)?;
    let end = match length {
        0 => begin,
        n => offsets.nth(n - 1)?,
    };
    Some(&line[begin..end])
}

impl LineExtractor for FixedWidthExtractor<'_> {
    fn extract_line(&self, line: &str) -> Result<Row> {
        let mut row = Row::with_capacity(self.schema.fields().len());

        for field in self.schema.fields() {
            if let FieldSchema::FixedWidth {
                field_name,
                start,
                length,
            } = field
            {
                let value = char_slice(line, *start, *length).ok_or_else(|| {
                    RipError::data(format!(
                        "field '{field_name}' spans characters {start}..{} but the record is {} characters wide",
                        start.saturating_add(*length),
                        line.chars().count()
                    ))
                })?;
                row.insert(field_name.as_str(), Some(value.trim().to_string()));
            }
        }

        Ok(row)
    }
}

impl RecordExtractor for FixedWidthExtractor<'_> {
    fn extract_all(&self, content: &str) -> Result<Vec<Row>> {
        extract_lines(self, content, self.schema.has_header())
    }

    fn name(&self) -> &str {
        "fixed-width"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn people_delimited(delimiter: &str) -> String {
        [
            ["name", "age", "dob"],
            ["Aaron", "43", "09/04/1980"],
            ["Heather", "42", "12/25/1980"],
            ["Xander", "8", "11/22/2014"],
            ["Ella", "5", "02/07/2018"],
        ]
        .iter()
        .map(|cols| cols.join(delimiter))
        .collect::<Vec<_>>()
        .join("\n")
    }

    fn delimited_schema(delimiter: &str) -> FileSchema {
        let mut schema = FileSchema::delimited(delimiter, true).unwrap();
        schema
            .add_fields(vec![
                FieldSchema::delimited("name", 0),
                FieldSchema::delimited("dob", 2),
                FieldSchema::delimited("age", 1),
            ])
            .unwrap();
        schema
    }

    fn fixed_width_schema() -> FileSchema {
        let mut schema = FileSchema::fixed_width(false);
        schema
            .add_fields(vec![
                FieldSchema::fixed_width("age", 10, 3),
                FieldSchema::fixed_width("dob", 13, 10),
                FieldSchema::fixed_width("name", 0, 10),
            ])
            .unwrap();
        schema
    }

    #[test]
    fn test_delimited_extract_line() {
        let schema = delimited_schema(",");
        let extractor = DelimitedExtractor::new(&schema).unwrap();
        let row = extractor.extract_line("Aaron,43,09/04/1980").unwrap();
        assert_eq!(row.value("name"), Some("Aaron"));
        assert_eq!(row.value("age"), Some("43"));
        assert_eq!(row.value("dob"), Some("09/04/1980"));
        let names: Vec<&str> = row.field_names().collect();
        assert_eq!(names, vec!["name", "dob", "age"]);
    }

    #[test]
    fn test_delimited_various_delimiters() {
        for delimiter in ["|", ",", "\t", ".", "::"] {
            let schema = delimited_schema(delimiter);
            let rows = extractor_for(&schema)
                .unwrap()
                .extract_all(&people_delimited(delimiter))
                .unwrap();
            assert_eq!(rows.len(), 4, "delimiter {delimiter:?}");
            assert_eq!(rows[0].value("name"), Some("Aaron"));
            assert_eq!(rows[3].value("dob"), Some("02/07/2018"));
        }
    }

    #[test]
    fn test_delimiter_is_literal_not_pattern() {
        let mut schema = FileSchema::delimited(".*", false).unwrap();
        schema
            .add_fields(vec![
                FieldSchema::delimited("a", 0),
                FieldSchema::delimited("b", 1),
            ])
            .unwrap();
        let row = DelimitedExtractor::new(&schema)
            .unwrap()
            .extract_line("x.*y")
            .unwrap();
        assert_eq!(row.value("a"), Some("x"));
        assert_eq!(row.value("b"), Some("y"));
    }

    #[test]
    fn test_delimited_keeps_empty_tokens() {
        let mut schema = FileSchema::delimited(",", false).unwrap();
        schema.add_field(FieldSchema::delimited("mid", 1)).unwrap();
        let row = DelimitedExtractor::new(&schema)
            .unwrap()
            .extract_line("a,,c")
            .unwrap();
        assert_eq!(row.get("mid"), Some(Some("")));
    }

    #[test]
    fn test_delimited_position_out_of_range() {
        let schema = delimited_schema(",");
        let err = extractor_for(&schema)
            .unwrap()
            .extract_all("name,age,dob\nAaron,43")
            .unwrap_err();
        match err {
            RipError::Data(msg) => {
                assert!(msg.starts_with("line 2:"), "{msg}");
                assert!(msg.contains("'dob'"), "{msg}");
            }
            other => panic!("Expected data error, got {other:?}"),
        }
    }

    #[test]
    fn test_fixed_width_extract_line() {
        let schema = fixed_width_schema();
        let row = FixedWidthExtractor::new(&schema)
            .unwrap()
            .extract_line("Aaron      4309/04/1980")
            .unwrap();
        assert_eq!(row.value("name"), Some("Aaron"));
        assert_eq!(row.value("age"), Some("43"));
        assert_eq!(row.value("dob"), Some("09/04/1980"));
    }

    #[test]
    fn test_fixed_width_trims_padding() {
        let mut schema = FileSchema::fixed_width(false);
        schema
            .add_field(FieldSchema::fixed_width("age", 2, 6))
            .unwrap();
        let row = FixedWidthExtractor::new(&schema)
            .unwrap()
            .extract_line("xx  43  yy")
            .unwrap();
        assert_eq!(row.value("age"), Some("43"));
    }

    #[test]
    fn test_fixed_width_counts_characters() {
        let mut schema = FileSchema::fixed_width(false);
        schema
            .add_fields(vec![
                FieldSchema::fixed_width("city", 0, 6),
                FieldSchema::fixed_width("code", 6, 3),
            ])
            .unwrap();
        let row = FixedWidthExtractor::new(&schema)
            .unwrap()
            .extract_line("Zürich044")
            .unwrap();
        assert_eq!(row.value("city"), Some("Zürich"));
        assert_eq!(row.value("code"), Some("044"));
    }

    #[test]
    fn test_fixed_width_out_of_range() {
        let schema = fixed_width_schema();
        let err = FixedWidthExtractor::new(&schema)
            .unwrap()
            .extract_line("Aaron      43")
            .unwrap_err();
        match err {
            RipError::Data(msg) => assert!(msg.contains("13 characters wide"), "{msg}"),
            other => panic!("Expected data error, got {other:?}"),
        }
    }

    #[test]
    fn test_char_slice_edges() {
        assert_eq!(char_slice("abc", 0, 3), Some("abc"));
        assert_eq!(char_slice("abc", 3, 0), Some(""));
        assert_eq!(char_slice("abc", 1, 3), None);
        assert_eq!(char_slice("abc", 4, 0), None);
    }

    #[test]
    fn test_header_discarded_and_order_kept() {
        let schema = delimited_schema("|");
        let rows = extract_lines(
            &DelimitedExtractor::new(&schema).unwrap(),
            &people_delimited("|"),
            true,
        )
        .unwrap();
        let names: Vec<&str> = rows.iter().filter_map(|r| r.value("name")).collect();
        assert_eq!(names, vec!["Aaron", "Heather", "Xander", "Ella"]);
    }

    #[test]
    fn test_fixed_width_header_discarded() {
        let mut schema = FileSchema::fixed_width(true);
        schema
            .add_fields(vec![
                FieldSchema::fixed_width("name", 0, 10),
                FieldSchema::fixed_width("age", 10, 3),
            ])
            .unwrap();
        let content = "NAME      AGE\nAaron      43\nElla        5";
        let rows = extractor_for(&schema).unwrap().extract_all(content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].value("name"), Some("Aaron"));
        assert_eq!(rows[1].value("age"), Some("5"));
    }

    #[test]
    fn test_schema_without_fields_gives_empty_rows() {
        let schema = FileSchema::delimited(",", false).unwrap();
        let rows = extractor_for(&schema).unwrap().extract_all("a,b\nc,d").unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(Row::is_empty));
    }

    #[test]
    fn test_header_on_empty_content() {
        let schema = delimited_schema(",");
        let rows = extractor_for(&schema).unwrap().extract_all("").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_extractor_for_dispatches_by_kind() {
        let delimited = FileSchema::delimited("\t", false).unwrap();
        let fixed = FileSchema::fixed_width(false);
        let xml = FileSchema::xml("person").unwrap();
        assert_eq!(extractor_for(&delimited).unwrap().name(), "delimited");
        assert_eq!(extractor_for(&fixed).unwrap().name(), "fixed-width");
        assert_eq!(extractor_for(&xml).unwrap().name(), "xml");
    }

    #[test]
    fn test_extractor_rejects_other_kind() {
        let xml = FileSchema::xml("person").unwrap();
        assert!(matches!(
            DelimitedExtractor::new(&xml),
            Err(RipError::Config(_))
        ));
        assert!(matches!(
            FixedWidthExtractor::new(&xml),
            Err(RipError::Config(_))
        ));
    }
}
