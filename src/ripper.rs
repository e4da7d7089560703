//! Extraction entry points.
//!
//! `process` runs the schema's extractor over raw content; the `rip_*`
//! functions wrap the rows with the name of the source they came from and
//! optionally map each row through a caller-supplied transform.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::extractor::extractor_for;
use crate::row::Row;
use crate::schema::FileSchema;

/// Rows extracted from one source, tagged with the source's identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct RippedFile<T = Row> {
    /// Identifier of the source, usually its file name.
    pub source: String,
    /// One entry per record, in source order.
    pub rows: Vec<T>,
}

impl<T> RippedFile<T> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    pub fn into_rows(self) -> Vec<T> {
        self.rows
    }

    /// Map every row, keeping order and the source identifier.
    pub fn map<U, F>(self, transform: F) -> RippedFile<U>
    where
        F: FnMut(T) -> U,
    {
        RippedFile {
            source: self.source,
            rows: self.rows.into_iter().map(transform).collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RippedFile<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Extract all records of `content` according to `schema`.
pub fn process(schema: &FileSchema, content: &str) -> Result<Vec<Row>> {
    let extractor = extractor_for(schema)?;
    extractor.extract_all(content)
}

/// Extract `content` and tag the rows with `source`.
pub fn rip(source: &str, content: &str, schema: &FileSchema) -> Result<RippedFile> {
    let rows = process(schema, content)?;
    info!(source, kind = %schema.kind(), rows = rows.len(), "ripped file");
    Ok(RippedFile {
        source: source.to_string(),
        rows,
    })
}

/// Extract `content` and build a `T` from each row.
///
/// The transform is called once per record in source order; its output is
/// not inspected.
pub fn rip_with<T, F>(
    source: &str,
    content: &str,
    schema: &FileSchema,
    transform: F,
) -> Result<RippedFile<T>>
where
    F: FnMut(Row) -> T,
{
    Ok(rip(source, content, schema)?.map(transform))
}

/// Read `reader` to the end and extract it.
pub fn rip_reader<R: Read>(source: &str, mut reader: R, schema: &FileSchema) -> Result<RippedFile> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    rip(source, &content, schema)
}

/// Read the file at `path` and extract it. The path is the source identifier.
pub fn rip_file(path: impl AsRef<Path>, schema: &FileSchema) -> Result<RippedFile> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    rip(&path.display().to_string(), &content, schema)
}
