//! File schemas: the ordered field list plus kind-specific settings.
//!
//! A schema is built with one of the three constructors, filled with
//! fields, and then handed read-only to the extractors.

use crate::error::{Result, RipError};
use crate::field::{FieldSchema, FileKind};

/// Kind-specific settings of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Layout {
    Delimited { delimiter: String, has_header: bool },
    FixedWidth { has_header: bool },
    Xml { record_element: String },
}

/// Layout description of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSchema {
    layout: Layout,
    fields: Vec<FieldSchema>,
}

impl FileSchema {
    /// Schema for delimiter-separated lines. The delimiter is matched
    /// literally and must not be empty.
    pub fn delimited(delimiter: impl Into<String>, has_header: bool) -> Result<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(RipError::schema("delimiter is required"));
        }
        Ok(Self::with_layout(Layout::Delimited {
            delimiter,
            has_header,
        }))
    }

    pub fn fixed_width(has_header: bool) -> Self {
        Self::with_layout(Layout::FixedWidth { has_header })
    }

    /// Schema for XML documents whose records are `record_element` elements.
    pub fn xml(record_element: impl Into<String>) -> Result<Self> {
        let record_element = record_element.into();
        if record_element.trim().is_empty() {
            return Err(RipError::schema("record element name is required"));
        }
        Ok(Self::with_layout(Layout::Xml { record_element }))
    }

    fn with_layout(layout: Layout) -> Self {
        Self {
            layout,
            fields: Vec::new(),
        }
    }

    /// Append a field. Its kind must match the schema's kind and its name
    /// must not already be taken; on failure the field list is untouched.
    pub fn add_field(&mut self, field: FieldSchema) -> Result<()> {
        if field.kind() != self.kind() {
            return Err(RipError::schema("FileType for file and field must match"));
        }
        if self
            .fields
            .iter()
            .any(|f| f.field_name() == field.field_name())
        {
            return Err(RipError::schema(format!(
                "field '{}' is already defined",
                field.field_name()
            )));
        }
        self.fields.push(field);
        Ok(())
    }

    /// Like [`add_field`](Self::add_field), but rejects an absent entry with
    /// "A valid field definition is required".
    pub fn try_add_field(&mut self, field: Option<FieldSchema>) -> Result<()> {
        match field {
            Some(field) => self.add_field(field),
            None => Err(RipError::schema("A valid field definition is required")),
        }
    }

    /// Append fields in order, stopping at the first invalid one.
    ///
    /// Fields added before the failure stay in the schema; a schema that
    /// returned an error here should be discarded.
    pub fn add_fields<I>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = FieldSchema>,
    {
        for field in fields {
            self.add_field(field)?;
        }
        Ok(())
    }

    pub fn kind(&self) -> FileKind {
        match self.layout {
            Layout::Delimited { .. } => FileKind::Delimited,
            Layout::FixedWidth { .. } => FileKind::FixedWidth,
            Layout::Xml { .. } => FileKind::Xml,
        }
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Delimiter of a delimited schema.
    pub fn delimiter(&self) -> Option<&str> {
        match &self.layout {
            Layout::Delimited { delimiter, .. } => Some(delimiter),
            _ => None,
        }
    }

    /// Whether the first line is a header. Always false for XML.
    pub fn has_header(&self) -> bool {
        match self.layout {
            Layout::Delimited { has_header, .. } | Layout::FixedWidth { has_header } => has_header,
            Layout::Xml { .. } => false,
        }
    }

    /// Record element name of an XML schema.
    pub fn record_element(&self) -> Option<&str> {
        match &self.layout {
            Layout::Xml { record_element } => Some(record_element),
            _ => None,
        }
    }
}
