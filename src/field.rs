//! Field schema entries: where one field lives inside a record.
//!
//! Each variant carries only the locator that makes sense for its file kind,
//! so a delimited field can never hold an XML node name.

use std::fmt;

/// The three supported file layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    FixedWidth,
    Delimited,
    Xml,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FileKind::FixedWidth => "fixed-width",
            FileKind::Delimited => "delimited",
            FileKind::Xml => "xml",
        };
        f.write_str(name)
    }
}

/// Extraction rule for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSchema {
    /// Token at `position` (0-based) after splitting on the delimiter.
    Delimited { field_name: String, position: usize },
    /// `length` characters starting at character `start` (0-based), trimmed.
    FixedWidth {
        field_name: String,
        start: usize,
        length: usize,
    },
    /// Text of the first child element named `node_name`.
    Xml {
        field_name: String,
        node_name: String,
    },
}

impl FieldSchema {
    pub fn delimited(field_name: impl Into<String>, position: usize) -> Self {
        FieldSchema::Delimited {
            field_name: field_name.into(),
            position,
        }
    }

    pub fn fixed_width(field_name: impl Into<String>, start: usize, length: usize) -> Self {
        FieldSchema::FixedWidth {
            field_name: field_name.into(),
            start,
            length,
        }
    }

    /// Build an XML field. A missing or empty `node_name` falls back to the
    /// field name.
    pub fn xml(field_name: impl Into<String>, node_name: Option<&str>) -> Self {
        let field_name = field_name.into();
        let node_name = match node_name {
            Some(node) if !node.is_empty() => node.to_string(),
            _ => field_name.clone(),
        };
        FieldSchema::Xml {
            field_name,
            node_name,
        }
    }

    pub fn field_name(&self) -> &str {
        match self {
            FieldSchema::Delimited { field_name, .. }
            | FieldSchema::FixedWidth { field_name, .. }
            | FieldSchema::Xml { field_name, .. } => field_name,
        }
    }

    pub fn kind(&self) -> FileKind {
        match self {
            FieldSchema::Delimited { .. } => FileKind::Delimited,
            FieldSchema::FixedWidth { .. } => FileKind::FixedWidth,
            FieldSchema::Xml { .. } => FileKind::Xml,
        }
    }
}
