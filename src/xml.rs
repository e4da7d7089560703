//! XML record extraction.
//!
//! The document is read with `quick-xml` into a small element tree. Records
//! are the elements named after the schema's record element anywhere below
//! the document element; each field is the text of the record's first child
//! with the field's node name.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use crate::error::{Result, RipError};
use crate::extractor::{RecordExtractor, wrong_kind};
use crate::field::FieldSchema;
use crate::row::Row;
use crate::schema::FileSchema;

#[derive(Debug)]
enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            children: Vec::new(),
        }
    }

    fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of this element and all its descendants.
    fn inner_text(&self) -> String {
        let mut text = String::new();
        self.push_text(&mut text);
        text
    }

    fn push_text(&self, out: &mut String) {
        let mut pending: Vec<&Node> = self.children.iter().rev().collect();
        while let Some(node) = pending.pop() {
            match node {
                Node::Text(t) => out.push_str(t),
                Node::Element(el) => pending.extend(el.children.iter().rev()),
            }
        }
    }
}

// Deep documents would otherwise overflow the stack through recursive drops.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut el) = node {
                pending.append(&mut el.children);
            }
        }
    }
}

/// Attach a finished element to its parent, or make it the document element.
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(RipError::data(format!(
                "XML document has more than one root element (found <{}>)",
                element.name
            )));
        }
    }
    Ok(())
}

/// Parse `content` into its document element, `None` for a document
/// without elements.
fn parse_document(content: &str) -> Result<Option<Element>> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => stack.push(Element::new(e.name().as_ref())),
            Event::Empty(e) => attach(&mut stack, &mut root, Element::new(e.name().as_ref()))?,
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element)?;
                }
            }
            Event::Text(e) => {
                if let Some(parent) = stack.last_mut() {
                    let text = e.unescape()?;
                    // Layout whitespace between elements is not content.
                    if !text.trim().is_empty() {
                        parent.children.push(Node::Text(text.into_owned()));
                    }
                }
            }
            Event::CData(e) => {
                if let Some(parent) = stack.last_mut() {
                    let bytes = e.into_inner();
                    parent
                        .children
                        .push(Node::Text(String::from_utf8_lossy(&bytes).into_owned()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(RipError::data(format!(
            "XML document ends inside <{}>",
            open.name
        )));
    }

    Ok(root)
}

/// Collect descendants of `element` named `name`, in document order.
fn collect_records<'d>(element: &'d Element, name: &str, out: &mut Vec<&'d Element>) {
    let mut pending: Vec<&Element> = element.child_elements().collect();
    pending.reverse();
    while let Some(current) = pending.pop() {
        if current.name == name {
            out.push(current);
        }
        let start = pending.len();
        pending.extend(current.child_elements());
        pending[start..].reverse();
    }
}

/// Extracts one row per record element of an XML document.
#[derive(Debug)]
pub struct XmlExtractor<'a> {
    schema: &'a FileSchema,
    record_element: &'a str,
}

impl<'a> XmlExtractor<'a> {
    pub fn new(schema: &'a FileSchema) -> Result<Self> {
        match schema.record_element() {
            Some(record_element) => Ok(Self {
                schema,
                record_element,
            }),
            None => Err(wrong_kind("xml", schema)),
        }
    }

    fn extract_record(&self, record: &Element) -> Row {
        let mut row = Row::with_capacity(self.schema.fields().len());

        for field in self.schema.fields() {
            if let FieldSchema::Xml {
                field_name,
                node_name,
            } = field
            {
                let value = record
                    .child_elements()
                    .find(|child| child.name == *node_name)
                    .map(Element::inner_text);
                if value.is_none() {
                    debug!(field = %field_name, node = %node_name, "record has no such node");
                }
                row.insert(field_name.as_str(), value);
            }
        }

        row
    }
}

impl RecordExtractor for XmlExtractor<'_> {
    fn extract_all(&self, content: &str) -> Result<Vec<Row>> {
        let root = parse_document(content)?;

        let mut records = Vec::new();
        if let Some(root) = &root {
            collect_records(root, self.record_element, &mut records);
        }

        if records.is_empty() {
            return Err(RipError::data("XML file does not contain any records"));
        }
        debug!(
            records = records.len(),
            element = self.record_element,
            "located XML records"
        );

        Ok(records
            .into_iter()
            .map(|record| self.extract_record(record))
            .collect())
    }

    fn name(&self) -> &str {
        "xml"
    }
}
