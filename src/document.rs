/*!
 * In-memory XML document tree.
 *
 * The tree follows the usual element/text/tail layout: an element's `text`
 * is the character data before its first child, and each child's `tail` is
 * the character data between that child's end tag and the next sibling (or
 * the parent's end tag). Comments, processing instructions and the DOCTYPE
 * are not kept; CDATA sections are read as plain text.
 *
 * Reading and writing go through quick-xml. Output always starts with an
 * XML declaration and is UTF-8 encoded.
 */

use encoding_rs::{Encoding, UTF_8};
use log::debug;
use quick_xml::escape::{escape, partial_escape};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::errors::DocumentError;

/// A single XML element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified tag name, prefix included
    pub name: String,
    /// Attributes in document order
    pub attributes: Vec<(String, String)>,
    /// Character data before the first child
    pub text: Option<String>,
    /// Character data after this element's end tag
    pub tail: Option<String>,
    /// Child elements in document order
    pub children: Vec<Element>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            tail: None,
            children: Vec::new(),
        }
    }

    /// Value of the attribute called `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, replacing an existing value or appending a new one
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    /// Pre-order iterator over this element and all its descendants
    pub fn iter(&self) -> Elements<'_> {
        Elements { stack: vec![self] }
    }

    /// Visit this element and all descendants in document order
    pub fn walk_mut<F: FnMut(&mut Element)>(&mut self, visit: &mut F) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.text.as_deref().is_none_or(str::is_empty)
    }
}

/// Document-order iterator over an element subtree
pub struct Elements<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A parsed XML document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTree {
    root: Element,
}

impl DocumentTree {
    /// Wrap an existing element as the document root
    pub fn new(root: Element) -> Self {
        Self { root }
    }

    /// Read and parse the document at `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;

        debug!("Parsing XML document {:?} ({} bytes)", path, bytes.len());
        Self::parse_bytes(&bytes)
    }

    /// Parse a document from raw bytes.
    ///
    /// A byte order mark decides the encoding. Without one, the `encoding`
    /// of the XML declaration does, and UTF-8 is assumed when neither is
    /// present.
    pub fn parse_bytes(bytes: &[u8]) -> Result<Self, DocumentError> {
        let (encoding, bom_length) = match Encoding::for_bom(bytes) {
            Some(detected) => detected,
            None => (declared_encoding(bytes)?, 0),
        };

        let content = encoding
            .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
            .ok_or_else(|| DocumentError::Encoding {
                encoding: encoding.name().to_string(),
                message: "invalid byte sequence".to_string(),
            })?;

        if encoding != UTF_8 {
            debug!("Decoded document from {}", encoding.name());
        }
        Self::parse_str(&content)
    }

    /// Parse a document from XML text
    pub fn parse_str(xml: &str) -> Result<Self, DocumentError> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let mut reader = Reader::from_str(xml);

        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let event = reader.read_event().map_err(|e| DocumentError::Parse {
                position: reader.buffer_position() as u64,
                message: e.to_string(),
            })?;

            match event {
                Event::Start(start) => {
                    if stack.is_empty() && root.is_some() {
                        return Err(DocumentError::Structure(
                            "content after the root element".to_string(),
                        ));
                    }
                    stack.push(element_from_start(&start, &reader)?);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, &reader)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or_else(|| {
                        DocumentError::Structure("end tag without a matching start tag".to_string())
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(text) => {
                    let text = text.unescape().map_err(|e| DocumentError::Parse {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    append_text(&mut stack, &text)?;
                }
                Event::CData(cdata) => {
                    let bytes = cdata.into_inner();
                    let text = std::str::from_utf8(&bytes).map_err(|e| DocumentError::Parse {
                        position: reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    append_text(&mut stack, text)?;
                }
                Event::Eof => break,
                // Declaration, comments, processing instructions and DOCTYPE are dropped
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::Structure(format!("unclosed element <{}>", open.name)));
        }

        root.map(Self::new)
            .ok_or_else(|| DocumentError::Structure("no root element found".to_string()))
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Render the document, declaration included
    pub fn to_bytes(&self) -> Result<Vec<u8>, DocumentError> {
        let mut writer = Writer::new(Vec::new());

        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        writer
            .write_event(Event::Text(BytesText::new("\n")))
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        write_element(&mut writer, &self.root)?;

        Ok(writer.into_inner())
    }

    /// Render the document as a string, declaration included
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        String::from_utf8(self.to_bytes()?).map_err(|e| DocumentError::Serialize(e.to_string()))
    }

    /// Write the document to `path`.
    ///
    /// The whole document is rendered first and written to a temporary file
    /// in the destination directory, which then replaces `path`. A failure at
    /// any step leaves `path` untouched.
    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)
            .map_err(|e| DocumentError::Serialize(format!("cannot create file in {:?}: {}", dir, e)))?;
        temp.write_all(&bytes)
            .and_then(|_| temp.flush())
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        temp.persist(path)
            .map_err(|e| DocumentError::Serialize(format!("cannot save {:?}: {}", path, e)))?;

        debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }
}

// Encoding named by a leading XML declaration, UTF-8 when there is none
fn declared_encoding(bytes: &[u8]) -> Result<&'static Encoding, DocumentError> {
    let mut reader = Reader::from_reader(bytes);
    let label = match reader.read_event() {
        Ok(Event::Decl(decl)) => match decl.encoding() {
            Some(Ok(label)) => label.into_owned(),
            _ => return Ok(UTF_8),
        },
        _ => return Ok(UTF_8),
    };

    Encoding::for_label(&label).ok_or_else(|| DocumentError::Encoding {
        encoding: String::from_utf8_lossy(&label).into_owned(),
        message: "unknown encoding".to_string(),
    })
}

fn element_from_start(start: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<Element, DocumentError> {
    let parse_error = |message: String| DocumentError::Parse {
        position: reader.buffer_position() as u64,
        message,
    };

    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| parse_error(e.to_string()))?
        .to_string();
    let mut element = Element::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| parse_error(e.to_string()))?;
        let key = std::str::from_utf8(attribute.key.as_ref())
            .map_err(|e| parse_error(e.to_string()))?
            .to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| parse_error(e.to_string()))?
            .into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }

    if root.is_some() {
        return Err(DocumentError::Structure("more than one root element".to_string()));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), DocumentError> {
    let Some(parent) = stack.last_mut() else {
        if text.trim().is_empty() {
            return Ok(());
        }
        return Err(DocumentError::Structure("text outside the root element".to_string()));
    };

    let slot = match parent.children.last_mut() {
        Some(previous) => &mut previous.tail,
        None => &mut parent.text,
    };
    slot.get_or_insert_with(String::new).push_str(text);
    Ok(())
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<(), DocumentError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute(Attribute {
            key: QName(key.as_bytes()),
            value: Cow::Owned(escape_attribute(value).into_bytes()),
        });
    }

    if element.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| DocumentError::Serialize(e.to_string()))?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| DocumentError::Serialize(e.to_string()))?;

    if let Some(text) = element.text.as_deref() {
        write_text(writer, text)?;
    }

    for child in &element.children {
        write_element(writer, child)?;
        if let Some(tail) = child.tail.as_deref() {
            write_text(writer, tail)?;
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| DocumentError::Serialize(e.to_string()))?;
    Ok(())
}

// Line breaks and tabs in attribute values are written as character references
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in escape(value).chars() {
        match ch {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn write_text<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<(), DocumentError> {
    if text.is_empty() {
        return Ok(());
    }
    writer
        .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
        .map_err(|e| DocumentError::Serialize(e.to_string()))
}
