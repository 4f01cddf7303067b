//! Owned XML element tree.
//!
//! Worksheet layout needs random access into several subtrees of the same
//! part (sheet format, rows, merges, drawing reference), so parts are
//! materialized once into an [`XmlNode`] tree and queried by path.

use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};

/// An XML element with its attributes, direct text and child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Qualified element name (e.g. "xdr:twoCellAnchor")
    name: String,
    /// Attributes in document order, qualified keys, unescaped values
    attributes: Vec<(String, String)>,
    /// Child elements in document order
    children: Vec<XmlNode>,
    /// Concatenated direct text content (entity references resolved)
    text: String,
}

impl XmlNode {
    /// Parse a complete XML document and return its root element.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut buf = Vec::new();
        let mut stack: Vec<XmlNode> = Vec::with_capacity(16);
        let mut root: Option<XmlNode> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    stack.push(Self::from_start(e)?);
                },
                Ok(Event::Empty(ref e)) => {
                    let node = Self::from_start(e)?;
                    Self::attach(&mut stack, &mut root, node)?;
                },
                Ok(Event::End(_)) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| OoxmlError::Xml("unbalanced end tag".to_string()))?;
                    Self::attach(&mut stack, &mut root, node)?;
                },
                Ok(Event::Text(ref e)) => {
                    if let Some(current) = stack.last_mut() {
                        let t = std::str::from_utf8(e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        current.text.push_str(t);
                    }
                },
                Ok(Event::CData(ref e)) => {
                    if let Some(current) = stack.last_mut() {
                        let t = std::str::from_utf8(e).map_err(|e| OoxmlError::Xml(e.to_string()))?;
                        current.text.push_str(t);
                    }
                },
                Ok(Event::GeneralRef(ref e)) => {
                    if let Some(current) = stack.last_mut() {
                        match e.resolve_char_ref()? {
                            Some(c) => current.text.push(c),
                            None => {
                                let name = e.decode().map_err(|e| OoxmlError::Xml(e.to_string()))?;
                                match resolve_predefined_entity(&name) {
                                    Some(resolved) => current.text.push_str(resolved),
                                    // Unknown entities stay literal
                                    None => {
                                        current.text.push('&');
                                        current.text.push_str(&name);
                                        current.text.push(';');
                                    },
                                }
                            },
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(OoxmlError::Xml(e.to_string())),
                _ => {},
            }
            buf.clear();
        }

        if !stack.is_empty() {
            return Err(OoxmlError::Xml("unexpected end of document".to_string()));
        }
        root.ok_or_else(|| OoxmlError::Xml("document has no root element".to_string()))
    }

    fn from_start(e: &BytesStart<'_>) -> Result<Self> {
        let name = std::str::from_utf8(e.name().as_ref())
            .map_err(|e| OoxmlError::Xml(e.to_string()))?
            .to_string();

        let mut attributes = Vec::new();
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| OoxmlError::Xml(e.to_string()))?
                .to_string();
            let value = attr.unescape_value()?.to_string();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
            text: String::new(),
        })
    }

    fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None if root.is_none() => *root = Some(node),
            None => return Err(OoxmlError::Xml("multiple root elements".to_string())),
        }
        Ok(())
    }

    /// Qualified element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Element name without its namespace prefix.
    #[inline]
    pub fn local_name(&self) -> &str {
        local(&self.name)
    }

    /// Look up an attribute value.
    ///
    /// A prefixed name (`r:id`) must match exactly; an unprefixed name also
    /// matches a prefixed attribute with the same local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        if let Some((_, v)) = self.attributes.iter().find(|(k, _)| k == name) {
            return Some(v.as_str());
        }
        if name.contains(':') {
            return None;
        }
        self.attributes
            .iter()
            .find(|(k, _)| local(k) == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct text content of this element.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Child elements in document order.
    #[inline]
    pub fn elements(&self) -> &[XmlNode] {
        &self.children
    }

    /// All elements reached by a slash-separated path of local names.
    ///
    /// `node.children("sheetData/row")` yields every `row` of every
    /// `sheetData` child, in document order.
    pub fn children<'a>(&'a self, path: &str) -> Vec<&'a XmlNode> {
        let mut current: Vec<&XmlNode> = vec![self];
        for step in path.split('/').filter(|s| !s.is_empty()) {
            current = current
                .into_iter()
                .flat_map(|n| n.children.iter().filter(move |c| c.local_name() == step))
                .collect();
        }
        current
    }

    /// First element reached by a path of local names.
    pub fn child(&self, path: &str) -> Option<&XmlNode> {
        self.children(path).into_iter().next()
    }

    /// Every descendant element with the given local name, in document order.
    pub fn descendants<'a>(&'a self, local_name: &str) -> Vec<&'a XmlNode> {
        let mut found = Vec::new();
        self.collect_descendants(local_name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, local_name: &str, found: &mut Vec<&'a XmlNode>) {
        for child in &self.children {
            if child.local_name() == local_name {
                found.push(child);
            }
            child.collect_descendants(local_name, found);
        }
    }
}

#[inline]
fn local(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, l)| l)
}
