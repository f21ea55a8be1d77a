use crate::error::ExtractError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// A tagged element of a parsed document. Adjacent text runs are merged, so
/// `children` never holds two `Node::Text` values in a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn elements(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// First direct child with the given tag.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.elements().find(|element| element.tag == tag)
    }

    pub fn children_named<'a: 'b, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a Element> + 'b {
        self.elements().filter(move |element| element.tag == tag)
    }

    /// All elements below this one in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.elements().rev().collect(),
        }
    }

    /// Trimmed text that precedes the first child element. This is the label
    /// used for titles and table cells.
    pub fn text(&self) -> &str {
        match self.children.first() {
            Some(Node::Text(text)) => text.trim(),
            _ => "",
        }
    }

    /// Concatenated text of the whole subtree.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(child) => collect_text(child, out),
        }
    }
}

pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.elements().rev());
        Some(next)
    }
}

fn malformed(position: u64, reason: impl Into<String>) -> ExtractError {
    ExtractError::MalformedDocument {
        position,
        reason: reason.into(),
    }
}

/// Parses raw document bytes into an element tree. Only well-formedness is
/// checked here.
pub fn parse_document(bytes: &[u8]) -> Result<Element, ExtractError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let xml = std::str::from_utf8(bytes)
        .map_err(|e| malformed(e.valid_up_to() as u64, format!("invalid UTF-8: {e}")))?;

    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(malformed(position, "element after the root element"));
                }
                stack.push(open_element(e, position)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = open_element(e, position)?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| malformed(position, "end tag without a matching start tag"))?;
                attach(&mut stack, &mut root, element, position)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| malformed(position, err.to_string()))?;
                push_text(&mut stack, &text, position)?;
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e);
                push_text(&mut stack, &text, position)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(malformed(reader.error_position() as u64, e.to_string())),
            _ => {}
        }
    }

    let end = reader.buffer_position() as u64;
    if let Some(open) = stack.last() {
        return Err(malformed(end, format!("unclosed element <{}>", open.tag)));
    }
    root.ok_or_else(|| malformed(end, "document has no root element"))
}

fn open_element(e: &BytesStart, position: u64) -> Result<Element, ExtractError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attrs = HashMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| malformed(position, err.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| malformed(position, err.to_string()))?
            .into_owned();
        attrs.insert(key, value);
    }
    Ok(Element {
        tag,
        attrs,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
    position: u64,
) -> Result<(), ExtractError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(malformed(position, "more than one root element"));
    }
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), ExtractError> {
    match stack.last_mut() {
        Some(current) => current.push_text(text),
        None if text.trim().is_empty() => {}
        None => return Err(malformed(position, "text outside the root element")),
    }
    Ok(())
}
