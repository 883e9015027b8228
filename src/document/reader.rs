//! quick-xml reader that builds an owned [`Element`] tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::element::{Element, Node};
use crate::error::{MapsourceError, Result};

/// Parse a complete XML document into its root element.
///
/// Whitespace-only text is dropped. Comments, processing instructions and
/// the doctype are skipped.
pub fn read_root(input: &[u8]) -> Result<Element> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    // Open elements, innermost last.
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                open.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                let element = element_from_start(e)?;
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = open
                    .pop()
                    .ok_or_else(|| MapsourceError::xml("Unexpected closing tag"))?;
                attach(&mut open, &mut root, element)?;
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| MapsourceError::xml(format!("Text error: {e}")))?;
                push_text(&mut open, &text);
            }
            Ok(Event::CData(ref e)) => {
                push_text(&mut open, &String::from_utf8_lossy(e));
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(MapsourceError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(unclosed) = open.last() {
        return Err(MapsourceError::xml(format!(
            "Unclosed element <{}>",
            unclosed.name
        )));
    }
    root.ok_or_else(|| MapsourceError::xml("Document has no root element"))
}

fn element_from_start(e: &BytesStart<'_>) -> Result<Element> {
    let name_bytes = e.name();
    let name = std::str::from_utf8(name_bytes.as_ref())
        .map_err(|e| MapsourceError::xml(format!("Invalid tag name: {e}")))?;
    let mut element = Element::new(name);

    for attr_result in e.attributes() {
        let attr =
            attr_result.map_err(|e| MapsourceError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| MapsourceError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| MapsourceError::xml(format!("Attribute value error: {e}")))?;
        element.set_attr(key, value);
    }

    Ok(element)
}

fn attach(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.push_child(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(MapsourceError::xml(format!(
                "Multiple root elements (second is <{}>)",
                element.name
            )));
        }
    }
    Ok(())
}

fn push_text(open: &mut [Element], text: &str) {
    if text.is_empty() {
        return;
    }
    // Text outside the root element is ignored.
    if let Some(parent) = open.last_mut() {
        parent.children.push(Node::Text(text.to_string()));
    }
}
