//! quick-xml writer for an owned [`Element`] tree.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::Cursor;

use super::element::{Element, Node};
use crate::error::{MapsourceError, Result};

/// Serialize `root` as a standalone UTF-8 document with two-space indent.
pub fn write_root(root: &Element) -> Result<Vec<u8>> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(|e| MapsourceError::xml(format!("Write error: {e}")))?;

    write_element(&mut writer, root)?;

    let mut output = buffer.into_inner();
    output.push(b'\n');
    Ok(output)
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(|e| MapsourceError::xml(format!("Write error: {e}")));
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| MapsourceError::xml(format!("Write error: {e}")))?;

    for child in &element.children {
        match child {
            Node::Element(e) => write_element(writer, e)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| MapsourceError::xml(format!("Write error: {e}")))?,
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(|e| MapsourceError::xml(format!("Write error: {e}")))
}
