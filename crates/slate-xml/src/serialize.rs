//! Document serialization.

use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesCData, BytesEnd, BytesPI, BytesStart, BytesText, Event};

use crate::document::{Document, NodeId, NodeKind};
use crate::error::{Result, XmlError};

/// Declaration emitted ahead of every serialized document.
pub const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

impl Document {
    /// Serialize the root element (no declaration), preserving whitespace text nodes.
    ///
    /// Childless elements are written in self-closing form.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Write`] if the writer rejects an event.
    pub fn serialize_root(&self) -> Result<String> {
        let mut xml = Writer::new(Vec::new());
        write_node(&mut xml, self, self.root())?;
        String::from_utf8(xml.into_inner()).map_err(|error| XmlError::Write {
            message: error.to_string(),
        })
    }

    /// [`XML_HEADER`] followed by [`Document::serialize_root`].
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Write`] if the writer rejects an event.
    pub fn to_xml_string(&self) -> Result<String> {
        Ok(format!("{XML_HEADER}{}", self.serialize_root()?))
    }
}

fn write_node(xml: &mut Writer<Vec<u8>>, doc: &Document, id: NodeId) -> Result<()> {
    match doc.kind(id) {
        NodeKind::Element(element) => {
            let mut start = BytesStart::new(element.name.as_str());
            for (key, value) in &element.attributes {
                start.push_attribute((key.as_str(), value.as_str()));
            }
            let children = doc.children(id);
            if children.is_empty() {
                return emit(xml, Event::Empty(start));
            }
            emit(xml, Event::Start(start))?;
            for child in children {
                write_node(xml, doc, *child)?;
            }
            emit(xml, Event::End(BytesEnd::new(element.name.as_str())))
        }
        NodeKind::Text(text) => emit(
            xml,
            Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))),
        ),
        NodeKind::CData(text) => emit(xml, Event::CData(BytesCData::new(text.as_str()))),
        NodeKind::Comment(text) => emit(
            xml,
            Event::Comment(BytesText::from_escaped(text.as_str())),
        ),
        NodeKind::ProcessingInstruction(text) => {
            emit(xml, Event::PI(BytesPI::new(text.as_str())))
        }
    }
}

fn emit(xml: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    xml.write_event(event).map_err(|error| XmlError::Write {
        message: error.to_string(),
    })
}
