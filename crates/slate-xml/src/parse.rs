//! Build a [`Document`] from XML text with `quick-xml`.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::{resolve_predefined_entity, unescape};
use quick_xml::events::{BytesStart, Event};

use crate::document::{Document, Element, NodeId, NodeKind};
use crate::error::{Result, XmlError};

impl Document {
    /// Parse a complete document held in memory.
    ///
    /// The prolog (declaration, doctype, comments before the root) is not retained.
    ///
    /// # Errors
    ///
    /// Returns an [`XmlError`] when the text is not a single well-formed element tree.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut reader = Reader::from_str(text);
        let mut doc: Option<Document> = None;
        let mut stack: Vec<NodeId> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|error| XmlError::Syntax {
                position: reader.buffer_position() as u64,
                message: error.to_string(),
            })?;
            match event {
                Event::Start(start) => {
                    let element = element_from_start(&start, position)?;
                    let id = open_element(&mut doc, &stack, element, position)?;
                    stack.push(id);
                }
                Event::Empty(start) => {
                    let element = element_from_start(&start, position)?;
                    open_element(&mut doc, &stack, element, position)?;
                }
                Event::End(_) => {
                    if stack.pop().is_none() {
                        return Err(malformed(position, "closing tag without an open element"));
                    }
                }
                Event::Text(text) => {
                    let raw = utf8(&text, position)?;
                    match (doc.as_mut(), stack.last()) {
                        (Some(doc), Some(parent)) => {
                            let value = unescape(raw).map_err(|error| XmlError::Syntax {
                                position,
                                message: error.to_string(),
                            })?;
                            doc.append_text(*parent, &value);
                        }
                        _ if raw.trim().is_empty() => {}
                        _ => return Err(malformed(position, "text outside the root element")),
                    }
                }
                Event::GeneralRef(reference) => {
                    let name = utf8(&reference, position)?;
                    let value = resolve_reference(name)?;
                    match (doc.as_mut(), stack.last()) {
                        (Some(doc), Some(parent)) => doc.append_text(*parent, &value),
                        _ => return Err(malformed(position, "reference outside the root element")),
                    }
                }
                Event::CData(data) => {
                    let value = utf8(&data, position)?.to_string();
                    attach_leaf(&mut doc, &stack, NodeKind::CData(value), position)?;
                }
                Event::Comment(comment) => {
                    if !stack.is_empty() {
                        let value = utf8(&comment, position)?.to_string();
                        attach_leaf(&mut doc, &stack, NodeKind::Comment(value), position)?;
                    }
                }
                Event::PI(pi) => {
                    if !stack.is_empty() {
                        let value = utf8(&pi, position)?.to_string();
                        attach_leaf(
                            &mut doc,
                            &stack,
                            NodeKind::ProcessingInstruction(value),
                            position,
                        )?;
                    }
                }
                Event::Eof => break,
                // Declaration and doctype belong to the prolog.
                _ => {}
            }
        }

        let end = reader.buffer_position() as u64;
        if !stack.is_empty() {
            return Err(malformed(end, "unexpected end of input inside an element"));
        }
        doc.ok_or_else(|| malformed(end, "no root element"))
    }
}

/// Create the element and hang it under the current parent, or make it the root.
fn open_element(
    doc: &mut Option<Document>,
    stack: &[NodeId],
    element: Element,
    position: u64,
) -> Result<NodeId> {
    match (doc.as_mut(), stack.last()) {
        (Some(doc), Some(parent)) => {
            let id = doc.push(NodeKind::Element(element));
            doc.attach(*parent, id);
            Ok(id)
        }
        (Some(_), None) => Err(malformed(position, "more than one root element")),
        (None, _) => {
            let created = Document::with_root(element);
            let root = created.root();
            *doc = Some(created);
            Ok(root)
        }
    }
}

fn attach_leaf(
    doc: &mut Option<Document>,
    stack: &[NodeId],
    kind: NodeKind,
    position: u64,
) -> Result<()> {
    match (doc.as_mut(), stack.last()) {
        (Some(doc), Some(parent)) => {
            let id = doc.push(kind);
            doc.attach(*parent, id);
            Ok(())
        }
        _ => Err(malformed(position, "content outside the root element")),
    }
}

fn element_from_start(start: &BytesStart<'_>, position: u64) -> Result<Element> {
    let name = utf8(start.name().as_ref(), position)?.to_string();
    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| XmlError::Syntax {
            position,
            message: error.to_string(),
        })?;
        let key = utf8(attribute.key.as_ref(), position)?.to_string();
        let raw = utf8(&attribute.value, position)?;
        let value = unescape(raw).map_err(|error| XmlError::Syntax {
            position,
            message: error.to_string(),
        })?;
        attributes.push((key, value.into_owned()));
    }
    Ok(Element { name, attributes })
}

/// Resolve `&name;` where `name` is a predefined entity or a character reference.
fn resolve_reference(name: &str) -> Result<Cow<'static, str>> {
    let unresolved = || XmlError::UnresolvedEntity {
        name: name.to_string(),
    };
    if let Some(reference) = name.strip_prefix('#') {
        let code = match reference.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => reference.parse::<u32>(),
        }
        .map_err(|_| unresolved())?;
        let ch = char::from_u32(code).ok_or_else(unresolved)?;
        return Ok(Cow::Owned(ch.to_string()));
    }
    resolve_predefined_entity(name)
        .map(Cow::Borrowed)
        .ok_or_else(unresolved)
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|error| XmlError::Syntax {
        position,
        message: error.to_string(),
    })
}

fn malformed(position: u64, message: &str) -> XmlError {
    XmlError::Malformed {
        position,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_elements_and_attributes() {
        let doc = Document::parse(r#"<a x="1 &amp; 2"><b>hi</b><c/></a>"#).expect("parse");
        let root = doc.root();
        assert_eq!(doc.tag_name(root), Some("a"));
        assert_eq!(doc.attribute(root, "x"), Some("1 & 2"));
        assert_eq!(doc.child_elements(root).count(), 2);
        assert_eq!(doc.text_content(root), "hi");
    }

    #[test]
    fn resolves_entity_references_in_text() {
        let doc = Document::parse("<a>Tom &amp; Jerry &#65;&#x42;</a>").expect("parse");
        assert_eq!(doc.text_content(doc.root()), "Tom & Jerry AB");
    }

    #[test]
    fn rejects_unclosed_element() {
        let error = Document::parse("<a><b></a>").expect_err("mismatched");
        assert!(matches!(error, XmlError::Syntax { .. }));
        let error = Document::parse("<a><b>").expect_err("unclosed");
        assert!(matches!(error, XmlError::Malformed { .. }));
    }

    #[test]
    fn rejects_missing_or_duplicate_root() {
        assert!(Document::parse("").is_err());
        assert!(Document::parse("   ").is_err());
        assert!(Document::parse("<a/><b/>").is_err());
        assert!(Document::parse("<a/>trailing").is_err());
    }

    #[test]
    fn rejects_unknown_entity() {
        let error = Document::parse("<a>&bogus;</a>").expect_err("entity");
        assert!(matches!(error, XmlError::UnresolvedEntity { .. }));
    }

    #[test]
    fn skips_prolog() {
        let doc = Document::parse(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE xmeml>\n<!-- lead -->\n<xmeml version=\"5\"/>",
        )
        .expect("parse");
        assert_eq!(doc.tag_name(doc.root()), Some("xmeml"));
        assert!(doc.children(doc.root()).is_empty());
    }
}
