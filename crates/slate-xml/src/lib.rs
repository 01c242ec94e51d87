//! In-memory XML document model.
//!
//! Parses a whole document into an arena of nodes, offers tag-name and
//! descendant queries over it, supports the few in-place mutations the clip
//! renamer needs (text replacement, subtree cloning) and writes it back out.

mod document;
mod error;
mod parse;
mod serialize;

pub use document::{Descendants, Document, Element, NodeId, NodeKind};
pub use error::{Result, XmlError};
pub use serialize::XML_HEADER;
