/*!
 * XML-to-tree adapter for bureau documents
 *
 * Converts raw XML text into a navigable [`XmlNode`] tree with two properties
 * the extractors rely on:
 *
 * - Repeatable elements are stored uniformly: every child name maps to an
 *   ordered sequence, and [`XmlNode::children`] always hands back a slice.
 *   A document with one `CAIS_Account_DETAILS` element and a document with
 *   five produce the same shape, so no extractor ever re-checks plurality.
 * - Attributes are merged into the same namespace as child elements, as leaf
 *   nodes. The bureau format never names an attribute and a child element
 *   identically, so collisions are out of scope.
 *
 * No schema validation is performed. Malformed XML fails with
 * [`InprofileError::XmlParse`] carrying the quick-xml message.
 */

use std::collections::BTreeMap;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::{InprofileError, Result};

/// One element in the parsed document tree
///
/// Attributes and child elements share the same child map; text content is
/// unescaped and whitespace-trimmed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XmlNode {
    text: String,
    children: BTreeMap<String, Vec<XmlNode>>,
}

impl XmlNode {
    /// Parse an XML document into a tree
    ///
    /// The returned node is a synthetic document node whose children are the
    /// document's top-level elements.
    pub fn parse(xml: &str) -> Result<XmlNode> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        // Bottom of the stack is the synthetic document node.
        let mut stack: Vec<(String, XmlNode)> = vec![(String::new(), XmlNode::default())];

        loop {
            match reader.read_event()? {
                Event::Start(start) => {
                    let (name, node) = element_node(&start)?;
                    stack.push((name, node));
                }
                Event::Empty(empty) => {
                    let (name, node) = element_node(&empty)?;
                    if let Some((_, parent)) = stack.last_mut() {
                        parent.push_child(name, node);
                    }
                }
                Event::Text(text) => {
                    let text = text.unescape()?;
                    if let Some((_, node)) = stack.last_mut() {
                        node.text.push_str(text.trim());
                    }
                }
                Event::CData(cdata) => {
                    let text = String::from_utf8_lossy(cdata.as_ref()).into_owned();
                    if let Some((_, node)) = stack.last_mut() {
                        node.text.push_str(text.trim());
                    }
                }
                Event::End(_) => {
                    if stack.len() < 2 {
                        return Err(InprofileError::XmlParse {
                            message: "unexpected closing tag".to_string(),
                        });
                    }
                    // Unwraps are safe: length checked above.
                    let (name, node) = stack.pop().unwrap();
                    let (_, parent) = stack.last_mut().unwrap();
                    parent.push_child(name, node);
                }
                Event::Eof => break,
                // Declarations, comments, processing instructions and doctypes
                // carry no report data.
                _ => {}
            }
        }

        match stack.pop() {
            Some((_, doc)) if stack.is_empty() => Ok(doc),
            _ => Err(InprofileError::XmlParse {
                message: "unclosed element at end of document".to_string(),
            }),
        }
    }

    fn leaf(text: String) -> XmlNode {
        XmlNode {
            text,
            children: BTreeMap::new(),
        }
    }

    fn push_child(&mut self, name: String, child: XmlNode) {
        self.children.entry(name).or_default().push(child);
    }

    /// Text content of this node (empty for pure container elements)
    pub fn text(&self) -> &str {
        &self.text
    }

    /// First child with the given name, if any
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.get(name).and_then(|nodes| nodes.first())
    }

    /// All children with the given name as a slice, empty when absent
    ///
    /// This is the single place where singleton-vs-sequence ambiguity is
    /// resolved: callers iterate this slice and never branch on plurality.
    pub fn children(&self, name: &str) -> &[XmlNode] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Descend a path of child names, stopping at the first absent link
    pub fn at(&self, path: &[&str]) -> Option<&XmlNode> {
        let mut node = self;
        for name in path {
            node = node.child(name)?;
        }
        Some(node)
    }

    /// Text of the named child, or `""` when the child is absent
    pub fn field(&self, name: &str) -> &str {
        self.child(name).map(XmlNode::text).unwrap_or("")
    }
}

/// Build a node for an opening or self-closing element, with its attributes
/// merged in as leaf children
fn element_node(start: &quick_xml::events::BytesStart<'_>) -> Result<(String, XmlNode)> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = XmlNode::default();
    for attr in start.attributes() {
        let attr = attr?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.push_child(key, XmlNode::leaf(value));
    }
    Ok((name, node))
}
