use std::io::BufRead;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::{Result, RunLogError};

/// An element that is still open while walking the document
struct OpenElement {
    name: String,
    text: String,
    has_children: bool,
}

/// A leaf element and the chain of element names leading to it
#[derive(Debug, Clone)]
struct Leaf {
    path: Vec<String>,
    text: String,
}

/// Text content of every leaf element of a document, in document order.
///
/// Lookups are by element name suffix (`"FlowcellRFIDTag/PartNumber"`), so
/// sibling order and extra wrapper elements do not matter.
#[derive(Debug, Clone, Default)]
pub(super) struct ElementIndex {
    leaves: Vec<Leaf>,
}

fn element_name(raw: &[u8], source: &Path) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|e| RunLogError::xml(source, e))
}

impl ElementIndex {
    /// Walk the whole document and record every leaf element
    pub(super) fn from_reader<R: BufRead>(reader: R, source: &Path) -> Result<Self> {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<OpenElement> = Vec::new();
        let mut leaves = Vec::new();
        let mut saw_root = false;
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.has_children = true;
                    }
                    saw_root = true;
                    stack.push(OpenElement {
                        name: element_name(e.local_name().as_ref(), source)?,
                        text: String::new(),
                        has_children: false,
                    });
                }
                Ok(Event::Empty(ref e)) => {
                    if let Some(parent) = stack.last_mut() {
                        parent.has_children = true;
                    }
                    saw_root = true;
                    let mut path: Vec<String> = stack.iter().map(|el| el.name.clone()).collect();
                    path.push(element_name(e.local_name().as_ref(), source)?);
                    leaves.push(Leaf {
                        path,
                        text: String::new(),
                    });
                }
                Ok(Event::Text(ref e)) => {
                    let text = e.unescape().map_err(|err| RunLogError::xml(source, err))?;
                    match stack.last_mut() {
                        Some(open) => open.text.push_str(&text),
                        None if text.trim().is_empty() => {}
                        None => {
                            return Err(RunLogError::xml(source, "text outside the root element"));
                        }
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(open) = stack.last_mut() {
                        open.text.push_str(&String::from_utf8_lossy(e));
                    }
                }
                Ok(Event::End(_)) => {
                    let path: Vec<String> = stack.iter().map(|el| el.name.clone()).collect();
                    if let Some(closed) = stack.pop() {
                        if !closed.has_children {
                            leaves.push(Leaf {
                                path,
                                text: closed.text.trim().to_string(),
                            });
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(RunLogError::xml(source, e)),
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.last() {
            return Err(RunLogError::xml(
                source,
                format!("unexpected end of document inside <{}>", open.name),
            ));
        }
        if !saw_root {
            return Err(RunLogError::xml(source, "document has no root element"));
        }

        Ok(Self { leaves })
    }

    /// Text of the shallowest leaf whose path ends with `suffix`.
    ///
    /// `suffix` is one or more element names joined by `/`. Ties between
    /// equally deep matches go to the first in document order.
    pub(super) fn find(&self, suffix: &str) -> Option<&str> {
        let wanted: Vec<&str> = suffix
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if wanted.is_empty() {
            return None;
        }

        self.leaves
            .iter()
            .filter(|leaf| {
                leaf.path.len() >= wanted.len()
                    && leaf.path[leaf.path.len() - wanted.len()..]
                        .iter()
                        .zip(&wanted)
                        .all(|(have, want)| have == want)
            })
            .min_by_key(|leaf| leaf.path.len())
            .map(|leaf| leaf.text.as_str())
    }

    /// Number of leaf elements in the document
    pub(super) fn len(&self) -> usize {
        self.leaves.len()
    }
}
