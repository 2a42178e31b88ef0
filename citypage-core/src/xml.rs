//! Minimal owned element tree over `quick-xml` pull events.
//!
//! The feed documents are small and deeply optional, so both parsers build
//! this tree once and read typed views out of it. Text content is kept
//! exactly as published: no trimming and no line-ending normalization.

use std::fmt::Display;

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::error::ParseError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
    text: String,
}

impl Element {
    /// Parse a whole document and return its root element.
    pub(crate) fn parse(xml: &str) -> Result<Self, ParseError> {
        let mut reader = Reader::from_str(xml);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event().map_err(malformed)? {
                Event::Start(e) => open.push(Self::from_start(&e)?),
                Event::Empty(e) => {
                    let element = Self::from_start(&e)?;
                    attach(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| malformed("closing tag without matching opening tag"))?;
                    attach(&mut open, &mut root, element)?;
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(malformed)?;
                    push_text(&mut open, &text)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e).map_err(malformed)?;
                    push_text(&mut open, text)?;
                }
                Event::Eof => break,
                // declaration, comments, processing instructions, doctype
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(malformed(format!("unclosed element <{}>", unclosed.name)));
        }

        root.ok_or_else(|| malformed("document has no root element"))
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, ParseError> {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(malformed)?.into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Text directly inside this element, verbatim.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }

    /// First child with the given name.
    pub(crate) fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub(crate) fn children<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub(crate) fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).map(Element::text)
    }
}

fn attach(
    open: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(malformed("more than one root element")),
    }
    Ok(())
}

fn push_text(open: &mut [Element], text: &str) -> Result<(), ParseError> {
    match open.last_mut() {
        Some(parent) => parent.text.push_str(text),
        None if text.trim_start_matches('\u{feff}').trim().is_empty() => {}
        None => return Err(malformed("text outside the root element")),
    }
    Ok(())
}

fn malformed(err: impl Display) -> ParseError {
    ParseError::MalformedXml(err.to_string())
}
