//! Structural events pulled from a property-list XML stream
//!
//! `EventSource` wraps a quick-xml reader and turns the raw markup into three
//! kinds of events: entering a `<dict>`, leaving one, and the close of any
//! other element together with its text. A single read buffer is reused and
//! cleared before every read, so nothing belonging to a closed container is
//! kept around once its `Leave` event has been handed out.

use crate::error::{MeltError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Element classification by plist tag name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// `<dict>` - the only element that changes nesting depth
    Container,
    /// `<key>`
    Key,
    /// String-like scalar: string, integer, real, date, data, true, false
    Value,
    /// Anything else (`plist`, `array`, unknown tags)
    Other,
}

impl ElementKind {
    pub fn from_tag(name: &[u8]) -> Self {
        match name {
            b"dict" => ElementKind::Container,
            b"key" => ElementKind::Key,
            b"string" | b"integer" | b"real" | b"date" | b"data" | b"true" | b"false" => {
                ElementKind::Value
            }
            _ => ElementKind::Other,
        }
    }
}

/// One structural event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistEvent {
    /// A container opened
    Enter,
    /// A container closed
    Leave,
    /// A non-container element closed; `text` is its unescaped content
    Element {
        kind: ElementKind,
        text: Option<String>,
    },
}

impl PlistEvent {
    pub fn key(text: &str) -> Self {
        PlistEvent::Element {
            kind: ElementKind::Key,
            text: Some(text.to_string()),
        }
    }

    pub fn value(text: &str) -> Self {
        PlistEvent::Element {
            kind: ElementKind::Value,
            text: Some(text.to_string()),
        }
    }
}

/// Forward-only pull source of `PlistEvent`s
pub struct EventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    /// Elements opened but not yet closed
    open: usize,
    /// Text seen since the most recent start or end tag
    text: Option<String>,
    /// Second half of a self-closing `<dict/>`
    queued: Option<PlistEvent>,
    done: bool,
}

impl<R: BufRead> EventSource<R> {
    pub fn new(input: R) -> Self {
        EventSource {
            reader: Reader::from_reader(input),
            buf: Vec::with_capacity(1024),
            open: 0,
            text: None,
            queued: None,
            done: false,
        }
    }

    /// Byte offset of the reader in the input
    pub fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }

    fn next_event(&mut self) -> Result<Option<PlistEvent>> {
        if let Some(event) = self.queued.take() {
            return Ok(Some(event));
        }

        loop {
            self.buf.clear();
            let event = match self.reader.read_event_into(&mut self.buf) {
                Ok(event) => event,
                Err(e) => {
                    return Err(MeltError::Xml {
                        position: self.reader.error_position() as u64,
                        message: e.to_string(),
                    })
                }
            };

            match event {
                Event::Start(e) => {
                    self.open += 1;
                    self.text = None;
                    if ElementKind::from_tag(e.name().as_ref()) == ElementKind::Container {
                        return Ok(Some(PlistEvent::Enter));
                    }
                }
                Event::End(e) => {
                    self.open = self.open.saturating_sub(1);
                    let text = self.text.take();
                    let event = match ElementKind::from_tag(e.name().as_ref()) {
                        ElementKind::Container => PlistEvent::Leave,
                        ElementKind::Other => PlistEvent::Element {
                            kind: ElementKind::Other,
                            text: None,
                        },
                        kind => PlistEvent::Element { kind, text },
                    };
                    return Ok(Some(event));
                }
                Event::Empty(e) => {
                    self.text = None;
                    let kind = ElementKind::from_tag(e.name().as_ref());
                    if kind == ElementKind::Container {
                        self.queued = Some(PlistEvent::Leave);
                        return Ok(Some(PlistEvent::Enter));
                    }
                    return Ok(Some(PlistEvent::Element { kind, text: None }));
                }
                Event::Text(t) => {
                    let unescaped = t.unescape().map_err(|e| MeltError::Xml {
                        position: self.reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    self.text
                        .get_or_insert_with(String::new)
                        .push_str(&unescaped);
                }
                Event::CData(c) => {
                    let raw = std::str::from_utf8(&c).map_err(|e| MeltError::Xml {
                        position: self.reader.buffer_position() as u64,
                        message: e.to_string(),
                    })?;
                    self.text.get_or_insert_with(String::new).push_str(raw);
                }
                Event::Eof => {
                    if self.open > 0 {
                        return Err(MeltError::Truncated { open: self.open });
                    }
                    return Ok(None);
                }
                // Declarations, doctype, comments and processing instructions
                _ => {}
            }
        }
    }
}

impl<R: BufRead> Iterator for EventSource<R> {
    type Item = Result<PlistEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        match self.next_event() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
