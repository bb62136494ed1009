//! Streaming projection of plist events into flat records
//!
//! `Projector` is the state machine: it sees one event at a time and keeps
//! only the container depth, the tracking flag, the pending key and the
//! record being built. A record is handed out when its dictionary closes and
//! is dropped from the projector at that point.

use crate::error::Result;
use crate::event::{ElementKind, PlistEvent};
use crate::melt::region::Region;
use crate::types::{MeltConfig, Record};
use tracing::{debug, trace};

/// Depth/key state machine turning structural events into records
#[derive(Debug)]
pub struct Projector {
    fields: Vec<String>,
    tracked_section: String,
    ignored_section: String,
    depth: usize,
    tracking: bool,
    /// Index into `fields` of the key awaiting its value
    pending: Option<usize>,
    current: Record,
}

impl Projector {
    pub fn new(config: &MeltConfig) -> Self {
        Projector {
            fields: config.fields.clone(),
            tracked_section: config.tracked_section.clone(),
            ignored_section: config.ignored_section.clone(),
            depth: 0,
            tracking: false,
            pending: None,
            current: Record::new(),
        }
    }

    pub fn region(&self) -> Region {
        Region::at(self.depth, self.tracking)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    /// In-progress records held right now (0 or 1)
    pub fn retained_records(&self) -> usize {
        usize::from(!self.current.is_empty())
    }

    /// Feed one event; returns a record when one is completed
    pub fn advance(&mut self, event: PlistEvent) -> Option<Record> {
        match event {
            PlistEvent::Enter => {
                self.depth += 1;
                None
            }
            PlistEvent::Leave => {
                self.depth = self.depth.saturating_sub(1);
                if self.region() == Region::Group {
                    self.flush()
                } else {
                    None
                }
            }
            PlistEvent::Element { kind, text } => {
                match (self.region(), kind) {
                    (Region::Metadata, ElementKind::Key) => self.enter_section(text.as_deref()),
                    (Region::Record, ElementKind::Key) => {
                        self.pending = text
                            .as_deref()
                            .and_then(|key| self.fields.iter().position(|f| f == key));
                    }
                    (Region::Record, ElementKind::Value) => {
                        if let Some(index) = self.pending.take() {
                            self.current.insert(self.fields[index].clone(), text);
                        }
                    }
                    _ => {}
                }
                None
            }
        }
    }

    /// Source exhausted: drop any unclosed record. Returns true if one was populated.
    pub fn finish(&mut self) -> bool {
        self.pending = None;
        let discarded = !self.current.is_empty();
        if discarded {
            debug!(fields = self.current.len(), "discarding unclosed record at end of input");
        }
        self.current = Record::new();
        discarded
    }

    fn enter_section(&mut self, key: Option<&str>) {
        let tracking = key == Some(self.tracked_section.as_str());
        if tracking != self.tracking {
            let ignored = key == Some(self.ignored_section.as_str());
            debug!(section = key.unwrap_or(""), tracking, ignored, "section switch");
        }
        self.tracking = tracking;
    }

    fn flush(&mut self) -> Option<Record> {
        self.pending = None;
        if self.current.is_empty() {
            return None;
        }
        let record = std::mem::take(&mut self.current);
        trace!(fields = record.len(), "record flushed");
        Some(record)
    }
}

/// Lazy record sequence over an event iterator
pub struct Records<I> {
    events: I,
    projector: Projector,
    discarded_partial: bool,
    done: bool,
}

impl<I> Records<I>
where
    I: Iterator<Item = Result<PlistEvent>>,
{
    pub fn new(events: I, config: &MeltConfig) -> Self {
        Records {
            events,
            projector: Projector::new(config),
            discarded_partial: false,
            done: false,
        }
    }

    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// Whether the source ended with a populated, unclosed record
    pub fn discarded_partial(&self) -> bool {
        self.discarded_partial
    }
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Result<PlistEvent>>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            match self.events.next() {
                Some(Ok(event)) => {
                    if let Some(record) = self.projector.advance(event) {
                        return Some(Ok(record));
                    }
                }
                Some(Err(e)) => {
                    self.done = true;
                    return Some(Err(e));
                }
                None => {
                    self.done = true;
                    self.discarded_partial = self.projector.finish();
                    return None;
                }
            }
        }
    }
}
