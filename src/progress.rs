use crate::event::PlistEvent;
use std::io::Write;
use tracing::debug;

/// Periodic "N elements parsed..." lines on a diagnostic stream
pub struct ProgressReporter<W: Write> {
    out: W,
    interval: u64,
    elements: u64,
    events: u64,
}

impl<W: Write> ProgressReporter<W> {
    /// `interval` of 0 disables output; counting still happens
    pub fn new(out: W, interval: u64) -> Self {
        ProgressReporter {
            out,
            interval,
            elements: 0,
            events: 0,
        }
    }

    /// Count one event. Only closing events (`Leave`, `Element`) are elements.
    pub fn observe(&mut self, event: &PlistEvent) {
        self.events += 1;
        if matches!(event, PlistEvent::Enter) {
            return;
        }

        self.elements += 1;
        if self.interval > 0 && self.elements % self.interval == 0 {
            debug!(elements = self.elements, "progress");
            // Best effort: progress lines never fail the run
            let _ = writeln!(self.out, "{} elements parsed...", self.elements);
        }
    }

    pub fn elements(&self) -> u64 {
        self.elements
    }

    pub fn events(&self) -> u64 {
        self.events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_interval() {
        let mut out = Vec::new();
        {
            let mut progress = ProgressReporter::new(&mut out, 2);
            for _ in 0..5 {
                progress.observe(&PlistEvent::Enter);
                progress.observe(&PlistEvent::Leave);
            }
            assert_eq!(progress.events(), 10);
            assert_eq!(progress.elements(), 5);
        }
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "2 elements parsed...\n4 elements parsed...\n"
        );
    }

    #[test]
    fn test_zero_interval_is_silent() {
        let mut out = Vec::new();
        let mut progress = ProgressReporter::new(&mut out, 0);
        for _ in 0..10 {
            progress.observe(&PlistEvent::key("Name"));
        }
        assert_eq!(progress.elements(), 10);
        drop(progress);
        assert!(out.is_empty());
    }
}
