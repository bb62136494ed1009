//! # plist-melt - flatten property-list libraries into CSV
//!
//! Reads a property-list XML document (such as an iTunes/Music library
//! export) in a single forward pass and writes one CSV row per leaf
//! dictionary of the tracked section, keeping only a fixed set of fields.
//! The whole document is never held in memory: at most one in-progress
//! record plus a few counters are retained at any time.
//!
//! ## Modules
//!
//! - **event**: pull-based structural events over quick-xml
//! - **melt**: the projection state machine and the CSV row writer
//! - **progress**: periodic "elements parsed" lines on stderr
//!
//! ## Quick Start
//!
//! ```rust
//! use plist_melt::{melt_plist, MeltConfig};
//!
//! # fn main() -> anyhow::Result<()> {
//! let xml = r#"<plist><dict><key>Tracks</key><dict>
//!   <key>1</key><dict><key>Track ID</key><integer>1</integer><key>Name</key><string>Intro</string></dict>
//! </dict></dict></plist>"#;
//!
//! let config = MeltConfig::default().with_fields_list("Track ID,Name");
//! let mut csv = Vec::new();
//! let stats = melt_plist(xml.as_bytes(), &mut csv, std::io::sink(), &config)?;
//!
//! assert_eq!(stats.records, 1);
//! assert_eq!(String::from_utf8(csv)?, "TrackID,Name\r\n1,Intro\r\n");
//! # Ok(())
//! # }
//! ```

use std::io::{BufRead, Write};
use tracing::info;

pub mod error;
pub mod event;
pub mod melt;
pub mod progress;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{MeltError, Result};
pub use event::{ElementKind, EventSource, PlistEvent};
pub use melt::{Projector, Records, Region, RowWriter};
pub use progress::ProgressReporter;
pub use types::{MeltConfig, MeltStats, Record, DEFAULT_FIELDS};

/// Main entry point: melt a plist stream into CSV rows
///
/// The header row is written first, then one row per completed record.
/// Progress lines go to `progress_out`. On a parse error every row flushed
/// before the failure is already in `output`.
pub fn melt_plist<R, W, P>(
    input: R,
    output: W,
    progress_out: P,
    config: &MeltConfig,
) -> Result<MeltStats>
where
    R: BufRead,
    W: Write,
    P: Write,
{
    config.validate()?;

    let mut writer = RowWriter::new(output, config)?;
    let mut progress = ProgressReporter::new(progress_out, config.progress_interval);

    let events = EventSource::new(input).inspect(|event| {
        if let Ok(event) = event {
            progress.observe(event);
        }
    });
    let mut records = Records::new(events, config);

    let mut failure = None;
    for record in records.by_ref() {
        match record {
            Ok(record) => writer.write_record(&record)?,
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }
    let discarded_partial = records.discarded_partial();
    drop(records);

    writer.flush()?;
    if let Some(e) = failure {
        return Err(e);
    }

    let stats = MeltStats {
        events: progress.events(),
        records: writer.rows_written(),
        discarded_partial,
    };
    info!(
        events = stats.events,
        records = stats.records,
        discarded_partial = stats.discarded_partial,
        "melt finished"
    );

    Ok(stats)
}
