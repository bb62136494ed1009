//! Plist melting - project leaf dictionaries of one section into flat rows
//!
//! `Projector` is the single-pass state machine; `Records` adapts it into a
//! lazy iterator over an event source; `RowWriter` serialises records as CSV.

pub mod projector;
pub mod region;
pub mod writer;

pub use projector::{Projector, Records};
pub use region::Region;
pub use writer::RowWriter;
