/// Depth of the top-level dictionary holding the section keys
pub const METADATA_DEPTH: usize = 1;
/// Depth of a section's own dictionary (e.g. the dict under `Tracks`)
pub const GROUP_DEPTH: usize = 2;
/// Depth of the leaf dictionaries that become rows
pub const RECORD_DEPTH: usize = 3;

/// Logical zone of the document, derived from container depth and the tracking flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Outside every dictionary
    Root,
    /// Inside the top-level dictionary, where section keys live
    Metadata,
    /// Inside the tracked section's dictionary, between records
    Group,
    /// Inside one leaf dictionary of the tracked section
    Record,
    /// Inside an untracked section, or nested below a record
    Other,
}

impl Region {
    pub fn at(depth: usize, tracking: bool) -> Self {
        match (depth, tracking) {
            (0, _) => Region::Root,
            (METADATA_DEPTH, _) => Region::Metadata,
            (_, false) => Region::Other,
            (GROUP_DEPTH, true) => Region::Group,
            (RECORD_DEPTH, true) => Region::Record,
            (_, true) => Region::Other,
        }
    }
}
