use crate::error::{MeltError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Track fields exported when no selection is given
pub const DEFAULT_FIELDS: [&str; 7] = [
    "Name",
    "Location",
    "Artist",
    "Album",
    "Track ID",
    "Total Time",
    "Date Added",
];

/// One flattened leaf dictionary - becomes one row in the output table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Selected field name -> text value (None when the value element had no text)
    values: HashMap<String, Option<String>>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: Option<String>) {
        self.values.insert(field.into(), value);
    }

    /// Value for a field; `None` if the field was never populated or had no text
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).and_then(|v| v.as_deref())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Lay the record out in column order, missing fields as empty cells
    pub fn row<'a, S: AsRef<str>>(&'a self, fields: &[S]) -> Vec<&'a str> {
        fields
            .iter()
            .map(|f| self.get(f.as_ref()).unwrap_or(""))
            .collect()
    }
}

/// Configuration for the melting process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeltConfig {
    /// Ordered field selection; also the output column order
    pub fields: Vec<String>,

    /// Top-level key whose dictionaries are flattened into rows
    pub tracked_section: String,

    /// Sibling top-level section that is skipped entirely
    pub ignored_section: String,

    /// Emit a progress line every N structural events (0 = never)
    pub progress_interval: u64,
}

impl Default for MeltConfig {
    fn default() -> Self {
        MeltConfig {
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            tracked_section: String::from("Tracks"),
            ignored_section: String::from("Playlists"),
            progress_interval: 4000,
        }
    }
}

impl MeltConfig {
    /// Load a config from a JSON file; missing keys fall back to defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: MeltConfig = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the field selection with a comma-separated list
    pub fn with_fields_list(mut self, list: &str) -> Self {
        self.fields = list
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(MeltError::InvalidConfig(
                "field selection is empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.as_str()) {
                return Err(MeltError::InvalidConfig(format!(
                    "field '{}' selected more than once",
                    field
                )));
            }
        }

        if self.tracked_section.is_empty() {
            return Err(MeltError::InvalidConfig(
                "tracked section name is empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Column names for the header row: field names with spaces stripped
    pub fn header(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.replace(' ', "")).collect()
    }
}

/// Counters for a completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MeltStats {
    /// Structural events consumed from the source
    pub events: u64,

    /// Rows written to the sink
    pub records: u64,

    /// The source ended while a populated record was still open
    pub discarded_partial: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_strips_spaces() {
        let config = MeltConfig::default();
        assert_eq!(
            config.header(),
            vec!["Name", "Location", "Artist", "Album", "TrackID", "TotalTime", "DateAdded"]
        );
    }

    #[test]
    fn test_row_fills_missing_with_empty() {
        let mut record = Record::new();
        record.insert("Album", Some("Blue".to_string()));
        record.insert("Name", None);

        assert_eq!(record.row(&["Name", "Artist", "Album"][..]), vec!["", "", "Blue"]);
        assert!(record.contains("Name"));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_fields_list_override() {
        let config = MeltConfig::default().with_fields_list(" Name , Track ID,,");
        assert_eq!(config.fields, vec!["Name", "Track ID"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let dup = MeltConfig::default().with_fields_list("Name,Name");
        assert!(matches!(dup.validate(), Err(MeltError::InvalidConfig(_))));

        let empty = MeltConfig::default().with_fields_list(" , ");
        assert!(matches!(empty.validate(), Err(MeltError::InvalidConfig(_))));
    }

    #[test]
    fn test_config_from_json_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("melt.json");
        std::fs::write(&path, r#"{"fields": ["Artist", "Play Count"], "progress_interval": 10}"#)
            .unwrap();

        let config = MeltConfig::from_json_file(&path).unwrap();
        assert_eq!(config.fields, vec!["Artist", "Play Count"]);
        assert_eq!(config.progress_interval, 10);
        assert_eq!(config.tracked_section, "Tracks");
        assert_eq!(config.ignored_section, "Playlists");
    }

    #[test]
    fn test_config_from_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("melt.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            MeltConfig::from_json_file(&path),
            Err(MeltError::Config(_))
        ));
    }
}
