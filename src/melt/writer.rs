use crate::error::{MeltError, Result};
use crate::types::{MeltConfig, Record};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;

/// Writes records as CSV rows in the configured column order
pub struct RowWriter<W: Write> {
    writer: csv::Writer<W>,
    fields: Vec<String>,
    rows: u64,
}

impl<W: Write> RowWriter<W> {
    /// Create the writer and emit the header row straight away
    pub fn new(output: W, config: &MeltConfig) -> Result<Self> {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::CRLF)
            .from_writer(output);

        writer.write_record(config.header())?;

        Ok(RowWriter {
            writer,
            fields: config.fields.clone(),
            rows: 0,
        })
    }

    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.writer.write_record(record.row(self.fields.as_slice()))?;
        self.rows += 1;
        Ok(())
    }

    /// Data rows written so far (header excluded)
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and hand back the underlying output
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| MeltError::Io(e.into_error()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(records: &[Record], config: &MeltConfig) -> String {
        let mut writer = RowWriter::new(Vec::new(), config).unwrap();
        for record in records {
            writer.write_record(record).unwrap();
        }
        assert_eq!(writer.rows_written(), records.len() as u64);
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_header_only() {
        let output = written(&[], &MeltConfig::default());
        assert_eq!(output, "Name,Location,Artist,Album,TrackID,TotalTime,DateAdded\r\n");
    }

    #[test]
    fn test_row_in_column_order() {
        let config = MeltConfig::default().with_fields_list("Name,Artist,Album");
        let mut record = Record::new();
        record.insert("Album", Some("Kind of Blue".to_string()));
        record.insert("Name", Some("So What".to_string()));

        let output = written(&[record], &config);
        assert_eq!(output, "Name,Artist,Album\r\nSo What,,Kind of Blue\r\n");
    }

    #[test]
    fn test_minimal_quoting_round_trips() {
        let config = MeltConfig::default().with_fields_list("Name,Artist");
        let tricky = "Say \"hi\", Björk — 東京";
        let mut record = Record::new();
        record.insert("Name", Some(tricky.to_string()));
        record.insert("Artist", Some("plain".to_string()));

        let output = written(&[record], &config);
        assert!(output.contains("\"Say \"\"hi\"\", Björk — 東京\""));
        assert!(output.contains(",plain\r\n"));

        let mut reader = csv::Reader::from_reader(output.as_bytes());
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], tricky);
        assert_eq!(&row[1], "plain");
    }
}
