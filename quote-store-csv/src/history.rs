use std::path::{Path, PathBuf};

use quote_core::{HistoryEntry, HistoryLog, StoreError};
use tracing::debug;

use crate::{into_parse_error, write_table_atomically};

/// Finalized-quote ledger persisted as a single CSV file.
///
/// `append` is read-all, add-one, rewrite-all. The log is an audit trail;
/// nothing in the application ever edits or deletes a row.
pub struct CsvHistoryLog {
    path: PathBuf,
}

impl CsvHistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryLog for CsvHistoryLog {
    fn load(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let text = std::fs::read_to_string(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        reader
            .deserialize::<HistoryEntry>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(into_parse_error)
    }

    fn append(
        &self,
        entry: &HistoryEntry,
    ) -> Result<(), StoreError> {
        let mut rows = self.load()?;
        rows.push(entry.clone());
        debug!(path = %self.path.display(), rows = rows.len(), "rewriting history log");
        write_table_atomically(&self.path, &rows)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use quote_core::HistoryLog;
    use rust_decimal_macros::dec;

    use super::*;

    fn entry(
        client: &str,
        total: rust_decimal::Decimal,
    ) -> HistoryEntry {
        HistoryEntry::new(
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
            client,
            total,
            None,
        )
    }

    #[test]
    fn load_of_missing_file_is_empty_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvHistoryLog::new(dir.path().join("historico.csv"));

        assert!(log.load().unwrap().is_empty());
        assert!(!log.path().exists(), "load alone should not create the log");
    }

    #[test]
    fn append_is_monotonic() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvHistoryLog::new(dir.path().join("historico.csv"));

        log.append(&entry("Acme Corp", dec!(2400.00))).unwrap();
        log.append(&entry("Condomínio Solar", dec!(7350.50))).unwrap();
        log.append(&entry("Acme Corp", dec!(980.00))).unwrap();

        let rows = log.load().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].client_name, "Acme Corp");
        assert_eq!(rows[1].total, dec!(7350.50));
        assert_eq!(rows[2].total, dec!(980.00));
    }

    #[test]
    fn contact_link_round_trips_through_an_empty_cell() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvHistoryLog::new(dir.path().join("historico.csv"));

        let with_link = HistoryEntry::new(
            NaiveDate::from_ymd_opt(2026, 8, 8).unwrap(),
            "Acme Corp",
            dec!(2400.00),
            Some("https://wa.me/5542999990000?text=Ol%C3%A1".to_string()),
        );
        log.append(&with_link).unwrap();
        log.append(&entry("Sem Contato", dec!(100.00))).unwrap();

        let rows = log.load().unwrap();
        assert_eq!(rows[0].contact_link.as_deref(), Some("https://wa.me/5542999990000?text=Ol%C3%A1"));
        assert_eq!(rows[1].contact_link, None);
    }

    #[test]
    fn dates_survive_the_round_trip_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let log = CsvHistoryLog::new(dir.path().join("historico.csv"));

        log.append(&entry("Acme Corp", dec!(2400.00))).unwrap();

        assert_eq!(log.load().unwrap()[0].date, "08/08/2026");
    }
}
