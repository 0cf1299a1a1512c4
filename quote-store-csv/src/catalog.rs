use std::path::{Path, PathBuf};

use quote_core::{CatalogStore, MaterialRecord, StoreError};
use rust_decimal_macros::dec;
use tracing::{debug, info};

use crate::{into_parse_error, write_table_atomically};

/// Materials catalog persisted as a single CSV file.
pub struct CsvCatalogStore {
    path: PathBuf,
}

impl CsvCatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The table a fresh installation starts from.
    fn seed() -> Vec<MaterialRecord> {
        vec![
            MaterialRecord::new(
                "Impermeabilização de Janelas (Kit)",
                "Selante fibrado + Mão de obra",
                dec!(3500.00),
            ),
            MaterialRecord::new(
                "Mão de Obra (Diária Equipe)",
                "02 Alpinistas + Equipamentos",
                dec!(1200.00),
            ),
            MaterialRecord::new(
                "Selante Fibrado (Balde)",
                "Balde 10kg Industrial",
                dec!(950.00),
            ),
            MaterialRecord::new("Taxa de Mobilização", "Transporte e Montagem", dec!(500.00)),
        ]
    }

    fn parse(text: &str) -> Result<Vec<MaterialRecord>, StoreError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        reader
            .deserialize::<MaterialRecord>()
            .collect::<Result<Vec<_>, _>>()
            .map_err(into_parse_error)
    }
}

impl CatalogStore for CsvCatalogStore {
    fn load(&self) -> Result<Vec<MaterialRecord>, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no catalog file, creating seed table");
            let seed = Self::seed();
            self.save(&seed)?;
            return Ok(seed);
        }

        let text = std::fs::read_to_string(&self.path)?;
        Self::parse(&text)
    }

    fn save(
        &self,
        records: &[MaterialRecord],
    ) -> Result<(), StoreError> {
        debug!(path = %self.path.display(), rows = records.len(), "rewriting catalog");
        write_table_atomically(&self.path, records)
    }

    fn restore(
        &self,
        backup: &str,
    ) -> Result<usize, StoreError> {
        let records = Self::parse(backup).map_err(|e| match e {
            StoreError::Parse(msg) => StoreError::InvalidBackup(msg),
            other => other,
        })?;

        self.save(&records)?;
        info!(rows = records.len(), "catalog restored from backup");
        Ok(records.len())
    }
}
