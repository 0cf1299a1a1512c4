//! CSV-backed implementations of the `CatalogStore` and `HistoryLog`
//! traits from `quote-core`.
//!
//! Both stores are single flat files rewritten wholesale on every save.
//! Writes go through a temporary file in the same directory followed by a
//! rename, so a crash mid-write can never leave a half-written table behind.
//!
//! ## Catalog file format
//!
//! | Column       | Required | Notes                                   |
//! |--------------|----------|-----------------------------------------|
//! | `name`       | yes      |                                         |
//! | `description`| no       | Older files omit this column entirely   |
//! | `unit_price` | yes      | decimal, e.g. `950.00`                  |
//!
//! ## History file format
//!
//! | Column         | Required | Notes                        |
//! |----------------|----------|------------------------------|
//! | `date`         | yes      | `DD/MM/YYYY`                 |
//! | `client_name`  | yes      |                              |
//! | `total`        | yes      | decimal                      |
//! | `contact_link` | no       | empty cell when no contact   |

mod catalog;
mod history;

pub use catalog::CsvCatalogStore;
pub use history::CsvHistoryLog;

use std::path::Path;

use quote_core::StoreError;
use serde::Serialize;

/// Serializes `rows` as CSV into a temp file next to `path`, then renames it
/// over `path`. The replace is atomic on the platforms we care about.
fn write_table_atomically<T: Serialize>(
    path: &Path,
    rows: &[T],
) -> Result<(), StoreError> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let tmp = match dir {
        Some(dir) => tempfile::NamedTempFile::new_in(dir)?,
        None => tempfile::NamedTempFile::new_in(".")?,
    };

    {
        let mut writer = csv::Writer::from_writer(tmp.as_file());
        for row in rows {
            writer.serialize(row).map_err(into_parse_error)?;
        }
        writer.flush()?;
    }

    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

fn into_parse_error(err: csv::Error) -> StoreError {
    StoreError::Parse(err.to_string())
}
