pub mod csv_table;

pub use csv_table::{CsvTable, StorageError, TableBackend};
