//! Tracking sheet scraping.
//!
//! Downloads the public HTML tracking sheet and turns its first table into
//! participant records.

mod fetcher;
mod table;

pub use fetcher::{TrackingSheetFetcher, DEFAULT_SHEET_URL};
pub use table::{
    parse_miles, parse_tables, participants_from_table, Table, TableError, COUNTRY_COLUMN,
    MILES_COLUMN, NAME_COLUMN,
};
