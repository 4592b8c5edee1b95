//! HTML table extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Participant;

/// Sheet column holding the runner's name
pub const NAME_COLUMN: &str = "C";
/// Sheet column holding the country code
pub const COUNTRY_COLUMN: &str = "E";
/// Sheet column holding cumulative miles
pub const MILES_COLUMN: &str = "H";

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid table selector"));
static ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tr").expect("valid row selector"));
static CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th, td").expect("valid cell selector"));
static MILES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([0-9][0-9,]*(?:\.[0-9]+)?|\.[0-9]+)").expect("valid miles pattern")
});

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("tracking sheet has no tables")]
    NoTables,

    #[error("table has no column '{0}'")]
    MissingColumn(String),

    #[error("invalid mileage '{value}' for {name}")]
    InvalidMiles { name: String, value: String },
}

/// A scraped HTML table: first row is the header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the column with the given header
    pub fn column(&self, name: &str) -> Result<usize, TableError> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }
}

/// Cell text, empty for cells past the end of a short row
fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Extract every `<table>` in the document
pub fn parse_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);

    document
        .select(&TABLE)
        .map(|table| {
            let mut rows = table.select(&ROW).map(|tr| {
                tr.select(&CELL)
                    .map(|cell| cell_text(&cell))
                    .collect::<Vec<_>>()
            });
            let headers = rows.next().unwrap_or_default();
            Table {
                headers,
                rows: rows.collect(),
            }
        })
        .collect()
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse the leading number of a mileage cell ("1,234.5", "412.3 mi")
pub fn parse_miles(value: &str) -> Option<f64> {
    let caps = MILES.captures(value)?;
    caps[1].replace(',', "").parse().ok()
}

/// Participants from the given country in the first table of the sheet
pub fn participants_from_table(
    tables: &[Table],
    country: &str,
) -> Result<Vec<Participant>, TableError> {
    let table = tables.first().ok_or(TableError::NoTables)?;

    let name_idx = table.column(NAME_COLUMN)?;
    let country_idx = table.column(COUNTRY_COLUMN)?;
    let miles_idx = table.column(MILES_COLUMN)?;

    let mut participants = Vec::new();
    for row in &table.rows {
        if cell(row, country_idx) != country {
            continue;
        }

        let name = cell(row, name_idx);
        let raw_miles = cell(row, miles_idx);
        let miles = parse_miles(raw_miles).ok_or_else(|| TableError::InvalidMiles {
            name: name.to_string(),
            value: raw_miles.to_string(),
        })?;

        debug!("{} ({}): {} miles", name, country, miles);
        participants.push(Participant::new(name, country, miles));
    }

    info!(
        "Kept {} of {} rows for country {}",
        participants.len(),
        table.rows.len(),
        country
    );
    Ok(participants)
}
