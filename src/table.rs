//! Merges records with different attribute sets into one rectangular table.

use std::collections::BTreeSet;
use std::io::{self, Write};

use tracing::warn;

use crate::types::{FIXED_COLUMNS, Record};

/// Rectangular grid of cells with a header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Write the header and every row, tab-separated, one line each.
    /// Cell contents are written verbatim.
    pub fn write_tsv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.columns.join("\t"))?;
        for row in &self.rows {
            writeln!(writer, "{}", row.join("\t"))?;
        }
        writer.flush()
    }

    pub fn to_tsv(&self) -> String {
        let mut out = Vec::new();
        // Writing into a Vec cannot fail
        let _ = self.write_tsv(&mut out);
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Column order: the fixed product columns, then every other key present in
/// any record, sorted ascending
pub fn column_order(records: &[Record]) -> Vec<String> {
    let extra: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.specs.keys())
        .map(String::as_str)
        .filter(|key| !FIXED_COLUMNS.contains(key))
        .collect();

    FIXED_COLUMNS
        .iter()
        .map(|column| column.to_string())
        .chain(extra.into_iter().map(String::from))
        .collect()
}

/// Assemble the table. Zero records produce no table at all.
pub fn assemble(records: &[Record]) -> Option<Table> {
    if records.is_empty() {
        return None;
    }

    let columns = column_order(records);
    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| {
                    let cell = record.get(column).unwrap_or_default();
                    if cell.contains(['\t', '\n', '\r']) {
                        warn!(
                            "Value of '{}' for {} contains a tab or line break; written unescaped",
                            column, record.url
                        );
                    }
                    cell.to_string()
                })
                .collect()
        })
        .collect();

    Some(Table { columns, rows })
}

#[cfg(test)]
#[path = "table_test.rs"]
mod table_test;
