use crate::core::io::traits::TableFile;
use crate::core::models::interaction::{InteractionRecord, InteractionTable, TABLE_HEADER};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

const COLUMN_SEPARATOR: &str = "  ";
const HEADER_PADDING: usize = 2;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

const ALIGNMENT: [Align; 6] = [
    Align::Left,
    Align::Left,
    Align::Center,
    Align::Center,
    Align::Center,
    Align::Center,
];

/// Plain-text table with a dashed rule under the header.
///
/// Orbital columns are left-aligned and numeric columns centered. Every column is at
/// least two characters wider than its title.
pub struct TextTable;

impl TextTable {
    pub fn render(table: &InteractionTable) -> String {
        let rows: Vec<[String; 6]> = table.iter().map(InteractionRecord::cells).collect();

        let mut widths = TABLE_HEADER.map(|title| char_width(title) + HEADER_PADDING);
        for row in &rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(char_width(cell));
            }
        }

        let mut out = String::new();
        push_line(&mut out, TABLE_HEADER.iter().copied(), &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        push_line(&mut out, rule.iter().map(String::as_str), &widths);
        for row in &rows {
            push_line(&mut out, row.iter().map(String::as_str), &widths);
        }
        out
    }
}

impl TableFile for TextTable {
    type Error = TableError;

    fn write_to(table: &InteractionTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        writer.write_all(Self::render(table).as_bytes())?;
        Ok(())
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Donor orbital")]
    donor: String,
    #[serde(rename = "Acceptor orbital")]
    acceptor: String,
    #[serde(rename = "Donor occupancy")]
    donor_occupancy: &'a str,
    #[serde(rename = "Acceptor occupancy")]
    acceptor_occupancy: &'a str,
    #[serde(rename = "Charge transfer (e)")]
    charge_transfer: &'a str,
    #[serde(rename = "E2 energy (kcal/mol)")]
    e2_energy: &'a str,
}

/// Comma-separated table with the same columns and precision as [`TextTable`].
pub struct CsvTable;

impl TableFile for CsvTable {
    type Error = TableError;

    fn write_to(table: &InteractionTable, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        if table.is_empty() {
            csv_writer.write_record(TABLE_HEADER)?;
        }
        for record in table {
            let [donor, acceptor, donor_occ, acceptor_occ, qct, e2] = record.cells();
            csv_writer.serialize(CsvRow {
                donor,
                acceptor,
                donor_occupancy: &donor_occ,
                acceptor_occupancy: &acceptor_occ,
                charge_transfer: &qct,
                e2_energy: &e2,
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

fn char_width(s: &str) -> usize {
    s.chars().count()
}

fn push_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>, widths: &[usize; 6]) {
    let line: Vec<String> = cells
        .zip(widths.iter().zip(ALIGNMENT))
        .map(|(cell, (width, align))| pad(cell, *width, align))
        .collect();
    out.push_str(line.join(COLUMN_SEPARATOR).trim_end());
    out.push('\n');
}

fn pad(cell: &str, width: usize, align: Align) -> String {
    let fill = width.saturating_sub(char_width(cell));
    match align {
        Align::Left => format!("{}{}", cell, " ".repeat(fill)),
        Align::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), cell, " ".repeat(fill - left))
        }
    }
}
