//! CSV import/export for grid rows, plus parsing of tab-separated clipboard
//! blocks.

use std::io::{Read, Write};

use crate::domain::model::{Column, ProfileType, Row};
use crate::utils::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Read rows from CSV text. Headers are matched by column key or label;
/// unknown headers are ignored and missing columns read as empty. Blank lines
/// and records are skipped.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mapping: Vec<Option<Column>> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            // 第一個欄位可能帶 BOM
            let header = if i == 0 { h.trim_start_matches('\u{feff}') } else { h };
            let column = Column::from_header(header);
            if column.is_none() && !header.trim().is_empty() {
                tracing::debug!("Ignoring unknown CSV header '{}'", header);
            }
            column
        })
        .collect();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut row = Row::with_id(rows.len() as u64 + 1);
        for (value, column) in record.iter().zip(mapping.iter()) {
            if let Some(column) = column {
                row.set(*column, value);
            }
        }
        if !row.is_blank() {
            rows.push(row);
        }
    }

    tracing::debug!("Read {} rows from CSV", rows.len());
    Ok(rows)
}

/// Write a BOM, the header row (column keys) and each row, quoting fields
/// that contain commas, quotes or newlines.
pub fn write_rows<W: Write>(mut writer: W, columns: &[Column], rows: &[Row]) -> Result<()> {
    writer.write_all(UTF8_BOM)?;

    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(columns.iter().map(|c| c.key()))?;
    for row in rows {
        csv_writer.write_record(columns.iter().map(|c| row.get(*c)))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Header-only CSV for a profile type.
pub fn template(profile: ProfileType) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_rows(&mut buf, &Column::for_profile(profile), &[])?;
    Ok(buf)
}

/// Split clipboard text into a cell grid: lines on `\n` (a trailing `\r` is
/// dropped), cells on tabs. Blank lines are skipped.
pub fn parse_clipboard_block(text: &str) -> Vec<Vec<String>> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split('\t').map(str::to_string).collect())
        .collect()
}
