use csv::{ReaderBuilder, Writer};
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::error::ScoutError;
use crate::persistence::assembler::{normalize_rows, Table};
use crate::persistence::record::{Cell, PartnerRecord, RawRow};
use crate::refinery::catalog::catalog;

/// Writes the table as CSV with the fixed header
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<(), ScoutError> {
    let mut wtr = Writer::from_writer(writer);

    wtr.write_record(table.columns())?;
    for record in table.iter() {
        wtr.write_record(record.to_cells())?;
    }

    wtr.flush()?;
    Ok(())
}

pub fn export_csv(table: &Table, output_path: &Path) -> Result<(), ScoutError> {
    debug!("Exporting {} partners to CSV: {}", table.len(), output_path.display());

    let file = File::create(output_path)?;
    write_csv(table, file)?;

    info!("Exported CSV: {} ({} rows)", output_path.display(), table.len());
    Ok(())
}

/// Reads CSV rows back as loosely-typed rows keyed by header
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<RawRow>, ScoutError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = rdr.headers()?.clone();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

/// Re-imports an exported CSV through the table normalizer
pub fn import_csv(input_path: &Path) -> Result<Table, ScoutError> {
    let file = File::open(input_path)?;
    let rows = read_csv(file)?;
    debug!("Read {} rows from {}", rows.len(), input_path.display());
    Ok(normalize_rows(rows))
}

#[derive(Serialize)]
struct JsonExport<'a> {
    summary: ExportSummary,
    partners: &'a [PartnerRecord],
}

#[derive(Serialize)]
struct ExportSummary {
    total_partners: usize,
    industry_columns: usize,
    partners_with_profile: usize,
    partners_with_industries: usize,
}

pub fn to_json(table: &Table) -> Result<String, ScoutError> {
    let export = JsonExport {
        summary: ExportSummary {
            total_partners: table.len(),
            industry_columns: catalog().len(),
            partners_with_profile: table.iter().filter(|r| !r.profile_url.is_empty()).count(),
            partners_with_industries: table
                .iter()
                .filter(|r| !r.industries.is_all_zero())
                .count(),
        },
        partners: table.records(),
    };

    Ok(serde_json::to_string_pretty(&export)?)
}

pub fn export_json(table: &Table, output_path: &Path) -> Result<(), ScoutError> {
    debug!("Exporting {} partners to JSON: {}", table.len(), output_path.display());

    let json_string = to_json(table)?;
    let mut file = File::create(output_path)?;
    file.write_all(json_string.as_bytes())?;

    info!("Exported JSON: {} ({} rows)", output_path.display(), table.len());
    Ok(())
}

// * Sheet name used for the Excel export
const XLSX_SHEET_NAME: &str = "Partners";

// * Builds the workbook: bold header row, then one row per record.
// * Counts and present extras are numeric cells; absent extras stay blank.
fn build_workbook(table: &Table) -> Result<Workbook, ScoutError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(XLSX_SHEET_NAME)?;

    for (col, title) in (0u16..).zip(table.columns()) {
        worksheet.write_string_with_format(0, col, title, &header_format)?;
    }

    for (row, record) in (1u32..).zip(table.iter()) {
        for (col, cell) in (0u16..).zip(record.typed_cells()) {
            match cell {
                Cell::Text(text) => {
                    worksheet.write_string(row, col, text.as_str())?;
                }
                Cell::Number(n) => {
                    worksheet.write_number(row, col, n as f64)?;
                }
                Cell::Blank => {}
            }
        }
    }

    Ok(workbook)
}

/// Renders the table as an in-memory `.xlsx` file
pub fn write_xlsx_buffer(table: &Table) -> Result<Vec<u8>, ScoutError> {
    let mut workbook = build_workbook(table)?;
    Ok(workbook.save_to_buffer()?)
}

pub fn export_xlsx(table: &Table, output_path: &Path) -> Result<(), ScoutError> {
    debug!("Exporting {} partners to XLSX: {}", table.len(), output_path.display());

    let mut workbook = build_workbook(table)?;
    workbook.save(output_path)?;

    info!("Exported XLSX: {} ({} rows)", output_path.display(), table.len());
    Ok(())
}
