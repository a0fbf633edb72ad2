use std::fs::File;
use std::io::Read;
use std::iter;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Range, Reader};
use sheetref_core::{parse_cell_input, CellValue, Sheet, Table};

use crate::config::Config;
use crate::error::{CliError, Result};

/// Extensions opened as workbooks; anything else is read as CSV
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load a sheet from `path`, picking the reader by file extension
pub fn load_sheet(path: &Path, config: &Config) -> Result<Sheet> {
    if is_workbook(path) {
        load_workbook(path, config)
    } else {
        load_csv(path, config)
    }
}

/// Whether `path` names a spreadsheet workbook
pub fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            WORKBOOK_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Read a CSV file into a sheet named after the file stem
pub fn load_csv(path: &Path, config: &Config) -> Result<Sheet> {
    let file = File::open(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sheet = read_csv(file, name, config)?;
    log_loaded(path, &sheet);
    Ok(sheet)
}

/// Read the first worksheet of a workbook into a sheet named after that worksheet
pub fn load_workbook(path: &Path, config: &Config) -> Result<Sheet> {
    let mut workbook = open_workbook_auto(path)?;
    let name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CliError::NoWorksheets(path.display().to_string()))?;
    let range = workbook.worksheet_range(&name)?;

    let sheet = range_to_sheet(&range, name, config.has_headers);
    log_loaded(path, &sheet);
    Ok(sheet)
}

/// Convert a worksheet range into a sheet
///
/// Columns left of the used range are kept as empty columns so labels match
/// the workbook. With `has_headers`, the first used row becomes the headers.
pub fn range_to_sheet(range: &Range<Data>, name: impl Into<String>, has_headers: bool) -> Sheet {
    let col_offset = range.start().map_or(0, |(_, col)| col as usize);
    let mut rows = range.rows().map(|row| {
        iter::repeat(CellValue::Empty)
            .take(col_offset)
            .chain(row.iter().map(cell_value))
            .collect::<Vec<_>>()
    });
    let headers = if has_headers { rows.next() } else { None };

    let mut sheet = Sheet::new(name);
    for row in rows {
        sheet.push_row(row);
    }
    match headers {
        Some(headers) => sheet.with_headers(headers.iter().map(CellValue::as_text)),
        None => sheet,
    }
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

fn log_loaded(path: &Path, sheet: &Sheet) {
    tracing::info!(
        path = %path.display(),
        sheet = %sheet.name,
        n_rows = sheet.n_rows(),
        n_cols = sheet.n_cols(),
        "loaded sheet"
    );
}

/// Read CSV data into a sheet, classifying every field
///
/// Records may have different lengths; short ones are padded with empty cells.
pub fn read_csv<R: Read>(reader: R, name: impl Into<String>, config: &Config) -> Result<Sheet> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .flexible(true)
        .from_reader(reader);

    let headers: Option<Vec<String>> = if config.has_headers {
        Some(reader.headers()?.iter().map(str::to_string).collect())
    } else {
        None
    };

    let mut sheet = Sheet::new(name);
    for result in reader.records() {
        let record = result?;
        sheet.push_row(record.iter().map(parse_cell_input).collect());
    }

    if let Some(headers) = headers {
        sheet = sheet.with_headers(headers);
    }

    Ok(sheet)
}
