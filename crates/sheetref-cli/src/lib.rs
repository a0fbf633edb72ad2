pub mod config;
pub mod error;
pub mod loader;
pub mod render;

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use sheetref_core::{resolve, select, Selection, Sheet, SheetSelection, Table};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::loader::load_sheet;
use crate::render::render_sheet;

/// Select cells, ranges and columns from a CSV file or workbook using spreadsheet references.
#[derive(Parser, Debug)]
#[command(name = "sheetref", version)]
pub struct Args {
    /// CSV file or workbook (.xlsx, .xlsm, .xlsb, .xls, .ods) to load
    pub file: PathBuf,

    /// References to select, e.g. `A1`, `B2:D9`, `C` or `A:B`
    pub references: Vec<String>,

    /// CSV field delimiter (overrides SHEETREF_DELIMITER)
    #[arg(short, long)]
    pub delimiter: Option<char>,

    /// Treat the first record as data rather than headers
    #[arg(long)]
    pub no_headers: bool,

    /// Output format (overrides SHEETREF_FORMAT)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the whole sheet before any selections
    #[arg(long)]
    pub show: bool,
}

#[derive(Serialize)]
struct JsonSelection<'a> {
    reference: &'a str,
    result: &'a SheetSelection,
}

#[derive(Serialize)]
struct JsonSheet<'a> {
    sheet: &'a Sheet,
}

/// Install the stderr tracing subscriber; `RUST_LOG` wins over `default_filter`
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    // A subscriber may already be installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load the file named in `args` and write every requested selection to `out`
pub fn run(args: &Args, config: &Config, out: &mut impl Write) -> Result<()> {
    let sheet = load_sheet(&args.file, config)?;

    if args.show || args.references.is_empty() {
        match config.format {
            OutputFormat::Text => write!(out, "{}", render_sheet(&sheet, 1))?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &JsonSheet { sheet: &sheet })?;
                writeln!(out)?;
            }
        }
    }

    let labelled = args.show || args.references.len() > 1;
    for reference in &args.references {
        let (selection, first_row) = query(&sheet, reference)?;
        match config.format {
            OutputFormat::Text => {
                if labelled {
                    writeln!(out, "== {} ==", reference)?;
                }
                match &selection {
                    Selection::Scalar(value) => writeln!(out, "{}", value)?,
                    Selection::Table(sub) => write!(out, "{}", render_sheet(sub, first_row))?,
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(
                    &mut *out,
                    &JsonSelection {
                        reference,
                        result: &selection,
                    },
                )?;
                writeln!(out)?;
            }
        }
    }

    Ok(())
}

/// Select `reference` from `sheet`, returning the first source row number too
fn query(sheet: &Sheet, reference: &str) -> Result<(SheetSelection, usize)> {
    let wrap = |source| CliError::Reference {
        reference: reference.to_string(),
        source,
    };

    let descriptor = resolve(reference, sheet.shape()).map_err(wrap)?;
    let selection = select(sheet, &descriptor).map_err(wrap)?;
    Ok((selection, descriptor.start_row.unwrap_or(1)))
}
