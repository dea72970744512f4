//! Tab-separated export files.
//!
//! The header row holds identifier labels followed by concept display names;
//! duplicate names are written as they are. Every field is quoted.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use packer_model::ExportTable;
use tracing::info;

use crate::error::{OutputError, Result};

/// Extension of export files.
pub const TSV_EXTENSION: &str = "tsv";

/// File name of an export called `name`.
pub fn export_file_name(name: &str) -> String {
    format!("{name}.{TSV_EXTENSION}")
}

/// Serialize a table to any writer.
pub fn write_tsv_to<W: Write>(table: &ExportTable, writer: W) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);
    writer.write_record(table.header())?;
    for row in table.rendered_rows() {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Serialize a table to a string.
pub fn to_tsv_string(table: &ExportTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_tsv_to(table, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Write `<name>.tsv` into `dir`, creating the directory when needed.
pub fn write_tsv(table: &ExportTable, dir: &Path, name: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir).map_err(|source| OutputError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(export_file_name(name));
    let file = File::create(&path).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    write_tsv_to(table, BufWriter::new(file))?;
    info!(
        path = %path.display(),
        row_count = table.height(),
        column_count = table.width(),
        "wrote export file"
    );
    Ok(path)
}
