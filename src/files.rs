//! URL-list input and output sinks.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::errors::ScrapeError;
use crate::table;
use crate::types::{OutputFormat, Record};

/// Read one URL per line, trimmed. Blank lines are kept as (empty) URLs.
pub fn read_urls(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let content = std::fs::read_to_string(path).map_err(|source| ScrapeError::InputFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content.lines().map(|line| line.trim().to_string()).collect())
}

/// Open the output file, or stdout when no path is given
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>, ScrapeError> {
    match path {
        Some(path) => {
            let file = File::create(path).map_err(|e| output_error(path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Write records in the requested format. TSV output for zero records is
/// empty; JSON output is one object per line.
pub fn write_records<W: Write>(
    records: &[Record],
    format: OutputFormat,
    mut sink: W,
) -> io::Result<()> {
    match format {
        OutputFormat::Tsv => match table::assemble(records) {
            Some(table) => table.write_tsv(sink),
            None => Ok(()),
        },
        OutputFormat::Json => {
            for record in records {
                serde_json::to_writer(&mut sink, record)?;
                writeln!(sink)?;
            }
            sink.flush()
        }
    }
}

/// Write one line per item
pub fn write_lines<W: Write>(lines: &[String], mut sink: W) -> io::Result<()> {
    for line in lines {
        writeln!(sink, "{}", line)?;
    }
    sink.flush()
}

pub fn output_error(path: impl Into<PathBuf>, err: io::Error) -> ScrapeError {
    ScrapeError::Output(format!("{}: {}", path.into().display(), err))
}
