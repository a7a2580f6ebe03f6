use crate::bbn::error::{BeliefNetError, Result};
use crate::bbn::model::network::Record;
use log::{debug, trace};
use std::io::{BufRead, Write};

/// How to read delimited input.
#[derive(Debug, Clone, PartialEq)]
pub struct TabularOptions {
    pub delimiter: char,
    /// Explicit column names. When `None` the first line is the header.
    pub columns: Option<Vec<String>>,
}

impl Default for TabularOptions {
    fn default() -> Self {
        TabularOptions {
            delimiter: ',',
            columns: None,
        }
    }
}

/// Parsed delimited input.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn split_line(line: &str, delimiter: char) -> Vec<String> {
    line.split(delimiter).map(|field| field.trim().to_string()).collect()
}

/// Reads a header (unless columns are given) and equal-length rows.
pub fn read_table<R: BufRead>(reader: R, options: &TabularOptions) -> Result<Table> {
    let mut columns = options.columns.clone();
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_line(&line, options.delimiter);
        let expected = match &columns {
            Some(header) => header.len(),
            None => {
                trace!("read_table - header {:?}", fields);
                columns = Some(fields);
                continue;
            }
        };
        if fields.len() != expected {
            return Err(BeliefNetError::MalformedRow {
                line: i + 1,
                expected,
                got: fields.len(),
            });
        }
        rows.push(fields);
    }

    let columns = columns.ok_or(BeliefNetError::EmptyInput)?;
    debug!("read_table - {} columns, {} rows", columns.len(), rows.len());
    Ok(Table { columns, rows })
}

/// Writes a header row and one line per record, values in `columns` order.
pub fn write_records<W: Write>(
    mut writer: W,
    columns: &[String],
    records: &[Record],
    delimiter: char,
) -> Result<()> {
    let separator = delimiter.to_string();
    writeln!(writer, "{}", columns.join(&separator))?;
    for record in records {
        let mut fields = Vec::with_capacity(columns.len());
        for column in columns {
            let value = record
                .get(column)
                .ok_or_else(|| BeliefNetError::UnknownNode(column.clone()))?;
            fields.push(value.to_string());
        }
        writeln!(writer, "{}", fields.join(&separator))?;
    }
    writer.flush()?;
    Ok(())
}
