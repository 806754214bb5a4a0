//! Table files: tab-separated and JSON.
//!
//! TSV layout mirrors the spreadsheet export: a 1-based `Index` column, the
//! card name, then one `true`/`false` column per attribute.
//!
//! ```text
//! Index	card	ramp	draw
//! 1	Sol Ring	true	false
//! 2	Brainstorm	false	true
//! ```

use std::io::{BufRead, Write};
use std::path::Path;

use super::ordered::AttributeTable;
use super::row::AttributeRow;
use crate::core::{AttributeKey, Error, Result};

const INDEX_HEADER: &str = "Index";
const ID_HEADER: &str = "card";

/// Write `table` as TSV with the given attribute columns.
pub fn write_tsv<W: Write>(table: &AttributeTable, columns: &[AttributeKey], mut out: W) -> Result<()> {
    write!(out, "{INDEX_HEADER}\t{ID_HEADER}")?;
    for col in columns {
        write!(out, "\t{col}")?;
    }
    writeln!(out)?;

    for (i, row) in table.iter().enumerate() {
        write!(out, "{}\t{}", i + 1, row.id)?;
        for col in columns {
            write!(out, "\t{}", row.has(col.as_str()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Read a TSV table.
///
/// The `Index` column is optional. Boolean cells accept
/// `true/false/1/0/yes/no` in any case; an empty cell reads as false.
pub fn read_tsv<R: BufRead>(input: R) -> Result<AttributeTable> {
    let mut lines = input.lines().enumerate();

    let header = loop {
        match lines.next() {
            Some((_, line)) => {
                let line = line?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
            None => return Ok(AttributeTable::new()),
        }
    };

    let mut cells: Vec<&str> = header.split('\t').collect();
    let has_index = cells
        .first()
        .is_some_and(|c| c.trim().eq_ignore_ascii_case(INDEX_HEADER));
    if has_index {
        cells.remove(0);
    }
    if cells.is_empty() {
        return Err(Error::MalformedTable {
            line: 1,
            message: "missing card column".into(),
        });
    }
    let columns: Vec<AttributeKey> = cells[1..].iter().map(|c| AttributeKey::new(c.trim())).collect();

    let mut table = AttributeTable::new();
    for (n, line) in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let line_no = n + 1;

        let mut cells: Vec<&str> = line.split('\t').collect();
        if has_index && !cells.is_empty() {
            cells.remove(0);
        }
        if cells.len() != columns.len() + 1 {
            return Err(Error::MalformedTable {
                line: line_no,
                message: format!("expected {} cells, found {}", columns.len() + 1, cells.len()),
            });
        }

        let mut row = AttributeRow::new(cells[0].trim());
        for (col, cell) in columns.iter().zip(&cells[1..]) {
            let value = parse_bool(cell).ok_or_else(|| Error::MalformedTable {
                line: line_no,
                message: format!("'{}' is not a boolean in column '{col}'", cell.trim()),
            })?;
            row = row.with_flag(col, value);
        }
        table.push(row)?;
    }
    Ok(table)
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Write `table` as a JSON array of `{id, flags}` rows.
pub fn write_json<W: Write>(table: &AttributeTable, out: W) -> Result<()> {
    serde_json::to_writer_pretty(out, table.rows())?;
    Ok(())
}

/// Read a JSON array of `{id, flags}` rows.
pub fn read_json<R: std::io::Read>(input: R) -> Result<AttributeTable> {
    let rows: Vec<AttributeRow> = serde_json::from_reader(input)?;
    AttributeTable::from_rows(rows)
}

/// Load a table, choosing the format by extension (`.json`, else TSV).
pub fn load(path: &Path) -> Result<AttributeTable> {
    let file = std::io::BufReader::new(std::fs::File::open(path)?);
    if is_json(path) {
        read_json(file)
    } else {
        read_tsv(file)
    }
}

/// Save a table, choosing the format by extension (`.json`, else TSV).
pub fn save(path: &Path, table: &AttributeTable, columns: &[AttributeKey]) -> Result<()> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    if is_json(path) {
        write_json(table, &mut file)?;
    } else {
        write_tsv(table, columns, &mut file)?;
    }
    file.flush()?;
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"))
}
