use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::config::TableFormat;
use crate::error::{LineageError, Result};
use crate::types::{ConsensusLineage, COLUMNS};

/// Write consensus lineages as a delimited table.
pub fn write(
    path: impl AsRef<Path>,
    lineages: &[ConsensusLineage],
    format: &TableFormat,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|err| LineageError::io(path, err))?;
    let mut out = BufWriter::new(file);
    write_table(&mut out, lineages, format)
        .and_then(|()| out.flush())
        .map_err(|err| LineageError::io(path, err))?;
    log::info!("Wrote {} consensus lineages to {}", lineages.len(), path.display());
    Ok(())
}

/// Serialize header and rows into any writer.
pub fn write_table<W: Write>(
    out: &mut W,
    lineages: &[ConsensusLineage],
    format: &TableFormat,
) -> std::io::Result<()> {
    let delimiter = format.delimiter.to_string();
    writeln!(out, "{}", COLUMNS.join(delimiter.as_str()))?;

    for lineage in lineages {
        let mut row = Vec::with_capacity(COLUMNS.len());
        row.push(lineage.key.as_str());
        row.extend(
            lineage
                .slots
                .iter()
                .map(|slot| slot.label().unwrap_or(&format.placeholder)),
        );
        writeln!(out, "{}", row.join(delimiter.as_str()))?;
    }
    Ok(())
}
