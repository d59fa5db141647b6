use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::TableFormat;
use crate::error::{LineageError, Result};
use crate::types::{LineageRecord, COLUMNS, RANK_COUNT};

/// Load lineage records from a delimited file, in file order.
pub fn load(path: impl AsRef<Path>, format: &TableFormat) -> Result<Vec<LineageRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| LineageError::io(path, err))?;
    let records = parse_table(BufReader::new(file), format).map_err(|err| match err {
        LineageError::Io { source, .. } => LineageError::io(path, source),
        other => other,
    })?;
    log::info!("Loaded {} lineage records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse a lineage table from any buffered reader.
pub fn parse_table<R: BufRead>(reader: R, format: &TableFormat) -> Result<Vec<LineageRecord>> {
    format.validate()?;

    let mut records = Vec::new();
    let mut header_seen = false;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|err| LineageError::io("<input>", err))?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }

        if !header_seen {
            check_header(line, line_no, format)?;
            header_seen = true;
            continue;
        }

        records.push(parse_row(line, line_no, format)?);
    }

    if !header_seen {
        return Err(LineageError::format(1, "missing header row"));
    }
    Ok(records)
}

fn check_header(line: &str, line_no: usize, format: &TableFormat) -> Result<()> {
    let header: Vec<&str> = line.split(format.delimiter).map(str::trim).collect();
    if header != COLUMNS {
        return Err(LineageError::format(
            line_no,
            format!(
                "expected header [{}], found [{}]",
                COLUMNS.join(", "),
                header.join(", ")
            ),
        ));
    }
    Ok(())
}

/// Cells are taken verbatim: `"P_1 "` and `"P_1"` are different labels.
fn parse_row(line: &str, line_no: usize, format: &TableFormat) -> Result<LineageRecord> {
    let fields: Vec<&str> = line.split(format.delimiter).collect();
    if fields.len() > COLUMNS.len() {
        return Err(LineageError::format(
            line_no,
            format!(
                "{} fields for {} columns",
                fields.len(),
                COLUMNS.len()
            ),
        ));
    }

    let key = fields[0];
    if format.is_missing(key) {
        return Err(LineageError::format(line_no, "missing UViG key"));
    }

    let mut ranks: [Option<String>; RANK_COUNT] = Default::default();
    for (slot, cell) in ranks.iter_mut().zip(fields.iter().skip(1)) {
        if !format.is_missing(cell) {
            *slot = Some((*cell).to_string());
        }
    }

    Ok(LineageRecord::new(key, ranks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rank;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    const HEADER: &str = "UViGs\tPhylum\tClass\tOrder\tFamily\tGenus\tSpecies\n";

    fn parse(body: &str) -> Result<Vec<LineageRecord>> {
        parse_table(Cursor::new(format!("{HEADER}{body}")), &TableFormat::default())
    }

    #[test]
    fn parses_full_and_partial_rows() {
        let records = parse(
            "Virus_001\tP_1\tC_1\tO_1\tF_1\tG_1\tS_1\n\
             Virus_002\tP_1\tC_2\tO_2\tF_2\t\t\n\
             Virus_003\tP_2\tC_3\n",
        )
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].present_prefix().len(), 6);
        assert_eq!(records[1].present_prefix(), vec!["P_1", "C_2", "O_2", "F_2"]);
        assert_eq!(records[2].rank(Rank::Order), None);
    }

    #[test]
    fn keeps_interior_gaps_positional() {
        let records = parse("Virus_004\tP_1\t\tO_1\tNA\tG_1\t-\n").unwrap();
        let record = &records[0];
        assert_eq!(record.rank(Rank::Class), None);
        assert_eq!(record.rank(Rank::Order), Some("O_1"));
        assert_eq!(record.rank(Rank::Family), None);
        assert_eq!(record.rank(Rank::Genus), Some("G_1"));
        assert_eq!(record.present_prefix(), vec!["P_1"]);
    }

    #[test]
    fn skips_blank_lines_and_crlf() {
        let records = parse("\r\nVirus_005\tP_1\tC_1\r\n\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "Virus_005");
        assert_eq!(records[0].present_prefix(), vec!["P_1", "C_1"]);
    }

    #[test]
    fn label_equal_to_custom_placeholder_is_kept() {
        let format = TableFormat::default().with_placeholder("Bacteria");
        let records = parse_table(
            Cursor::new(format!("{HEADER}V1\tP_1\tBacteria\tO_1\n")),
            &format,
        )
        .unwrap();
        assert_eq!(records[0].present_prefix(), vec!["P_1", "Bacteria", "O_1"]);
    }

    #[test]
    fn cells_are_not_trimmed() {
        let records = parse("Virus_011\tP_1 \tC_1\n").unwrap();
        assert_eq!(records[0].rank(Rank::Phylum), Some("P_1 "));
        assert_ne!(
            records[0].present_prefix(),
            LineageRecord::from_labels("Virus_011", &["P_1", "C_1"]).present_prefix()
        );
    }

    #[test]
    fn rejects_unexpected_header() {
        let err = parse_table(
            Cursor::new("UViG\tPhylum\tClass\n"),
            &TableFormat::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LineageError::Format { line: 1, .. }));
    }

    #[test]
    fn rejects_row_with_extra_fields() {
        let err = parse("Virus_001\tP_1\n\
             Virus_006\tP\tC\tO\tF\tG\tS\textra\n")
        .unwrap_err();
        match err {
            LineageError::Format { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("8 fields"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_missing_key() {
        let err = parse("\tP_1\tC_1\n").unwrap_err();
        assert!(matches!(err, LineageError::Format { line: 2, .. }));
    }

    #[test]
    fn rejects_empty_input() {
        let err = parse_table(Cursor::new(""), &TableFormat::default()).unwrap_err();
        assert!(matches!(err, LineageError::Format { line: 1, .. }));
    }

    #[test]
    fn load_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.tsv");
        let err = load(&missing, &TableFormat::default()).unwrap_err();
        match err {
            LineageError::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts.tsv");
        std::fs::write(&path, format!("{HEADER}Virus_001\tP_1\tC_1\n")).unwrap();
        let records = load(&path, &TableFormat::default()).unwrap();
        assert_eq!(records, vec![LineageRecord::from_labels("Virus_001", &["P_1", "C_1"])]);
    }
}
