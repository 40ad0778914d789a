//! Classic tab-separated OTU tables, as written by `biom convert --to-tsv`:
//!
//! ```text
//! # Constructed from biom file
//! #OTU ID	S1	S2	taxonomy
//! ACGT...	12	0	k__Bacteria; p__Firmicutes
//! ```
//!
//! A trailing `taxonomy` column is optional. Leading `#` lines other than the
//! header are comments.

use csv::StringRecord;
use std::collections::HashSet;

use super::RawTable;
use spongeworld_core::{SpongeError, SpongeResult};

const TAXONOMY_COLUMN: &str = "taxonomy";

fn is_header(first_cell: &str) -> bool {
    first_cell.starts_with("#OTU")
        || first_cell.starts_with("#Feature")
        || !first_cell.starts_with('#')
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

pub fn parse_tsv_table(text: &str) -> SpongeResult<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header = loop {
        match records.next() {
            Some(record) => {
                let record =
                    record.map_err(|e| SpongeError::load(format!("malformed table: {}", e)))?;
                if is_blank(&record) {
                    continue;
                }
                if is_header(&record[0]) {
                    break record;
                }
            }
            None => return Err(SpongeError::load("table has no header line")),
        }
    };

    let mut columns: Vec<&str> = header.iter().skip(1).collect();
    let with_taxonomy = columns
        .last()
        .map(|c| c.eq_ignore_ascii_case(TAXONOMY_COLUMN))
        .unwrap_or(false);
    if with_taxonomy {
        columns.pop();
    }
    if columns.is_empty() {
        return Err(SpongeError::load("table header lists no samples"));
    }

    let sample_ids: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
    let mut seen = HashSet::new();
    for id in &sample_ids {
        if !seen.insert(id.as_str()) {
            return Err(SpongeError::load(format!("duplicate sample id '{}'", id)));
        }
    }

    let expected = sample_ids.len() + 1 + usize::from(with_taxonomy);
    let mut table = RawTable {
        sample_ids,
        ..Default::default()
    };
    let mut features = HashSet::new();

    for record in records {
        let record = record.map_err(|e| SpongeError::load(format!("malformed table: {}", e)))?;
        if is_blank(&record) {
            continue;
        }
        let line = line_of(&record);
        // A missing taxonomy cell at the end of the line is tolerated
        if record.len() != expected && !(with_taxonomy && record.len() == expected - 1) {
            return Err(SpongeError::load(format!(
                "line {} has {} columns, expected {}",
                line,
                record.len(),
                expected
            )));
        }

        let feature = record[0].to_string();
        if !features.insert(feature.clone()) {
            return Err(SpongeError::load(format!("duplicate feature id '{}'", feature)));
        }
        let row = table.feature_ids.len();

        for col in 0..table.sample_ids.len() {
            let cell = &record[col + 1];
            let value: f64 = cell.trim().parse().map_err(|_| {
                SpongeError::load(format!("line {}: '{}' is not a number", line, cell))
            })?;
            if value != 0.0 {
                table.entries.push((row, col, value));
            }
        }

        let taxonomy = if with_taxonomy {
            record
                .get(table.sample_ids.len() + 1)
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
        } else {
            None
        };
        table.taxonomy.push(taxonomy);
        table.feature_ids.push(feature);
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_with_taxonomy() {
        let text = "# Constructed from biom file\n\
                    #OTU ID\tS1\tS2\ttaxonomy\n\
                    ACGT\t12\t0\tk__Bacteria; p__Firmicutes\n\
                    TTGA\t0.5\t3\t\n";
        let table = parse_tsv_table(text).unwrap();
        assert_eq!(table.sample_ids, vec!["S1", "S2"]);
        assert_eq!(table.feature_ids, vec!["ACGT", "TTGA"]);
        assert_eq!(table.entries, vec![(0, 0, 12.0), (1, 0, 0.5), (1, 1, 3.0)]);
        assert_eq!(
            table.taxonomy,
            vec![Some("k__Bacteria; p__Firmicutes".to_string()), None]
        );
    }

    #[test]
    fn test_parse_without_header_comment() {
        let table = parse_tsv_table("feature\tA\tB\nAC\t1\t2\n").unwrap();
        assert_eq!(table.sample_ids, vec!["A", "B"]);
        assert_eq!(table.taxonomy, vec![None]);
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let text = "# Constructed from biom file\n\
                    # second comment\n\
                    \n\
                    #Feature ID\tS1\n\
                    AC\t4\n\
                    \n\
                    GT\t1\n";
        let table = parse_tsv_table(text).unwrap();
        assert_eq!(table.sample_ids, vec!["S1"]);
        assert_eq!(table.feature_ids, vec!["AC", "GT"]);
        assert_eq!(table.entries, vec![(0, 0, 4.0), (1, 0, 1.0)]);
    }

    #[test]
    fn test_quotes_kept_verbatim() {
        let text = "#OTU ID\tS1\ttaxonomy\nAC\t1\tk__\"Candidatus\" Foo\n";
        let table = parse_tsv_table(text).unwrap();
        assert_eq!(table.taxonomy[0].as_deref(), Some("k__\"Candidatus\" Foo"));
    }

    #[test]
    fn test_bad_number() {
        match parse_tsv_table("#OTU ID\tS1\nAC\tlots\n").unwrap_err() {
            SpongeError::Load(msg) => assert!(msg.contains("line 2")),
            e => panic!("Expected Load error, got {:?}", e),
        }
    }

    #[test]
    fn test_ragged_row() {
        assert!(parse_tsv_table("#OTU ID\tS1\tS2\nAC\t1\n").is_err());
    }

    #[test]
    fn test_duplicate_feature() {
        assert!(parse_tsv_table("#OTU ID\tS1\nAC\t1\nAC\t2\n").is_err());
    }

    #[test]
    fn test_duplicate_sample() {
        match parse_tsv_table("#OTU ID\tS1\tS1\nAC\t1\t2\n").unwrap_err() {
            SpongeError::Load(msg) => assert!(msg.contains("duplicate sample id 'S1'")),
            e => panic!("Expected Load error, got {:?}", e),
        }
    }

    #[test]
    fn test_no_header() {
        assert!(parse_tsv_table("# only a comment\n").is_err());
    }
}
