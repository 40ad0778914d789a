//! Per-sample metadata from a tab-delimited mapping file.
//!
//! The first column holds the sample identifier and the header row names the
//! fields. Empty or missing cells, and cells holding one of the usual
//! spreadsheet null markers (`NA`, `N/A`, `NaN`, `null`, ...), read as `"na"`.
//! Every field, the identifier
//! field included, is stored dictionary-coded so that per value sample counts
//! are computed once.

use std::collections::HashMap;
use std::path::Path;

use crate::formats::read_input;
use spongeworld_core::{SpongeError, SpongeResult};

/// Placeholder stored for missing cells
pub const MISSING_VALUE: &str = "na";

/// Cell contents that mean "no value", matched exactly
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    cell.is_empty() || NULL_MARKERS.contains(&cell)
}

/// One metadata field, dictionary-coded
#[derive(Debug, Clone, Default)]
pub struct FieldColumn {
    /// Distinct values in order of first appearance
    values: Vec<String>,
    lookup: HashMap<String, u32>,
    /// Value code of every sample
    codes: Vec<u32>,
    /// Samples per value code
    counts: Vec<usize>,
}

impl FieldColumn {
    fn push(&mut self, value: &str) {
        let code = match self.lookup.get(value) {
            Some(&code) => code,
            None => {
                let code = self.values.len() as u32;
                self.values.push(value.to_string());
                self.lookup.insert(value.to_string(), code);
                self.counts.push(0);
                code
            }
        };
        self.codes.push(code);
        self.counts[code as usize] += 1;
    }

    /// Code of the value carried by `sample`
    pub fn code(&self, sample: usize) -> u32 {
        self.codes[sample]
    }

    pub fn value(&self, code: u32) -> &str {
        &self.values[code as usize]
    }

    pub fn value_of(&self, sample: usize) -> &str {
        self.value(self.code(sample))
    }

    /// Number of distinct values
    pub fn cardinality(&self) -> usize {
        self.values.len()
    }

    pub fn count(&self, code: u32) -> usize {
        self.counts[code as usize]
    }

    /// Samples whose value equals `value` exactly
    pub fn count_value(&self, value: &str) -> usize {
        self.lookup.get(value).map(|&c| self.count(c)).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MetadataTable {
    fields: Vec<String>,
    sample_ids: Vec<String>,
    columns: Vec<FieldColumn>,
}

impl MetadataTable {
    /// Builds a table from a header and raw rows; rows are padded with
    /// [`MISSING_VALUE`] and empty cells replaced by it.
    pub fn from_rows(fields: Vec<String>, rows: Vec<Vec<String>>) -> SpongeResult<Self> {
        if fields.is_empty() {
            return Err(SpongeError::load("metadata table has no header"));
        }
        let mut seen = HashMap::with_capacity(rows.len());
        let mut table = Self {
            columns: vec![FieldColumn::default(); fields.len()],
            fields,
            sample_ids: Vec::with_capacity(rows.len()),
        };

        for (line, row) in rows.into_iter().enumerate() {
            if row.len() > table.fields.len() {
                return Err(SpongeError::load(format!(
                    "metadata row {} has {} cells but the header names {} fields",
                    line + 2,
                    row.len(),
                    table.fields.len()
                )));
            }
            let id = row.first().map(|s| s.as_str()).unwrap_or("");
            if id.is_empty() {
                return Err(SpongeError::load(format!(
                    "metadata row {} has no sample id",
                    line + 2
                )));
            }
            if seen.insert(id.to_string(), line).is_some() {
                return Err(SpongeError::load(format!(
                    "duplicate sample id '{}' in metadata",
                    id
                )));
            }
            table.sample_ids.push(id.to_string());
            for (f, column) in table.columns.iter_mut().enumerate() {
                let cell = row.get(f).map(|s| s.as_str()).unwrap_or("");
                column.push(if is_missing(cell) { MISSING_VALUE } else { cell });
            }
        }
        Ok(table)
    }

    /// Parses tab-delimited text with a header row.
    pub fn parse(bytes: &[u8]) -> SpongeResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(bytes);

        let fields: Vec<String> = reader
            .headers()
            .map_err(|e| SpongeError::load(format!("cannot read metadata header: {}", e)))?
            .iter()
            .map(String::from)
            .collect();
        if fields.iter().all(|f| f.is_empty()) {
            return Err(SpongeError::load("metadata table has no header"));
        }

        let mut rows = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| SpongeError::load(format!("malformed metadata: {}", e)))?;
            // Blank lines come through as a single empty cell
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            rows.push(record.iter().map(String::from).collect());
        }
        Self::from_rows(fields, rows)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> SpongeResult<Self> {
        let path = path.as_ref();
        let bytes = read_input(path)?;
        Self::parse(&bytes).map_err(|e| match e {
            SpongeError::Load(msg) => SpongeError::Load(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Keeps the listed samples, in the listed order, recomputing value counts.
    pub fn select(&self, samples: &[usize]) -> Self {
        let mut columns = vec![FieldColumn::default(); self.fields.len()];
        for &s in samples {
            for (column, source) in columns.iter_mut().zip(&self.columns) {
                column.push(source.value_of(s));
            }
        }
        Self {
            fields: self.fields.clone(),
            sample_ids: samples.iter().map(|&s| self.sample_ids[s].clone()).collect(),
            columns,
        }
    }

    /// Field names, the identifier field first
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Header of the first (sample identifier) column
    pub fn id_field(&self) -> &str {
        &self.fields[0]
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn len(&self) -> usize {
        self.sample_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sample_ids.is_empty()
    }

    /// Row of every sample id
    pub fn sample_positions(&self) -> HashMap<&str, usize> {
        self.sample_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect()
    }

    pub fn column(&self, field: &str) -> SpongeResult<&FieldColumn> {
        self.fields
            .iter()
            .position(|f| f == field)
            .map(|i| &self.columns[i])
            .ok_or_else(|| SpongeError::UnknownField(field.to_string()))
    }
}
