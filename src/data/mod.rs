pub mod schema;

use ahash::AHashMap;
use methylome::{ModType, Strand};

use crate::error::TableError;
use schema::{Column, FieldValue, TableSchema};

/// One row of a bedMethyl pileup. Optional fields are `Some` exactly when the
/// file carries that column.
#[derive(Debug, Clone, PartialEq)]
pub struct MethylationRecord {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub mod_type: String,
    pub score: f64,
    pub strand: Strand,
    pub coverage: u64,
    pub percent_modified: Option<f64>,
    pub n_modified: Option<u64>,
    pub n_canonical: Option<u64>,
    pub n_other_mod: Option<u64>,
    pub n_delete: Option<u64>,
    pub n_fail: Option<u64>,
    pub n_diff: Option<u64>,
    pub n_nocall: Option<u64>,
}

impl MethylationRecord {
    /// Builds a record from the fields of one line, laid out by `schema`.
    pub fn from_fields<'a, I>(
        schema: &TableSchema,
        fields: I,
        line: u64,
    ) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().collect();
        if fields.len() != schema.len() {
            return Err(TableError::Parse {
                line,
                message: format!(
                    "expected {} tab-separated fields, found {}",
                    schema.len(),
                    fields.len()
                ),
            });
        }

        let mut record = Self {
            chrom: String::new(),
            start: 0,
            end: 0,
            mod_type: String::new(),
            score: 0.0,
            strand: Strand::Unknown,
            coverage: 0,
            percent_modified: None,
            n_modified: None,
            n_canonical: None,
            n_other_mod: None,
            n_delete: None,
            n_fail: None,
            n_diff: None,
            n_nocall: None,
        };

        for (column, raw) in schema.columns().iter().zip(fields) {
            let value = column
                .parse(raw)
                .map_err(|message| TableError::Parse { line, message })?;
            record.set(*column, value);
        }

        Ok(record)
    }

    fn set(&mut self, column: Column, value: FieldValue) {
        let count = match &value {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        };

        match (column, value) {
            (Column::Chrom, FieldValue::Text(s)) => self.chrom = s,
            (Column::ModType, FieldValue::Text(s)) => self.mod_type = s,
            (Column::Strand, FieldValue::Text(s)) => self.strand = Strand::from_pileup_code(&s),
            (Column::Start, FieldValue::Integer(v)) => self.start = v,
            (Column::End, FieldValue::Integer(v)) => self.end = v,
            (Column::Coverage, FieldValue::Integer(v)) => self.coverage = v,
            (Column::Score, FieldValue::Number(v)) => self.score = v,
            (Column::PercentModified, FieldValue::Number(v)) => self.percent_modified = Some(v),
            (Column::NModified, _) => self.n_modified = count,
            (Column::NCanonical, _) => self.n_canonical = count,
            (Column::NOtherMod, _) => self.n_other_mod = count,
            (Column::NDelete, _) => self.n_delete = count,
            (Column::NFail, _) => self.n_fail = count,
            (Column::NDiff, _) => self.n_diff = count,
            (Column::NNocall, _) => self.n_nocall = count,
            _ => {}
        }
    }
}

/// A loaded bedMethyl file: its sniffed layout and its rows in file order.
#[derive(Debug, Clone)]
pub struct MethylationTable {
    schema: TableSchema,
    records: Vec<MethylationRecord>,
}

impl MethylationTable {
    pub fn new(schema: TableSchema, records: Vec<MethylationRecord>) -> Self {
        Self { schema, records }
    }

    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    pub fn records(&self) -> &[MethylationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn count_mod_type(&self, mod_type: ModType) -> usize {
        self.records
            .iter()
            .filter(|rec| mod_type.matches_code(&rec.mod_type))
            .count()
    }

    /// Number of rows per pileup mod code.
    pub fn mod_type_counts(&self) -> AHashMap<String, usize> {
        let mut counts = AHashMap::new();
        for rec in &self.records {
            *counts.entry(rec.mod_type.clone()).or_insert(0) += 1;
        }
        counts
    }
}
