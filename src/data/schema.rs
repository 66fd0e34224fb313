use std::fmt;

use crate::error::TableError;

/// Every column a bedMethyl pileup can carry, in file order.
pub const ALL_COLUMNS: [Column; 18] = [
    Column::Chrom,
    Column::Start,
    Column::End,
    Column::ModType,
    Column::Score,
    Column::Strand,
    Column::StartDup,
    Column::EndDup,
    Column::Color,
    Column::Coverage,
    Column::PercentModified,
    Column::NModified,
    Column::NCanonical,
    Column::NOtherMod,
    Column::NDelete,
    Column::NFail,
    Column::NDiff,
    Column::NNocall,
];

pub const MANDATORY_COLUMNS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Chrom,
    Start,
    End,
    ModType,
    Score,
    Strand,
    StartDup,
    EndDup,
    Color,
    Coverage,
    PercentModified,
    NModified,
    NCanonical,
    NOtherMod,
    NDelete,
    NFail,
    NDiff,
    NNocall,
}

/// How the raw text of a column is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Must parse as a non-negative integer, otherwise the row is rejected.
    Integer,
    /// Must parse as a number, otherwise the row is rejected.
    Number,
    /// Unparsable or NaN values become missing.
    LenientNumber,
    /// Unparsable values become 0.
    ZeroFilledCount,
    /// Unparsable values become missing.
    LenientCount,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Integer(u64),
    Number(f64),
    Missing,
    Skipped,
}

impl Column {
    pub fn name(&self) -> &'static str {
        match self {
            Column::Chrom => "chrom",
            Column::Start => "start",
            Column::End => "end",
            Column::ModType => "mod_type",
            Column::Score => "score",
            Column::Strand => "strand",
            Column::StartDup => "start_dup",
            Column::EndDup => "end_dup",
            Column::Color => "color",
            Column::Coverage => "coverage",
            Column::PercentModified => "percent_modified",
            Column::NModified => "n_modified",
            Column::NCanonical => "n_canonical",
            Column::NOtherMod => "n_other_mod",
            Column::NDelete => "n_delete",
            Column::NFail => "n_fail",
            Column::NDiff => "n_diff",
            Column::NNocall => "n_nocall",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Column::Chrom | Column::ModType | Column::Strand => FieldKind::Text,
            Column::Start | Column::End | Column::Coverage => FieldKind::Integer,
            Column::Score => FieldKind::Number,
            Column::StartDup | Column::EndDup | Column::Color => FieldKind::Ignored,
            Column::PercentModified => FieldKind::LenientNumber,
            Column::NModified | Column::NCanonical => FieldKind::ZeroFilledCount,
            Column::NOtherMod
            | Column::NDelete
            | Column::NFail
            | Column::NDiff
            | Column::NNocall => FieldKind::LenientCount,
        }
    }

    /// Converts the raw text of this column. Only strict kinds can fail.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, String> {
        let raw = raw.trim();
        match self.kind() {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer => raw
                .parse()
                .map(FieldValue::Integer)
                .map_err(|_| format!("Invalid {} value: '{}'", self.name(), raw)),
            FieldKind::Number => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() => Ok(FieldValue::Number(v)),
                _ => Err(format!("Invalid {} value: '{}'", self.name(), raw)),
            },
            FieldKind::LenientNumber => Ok(match raw.parse::<f64>() {
                Ok(v) if !v.is_nan() => FieldValue::Number(v),
                _ => FieldValue::Missing,
            }),
            FieldKind::ZeroFilledCount => Ok(FieldValue::Integer(parse_count(raw).unwrap_or(0))),
            FieldKind::LenientCount => Ok(match parse_count(raw) {
                Some(v) => FieldValue::Integer(v),
                None => FieldValue::Missing,
            }),
            FieldKind::Ignored => Ok(FieldValue::Skipped),
        }
    }
}

/// Read counts as integers, also accepting integral floats such as `8.0`.
fn parse_count(raw: &str) -> Option<u64> {
    if let Ok(v) = raw.parse::<u64>() {
        return Some(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Some(v as u64)
        }
        _ => None,
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Ordered column layout of a bedMethyl file, fixed by its column count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    columns: Vec<Column>,
}

impl TableSchema {
    pub fn for_column_count(n_columns: usize) -> Result<Self, TableError> {
        if n_columns < MANDATORY_COLUMNS {
            return Err(TableError::Malformed(format!(
                "found {} columns, but bedMethyl requires at least {}",
                n_columns, MANDATORY_COLUMNS
            )));
        }
        if n_columns > ALL_COLUMNS.len() {
            return Err(TableError::Malformed(format!(
                "found {} columns, but bedMethyl has at most {}",
                n_columns,
                ALL_COLUMNS.len()
            )));
        }

        Ok(Self {
            columns: ALL_COLUMNS[..n_columns].to_vec(),
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Columns beyond the mandatory ten.
    pub fn optional_columns(&self) -> &[Column] {
        &self.columns[MANDATORY_COLUMNS..]
    }
}
