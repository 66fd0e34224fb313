use log::warn;
use methylome::{GenomicInterval, ModType, Strand};

use crate::data::{
    schema::{Column, TableSchema},
    MethylationRecord, MethylationTable,
};
use crate::error::AggregationError;

/// Only 5mC calls are aggregated.
pub const TARGET_MOD_TYPE: ModType = ModType::FiveMC;

/// How modified and unmodified read counts are obtained for a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStrategy {
    /// Sum `n_modified` and `n_canonical` (and `n_other_mod` when present).
    DirectCounts { with_other_mod: bool },
    /// Estimate counts from `percent_modified` and `coverage`.
    PercentDerived,
}

impl CountStrategy {
    /// Picks the best strategy the table layout supports. Direct counts win
    /// whenever both are possible.
    pub fn for_schema(schema: &TableSchema) -> Option<Self> {
        if schema.has(Column::NModified) && schema.has(Column::NCanonical) {
            Some(CountStrategy::DirectCounts {
                with_other_mod: schema.has(Column::NOtherMod),
            })
        } else if schema.has(Column::PercentModified) && schema.has(Column::Coverage) {
            Some(CountStrategy::PercentDerived)
        } else {
            None
        }
    }

    /// Totals for `rows`, or `None` if a sum leaves the `u64` range.
    fn count(&self, rows: &[&MethylationRecord]) -> Option<ReadCounts> {
        match self {
            CountStrategy::DirectCounts { with_other_mod } => {
                let modified = checked_sum(rows.iter().filter_map(|rec| rec.n_modified))?;
                let unmodified = checked_sum(rows.iter().filter_map(|rec| rec.n_canonical))?;
                let other_mod = if *with_other_mod {
                    checked_sum(rows.iter().filter_map(|rec| rec.n_other_mod))?
                } else {
                    0
                };

                Some(ReadCounts {
                    modified,
                    unmodified,
                    other_mod,
                    total: modified.checked_add(unmodified)?,
                })
            }
            CountStrategy::PercentDerived => {
                let mut counts = ReadCounts::default();
                let mut skipped = 0;

                for rec in rows {
                    let Some(percent) = rec.percent_modified else {
                        skipped += 1;
                        continue;
                    };
                    let modified = estimate_modified(percent, rec.coverage);
                    counts.modified = counts.modified.checked_add(modified)?;
                    counts.unmodified = counts.unmodified.checked_add(rec.coverage - modified)?;
                    counts.total = counts.total.checked_add(rec.coverage)?;
                }

                if skipped > 0 {
                    warn!(
                        "Skipped {} positions without a percent_modified value",
                        skipped
                    );
                }
                Some(counts)
            }
        }
    }
}

fn checked_sum<I: Iterator<Item = u64>>(mut values: I) -> Option<u64> {
    values.try_fold(0u64, |acc, v| acc.checked_add(v))
}

/// Modified read estimate for one position, rounded half to even and kept
/// within `[0, coverage]`.
pub fn estimate_modified(percent_modified: f64, coverage: u64) -> u64 {
    let estimate = (percent_modified / 100.0 * coverage as f64).round_ties_even();
    (estimate.max(0.0) as u64).min(coverage)
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ReadCounts {
    modified: u64,
    unmodified: u64,
    other_mod: u64,
    total: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegionSummary {
    pub region: String,
    pub total_positions: usize,
    pub total_modified_reads: u64,
    pub total_unmodified_reads: u64,
    /// Only set when at least one other-modification call was seen.
    pub total_other_modifications: Option<u64>,
    pub total_reads: u64,
    pub overall_methylation_percent: f64,
    pub mean_coverage_per_position: f64,
    pub median_coverage_per_position: f64,
    pub positions_plus_strand: usize,
    pub positions_minus_strand: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoDataInRegion,
    InsufficientColumns,
}

/// An expected, recoverable outcome where no summary can be produced.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregationFailure {
    pub kind: FailureKind,
    pub message: String,
    pub total_positions: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AggregationResult {
    Summary(RegionSummary),
    Failed(AggregationFailure),
}

/// Summarises 5mC calls fully contained in `region`.
///
/// An empty region or a table without count columns is reported through
/// [`AggregationResult::Failed`]. Only read totals too large for `u64` are
/// an error.
pub fn aggregate(
    table: &MethylationTable,
    region: &GenomicInterval,
) -> Result<AggregationResult, AggregationError> {
    let rows: Vec<&MethylationRecord> = table
        .records()
        .iter()
        .filter(|rec| TARGET_MOD_TYPE.matches_code(&rec.mod_type))
        .filter(|rec| region.contains(&rec.chrom, rec.start, rec.end))
        .collect();

    if rows.is_empty() {
        return Ok(AggregationResult::Failed(AggregationFailure {
            kind: FailureKind::NoDataInRegion,
            message: format!("No 5mC data found in region {}", region),
            total_positions: 0,
        }));
    }

    let Some(strategy) = CountStrategy::for_schema(table.schema()) else {
        return Ok(AggregationResult::Failed(AggregationFailure {
            kind: FailureKind::InsufficientColumns,
            message: "Insufficient data columns to calculate methylation".to_string(),
            total_positions: rows.len(),
        }));
    };

    let counts = strategy
        .count(&rows)
        .ok_or_else(|| AggregationError::CountOverflow {
            region: region.to_string(),
        })?;

    let overall_methylation_percent = if counts.total > 0 {
        counts.modified as f64 / counts.total as f64 * 100.0
    } else {
        0.0
    };

    let mut coverages: Vec<u64> = rows.iter().map(|rec| rec.coverage).collect();

    Ok(AggregationResult::Summary(RegionSummary {
        region: region.to_string(),
        total_positions: rows.len(),
        total_modified_reads: counts.modified,
        total_unmodified_reads: counts.unmodified,
        total_other_modifications: (counts.other_mod > 0).then_some(counts.other_mod),
        total_reads: counts.total,
        overall_methylation_percent: round2(overall_methylation_percent),
        mean_coverage_per_position: round2(mean(&coverages)),
        median_coverage_per_position: round2(median(&mut coverages)),
        positions_plus_strand: rows
            .iter()
            .filter(|rec| rec.strand == Strand::Positive)
            .count(),
        positions_minus_strand: rows
            .iter()
            .filter(|rec| rec.strand == Strand::Negative)
            .count(),
    }))
}

/// Rounds to 2 decimals, ties to even (`0.125` -> `0.12`).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn mean(values: &[u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let total: u128 = values.iter().map(|&v| v as u128).sum();
    total as f64 / values.len() as f64
}

fn median(values: &mut [u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}
