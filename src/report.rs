use indicatif::HumanCount;
use std::io::{self, Write};

use crate::processing::{AggregationResult, RegionSummary};

const BAR_WIDTH: usize = 40;
const RULE_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// `Label: value` lines for other tools to parse.
    Simple,
    /// Decorated report; `verbose` adds the strand distribution.
    Full { verbose: bool },
}

/// Writes the report for `result` to `out`, or its failure message to `err`.
pub fn render<W: Write, E: Write>(
    result: &AggregationResult,
    mode: OutputMode,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    let summary = match result {
        AggregationResult::Summary(summary) => summary,
        AggregationResult::Failed(failure) => {
            return writeln!(err, "Error: {}", failure.message);
        }
    };

    match mode {
        OutputMode::Simple => render_simple(summary, out),
        OutputMode::Full { verbose } => render_full(summary, verbose, out),
    }
}

fn render_simple<W: Write>(s: &RegionSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "Region: {}", s.region)?;
    writeln!(out, "Positions: {}", s.total_positions)?;
    writeln!(out, "Modified reads: {}", s.total_modified_reads)?;
    writeln!(out, "Unmodified reads: {}", s.total_unmodified_reads)?;
    writeln!(out, "Total reads: {}", s.total_reads)?;
    writeln!(
        out,
        "Methylation: {}%",
        format_shortest(s.overall_methylation_percent)
    )?;
    Ok(())
}

fn render_full<W: Write>(s: &RegionSummary, verbose: bool, out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "\n{}", rule)?;
    writeln!(out, "Methylation Analysis for Region: {}", s.region)?;
    writeln!(out, "{}", rule)?;

    writeln!(out, "\n📊 Overall Statistics:")?;
    writeln!(
        out,
        "  • Total CpG positions analyzed: {}",
        HumanCount(s.total_positions as u64)
    )?;
    writeln!(
        out,
        "  • Total reads analyzed: {}",
        HumanCount(s.total_reads)
    )?;
    writeln!(
        out,
        "  • Mean coverage per position: {:.1}",
        s.mean_coverage_per_position
    )?;
    writeln!(
        out,
        "  • Median coverage per position: {:.1}",
        s.median_coverage_per_position
    )?;

    writeln!(out, "\n🧬 Methylation Counts:")?;
    writeln!(
        out,
        "  • Methylated reads: {}",
        HumanCount(s.total_modified_reads)
    )?;
    writeln!(
        out,
        "  • Unmethylated reads: {}",
        HumanCount(s.total_unmodified_reads)
    )?;
    if let Some(other) = s.total_other_modifications {
        writeln!(out, "  • Other modifications: {}", HumanCount(other))?;
    }

    writeln!(out, "\n📈 Methylation Percentage:")?;
    writeln!(
        out,
        "  • Overall methylation: {:.2}%",
        s.overall_methylation_percent
    )?;
    writeln!(
        out,
        "  • Visual: [{}] {:.1}%",
        methylation_bar(s.overall_methylation_percent),
        s.overall_methylation_percent
    )?;

    if verbose {
        writeln!(out, "\n🔬 Strand Distribution:")?;
        writeln!(out, "  • Plus strand positions: {}", s.positions_plus_strand)?;
        writeln!(out, "  • Minus strand positions: {}", s.positions_minus_strand)?;
    }

    writeln!(out, "\n{}", rule)?;
    Ok(())
}

/// Fixed-width bar of filled and empty blocks, truncated toward empty.
pub fn methylation_bar(percent: f64) -> String {
    let filled = ((BAR_WIDTH as f64 * percent / 100.0) as usize).min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// Shortest representation, but always with a decimal point: `70.0`, `66.67`.
pub fn format_shortest(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
