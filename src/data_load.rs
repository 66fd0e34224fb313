use bytesize::ByteSize;
use csv::{ReaderBuilder, StringRecord};
use flate2::read::MultiGzDecoder;
use humantime::format_duration;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, log_enabled, Level};
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    time::{Duration, Instant},
};

use crate::data::{schema::TableSchema, MethylationRecord, MethylationTable};
use crate::error::TableError;

/// Reads a bedMethyl file into memory.
///
/// Files ending in `.gz` or `.bgz` are decompressed on the fly. Lines
/// starting with `#` and blank lines are skipped. The column layout is
/// taken from the first data line and every other line must match it.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<MethylationTable, TableError> {
    let path = path.as_ref();
    let load_duration = Instant::now();

    let file = File::open(path).map_err(|source| TableError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if let Ok(metadata) = file.metadata() {
        info!("bedMethyl file size: {}", ByteSize::b(metadata.len()));
    }

    let reader: Box<dyn Read> = if is_gzipped(path) {
        info!("Decompressing gzipped input");
        Box::new(MultiGzDecoder::new(file))
    } else {
        Box::new(file)
    };

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b'\t')
        .comment(Some(b'#'))
        .quoting(false)
        .flexible(true)
        .from_reader(BufReader::new(reader));
    let mut record = StringRecord::with_capacity(128, 18);

    let mut has_row = read_next(&mut rdr, &mut record, path)?;
    if !has_row {
        return Err(TableError::Malformed(format!(
            "no data rows found in {:?}",
            path
        )));
    }

    let schema = TableSchema::for_column_count(record.len())?;
    debug!(
        "Sniffed {} columns: {}",
        schema.len(),
        schema
            .columns()
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let pb = loading_spinner();
    let mut records: Vec<MethylationRecord> = Vec::new();

    while has_row {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        records.push(MethylationRecord::from_fields(&schema, record.iter(), line)?);

        if records.len() % 100_000 == 0 {
            pb.set_position(records.len() as u64);
        }

        has_row = read_next(&mut rdr, &mut record, path)?;
    }
    pb.finish_and_clear();

    info!(
        "Read {} rows in {}",
        records.len(),
        format_duration(load_duration.elapsed())
    );

    Ok(MethylationTable::new(schema, records))
}

fn read_next<R: Read>(
    rdr: &mut csv::Reader<R>,
    record: &mut StringRecord,
    path: &Path,
) -> Result<bool, TableError> {
    rdr.read_record(record)
        .map_err(|e| TableError::from_csv(path, e))
}

fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("gz") || ext.eq_ignore_ascii_case("bgz"))
        .unwrap_or(false)
}

fn loading_spinner() -> ProgressBar {
    if !log_enabled!(Level::Info) {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {human_pos} rows")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(200));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::Column;
    use flate2::{write::GzEncoder, Compression};
    use methylome::Strand;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_full_pileup() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(
            pileup_file,
            "contig_3\t0\t1\tm\t133\t-\t0\t1\t255,0,0\t133\t7.52\t10\t123\t0\t0\t6\t0\t0"
        )?;
        writeln!(
            pileup_file,
            "contig_3\t1\t2\ta\t174\t+\t1\t2\t255,0,0\t174\t2.87\t5\t169\t0\t0\t3\t0\t0"
        )?;

        let table = load_table(pileup_file.path())?;

        assert_eq!(table.schema().len(), 18);
        assert_eq!(table.len(), 2);
        let first = &table.records()[0];
        assert_eq!(first.chrom, "contig_3");
        assert_eq!(first.strand, Strand::Negative);
        assert_eq!(first.n_modified, Some(10));
        assert_eq!(table.records()[1].mod_type, "a");

        Ok(())
    }

    #[test]
    fn test_skips_comments_and_blank_lines() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(pileup_file, "#chrom\tstart\tend\tname")?;
        writeln!(pileup_file, "chr1\t10\t11\tm\t5\t+\t10\t11\t0,0,0\t5\t40.0")?;
        writeln!(pileup_file)?;
        writeln!(pileup_file, "# trailing comment")?;
        writeln!(pileup_file, "chr1\t12\t13\tm\t8\t-\t12\t13\t0,0,0\t8\t50.0")?;

        let table = load_table(pileup_file.path())?;

        assert_eq!(table.schema().optional_columns(), &[Column::PercentModified]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].percent_modified, Some(50.0));

        Ok(())
    }

    #[test]
    fn test_load_gzipped_pileup() -> anyhow::Result<()> {
        let pileup_file = Builder::new().suffix(".bed.gz").tempfile()?;
        {
            let mut encoder = GzEncoder::new(pileup_file.as_file(), Compression::default());
            writeln!(
                encoder,
                "chr1\t10\t11\tm\t10\t+\t10\t11\t0,0,0\t10\t80.0\t8\t2"
            )?;
            writeln!(
                encoder,
                "chr1\t20\t21\tm\t10\t+\t20\t21\t0,0,0\t10\t60.0\t6\t4"
            )?;
            encoder.finish()?;
        }

        let table = load_table(pileup_file.path())?;

        assert_eq!(table.schema().len(), 13);
        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[1].n_canonical, Some(4));

        Ok(())
    }

    #[test]
    fn test_too_few_columns() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(pileup_file, "chr1\t10\t11\tm\t5\t+")?;

        let result = load_table(pileup_file.path());
        assert!(matches!(result, Err(TableError::Malformed(_))));

        Ok(())
    }

    #[test]
    fn test_no_data_rows() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(pileup_file, "# header only")?;

        let result = load_table(pileup_file.path());
        assert!(matches!(result, Err(TableError::Malformed(_))));

        Ok(())
    }

    #[test]
    fn test_inconsistent_row_length() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(pileup_file, "chr1\t10\t11\tm\t5\t+\t10\t11\t0,0,0\t5\t40.0")?;
        writeln!(pileup_file, "chr1\t12\t13\tm\t8\t-\t12\t13\t0,0,0\t8")?;

        let result = load_table(pileup_file.path());
        match result {
            Err(TableError::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 11"), "{}", message);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }

        Ok(())
    }

    #[test]
    fn test_invalid_coverage() -> anyhow::Result<()> {
        let mut pileup_file = NamedTempFile::new()?;
        writeln!(pileup_file, "chr1\t10\t11\tm\t5\t+\t10\t11\t0,0,0\tmany")?;

        let result = load_table(pileup_file.path());
        assert!(matches!(result, Err(TableError::Parse { .. })));

        Ok(())
    }

    #[test]
    fn test_missing_file() {
        let result = load_table("does/not/exist.bed");
        assert!(matches!(result, Err(TableError::Read { .. })));
    }

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("sample.bedmethyl.gz")));
        assert!(is_gzipped(Path::new("sample.bed.BGZ")));
        assert!(!is_gzipped(Path::new("sample.bedmethyl")));
        assert!(!is_gzipped(Path::new("gz")));
    }
}
