use std::fmt;

use crate::MethylomeError;

/// Half-open, 0-based interval on a single chromosome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenomicInterval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
}

impl GenomicInterval {
    pub fn new(chrom: &str, start: u64, end: u64) -> Result<Self, MethylomeError> {
        if end < start {
            return Err(MethylomeError::InvalidRegionFormat(format!(
                "{}:{}-{}",
                chrom,
                start + 1,
                end
            )));
        }

        Ok(Self {
            chrom: chrom.to_string(),
            start,
            end,
        })
    }

    /// Whether `[start, end)` lies entirely inside this interval on `chrom`.
    pub fn contains(&self, chrom: &str, start: u64, end: u64) -> bool {
        self.chrom == chrom && start >= self.start && end <= self.end
    }
}

/// Displays the interval in the 1-based inclusive form users type.
impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start + 1, self.end)
    }
}

/// Parses a 1-based inclusive `chrom:start-end` string into a 0-based
/// half-open [`GenomicInterval`].
///
/// # Errors
/// Returns [`MethylomeError::InvalidRegionFormat`] if the text does not split
/// into exactly one chromosome and two coordinates, if a coordinate is not a
/// non-negative integer, if the start is 0, or if the end lies before the start.
///
/// # Examples
/// ```
/// use methylome::parse_region;
///
/// let region = parse_region("chrX:101-200").unwrap();
/// assert_eq!(region.start, 100);
/// assert_eq!(region.end, 200);
/// assert_eq!(region.to_string(), "chrX:101-200");
/// ```
pub fn parse_region(text: &str) -> Result<GenomicInterval, MethylomeError> {
    let invalid = || MethylomeError::InvalidRegionFormat(text.to_string());

    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() != 2 {
        return Err(invalid());
    }
    let chrom = parts[0];

    let coords: Vec<&str> = parts[1].split('-').collect();
    if coords.len() != 2 {
        return Err(invalid());
    }

    let start: u64 = coords[0].trim().parse().map_err(|_| invalid())?;
    let end: u64 = coords[1].trim().parse().map_err(|_| invalid())?;

    if chrom.is_empty() || start == 0 || start - 1 > end {
        return Err(invalid());
    }

    GenomicInterval::new(chrom, start - 1, end).map_err(|_| invalid())
}
