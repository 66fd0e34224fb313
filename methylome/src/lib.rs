//! Shared vocabulary for bedMethyl pileups: strands, modification codes and
//! genomic intervals.

mod error;
mod modtype;
pub mod region;
mod strand;

pub use error::MethylomeError;
pub use modtype::ModType;
pub use region::{parse_region, GenomicInterval};
pub use strand::Strand;
