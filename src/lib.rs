//! Summarise 5mC methylation over a genomic region of a bedMethyl pileup.
//!
//! The pipeline is [`data_load::load_table`] -> [`processing::aggregate`] ->
//! [`report::render`], with the region parsed by [`methylome::parse_region`].

pub mod argparser;
pub mod data;
pub mod data_load;
pub mod error;
pub mod processing;
pub mod report;
