use std::fmt::Display;

/// Strand column of a bedMethyl row. Anything other than `+` or `-`
/// (usually `.`) is kept as `Unknown`.
#[derive(Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum Strand {
    Positive,
    Negative,
    Unknown,
}

impl Display for Strand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let txt = match self {
            Strand::Positive => "+",
            Strand::Negative => "-",
            Strand::Unknown => ".",
        };
        write!(f, "{}", txt)
    }
}

impl Strand {
    pub fn from_pileup_code(strand: &str) -> Self {
        match strand {
            "+" => Strand::Positive,
            "-" => Strand::Negative,
            _ => Strand::Unknown,
        }
    }
}
