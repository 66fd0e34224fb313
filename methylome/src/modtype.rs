use std::fmt;

use crate::MethylomeError;

#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub enum ModType {
    SixMA,
    FiveMC,
    FiveHMC,
    FourMC,
}

impl ModType {
    pub fn from_str(mod_type: &str) -> Result<Self, MethylomeError> {
        match mod_type {
            "a" => Ok(ModType::SixMA),
            "m" => Ok(ModType::FiveMC),
            "h" => Ok(ModType::FiveHMC),
            "21839" => Ok(ModType::FourMC),
            _ => Err(MethylomeError::UnsupportedModType(mod_type.to_string())),
        }
    }

    pub fn to_pileup_code(&self) -> &'static str {
        match self {
            ModType::SixMA => "a",
            ModType::FiveMC => "m",
            ModType::FiveHMC => "h",
            ModType::FourMC => "21839",
        }
    }

    /// True if a pileup mod code names this modification.
    pub fn matches_code(&self, code: &str) -> bool {
        self.to_pileup_code() == code
    }
}

impl fmt::Display for ModType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ModType::SixMA => write!(f, "6mA (a)"),
            ModType::FiveMC => write!(f, "5mC (m)"),
            ModType::FiveHMC => write!(f, "5hmC (h)"),
            ModType::FourMC => write!(f, "4mC (21839)"),
        }
    }
}
