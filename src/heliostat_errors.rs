use thiserror::Error;

#[derive(Error, Debug)]
pub enum HeliostatError {
    #[error("Zero-length vector cannot be used as a direction: {0}")]
    DegenerateVector(&'static str),

    #[error("Invalid solar model: {0}")]
    InvalidSolarModel(String),

    #[error("Invalid heliostat configuration: {0}")]
    InvalidConfig(String),

    #[error("Error during the TOML parsing: {0}")]
    TomlParsing(#[from] toml::de::Error),

    #[error("Invalid epoch: {0}")]
    InvalidEpoch(String),
}

impl PartialEq for HeliostatError {
    fn eq(&self, other: &Self) -> bool {
        use HeliostatError::*;
        match (self, other) {
            (DegenerateVector(a), DegenerateVector(b)) => a == b,
            (InvalidSolarModel(a), InvalidSolarModel(b)) => a == b,
            (InvalidConfig(a), InvalidConfig(b)) => a == b,
            (InvalidEpoch(a), InvalidEpoch(b)) => a == b,

            // toml errors carry spans and are not comparable: same variant is enough
            (TomlParsing(_), TomlParsing(_)) => true,

            _ => false,
        }
    }
}
