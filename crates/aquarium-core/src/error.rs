//! Error types for the aquarium.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid fish parameters: {0}")]
    InvalidFishParameters(String),

    #[error("Invalid aquarium cleanliness: {0} (expected 0..=30)")]
    InvalidAquariumCleanliness(i32),

    #[error("Coordinate out of bounds: {0} (expected 0.0..=1.0)")]
    OutOfBounds(f64),

    #[error("Invalid direction: {0}")]
    InvalidDirection(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
